//! Collision detection between kinematic bodies
//!
//! Everything in the playfield is an axis-aligned box, so a single strict
//! overlap test covers player, enemies and both projectile kinds.

use super::body::Body;

/// Check whether the boxes of two bodies intersect
///
/// Uses strict half-open overlap on both axes, so boxes that only share an
/// edge do not collide. A box with zero width or height never overlaps
/// anything, including itself.
pub fn overlaps(a: &Body, b: &Body) -> bool {
    if !a.has_area() || !b.has_area() {
        return false;
    }

    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}
