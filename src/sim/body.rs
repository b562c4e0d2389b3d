//! Kinematic body shared by every moving entity
//!
//! A body is an axis-aligned box:
//! - pos: top-left corner (y grows downward)
//! - size: width and height
//! - vel: displacement applied once per tick

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Position, size and velocity of an entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            vel: Vec2::ZERO,
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vel = Vec2::new(vx, vy);
        self
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Center of the box
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// True when the box encloses a non-zero area
    pub fn has_area(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }

    /// Move by one tick of velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Clamp horizontally so the whole box stays inside the playfield
    pub fn clamp_to_playfield_x(&mut self) {
        let max_x = (PLAYFIELD_WIDTH - self.size.x).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }

    /// Reverse horizontal velocity when the box touches or crosses a side
    /// edge while still heading into it. Returns true if it flipped.
    pub fn bounce_off_side_walls(&mut self) -> bool {
        let into_left = self.left() <= 0.0 && self.vel.x < 0.0;
        let into_right = self.right() >= PLAYFIELD_WIDTH && self.vel.x > 0.0;
        if into_left || into_right {
            self.vel.x = -self.vel.x;
        }
        into_left || into_right
    }

    /// Entirely above the top edge
    pub fn is_above_playfield(&self) -> bool {
        self.bottom() < 0.0
    }

    /// Top edge has moved past the bottom of the playfield
    pub fn is_below_playfield(&self) -> bool {
        self.top() > PLAYFIELD_HEIGHT
    }
}
