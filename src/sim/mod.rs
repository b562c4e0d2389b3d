//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed-order step per tick
//! - Seeded RNG only
//! - Wall-clock time is passed in, never read
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::overlaps;
pub use spawn::{
    burst, make_enemy, make_enemy_of_kind, make_enemy_shot, make_particle, make_player_shot,
    roll_enemy_kind,
};
pub use state::{
    Enemy, EnemyKind, EnemyShot, EnemyStats, GameState, Particle, Player, PlayerShot,
};
pub use tick::{TickInput, enemy_spawn_chance, tick};
