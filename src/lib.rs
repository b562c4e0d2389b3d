//! Nova Strike - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, the per-tick step)
//! - `input`: Held-control tracking, decoupled from host key codes
//! - `snapshot`: Read-only render view handed to the presentation layer
//! - `driver`: Frame scheduling and session controls (reset, pause)
//! - `settings`: Host configuration

pub mod driver;
pub mod input;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use driver::{FrameDriver, FrameOutcome};
#[cfg(not(target_arch = "wasm32"))]
pub use driver::FixedRateTimer;
pub use input::{Control, InputState};
pub use settings::{Settings, SettingsError};
pub use snapshot::RenderSnapshot;

/// Game configuration constants
///
/// Distances are in playfield pixels, speeds in pixels per tick.
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Nominal simulation rate for fixed-rate hosts
    pub const TICK_HZ: u32 = 60;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_SPAWN_Y: f32 = PLAYFIELD_HEIGHT - 80.0;
    pub const PLAYER_SPEED: f32 = 6.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_MAX_SHIELD: i32 = 50;
    /// Wall-clock gap between player shots (ms)
    pub const PLAYER_FIRE_COOLDOWN_MS: f64 = 120.0;

    /// Shield regeneration (tick-counted, unlike the shot cooldowns)
    pub const SHIELD_HIT_LOCKOUT_TICKS: u32 = 180;
    pub const SHIELD_REGEN_INTERVAL_TICKS: u32 = 30;

    /// Projectiles
    pub const PLAYER_SHOT_WIDTH: f32 = 4.0;
    pub const PLAYER_SHOT_HEIGHT: f32 = 15.0;
    pub const PLAYER_SHOT_SPEED: f32 = 10.0;
    pub const ENEMY_SHOT_WIDTH: f32 = 4.0;
    pub const ENEMY_SHOT_HEIGHT: f32 = 12.0;
    pub const ENEMY_SHOT_SPEED: f32 = 5.0;

    /// Enemy spawn chance per tick: base + wave * step (no upper cap)
    pub const ENEMY_SPAWN_BASE_CHANCE: f64 = 0.015;
    pub const ENEMY_SPAWN_CHANCE_PER_WAVE: f64 = 0.003;
    /// Base enemy descent speed before the per-kind factor
    pub const ENEMY_BASE_SPEED: f32 = 1.5;

    /// Score step that advances the wave
    pub const WAVE_SCORE_STEP: u64 = 250;

    /// Particle burst sizes
    pub const CONTACT_PARTICLES: usize = 10;
    pub const KILL_PARTICLES: usize = 15;
    pub const SHOT_HIT_PARTICLES: usize = 5;
    pub const PLAYER_HIT_PARTICLES: usize = 8;
    /// Multiplicative velocity drag applied to particles each tick
    pub const PARTICLE_DRAG: f32 = 0.95;

    /// Palette (0xRRGGBB)
    pub const DAMAGE_RED: u32 = 0xFF3344;
    pub const PLAYER_SHOT_COLOR: u32 = 0x00E5FF;
    pub const ENEMY_SHOT_COLOR: u32 = 0xFF7A1A;
}
