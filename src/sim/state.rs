//! Game state and core simulation types
//!
//! `GameState` is the authoritative world: one player, the projectile,
//! enemy and particle collections, score, wave and the session flags.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::consts::*;

/// Per-kind enemy stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub width: f32,
    pub height: f32,
    pub health: i32,
    /// Scales both descent speed and horizontal drift
    pub speed_factor: f32,
    pub contact_damage: i32,
    /// Wall-clock gap between shots (ms)
    pub shot_cooldown_ms: f64,
    /// Chance to fire on a tick once the cooldown has elapsed
    pub shot_chance: f64,
    pub shot_damage: i32,
    pub points: u64,
    pub color: u32,
}

const SCOUT: EnemyStats = EnemyStats {
    width: 40.0,
    height: 35.0,
    health: 1,
    speed_factor: 1.0,
    contact_damage: 15,
    shot_cooldown_ms: 2000.0,
    shot_chance: 0.003,
    shot_damage: 8,
    points: 10,
    color: 0x4CFF6A,
};

const HEAVY: EnemyStats = EnemyStats {
    width: 60.0,
    height: 50.0,
    health: 3,
    speed_factor: 0.7,
    contact_damage: 25,
    shot_cooldown_ms: 1500.0,
    shot_chance: 0.008,
    shot_damage: 15,
    points: 25,
    color: 0xFFB020,
};

const BOSS: EnemyStats = EnemyStats {
    width: 80.0,
    height: 70.0,
    health: 5,
    speed_factor: 0.5,
    contact_damage: 40,
    shot_cooldown_ms: 800.0,
    shot_chance: 0.015,
    shot_damage: 25,
    points: 50,
    color: 0xD040FF,
};

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Scout,
    Heavy,
    Boss,
}

impl EnemyKind {
    pub fn stats(self) -> &'static EnemyStats {
        match self {
            EnemyKind::Scout => &SCOUT,
            EnemyKind::Heavy => &HEAVY,
            EnemyKind::Boss => &BOSS,
        }
    }

    /// Descent speed in pixels per tick
    pub fn speed(self) -> f32 {
        ENEMY_BASE_SPEED * self.stats().speed_factor
    }

    /// Score awarded when destroyed by gunfire
    pub fn points(self) -> u64 {
        self.stats().points
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub shield: i32,
    pub max_shield: i32,
    /// Ticks remaining before shield regeneration resumes
    pub shield_regen_cooldown: u32,
    /// Wall-clock time (ms) of the last enemy projectile hit
    pub last_damaged_at: Option<f64>,
    /// Render-only animation counter
    pub anim_frame: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            body: Body::new(
                (PLAYFIELD_WIDTH - PLAYER_WIDTH) / 2.0,
                PLAYER_SPAWN_Y,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            shield: PLAYER_MAX_SHIELD,
            max_shield: PLAYER_MAX_SHIELD,
            shield_regen_cooldown: 0,
            last_damaged_at: None,
            anim_frame: 0,
        }
    }
}

impl Player {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Point the projectiles leave from (top center of the ship)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.body.pos.x + self.body.size.x / 2.0, self.body.pos.y)
    }

    /// Apply an enemy projectile hit: shield absorbs first, any overflow
    /// carries into health. Locks shield regeneration.
    pub fn take_projectile_hit(&mut self, damage: i32, now_ms: f64) {
        self.last_damaged_at = Some(now_ms);
        self.shield_regen_cooldown = SHIELD_HIT_LOCKOUT_TICKS;

        if self.shield > 0 {
            self.shield -= damage;
            if self.shield < 0 {
                self.health += self.shield;
                self.shield = 0;
            }
        } else {
            self.health -= damage;
        }
        self.clamp_vitals();
    }

    /// Apply ramming damage straight to health, ignoring the shield
    pub fn take_contact_damage(&mut self, damage: i32) {
        self.health -= damage;
        self.clamp_vitals();
    }

    /// Count down the regen lockout and restore one shield point whenever it
    /// reaches zero
    pub fn regenerate_shield(&mut self) {
        if self.shield_regen_cooldown > 0 {
            self.shield_regen_cooldown -= 1;
        }
        if self.shield_regen_cooldown == 0 && self.shield < self.max_shield {
            self.shield += 1;
            self.shield_regen_cooldown = SHIELD_REGEN_INTERVAL_TICKS;
        }
        self.clamp_vitals();
    }

    fn clamp_vitals(&mut self) {
        self.health = self.health.clamp(0, self.max_health);
        self.shield = self.shield.clamp(0, self.max_shield);
    }

    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.max_health.max(1) as f32
    }

    pub fn shield_fraction(&self) -> f32 {
        self.shield as f32 / self.max_shield.max(1) as f32
    }
}

/// A projectile fired by the player (travels upward)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerShot {
    pub body: Body,
    pub color: u32,
}

/// A projectile fired by an enemy (travels downward)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyShot {
    pub body: Body,
    pub color: u32,
    pub damage: i32,
}

/// An enemy ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    pub health: i32,
    pub color: u32,
    /// Render-only animation counter
    pub anim_frame: u32,
    /// Wall-clock time (ms) of the last shot, or of the spawn
    pub last_shot_at: f64,
}

impl Enemy {
    /// Point enemy projectiles leave from (bottom center of the ship)
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.body.pos.x + self.body.size.x / 2.0,
            self.body.bottom(),
        )
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: f32,
    /// Drawn independently of `life`, so `life / max_life` may start away from 1
    pub max_life: f32,
    pub color: u32,
    pub size: f32,
}

impl Particle {
    /// Move, apply drag and age by one tick
    pub fn step(&mut self) {
        self.pos += self.vel;
        self.vel *= PARTICLE_DRAG;
        self.life -= 1.0;
    }

    /// Opacity for renderers, clamped to [0, 1]
    pub fn fade(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Complete world state (deterministic for a given seed, inputs and clock)
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub player: Player,
    pub player_shots: Vec<PlayerShot>,
    pub enemy_shots: Vec<EnemyShot>,
    pub enemies: Vec<Enemy>,
    /// Visual particles (never collide)
    pub particles: Vec<Particle>,
    pub score: u64,
    /// Current wave (1-based)
    pub wave: u32,
    pub game_over: bool,
    pub paused: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Wall-clock time (ms) of the last player shot
    pub last_player_shot_at: Option<f64>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::default(),
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            score: 0,
            wave: 1,
            game_over: false,
            paused: false,
            time_ticks: 0,
            last_player_shot_at: None,
        }
    }

    /// Discard the world and start over with the same seed
    pub fn reset(&mut self) {
        *self = Self::new(self.seed);
    }

    /// Discard the world and start a different run
    pub fn reset_with_seed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Flip the paused flag; nothing else changes
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// True while ticks should advance the world
    pub fn is_running(&self) -> bool {
        !self.game_over && !self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7);
        assert_eq!(state.score, 0);
        assert_eq!(state.wave, 1);
        assert!(!state.game_over);
        assert!(!state.paused);
        assert!(state.enemies.is_empty());
        assert!(state.player_shots.is_empty());
        assert!(state.enemy_shots.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(state.player.shield, PLAYER_MAX_SHIELD);
        assert_eq!(state.player.body.center().x, PLAYFIELD_WIDTH / 2.0);
    }

    #[test]
    fn test_kind_table() {
        assert_eq!(EnemyKind::Scout.stats().health, 1);
        assert_eq!(EnemyKind::Heavy.stats().health, 3);
        assert_eq!(EnemyKind::Boss.stats().health, 5);
        assert!((EnemyKind::Scout.speed() - 1.5).abs() < 1e-5);
        assert!((EnemyKind::Heavy.speed() - 1.05).abs() < 1e-5);
        assert!((EnemyKind::Boss.speed() - 0.75).abs() < 1e-5);
        assert_eq!(EnemyKind::Scout.points() + EnemyKind::Heavy.points(), 35);
        assert_eq!(EnemyKind::Boss.points(), 50);
    }

    #[test]
    fn test_shield_overflow_carries_into_health() {
        let mut player = Player {
            shield: 10,
            ..Default::default()
        };
        player.take_projectile_hit(25, 1000.0);
        assert_eq!(player.shield, 0);
        assert_eq!(player.health, PLAYER_MAX_HEALTH - 15);
        assert_eq!(player.last_damaged_at, Some(1000.0));
        assert_eq!(player.shield_regen_cooldown, SHIELD_HIT_LOCKOUT_TICKS);
    }

    #[test]
    fn test_shield_absorbs_without_overflow() {
        let mut player = Player {
            shield: 30,
            ..Default::default()
        };
        player.take_projectile_hit(10, 0.0);
        assert_eq!(player.shield, 20);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_no_shield_hits_health() {
        let mut player = Player {
            shield: 0,
            health: 20,
            ..Default::default()
        };
        player.take_projectile_hit(8, 0.0);
        assert_eq!(player.health, 12);

        player.health = 5;
        player.take_projectile_hit(8, 0.0);
        assert_eq!(player.health, 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn test_contact_damage_bypasses_shield() {
        let mut player = Player::default();
        player.take_contact_damage(40);
        assert_eq!(player.shield, PLAYER_MAX_SHIELD);
        assert_eq!(player.health, PLAYER_MAX_HEALTH - 40);
        assert_eq!(player.shield_regen_cooldown, 0);
    }

    #[test]
    fn test_reset_matches_fresh_state() {
        let mut state = GameState::new(42);
        state.score = 500;
        state.wave = 3;
        state.paused = true;
        state.player.health = 1;
        state.reset();
        assert_eq!(state, GameState::new(42));
    }

    #[test]
    fn test_toggle_pause_touches_only_flag() {
        let mut state = GameState::new(3);
        state.score = 120;
        let before = state.clone();
        state.toggle_pause();
        assert!(state.paused);
        assert!(!state.is_running());
        state.toggle_pause();
        assert_eq!(state, before);
    }

    #[test]
    fn test_particle_step_applies_drag() {
        let mut particle = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(2.0, -2.0),
            life: 2.0,
            max_life: 40.0,
            color: DAMAGE_RED,
            size: 3.0,
        };
        particle.step();
        assert_eq!(particle.pos, Vec2::new(2.0, -2.0));
        assert!((particle.vel.x - 1.9).abs() < 1e-6);
        assert_eq!(particle.life, 1.0);
        assert!((particle.fade() - 0.025).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_projectile_hit_keeps_vitals_in_range(
            shield in 0i32..=PLAYER_MAX_SHIELD,
            health in 1i32..=PLAYER_MAX_HEALTH,
            damage in 0i32..200,
        ) {
            let mut player = Player { shield, health, ..Default::default() };
            player.take_projectile_hit(damage, 0.0);
            prop_assert!((0..=PLAYER_MAX_SHIELD).contains(&player.shield));
            prop_assert!((0..=PLAYER_MAX_HEALTH).contains(&player.health));

            let absorbed = if shield > 0 { damage.min(shield) } else { 0 };
            let expected_health = (health - (damage - absorbed)).max(0);
            prop_assert_eq!(player.health, expected_health);
        }
    }
}
