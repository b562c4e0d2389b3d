//! Entity factories
//!
//! All randomness flows through the caller's RNG so a seeded world stays
//! reproducible.

use glam::Vec2;
use rand::Rng;

use super::body::Body;
use super::state::{Enemy, EnemyKind, EnemyShot, Particle, Player, PlayerShot};
use crate::consts::*;

/// Waves up to this one only field scouts
const SCOUT_ONLY_LAST_WAVE: u32 = 3;

/// Weighted kind pools: duplicate entries double the odds
const EARLY_KIND_POOL: [EnemyKind; 2] = [EnemyKind::Scout, EnemyKind::Scout];
const FULL_KIND_POOL: [EnemyKind; 4] = [
    EnemyKind::Scout,
    EnemyKind::Scout,
    EnemyKind::Heavy,
    EnemyKind::Boss,
];

/// Create one particle with randomized velocity, lifetime and size
///
/// `life` and `max_life` are separate draws.
pub fn make_particle<R: Rng>(pos: Vec2, color: u32, rng: &mut R) -> Particle {
    let life = rng.random_range(30.0..50.0);
    let max_life = rng.random_range(30.0..50.0);
    Particle {
        pos,
        vel: Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)),
        life,
        max_life,
        color,
        size: rng.random_range(2.0..5.0),
    }
}

/// Append `count` particles at `pos`
pub fn burst<R: Rng>(
    particles: &mut Vec<Particle>,
    pos: Vec2,
    color: u32,
    count: usize,
    rng: &mut R,
) {
    particles.extend((0..count).map(|_| make_particle(pos, color, rng)));
}

/// Pick an enemy kind for the given wave
pub fn roll_enemy_kind<R: Rng>(wave: u32, rng: &mut R) -> EnemyKind {
    let pool: &[EnemyKind] = if wave <= SCOUT_ONLY_LAST_WAVE {
        &EARLY_KIND_POOL
    } else {
        &FULL_KIND_POOL
    };
    pool[rng.random_range(0..pool.len())]
}

/// Create an enemy of a wave-appropriate kind just above the playfield
pub fn make_enemy<R: Rng>(wave: u32, now_ms: f64, rng: &mut R) -> Enemy {
    let kind = roll_enemy_kind(wave, rng);
    make_enemy_of_kind(kind, now_ms, rng)
}

/// Create an enemy of a specific kind just above the playfield
///
/// Horizontal drift shrinks with the kind's speed factor, so bosses wander
/// the least.
pub fn make_enemy_of_kind<R: Rng>(kind: EnemyKind, now_ms: f64, rng: &mut R) -> Enemy {
    let stats = kind.stats();
    let x = rng.random::<f32>() * (PLAYFIELD_WIDTH - stats.width);
    let drift = rng.random_range(-1.0f32..1.0) * stats.speed_factor;

    Enemy {
        body: Body::new(x, -stats.height, stats.width, stats.height)
            .with_velocity(drift, kind.speed()),
        kind,
        health: stats.health,
        color: stats.color,
        anim_frame: rng.random_range(0..60),
        last_shot_at: now_ms,
    }
}

/// Create a projectile leaving the player's muzzle, heading up
pub fn make_player_shot(player: &Player) -> PlayerShot {
    let muzzle = player.muzzle();
    PlayerShot {
        body: Body::new(
            muzzle.x - PLAYER_SHOT_WIDTH / 2.0,
            muzzle.y - PLAYER_SHOT_HEIGHT,
            PLAYER_SHOT_WIDTH,
            PLAYER_SHOT_HEIGHT,
        )
        .with_velocity(0.0, -PLAYER_SHOT_SPEED),
        color: PLAYER_SHOT_COLOR,
    }
}

/// Create a projectile leaving an enemy's underside, heading down
pub fn make_enemy_shot(enemy: &Enemy) -> EnemyShot {
    let muzzle = enemy.muzzle();
    EnemyShot {
        body: Body::new(
            muzzle.x - ENEMY_SHOT_WIDTH / 2.0,
            muzzle.y,
            ENEMY_SHOT_WIDTH,
            ENEMY_SHOT_HEIGHT,
        )
        .with_velocity(0.0, ENEMY_SHOT_SPEED),
        color: ENEMY_SHOT_COLOR,
        damage: enemy.kind.stats().shot_damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_early_waves_spawn_only_scouts() {
        let mut rng = Pcg32::seed_from_u64(1);
        for wave in 1..=3 {
            for _ in 0..200 {
                assert_eq!(roll_enemy_kind(wave, &mut rng), EnemyKind::Scout);
            }
        }
    }

    #[test]
    fn test_later_waves_weight_scouts_double() {
        let mut rng = Pcg32::seed_from_u64(2);
        let (mut scouts, mut heavies, mut bosses) = (0, 0, 0);
        for _ in 0..8000 {
            match roll_enemy_kind(4, &mut rng) {
                EnemyKind::Scout => scouts += 1,
                EnemyKind::Heavy => heavies += 1,
                EnemyKind::Boss => bosses += 1,
            }
        }
        // Expected split is 4000 / 2000 / 2000
        assert!((3700..4300).contains(&scouts), "scouts: {scouts}");
        assert!((1750..2250).contains(&heavies), "heavies: {heavies}");
        assert!((1750..2250).contains(&bosses), "bosses: {bosses}");
    }

    #[test]
    fn test_enemy_spawns_above_playfield_with_kind_stats() {
        let mut rng = Pcg32::seed_from_u64(3);
        let boss = make_enemy_of_kind(EnemyKind::Boss, 500.0, &mut rng);
        assert_eq!(boss.health, 5);
        assert_eq!(boss.body.size, Vec2::new(80.0, 70.0));
        assert_eq!(boss.body.bottom(), 0.0);
        assert!(boss.body.vel.x.abs() <= 0.5);
        assert!((boss.body.vel.y - 0.75).abs() < 1e-5);
        assert_eq!(boss.last_shot_at, 500.0);
    }

    #[test]
    fn test_player_shot_leaves_muzzle_upward() {
        let player = Player::default();
        let shot = make_player_shot(&player);
        assert_eq!(shot.body.center().x, player.body.center().x);
        assert_eq!(shot.body.bottom(), player.body.top());
        assert!(shot.body.vel.y < 0.0);
        assert_eq!(shot.body.vel.x, 0.0);
    }

    #[test]
    fn test_enemy_shot_carries_kind_damage() {
        let mut rng = Pcg32::seed_from_u64(4);
        let heavy = make_enemy_of_kind(EnemyKind::Heavy, 0.0, &mut rng);
        let shot = make_enemy_shot(&heavy);
        assert_eq!(shot.damage, 15);
        assert_eq!(shot.body.top(), heavy.body.bottom());
        assert!(shot.body.vel.y > 0.0);
    }

    #[test]
    fn test_burst_appends_count() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut particles = Vec::new();
        burst(&mut particles, Vec2::new(10.0, 10.0), DAMAGE_RED, 15, &mut rng);
        assert_eq!(particles.len(), 15);
        assert!(particles.iter().all(|p| p.color == DAMAGE_RED));
    }

    proptest! {
        #[test]
        fn prop_particle_draws_in_range(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = make_particle(Vec2::ZERO, 0xFFFFFF, &mut rng);
            prop_assert!((30.0..50.0).contains(&p.life));
            prop_assert!((30.0..50.0).contains(&p.max_life));
            prop_assert!((-3.0..3.0).contains(&p.vel.x));
            prop_assert!((-3.0..3.0).contains(&p.vel.y));
            prop_assert!((2.0..5.0).contains(&p.size));
        }

        #[test]
        fn prop_enemy_spawn_fits_playfield(seed in any::<u64>(), wave in 1u32..40) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let enemy = make_enemy(wave, 0.0, &mut rng);
            prop_assert!(enemy.body.left() >= 0.0);
            prop_assert!(enemy.body.right() <= PLAYFIELD_WIDTH);
            prop_assert!(enemy.body.top() < 0.0);
            let max_drift = enemy.kind.stats().speed_factor;
            prop_assert!(enemy.body.vel.x.abs() <= max_drift);
        }
    }
}
