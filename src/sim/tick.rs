//! Per-tick simulation step
//!
//! Advances the world in a fixed phase order. Later phases see the results
//! of earlier ones within the same tick, so the order is part of the
//! observable behavior (contact damage lands before projectile damage).
//!
//! Two clocks drive the step: shot cooldowns compare wall-clock timestamps
//! (`now_ms`), while shield regeneration and particle life count ticks.

use rand::Rng;

use super::collision::overlaps;
use super::spawn::{burst, make_enemy, make_enemy_shot, make_player_shot};
use super::state::{GameState, Player};
use crate::consts::*;

/// Control state for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl TickInput {
    /// Horizontal direction: -1, 0 or 1 (opposing controls cancel)
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Per-tick enemy spawn chance for a wave (grows without bound)
pub fn enemy_spawn_chance(wave: u32) -> f64 {
    ENEMY_SPAWN_BASE_CHANCE + wave as f64 * ENEMY_SPAWN_CHANCE_PER_WAVE
}

/// Advance the game state by one tick
///
/// A no-op while paused or after game over.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;
    let score_at_start = state.score;

    // 1. Player movement
    steer_player(&mut state.player, input);

    // 2. Player firing (wall-clock cooldown)
    if input.fire {
        let ready = state
            .last_player_shot_at
            .is_none_or(|last| now_ms - last >= PLAYER_FIRE_COOLDOWN_MS);
        if ready {
            state.player_shots.push(make_player_shot(&state.player));
            state.last_player_shot_at = Some(now_ms);
        }
    }

    // 3. Projectile movement
    for shot in &mut state.player_shots {
        shot.body.advance();
    }
    state
        .player_shots
        .retain(|s| !s.body.is_above_playfield() && !s.body.is_below_playfield());
    for shot in &mut state.enemy_shots {
        shot.body.advance();
    }
    state
        .enemy_shots
        .retain(|s| !s.body.is_above_playfield() && !s.body.is_below_playfield());

    // 4. Enemy spawning
    if state.rng.random::<f64>() < enemy_spawn_chance(state.wave) {
        let enemy = make_enemy(state.wave, now_ms, &mut state.rng);
        log::debug!(
            "Spawned {:?} at x={:.0} (wave {})",
            enemy.kind,
            enemy.body.pos.x,
            state.wave
        );
        state.enemies.push(enemy);
    }

    // 5. Enemy movement: bounce off side walls, drop out the bottom
    for enemy in &mut state.enemies {
        enemy.body.advance();
        enemy.body.bounce_off_side_walls();
        enemy.anim_frame = enemy.anim_frame.wrapping_add(1);
    }
    state.enemies.retain(|e| !e.body.is_below_playfield());

    resolve_enemy_contact(state);
    resolve_player_shots(state);
    let player_hit = resolve_enemy_shots(state, now_ms);

    // 9. Enemy firing: cooldown elapsed AND chance roll
    let GameState {
        enemies,
        enemy_shots,
        rng,
        ..
    } = state;
    for enemy in enemies.iter_mut() {
        let stats = enemy.kind.stats();
        if now_ms - enemy.last_shot_at > stats.shot_cooldown_ms
            && rng.random::<f64>() < stats.shot_chance
        {
            enemy_shots.push(make_enemy_shot(enemy));
            enemy.last_shot_at = now_ms;
        }
    }

    // 10. Shield regeneration (tick-counted). The lockout starts counting on
    // the tick after a hit.
    if !player_hit {
        state.player.regenerate_shield();
    }

    // 11. Particles
    state.particles.retain_mut(|p| {
        p.step();
        p.life > 0.0
    });

    // 12. Wave progression: only when the score lands exactly on a step
    if state.score != score_at_start
        && state.score > 0
        && state.score % WAVE_SCORE_STEP == 0
    {
        state.wave += 1;
        log::info!("Wave {} reached at score {}", state.wave, state.score);
    }

    // 13. Terminal check
    if !state.player.is_alive() {
        state.game_over = true;
        log::info!(
            "Game over: score {}, wave {}, {} ticks",
            state.score,
            state.wave,
            state.time_ticks
        );
    }

    debug_assert_invariants(state);
}

fn steer_player(player: &mut Player, input: &TickInput) {
    player.body.vel.x = input.horizontal() * PLAYER_SPEED;
    player.body.vel.y = 0.0;
    player.body.advance();
    player.body.clamp_to_playfield_x();
    player.anim_frame = player.anim_frame.wrapping_add(1);
}

/// 6. Enemies ramming the player deal contact damage straight to health and
/// are destroyed without score
fn resolve_enemy_contact(state: &mut GameState) {
    let GameState {
        enemies,
        player,
        particles,
        rng,
        ..
    } = state;

    enemies.retain(|enemy| {
        if !overlaps(&enemy.body, &player.body) {
            return true;
        }
        let damage = enemy.kind.stats().contact_damage;
        player.take_contact_damage(damage);
        burst(
            particles,
            enemy.body.center(),
            DAMAGE_RED,
            CONTACT_PARTICLES,
            rng,
        );
        log::trace!("{:?} rammed the player for {}", enemy.kind, damage);
        false
    });
}

/// 7. Each player shot hits at most one enemy (first overlap wins)
fn resolve_player_shots(state: &mut GameState) {
    let GameState {
        player_shots,
        enemies,
        particles,
        rng,
        score,
        ..
    } = state;

    player_shots.retain(|shot| {
        let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.health > 0 && overlaps(&shot.body, &e.body))
        else {
            return true;
        };

        enemy.health -= 1;
        burst(particles, shot.body.pos, shot.color, SHOT_HIT_PARTICLES, rng);

        if enemy.health <= 0 {
            burst(
                particles,
                enemy.body.center(),
                enemy.color,
                KILL_PARTICLES,
                rng,
            );
            *score += enemy.kind.points();
            log::trace!("{:?} destroyed, score {}", enemy.kind, score);
        }
        false
    });

    enemies.retain(|e| e.health > 0);
}

/// 8. Enemy shots that reach the player are spent on contact. Returns true
/// if any landed.
fn resolve_enemy_shots(state: &mut GameState, now_ms: f64) -> bool {
    let GameState {
        enemy_shots,
        player,
        particles,
        rng,
        ..
    } = state;

    let mut hit = false;
    enemy_shots.retain(|shot| {
        if !overlaps(&shot.body, &player.body) {
            return true;
        }
        hit = true;
        player.take_projectile_hit(shot.damage, now_ms);
        burst(
            particles,
            shot.body.pos,
            DAMAGE_RED,
            PLAYER_HIT_PARTICLES,
            rng,
        );
        false
    });
    hit
}

fn debug_assert_invariants(state: &GameState) {
    let player = &state.player;
    debug_assert!((0..=player.max_health).contains(&player.health));
    debug_assert!((0..=player.max_shield).contains(&player.shield));
    debug_assert!(player.body.left() >= 0.0 && player.body.right() <= PLAYFIELD_WIDTH);
    debug_assert!(state.enemies.iter().all(|e| e.health > 0));
    debug_assert!(state.particles.iter().all(|p| p.life > 0.0));
}
