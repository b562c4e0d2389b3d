//! Render snapshot
//!
//! A borrowed, read-only view of the world handed to the presentation layer
//! once per tick. Renderers can walk it directly or take it as JSON.

use serde::Serialize;

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::sim::{Enemy, EnemyShot, GameState, Particle, Player, PlayerShot};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RenderSnapshot<'a> {
    pub width: f32,
    pub height: f32,
    pub time_ticks: u64,
    pub player: &'a Player,
    pub player_shots: &'a [PlayerShot],
    pub enemy_shots: &'a [EnemyShot],
    pub enemies: &'a [Enemy],
    pub particles: &'a [Particle],
    pub score: u64,
    pub wave: u32,
    pub game_over: bool,
    pub paused: bool,
}

impl<'a> RenderSnapshot<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            time_ticks: state.time_ticks,
            player: &state.player,
            player_shots: &state.player_shots,
            enemy_shots: &state.enemy_shots,
            enemies: &state.enemies,
            particles: &state.particles,
            score: state.score,
            wave: state.wave,
            game_over: state.game_over,
            paused: state.paused,
        }
    }

    /// Encode for a JavaScript or out-of-process renderer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(5);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, 0.0);

        let snapshot = RenderSnapshot::of(&state);
        assert_eq!(snapshot.time_ticks, 1);
        assert_eq!(snapshot.player_shots.len(), 1);
        assert_eq!(snapshot.player, &state.player);
        assert_eq!(snapshot.wave, 1);
        assert!(!snapshot.game_over);
    }

    #[test]
    fn test_snapshot_json_fields() {
        let state = GameState::new(5);
        let json = RenderSnapshot::of(&state).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["score"], 0);
        assert_eq!(value["wave"], 1);
        assert_eq!(value["paused"], false);
        assert_eq!(value["width"], 800.0);
        assert_eq!(value["player"]["health"], 100);
        assert!(value["enemies"].as_array().unwrap().is_empty());
    }
}
