//! Frame driver
//!
//! Runs one simulation tick and one snapshot publish per host frame. The host
//! owns scheduling (requestAnimationFrame in the browser, `FixedRateTimer`
//! natively) and stops asking for frames once the driver reports `Halted`.
//! Pausing freezes the world untouched; cooldowns are absolute timestamps, so
//! a long pause never banks extra shots.

use crate::input::InputState;
use crate::sim::{GameState, tick};
use crate::snapshot::RenderSnapshot;

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Halted,
}

/// Owns the world and the held-control set for one session
#[derive(Debug, Clone)]
pub struct FrameDriver {
    state: GameState,
    input: InputState,
}

impl FrameDriver {
    pub fn new(seed: u64) -> Self {
        log::info!("Session started with seed {}", seed);
        Self {
            state: GameState::new(seed),
            input: InputState::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot::of(&self.state)
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Advance one tick at wall-clock `now_ms` and hand the result to
    /// `publish`. Does nothing while paused or after game over.
    pub fn frame<F>(&mut self, now_ms: f64, publish: F) -> FrameOutcome
    where
        F: FnOnce(&RenderSnapshot<'_>),
    {
        if !self.is_running() {
            return FrameOutcome::Halted;
        }

        let controls = self.input.controls();
        tick(&mut self.state, &controls, now_ms);
        publish(&self.snapshot());

        if self.is_running() {
            FrameOutcome::Continue
        } else {
            FrameOutcome::Halted
        }
    }

    /// Flip pause. Returns true when the world is running again and the host
    /// must resume scheduling frames. Ignored after game over, unlike
    /// `GameState::toggle_pause` which always flips; only a reset leaves the
    /// game-over screen.
    pub fn toggle_pause(&mut self) -> bool {
        if self.state.game_over {
            return false;
        }
        self.state.toggle_pause();
        log::info!(
            "{} at tick {}",
            if self.state.paused { "Paused" } else { "Resumed" },
            self.state.time_ticks
        );
        self.is_running()
    }

    /// Start over with the session's seed
    pub fn reset(&mut self) {
        self.state.reset();
        self.input.clear();
        log::info!("Session reset (seed {})", self.state.seed);
    }

    /// Start over with a new seed
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.state.reset_with_seed(seed);
        self.input.clear();
        log::info!("Session reset (seed {})", seed);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FixedRateTimer;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{Duration, Instant};

    /// Paces frames at a fixed rate for hosts without an animation callback
    #[derive(Debug)]
    pub struct FixedRateTimer {
        start: Instant,
        next_frame: Instant,
        period: Duration,
    }

    impl FixedRateTimer {
        pub fn new(hz: u32) -> Self {
            let now = Instant::now();
            Self {
                start: now,
                next_frame: now,
                period: Duration::from_nanos(1_000_000_000 / hz.max(1) as u64),
            }
        }

        pub fn period(&self) -> Duration {
            self.period
        }

        /// Milliseconds since the timer started
        pub fn now_ms(&self) -> f64 {
            self.start.elapsed().as_secs_f64() * 1000.0
        }

        /// Sleep until the next frame is due
        pub fn wait(&mut self) {
            self.next_frame += self.period;
            let now = Instant::now();
            if self.next_frame > now {
                std::thread::sleep(self.next_frame - now);
            } else if now - self.next_frame > self.period * 2 {
                // Too far behind: drop the backlog instead of catching up
                self.next_frame = now;
            }
        }
    }
}
