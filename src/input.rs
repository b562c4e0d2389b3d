//! Input state tracking
//!
//! Hosts translate raw key events into logical controls and record which are
//! held. The simulation only ever sees a `TickInput` value built from this.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Logical controls the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    MoveLeft,
    MoveRight,
    Fire,
    PauseToggle,
}

impl Control {
    /// Map a DOM `KeyboardEvent.key` value to a control
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Control::MoveLeft),
            "ArrowRight" | "d" | "D" => Some(Control::MoveRight),
            " " | "Spacebar" | "ArrowUp" | "w" | "W" => Some(Control::Fire),
            "p" | "P" | "Escape" => Some(Control::PauseToggle),
            _ => None,
        }
    }
}

/// Set of currently held controls
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Control>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a control as held. Returns true on the press edge (it was not
    /// already held), false for key repeat.
    pub fn press(&mut self, control: Control) -> bool {
        self.held.insert(control)
    }

    /// Mark a control as released. Returns true if it was held.
    pub fn release(&mut self, control: Control) -> bool {
        self.held.remove(&control)
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    /// Release everything (focus loss can swallow key-up events)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Control state for the next tick
    pub fn controls(&self) -> TickInput {
        TickInput {
            left: self.is_held(Control::MoveLeft),
            right: self.is_held(Control::MoveRight),
            fire: self.is_held(Control::Fire),
        }
    }
}
