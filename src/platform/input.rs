//! Input events and the held-direction state
//!
//! Touch, mouse and keyboard all reduce to "start moving left/right" and
//! "stop". Only the latest event matters; nothing is queued.

use crate::sim::Direction;

/// A discrete steering event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    DirectionStart(Direction),
    DirectionEnd,
    /// A key for this direction went up; ignored if another is now held
    DirectionRelease(Direction),
}

/// Currently held direction (last event wins)
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub direction: Option<Direction>,
    /// Autopilot steers instead of the player
    pub autopilot: bool,
}

impl InputState {
    pub fn apply(&mut self, event: InputEvent) {
        self.direction = match event {
            InputEvent::DirectionStart(direction) => Some(direction),
            InputEvent::DirectionEnd => None,
            InputEvent::DirectionRelease(released) if self.direction == Some(released) => None,
            InputEvent::DirectionRelease(_) => self.direction,
        };
    }

    pub fn toggle_autopilot(&mut self) -> bool {
        self.autopilot = !self.autopilot;
        self.autopilot
    }
}

/// Left half of the surface steers left, right half steers right
pub fn direction_for_pointer(x: f32, surface_width: f32) -> Direction {
    if x < surface_width / 2.0 {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Map a `KeyboardEvent.key` value to a direction
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Direction::Left),
        "ArrowRight" | "d" | "D" => Some(Direction::Right),
        _ => None,
    }
}
