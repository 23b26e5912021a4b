//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped movement only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, hitboxes_overlap};
pub use schedule::{Command, Interval, Scheduler};
pub use spawn::Spawner;
pub use state::{Arena, EndReason, GamePhase, GameState, Obstacle, ObstacleKind, Player};
pub use tick::{Direction, GameEvent, TickInput, apply_command, tick};
