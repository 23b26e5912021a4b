//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic milliseconds)
//! - Input events (touch, mouse, keyboard → steering direction)

pub mod clock;
pub mod input;

pub use clock::{Clock, ManualClock, SystemClock};
pub use input::{InputEvent, InputState, direction_for_key, direction_for_pointer};

#[cfg(target_arch = "wasm32")]
pub use clock::PerformanceClock;
