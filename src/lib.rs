//! Fall Dodge - A single-screen falling-obstacle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `game`: Frame controller tying the simulation to its collaborators
//! - `renderer`: Draw surface abstraction plus Canvas 2D and recording backends
//! - `platform`: Clock and input abstraction
//! - `config`: Data-driven game tuning

pub mod config;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use error::{AssetError, ConfigError};
pub use game::{FrameOutcome, Game};

/// Default tuning constants
pub mod consts {
    /// Horizontal player movement per frame (pixels)
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Fall speed at game start (pixels per frame)
    pub const INITIAL_FALL_SPEED: f32 = 4.0;
    /// Time between obstacle spawns
    pub const SPAWN_INTERVAL_MS: f64 = 600.0;
    /// Time between fall speed increases
    pub const RAMP_INTERVAL_MS: f64 = 1700.0;
    /// Fall speed added on every ramp tick
    pub const RAMP_AMOUNT: f32 = 0.5;
    /// Length of one game
    pub const GAME_DURATION_MS: f64 = 30_000.0;

    /// Sprite sizes as fractions of the surface
    pub const PLAYER_WIDTH_FRAC: f32 = 0.15;
    pub const PLAYER_HEIGHT_FRAC: f32 = 0.1;
    pub const OBSTACLE_WIDTH_FRAC: f32 = 0.15;
    pub const OBSTACLE_HEIGHT_FRAC: f32 = 0.1;
    /// Gap between the player's bottom edge and the surface bottom
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

    /// Hitbox scale applied to both player and obstacles (1.0 = exact bounds)
    pub const HITBOX_SCALE: f32 = 1.0;

    /// Fixed frame step used by the headless demo (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
