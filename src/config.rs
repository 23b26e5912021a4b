//! Game tuning and configuration
//!
//! Defaults reproduce the classic 30 second round. On the web an override can
//! be stored in LocalStorage as JSON; missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Movement ===
    /// Horizontal player movement per frame
    pub player_speed: f32,
    /// Obstacle fall speed at game start (per frame)
    pub initial_fall_speed: f32,

    // === Timers ===
    /// Milliseconds between obstacle spawns
    pub spawn_interval_ms: f64,
    /// Milliseconds between fall speed increases
    pub ramp_interval_ms: f64,
    /// Fall speed added per ramp tick
    pub ramp_amount: f32,
    /// Round length in milliseconds
    pub duration_ms: f64,

    // === Layout (fractions of the surface) ===
    pub player_width_frac: f32,
    pub player_height_frac: f32,
    pub obstacle_width_frac: f32,
    pub obstacle_height_frac: f32,
    /// Gap between player and the bottom edge (pixels)
    pub player_bottom_margin: f32,

    // === Collision ===
    /// Hitbox scale about each rectangle's centre, in (0, 1]
    pub hitbox_scale: f32,

    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            initial_fall_speed: INITIAL_FALL_SPEED,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            ramp_interval_ms: RAMP_INTERVAL_MS,
            ramp_amount: RAMP_AMOUNT,
            duration_ms: GAME_DURATION_MS,

            player_width_frac: PLAYER_WIDTH_FRAC,
            player_height_frac: PLAYER_HEIGHT_FRAC,
            obstacle_width_frac: OBSTACLE_WIDTH_FRAC,
            obstacle_height_frac: OBSTACLE_HEIGHT_FRAC,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,

            hitbox_scale: HITBOX_SCALE,

            seed: None,
        }
    }
}

impl GameConfig {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "fall_dodge_config";

    /// Parse a JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the game loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("player_speed", self.player_speed as f64)?;
        check_non_negative("initial_fall_speed", self.initial_fall_speed as f64)?;
        check_positive("spawn_interval_ms", self.spawn_interval_ms)?;
        check_positive("ramp_interval_ms", self.ramp_interval_ms)?;
        check_non_negative("ramp_amount", self.ramp_amount as f64)?;
        check_positive("duration_ms", self.duration_ms)?;

        check_fraction("player_width_frac", self.player_width_frac)?;
        check_fraction("player_height_frac", self.player_height_frac)?;
        check_fraction("obstacle_width_frac", self.obstacle_width_frac)?;
        check_fraction("obstacle_height_frac", self.obstacle_height_frac)?;
        check_non_negative("player_bottom_margin", self.player_bottom_margin as f64)?;

        check_fraction("hitbox_scale", self.hitbox_scale)?;
        Ok(())
    }

    /// Load the config override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config override from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {}", value)))
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be >= 0, got {}", value)))
    }
}

fn check_fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be in (0, 1], got {}", value)))
    }
}
