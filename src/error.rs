//! Error types for configuration and asset loading
//!
//! The simulation itself is infallible; only setup can fail.

use thiserror::Error;

/// Problems with a game configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid<S: Into<String>>(field: &'static str, reason: S) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Problems acquiring the draw surface or its sprites
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to load sprite {sprite} from {src}")]
    Load { sprite: &'static str, src: String },

    #[error("browser API error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for AssetError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{:?}", value))
    }
}
