//! Error types
//!
//! Collisions are game events, not errors. The only failures the crate knows
//! about are invalid configuration and an unavailable best-score store.

use std::path::PathBuf;

use thiserror::Error;

/// A world configuration that cannot produce a playable obstacle stream
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error(
        "gap {gap} plus clearances {min_top}/{min_bottom} does not fit a world {world_height} high"
    )]
    GapDoesNotFit {
        gap: f32,
        min_top: f32,
        min_bottom: f32,
        world_height: f32,
    },

    #[error("body at x={body_x} with width {body_width} does not fit a world {world_width} wide")]
    BodyOutOfWorld {
        body_x: f32,
        body_width: f32,
        world_width: f32,
    },

    #[error("body {body_height} high does not fit a world {world_height} high")]
    BodyTooTall { body_height: f32, world_height: f32 },
}

/// Failure to read or write the persisted best score
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("best score store unavailable: {0}")]
    Unavailable(String),

    #[error("best score I/O at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stored best score {raw:?} is not an integer")]
    Corrupt { raw: String },
}

/// Failure to load or save settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid world configuration: {0}")]
    Config(#[from] ConfigError),
}
