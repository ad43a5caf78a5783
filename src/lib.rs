//! Skyflap - side-scrolling flap-through-the-gaps game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (body physics, obstacle stream, collisions, scoring)
//! - `session`: Session controller owning game state, input latch and best score
//! - `highscores`: Best-score tracking over an injected key-value store
//! - `platform`: Host plumbing (logging, input coalescing, fixed-step scheduling)
//! - `settings`: Data-driven configuration loaded from JSON

pub mod error;
pub mod highscores;
pub mod medal;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SettingsError, StoreError};
pub use highscores::{HighScore, MemoryStore, ScoreStore};
pub use medal::Medal;
pub use session::{Session, Snapshot};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// World dimensions (pixel-equivalent units)
    pub const WORLD_WIDTH: f32 = 400.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Body size and fixed horizontal offset
    pub const BODY_WIDTH: f32 = 34.0;
    pub const BODY_HEIGHT: f32 = 24.0;
    pub const BODY_X: f32 = 80.0;

    /// Downward acceleration (px/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set by a flap (negative = upward)
    pub const FLAP_IMPULSE: f32 = -8.0;
    /// Maximum downward speed (px/tick)
    pub const TERMINAL_VELOCITY: f32 = 10.0;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    pub const OBSTACLE_GAP: f32 = 200.0;
    /// Horizontal scroll speed (px/tick)
    pub const OBSTACLE_SPEED: f32 = 3.0;
    /// Horizontal distance between consecutive obstacles
    pub const SPAWN_DISTANCE: f32 = 250.0;
    /// Minimum top segment height
    pub const MIN_TOP: f32 = 75.0;
    /// Minimum bottom segment height
    pub const MIN_BOTTOM: f32 = 75.0;

    /// Nominal scheduling rate (one tick per display refresh)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Maximum ticks run per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
