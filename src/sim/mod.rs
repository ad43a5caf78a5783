//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - The tick is the unit of time, never the wall clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order == left-to-right order)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod config;
pub mod obstacles;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionKind, detect_collision, detect_passes, hits_ground, hits_obstacle};
pub use config::WorldConfig;
pub use obstacles::{Obstacle, ObstacleStream};
pub use rect::Rect;
pub use state::{Body, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, autopilot_wants_flap, flap_or_start, tick};
