//! World tuning
//!
//! Every geometry and physics constant the simulation reads, gathered in one
//! serializable record so hosts can load it from settings. `Default` is the
//! canonical 400×600 world.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Geometry and physics constants for one world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub body_width: f32,
    pub body_height: f32,
    /// Fixed left edge of the body
    pub body_x: f32,
    pub gravity: f32,
    /// Velocity a flap sets (negative = upward)
    pub flap_impulse: f32,
    pub terminal_velocity: f32,
    pub obstacle_width: f32,
    pub gap: f32,
    pub obstacle_speed: f32,
    pub spawn_distance: f32,
    pub min_top: f32,
    pub min_bottom: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            body_width: BODY_WIDTH,
            body_height: BODY_HEIGHT,
            body_x: BODY_X,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            terminal_velocity: TERMINAL_VELOCITY,
            obstacle_width: OBSTACLE_WIDTH,
            gap: OBSTACLE_GAP,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_distance: SPAWN_DISTANCE,
            min_top: MIN_TOP,
            min_bottom: MIN_BOTTOM,
        }
    }
}

impl WorldConfig {
    /// Reject configurations that cannot produce a valid obstacle.
    ///
    /// Every field must be finite. The top-height range
    /// `[min_top, world_height - gap - min_bottom]` must be non-empty, every
    /// size and speed must be positive, and the body must fit inside the world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("body_width", self.body_width),
            ("body_height", self.body_height),
            ("gravity", self.gravity),
            ("terminal_velocity", self.terminal_velocity),
            ("obstacle_width", self.obstacle_width),
            ("gap", self.gap),
            ("obstacle_speed", self.obstacle_speed),
            ("spawn_distance", self.spawn_distance),
            ("min_top", self.min_top),
            ("min_bottom", self.min_bottom),
        ];
        let signed = [("body_x", self.body_x), ("flap_impulse", self.flap_impulse)];

        for (field, value) in positive.iter().chain(signed.iter()).copied() {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.flap_impulse >= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "-flap_impulse",
                value: -self.flap_impulse,
            });
        }

        if self.gap + self.min_top + self.min_bottom > self.world_height {
            return Err(ConfigError::GapDoesNotFit {
                gap: self.gap,
                min_top: self.min_top,
                min_bottom: self.min_bottom,
                world_height: self.world_height,
            });
        }

        if self.body_x < 0.0 || self.body_x + self.body_width > self.world_width {
            return Err(ConfigError::BodyOutOfWorld {
                body_x: self.body_x,
                body_width: self.body_width,
                world_width: self.world_width,
            });
        }
        if self.body_height >= self.world_height {
            return Err(ConfigError::BodyTooTall {
                body_height: self.body_height,
                world_height: self.world_height,
            });
        }

        Ok(())
    }

    /// Inclusive bounds for a freshly spawned obstacle's top height
    #[inline]
    pub fn top_height_range(&self) -> (f32, f32) {
        (
            self.min_top,
            self.world_height - self.gap - self.min_bottom,
        )
    }

    /// Body resting position: vertically centred
    #[inline]
    pub fn body_start_y(&self) -> f32 {
        self.world_height / 2.0 - self.body_height / 2.0
    }
}
