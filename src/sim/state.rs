//! Game state and core simulation types
//!
//! Everything needed to reproduce a session (seed, RNG position, tick count)
//! lives in `GameState`, so two states built from the same seed and fed the
//! same inputs stay identical.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::CollisionKind;
use super::config::WorldConfig;
use super::obstacles::ObstacleStream;
use super::rect::Rect;
use crate::error::ConfigError;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first input
    Start,
    /// Active gameplay
    Playing,
    /// Collided; frozen until the next input restarts
    Over,
}

/// The player-controlled body. Horizontal position is fixed by the world config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top edge, pixels from the top of the world (never negative)
    pub y: f32,
    /// Vertical velocity in px/tick (positive = downward)
    pub vel: f32,
}

impl Body {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            y: config.body_start_y(),
            vel: 0.0,
        }
    }

    /// Recenter and stop
    pub fn reset(&mut self, config: &WorldConfig) {
        *self = Self::new(config);
    }

    /// Overwrite velocity with the upward impulse (not additive)
    pub fn flap(&mut self, config: &WorldConfig) {
        self.vel = config.flap_impulse;
    }

    /// Integrate one tick: velocity first, then position with the new velocity.
    /// The ceiling clamp leaves velocity untouched.
    pub fn advance(&mut self, config: &WorldConfig) {
        self.vel = (self.vel + config.gravity).min(config.terminal_velocity);
        self.y = (self.y + self.vel).max(0.0);
    }

    pub fn rect(&self, config: &WorldConfig) -> Rect {
        Rect::from_origin_size(config.body_x, self.y, config.body_width, config.body_height)
    }

    /// Vertical centre of the body
    #[inline]
    pub fn center_y(&self, config: &WorldConfig) -> f32 {
        self.y + config.body_height / 2.0
    }
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh session began (from Start or Over)
    SessionStarted,
    /// Upward impulse applied
    Flapped,
    ObstacleSpawned { id: u32, top_height: f32 },
    ObstaclePassed { id: u32, score: u32 },
    ObstacleEvicted { id: u32 },
    Collided(CollisionKind),
    /// Session ended with this final score
    GameOver { score: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Obstacle height RNG; advances only when an obstacle spawns
    pub rng: Pcg32,
    pub config: WorldConfig,
    pub phase: GamePhase,
    pub body: Body,
    pub obstacles: ObstacleStream,
    pub score: u32,
    /// Ticks simulated in the current session
    pub time_ticks: u64,
    /// Why the last session ended
    pub collision: Option<CollisionKind>,
    /// Events from the most recent tick (not part of the deterministic state)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state in the canonical world
    pub fn new(seed: u64) -> Self {
        Self::build(WorldConfig::default(), seed)
    }

    /// Create a new game state in a custom world, rejecting unplayable configurations
    pub fn with_config(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: WorldConfig, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            phase: GamePhase::Start,
            body: Body::new(&config),
            obstacles: ObstacleStream::new(),
            score: 0,
            time_ticks: 0,
            collision: None,
            events: Vec::new(),
        }
    }

    /// Put everything back to a fresh session. The RNG keeps its position so
    /// consecutive sessions see different obstacles.
    pub fn reset_session(&mut self) {
        self.body.reset(&self.config);
        self.obstacles.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.collision = None;
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    #[inline]
    pub fn body_rect(&self) -> Rect {
        self.body.rect(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.body.y, 288.0);
        assert_eq!(state.body.vel, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert!(state.collision.is_none());
    }

    #[test]
    fn test_with_config_rejects_bad_world() {
        let config = WorldConfig {
            world_height: 300.0,
            ..Default::default()
        };
        assert!(GameState::with_config(config, 1).is_err());
    }

    #[test]
    fn test_flap_overwrites_velocity() {
        let config = WorldConfig::default();
        let mut body = Body::new(&config);
        body.vel = 9.5;
        body.flap(&config);
        assert_eq!(body.vel, -8.0);
        body.vel = -3.0;
        body.flap(&config);
        assert_eq!(body.vel, -8.0);
    }

    #[test]
    fn test_advance_updates_velocity_before_position() {
        let config = WorldConfig::default();
        let mut body = Body::new(&config);
        body.advance(&config);
        assert_eq!(body.vel, 0.5);
        assert_eq!(body.y, 288.5);
    }

    #[test]
    fn test_terminal_velocity_clamp() {
        let config = WorldConfig::default();
        let mut body = Body { y: 0.0, vel: 9.8 };
        body.advance(&config);
        assert_eq!(body.vel, 10.0);
        body.advance(&config);
        assert_eq!(body.vel, 10.0);
    }

    #[test]
    fn test_ceiling_clamp_keeps_velocity() {
        let config = WorldConfig::default();
        let mut body = Body { y: 3.0, vel: -8.0 };
        body.advance(&config);
        assert_eq!(body.y, 0.0);
        assert_eq!(body.vel, -7.5);
    }

    #[test]
    fn test_body_rect() {
        let config = WorldConfig::default();
        let body = Body { y: 250.0, vel: 0.0 };
        let rect = body.rect(&config);
        assert_eq!((rect.left(), rect.right()), (80.0, 114.0));
        assert_eq!((rect.top(), rect.bottom()), (250.0, 274.0));
    }
}
