//! Obstacle pairs and the stream that scrolls them
//!
//! Obstacles are only ever appended at the right edge and all move left at the
//! same speed, so the stream stays sorted by `x` (oldest/leftmost first)
//! without re-sorting.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::WorldConfig;
use super::rect::Rect;

/// One top+bottom obstacle pair with a single gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Height of the top segment; the gap starts here
    pub top_height: f32,
    /// Set once the body has fully passed this obstacle
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn right(&self, config: &WorldConfig) -> f32 {
        self.x + config.obstacle_width
    }

    /// Segment from the top of the world down to `top_height`
    pub fn top_rect(&self, config: &WorldConfig) -> Rect {
        Rect::from_origin_size(self.x, 0.0, config.obstacle_width, self.top_height)
    }

    /// Segment from the bottom of the gap down to the bottom of the world
    pub fn bottom_rect(&self, config: &WorldConfig) -> Rect {
        let top = self.top_height + config.gap;
        Rect::from_origin_size(
            self.x,
            top,
            config.obstacle_width,
            config.world_height - top,
        )
    }

    /// Vertical centre of the gap
    #[inline]
    pub fn gap_center(&self, config: &WorldConfig) -> f32 {
        self.top_height + config.gap / 2.0
    }
}

/// Live obstacles in spawn order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleStream {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl Default for ObstacleStream {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleStream {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Drop every obstacle and restart id allocation
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.next_id = 1;
    }

    #[inline]
    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Obstacle> {
        self.obstacles.iter_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Most recently spawned (rightmost) obstacle
    pub fn last(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }

    /// Place an obstacle directly (tests and replays)
    pub fn push(&mut self, x: f32, top_height: f32) -> &Obstacle {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x,
            top_height,
            passed: false,
        });
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Scroll every obstacle left by the configured speed
    pub fn advance(&mut self, config: &WorldConfig) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= config.obstacle_speed;
        }
    }

    /// Spawn at the right edge when the stream is empty or the rightmost
    /// obstacle has scrolled at least `spawn_distance` in from it.
    pub fn maybe_spawn<R: Rng>(&mut self, config: &WorldConfig, rng: &mut R) -> Option<&Obstacle> {
        let due = match self.last() {
            None => true,
            Some(last) => config.world_width - last.x >= config.spawn_distance,
        };
        if !due {
            return None;
        }

        let (lo, hi) = config.top_height_range();
        let top_height = rng.random_range(lo..=hi);
        let x = config.world_width;
        let obstacle = self.push(x, top_height);
        log::debug!(
            "Spawned obstacle {} at x={} top_height={:.1}",
            obstacle.id,
            obstacle.x,
            obstacle.top_height
        );
        Some(obstacle)
    }

    /// Remove obstacles whose right edge has scrolled past the left edge.
    /// Returns the ids removed.
    pub fn evict(&mut self, config: &WorldConfig) -> Vec<u32> {
        let mut evicted = Vec::new();
        self.obstacles.retain(|o| {
            let keep = o.right(config) >= 0.0;
            if !keep {
                evicted.push(o.id);
            }
            keep
        });
        if !evicted.is_empty() {
            log::debug!("Evicted obstacles {:?}", evicted);
        }
        evicted
    }

    /// True when `x` never decreases from front to back
    pub fn is_ordered(&self) -> bool {
        self.obstacles.windows(2).all(|w| w[0].x <= w[1].x)
    }
}
