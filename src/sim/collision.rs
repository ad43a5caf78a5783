//! Collision and pass detection
//!
//! Runs after the body and obstacles have moved for the tick, so it always
//! sees post-advance positions. There is no sub-stepping: a body moving fast
//! enough can skip over a thin overlap between two ticks.

use serde::{Deserialize, Serialize};

use super::config::WorldConfig;
use super::obstacles::{Obstacle, ObstacleStream};
use super::rect::Rect;

/// What the body hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Ground,
    Obstacle,
}

/// Bottom edge at or below the floor
#[inline]
pub fn hits_ground(body: &Rect, config: &WorldConfig) -> bool {
    body.bottom() >= config.world_height
}

/// Overlap with either segment of the obstacle
pub fn hits_obstacle(body: &Rect, obstacle: &Obstacle, config: &WorldConfig) -> bool {
    body.overlaps(&obstacle.top_rect(config)) || body.overlaps(&obstacle.bottom_rect(config))
}

/// Ground first, then obstacles in stream order
pub fn detect_collision(
    body: &Rect,
    obstacles: &ObstacleStream,
    config: &WorldConfig,
) -> Option<CollisionKind> {
    if hits_ground(body, config) {
        return Some(CollisionKind::Ground);
    }
    obstacles
        .iter()
        .any(|o| hits_obstacle(body, o, config))
        .then_some(CollisionKind::Obstacle)
}

/// Flag every obstacle whose right edge is now left of the body's left edge.
///
/// Returns the ids newly passed, in stream order. An obstacle already flagged
/// is never returned again.
pub fn detect_passes(obstacles: &mut ObstacleStream, config: &WorldConfig) -> Vec<u32> {
    let mut passed = Vec::new();
    for obstacle in obstacles.iter_mut() {
        if !obstacle.passed && obstacle.right(config) < config.body_x {
            obstacle.passed = true;
            passed.push(obstacle.id);
        }
    }
    passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Body;

    fn body_at(y: f32) -> Rect {
        Body { y, vel: 0.0 }.rect(&WorldConfig::default())
    }

    #[test]
    fn test_ground_collision() {
        let config = WorldConfig::default();
        // bottom = 614
        assert!(hits_ground(&body_at(590.0), &config));
        // bottom exactly on the floor counts
        assert!(hits_ground(&body_at(576.0), &config));
        assert!(!hits_ground(&body_at(575.0), &config));
    }

    #[test]
    fn test_body_below_top_segment_misses() {
        let config = WorldConfig::default();
        let mut stream = ObstacleStream::new();
        let obstacle = stream.push(80.0, 100.0).clone();

        // [250, 274] sits inside the gap [100, 300]
        assert!(!hits_obstacle(&body_at(250.0), &obstacle, &config));
        assert_eq!(detect_collision(&body_at(250.0), &stream, &config), None);
    }

    #[test]
    fn test_body_overlapping_top_segment_hits() {
        let config = WorldConfig::default();
        let mut stream = ObstacleStream::new();
        let obstacle = stream.push(80.0, 100.0).clone();

        // [90, 114] overlaps [0, 100]
        assert!(hits_obstacle(&body_at(90.0), &obstacle, &config));
        assert_eq!(
            detect_collision(&body_at(90.0), &stream, &config),
            Some(CollisionKind::Obstacle)
        );
    }

    #[test]
    fn test_body_overlapping_bottom_segment_hits() {
        let config = WorldConfig::default();
        let mut stream = ObstacleStream::new();
        let obstacle = stream.push(80.0, 100.0).clone();

        // [280, 304] overlaps [300, 600]
        assert!(hits_obstacle(&body_at(280.0), &obstacle, &config));
        // touching the gap edge exactly is not an overlap
        assert!(!hits_obstacle(&body_at(276.0), &obstacle, &config));
    }

    #[test]
    fn test_no_horizontal_overlap_misses() {
        let config = WorldConfig::default();
        let mut stream = ObstacleStream::new();
        // left edge at the body's right edge (114)
        let obstacle = stream.push(114.0, 100.0).clone();
        assert!(!hits_obstacle(&body_at(0.0), &obstacle, &config));
    }

    #[test]
    fn test_ground_reported_before_obstacle() {
        let config = WorldConfig::default();
        let mut stream = ObstacleStream::new();
        stream.push(80.0, 100.0);
        assert_eq!(
            detect_collision(&body_at(590.0), &stream, &config),
            Some(CollisionKind::Ground)
        );
    }

    #[test]
    fn test_pass_detection_is_idempotent() {
        let config = WorldConfig::default();
        let mut stream = ObstacleStream::new();
        stream.push(-1.0, 100.0); // right edge 79 < 80
        stream.push(0.0, 100.0); // right edge 80, not yet passed

        assert_eq!(detect_passes(&mut stream, &config), vec![1]);
        assert!(stream.as_slice()[0].passed);
        assert!(!stream.as_slice()[1].passed);

        assert!(detect_passes(&mut stream, &config).is_empty());
    }
}
