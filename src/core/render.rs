//! Read-only per-tick view handed to the renderer.

use crate::geometry::{Point, Rect};
use crate::gesture::FrameResult;
use crate::physics::BirdSprite;

/// Everything a renderer needs to draw one tick. Built from the session
/// after physics has advanced; renderers never see mutable game state.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub world_width: i32,
    pub world_height: i32,

    /// Collision box.
    pub bird_box: Rect,
    /// Drawn position of the bird.
    pub bird_sprite_box: Rect,
    pub bird_sprite: BirdSprite,
    pub is_dead: bool,
    pub upper_wall: Rect,
    pub lower_wall: Rect,
    pub score: u32,

    pub classification: FrameResult,
    pub status_lines: Vec<String>,
    /// Mouth outline of the classified face, when exactly one was seen.
    pub mouth_points: Option<Vec<Point>>,
    pub closed_frames: u32,
    pub total_triggers: u64,
}

impl RenderSnapshot {
    pub fn mar(&self) -> Option<f64> {
        self.classification.mar()
    }

    /// One-line summary for logs and headless output.
    pub fn summary(&self) -> String {
        format!(
            "tick={} y={} score={} dead={} {}",
            self.tick,
            self.bird_box.y,
            self.score,
            self.is_dead,
            self.status_lines.join(" | ")
        )
    }
}
