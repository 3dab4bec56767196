//! Collision detection for axis-aligned boxes
//!
//! Everything in the playfield is a rectangle: the bird's bounding box and
//! the two solid halves of each pipe. Edges that merely touch do not count
//! as a hit, so all four comparisons are strict.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::settings::Settings;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test: shared edges are not an overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// The solid top and bottom halves of a pipe
///
/// The top half runs from the ceiling to the top of the gap, the bottom half
/// from the bottom of the gap down a full screen height (the ground is drawn
/// over it).
pub fn obstacle_rects(obstacle: &Obstacle, settings: &Settings) -> [Rect; 2] {
    let half_gap = settings.pipe_gap / 2.0;
    let top = Rect::new(
        obstacle.x,
        0.0,
        settings.pipe_width,
        obstacle.gap_center_y - half_gap,
    );
    let bottom = Rect::new(
        obstacle.x,
        obstacle.gap_center_y + half_gap,
        settings.pipe_width,
        settings.screen_height,
    );
    [top, bottom]
}

/// Check whether the bird box hits either half of a pipe
pub fn check_collision(bird: &Rect, obstacle: &Obstacle, settings: &Settings) -> bool {
    obstacle_rects(obstacle, settings)
        .iter()
        .any(|pipe| bird.overlaps(pipe))
}
