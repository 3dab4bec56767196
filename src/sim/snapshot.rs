//! Render-ready view of a session
//!
//! Built once per frame; renderers never see `GameState` directly.

use serde::Serialize;

use super::collision::Rect;
use super::state::GamePhase;

/// One pipe, with its solid halves precomputed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipeView {
    pub x: f32,
    pub gap_center_y: f32,
    pub top: Rect,
    pub bottom: Rect,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub bird: Rect,
    /// Spawn order (leftmost first)
    pub pipes: Vec<PipeView>,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Top of the ground strip
    pub ground_y: f32,
}
