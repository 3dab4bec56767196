//! Rendering module
//!
//! Renderers draw a [`Snapshot`] once per frame and never touch game state.

pub mod terminal;

pub use terminal::TerminalRenderer;

use crate::error::Result;
use crate::sim::Snapshot;

/// Consumer of per-frame snapshots
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()>;
}
