//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only (one call to `tick` per frame)
//! - Randomness and time are passed in, never read from the environment
//! - Stable iteration order (pipes in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod random;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Rect, check_collision, obstacle_rects};
pub use random::{PcgRandom, RandomSource, SequenceRandom};
pub use snapshot::{PipeView, Snapshot};
pub use state::{Actor, Boundary, GameEvent, GamePhase, GameState, Obstacle, ObstacleSet};
pub use tick::{TickInput, tick};
