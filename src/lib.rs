//! Flappy Gap - A one-button arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game phase)
//! - `game_loop`: Fixed timestep driver (input -> tick -> render -> pace)
//! - `clock`: Wall clock and loop pacing
//! - `platform`: Input sources (terminal, scripted)
//! - `renderer`: Snapshot consumers (terminal)
//! - `settings`: Data-driven game constants

pub mod clock;
pub mod error;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE_HZ: u32 = 60;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 288.0;
    pub const SCREEN_HEIGHT: f32 = 512.0;
    pub const GROUND_HEIGHT: f32 = 112.0;

    /// Bird physics (units per tick)
    pub const GRAVITY: f32 = 0.25;
    pub const JUMP_SPEED: f32 = -5.0;

    /// Bird sprite box (yellowbird is 34x24), fixed horizontal position
    pub const BIRD_X: f32 = 50.0;
    pub const BIRD_WIDTH: f32 = 34.0;
    pub const BIRD_HEIGHT: f32 = 24.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const PIPE_SPEED: f32 = 3.0;
    pub const PIPE_GAP: f32 = 100.0;
    pub const PIPE_SPAWN_MS: u64 = 1000;
    /// Keep gap centers this far from the ceiling/ground
    pub const PIPE_SPAWN_MARGIN: f32 = 50.0;
}
