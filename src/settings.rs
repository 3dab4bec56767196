//! Game settings
//!
//! Every tunable constant lives here so a run can be reshaped from a JSON
//! file without touching the simulation. Missing fields fall back to
//! [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::Rect;

/// Tunable game constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_height: f32,

    // === Bird ===
    /// Added to velocity every tick
    pub gravity: f32,
    /// Velocity set (not added) on flap
    pub jump_speed: f32,
    pub bird_x: f32,
    pub bird_width: f32,
    pub bird_height: f32,

    // === Pipes ===
    pub pipe_width: f32,
    /// Leftward scroll per tick
    pub pipe_speed: f32,
    pub pipe_gap: f32,
    pub spawn_interval_ms: u64,
    pub spawn_margin: f32,

    // === Loop ===
    pub tick_rate_hz: u32,
    /// RNG seed for pipe placement; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_height: GROUND_HEIGHT,

            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            bird_x: BIRD_X,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,

            pipe_width: PIPE_WIDTH,
            pipe_speed: PIPE_SPEED,
            pipe_gap: PIPE_GAP,
            spawn_interval_ms: PIPE_SPAWN_MS,
            spawn_margin: PIPE_SPAWN_MARGIN,

            tick_rate_hz: TICK_RATE_HZ,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject settings that cannot produce a playable run
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_hz == 0 {
            return Err(Error::InvalidSettings("tick_rate_hz must be positive".into()));
        }
        let sizes = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            // Pipes must scroll off screen or they are never pruned
            ("pipe_speed", self.pipe_speed),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(Error::InvalidSettings(format!("{name} must be positive")));
        }
        let non_negative = [
            ("ground_height", self.ground_height),
            ("gravity", self.gravity),
            ("spawn_margin", self.spawn_margin),
        ];
        if let Some((name, _)) = non_negative.iter().find(|(_, v)| !(*v >= 0.0)) {
            return Err(Error::InvalidSettings(format!("{name} must not be negative")));
        }
        if !(self.floor_y() > 0.0) {
            return Err(Error::InvalidSettings(
                "ground and bird leave no room to fly".into(),
            ));
        }
        let (low, high) = self.gap_center_range();
        if low > high {
            return Err(Error::InvalidSettings(format!(
                "gap center range is empty ({low} > {high})"
            )));
        }
        Ok(())
    }

    /// Lowest y the bird's top edge may reach before hitting the ground
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.screen_height - self.ground_height - self.bird_height
    }

    /// Y where the ground strip begins
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.screen_height - self.ground_height
    }

    /// Inclusive integer bounds for a new pipe's gap center
    pub fn gap_center_range(&self) -> (i32, i32) {
        let low = (self.pipe_gap / 2.0 + self.spawn_margin).ceil() as i32;
        let high = (self.ground_y() - self.spawn_margin).floor() as i32;
        (low, high)
    }

    /// Starting height of the bird (vertical middle of the screen)
    #[inline]
    pub fn bird_start_y(&self) -> f32 {
        (self.screen_height / 2.0).floor()
    }

    /// Bird bounding box with its top edge at `y`
    pub fn bird_rect(&self, y: f32) -> Rect {
        Rect::new(self.bird_x, y, self.bird_width, self.bird_height)
    }
}
