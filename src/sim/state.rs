//! Game state and core simulation types
//!
//! One `GameState` owns the whole session. Resetting rebuilds it from
//! scratch rather than patching fields back to their defaults.

use serde::{Deserialize, Serialize};

use super::collision::{Rect, obstacle_rects};
use super::random::RandomSource;
use super::snapshot::{PipeView, Snapshot};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first flap
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, world frozen until the next press
    GameOver,
}

/// Which edge of the playfield the bird ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boundary {
    Floor,
    Ceiling,
}

/// Things that happened during a tick (for logging and front-end effects)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Start -> Playing
    Started,
    /// Upward impulse applied
    Flap,
    /// New pipe entered at the right edge
    Spawned { gap_center_y: f32 },
    /// Bird cleared a pipe; carries the new total
    Scored { score: u32 },
    /// Bird clamped against the ground or ceiling
    HitBoundary(Boundary),
    /// Bird overlapped a pipe
    HitPipe,
    /// GameOver -> Start with a fresh session
    Reset,
}

/// The player's bird (vertical motion only; x is fixed by settings)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top edge of the bounding box
    pub y: f32,
    /// Units per tick, positive is downward
    pub vel_y: f32,
}

impl Actor {
    pub fn new(y: f32) -> Self {
        Self { y, vel_y: 0.0 }
    }

    #[inline]
    pub fn apply_gravity(&mut self, gravity: f32) {
        self.vel_y += gravity;
    }

    /// Flap: replaces the current velocity instead of adding to it
    #[inline]
    pub fn apply_impulse(&mut self, jump_speed: f32) {
        self.vel_y = jump_speed;
    }

    #[inline]
    pub fn integrate(&mut self) {
        self.y += self.vel_y;
    }

    /// Keep the bird in `[0, floor_y]`, zeroing velocity on contact
    pub fn clamp_to_bounds(&mut self, floor_y: f32) -> Option<Boundary> {
        if self.y > floor_y {
            self.y = floor_y;
            self.vel_y = 0.0;
            Some(Boundary::Floor)
        } else if self.y < 0.0 {
            self.y = 0.0;
            self.vel_y = 0.0;
            Some(Boundary::Ceiling)
        } else {
            None
        }
    }
}

/// A pipe pair, identified by its left edge and the middle of its gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub gap_center_y: f32,
    /// Set once the bird has passed this pipe
    pub scored: bool,
}

/// Pipes currently on screen, in spawn order (rightmost last)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
    /// Clock time of the last spawn (or of session creation)
    last_spawn_ms: u64,
}

impl ObstacleSet {
    pub fn new(now_ms: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            last_spawn_ms: now_ms,
        }
    }

    /// Append a pipe at `x` and restart the spawn timer
    pub fn spawn_at(&mut self, x: f32, gap_center_y: f32, now_ms: u64) {
        self.obstacles.push(Obstacle {
            x,
            gap_center_y,
            scored: false,
        });
        self.last_spawn_ms = now_ms;
    }

    /// Spawn a pipe at the right edge once the spawn interval has elapsed
    ///
    /// Returns the new pipe's gap center when one was spawned.
    pub fn maybe_spawn<R: RandomSource + ?Sized>(
        &mut self,
        now_ms: u64,
        settings: &Settings,
        rng: &mut R,
    ) -> Option<f32> {
        if now_ms.saturating_sub(self.last_spawn_ms) <= settings.spawn_interval_ms {
            return None;
        }
        let (low, high) = settings.gap_center_range();
        let gap_center_y = rng.uniform_int(low, high) as f32;
        self.spawn_at(settings.screen_width, gap_center_y, now_ms);
        log::debug!(
            "Spawned pipe at t={}ms, gap center {} ({} on screen)",
            now_ms,
            gap_center_y,
            self.obstacles.len()
        );
        Some(gap_center_y)
    }

    /// Scroll every pipe left by `speed`
    pub fn advance_all(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Drop pipes that have fully left the screen; returns how many went
    pub fn prune_offscreen(&mut self, width: f32) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.x >= -width);
        before - self.obstacles.len()
    }

    /// Mark pipes whose trailing edge is behind `actor_x` as scored
    ///
    /// Returns the number of pipes newly scored this call.
    pub fn check_scoring(&mut self, actor_x: f32, width: f32) -> u32 {
        let mut passed = 0;
        for obstacle in self.obstacles.iter_mut().filter(|o| !o.scored) {
            if obstacle.x + width < actor_x {
                obstacle.scored = true;
                passed += 1;
            }
        }
        passed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn last_spawn_ms(&self) -> u64 {
        self.last_spawn_ms
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Constants this session was built with (survive resets)
    pub settings: Settings,
    /// Current phase
    pub phase: GamePhase,
    /// Player bird
    pub bird: Actor,
    /// On-screen pipes and spawn timer
    pub pipes: ObstacleSet,
    /// Pipes cleared this run
    pub score: u32,
    /// Playing ticks simulated this run
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh session in the Start phase
    pub fn new(settings: Settings, now_ms: u64) -> Self {
        Self {
            settings,
            phase: GamePhase::Start,
            bird: Actor::new(settings.bird_start_y()),
            pipes: ObstacleSet::new(now_ms),
            score: 0,
            time_ticks: 0,
        }
    }

    /// Replace the whole session with a fresh one using the same settings
    pub fn reset(&mut self, now_ms: u64) {
        *self = Self::new(self.settings, now_ms);
    }

    /// Bird bounding box at its current height
    pub fn bird_rect(&self) -> Rect {
        self.settings.bird_rect(self.bird.y)
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        let s = &self.settings;
        Snapshot {
            phase: self.phase,
            score: self.score,
            bird: self.bird_rect(),
            pipes: self
                .pipes
                .iter()
                .map(|o| {
                    let [top, bottom] = obstacle_rects(o, s);
                    PipeView {
                        x: o.x,
                        gap_center_y: o.gap_center_y,
                        top,
                        bottom,
                    }
                })
                .collect(),
            screen_width: s.screen_width,
            screen_height: s.screen_height,
            ground_y: s.ground_y(),
        }
    }
}
