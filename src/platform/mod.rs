//! Platform abstraction layer
//!
//! Input sources feed discrete events into the game loop:
//! - `terminal`: crossterm keyboard input and terminal lifecycle
//! - `ScriptedInput`: canned per-frame events for tests and demos

pub mod terminal;

use std::collections::VecDeque;

use crate::error::Result;

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Leave the game
    Quit,
    /// Start / flap / restart, depending on phase
    PrimaryAction,
}

/// Source of input events, polled once per tick
pub trait InputSource {
    /// Move every pending event into `out` without blocking
    fn poll(&mut self, out: &mut Vec<InputEvent>) -> Result<()>;
}

/// Plays back a fixed list of frames, then asks to quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// `idle` empty frames followed by one press
    pub fn press_after(idle: usize) -> Vec<Vec<InputEvent>> {
        let mut frames = vec![Vec::new(); idle];
        frames.push(vec![InputEvent::PrimaryAction]);
        frames
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, out: &mut Vec<InputEvent>) -> Result<()> {
        match self.frames.pop_front() {
            Some(frame) => out.extend(frame),
            None => out.push(InputEvent::Quit),
        }
        Ok(())
    }
}
