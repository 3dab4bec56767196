//! Fixed timestep game loop
//!
//! One iteration per tick: poll input, quit if asked, advance the
//! simulation, hand a snapshot to the renderer, then sleep to hold the
//! tick rate. Nothing is decoupled; each frame is exactly one update and
//! one render.

use crate::clock::Clock;
use crate::error::Result;
use crate::platform::{InputEvent, InputSource};
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, RandomSource, TickInput, tick};

/// Totals for one process lifetime (not persisted)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Loop iterations completed
    pub ticks: u64,
    /// Runs that ended in a crash
    pub games_played: u32,
    /// Highest score reached in any run
    pub best_score: u32,
}

impl RunSummary {
    fn record(&mut self, events: &[GameEvent], score: u32) {
        self.best_score = self.best_score.max(score);
        // A tick can report both kinds of crash; count the run once
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::HitBoundary(_) | GameEvent::HitPipe))
        {
            self.games_played += 1;
        }
    }
}

/// Whether the loop should keep going after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One session plus the per-frame input buffer
#[derive(Debug)]
pub struct GameLoop {
    state: GameState,
    /// Reused every frame; cleared before each poll
    pending: Vec<InputEvent>,
}

impl GameLoop {
    pub fn new(settings: Settings, now_ms: u64) -> Self {
        Self {
            state: GameState::new(settings, now_ms),
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Poll, tick and render once
    pub fn frame<I, R, G>(
        &mut self,
        input: &mut I,
        renderer: &mut R,
        rng: &mut G,
        now_ms: u64,
    ) -> Result<(Flow, Vec<GameEvent>)>
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
        G: RandomSource + ?Sized,
    {
        self.pending.clear();
        input.poll(&mut self.pending)?;
        if self.pending.contains(&InputEvent::Quit) {
            return Ok((Flow::Quit, Vec::new()));
        }

        let presses = self
            .pending
            .iter()
            .filter(|e| **e == InputEvent::PrimaryAction)
            .count() as u32;
        let events = tick(
            &mut self.state,
            &TickInput {
                primary_actions: presses,
                now_ms,
            },
            rng,
        );
        for event in &events {
            log::trace!("t={}ms {:?}", now_ms, event);
        }

        renderer.render(&self.state.snapshot())?;
        Ok((Flow::Continue, events))
    }
}

/// Play until the input source asks to quit
pub fn run<I, R, C, G>(
    settings: Settings,
    input: &mut I,
    renderer: &mut R,
    clock: &mut C,
    rng: &mut G,
) -> Result<RunSummary>
where
    I: InputSource + ?Sized,
    R: Renderer + ?Sized,
    C: Clock + ?Sized,
    G: RandomSource + ?Sized,
{
    let mut game = GameLoop::new(settings, clock.now_ms());
    let mut summary = RunSummary::default();
    log::info!("Game loop running at {} Hz", settings.tick_rate_hz);

    loop {
        let now_ms = clock.now_ms();
        let (flow, events) = game.frame(input, renderer, rng, now_ms)?;
        if flow == Flow::Quit {
            log::info!("Quit requested after {} ticks", summary.ticks);
            break;
        }
        summary.ticks += 1;
        summary.record(&events, game.state().score);
        clock.tick_wait(settings.tick_rate_hz);
    }

    Ok(summary)
}
