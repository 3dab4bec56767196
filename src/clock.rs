//! Wall clock and loop pacing

use std::time::{Duration, Instant};

/// Time source for the game loop
pub trait Clock {
    /// Milliseconds since the clock was created
    fn now_ms(&self) -> u64;

    /// Block until one tick at `target_hz` has elapsed since the previous call
    fn tick_wait(&mut self, target_hz: u32);
}

/// Real clock backed by `Instant`, sleeping to hold the tick rate
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
    last_tick: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn tick_wait(&mut self, target_hz: u32) {
        let frame = Duration::from_secs(1) / target_hz.max(1);
        let elapsed = self.last_tick.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        } else if elapsed > frame * 2 {
            log::debug!("Frame overran budget: {:?} > {:?}", elapsed, frame);
        }
        self.last_tick = Instant::now();
    }
}

/// Clock that only moves when the loop waits, one exact frame at a time
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now_us: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_us / 1000
    }

    fn tick_wait(&mut self, target_hz: u32) {
        self.now_us += 1_000_000 / u64::from(target_hz.max(1));
    }
}
