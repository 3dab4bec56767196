//! Fixed timestep simulation tick
//!
//! Core game loop step: apply this tick's presses, then advance the world
//! if a run is in progress.

use super::collision::check_collision;
use super::random::RandomSource;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Primary-action presses drained this tick, applied in order
    pub primary_actions: u32,
    /// Clock time at the start of the tick
    pub now_ms: u64,
}

/// Advance the game state by one fixed timestep
pub fn tick<R: RandomSource + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for _ in 0..input.primary_actions {
        primary_action(state, input.now_ms, &mut events);
    }

    if state.phase == GamePhase::Playing {
        advance_playing(state, input.now_ms, rng, &mut events);
    }

    events
}

/// One press of the primary action, interpreted by phase
fn primary_action(state: &mut GameState, now_ms: u64, events: &mut Vec<GameEvent>) {
    match state.phase {
        GamePhase::Start => {
            state.phase = GamePhase::Playing;
            log::info!("Run started");
            events.push(GameEvent::Started);
        }
        GamePhase::Playing => {
            state.bird.apply_impulse(state.settings.jump_speed);
            events.push(GameEvent::Flap);
        }
        GamePhase::GameOver => {
            log::info!("Resetting after game over (final score {})", state.score);
            state.reset(now_ms);
            events.push(GameEvent::Reset);
        }
    }
}

fn advance_playing<R: RandomSource + ?Sized>(
    state: &mut GameState,
    now_ms: u64,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let settings = state.settings;
    state.time_ticks += 1;

    // Bird
    state.bird.apply_gravity(settings.gravity);
    state.bird.integrate();
    if let Some(boundary) = state.bird.clamp_to_bounds(settings.floor_y()) {
        log::warn!("Bird hit the {:?} at y={}", boundary, state.bird.y);
        events.push(GameEvent::HitBoundary(boundary));
        end_run(state);
    }

    // Pipes (the rest of this tick still runs after a boundary hit)
    if let Some(gap_center_y) = state.pipes.maybe_spawn(now_ms, &settings, rng) {
        events.push(GameEvent::Spawned { gap_center_y });
    }
    state.pipes.advance_all(settings.pipe_speed);

    let bird = state.bird_rect();
    if state
        .pipes
        .iter()
        .any(|pipe| check_collision(&bird, pipe, &settings))
    {
        log::warn!("Bird hit a pipe at y={}", state.bird.y);
        events.push(GameEvent::HitPipe);
        end_run(state);
    }

    let passed = state.pipes.check_scoring(settings.bird_x, settings.pipe_width);
    for _ in 0..passed {
        state.score += 1;
        log::debug!("Score: {}", state.score);
        events.push(GameEvent::Scored { score: state.score });
    }

    let pruned = state.pipes.prune_offscreen(settings.pipe_width);
    if pruned > 0 {
        log::debug!("Pruned {} pipe(s), {} left", pruned, state.pipes.len());
    }
}

fn end_run(state: &mut GameState) {
    if state.phase != GamePhase::GameOver {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} after {} ticks",
            state.score,
            state.time_ticks
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::random::SequenceRandom;
    use crate::sim::state::{Actor, Boundary};
    use proptest::prelude::*;

    const FRAME_MS: u64 = 16;

    fn press(now_ms: u64) -> TickInput {
        TickInput {
            primary_actions: 1,
            now_ms,
        }
    }

    fn idle(now_ms: u64) -> TickInput {
        TickInput {
            primary_actions: 0,
            now_ms,
        }
    }

    fn rng() -> SequenceRandom {
        SequenceRandom::new(vec![200])
    }

    #[test]
    fn test_start_waits_for_press() {
        let mut state = GameState::new(Settings::default(), 0);
        let mut rng = rng();

        for i in 0..120 {
            let events = tick(&mut state, &idle(i * FRAME_MS), &mut rng);
            assert!(events.is_empty());
        }
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.bird, Actor::new(256.0));
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_press_starts_and_simulates_same_tick() {
        let mut state = GameState::new(Settings::default(), 0);
        let events = tick(&mut state, &press(0), &mut rng());

        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bird.vel_y, 0.25);
        assert_eq!(state.bird.y, 256.25);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_gravity_scenario() {
        let mut state = GameState::new(Settings::default(), 0);
        state.phase = GamePhase::Playing;
        state.bird = Actor { y: 100.0, vel_y: 0.0 };

        tick(&mut state, &idle(0), &mut rng());
        assert_eq!(state.bird.vel_y, 0.25);
        assert_eq!(state.bird.y, 100.25);
    }

    #[test]
    fn test_flap_overrides_fall_speed() {
        let mut state = GameState::new(Settings::default(), 0);
        state.phase = GamePhase::Playing;
        state.bird = Actor { y: 200.0, vel_y: 3.0 };

        let events = tick(&mut state, &press(0), &mut rng());
        assert_eq!(events, vec![GameEvent::Flap]);
        // -5 from the flap, then this tick's gravity
        assert_eq!(state.bird.vel_y, -4.75);
        assert_eq!(state.bird.y, 195.25);
    }

    #[test]
    fn test_two_presses_in_start_begin_then_flap() {
        let mut state = GameState::new(Settings::default(), 0);
        let input = TickInput {
            primary_actions: 2,
            now_ms: 0,
        };
        let events = tick(&mut state, &input, &mut rng());
        assert_eq!(events, vec![GameEvent::Started, GameEvent::Flap]);
        assert_eq!(state.bird.vel_y, -4.75);
    }

    #[test]
    fn test_falling_ends_on_floor() {
        let mut state = GameState::new(Settings::default(), 0);
        tick(&mut state, &press(0), &mut rng());

        let mut crashed = false;
        for i in 1..200 {
            let events = tick(&mut state, &idle(i * FRAME_MS), &mut rng());
            if events.contains(&GameEvent::HitBoundary(Boundary::Floor)) {
                crashed = true;
                break;
            }
        }
        assert!(crashed);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.bird.y, state.settings.floor_y());
        assert_eq!(state.bird.vel_y, 0.0);
    }

    #[test]
    fn test_flying_into_ceiling_ends_run() {
        let mut state = GameState::new(Settings::default(), 0);
        state.phase = GamePhase::Playing;
        state.bird = Actor { y: 2.0, vel_y: 0.0 };

        let events = tick(&mut state, &press(0), &mut rng());
        assert!(events.contains(&GameEvent::HitBoundary(Boundary::Ceiling)));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.bird, Actor { y: 0.0, vel_y: 0.0 });
    }

    #[test]
    fn test_pipe_collision_ends_run() {
        let mut state = GameState::new(Settings::default(), 0);
        state.phase = GamePhase::Playing;
        state.bird = Actor { y: 100.0, vel_y: 0.0 };
        // Gap is 200..300, bird sits in the top pipe
        state.pipes.spawn_at(60.0, 250.0, 0);

        let events = tick(&mut state, &idle(0), &mut rng());
        assert!(events.contains(&GameEvent::HitPipe));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut state = GameState::new(Settings::default(), 0);
        state.phase = GamePhase::GameOver;
        state.score = 4;
        state.pipes.spawn_at(120.0, 200.0, 0);
        let bird = state.bird;

        for i in 0..60 {
            assert!(tick(&mut state, &idle(5000 + i * FRAME_MS), &mut rng()).is_empty());
        }
        assert_eq!(state.bird, bird);
        assert_eq!(state.score, 4);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes.as_slice()[0].x, 120.0);
    }

    #[test]
    fn test_press_after_game_over_resets() {
        let mut state = GameState::new(Settings::default(), 0);
        state.phase = GamePhase::GameOver;
        state.score = 9;
        state.bird = Actor { y: 376.0, vel_y: 0.0 };
        state.pipes.spawn_at(120.0, 200.0, 0);

        let events = tick(&mut state, &press(7000), &mut rng());
        assert_eq!(events, vec![GameEvent::Reset]);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.bird, Actor::new(256.0));
        assert_eq!(state.pipes.last_spawn_ms(), 7000);
    }

    #[test]
    fn test_spawn_follows_clock() {
        let mut state = GameState::new(Settings::default(), 0);
        state.phase = GamePhase::Playing;
        state.bird = Actor { y: 100.0, vel_y: 0.0 };
        let mut rng = SequenceRandom::new(vec![120]);

        let events = tick(&mut state, &idle(1000), &mut rng);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Spawned { .. })));

        let events = tick(&mut state, &idle(1001), &mut rng);
        assert!(events.contains(&GameEvent::Spawned { gap_center_y: 120.0 }));
        // Spawned at the right edge, then scrolled this same tick
        assert_eq!(state.pipes.as_slice()[0].x, 285.0);
    }

    #[test]
    fn test_scoring_through_gap() {
        let mut state = GameState::new(Settings::default(), 0);
        state.phase = GamePhase::Playing;
        // Disable gravity so the bird hovers at the gap center
        state.settings.gravity = 0.0;
        state.bird = Actor { y: 188.0, vel_y: 0.0 };
        // Trailing edge at 5 + 52 = 57, passes 50 after three ticks
        state.pipes.spawn_at(5.0, 200.0, 0);

        let mut scores = Vec::new();
        for i in 0..40 {
            for event in tick(&mut state, &idle(i), &mut rng()) {
                if let GameEvent::Scored { score } = event {
                    scores.push((i, score));
                }
            }
        }
        assert_eq!(scores, vec![(2, 1)]);
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pipe_count_stays_bounded_on_long_runs() {
        let mut state = GameState::new(Settings::default(), 0);
        state.phase = GamePhase::Playing;
        state.settings.gravity = 0.0;
        state.bird = Actor { y: 188.0, vel_y: 0.0 };
        let mut rng = rng();
        let s = state.settings;
        // A pipe lives until it has scrolled a screen plus its own width
        let max_alive = ((s.screen_width + s.pipe_width) / s.pipe_speed).ceil() as usize;

        // A spawn every tick
        for i in 1..=10_000u64 {
            tick(&mut state, &idle(i * 1001), &mut rng);
            assert!(state.pipes.len() <= max_alive, "tick {i}: {}", state.pipes.len());
        }
        assert_eq!(state.phase, GamePhase::Playing);
    }

    proptest! {
        #[test]
        fn prop_bird_stays_in_bounds(presses in proptest::collection::vec(any::<bool>(), 1..400)) {
            let mut state = GameState::new(Settings::default(), 0);
            let mut rng = SequenceRandom::new(vec![100, 350, 225]);
            let floor_y = state.settings.floor_y();

            for (i, pressed) in presses.iter().enumerate() {
                let input = TickInput {
                    primary_actions: u32::from(*pressed),
                    now_ms: i as u64 * FRAME_MS,
                };
                tick(&mut state, &input, &mut rng);
                if state.phase != GamePhase::Start {
                    prop_assert!(state.bird.y >= 0.0 && state.bird.y <= floor_y);
                }
            }
        }

        #[test]
        fn prop_pipes_scroll_left_and_score_once(ticks in 1usize..600) {
            let mut state = GameState::new(Settings::default(), 0);
            state.phase = GamePhase::Playing;
            state.settings.gravity = 0.0;
            state.bird = Actor { y: 188.0, vel_y: 0.0 };
            // Every pipe's gap lines up with the hovering bird
            let mut rng = SequenceRandom::new(vec![200]);
            let speed = state.settings.pipe_speed;
            let width = state.settings.pipe_width;

            for i in 0..ticks {
                let before: Vec<_> = state.pipes.iter().copied().collect();
                let score_before = state.score;
                tick(&mut state, &idle(i as u64 * 100), &mut rng);
                prop_assert_eq!(state.phase, GamePhase::Playing);

                // Pruning only ever takes the oldest pipes off the front
                let removed = before.iter().take_while(|o| o.x - speed < -width).count();
                let kept = &before[removed..];
                let after = state.pipes.as_slice();
                prop_assert!(after.len() >= kept.len());

                let mut newly_scored = 0;
                for (old, new) in kept.iter().zip(after) {
                    prop_assert!(new.x < old.x);
                    prop_assert!(!old.scored || new.scored);
                    if new.scored && !old.scored {
                        newly_scored += 1;
                    }
                }
                prop_assert_eq!(state.score - score_before, newly_scored);
            }
        }
    }
}
