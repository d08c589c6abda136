//! Per-frame simulation step
//!
//! One tick advances the whole session by `dt` seconds in a fixed order:
//! ramp -> actor steer -> spawn -> leaf update -> catches -> ground reap ->
//! terminal check. The caller samples held keys and one-shot commands into a
//! [`TickInput`] once per frame and clears the one-shots after the tick.

use std::cmp::Ordering;

use super::collision::circle_rect_overlap;
use super::ramp::Rates;
use super::state::{GameOverReason, GamePhase, GameState, Giraffe, Leaf};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held horizontal intent: -1 left, 0 idle, 1 right
    pub x_intent: i8,
    /// Held vertical intent: -1 lower the head, 0 idle, 1 raise it
    pub y_intent: i8,
    /// Leave the title screen and start playing
    pub confirm: bool,
    /// Open the instructions screen from the title
    pub instructions: bool,
    /// Return from the instructions screen
    pub back: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart after game over
    pub restart: bool,
    /// Demo mode: synthesize intents from the game state
    pub autopilot: bool,
}

impl TickInput {
    /// Build axis intents from held key state. Opposing keys cancel; the two
    /// axes are independent.
    pub fn from_held(left: bool, right: bool, up: bool, down: bool) -> Self {
        Self {
            x_intent: i8::from(right) - i8::from(left),
            y_intent: i8::from(up) - i8::from(down),
            ..Self::default()
        }
    }
}

/// How many leaves a resolve pass caught, by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatchOutcome {
    /// Good leaves eaten (each grew the neck and scores a point)
    pub grown: u32,
    /// Rotten leaves eaten (each shrank the neck)
    pub shrunk: u32,
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let input = if input.autopilot {
        autopilot(state, *input)
    } else {
        *input
    };

    match state.phase {
        GamePhase::Start => {
            if input.confirm {
                state.phase = GamePhase::Playing;
                log::info!("session started (seed {})", state.seed);
            } else if input.instructions {
                state.phase = GamePhase::Instructions;
            }
            return;
        }
        GamePhase::Instructions => {
            if input.back {
                state.phase = GamePhase::Start;
            }
            return;
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
                log::info!("restarted");
            }
            return;
        }
        GamePhase::Playing => {}
    }

    if input.pause {
        state.phase = GamePhase::Paused;
        return;
    }

    state.elapsed += dt;
    let rates = Rates::at(state.elapsed);

    state.giraffe.steer(
        dt,
        input.x_intent,
        input.y_intent,
        rates.move_speed,
        rates.head_speed,
    );

    spawn_leaves(state, dt, &rates);

    for leaf in &mut state.leaves {
        leaf.update(dt);
    }

    let outcome = resolve_catches(&mut state.giraffe, &mut state.leaves);
    state.score += outcome.grown;

    if reap_grounded(&mut state.leaves) {
        state.phase = GamePhase::GameOver;
        state.game_over_reason = Some(GameOverReason::GoodLeafGrounded);
        log::info!(
            "game over after {:.1}s, score {}: {}",
            state.elapsed,
            state.score,
            GameOverReason::GoodLeafGrounded
        );
    }
}

/// Accumulate fractional spawns and emit leaves once the accumulator crosses
/// whole units. A large `dt` catches up with several spawns in one frame;
/// there is deliberately no per-frame cap.
fn spawn_leaves(state: &mut GameState, dt: f32, rates: &Rates) -> u32 {
    state.spawn_accum += rates.spawn_rate * dt;
    let mut spawned = 0;
    while state.spawn_accum >= 1.0 {
        state.spawn_accum -= 1.0;
        let leaf = Leaf::spawn(&mut state.rng, rates.fall_speed);
        log::trace!("leaf at x={:.0} rotten={}", leaf.pos.x, leaf.rotten);
        state.leaves.push(leaf);
        spawned += 1;
    }
    spawned
}

/// Test every live leaf against the head hitbox, in insertion order. Caught
/// leaves are removed and their neck delta applied immediately, so a later
/// leaf in the same frame sees the updated neck.
fn resolve_catches(giraffe: &mut Giraffe, leaves: &mut Vec<Leaf>) -> CatchOutcome {
    let head = giraffe.head_pos();
    let mut outcome = CatchOutcome::default();
    leaves.retain(|leaf| {
        let (rect_min, rect_max) = leaf.bounds();
        if circle_rect_overlap(head, HEAD_RADIUS, rect_min, rect_max) {
            if leaf.rotten {
                giraffe.apply_neck_change(-NECK_SHRINK);
                outcome.shrunk += 1;
            } else {
                giraffe.apply_neck_change(NECK_GROW);
                outcome.grown += 1;
            }
            false
        } else {
            true
        }
    });
    outcome
}

/// Handle leaves whose bottom edge reached the ground. Rotten leaves vanish
/// silently; a good leaf ends the run and stays in the collection so the
/// frozen final frame still shows it.
fn reap_grounded(leaves: &mut Vec<Leaf>) -> bool {
    let mut fatal = false;
    leaves.retain(|leaf| {
        if leaf.bottom() < GROUND_Y {
            true
        } else if leaf.rotten {
            false
        } else {
            fatal = true;
            true
        }
    });
    fatal
}

/// Steering deadband so the autopilot doesn't jitter around its target
const AUTOPILOT_DEADBAND: f32 = 4.0;

/// Demo AI: chase the good leaf closest to the ground with body and head
fn autopilot(state: &GameState, mut input: TickInput) -> TickInput {
    match state.phase {
        GamePhase::Start => {
            input.confirm = true;
            return input;
        }
        GamePhase::Instructions => {
            input.back = true;
            return input;
        }
        GamePhase::Playing => {}
        _ => return input,
    }

    let target = state
        .leaves
        .iter()
        .filter(|leaf| !leaf.rotten)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(Ordering::Equal)
        });

    if let Some(leaf) = target {
        let giraffe = &state.giraffe;
        let dx = leaf.pos.x - giraffe.base.x;
        if dx.abs() > AUTOPILOT_DEADBAND {
            input.x_intent = if dx > 0.0 { 1 } else { -1 };
        }

        // Raise or lower the head toward the leaf's height, within reach
        let desired = (giraffe.base.y - leaf.pos.y).clamp(HEAD_OFFSET_MIN, giraffe.neck_len);
        let dy = desired - giraffe.head_offset;
        if dy.abs() > AUTOPILOT_DEADBAND {
            input.y_intent = if dy > 0.0 { 1 } else { -1 };
        }
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.phase = GamePhase::Playing;
        state
    }

    /// A leaf parked on the head hitbox, with negligible motion
    fn leaf_at(pos: Vec2, rotten: bool) -> Leaf {
        Leaf {
            pos,
            rotten,
            fall_speed: 1.0,
            spin: 0.0,
            angle: 0.0,
        }
    }

    #[test]
    fn test_title_flow() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Start);

        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.phase, GamePhase::Start);

        let open = TickInput {
            instructions: true,
            ..Default::default()
        };
        tick(&mut state, &open, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Instructions);

        let back = TickInput {
            back: true,
            ..Default::default()
        };
        tick(&mut state, &back, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Start);

        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &confirm, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        // Menu frames never advance the clock
        assert_eq!(state.elapsed, 0.0);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = playing_state(2);
        state.leaves.push(leaf_at(Vec2::new(500.0, 100.0), false));

        tick(&mut state, &TickInput::default(), FRAME_DT);
        let elapsed = state.elapsed;
        let leaf_y = state.leaves[0].pos.y;
        assert!(elapsed > 0.0);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        // Paused frames change nothing
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.elapsed, elapsed);
        assert_eq!(state.leaves[0].pos.y, leaf_y);

        tick(&mut state, &pause, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert!(state.elapsed > elapsed);
        assert!(state.leaves[0].pos.y > leaf_y);
    }

    #[test]
    fn test_spawn_catch_up_in_one_tick() {
        let mut state = playing_state(3);
        let rates = Rates {
            fall_speed: 180.0,
            spawn_rate: 1.0,
            move_speed: 0.0,
            head_speed: 0.0,
        };
        // One big frame accumulates 2.5 spawn units and emits both whole ones
        let spawned = spawn_leaves(&mut state, 2.5, &rates);
        assert_eq!(spawned, 2);
        assert_eq!(state.leaves.len(), 2);
        assert!((state.spawn_accum - 0.5).abs() < 1.0e-6);
    }

    #[test]
    fn test_leaves_fall_by_their_speed() {
        let mut state = playing_state(4);
        state.leaves.push(leaf_at(Vec2::new(500.0, 100.0), false));
        state.leaves[0].fall_speed = 120.0;
        state.leaves[0].spin = 1.5;

        let dt = 0.1;
        tick(&mut state, &TickInput::default(), dt);
        assert!((state.leaves[0].pos.y - (100.0 + 120.0 * dt)).abs() < 1.0e-4);
        assert!((state.leaves[0].angle - 1.5 * dt).abs() < 1.0e-4);
    }

    #[test]
    fn test_catch_good_leaf_grows_and_scores() {
        let mut state = playing_state(5);
        let head = state.giraffe.head_pos();
        state.leaves.push(leaf_at(head, false));

        tick(&mut state, &TickInput::default(), 1.0e-6);
        assert!(state.leaves.is_empty());
        assert_eq!(state.score, 1);
        assert!((state.giraffe.neck_len - (NECK_START + NECK_GROW)).abs() < 1.0e-4);
    }

    #[test]
    fn test_catch_rotten_leaf_shrinks() {
        let mut state = playing_state(6);
        let head = state.giraffe.head_pos();
        state.leaves.push(leaf_at(head, true));

        tick(&mut state, &TickInput::default(), 1.0e-6);
        assert!(state.leaves.is_empty());
        assert_eq!(state.score, 0);
        assert!((state.giraffe.neck_len - (NECK_START - NECK_SHRINK)).abs() < 1.0e-4);
    }

    #[test]
    fn test_good_leaf_grounding_ends_the_run() {
        let mut state = playing_state(7);
        // Far from the head so it cannot be caught first
        state.leaves.push(leaf_at(Vec2::new(100.0, GROUND_Y), false));

        tick(&mut state, &TickInput::default(), 1.0e-6);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            state.game_over_reason.map(|r| r.to_string()),
            Some("A green leaf touched the ground".to_string())
        );
        // The fatal leaf stays for the frozen final frame
        assert_eq!(state.leaves.len(), 1);
    }

    #[test]
    fn test_rotten_leaf_grounds_silently() {
        let mut state = playing_state(8);
        state.leaves.push(leaf_at(Vec2::new(100.0, GROUND_Y), true));

        tick(&mut state, &TickInput::default(), 1.0e-6);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.game_over_reason.is_none());
        assert!(state.leaves.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_game_over_is_terminal_until_restart() {
        let mut state = playing_state(9);
        state.phase = GamePhase::GameOver;
        state.game_over_reason = Some(GameOverReason::GoodLeafGrounded);
        state.elapsed = 12.0;

        tick(&mut state, &TickInput::default(), FRAME_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.elapsed, 12.0);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.elapsed, 0.0);
        assert!(state.game_over_reason.is_none());
    }

    #[test]
    fn test_held_key_mapping() {
        let input = TickInput::from_held(true, false, false, true);
        assert_eq!(input.x_intent, -1);
        assert_eq!(input.y_intent, -1);

        // Opposing keys cancel per axis, axes stay independent
        let input = TickInput::from_held(true, true, true, false);
        assert_eq!(input.x_intent, 0);
        assert_eq!(input.y_intent, 1);
    }

    #[test]
    fn test_steering_moves_the_actor() {
        let mut state = playing_state(10);
        let x0 = state.giraffe.base.x;
        let h0 = state.giraffe.head_offset;

        let input = TickInput {
            x_intent: 1,
            y_intent: -1,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_DT);
        assert!(state.giraffe.base.x > x0);
        assert!(state.giraffe.head_offset < h0);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let mut a = playing_state(99_999);
        let mut b = playing_state(99_999);

        let inputs = [
            TickInput::from_held(true, false, true, false),
            TickInput::default(),
            TickInput::from_held(false, true, false, false),
        ];
        for frame in 0..600 {
            let input = inputs[frame % inputs.len()];
            tick(&mut a, &input, FRAME_DT);
            tick(&mut b, &input, FRAME_DT);
        }

        assert_eq!(format!("{a:?}"), format!("{b:?}"));
    }

    #[test]
    fn test_autopilot_reaches_for_lowest_good_leaf() {
        let mut state = playing_state(11);
        // One rotten leaf lower than the good one; the autopilot must ignore it
        state.leaves.push(leaf_at(Vec2::new(200.0, 400.0), true));
        state.leaves.push(leaf_at(Vec2::new(800.0, 300.0), false));

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let x0 = state.giraffe.base.x;
        tick(&mut state, &input, FRAME_DT);
        assert!(state.giraffe.base.x > x0, "should steer right toward the good leaf");
    }
}
