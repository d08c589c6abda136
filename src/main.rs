//! Giraffe Game entry point
//!
//! Headless demo driver: runs an autopilot session at the nominal frame rate
//! and logs its progress. A graphical frontend would drive the same
//! [`giraffe_game::sim::tick()`] contract from real input and a frame clock.
//!
//! Usage: `giraffe-game [--seed N] [--frames N] [--dump-state]`

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use giraffe_game::consts::FRAME_DT;
use giraffe_game::sim::{GameState, TickInput, tick};

struct Args {
    seed: u64,
    max_frames: u64,
    dump_state: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        seed: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
        max_frames: 60 * 60 * 5, // five simulated minutes
        dump_state: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => match iter.next().and_then(|v| v.parse().ok()) {
                Some(seed) => args.seed = seed,
                None => log::warn!("--seed needs a number, using {}", args.seed),
            },
            "--frames" => match iter.next().and_then(|v| v.parse().ok()) {
                Some(frames) => args.max_frames = frames,
                None => log::warn!("--frames needs a number, using {}", args.max_frames),
            },
            "--dump-state" => args.dump_state = true,
            other => log::warn!("ignoring unknown argument {other:?}"),
        }
    }
    args
}

fn main() {
    env_logger::init();
    let args = parse_args();

    log::info!("Giraffe Game (headless) seed={}", args.seed);
    let mut state = GameState::new(args.seed);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let started = Instant::now();
    let mut frames: u64 = 0;
    while frames < args.max_frames && !state.is_over() {
        tick(&mut state, &input, FRAME_DT);
        frames += 1;

        if frames % (60 * 10) == 0 {
            log::info!(
                "t={:>5.1}s score={:<3} neck={:>3.0} leaves={}",
                state.elapsed,
                state.score,
                state.giraffe.neck_len,
                state.leaves.len()
            );
        }
    }

    match &state.game_over_reason {
        Some(reason) => log::info!(
            "game over: {} (survived {:.1}s, score {})",
            reason,
            state.elapsed,
            state.score
        ),
        None => log::info!(
            "frame budget reached at {:.1}s, score {}",
            state.elapsed,
            state.score
        ),
    }
    log::info!(
        "{} frames in {:.1?} wall time",
        frames,
        started.elapsed()
    );

    if args.dump_state {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("state snapshot failed: {err}"),
        }
    }
}
