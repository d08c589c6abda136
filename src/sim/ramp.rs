//! Time-indexed difficulty scaling
//!
//! Every gameplay rate is a clamped linear function of elapsed session time:
//! `clamp(start + accel * t, start, cap)`. Pure functions only; the session
//! recomputes the whole set once per frame.

use crate::consts::*;

/// The four gameplay rates for a given moment of a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    /// Base leaf fall speed (units/sec) before per-leaf jitter
    pub fall_speed: f32,
    /// Leaf spawns per second
    pub spawn_rate: f32,
    /// Giraffe body speed (units/sec)
    pub move_speed: f32,
    /// Head slide speed along the neck (units/sec)
    pub head_speed: f32,
}

#[inline]
fn ramp(elapsed: f32, start: f32, cap: f32, accel: f32) -> f32 {
    (start + accel * elapsed).clamp(start, cap)
}

impl Rates {
    /// Rates after `elapsed` seconds of play
    pub fn at(elapsed: f32) -> Self {
        Self {
            fall_speed: ramp(elapsed, FALL_SPEED_START, FALL_SPEED_CAP, FALL_ACCEL),
            spawn_rate: ramp(elapsed, SPAWN_PER_SEC_START, SPAWN_PER_SEC_CAP, SPAWN_ACCEL),
            move_speed: ramp(elapsed, MOVE_SPEED_START, MOVE_SPEED_CAP, MOVE_ACCEL),
            head_speed: ramp(elapsed, HEAD_SPEED_START, HEAD_SPEED_CAP, HEAD_ACCEL),
        }
    }
}
