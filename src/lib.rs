//! Giraffe Game - a leaf-catching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor, leaves, collisions, game state)
//!
//! Rendering and input mapping are left to a presentation layer that calls
//! [`sim::tick()`] once per frame and reads the state back for drawing.

pub mod sim;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (world units, y grows downward)
    pub const WIDTH: f32 = 1000.0;
    pub const HEIGHT: f32 = 700.0;
    /// Ground line; the giraffe stands here and leaves die here
    pub const GROUND_Y: f32 = HEIGHT - 60.0;

    /// Horizontal clamp margin for the giraffe body
    pub const EDGE_MARGIN: f32 = 60.0;
    /// Horizontal margin for leaf spawn positions
    pub const SPAWN_MARGIN: f32 = 40.0;

    /// Difficulty ramp: (start, cap, accel) per rate, clamped linear in time
    pub const FALL_SPEED_START: f32 = 180.0;
    pub const FALL_SPEED_CAP: f32 = 520.0;
    pub const FALL_ACCEL: f32 = 6.0;

    pub const SPAWN_PER_SEC_START: f32 = 0.85;
    pub const SPAWN_PER_SEC_CAP: f32 = 3.6;
    pub const SPAWN_ACCEL: f32 = 0.035;

    pub const MOVE_SPEED_START: f32 = 260.0;
    pub const MOVE_SPEED_CAP: f32 = 520.0;
    pub const MOVE_ACCEL: f32 = 4.5;

    pub const HEAD_SPEED_START: f32 = 260.0;
    pub const HEAD_SPEED_CAP: f32 = 520.0;
    pub const HEAD_ACCEL: f32 = 4.5;

    /// Probability that a spawned leaf is rotten
    pub const ROTTEN_CHANCE: f32 = 0.22;
    /// Per-leaf fall speed jitter, multiplicative
    pub const FALL_JITTER_MIN: f32 = 0.85;
    pub const FALL_JITTER_MAX: f32 = 1.15;
    /// Per-leaf spin, radians/sec, drawn uniformly from +-SPIN_MAX
    pub const SPIN_MAX: f32 = 2.5;

    /// Neck growth tuning
    pub const NECK_START: f32 = 90.0;
    pub const NECK_CAP: f32 = 520.0;
    pub const NECK_GROW: f32 = 18.0;
    pub const NECK_SHRINK: f32 = 26.0;
    pub const NECK_MIN: f32 = 40.0;
    /// Lowest the head may sit on the neck (except when the neck is at NECK_MIN)
    pub const HEAD_OFFSET_MIN: f32 = 20.0;
    /// Head starts this fraction of the way up the neck; also the ratio
    /// fallback if the neck were ever zero-length
    pub const HEAD_START_RATIO: f32 = 0.7;

    /// Head hitbox radius for catching leaves
    pub const HEAD_RADIUS: f32 = 18.0;
    /// Leaf extents
    pub const LEAF_W: f32 = 18.0;
    pub const LEAF_H: f32 = 12.0;
    /// Leaves spawn just above the visible field
    pub const LEAF_SPAWN_Y: f32 = -20.0;

    /// Nominal frame timestep (60 Hz); the tick accepts variable dt
    pub const FRAME_DT: f32 = 1.0 / 60.0;
}
