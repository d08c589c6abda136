//! Game state and core simulation types
//!
//! All state that a session needs for deterministic replay lives here,
//! including the RNG. Everything is serializable so a frontend can snapshot
//! a session.

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Start,
    /// Instructions screen, reachable from the title
    Instructions,
    /// Active gameplay
    Playing,
    /// Simulation frozen until pause is toggled again
    Paused,
    /// Run ended; restart begins a fresh run on the same RNG stream
    GameOver,
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// A good leaf reached the ground uncaught
    GoodLeafGrounded,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::GoodLeafGrounded => write!(f, "A green leaf touched the ground"),
        }
    }
}

/// A falling leaf
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    /// Center position
    pub pos: Vec2,
    /// Set once at spawn; rotten leaves shrink the neck and ground harmlessly
    pub rotten: bool,
    /// Units/sec, fixed for this leaf's life (ramp value with per-leaf jitter)
    pub fall_speed: f32,
    /// Radians/sec, purely cosmetic rotation
    pub spin: f32,
    /// Current rotation for rendering
    pub angle: f32,
}

impl Leaf {
    /// Spawn a leaf at a random horizontal position just above the field.
    ///
    /// `base_fall_speed` is the current ramp value; each leaf keeps its own
    /// jittered copy so the ramp only affects leaves spawned later.
    pub fn spawn(rng: &mut Pcg32, base_fall_speed: f32) -> Self {
        let x = rng.random_range(SPAWN_MARGIN..=WIDTH - SPAWN_MARGIN);
        let rotten = rng.random::<f32>() < ROTTEN_CHANCE;
        let jitter = rng.random_range(FALL_JITTER_MIN..=FALL_JITTER_MAX);
        let spin = rng.random_range(-SPIN_MAX..=SPIN_MAX);
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        Self {
            pos: Vec2::new(x, LEAF_SPAWN_Y),
            rotten,
            fall_speed: base_fall_speed * jitter,
            spin,
            angle,
        }
    }

    /// Advance position and rotation
    pub fn update(&mut self, dt: f32) {
        self.pos.y += self.fall_speed * dt;
        self.angle += self.spin * dt;
    }

    /// Bounding rectangle as (min, max) corners
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let half = Vec2::new(LEAF_W / 2.0, LEAF_H / 2.0);
        (self.pos - half, self.pos + half)
    }

    /// Lower edge, the part that touches the ground first
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + LEAF_H / 2.0
    }
}

/// The player-controlled giraffe
///
/// The body anchor sits on the ground line; the neck extends straight up and
/// the head slides along it. Invariants held by every mutator:
/// `NECK_MIN <= neck_len <= NECK_CAP` and `0 < head_offset <= neck_len`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Giraffe {
    /// Body anchor; y stays at GROUND_Y, x is clamped to the field margins
    pub base: Vec2,
    /// Current neck extension
    pub neck_len: f32,
    /// Head's distance up the neck from the base
    pub head_offset: f32,
}

impl Default for Giraffe {
    fn default() -> Self {
        Self {
            base: Vec2::new(WIDTH / 2.0, GROUND_Y),
            neck_len: NECK_START,
            head_offset: NECK_START * HEAD_START_RATIO,
        }
    }
}

impl Giraffe {
    /// Head center, the leaf-catching hitbox
    pub fn head_pos(&self) -> Vec2 {
        Vec2::new(self.base.x, self.base.y - self.head_offset)
    }

    /// Top of the neck
    pub fn top_pos(&self) -> Vec2 {
        Vec2::new(self.base.x, self.base.y - self.neck_len)
    }

    /// Apply held-key movement for one frame.
    ///
    /// Intents are -1, 0 or 1 per axis (opposing keys cancel upstream); the
    /// two axes are independent and may both be active.
    pub fn steer(&mut self, dt: f32, x_intent: i8, y_intent: i8, move_speed: f32, head_speed: f32) {
        self.base.x += f32::from(x_intent) * move_speed * dt;
        self.base.x = self.base.x.clamp(EDGE_MARGIN, WIDTH - EDGE_MARGIN);

        // Positive intent raises the head (smaller screen y, larger offset)
        self.head_offset += f32::from(y_intent) * head_speed * dt;
        self.head_offset = self.head_offset.clamp(HEAD_OFFSET_MIN, self.neck_len);
    }

    /// Grow or shrink the neck, keeping the head at the same fraction of it.
    ///
    /// When the neck bottoms out at NECK_MIN the head floor switches from
    /// HEAD_OFFSET_MIN to NECK_MIN so the head sits flush at the top of the
    /// minimal neck.
    pub fn apply_neck_change(&mut self, delta: f32) {
        // Zero-length necks cannot occur under the invariant; saturate to the
        // starting ratio instead of dividing by zero.
        let ratio = if self.neck_len > 0.0 {
            self.head_offset / self.neck_len
        } else {
            HEAD_START_RATIO
        };

        let new_neck = (self.neck_len + delta).clamp(NECK_MIN, NECK_CAP);
        let min_head = if new_neck <= NECK_MIN { NECK_MIN } else { HEAD_OFFSET_MIN };

        self.neck_len = new_neck;
        self.head_offset = (new_neck * ratio).clamp(min_head, new_neck);
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; all randomness flows through this one generator
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Simulated seconds of play; frozen while paused or over
    pub elapsed: f32,
    /// Good leaves eaten
    pub score: u32,
    /// Fractional spawns carried between frames
    pub spawn_accum: f32,
    /// Set when the run ends
    pub game_over_reason: Option<GameOverReason>,
    /// The player actor
    pub giraffe: Giraffe,
    /// Live leaves in insertion order
    pub leaves: Vec<Leaf>,
}

impl GameState {
    /// Create a new session at the title screen with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            elapsed: 0.0,
            score: 0,
            spawn_accum: 0.0,
            game_over_reason: None,
            giraffe: Giraffe::default(),
            leaves: Vec::new(),
        }
    }

    /// Whether the run has ended
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Begin a fresh run after game over.
    ///
    /// Resets actor, leaves, clock and score atomically. The RNG stream keeps
    /// running so a session's whole trajectory (across restarts) stays a
    /// function of the seed.
    pub fn restart(&mut self) {
        self.giraffe = Giraffe::default();
        self.leaves.clear();
        self.elapsed = 0.0;
        self.score = 0;
        self.spawn_accum = 0.0;
        self.game_over_reason = None;
        self.phase = GamePhase::Playing;
    }
}
