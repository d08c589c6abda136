//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (leaves kept in insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod ramp;
pub mod state;
pub mod tick;

pub use collision::circle_rect_overlap;
pub use ramp::Rates;
pub use state::{GameOverReason, GamePhase, GameState, Giraffe, Leaf};
pub use tick::{TickInput, tick};
