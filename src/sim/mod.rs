//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per `advance`, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (snake head-first, obstacles in placement order)
//! - No rendering or platform dependencies

pub mod grid;
pub mod placement;
pub mod state;
pub mod tick;

pub use grid::{Cell, Direction, GridSize};
pub use placement::{Occupancy, place};
pub use state::{CrashCause, GameEvent, GameState, PowerUp, PowerUpKind};
pub use tick::advance;
