//! Friends Snake - an offline-capable arcade snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, scoring)
//! - `game`: Scheduling loop owner (step gate, pause/mute, best score)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Best score storage
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{ControlChange, Game};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    use crate::sim::GridSize;

    /// Size of one grid cell in canvas pixels
    pub const CELL_SIZE: u32 = 24;
    /// Grid dimensions (600 x 408 canvas)
    pub const COLS: i32 = 25;
    pub const ROWS: i32 = 17;
    pub const GRID: GridSize = GridSize::new(COLS, ROWS);

    pub const CANVAS_WIDTH: u32 = COLS as u32 * CELL_SIZE;
    pub const CANVAS_HEIGHT: u32 = ROWS as u32 * CELL_SIZE;

    /// LocalStorage key for the best score
    pub const BEST_SCORE_KEY: &str = "friends-snake-best";
}
