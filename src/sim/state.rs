//! Game state and core simulation types
//!
//! A single `GameState` owns every mutable field of a running game; the
//! scheduling loop owns the `GameState`.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction, GridSize};
use super::placement::{Occupancy, place};
use crate::consts::GRID;
use crate::tuning::Tuning;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Bonus points
    Star,
    /// Temporary speed boost
    Coffee,
    /// Temporary invulnerability (ghost)
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Star, PowerUpKind::Coffee, PowerUpKind::Shield];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Star => "star",
            PowerUpKind::Coffee => "coffee",
            PowerUpKind::Shield => "shield",
        }
    }
}

/// A power-up waiting on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    pub cell: Cell,
    pub kind: PowerUpKind,
    /// Steps left before it disappears unconsumed
    pub lifetime: u32,
}

/// What ended a life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    Obstacle,
    SelfCollision,
}

/// Things that happened during one step (consumed by audio and persistence)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Ate { cell: Cell },
    PowerUpSpawned { kind: PowerUpKind, cell: Cell },
    PowerUpCollected(PowerUpKind),
    PowerUpExpired,
    BoostEnded,
    Crashed(CrashCause),
    NewBest(u64),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: GridSize,
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Body, head first. Never empty.
    pub snake: VecDeque<Cell>,
    pub direction: Direction,
    /// Most recent steering request, consumed by the next step
    pub pending_direction: Option<Direction>,
    /// Fixed for the life; replaced on reset
    pub obstacles: Vec<Cell>,
    pub food: Cell,
    pub power_up: Option<PowerUp>,
    /// Steps of invulnerability left
    pub ghost: u32,
    /// Steps of coffee boost left
    pub boost_remaining: u32,
    pub score: u64,
    /// Best score across lives (survives reset)
    pub best: u64,
    /// Current steps per second
    pub speed: f32,
    /// Speed the ramp has reached; `speed` returns here when a boost ends
    pub base_speed: f32,
    /// Steps taken in the current life
    pub steps: u64,
}

impl GameState {
    /// Create a new game on the default grid with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, GRID, Tuning::default())
    }

    pub fn with_config(seed: u64, grid: GridSize, tuning: Tuning) -> Self {
        let center = grid.center();
        let mut state = Self {
            grid,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            snake: VecDeque::from([center]),
            direction: Direction::Right,
            pending_direction: None,
            obstacles: Vec::new(),
            food: center,
            power_up: None,
            ghost: 0,
            boost_remaining: 0,
            score: 0,
            best: 0,
            speed: tuning.start_speed,
            base_speed: tuning.start_speed,
            steps: 0,
            tuning,
        };
        state.reset();
        state
    }

    /// Start a new life. Keeps `best`, the grid, tuning and the RNG stream.
    pub fn reset(&mut self) {
        self.snake.clear();
        self.snake.push_back(self.grid.center());
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.score = 0;
        self.speed = self.tuning.start_speed;
        self.base_speed = self.tuning.start_speed;
        self.obstacles.clear();
        self.ghost = 0;
        self.boost_remaining = 0;
        self.power_up = None;
        self.steps = 0;

        // Food first so obstacles can avoid it
        self.relocate_food();
        self.place_obstacles(self.tuning.obstacle_count);

        log::debug!(
            "New life: {} obstacles, food at ({}, {})",
            self.obstacles.len(),
            self.food.x,
            self.food.y
        );
    }

    /// Overwrite the pending steering request
    pub fn steer(&mut self, dir: Direction) {
        self.pending_direction = Some(dir);
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn is_ghost(&self) -> bool {
        self.ghost > 0
    }

    pub fn is_boosted(&self) -> bool {
        self.boost_remaining > 0
    }

    /// True if `cell` is on the snake body or an obstacle
    pub fn is_occupied(&self, cell: Cell) -> bool {
        Occupancy::new(&self.snake, &self.obstacles).hits_body_or_obstacle(cell)
    }

    /// Move the food to a free cell. Stays put if the board is full.
    pub(crate) fn relocate_food(&mut self) {
        let extra: Vec<Cell> = self.power_up.iter().map(|p| p.cell).collect();
        let occupancy = Occupancy::new(&self.snake, &self.obstacles).with_extra(&extra);
        match place(
            &mut self.rng,
            self.grid,
            &occupancy,
            self.tuning.placement_attempts,
        ) {
            Some(cell) => self.food = cell,
            None => log::warn!("No free cell for food; leaving it in place"),
        }
    }

    fn place_obstacles(&mut self, count: u32) {
        for placed in 0..count {
            let food = [self.food];
            let occupancy = Occupancy::new(&self.snake, &self.obstacles).with_extra(&food);
            match place(
                &mut self.rng,
                self.grid,
                &occupancy,
                self.tuning.placement_attempts,
            ) {
                Some(cell) => self.obstacles.push(cell),
                None => {
                    log::warn!("Placed only {} of {} obstacles", placed, count);
                    break;
                }
            }
        }
    }

    /// Roll for a power-up after eating; returns the spawned one
    pub(crate) fn maybe_spawn_power_up(&mut self) -> Option<PowerUp> {
        if self.power_up.is_some() {
            return None;
        }
        let chance = self.tuning.power_up_chance.clamp(0.0, 1.0);
        if !self.rng.random_bool(chance) {
            return None;
        }
        let food = [self.food];
        let occupancy = Occupancy::new(&self.snake, &self.obstacles).with_extra(&food);
        let cell = place(
            &mut self.rng,
            self.grid,
            &occupancy,
            self.tuning.placement_attempts,
        )?;
        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        let power_up = PowerUp {
            cell,
            kind,
            lifetime: self.tuning.power_up_lifetime,
        };
        self.power_up = Some(power_up);
        Some(power_up)
    }
}
