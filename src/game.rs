//! Scheduling loop owner
//!
//! `Game` holds everything the frame callback mutates: the simulation, the
//! step gate, pause/mute flags and the best-score store. The browser shell
//! forwards input and animation-frame timestamps; nothing else touches state.

use crate::persistence::BestScoreStore;
use crate::platform::input::InputAction;
use crate::platform::storage::KeyValueStore;
use crate::platform::time::StepClock;
use crate::sim::{GameEvent, GameState, GridSize};
use crate::tuning::Tuning;

/// Result of a pause/mute toggle, for updating button labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlChange {
    Paused(bool),
    Muted(bool),
}

pub struct Game<S> {
    pub state: GameState,
    clock: StepClock,
    paused: bool,
    muted: bool,
    best: BestScoreStore<S>,
}

impl<S: KeyValueStore> Game<S> {
    pub fn new(seed: u64, grid: GridSize, tuning: Tuning, store: S) -> Self {
        let mut best = BestScoreStore::new(store);
        let mut state = GameState::with_config(seed, grid, tuning);
        state.best = best.load();
        log::info!("Game initialized with seed: {}", state.seed);
        Self {
            state,
            clock: StepClock::new(),
            paused: false,
            muted: false,
            best,
        }
    }

    /// Apply one input action
    pub fn handle(&mut self, action: InputAction) -> Option<ControlChange> {
        match action {
            InputAction::Steer(dir) => {
                self.state.steer(dir);
                None
            }
            InputAction::TogglePause => {
                self.paused = !self.paused;
                log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
                Some(ControlChange::Paused(self.paused))
            }
            InputAction::ToggleMute => {
                self.muted = !self.muted;
                Some(ControlChange::Muted(self.muted))
            }
        }
    }

    /// Pause without toggling (tab hidden, window blur)
    pub fn pause(&mut self) -> Option<ControlChange> {
        if self.paused {
            return None;
        }
        self.paused = true;
        Some(ControlChange::Paused(true))
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Called once per display frame. Runs at most one step.
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        if self.paused || !self.clock.ready(now_ms, self.state.speed) {
            return Vec::new();
        }
        let events = self.state.advance();
        if events.iter().any(|e| matches!(e, GameEvent::NewBest(_))) {
            self.best.save(self.state.best);
        }
        events
    }

    /// Start a new life (best score is kept)
    pub fn restart(&mut self) {
        self.state.reset();
        log::info!("Game restarted");
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn best_store(&self) -> &BestScoreStore<S> {
        &self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BEST_SCORE_KEY, GRID};
    use crate::platform::storage::MemoryStore;
    use crate::sim::{Cell, Direction};

    fn quiet_game(store: MemoryStore) -> Game<MemoryStore> {
        let mut game = Game::new(11, GRID, Tuning::default(), store);
        game.state.obstacles.clear();
        game.state.food = Cell::new(0, 0);
        game
    }

    fn stored_best(game: &Game<MemoryStore>) -> Option<String> {
        game.best_store().store().get(BEST_SCORE_KEY).unwrap()
    }

    #[test]
    fn test_loads_best_on_start() {
        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, "340").unwrap();
        let game = Game::new(1, GRID, Tuning::default(), store);
        assert_eq!(game.state.best, 340);
    }

    #[test]
    fn test_new_best_is_persisted() {
        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, "100").unwrap();
        let mut game = quiet_game(store);
        game.state.score = 120;
        assert_eq!(game.state.best, 100);

        let events = game.frame(1000.0);
        assert!(events.contains(&GameEvent::NewBest(120)));
        assert_eq!(game.state.best, 120);
        assert_eq!(stored_best(&game).as_deref(), Some("120"));
    }

    #[test]
    fn test_frame_gates_on_speed() {
        let mut game = quiet_game(MemoryStore::new());
        let start = game.state.head();
        game.frame(1000.0);
        assert_eq!(game.state.head(), start.step(Direction::Right));
        // 16 ms later is too soon at 7 steps/s
        game.frame(1016.0);
        assert_eq!(game.state.head(), start.step(Direction::Right));
        game.frame(1150.0);
        assert_eq!(game.state.steps, 2);
    }

    #[test]
    fn test_pause_freezes_state() {
        let mut game = quiet_game(MemoryStore::new());
        assert_eq!(
            game.handle(InputAction::TogglePause),
            Some(ControlChange::Paused(true))
        );
        let head = game.state.head();
        for t in 1..20 {
            assert!(game.frame(t as f64 * 1000.0).is_empty());
        }
        assert_eq!(game.state.head(), head);
        assert_eq!(game.state.steps, 0);

        assert_eq!(
            game.handle(InputAction::TogglePause),
            Some(ControlChange::Paused(false))
        );
        game.frame(30_000.0);
        assert_eq!(game.state.steps, 1);
    }

    #[test]
    fn test_auto_pause_is_idempotent() {
        let mut game = quiet_game(MemoryStore::new());
        assert_eq!(game.pause(), Some(ControlChange::Paused(true)));
        assert_eq!(game.pause(), None);
        assert!(game.is_paused());
    }

    #[test]
    fn test_steer_and_mute() {
        let mut game = quiet_game(MemoryStore::new());
        assert_eq!(game.handle(InputAction::Steer(Direction::Up)), None);
        assert_eq!(game.state.pending_direction, Some(Direction::Up));
        assert_eq!(
            game.handle(InputAction::ToggleMute),
            Some(ControlChange::Muted(true))
        );
        assert!(game.is_muted());
        // Muting doesn't stop the game
        game.frame(1000.0);
        assert_eq!(game.state.direction, Direction::Up);
    }

    #[test]
    fn test_shrinking_speed_override_keeps_game_running() {
        let tuning = Tuning::resolve(Some(r#"{"speed_step": -10}"#), &GRID);
        let mut game = Game::new(11, GRID, tuning, MemoryStore::new());
        game.state.obstacles.clear();
        game.state.food = game.state.head().step(Direction::Right);

        let events = game.frame(1000.0);
        assert!(matches!(events.first(), Some(GameEvent::Ate { .. })));
        assert!(game.state.speed > 0.0);

        // A few seconds of 60 fps frames keep producing steps
        for i in 1..=180 {
            game.frame(1000.0 + i as f64 * 1000.0 / 60.0);
        }
        assert!(game.state.steps > 1);
    }

    #[test]
    fn test_seed_is_recorded() {
        let game = quiet_game(MemoryStore::new());
        assert_eq!(game.state.seed, 11);
    }

    #[test]
    fn test_restart_keeps_best() {
        let mut game = quiet_game(MemoryStore::new());
        game.state.score = 70;
        game.frame(1000.0);
        game.restart();
        assert_eq!(game.state.score, 0);
        assert_eq!(game.state.best, 70);
        assert_eq!(stored_best(&game).as_deref(), Some("70"));
    }
}
