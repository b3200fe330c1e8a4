//! Discrete simulation step
//!
//! One call to `advance` moves the snake exactly one cell and resolves
//! collisions, food, power-ups and timers for that move.

use super::grid::Cell;
use super::state::{CrashCause, GameEvent, GameState, PowerUpKind};

/// Advance the game state by one step
pub fn advance(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Steering: a reversal request is dropped, never queued
    if let Some(next) = state.pending_direction.take()
        && !next.is_opposite(state.direction)
    {
        state.direction = next;
    }

    let head = state.grid.wrap(state.head().step(state.direction));

    if !state.is_ghost()
        && let Some(cause) = collision(state, head)
    {
        log::info!(
            "Crashed ({:?}) after {} steps with score {}",
            cause,
            state.steps,
            state.score
        );
        events.push(GameEvent::Crashed(cause));
        state.reset();
        return events;
    }

    state.steps += 1;
    state.snake.push_front(head);

    if head == state.food {
        state.score += state.tuning.food_score;
        events.push(GameEvent::Ate { cell: head });
        state.relocate_food();
        if let Some(power_up) = state.maybe_spawn_power_up() {
            log::debug!("Spawned {} at {:?}", power_up.kind.as_str(), power_up.cell);
            events.push(GameEvent::PowerUpSpawned {
                kind: power_up.kind,
                cell: power_up.cell,
            });
        }
        // Difficulty ramp; eating also ends any boost
        state.base_speed =
            (state.base_speed + state.tuning.speed_step).min(state.tuning.max_base_speed);
        state.speed = state.base_speed;
        state.boost_remaining = 0;
    } else {
        state.snake.pop_back();
    }

    // Timers set this step start counting next step
    let mut ghost_started = false;
    let mut boost_started = false;
    if let Some(power_up) = state.power_up.filter(|p| p.cell == head) {
        state.power_up = None;
        match power_up.kind {
            PowerUpKind::Star => state.score += state.tuning.star_score,
            PowerUpKind::Coffee => {
                state.speed =
                    (state.base_speed + state.tuning.boost_bonus).min(state.tuning.max_boost_speed);
                state.boost_remaining = state.tuning.boost_steps;
                boost_started = true;
            }
            PowerUpKind::Shield => {
                state.ghost = state.tuning.ghost_steps;
                ghost_started = true;
            }
        }
        log::info!("Collected {}", power_up.kind.as_str());
        events.push(GameEvent::PowerUpCollected(power_up.kind));
    }

    if !ghost_started && state.ghost > 0 {
        state.ghost -= 1;
    }
    if !boost_started && state.boost_remaining > 0 {
        state.boost_remaining -= 1;
        if state.boost_remaining == 0 {
            state.speed = state.base_speed;
            events.push(GameEvent::BoostEnded);
        }
    }
    if let Some(power_up) = state.power_up.as_mut() {
        power_up.lifetime = power_up.lifetime.saturating_sub(1);
        if power_up.lifetime == 0 {
            state.power_up = None;
            events.push(GameEvent::PowerUpExpired);
        }
    }

    if state.score > state.best {
        state.best = state.score;
        events.push(GameEvent::NewBest(state.best));
    }

    log::trace!(
        "Step {}: head {:?}, len {}, speed {:.1}",
        state.steps,
        head,
        state.snake.len(),
        state.speed
    );
    events
}

/// Fatal collision for a head about to enter `head`, checked against the
/// body before it moves
fn collision(state: &GameState, head: Cell) -> Option<CrashCause> {
    if state.obstacles.contains(&head) {
        return Some(CrashCause::Obstacle);
    }
    // The nearest segments can't be reached by a legal turn
    let hits_body = state
        .snake
        .iter()
        .skip(state.tuning.self_collision_grace)
        .any(|&cell| cell == head);
    hits_body.then_some(CrashCause::SelfCollision)
}

impl GameState {
    /// Advance by one step; see [`advance`]
    pub fn advance(&mut self) -> Vec<GameEvent> {
        advance(self)
    }
}
