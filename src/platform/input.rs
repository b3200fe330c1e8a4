//! Input mapping
//!
//! Keys and buttons become edge-triggered actions; steering only fills the
//! pending-direction slot and is committed by the next step.

use crate::sim::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Steer(Direction),
    TogglePause,
    ToggleMute,
}

/// Map a `KeyboardEvent.key` value (case-insensitive)
pub fn map_key(key: &str) -> Option<InputAction> {
    let action = match key.to_lowercase().as_str() {
        "arrowup" | "w" => InputAction::Steer(Direction::Up),
        "arrowdown" | "s" => InputAction::Steer(Direction::Down),
        "arrowleft" | "a" => InputAction::Steer(Direction::Left),
        "arrowright" | "d" => InputAction::Steer(Direction::Right),
        "p" => InputAction::TogglePause,
        "m" => InputAction::ToggleMute,
        _ => return None,
    };
    Some(action)
}

/// Element ids of the on-screen controls
pub const BUTTON_IDS: [&str; 6] = [
    "pauseBtn",
    "muteBtn",
    "btn-up",
    "btn-down",
    "btn-left",
    "btn-right",
];

/// Map an on-screen button id
pub fn map_button(id: &str) -> Option<InputAction> {
    match id {
        "pauseBtn" => Some(InputAction::TogglePause),
        "muteBtn" => Some(InputAction::ToggleMute),
        "btn-up" => Some(InputAction::Steer(Direction::Up)),
        "btn-down" => Some(InputAction::Steer(Direction::Down)),
        "btn-left" => Some(InputAction::Steer(Direction::Left)),
        "btn-right" => Some(InputAction::Steer(Direction::Right)),
        _ => None,
    }
}
