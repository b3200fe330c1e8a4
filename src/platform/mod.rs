//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys and on-screen buttons)
//! - Time (display-frame step gate)
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Install prompt and offline service worker (web only)

pub mod input;
pub mod install;
#[cfg(target_arch = "wasm32")]
pub mod offline;
pub mod storage;
pub mod time;

pub use input::{InputAction, map_button, map_key};
pub use install::InstallFlow;
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use time::StepClock;
