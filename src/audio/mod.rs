//! Audio
//!
//! Procedurally generated tones - no external files needed. The tone and
//! music descriptions are plain data; `web` plays them with Web Audio.
//! Audio never reads or writes game state.

pub mod music;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::{GameEvent, PowerUpKind};

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Triangle,
    Square,
}

/// A single enveloped tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    /// Seconds until the tone has decayed and stops
    pub duration: f64,
    pub waveform: Waveform,
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Fatal collision
    Crash,
    /// Food eaten
    Eat,
    Star,
    Coffee,
    Shield,
}

impl SoundEffect {
    pub fn tone(self) -> Tone {
        let (frequency, duration) = match self {
            SoundEffect::Crash => (120.0, 0.2),
            SoundEffect::Eat => (880.0, 0.07),
            SoundEffect::Star => (1200.0, 0.1),
            SoundEffect::Coffee => (660.0, 0.1),
            SoundEffect::Shield => (520.0, 0.12),
        };
        Tone {
            frequency,
            duration,
            waveform: Waveform::Triangle,
        }
    }

    /// The effect a game event should trigger, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Crashed(_) => Some(SoundEffect::Crash),
            GameEvent::Ate { .. } => Some(SoundEffect::Eat),
            GameEvent::PowerUpCollected(kind) => Some(match kind {
                PowerUpKind::Star => SoundEffect::Star,
                PowerUpKind::Coffee => SoundEffect::Coffee,
                PowerUpKind::Shield => SoundEffect::Shield,
            }),
            _ => None,
        }
    }
}
