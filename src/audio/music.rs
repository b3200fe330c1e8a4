//! Background music: a lo-fi major arpeggio, one bar at a time

/// Tempo in beats per minute
pub const TEMPO_BPM: f64 = 110.0;
/// A3
pub const BASE_FREQUENCY: f32 = 220.0;
/// Semitone offsets cycled through the bar
pub const ARPEGGIO: [i32; 6] = [0, 4, 7, 12, 7, 4];
pub const NOTES_PER_BAR: usize = 8;
/// Peak gain reached 10 ms into each note
pub const ATTACK_SECS: f64 = 0.01;

/// One scheduled note, times relative to the bar start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub start: f64,
    pub frequency: f32,
    /// Envelope has decayed by here
    pub release: f64,
    pub stop: f64,
}

pub fn beat_secs() -> f64 {
    60.0 / TEMPO_BPM
}

pub fn bar_secs() -> f64 {
    beat_secs() * NOTES_PER_BAR as f64
}

/// Equal-tempered frequency `semitones` above `base`
pub fn transpose(base: f32, semitones: i32) -> f32 {
    base * 2f32.powf(semitones as f32 / 12.0)
}

/// Notes of one bar
pub fn bar() -> impl Iterator<Item = Note> {
    let beat = beat_secs();
    (0..NOTES_PER_BAR).map(move |i| {
        let start = i as f64 * beat;
        Note {
            start,
            frequency: transpose(BASE_FREQUENCY, ARPEGGIO[i % ARPEGGIO.len()]),
            release: start + beat * 0.9,
            stop: start + beat,
        }
    })
}
