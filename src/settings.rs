//! Client settings
//!
//! Read from the page query string (`?mute=1&music=0&volume=0.5&seed=42`).
//! Never persisted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master gain (0.0 - 1.0)
    pub master_volume: f32,
    /// Peak gain of a music note
    pub music_volume: f32,
    /// Peak gain of a sound effect
    pub sfx_volume: f32,
    /// Background music loop
    pub music: bool,
    /// Start with audio muted
    pub start_muted: bool,

    // === Simulation ===
    /// Fixed RNG seed (defaults to the clock)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.2,
            music_volume: 0.3,
            sfx_volume: 0.4,
            music: true,
            start_muted: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Build settings from a raw (undecoded) URL query string
    pub fn from_query(query: &str) -> Self {
        Self::from_query_with(query, |raw| Some(raw.to_string()))
    }

    /// Build settings from a URL query string, percent-decoding each key and
    /// value with `decode`. Bad entries are logged and skipped.
    pub fn from_query_with(query: &str, decode: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let (Some(key), Some(value)) = (decode(raw_key), decode(raw_value)) else {
                log::warn!("Ignoring malformed setting {:?}", pair);
                continue;
            };
            if let Err(e) = settings.apply(&key, &value) {
                log::warn!("Ignoring setting: {}", e);
            }
        }
        settings
    }

    /// Apply one `key=value` pair. Unknown keys are ignored.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let invalid = || SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "mute" => self.start_muted = parse_flag(value).ok_or_else(invalid)?,
            "music" => self.music = parse_flag(value).ok_or_else(invalid)?,
            "volume" => {
                let volume: f32 = value.parse().map_err(|_| invalid())?;
                if !volume.is_finite() {
                    return Err(invalid());
                }
                self.master_volume = volume.clamp(0.0, 1.0);
            }
            "seed" => self.seed = Some(value.parse().map_err(|_| invalid())?),
            _ => log::debug!("Unknown setting {}", key),
        }
        Ok(())
    }

    /// Master gain after muting
    pub fn effective_master(&self, muted: bool) -> f32 {
        if muted { 0.0 } else { self.master_volume }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "" | "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_default() {
        assert_eq!(Settings::from_query(""), Settings::default());
        assert_eq!(Settings::from_query("?"), Settings::default());
    }

    #[test]
    fn test_query_parsing() {
        let s = Settings::from_query("?mute=1&music=off&volume=0.5&seed=42&theme=dark");
        assert!(s.start_muted);
        assert!(!s.music);
        assert_eq!(s.master_volume, 0.5);
        assert_eq!(s.seed, Some(42));
    }

    #[test]
    fn test_bare_flag_means_true() {
        assert!(Settings::from_query("mute").start_muted);
    }

    #[test]
    fn test_bad_values_are_skipped() {
        let s = Settings::from_query("volume=loud&seed=-3&mute=maybe");
        assert_eq!(s, Settings::default());

        let mut s = Settings::default();
        assert_eq!(
            s.apply("volume", "NaN"),
            Err(SettingsError::InvalidValue {
                key: "volume".to_string(),
                value: "NaN".to_string(),
            })
        );
        s.apply("volume", "7").unwrap();
        assert_eq!(s.master_volume, 1.0);
    }

    /// Minimal `%XX` decoder standing in for the browser's
    fn decode_hex(raw: &str) -> Option<String> {
        let mut out = Vec::new();
        let mut bytes = raw.bytes();
        while let Some(b) = bytes.next() {
            if b == b'%' {
                let hex = [bytes.next()?, bytes.next()?];
                out.push(u8::from_str_radix(std::str::from_utf8(&hex).ok()?, 16).ok()?);
            } else {
                out.push(b);
            }
        }
        String::from_utf8(out).ok()
    }

    #[test]
    fn test_encoded_query_is_decoded() {
        let s = Settings::from_query_with("?volume=0%2E5&%6Dute=1", decode_hex);
        assert_eq!(s.master_volume, 0.5);
        assert!(s.start_muted);
        // Raw parsing rejects the encoded value
        assert_eq!(Settings::from_query("volume=0%2E5").master_volume, 0.2);
    }

    #[test]
    fn test_undecodable_pair_is_skipped() {
        let s = Settings::from_query_with("volume=%ZZ&seed=9", decode_hex);
        assert_eq!(s.master_volume, 0.2);
        assert_eq!(s.seed, Some(9));
    }

    #[test]
    fn test_effective_master() {
        let s = Settings::default();
        assert_eq!(s.effective_master(false), 0.2);
        assert_eq!(s.effective_master(true), 0.0);
    }
}
