//! Game settings and preferences
//!
//! Persisted as JSON next to the leaderboard, separately from any game.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TICK_RATE;
use crate::error::StoreError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Snake moves per second
    pub tick_rate: f64,
    /// Play eat/game-over cues
    pub sound_on: bool,
    /// Name recorded on the leaderboard
    pub username: String,
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            sound_on: true,
            username: "player".to_string(),
            seed: None,
        }
    }
}

impl Settings {
    /// Tick rate actually used by the clock (invalid values fall back)
    pub fn effective_tick_rate(&self) -> f64 {
        if self.tick_rate.is_finite() && self.tick_rate > 0.0 {
            self.tick_rate
        } else {
            DEFAULT_TICK_RATE
        }
    }

    /// Milliseconds between simulation ticks
    pub fn tick_interval_ms(&self) -> f64 {
        1000.0 / self.effective_tick_rate()
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tick_rate, 2.0);
        assert_eq!(settings.tick_interval_ms(), 500.0);
        assert!(settings.sound_on);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"tick_rate": 4.0}"#).unwrap();
        assert_eq!(settings.tick_interval_ms(), 250.0);
        assert_eq!(settings.username, "player");
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_invalid_rate_falls_back() {
        let settings = Settings {
            tick_rate: -3.0,
            ..Default::default()
        };
        assert_eq!(settings.effective_tick_rate(), DEFAULT_TICK_RATE);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            tick_rate: 3.0,
            sound_on: false,
            username: "ada".to_string(),
            seed: Some(7),
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }
}
