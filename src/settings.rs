//! Game settings and preferences
//!
//! Persisted as a JSON file next to the executable. A missing or corrupt
//! file falls back to defaults; the game never refuses to start over
//! preferences.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === HUD ===
    /// Log the periodic ups/fps averages
    pub show_fps: bool,

    // === Audio (consumed by platform audio sinks; the headless sink
    // ignores them) ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Simulation ===
    /// Fixed RNG seed for hyperspace jumps; `None` seeds from the clock
    pub rng_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: true,

            master_volume: 0.8,
            sfx_volume: 1.0,

            rng_seed: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, defaulting on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("ignoring malformed settings file {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as JSON; failure is logged, never fatal
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("could not save settings to {}: {e}", path.display());
                } else {
                    log::info!("settings saved to {}", path.display());
                }
            }
            Err(e) => log::warn!("could not serialize settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/starwell.json"));
        assert!(settings.show_fps);
        assert_eq!(settings.rng_seed, None);
    }

    #[test]
    fn test_malformed_json_defaults() {
        let path = std::env::temp_dir().join("starwell_settings_bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let settings = Settings::load(&path);
        assert_eq!(settings.master_volume, Settings::default().master_volume);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let path = std::env::temp_dir().join("starwell_settings_rt.json");
        let mut settings = Settings::default();
        settings.show_fps = false;
        settings.rng_seed = Some(42);
        settings.save(&path);

        let loaded = Settings::load(&path);
        assert!(!loaded.show_fps);
        assert_eq!(loaded.rng_seed, Some(42));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        // Old or hand-edited files may omit newer fields
        let path = std::env::temp_dir().join("starwell_settings_partial.json");
        std::fs::write(&path, r#"{"show_fps": false}"#).unwrap();
        let settings = Settings::load(&path);
        assert!(!settings.show_fps);
        assert_eq!(settings.sfx_volume, 1.0);
        std::fs::remove_file(&path).ok();
    }
}
