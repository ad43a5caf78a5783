//! Game settings and preferences
//!
//! Persisted as JSON next to the best score. Every field has a default, so a
//! partial file only overrides what it names.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, TICKS_PER_SECOND};
use crate::error::SettingsError;
use crate::sim::WorldConfig;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// World geometry and physics
    pub world: WorldConfig,

    // === Scheduling ===
    /// Ticks per wall-clock second (0 = run unthrottled)
    pub ticks_per_second: u32,
    /// Most ticks a single host frame may run
    pub max_substeps: u32,

    // === Session ===
    /// Fixed obstacle seed; random when unset
    pub seed: Option<u64>,
    /// Let the autopilot play
    pub autopilot: bool,
    /// Where the best score lives (default: user config dir)
    pub high_score_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),

            ticks_per_second: TICKS_PER_SECOND,
            max_substeps: MAX_SUBSTEPS,

            seed: None,
            autopilot: false,
            high_score_path: None,
        }
    }
}

impl Settings {
    /// File name inside the config dir
    const FILE_NAME: &'static str = "settings.json";

    /// `<config dir>/settings.json`
    pub fn default_path() -> PathBuf {
        crate::highscores::config_dir().join(Self::FILE_NAME)
    }

    /// Load settings from `path`. A missing file yields defaults; a present
    /// but malformed one, or one with an unplayable world, is an error.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings = Self::from_json(&json).map_err(|e| match e {
            SettingsError::Json { source, .. } => SettingsError::Json {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json).map_err(|source| SettingsError::Json {
            path: PathBuf::new(),
            source,
        })?;
        settings.world.validate()?;
        Ok(settings)
    }

    /// Save settings as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// True when ticks should be paced against the wall clock
    pub fn is_throttled(&self) -> bool {
        self.ticks_per_second > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "world": { "gap": 180.0 } }"#)
            .expect("valid settings");
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.world.gap, 180.0);
        assert_eq!(settings.world.world_width, 400.0);
        assert_eq!(settings.ticks_per_second, 60);
        assert!(!settings.autopilot);
    }

    #[test]
    fn test_unplayable_world_rejected() {
        let err = Settings::from_json(r#"{ "world": { "gap": 580.0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Config(_)));
    }

    #[test]
    fn test_overflowing_or_oversized_world_rejected() {
        let err = Settings::from_json(r#"{ "world": { "world_height": 1e39 } }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(crate::ConfigError::NonFinite { .. })
        ));

        let err = Settings::from_json(r#"{ "world": { "body_height": 700.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Config(crate::ConfigError::BodyTooTall { .. })
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SettingsError::Json { .. }));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("skyflap-definitely-missing").join("settings.json");
        let settings = Settings::load(&path).expect("defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("skyflap-settings-{}", std::process::id()));
        let path = dir.join("settings.json");
        let settings = Settings {
            seed: Some(99),
            autopilot: true,
            ticks_per_second: 0,
            ..Default::default()
        };
        settings.save(&path).expect("save");
        let loaded = Settings::load(&path).expect("load");
        assert_eq!(loaded, settings);
        assert!(!loaded.is_throttled());
        let _ = fs::remove_dir_all(dir);
    }
}
