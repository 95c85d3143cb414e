use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::game::types::Difficulty;

/// Player preferences, persisted to settings.ron.
#[derive(Debug, Clone, Resource, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Fixed simulation step in seconds.
    pub dt: f32,
    pub difficulty: Difficulty,
    /// Draw splatters and ground pools.
    pub show_effects: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            difficulty: Difficulty::Easy,
            show_effects: true,
        }
    }
}

impl Settings {
    pub fn data_dir() -> PathBuf {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("ring_brawl")
    }

    pub fn file_path() -> PathBuf {
        Self::data_dir().join("settings.ron")
    }

    /// Load from file, or write out the defaults if there is nothing usable.
    pub fn load_or_default() -> Self {
        let path = Self::file_path();
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match Self::parse(&contents) {
                    Ok(settings) => return settings,
                    Err(e) => warn!("Failed to parse settings.ron: {e}, using defaults"),
                },
                Err(e) => warn!("Failed to read settings.ron: {e}, using defaults"),
            }
        }
        let settings = Self::default();
        settings.save();
        settings
    }

    /// Parse settings text. A non-positive or non-finite step falls back to the default.
    pub fn parse(contents: &str) -> Result<Self, ron::error::SpannedError> {
        let mut settings: Self = ron::from_str(contents)?;
        if !settings.dt.is_finite() || settings.dt <= 0.0 {
            warn!("Ignoring invalid dt {} in settings.ron", settings.dt);
            settings.dt = Self::default().dt;
        }
        Ok(settings)
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    pub fn save(&self) {
        let path = Self::file_path();
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Failed to create {}: {e}", parent.display());
            }
        }
        match self.to_ron() {
            Ok(s) => {
                if let Err(e) = std::fs::write(&path, s) {
                    warn!("Failed to write settings.ron: {e}");
                }
            }
            Err(e) => warn!("Failed to serialize settings: {e}"),
        }
    }

    /// Reload from file (F5).
    pub fn reload(&mut self) {
        *self = Self::load_or_default();
        info!("Settings reloaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_settings_read_back() {
        let settings = Settings {
            dt: 1.0 / 120.0,
            difficulty: Difficulty::Hard,
            show_effects: false,
        };
        let text = settings.to_ron().unwrap();
        assert_eq!(Settings::parse(&text).unwrap(), settings);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings = Settings::parse("(difficulty: Medium)").unwrap();
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.dt, 1.0 / 60.0);
        assert!(settings.show_effects);
    }

    #[test]
    fn bad_step_is_replaced() {
        let settings = Settings::parse("(dt: 0.0)").unwrap();
        assert_eq!(settings.dt, Settings::default().dt);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(Settings::parse("not ron at all {").is_err());
    }
}
