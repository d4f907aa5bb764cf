//! Client settings loaded from `assets/locomotion.ron`
//!
//! Every section and field is optional; anything missing keeps its default.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use locomotion::LocomotionConfig;
use serde::{Deserialize, Serialize};

/// File name looked up inside the asset directory
pub const SETTINGS_FILE: &str = "locomotion.ron";

/// Env var that overrides the settings path
pub const SETTINGS_PATH_ENV: &str = "LOCOMOTION_SETTINGS";

/// Keyboard axis smoothing and pointer scaling
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputTuning {
    /// How fast a held key ramps its axis toward ±1 (units/s)
    pub axis_sensitivity: f32,
    /// How fast a released axis falls back to 0 (units/s)
    pub axis_gravity: f32,
    /// Jump straight to 0 when the opposite key is pressed
    pub axis_snap: bool,
    /// Mouse pixels -> look units
    pub pointer_scale: f32,
}

impl Default for InputTuning {
    fn default() -> Self {
        Self {
            axis_sensitivity: 3.0,
            axis_gravity: 3.0,
            axis_snap: true,
            pointer_scale: 0.1,
        }
    }
}

/// Character capsule, sweep parameters and spawn pose
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSettings {
    /// Total capsule height
    pub height: f32,
    pub radius: f32,
    /// Camera height above the feet
    pub eye_height: f32,
    /// Tallest ledge the sweep climbs without jumping
    pub step_offset: f32,
    /// Steepest walkable slope in degrees
    pub slope_limit: f32,
    /// Gap kept between the capsule and obstacles
    pub skin_width: f32,
    /// Capsule center at spawn
    pub spawn_position: [f32; 3],
    /// Initial camera pitch/yaw in degrees
    pub initial_pitch: f32,
    pub initial_yaw: f32,
}

impl Default for CharacterSettings {
    fn default() -> Self {
        Self {
            height: 2.0,
            radius: 0.5,
            eye_height: 1.7,
            step_offset: 0.3,
            slope_limit: 45.0,
            skin_width: 0.08,
            spawn_position: [0.0, 3.0, 0.0],
            initial_pitch: 0.0,
            initial_yaw: 0.0,
        }
    }
}

impl CharacterSettings {
    /// Half length of the capsule's cylindrical section
    pub fn half_segment(&self) -> f32 {
        (self.height * 0.5 - self.radius).max(0.0)
    }

    /// Camera offset from the capsule center
    pub fn eye_offset(&self) -> f32 {
        self.eye_height - self.height * 0.5
    }
}

/// Everything the client reads from the settings file
#[derive(Resource, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub locomotion: LocomotionConfig,
    pub input: InputTuning,
    pub character: CharacterSettings,
}

impl ClientSettings {
    /// Parse settings from RON text and validate them
    pub fn from_ron(text: &str) -> Result<Self, String> {
        let settings: ClientSettings =
            ron::from_str(text).map_err(|e| format!("Failed to parse settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from disk
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_ron(&text).map_err(|e| format!("{}: {}", path.display(), e))
    }

    /// Load settings, falling back to defaults (with a warning) on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                info!("Loaded locomotion settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("{}; using default locomotion settings", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.locomotion
            .validate()
            .map_err(|e| format!("locomotion.{}", e))?;

        let input = &self.input;
        for (name, value) in [
            ("axis_sensitivity", input.axis_sensitivity),
            ("axis_gravity", input.axis_gravity),
            ("pointer_scale", input.pointer_scale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("input.{name} must be a finite, non-negative number (got {value})"));
            }
        }

        let ch = &self.character;
        for (name, value) in [("height", ch.height), ("radius", ch.radius)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("character.{name} must be positive (got {value})"));
            }
        }
        if ch.radius * 2.0 > ch.height {
            return Err(format!(
                "character.radius ({}) is too large for height ({})",
                ch.radius, ch.height
            ));
        }
        for (name, value) in [
            ("step_offset", ch.step_offset),
            ("skin_width", ch.skin_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("character.{name} must not be negative (got {value})"));
            }
        }
        if !(0.0..90.0).contains(&ch.slope_limit) {
            return Err(format!(
                "character.slope_limit must be within [0, 90) degrees (got {})",
                ch.slope_limit
            ));
        }

        Ok(())
    }
}

/// Where to read settings from: `$LOCOMOTION_SETTINGS`, else `<assets>/locomotion.ron`
pub fn settings_path(asset_dir: &str) -> PathBuf {
    match std::env::var(SETTINGS_PATH_ENV) {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => Path::new(asset_dir).join(SETTINGS_FILE),
    }
}

/// Path the settings were loaded from (used for hot reload)
#[derive(Resource, Clone, Debug)]
pub struct SettingsPath(pub PathBuf);

/// Request to re-read the settings file and apply it
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ReloadSettings;

/// Outcome of the most recent reload
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub enum ReloadStatus {
    #[default]
    NotReloaded,
    Applied,
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = ClientSettings::from_ron("()").unwrap();
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let text = r#"(
            locomotion: (move_speed: 6.5),
            character: (eye_height: 1.6),
        )"#;
        let settings = ClientSettings::from_ron(text).unwrap();
        assert_eq!(settings.locomotion.move_speed, 6.5);
        assert_eq!(settings.locomotion.max_head_turn, 90.0);
        assert_eq!(settings.character.eye_height, 1.6);
        assert_eq!(settings.character.radius, 0.5);
        assert_eq!(settings.input, InputTuning::default());
    }

    #[test]
    fn invalid_values_are_reported_with_section() {
        let err = ClientSettings::from_ron("(locomotion: (body_turn_speed: -10.0))").unwrap_err();
        assert!(err.contains("locomotion.body_turn_speed"), "{err}");

        let err = ClientSettings::from_ron("(character: (radius: 2.0))").unwrap_err();
        assert!(err.contains("character.radius"), "{err}");

        let err = ClientSettings::from_ron("(character: (slope_limit: 90.0))").unwrap_err();
        assert!(err.contains("slope_limit"), "{err}");
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = ClientSettings::from_ron("(locomotion: ").unwrap_err();
        assert!(err.starts_with("Failed to parse settings"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = Path::new("definitely/not/here/locomotion.ron");
        assert!(ClientSettings::load(path).is_err());
        assert_eq!(ClientSettings::load_or_default(path), ClientSettings::default());
    }

    #[test]
    fn shipped_settings_file_is_valid() {
        let text = include_str!("../assets/locomotion.ron");
        assert!(ClientSettings::from_ron(text).is_ok());
    }

    #[test]
    fn capsule_geometry() {
        let ch = CharacterSettings::default();
        assert_eq!(ch.half_segment(), 0.5);
        assert!((ch.eye_offset() - 0.7).abs() < 1e-6);
    }
}
