use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use vault_core::draw::{Rgba, WHITE};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GameConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_display_width")]
    pub display_width: u32,
    #[serde(default = "default_display_height")]
    pub display_height: u32,
    #[serde(default = "default_framerate")]
    pub framerate: u32,
    /// How long the victory screen stays up before play restarts.
    #[serde(default = "default_win_hold_secs")]
    pub win_hold_secs: f32,
    #[serde(default = "default_background")]
    pub background: Rgba,
}

impl GameConfig {
    /// Saturates instead of panicking; `validate_config` rejects values that
    /// would need it.
    pub fn win_hold(&self) -> Duration {
        Duration::try_from_secs_f32(self.win_hold_secs).unwrap_or(Duration::MAX)
    }

    pub fn display_size(&self) -> Vec2 {
        Vec2::new(self.display_width as f32, self.display_height as f32)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            title: default_title(),
            display_width: default_display_width(),
            display_height: default_display_height(),
            framerate: default_framerate(),
            win_hold_secs: default_win_hold_secs(),
            background: default_background(),
        }
    }
}

pub fn load_config_from_path(config_path: &Path) -> Result<GameConfig, String> {
    let raw = fs::read_to_string(config_path)
        .map_err(|e| format!("Failed to read config file {}: {e}", config_path.display()))?;
    parse_config(&raw, config_path)
}

/// A missing file falls back to defaults; anything else wrong with it is fatal.
pub fn load_or_default(config_path: &Path) -> Result<GameConfig, String> {
    let exists = config_path
        .try_exists()
        .map_err(|e| format!("Failed to read config file {}: {e}", config_path.display()))?;
    if !exists {
        log::warn!(
            "Config file {} not found, using defaults",
            config_path.display()
        );
        return Ok(GameConfig::default());
    }
    load_config_from_path(config_path)
}

fn parse_config(raw: &str, config_path: &Path) -> Result<GameConfig, String> {
    let config: GameConfig = serde_json::from_str(raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", config_path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.display_width == 0 || config.display_height == 0 {
        return Err(format!(
            "Config validation failed: display size {}x{} must be non-zero",
            config.display_width, config.display_height
        ));
    }
    if config.framerate == 0 {
        return Err("Config validation failed: framerate must be > 0".to_string());
    }
    if let Err(e) = Duration::try_from_secs_f32(config.win_hold_secs) {
        return Err(format!(
            "Config validation failed: win_hold_secs {} is not a usable duration: {e}",
            config.win_hold_secs
        ));
    }
    if let Some(component) = config
        .background
        .iter()
        .find(|c| !(0.0..=1.0).contains(*c))
    {
        return Err(format!(
            "Config validation failed: background component {component} outside 0..=1"
        ));
    }
    Ok(())
}

fn default_version() -> String {
    "0.1".to_string()
}

fn default_title() -> String {
    "Vault Run".to_string()
}

const fn default_display_width() -> u32 {
    1280
}

const fn default_display_height() -> u32 {
    720
}

const fn default_framerate() -> u32 {
    60
}

const fn default_win_hold_secs() -> f32 {
    10.0
}

const fn default_background() -> Rgba {
    WHITE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "vault_config_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn write_config_file(path: &Path, body: &str) {
        fs::write(path, body).expect("failed to write temp config file");
    }

    #[test]
    fn full_config_parses() {
        let path = temp_file_path("full");
        write_config_file(
            &path,
            r#"{
              "version": "0.2",
              "title": "Test Vault",
              "display_width": 800,
              "display_height": 600,
              "framerate": 30,
              "win_hold_secs": 2.5,
              "background": [0.0, 0.0, 0.0, 1.0]
            }"#,
        );

        let config = load_config_from_path(&path).expect("valid config should load");
        assert_eq!(config.title, "Test Vault");
        assert_eq!(config.display_size(), Vec2::new(800.0, 600.0));
        assert_eq!(config.framerate, 30);
        assert_eq!(config.win_hold(), Duration::from_millis(2500));
        assert_eq!(config.background, [0.0, 0.0, 0.0, 1.0]);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn omitted_fields_take_defaults() {
        let path = temp_file_path("sparse");
        write_config_file(&path, r#"{ "framerate": 120 }"#);

        let config = load_config_from_path(&path).expect("sparse config should load");
        assert_eq!(config.framerate, 120);
        assert_eq!(config.display_width, 1280);
        assert_eq!(config.display_height, 720);
        assert_eq!(config.win_hold(), Duration::from_secs(10));
        assert_eq!(config.background, WHITE);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = temp_file_path("missing");
        assert!(load_config_from_path(&path).is_err());
        let config = load_or_default(&path).expect("missing file is not fatal");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn malformed_json_is_fatal() {
        let path = temp_file_path("malformed");
        write_config_file(&path, r#"{ "framerate": "#);

        let err = load_or_default(&path).expect_err("malformed config must fail");
        assert!(err.contains("Failed to parse config JSON"), "{err}");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn oversized_win_hold_is_rejected_at_load() {
        let path = temp_file_path("huge_hold");
        write_config_file(&path, r#"{ "win_hold_secs": 1e30 }"#);

        let err = load_or_default(&path).expect_err("hold beyond Duration range must fail");
        assert!(err.contains("win_hold_secs"), "{err}");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn win_hold_saturates_instead_of_panicking() {
        let config = GameConfig {
            win_hold_secs: 1e30,
            ..GameConfig::default()
        };
        assert_eq!(config.win_hold(), Duration::MAX);
    }

    #[test]
    fn zero_framerate_is_rejected() {
        let path = temp_file_path("zero_fps");
        write_config_file(&path, r#"{ "framerate": 0 }"#);

        let err = load_config_from_path(&path).expect_err("framerate 0 must fail");
        assert!(err.contains("framerate"), "{err}");

        let _ = fs::remove_file(path);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let zero_size = GameConfig {
            display_width: 0,
            ..GameConfig::default()
        };
        assert!(validate_config(&zero_size).is_err());

        let negative_hold = GameConfig {
            win_hold_secs: -1.0,
            ..GameConfig::default()
        };
        assert!(validate_config(&negative_hold).is_err());

        let endless_hold = GameConfig {
            win_hold_secs: 1e30,
            ..GameConfig::default()
        };
        let err = validate_config(&endless_hold).expect_err("unrepresentable hold must fail");
        assert!(err.contains("win_hold_secs"), "{err}");

        let nan_hold = GameConfig {
            win_hold_secs: f32::NAN,
            ..GameConfig::default()
        };
        assert!(validate_config(&nan_hold).is_err());

        let bright = GameConfig {
            background: [1.5, 0.0, 0.0, 1.0],
            ..GameConfig::default()
        };
        let err = validate_config(&bright).expect_err("component > 1 must fail");
        assert!(err.contains("1.5"), "{err}");

        assert!(validate_config(&GameConfig::default()).is_ok());
    }
}
