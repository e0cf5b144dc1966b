//! Game configuration loaded from `assets/config/game.ron`.
//!
//! Window size, player tuning, cooldown lengths and the tool/seed
//! loadout live here instead of in module constants. A missing file
//! means defaults; a file that exists but does not parse or validate
//! stops startup.

use bevy::prelude::*;
use bevy::asset::io::file::FileAssetReader;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::shared::*;

/// Default config location, relative to the asset base path.
pub const CONFIG_PATH: &str = "assets/config/game.ron";

/// `CONFIG_PATH` resolved the same way Bevy resolves the asset root, so
/// config and assets are found together from any working directory.
pub fn config_path() -> PathBuf {
    FileAssetReader::get_base_path().join(CONFIG_PATH)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub player: PlayerConfig,
    pub assets: AssetConfig,
    /// Where this config came from; `None` for built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Movement speed in screen units per second.
    pub speed: f32,
    /// Animation frames advanced per second.
    pub fps_index: f32,
    /// Spawn point in screen coordinates (origin top-left, y down).
    pub start_position: (f32, f32),
    /// Bounding box of one animation frame.
    pub frame_size: (f32, f32),
    pub tools: Vec<ToolKind>,
    pub seeds: Vec<SeedKind>,
    pub timers: TimerConfig,
}

/// Cooldown lengths in milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub tool_use_ms: u64,
    pub tool_switch_ms: u64,
    pub seed_use_ms: u64,
    pub seed_switch_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Asset root handed to Bevy's `AssetPlugin`.
    pub root: String,
    /// Directory under `root` holding one folder per animation status.
    pub character_dir: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            player: PlayerConfig::default(),
            assets: AssetConfig::default(),
            source: None,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::from("Ikun Valley"),
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 100.0,
            fps_index: 4.0,
            start_position: (640.0, 360.0),
            frame_size: (32.0, 32.0),
            tools: ToolKind::ALL.to_vec(),
            seeds: SeedKind::ALL.to_vec(),
            timers: TimerConfig::default(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tool_use_ms: 350,
            tool_switch_ms: 200,
            seed_use_ms: 350,
            seed_switch_ms: 200,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: String::from("assets"),
            character_dir: String::from("graphics/character"),
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from RON text.
    pub fn from_ron(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. Any failure, including a missing file, is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_ron(&text, path)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Like [`GameConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "window size must be positive, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        self.player.validate()
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "player speed must be finite and non-negative, got {}",
                self.speed
            )));
        }
        if !(self.fps_index.is_finite() && self.fps_index > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fps_index must be positive, got {}",
                self.fps_index
            )));
        }
        let (w, h) = self.frame_size;
        if !(w > 0.0 && h > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "frame_size must be positive, got {}x{}",
                w, h
            )));
        }
        if self.tools.is_empty() {
            return Err(ConfigError::Invalid("player needs at least one tool".into()));
        }
        if self.seeds.is_empty() {
            return Err(ConfigError::Invalid("player needs at least one seed".into()));
        }
        self.timers.validate()
    }

    pub fn start_position(&self) -> Vec2 {
        Vec2::new(self.start_position.0, self.start_position.1)
    }

    pub fn frame_size(&self) -> Vec2 {
        Vec2::new(self.frame_size.0, self.frame_size.1)
    }
}

impl TimerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("tool_use_ms", self.tool_use_ms),
            ("tool_switch_ms", self.tool_switch_ms),
            ("seed_use_ms", self.seed_use_ms),
            ("seed_switch_ms", self.seed_switch_ms),
        ];
        for (name, ms) in named {
            if ms == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be non-zero")));
            }
        }
        Ok(())
    }

    pub fn tool_use(&self) -> Duration {
        Duration::from_millis(self.tool_use_ms)
    }

    pub fn tool_switch(&self) -> Duration {
        Duration::from_millis(self.tool_switch_ms)
    }

    pub fn seed_use(&self) -> Duration {
        Duration::from_millis(self.seed_use_ms)
    }

    pub fn seed_switch(&self) -> Duration {
        Duration::from_millis(self.seed_switch_ms)
    }
}

/// Startup system: record which config the game is running with.
pub fn log_config(config: Res<GameConfig>) {
    match &config.source {
        Some(path) => info!("[Config] Loaded {}", path.display()),
        None => warn!("[Config] No config file at {}, using defaults", config_path().display()),
    }
    debug!(
        "[Config] window {}x{}, speed {}, fps_index {}, tools {:?}, seeds {:?}",
        config.window.width,
        config.window.height,
        config.player.speed,
        config.player.fps_index,
        config.player.tools,
        config.player.seeds,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ikun_valley_{}_{}.ron", name, std::process::id()))
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window.title, "Ikun Valley");
        assert_eq!(config.player.tools, vec![ToolKind::Hoe, ToolKind::Axe, ToolKind::Water]);
        assert_eq!(config.player.timers.tool_use(), Duration::from_millis(350));
        assert_eq!(config.player.timers.tool_switch(), Duration::from_millis(200));
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let text = r#"(
            player: (
                speed: 150.0,
                seeds: [Tomato],
            ),
        )"#;
        let config = GameConfig::from_ron(text, Path::new("inline.ron")).unwrap();
        assert_eq!(config.player.speed, 150.0);
        assert_eq!(config.player.seeds, vec![SeedKind::Tomato]);
        assert_eq!(config.player.fps_index, 4.0);
        assert_eq!(config.window.width, 1280.0);
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        let err = GameConfig::from_ron("(player: (speed: fast))", Path::new("bad.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn test_empty_tools_rejected() {
        let err = GameConfig::from_ron("(player: (tools: []))", Path::new("x.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn test_zero_timer_rejected() {
        let mut config = GameConfig::default();
        config.player.timers.seed_switch_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_speed_rejected() {
        let mut config = GameConfig::default();
        config.player.speed = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = temp_config_path("missing");
        let _ = fs::remove_file(&path);
        let config = GameConfig::load_or_default(&path).unwrap();
        assert_eq!(config, GameConfig::default());
        assert!(config.source.is_none());

        assert!(matches!(GameConfig::load(&path), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_config_path_is_beside_the_assets() {
        let path = config_path();
        assert!(path.ends_with(CONFIG_PATH));
        assert!(path.starts_with(FileAssetReader::get_base_path()));

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert_eq!(config.player.tools, ToolKind::ALL.to_vec());
    }

    #[test]
    fn test_load_records_source() {
        let path = temp_config_path("present");
        fs::write(&path, "(window: (title: \"Test Valley\"))").unwrap();
        let config = GameConfig::load_or_default(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.window.title, "Test Valley");
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }
}
