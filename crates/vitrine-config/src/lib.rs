//! Configuration for the vitrine terminal portfolio.
//!
//! Settings and profile content live in one TOML file in the platform
//! config directory (`~/.config/vitrine/config.toml` on Linux). A missing
//! file means defaults; a malformed one is an error.

mod profile;

pub use profile::{ContactDetails, Experience, Profile, Skill, SkillGroup};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use vitrine_core::{AnimationSpeed, ThemeName};

/// Config file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Range accepted for [`Config::particle_density`].
pub const DENSITY_RANGE: std::ops::RangeInclusive<f32> = 0.1..=2.0;

const MIN_FRAME_INTERVAL_MS: u64 = 8;
const MAX_FRAME_INTERVAL_MS: u64 = 1000;

/// Errors that can occur loading or saving the config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The platform has no home directory to put the config in.
    #[error("no config directory available")]
    NoConfigDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// User settings and page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeName,
    pub animation_speed: AnimationSpeed,
    /// Multiplier on every scene's particle count.
    pub particle_density: f32,
    /// How far above a section's top the nav highlight switches to it, in
    /// page pixels.
    pub nav_threshold: u32,
    /// Simulated send time of the contact form.
    pub submit_delay_ms: u64,
    /// How long the "message sent" toast stays up.
    pub toast_duration_ms: u64,
    /// Target time between refreshes.
    pub frame_interval_ms: u64,
    pub profile: Profile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeName::default(),
            animation_speed: AnimationSpeed::default(),
            particle_density: 1.0,
            nav_threshold: 100,
            submit_delay_ms: 1500,
            toast_duration_ms: 3000,
            frame_interval_ms: 33,
            profile: Profile::default(),
        }
    }
}

impl Config {
    /// Clamp values into their supported ranges.
    pub fn validate(&mut self) {
        self.particle_density = if self.particle_density.is_finite() {
            self.particle_density
                .clamp(*DENSITY_RANGE.start(), *DENSITY_RANGE.end())
        } else {
            1.0
        };
        self.frame_interval_ms = self
            .frame_interval_ms
            .clamp(MIN_FRAME_INTERVAL_MS, MAX_FRAME_INTERVAL_MS);
    }

    pub fn from_toml(toml: &str) -> ConfigResult<Self> {
        let mut config: Self = toml::from_str(toml)?;
        config.validate();
        Ok(config)
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load from `path`, or defaults if the file does not exist.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load from the platform config directory.
    pub fn load_default() -> ConfigResult<Self> {
        let path = default_path().ok_or(ConfigError::NoConfigDir)?;
        Self::load(&path)
    }

    /// Write to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "vitrine", "vitrine")
}

/// `config.toml` in the platform config directory.
pub fn default_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Directory for the log file.
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeName::Orchid);
        assert_eq!(config.animation_speed, AnimationSpeed::Medium);
        assert_eq!(config.nav_threshold, 100);
        assert_eq!(config.submit_delay(), Duration::from_millis(1500));
        assert_eq!(config.toast_duration(), Duration::from_secs(3));
        assert_eq!(config.profile.skills.len(), 2);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r##"
            theme = "midnight"
            animation_speed = "fast"

            [profile]
            name = "Sam Lee"

            [[profile.skills]]
            title = "Languages"
            items = [{ name = "Rust", color = "#dea584" }]
            "##,
        )
        .unwrap();
        assert_eq!(config.theme, ThemeName::Midnight);
        assert_eq!(config.animation_speed, AnimationSpeed::Fast);
        assert_eq!(config.frame_interval_ms, 33);
        assert_eq!(config.profile.name, "Sam Lee");
        assert_eq!(config.profile.role, Profile::default().role);
        assert_eq!(config.profile.skills[0].items[0].name, "Rust");
    }

    #[test]
    fn test_validate_clamps() {
        let config = Config::from_toml("particle_density = 9.0\nframe_interval_ms = 0").unwrap();
        assert_eq!(config.particle_density, 2.0);
        assert_eq!(config.frame_interval_ms, MIN_FRAME_INTERVAL_MS);

        let mut config = Config {
            particle_density: f32::NAN,
            ..Config::default()
        };
        config.validate();
        assert_eq!(config.particle_density, 1.0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(matches!(
            Config::from_toml("theme = 3"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_toml("[profile]\nskills = [{ title = \"x\", items = [{ name = \"a\", color = \"red\" }] }]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        let config = Config {
            theme: ThemeName::Mono,
            particle_density: 0.5,
            ..Config::default()
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
