use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_PATH: &str = "lorenzarium.yaml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub trail: TrailConfig,
    pub display: DisplayConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
    pub dt: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub capacity: usize,
    pub scale: f64,
    pub dot_diameter: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: usize,
    pub height: usize,
    pub target_fps: usize,
    pub steps_per_frame: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub path: PathBuf,
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            trail: TrailConfig::default(),
            display: DisplayConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
            dt: 0.01,
        }
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            capacity: 5000,
            scale: 10.0,
            dot_diameter: 3,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            target_fps: 60,
            steps_per_frame: 1,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("zimmer.wav"),
            enabled: true,
        }
    }
}

/// Read the config at `path`. A missing file means defaults; an unreadable
/// or malformed one logs a warning and also falls back to defaults.
pub fn load(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Config::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str(&contents) {
            Ok(cfg) => {
                tracing::info!(path = %path.display(), "loaded config");
                cfg
            }
            Err(e) => {
                tracing::warn!("failed to parse {}: {e}; using defaults", path.display());
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!("failed to read {}: {e}; using defaults", path.display());
            Config::default()
        }
    }
}
