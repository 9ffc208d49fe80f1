//! Runtime settings, persisted as RON.
//!
//! Every section has sensible defaults, and missing fields fall back to them,
//! so a config file only needs to mention what it changes.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::{NavigationSettings, RotationKnobs};

mod cli;
mod error;

pub use cli::CliArgs;
pub use error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub simulation: SimulationConfig,
    pub camera: CameraConfig,
    pub assets: AssetConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Frames per second; 0 means uncapped.
    pub framerate_limit: u64,
}

/// Starting values for the rotation knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub phase: f64,
    pub speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance to the look-at point. Also scales drag sensitivity.
    pub look_distance: f64,
    /// Distance moved per pan key press.
    pub move_factor: f64,
    /// Distance moved per scroll step.
    pub zoom_factor: f64,
    /// Vertical field of view, in degrees.
    pub fovy_degrees: f64,
    pub znear: f64,
    pub zfar: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    pub texture_dir: PathBuf,
    /// Texture name (without extension) for the sky sphere.
    pub background: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter, e.g. "info" or "solar_system::model=debug". `RUST_LOG` wins.
    pub log_level: String,
    /// Draw the knob and FPS overlay.
    pub show_hud: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 640,
            title: "Solar System".to_string(),
            framerate_limit: 60,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let knobs = RotationKnobs::default();
        Self {
            phase: knobs.phase,
            speed: knobs.speed,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        let nav = NavigationSettings::default();
        Self {
            look_distance: nav.look_distance,
            move_factor: nav.move_factor,
            zoom_factor: nav.zoom_factor,
            fovy_degrees: 45.0,
            znear: 1.0,
            zfar: 200.0,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("texture"),
            background: crate::model::catalog::BACKGROUND_TEXTURE.to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_hud: true,
        }
    }
}

/// Where a loaded config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    /// There was no file at this path.
    Defaults(PathBuf),
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigOrigin::File(path) => write!(f, "loaded from {}", path.display()),
            ConfigOrigin::Defaults(path) => {
                write!(f, "no config at {}, using defaults", path.display())
            }
        }
    }
}

impl Config {
    /// Loads the config at `path`. A missing file is not an error; it just
    /// means everything is default.
    ///
    /// This runs before logging is set up, so it doesn't log anything itself;
    /// callers should report the returned origin once they can.
    pub fn load(path: &Path) -> Result<(Self, ConfigOrigin), ConfigError> {
        if !path.exists() {
            return Ok((Config::default(), ConfigOrigin::Defaults(path.to_path_buf())));
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        Ok((config, ConfigOrigin::File(path.to_path_buf())))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(ConfigError::WriteError)?;
        }

        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;
        std::fs::write(path, serialized).map_err(ConfigError::WriteError)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn navigation(&self) -> NavigationSettings {
        NavigationSettings {
            look_distance: self.camera.look_distance,
            move_factor: self.camera.move_factor,
            zoom_factor: self.camera.zoom_factor,
        }
    }

    pub fn knobs(&self) -> RotationKnobs {
        RotationKnobs::new(self.simulation.phase, self.simulation.speed)
    }
}
