//! Editor configuration.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::{DroopStyle, DEFAULT_DROOP_CAP, DEFAULT_DROOP_FACTOR};
use crate::graph::InputPolicy;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "PATCH_EDITOR_CONFIG";

/// Tunables for geometry, placement and connection rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Cable droop per unit of endpoint distance.
    pub droop_factor: f32,
    /// Maximum cable droop in canvas units.
    pub droop_cap: f32,
    /// Grid cell size used for placement and auto-arrange (module + margin).
    pub grid_cell: (f32, f32),
    /// Top-left of the first placement slot.
    pub placement_origin: (f32, f32),
    /// Top-left of the first auto-arrange slot.
    pub arrange_origin: (f32, f32),
    /// Area a module is assumed to cover when checking placement collisions.
    pub module_footprint: (f32, f32),
    /// Horizontal space not usable for grid columns.
    pub viewport_margin: f32,
    /// Viewport width assumed when the surface reports none.
    pub default_viewport_width: f32,
    /// Number of grid slots tried before falling back to a jittered position.
    pub max_placement_attempts: usize,
    /// Frames of cable refresh after an auto-arrange.
    pub arrange_frames: u32,
    /// Behavior when a cable is dropped on an occupied input.
    pub input_policy: InputPolicy,
    /// Position of the output module created at startup.
    pub initial_output_position: (f32, f32),
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            droop_factor: DEFAULT_DROOP_FACTOR,
            droop_cap: DEFAULT_DROOP_CAP,
            grid_cell: (250.0, 300.0),
            placement_origin: (50.0, 50.0),
            arrange_origin: (50.0, 80.0),
            module_footprint: (200.0, 250.0),
            viewport_margin: 100.0,
            default_viewport_width: 1280.0,
            max_placement_attempts: 1000,
            arrange_frames: 30,
            input_policy: InputPolicy::default(),
            initial_output_position: (600.0, 200.0),
        }
    }
}

impl EditorConfig {
    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults if unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Droop parameters for cable curves.
    pub fn droop_style(&self) -> DroopStyle {
        DroopStyle {
            factor: self.droop_factor,
            cap: self.droop_cap,
        }
    }

    /// Checks that sizes are positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |name: &'static str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(name))
            }
        };
        positive("droop_cap", self.droop_cap)?;
        positive("grid_cell", self.grid_cell.0)?;
        positive("grid_cell", self.grid_cell.1)?;
        positive("module_footprint", self.module_footprint.0)?;
        positive("module_footprint", self.module_footprint.1)?;
        positive("default_viewport_width", self.default_viewport_width)?;
        if !(self.droop_factor.is_finite() && self.droop_factor >= 0.0) {
            return Err(ConfigError::Invalid("droop_factor"));
        }
        if self.max_placement_attempts == 0 {
            return Err(ConfigError::Invalid("max_placement_attempts"));
        }
        Ok(())
    }
}

/// Errors that can occur when loading a config.
#[derive(Debug)]
pub enum ConfigError {
    /// Reading the file failed.
    Io(std::io::Error),
    /// The JSON could not be parsed.
    Parse(serde_json::Error),
    /// A field has an unusable value.
    Invalid(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Invalid(field) => write!(f, "Invalid value for '{}'", field),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
