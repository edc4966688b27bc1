use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_control_dt() -> f64 {
    1.0 / 60.0
}
const fn default_max_ticks_per_frame() -> u32 {
    8
}

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

/// Main simulation configuration.
///
/// `control_dt` is the fixed timestep handed to every blend tick; at the
/// default 60 Hz a binding with speed 10 completes its ramp in one second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct SimConfig {
    /// Blend tick timestep in seconds (default: 1/60).
    #[serde(default = "default_control_dt")]
    pub control_dt: f64,

    /// Maximum blend ticks dispensed per frame when catching up (default: 8).
    #[serde(default = "default_max_ticks_per_frame")]
    pub max_ticks_per_frame: u32,

    /// Master random seed for scripted scenarios.
    #[serde(default)]
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            control_dt: default_control_dt(),
            max_ticks_per_frame: default_max_ticks_per_frame(),
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.control_dt <= 0.0 || !self.control_dt.is_finite() {
            return Err(ConfigError::InvalidControlDt(self.control_dt));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_ticks_per_frame".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Tick rate in Hz.
    #[must_use]
    pub fn control_hz(&self) -> f64 {
        1.0 / self.control_dt
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
