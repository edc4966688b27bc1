//! Rig configuration: the set of IK bindings a character is built with.
//!
//! Loaded from TOML with one `[[binding]]` table per activation site:
//!
//! ```toml
//! [[binding]]
//! target = "lever"
//! body_part = "right_hand"
//! activate = true
//! speed = 10.0
//!
//! [[binding]]
//! body_part = "right_hand"
//! activate = false
//! ```

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use aimrail_blend_core::controller::BindingConfig;
use aimrail_blend_core::ramp::MAX_SPEED;
use aimrail_core::error::ConfigError;

// ---------------------------------------------------------------------------
// RigConfig
// ---------------------------------------------------------------------------

/// All binding configurations for one character rig.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Resource)]
pub struct RigConfig {
    /// Activation sites, in `[[binding]]` table order.
    #[serde(default, rename = "binding")]
    pub bindings: Vec<BindingConfig>,
}

impl RigConfig {
    /// Validate all bindings. Returns Err on the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, binding) in self.bindings.iter().enumerate() {
            if !binding.speed.is_finite() || binding.speed < 0.0 || binding.speed > MAX_SPEED {
                return Err(ConfigError::InvalidSpeed(binding.speed));
            }
            if binding.activate && binding.target.trim().is_empty() {
                return Err(ConfigError::EmptyTargetName(index));
            }
        }
        Ok(())
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
