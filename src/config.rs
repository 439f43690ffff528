//! Generator configuration
//!
//! Loaded from RON, falling back to the 21x21 defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GenerationError};

/// Tunables for level generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Grid width (odd)
    pub width: i32,
    /// Grid height (odd)
    pub height: i32,
    /// Steps a single strand may take before it counts as deadlocked
    pub step_budget: u32,
    /// Full generation attempts before giving up
    pub max_attempts: u32,
    /// Noise samples above this turn ground into obstacles
    pub obstacle_threshold: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 21,
            height: 21,
            step_budget: 500,
            max_attempts: 64,
            obstacle_threshold: 0.7,
        }
    }
}

impl GeneratorConfig {
    /// The 33x33 layout
    pub fn large() -> Self {
        Self {
            width: 33,
            height: 33,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Parse a RON document and validate it
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a RON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&content)?;
        log::debug!("Loaded generator config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Reject configurations the generator cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimensions(self.width, self.height)?;
        if self.step_budget == 0 {
            return Err(ConfigError::ZeroBudget("step_budget"));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroBudget("max_attempts"));
        }
        if !(self.obstacle_threshold > -1.0 && self.obstacle_threshold < 1.0) {
            return Err(ConfigError::Threshold(self.obstacle_threshold));
        }
        Ok(())
    }
}

/// Odd and at least 3 on both axes, so a center cell exists
pub(crate) fn check_dimensions(width: i32, height: i32) -> Result<(), GenerationError> {
    let valid = |n: i32| n >= 3 && n % 2 == 1;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(GenerationError::InvalidDimensions { width, height })
    }
}
