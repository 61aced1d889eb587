//! Export settings (lua-export.toml)
//!
//! Every field has a default, so an empty file or a missing section is a
//! valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Lowest precision that still reproduces every `f32` exactly
pub const MIN_FLOAT_PRECISION: usize = 15;
/// Precision at which every `f64` reproduces exactly
pub const MAX_FLOAT_PRECISION: usize = 17;

/// Output settings for one export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Significant digits for floats (default: 15, range: 15-17)
    #[serde(default = "default_float_precision")]
    pub float_precision: usize,
    /// Minimum number of '=' in raw payload brackets (default: 8)
    #[serde(default = "default_long_bracket_level")]
    pub long_bracket_level: usize,
    /// Check scene references before writing anything (default: true)
    #[serde(default = "default_true")]
    pub validate: bool,
}

fn default_float_precision() -> usize {
    MIN_FLOAT_PRECISION
}

fn default_long_bracket_level() -> usize {
    8
}

fn default_true() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            float_precision: default_float_precision(),
            long_bracket_level: default_long_bracket_level(),
            validate: true,
        }
    }
}

impl ExportConfig {
    /// Float precision clamped to the supported range
    pub fn precision(&self) -> usize {
        self.float_precision
            .clamp(MIN_FLOAT_PRECISION, MAX_FLOAT_PRECISION)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded export config from {:?}: {:?}", path, config);
        Ok(config)
    }
}
