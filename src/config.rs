//! Adjudicator configuration.
//!
//! Loaded from JSON; every field has a default so an empty object is a
//! valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// Rule switches and game defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    /// Allow builds in any owned supply center, not only home centers.
    pub build_anywhere: bool,
    /// Year of the first movement phase of a new game.
    pub start_year: i32,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        JudgeConfig {
            build_anywhere: false,
            start_year: 1901,
        }
    }
}

impl JudgeConfig {
    pub fn load(path: &Path) -> Result<JudgeConfig, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(json: &str) -> Result<JudgeConfig, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Applies a `name = value` override, as sent by `setoption`.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };
        match name {
            "build_anywhere" | "BuildAnywhere" => {
                self.build_anywhere = value.parse().map_err(|_| invalid())?;
            }
            "start_year" | "StartYear" => {
                self.start_year = value.parse().map_err(|_| invalid())?;
            }
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        Ok(())
    }
}
