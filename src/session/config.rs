//! Run configuration.
//!
//! Defaults reproduce the classic example: a 7-bit register holding
//! `0b1011010`, stepped once. A JSON file may override any field; CLI flags
//! override the file.

use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::bits::{parse_binary, ParseError};
use crate::register::{RegisterError, ShiftRegister, MAX_RUN_STEPS};

/// Initial value used when none is given.
pub const DEFAULT_INITIAL: u64 = 0b1011010;
/// Register width used when none is given.
pub const DEFAULT_WIDTH: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub initial: u64,
    pub width: u32,
    pub steps: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial: DEFAULT_INITIAL,
            width: DEFAULT_WIDTH,
            steps: 1,
        }
    }
}

impl Config {
    /// Load a config file; missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Resolve a config from an optional file plus command-line overrides.
    ///
    /// Order: defaults, then the file, then `initial` (which also sets the
    /// width to its digit count), then `width`. The result is validated.
    pub fn resolve(
        path: Option<&Path>,
        initial: Option<&str>,
        width: Option<u32>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(initial, width)?;
        config.register()?;
        Self::check_steps(config.steps)?;
        Ok(config)
    }

    /// Apply an `0b…` initial literal and an explicit width on top.
    pub fn apply_overrides(&mut self, initial: Option<&str>, width: Option<u32>) -> Result<(), ConfigError> {
        if let Some(text) = initial {
            let (value, digits) = parse_binary(text).map_err(|source| ConfigError::Initial {
                text: text.to_string(),
                source,
            })?;
            self.initial = value;
            self.width = digits;
        }
        if let Some(width) = width {
            self.width = width;
        }
        Ok(())
    }

    /// Build the configured register, checking the range.
    pub fn register(&self) -> Result<ShiftRegister, ConfigError> {
        Ok(ShiftRegister::try_new(self.initial, self.width)?)
    }

    /// Reject step counts above [`MAX_RUN_STEPS`].
    pub fn check_steps(steps: u64) -> Result<u64, ConfigError> {
        if steps > MAX_RUN_STEPS {
            return Err(ConfigError::TooManySteps { steps, max: MAX_RUN_STEPS });
        }
        Ok(steps)
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error(transparent)]
    Register(#[from] RegisterError),

    #[error("invalid initial value '{text}': {source}")]
    Initial { text: String, source: ParseError },

    #[error("{steps} steps requested, at most {max} allowed")]
    TooManySteps { steps: u64, max: u64 },
}
