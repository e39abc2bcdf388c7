//! Engine configuration: history cap and number interpretation/formatting.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// History cap of the scientific calculator.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Digits shown after the decimal point (or in the mantissa) by default.
pub const DEFAULT_PRECISION: u8 = 6;

/// Largest precision an f64 can meaningfully render.
pub const MAX_PRECISION: u8 = 15;

/// Errors raised when validating an [`EngineConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// History must keep at least one entry.
    #[error("history limit must be at least 1, got {0}")]
    InvalidHistoryLimit(usize),

    /// Precision exceeds what the formatter supports.
    #[error("display precision must be at most {max}, got {precision}")]
    InvalidPrecision { precision: u8, max: u8 },
}

/// How trigonometric inputs are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Deg,
    Rad,
}

impl AngleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deg => "deg",
            Self::Rad => "rad",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "deg" => Some(Self::Deg),
            "rad" => Some(Self::Rad),
            _ => None,
        }
    }
}

/// Notation used when rendering computed results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Fixed point, trailing zeros stripped.
    #[default]
    Fix,
    /// Scientific notation (`1.234560e+3`).
    Sci,
    /// Engineering notation, exponent a multiple of three (`12.345600e+3`).
    Eng,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fix => "fix",
            Self::Sci => "sci",
            Self::Eng => "eng",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fix" => Some(Self::Fix),
            "sci" => Some(Self::Sci),
            "eng" => Some(Self::Eng),
            _ => None,
        }
    }
}

/// Session-start configuration for a [`crate::Calculator`].
///
/// Missing fields fall back to the defaults when deserialized, so a settings
/// file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of history entries kept; oldest are evicted first.
    pub history_limit: usize,

    /// Initial angle interpretation for `sin`, `cos` and `tan`.
    pub angle_mode: AngleMode,

    /// Initial notation for computed results.
    pub display_mode: DisplayMode,

    /// Initial number of digits used by the formatter.
    pub display_precision: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            angle_mode: AngleMode::default(),
            display_mode: DisplayMode::default(),
            display_precision: DEFAULT_PRECISION,
        }
    }
}

impl EngineConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `history_limit` is zero
    /// - `display_precision` is above [`MAX_PRECISION`]
    ///
    /// # Example
    ///
    /// ```
    /// use calc_core::{ConfigError, EngineConfig};
    ///
    /// let config = EngineConfig {
    ///     history_limit: 0,
    ///     ..EngineConfig::default()
    /// };
    ///
    /// assert_eq!(config.validate(), Err(ConfigError::InvalidHistoryLimit(0)));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(ConfigError::InvalidHistoryLimit(self.history_limit));
        }
        if self.display_precision > MAX_PRECISION {
            return Err(ConfigError::InvalidPrecision {
                precision: self.display_precision,
                max: MAX_PRECISION,
            });
        }
        Ok(())
    }
}
