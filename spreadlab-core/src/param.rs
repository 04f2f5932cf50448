//! Spread percentage — the one user-chosen input parameter.
//!
//! Parsing returns a `Result` so callers can reject the fetch on invalid
//! input instead of letting a NaN-style sentinel leak into the request path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Integer percentage of the treasury to swap, in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpreadPercentage(u8);

/// Why a percentage string was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("not a number: {0:?}")]
    NotANumber(String),

    #[error("percentage {0} out of range (expected 0-100)")]
    OutOfRange(i64),
}

impl SpreadPercentage {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, ParamError> {
        if value > Self::MAX {
            return Err(ParamError::OutOfRange(value as i64));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for SpreadPercentage {
    /// The card's field defaults to 20%.
    fn default() -> Self {
        Self(20)
    }
}

impl fmt::Display for SpreadPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SpreadPercentage {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| ParamError::NotANumber(trimmed.to_string()))?;
        if !(Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            return Err(ParamError::OutOfRange(value));
        }
        Ok(Self(value as u8))
    }
}
