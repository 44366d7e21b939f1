use crate::error::{CheckerError, Result};
use serde::{Deserialize, Serialize};

/// Scores at or below this value are not reported.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckConfig {
    pub threshold: f64,
}

impl CheckConfig {
    pub fn new(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() {
            return Err(CheckerError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }
}

impl Default for CheckConfig {
    fn default() -> Self { Self { threshold: DEFAULT_THRESHOLD } }
}
