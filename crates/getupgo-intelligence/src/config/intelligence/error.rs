// ABOUTME: Configuration error types for calibration table validation
// ABOUTME: Defines error variants for invalid ranges, missing fields, and duplicate rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! Configuration error types for calibration table validation.

use getupgo_core::errors::{AppError, ErrorCode};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Bounds in the wrong order (e.g. low >= high)
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Required configuration field is missing
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),

    /// Two rules answer to the same name
    #[error("Duplicate rule: {0}")]
    DuplicateRule(String),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let code = match error {
            ConfigError::MissingField(_) => ErrorCode::ConfigMissing,
            _ => ErrorCode::ConfigInvalid,
        };
        Self::new(code, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_maps_to_config_missing() {
        let error = AppError::from(ConfigError::MissingField("poses[].constraints"));
        assert_eq!(error.code, ErrorCode::ConfigMissing);
        assert!(error.message.contains("poses[].constraints"));
    }

    #[test]
    fn test_bad_values_map_to_config_invalid() {
        let error = AppError::from(ConfigError::DuplicateRule("Plank".to_owned()));
        assert_eq!(error.code, ErrorCode::ConfigInvalid);
    }
}
