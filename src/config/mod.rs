// ABOUTME: Configuration module for runtime settings, input limits, and calibration loading
// ABOUTME: Environment variables drive runtime settings; calibration tables come from files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! Configuration module
//!
//! - **Environment**: `CoachConfig` from `GETUPGO_*` variables
//! - **Validation**: body weight and target limits
//! - **Calibration**: YAML/JSON substitutes for the shipped rule tables

/// Environment-based runtime configuration
pub mod environment;

/// Input limit validation
pub mod validation;

/// Calibration table loading
pub mod calibration;

pub use calibration::{load_calibration, parse_calibration, CalibrationFormat};
pub use environment::{CoachConfig, Environment};
pub use getupgo_intelligence::{ConfigError, IntelligenceConfig};
pub use validation::{validate_target, validate_weight_kg};
