// ABOUTME: Configuration module for getupgo-intelligence crate
// ABOUTME: Re-exports calibration configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

/// Calibration tables (pose rules, motion rules, MET values)
pub mod intelligence;

pub use intelligence::{ConfigError, IntelligenceConfig, MetabolicConfig};
