// ABOUTME: Environment-based runtime configuration for the coaching engine
// ABOUTME: Reads body weight, default targets, pause polling, and file paths from GETUPGO_* variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! Environment-only configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `GETUPGO_ENV` | `development` |
//! | `GETUPGO_WEIGHT_KG` | `60` |
//! | `GETUPGO_PAUSE_POLL_MS` | `1000` |
//! | `GETUPGO_DEFAULT_HOLD_SECONDS` | `30` |
//! | `GETUPGO_DEFAULT_POSE_SECONDS` | `30` |
//! | `GETUPGO_DEFAULT_TARGET_REPS` | `10` |
//! | `GETUPGO_REP_TOLERANCE` | unset (calibration value, `0` when shipped) |
//! | `GETUPGO_HISTORY_PATH` | unset (in-memory history) |
//! | `GETUPGO_CALIBRATION_PATH` | unset (shipped calibration) |

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::validation::{validate_target, validate_weight_kg};
use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::models::Target;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Installed on a user machine
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Runtime configuration for coaching sessions
#[derive(Debug, Clone, PartialEq)]
pub struct CoachConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Body weight used for calorie estimates (kg)
    pub weight_kg: f64,
    /// Idle interval between control polls while paused
    pub pause_poll: Duration,
    /// Hold target for timed exercises without an explicit duration
    pub default_hold_seconds: u32,
    /// Hold target for yoga poses without an explicit duration
    pub default_pose_seconds: u32,
    /// Repetition target for rep exercises without an explicit count
    pub default_target_reps: u32,
    /// Rep trigger tolerance in percent of range of motion; overrides the
    /// calibration table when set
    pub rep_tolerance: Option<f64>,
    /// JSON-lines history file; in-memory when unset
    pub history_path: Option<PathBuf>,
    /// Calibration table (YAML or JSON); shipped defaults when unset
    pub calibration_path: Option<PathBuf>,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            weight_kg: defaults::WEIGHT_KG,
            pause_poll: Duration::from_millis(defaults::PAUSE_POLL_MS),
            default_hold_seconds: defaults::HOLD_SECONDS,
            default_pose_seconds: parse_env(
                "GETUPGO_DEFAULT_POSE_SECONDS",
                defaults::POSE_HOLD_SECONDS,
            )
            .unwrap_or(defaults::POSE_HOLD_SECONDS),
            default_target_reps: defaults::TARGET_REPS,
            rep_tolerance: None,
            history_path: None,
            calibration_path: None,
        }
    }
}

impl CoachConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or a value is outside
    /// its accepted range
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or("GETUPGO_ENV", "development")),
            weight_kg: parse_env("GETUPGO_WEIGHT_KG", defaults::WEIGHT_KG)?,
            pause_poll: Duration::from_millis(parse_env(
                "GETUPGO_PAUSE_POLL_MS",
                defaults::PAUSE_POLL_MS,
            )?),
            default_hold_seconds: parse_env("GETUPGO_DEFAULT_HOLD_SECONDS", defaults::HOLD_SECONDS)?,
            default_pose_seconds: defaults::POSE_HOLD_SECONDS,
            default_target_reps: parse_env("GETUPGO_DEFAULT_TARGET_REPS", defaults::TARGET_REPS)?,
            rep_tolerance: parse_optional_env("GETUPGO_REP_TOLERANCE")?,
            history_path: env::var("GETUPGO_HISTORY_PATH").ok().map(PathBuf::from),
            calibration_path: env::var("GETUPGO_CALIBRATION_PATH").ok().map(PathBuf::from),
        };
        config.validate()?;

        info!(
            environment = %config.environment,
            weight_kg = config.weight_kg,
            pause_poll_ms = config.pause_poll.as_millis(),
            "Coach configuration loaded from environment"
        );
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the weight or a default target is outside the
    /// accepted limits, or the pause poll interval is zero
    pub fn validate(&self) -> AppResult<()> {
        validate_weight_kg(self.weight_kg)?;
        validate_target(Target::Reps(self.default_target_reps))?;
        validate_target(Target::Seconds(f64::from(self.default_hold_seconds)))?;
        validate_target(Target::Seconds(f64::from(self.default_pose_seconds)))?;
        if self.pause_poll.is_zero() {
            return Err(AppError::config("GETUPGO_PAUSE_POLL_MS must be positive"));
        }
        if let Some(tolerance) = self.rep_tolerance {
            if !(0.0..=25.0).contains(&tolerance) {
                return Err(AppError::config(
                    "GETUPGO_REP_TOLERANCE must be between 0 and 25",
                ));
            }
        }
        Ok(())
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    Ok(parse_optional_env(key)?.unwrap_or(default))
}

fn parse_optional_env<T>(key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(None),
    }
}
