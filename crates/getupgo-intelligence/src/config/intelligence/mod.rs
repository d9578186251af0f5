// ABOUTME: Calibration configuration for pose rules, motion rules, and calorie constants
// ABOUTME: Bundles the shipped tables with validation so substitutes can be loaded safely
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! Intelligence Configuration Module
//!
//! Every threshold the classifiers use is data in [`IntelligenceConfig`].
//! The `Default` impl carries the shipped calibration; a tuned table can be
//! deserialized from YAML or JSON and must pass [`IntelligenceConfig::validate`]
//! before use.

pub mod error;
pub mod metabolic;

pub use error::ConfigError;
pub use metabolic::MetabolicConfig;

use std::collections::HashSet;
use std::iter;

use getupgo_core::constants::landmarks;
use serde::{Deserialize, Serialize};

use crate::motion::MotionRule;
use crate::pose_rules::{Constraint, PoseRule};

/// Largest accepted rep trigger tolerance, in percent of range of motion
const MAX_REP_TOLERANCE: f64 = 25.0;

/// Main calibration container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelligenceConfig {
    /// MET table and rep duration
    pub metabolic: MetabolicConfig,
    /// Hold-pose rules
    pub poses: Vec<PoseRule>,
    /// Rep-exercise motion rules
    pub motions: Vec<MotionRule>,
    /// Trigger tolerance in percent; 0 means exact 100/0 triggers
    pub rep_tolerance: f64,
    /// Landmarks below this visibility are treated as missing
    pub min_visibility: f32,
}

impl Default for IntelligenceConfig {
    fn default() -> Self {
        Self {
            metabolic: MetabolicConfig::default(),
            poses: PoseRule::builtin_catalog(),
            motions: MotionRule::builtin_catalog(),
            rep_tolerance: 0.0,
            min_visibility: landmarks::DEFAULT_MIN_VISIBILITY,
        }
    }
}

impl IntelligenceConfig {
    /// Motion rule for a rep exercise, ignoring case
    #[must_use]
    pub fn motion(&self, name: &str) -> Option<&MotionRule> {
        self.motions
            .iter()
            .find(|rule| rule.name.eq_ignore_ascii_case(name))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any constant is out of range, a rule has inverted
    /// bounds, or two rules share a name
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.metabolic.default_met) {
            return Err(ConfigError::ValueOutOfRange(
                "default_met must be positive".to_owned(),
            ));
        }
        if !is_positive(self.metabolic.seconds_per_rep) {
            return Err(ConfigError::ValueOutOfRange(
                "seconds_per_rep must be positive".to_owned(),
            ));
        }
        if let Some((name, _)) = self
            .metabolic
            .met_values
            .iter()
            .find(|(_, met)| !is_positive(**met))
        {
            return Err(ConfigError::ValueOutOfRange(format!(
                "MET for {name} must be positive"
            )));
        }

        if !(0.0..=MAX_REP_TOLERANCE).contains(&self.rep_tolerance) {
            return Err(ConfigError::ValueOutOfRange(format!(
                "rep_tolerance must be within 0-{MAX_REP_TOLERANCE}"
            )));
        }
        if !(0.0..=1.0).contains(&self.min_visibility) {
            return Err(ConfigError::ValueOutOfRange(
                "min_visibility must be within 0-1".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for motion in &self.motions {
            if motion.angles.is_empty() {
                return Err(ConfigError::MissingField("motions[].angles"));
            }
            if motion.low >= motion.high {
                return Err(ConfigError::InvalidRange(format!(
                    "{}: low must be < high",
                    motion.name
                )));
            }
            if !seen.insert(motion.name.to_lowercase()) {
                return Err(ConfigError::DuplicateRule(motion.name.clone()));
            }
        }

        seen.clear();
        for pose in &self.poses {
            if pose.constraints.is_empty() {
                return Err(ConfigError::MissingField("poses[].constraints"));
            }
            validate_constraints(&pose.name, &pose.constraints)?;
            for name in iter::once(&pose.name).chain(&pose.aliases) {
                if !seen.insert(name.to_lowercase()) {
                    return Err(ConfigError::DuplicateRule(name.clone()));
                }
            }
        }

        Ok(())
    }
}

/// False for zero, negative, and `NaN`
fn is_positive(value: f64) -> bool {
    value > 0.0
}

fn validate_constraints(pose: &str, constraints: &[Constraint]) -> Result<(), ConfigError> {
    for constraint in constraints {
        match constraint {
            Constraint::Angle { angle, min, max } if min >= max => {
                return Err(ConfigError::InvalidRange(format!(
                    "{pose}: {angle:?} min must be < max"
                )));
            }
            Constraint::All { of } | Constraint::Any { of } => {
                if of.is_empty() {
                    return Err(ConfigError::MissingField("constraint group members"));
                }
                validate_constraints(pose, of)?;
            }
            _ => {}
        }
    }
    Ok(())
}
