// ABOUTME: MET-based calorie estimation for hold and repetition activities
// ABOUTME: calories = MET x weight_kg x hours, with reps converted to time via seconds_per_rep
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use getupgo_core::constants::units;
use tracing::debug;

use crate::config::MetabolicConfig;

/// Pure calorie calculator over a MET table
#[derive(Debug, Clone, Default)]
pub struct CalorieEstimator {
    config: MetabolicConfig,
}

impl CalorieEstimator {
    /// Estimator over the given MET table
    #[must_use]
    pub const fn new(config: MetabolicConfig) -> Self {
        Self { config }
    }

    /// MET for an activity, falling back to the configured default
    #[must_use]
    pub fn met_for(&self, activity: &str) -> f64 {
        let known = self
            .config
            .met_values
            .keys()
            .any(|name| name.eq_ignore_ascii_case(activity));
        if !known {
            debug!(activity, met = self.config.default_met, "no MET entry, using default");
        }
        self.config.met_for(activity)
    }

    /// Calories burned holding `activity` for `duration_seconds`
    #[must_use]
    pub fn for_duration(&self, activity: &str, weight_kg: f64, duration_seconds: f64) -> f64 {
        self.met_for(activity) * weight_kg * (duration_seconds / units::SECONDS_PER_HOUR)
    }

    /// Calories burned performing `reps` repetitions of `activity`
    #[must_use]
    pub fn for_reps(&self, activity: &str, weight_kg: f64, reps: f64) -> f64 {
        self.for_duration(activity, weight_kg, reps * self.config.seconds_per_rep)
    }

    /// Underlying MET table
    #[must_use]
    pub const fn config(&self) -> &MetabolicConfig {
        &self.config
    }
}
