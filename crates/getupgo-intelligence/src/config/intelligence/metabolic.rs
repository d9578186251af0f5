// ABOUTME: MET table and rep-duration constants for calorie estimation
// ABOUTME: Lookup is case-insensitive and falls back to the default MET for unknown activities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use std::collections::BTreeMap;

use getupgo_core::constants::defaults;
use serde::{Deserialize, Serialize};

/// Shipped MET values (Compendium of Physical Activities, rounded)
mod met_defaults {
    pub const TREE_POSE: f64 = 2.5;
    pub const WARRIOR_II_POSE: f64 = 3.0;
    pub const CHAIR_POSE: f64 = 3.5;
    pub const PLANK: f64 = 3.8;
    pub const SQUATS: f64 = 5.0;
    pub const PUSHUPS: f64 = 3.8;
    pub const LUNGES: f64 = 4.0;
    pub const CRUNCHES: f64 = 2.8;
    pub const SIDE_LYING_LEG_RAISES: f64 = 2.3;
}

/// Calorie estimation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetabolicConfig {
    /// MET used when an activity is missing from `met_values`
    pub default_met: f64,
    /// Estimated seconds spent per repetition
    pub seconds_per_rep: f64,
    /// MET value per activity name
    pub met_values: BTreeMap<String, f64>,
}

impl MetabolicConfig {
    /// MET for an activity, ignoring case, or the default
    #[must_use]
    pub fn met_for(&self, activity: &str) -> f64 {
        self.met_values
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(activity))
            .map_or(self.default_met, |(_, met)| *met)
    }
}

impl Default for MetabolicConfig {
    fn default() -> Self {
        let met_values = [
            ("Tree Pose", met_defaults::TREE_POSE),
            ("Warrior II Pose", met_defaults::WARRIOR_II_POSE),
            ("Chair Pose", met_defaults::CHAIR_POSE),
            ("Plank", met_defaults::PLANK),
            ("Squats", met_defaults::SQUATS),
            ("Pushups", met_defaults::PUSHUPS),
            ("Lunges", met_defaults::LUNGES),
            ("Crunches", met_defaults::CRUNCHES),
            ("Side-lying leg raises", met_defaults::SIDE_LYING_LEG_RAISES),
        ]
        .into_iter()
        .map(|(name, met)| (name.to_owned(), met))
        .collect();

        Self {
            default_met: defaults::MET,
            seconds_per_rep: defaults::SECONDS_PER_REP,
            met_values,
        }
    }
}
