// ABOUTME: Rep-exercise motion classification from interpolated joint angles
// ABOUTME: Maps each tracked angle onto a 0-100 range of motion and emits Extended/Contracted/Neutral
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! # Motion Classification
//!
//! A [`MotionRule`] tracks one joint angle per body side. Each angle is
//! linearly mapped from `(low, high)` degrees onto a 0-100 percentage of the
//! range of motion. The frame is [`MotionSignal::Extended`] when every side
//! reaches the top of the range and [`MotionSignal::Contracted`] when every
//! side reaches the bottom.
//!
//! With a tolerance of zero the triggers are exact 100 and 0. A small
//! tolerance band (e.g. 2 for 98/2) is more forgiving of detector jitter
//! while still leaving a wide dead band in between.

use getupgo_core::models::LandmarkFrame;
use serde::{Deserialize, Serialize};

use crate::geometry::JointAngle;

/// Discrete signal produced by a motion rule for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionSignal {
    /// Every tracked side is at the top of its range
    Extended,
    /// Every tracked side is at the bottom of its range
    Contracted,
    /// Somewhere in the dead band
    Neutral,
}

/// Map `value` from `[from_low, from_high]` onto `[0, 100]`, clamped
///
/// Returns `NaN` when `value` is `NaN` so that unmeasurable angles never
/// trigger a transition.
#[must_use]
pub fn range_percentage(value: f64, from_low: f64, from_high: f64) -> f64 {
    if value.is_nan() {
        return f64::NAN;
    }
    let span = from_high - from_low;
    if span.abs() < f64::EPSILON {
        return if value >= from_high { 100.0 } else { 0.0 };
    }
    ((value - from_low) / span * 100.0).clamp(0.0, 100.0)
}

/// Tracked angles and range of motion for one rep exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionRule {
    /// Exercise the rule belongs to
    pub name: String,
    /// Alternative exercise names accepted on lookup
    #[serde(default)]
    pub aliases: Vec<String>,
    /// One angle per tracked side
    pub angles: Vec<JointAngle>,
    /// Angle mapped to 0 percent
    pub low: f64,
    /// Angle mapped to 100 percent
    pub high: f64,
}

impl MotionRule {
    /// Build a rule
    #[must_use]
    pub fn new(name: impl Into<String>, angles: Vec<JointAngle>, low: f64, high: f64) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            angles,
            low,
            high,
        }
    }

    /// Add lookup aliases
    #[must_use]
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|alias| (*alias).to_owned()).collect();
        self
    }

    /// Range-of-motion percentage of every tracked side
    #[must_use]
    pub fn percentages(&self, frame: &LandmarkFrame, min_visibility: f32) -> Vec<f64> {
        self.angles
            .iter()
            .map(|angle| range_percentage(angle.measure(frame, min_visibility), self.low, self.high))
            .collect()
    }

    /// Classify one frame
    ///
    /// A frame with no detected body counts as contracted, so a user who
    /// steps out of view never leaves a half-finished rep hanging.
    #[must_use]
    pub fn classify(
        &self,
        frame: Option<&LandmarkFrame>,
        tolerance: f64,
        min_visibility: f32,
    ) -> MotionSignal {
        let Some(frame) = frame else {
            return MotionSignal::Contracted;
        };
        let percentages = self.percentages(frame, min_visibility);
        if percentages.is_empty() || percentages.iter().any(|pct| pct.is_nan()) {
            return MotionSignal::Neutral;
        }

        if percentages.iter().all(|pct| *pct >= 100.0 - tolerance) {
            MotionSignal::Extended
        } else if percentages.iter().all(|pct| *pct <= tolerance) {
            MotionSignal::Contracted
        } else {
            MotionSignal::Neutral
        }
    }

    /// Rules for the rep exercises shipped with the application
    #[must_use]
    pub fn builtin_catalog() -> Vec<Self> {
        use JointAngle::{
            LeftElbow, LeftHip, LeftKnee, LegSpread, RightElbow, RightHip, RightKnee,
        };

        vec![
            Self::new("Squats", vec![LeftKnee, RightKnee], 90.0, 160.0).with_aliases(&["Squat"]),
            Self::new("Pushups", vec![LeftElbow, RightElbow], 90.0, 160.0)
                .with_aliases(&["Push-ups", "Push ups"]),
            Self::new("Lunges", vec![LeftKnee, RightKnee], 90.0, 160.0).with_aliases(&["Lunge"]),
            Self::new("Crunches", vec![LeftHip, RightHip], 70.0, 110.0).with_aliases(&["Crunch"]),
            Self::new("Side-lying leg raises", vec![LegSpread], 10.0, 45.0)
                .with_aliases(&["Leg raises"]),
        ]
    }
}
