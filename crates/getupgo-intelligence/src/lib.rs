// ABOUTME: Pose classification engine for the GetUpGo fitness coach
// ABOUTME: Angle geometry, pose and motion rules, rep counting, hold timing, and calorie estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

#![deny(unsafe_code)]

//! # GetUpGo Intelligence
//!
//! Pure per-frame algorithms that turn body landmarks into coaching events.
//! Nothing here touches a camera, a clock, or a file: frames and timestamps
//! are passed in, signals and numbers come out.
//!
//! ## Modules
//!
//! - **geometry**: `angle_at` and the per-frame `AngleSet`
//! - **`pose_rules`**: table-driven hold-pose rules and `PoseClassifier`
//! - **motion**: rep-exercise range-of-motion classification
//! - **`rep_counter`**: half-step repetition state machine
//! - **`hold_timer`**: continuous dwell-time tracking
//! - **calories**: MET-based calorie estimation
//! - **config**: calibration tables and validation

/// Joint angle geometry
pub mod geometry;

/// Hold-pose rules and classifier
pub mod pose_rules;

/// Rep-exercise motion classification
pub mod motion;

/// Repetition counting
pub mod rep_counter;

/// Hold-pose dwell timing
pub mod hold_timer;

/// Calorie estimation
pub mod calories;

/// Calibration configuration
pub mod config;

pub use calories::CalorieEstimator;
pub use config::{ConfigError, IntelligenceConfig, MetabolicConfig};
pub use geometry::{angle_at, AngleSet, JointAngle};
pub use hold_timer::{HoldEvent, HoldTimer};
pub use motion::{range_percentage, MotionRule, MotionSignal};
pub use pose_rules::{Constraint, PoseClassifier, PoseRule};
pub use rep_counter::{RepCounter, RepEvent, RepPhase};
