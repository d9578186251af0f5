// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for landmarks, input limits, calories, and service identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large list. Calibration tables (pose thresholds, MET values) live in the
//! intelligence configuration, not here.

/// Service identity used in logs
pub mod service_names {
    /// Service name for the coaching engine
    pub const GETUPGO: &str = "getupgo";
    /// Service name for the command-line tool
    pub const GETUPGO_CLI: &str = "getupgo-cli";
}

/// Body landmark model constants
pub mod landmarks {
    /// Number of landmarks produced by the full-body pose detector
    pub const POSE_LANDMARK_COUNT: usize = 33;
    /// Minimum visibility for a landmark to be trusted
    pub const DEFAULT_MIN_VISIBILITY: f32 = 0.0;
}

/// Input limits inherited from the workout selection form
pub mod limits {
    /// Lightest accepted body weight (kg)
    pub const MIN_WEIGHT_KG: f64 = 30.0;
    /// Heaviest accepted body weight (kg)
    pub const MAX_WEIGHT_KG: f64 = 150.0;
    /// Shortest accepted hold target (seconds)
    pub const MIN_HOLD_SECONDS: f64 = 5.0;
    /// Longest accepted hold target (seconds)
    pub const MAX_HOLD_SECONDS: f64 = 600.0;
    /// Smallest accepted repetition target
    pub const MIN_TARGET_REPS: u32 = 1;
    /// Largest accepted repetition target
    pub const MAX_TARGET_REPS: u32 = 100;
}

/// Defaults applied when a caller or schedule item does not provide a value
pub mod defaults {
    /// Body weight used when the user has not entered one (kg)
    pub const WEIGHT_KG: f64 = 60.0;
    /// MET value for activities missing from the MET table
    pub const MET: f64 = 3.0;
    /// Hold target for poses whose schedule item carries no duration
    pub const POSE_HOLD_SECONDS: u32 = 30;
    /// Hold target for timed exercises whose schedule item carries no duration
    pub const HOLD_SECONDS: u32 = 30;
    /// Repetition target for rep exercises whose schedule item carries no count
    pub const TARGET_REPS: u32 = 10;
    /// Idle interval between control polls while a session is paused (ms)
    pub const PAUSE_POLL_MS: u64 = 1000;
    /// Estimated duration of one repetition for rep-based calorie estimates
    pub const SECONDS_PER_REP: f64 = 3.0;
}

/// Unit conversion constants
pub mod units {
    /// Seconds in one hour
    pub const SECONDS_PER_HOUR: f64 = 3600.0;
    /// Seconds in one minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
}
