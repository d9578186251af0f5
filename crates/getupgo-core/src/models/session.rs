// ABOUTME: Activity targets, session status, and the immutable session result record
// ABOUTME: SessionResult serializes to the mapping consumed by the UI and the history log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an activity is scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Discrete repetitions (squats, pushups)
    Reps,
    /// Continuous dwell time in a target configuration (plank, yoga poses)
    Hold,
}

/// Unit of a session target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Repetition count
    Reps,
    /// Hold duration in seconds
    Seconds,
}

impl TargetKind {
    /// Wire name of the unit
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reps => "reps",
            Self::Seconds => "seconds",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Goal that terminates a session with success when reached
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target_type", content = "target_value", rename_all = "snake_case")]
pub enum Target {
    /// Reach this many full repetitions
    Reps(u32),
    /// Hold the pose continuously for this many seconds
    Seconds(f64),
}

impl Target {
    /// Unit of the target
    #[must_use]
    pub const fn kind(&self) -> TargetKind {
        match self {
            Self::Reps(_) => TargetKind::Reps,
            Self::Seconds(_) => TargetKind::Seconds,
        }
    }

    /// Numeric goal in the target's unit
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Reps(reps) => f64::from(*reps),
            Self::Seconds(seconds) => *seconds,
        }
    }

    /// True when `progress` (reps or seconds) meets the goal
    #[must_use]
    pub fn is_met_by(&self, progress: f64) -> bool {
        progress >= self.value()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reps(reps) => write!(f, "{reps} reps"),
            Self::Seconds(seconds) => write!(f, "{seconds} seconds"),
        }
    }
}

/// Outcome of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// The target was reached
    Success,
    /// The stream ended, the user quit, or the session failed
    Fail,
}

impl SessionStatus {
    /// Wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Fail => "Fail",
        }
    }
}

/// Which workflow started the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutMode {
    /// Exercise picked by hand
    Manual,
    /// Exercise taken from a weekly schedule
    Scheduled,
}

/// Schedule context stamped onto results produced by a scheduled run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStamp {
    /// Day of the plan (e.g. "Monday")
    pub day: String,
    /// Difficulty level of the plan (e.g. "Beginner")
    pub level: String,
}

/// Immutable record emitted exactly once when a session ends
///
/// Serializes to `{status, exercise, calories, timestamp}` plus `reps` or
/// `time` depending on the activity kind, and optional `error`, `pose`,
/// `mode`, `day`, `level`, and target fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    /// Unique session identifier
    pub session_id: Uuid,
    /// Success or Fail
    pub status: SessionStatus,
    /// Exercise name (for yoga, the activity family)
    pub exercise: String,
    /// Pose name for hold poses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose: Option<String>,
    /// Counted repetitions, in half steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<f64>,
    /// Held duration in seconds
    #[serde(
        default,
        alias = "duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<f64>,
    /// Estimated calories burned
    pub calories: f64,
    /// Time the session ended
    pub timestamp: DateTime<Utc>,
    /// Failure description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Goal the session was run against
    #[serde(flatten)]
    pub target: Option<Target>,
    /// Manual or scheduled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<WorkoutMode>,
    /// Plan day for scheduled sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    /// Plan level for scheduled sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl SessionResult {
    /// Start a failed result for sessions that never produced progress
    #[must_use]
    pub fn failed(exercise: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            status: SessionStatus::Fail,
            exercise: exercise.into(),
            pose: None,
            reps: None,
            time: None,
            calories: 0.0,
            timestamp: Utc::now(),
            error: Some(error.into()),
            target: None,
            mode: None,
            day: None,
            level: None,
        }
    }

    /// True when the session reached its target
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SessionStatus::Success
    }

    /// Stamp the workflow mode
    #[must_use]
    pub const fn with_mode(mut self, mode: WorkoutMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Stamp the target the session was run against
    #[must_use]
    pub const fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Stamp schedule context
    #[must_use]
    pub fn with_schedule(mut self, stamp: ScheduleStamp) -> Self {
        self.mode = Some(WorkoutMode::Scheduled);
        self.day = Some(stamp.day);
        self.level = Some(stamp.level);
        self
    }
}

/// Round to two decimals, as result records are presented
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
