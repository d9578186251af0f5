// ABOUTME: Core data models shared by the intelligence engine and the session controller
// ABOUTME: Re-exports landmark snapshots, activity targets, and session result records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

/// Body landmark snapshots from the pose detector
pub mod landmark;

/// Activity targets and session result records
pub mod session;

pub use landmark::{Joint, Landmark, LandmarkFrame};
pub use session::{
    round2, ActivityKind, ScheduleStamp, SessionResult, SessionStatus, Target, TargetKind,
    WorkoutMode,
};
