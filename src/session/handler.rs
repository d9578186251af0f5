// ABOUTME: Uniform per-exercise handler interface and the per-session progress it drives
// ABOUTME: Handlers classify frames, decide termination, and build the final result record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! # Exercise Handlers
//!
//! Every exercise the coach supports is an [`ExerciseHandler`] registered in
//! the [`ExerciseRegistry`](super::registry::ExerciseRegistry). The session
//! controller owns a [`SessionProgress`] and calls exactly one handler per
//! session; handlers never call each other.

use std::{fmt, iter};
use std::time::Duration;

use getupgo_intelligence::{HoldEvent, HoldTimer, MotionSignal, RepCounter, RepEvent};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{ActivityKind, LandmarkFrame, SessionResult, SessionStatus, Target};

/// Static description of a registered exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseDescriptor {
    /// Canonical name
    pub name: String,
    /// Alternative names accepted on lookup
    pub aliases: Vec<String>,
    /// Reps or hold
    pub kind: ActivityKind,
    /// Family reported as the result's exercise (e.g. "Yoga")
    pub family: Option<String>,
}

impl ExerciseDescriptor {
    /// Canonical name followed by aliases
    pub fn names(&self) -> impl Iterator<Item = &str> {
        iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// True when `target` has the unit this exercise is scored in
    #[must_use]
    pub const fn accepts(&self, target: &Target) -> bool {
        matches!(
            (self.kind, target),
            (ActivityKind::Reps, Target::Reps(_)) | (ActivityKind::Hold, Target::Seconds(_))
        )
    }
}

/// Per-frame output of a handler's classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Range-of-motion signal for rep exercises
    Motion(MotionSignal),
    /// Whether the frame matches the target pose
    Pose(bool),
}

/// Feedback produced when a frame moves the session forward
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    /// The rep counter advanced
    Rep(RepEvent),
    /// The hold timer changed
    Hold(HoldEvent),
}

/// Mutable progress of one session, owned by the controller
#[derive(Debug, Clone, Default)]
pub struct SessionProgress {
    reps: RepCounter,
    hold: HoldTimer,
    frames: u64,
    last_timestamp: Duration,
    resume_pending: bool,
}

impl SessionProgress {
    /// Fresh progress at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one frame's signal taken at stream offset `now`
    pub fn apply(&mut self, signal: Signal, now: Duration) -> Option<ProgressEvent> {
        if self.resume_pending {
            // The frame interval spanning the pause contributes no hold time
            self.hold.resume(now);
            self.resume_pending = false;
        }
        self.frames += 1;
        self.last_timestamp = now;

        match signal {
            Signal::Motion(motion) => self.reps.observe(motion).map(ProgressEvent::Rep),
            Signal::Pose(matches) => match self.hold.observe(matches, now) {
                HoldEvent::Idle | HoldEvent::Holding { .. } => None,
                event => Some(ProgressEvent::Hold(event)),
            },
        }
    }

    /// Freeze progress until the next applied frame
    pub fn pause(&mut self) {
        self.hold.pause(self.last_timestamp);
        self.resume_pending = true;
    }

    /// Repetitions counted so far
    #[must_use]
    pub fn reps(&self) -> f64 {
        self.reps.count()
    }

    /// Continuous seconds the pose has been held
    #[must_use]
    pub const fn held_seconds(&self) -> f64 {
        self.hold.accumulated_seconds()
    }

    /// Rep counter state
    #[must_use]
    pub const fn rep_counter(&self) -> &RepCounter {
        &self.reps
    }

    /// Hold timer state
    #[must_use]
    pub const fn hold_timer(&self) -> &HoldTimer {
        &self.hold
    }

    /// Frames processed
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }
}

/// Inputs for building the result record at session end
#[derive(Debug, Clone)]
pub struct Finalization {
    /// Session identifier
    pub session_id: Uuid,
    /// Success or Fail
    pub status: SessionStatus,
    /// Failure text, if any
    pub error: Option<String>,
    /// Body weight for the calorie estimate
    pub weight_kg: f64,
    /// Goal the session ran against
    pub target: Target,
}

/// Uniform interface every exercise implements
pub trait ExerciseHandler: Send + Sync + fmt::Debug {
    /// Name, aliases, and scoring kind
    fn descriptor(&self) -> &ExerciseDescriptor;

    /// Turn one frame (or no detection) into a signal
    fn classify(&self, frame: Option<&LandmarkFrame>) -> Signal;

    /// True when progress satisfies the target
    fn is_terminal(&self, progress: &SessionProgress, target: &Target) -> bool;

    /// Build the immutable result record
    fn finalize(&self, progress: &SessionProgress, finalization: Finalization) -> SessionResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_excludes_gap() {
        let mut progress = SessionProgress::new();
        for second in 0..=10 {
            progress.apply(Signal::Pose(true), Duration::from_secs(second));
        }
        progress.pause();
        progress.apply(Signal::Pose(true), Duration::from_secs(60));
        assert!((progress.held_seconds() - 10.0).abs() < 1e-9);
        progress.apply(Signal::Pose(true), Duration::from_secs(61));
        assert!((progress.held_seconds() - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_motion_signals_count_reps() {
        let mut progress = SessionProgress::new();
        let events: Vec<_> = [MotionSignal::Extended, MotionSignal::Contracted]
            .into_iter()
            .filter_map(|signal| progress.apply(Signal::Motion(signal), Duration::ZERO))
            .collect();
        assert_eq!(events.len(), 2);
        assert!((progress.reps() - 1.0).abs() < f64::EPSILON);
        assert_eq!(progress.frames(), 2);
    }

    #[test]
    fn test_descriptor_accepts_matching_unit() {
        let descriptor = ExerciseDescriptor {
            name: "Plank".to_owned(),
            aliases: Vec::new(),
            kind: ActivityKind::Hold,
            family: None,
        };
        assert!(descriptor.accepts(&Target::Seconds(30.0)));
        assert!(!descriptor.accepts(&Target::Reps(10)));
    }
}
