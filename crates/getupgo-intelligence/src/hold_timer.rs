// ABOUTME: Continuous dwell-time tracking for hold poses
// ABOUTME: Re-derives held time from the phase start each frame and zeroes it on any break
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! # Hold Timer
//!
//! Time is supplied by the caller as an offset from the start of the frame
//! stream, so the timer is deterministic under replay and test. Held time is
//! always `now - phase_start`, never a running sum of frame gaps.
//!
//! There is no grace period: one non-matching frame resets progress to zero.
//! Pausing freezes the timer; on resume the phase start is shifted forward by
//! the paused gap so the pause is not counted.

use std::time::Duration;

use tracing::debug;

/// What a single frame did to the timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoldEvent {
    /// Pose entered; timing starts at this frame
    Started,
    /// Pose still held
    Holding {
        /// Continuous seconds held so far
        seconds: f64,
    },
    /// Pose broken after being held
    Broken {
        /// Seconds that were discarded
        lost_seconds: f64,
    },
    /// Pose not held and was not held before
    Idle,
}

/// Per-session hold state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoldTimer {
    active: bool,
    accumulated_seconds: f64,
    phase_start: Option<Duration>,
    paused_at: Option<Duration>,
}

impl HoldTimer {
    /// Inactive timer at zero
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: false,
            accumulated_seconds: 0.0,
            phase_start: None,
            paused_at: None,
        }
    }

    /// Feed one frame's match result taken at stream offset `now`
    pub fn observe(&mut self, matches: bool, now: Duration) -> HoldEvent {
        if !matches {
            let lost_seconds = self.accumulated_seconds;
            let was_active = self.active;
            self.clear();
            if was_active {
                debug!(lost_seconds, "hold broken");
                return HoldEvent::Broken { lost_seconds };
            }
            return HoldEvent::Idle;
        }

        match self.phase_start {
            Some(start) if self.active => {
                self.accumulated_seconds = now.saturating_sub(start).as_secs_f64();
                HoldEvent::Holding {
                    seconds: self.accumulated_seconds,
                }
            }
            _ => {
                self.active = true;
                self.phase_start = Some(now);
                self.accumulated_seconds = 0.0;
                HoldEvent::Started
            }
        }
    }

    /// Freeze the timer at stream offset `at`
    pub fn pause(&mut self, at: Duration) {
        if self.paused_at.is_none() {
            self.paused_at = Some(at);
        }
    }

    /// Unfreeze at stream offset `at`, excluding the paused gap
    pub fn resume(&mut self, at: Duration) {
        let Some(paused_at) = self.paused_at.take() else {
            return;
        };
        if let Some(start) = self.phase_start {
            self.phase_start = Some(start + at.saturating_sub(paused_at));
        }
    }

    /// Continuous seconds held so far
    #[must_use]
    pub const fn accumulated_seconds(&self) -> f64 {
        self.accumulated_seconds
    }

    /// True while the pose is being held
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// True while frozen by a pause
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// True when the held time meets `target_seconds`
    #[must_use]
    pub fn is_success(&self, target_seconds: f64) -> bool {
        self.active && self.accumulated_seconds >= target_seconds
    }

    fn clear(&mut self) {
        self.active = false;
        self.accumulated_seconds = 0.0;
        self.phase_start = None;
    }
}
