// ABOUTME: Two-phase repetition counter driven by discrete motion signals
// ABOUTME: Counts half steps on each Extended/Contracted crossing so a full cycle is one rep
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::motion::MotionSignal;

/// Which crossing the counter is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepPhase {
    /// Waiting for the body to reach the extended end of the range
    #[default]
    AwaitingExtension,
    /// Waiting for the body to return to the contracted end
    AwaitingContraction,
}

/// Progress reported when a signal moves the counter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepEvent {
    /// Total count after this step, in reps (multiples of 0.5)
    pub count: f64,
    /// True when this step completed a full rep
    pub completed_rep: bool,
}

/// Per-session repetition state
///
/// Half steps are stored as an integer so counts stay exact however long the
/// session runs. `Neutral` signals never move the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepCounter {
    phase: RepPhase,
    half_steps: u32,
}

impl RepCounter {
    /// Fresh counter at zero, waiting for extension
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: RepPhase::AwaitingExtension,
            half_steps: 0,
        }
    }

    /// Feed one frame's signal
    pub fn observe(&mut self, signal: MotionSignal) -> Option<RepEvent> {
        match (self.phase, signal) {
            (RepPhase::AwaitingExtension, MotionSignal::Extended) => {
                self.phase = RepPhase::AwaitingContraction;
            }
            (RepPhase::AwaitingContraction, MotionSignal::Contracted) => {
                self.phase = RepPhase::AwaitingExtension;
            }
            _ => return None,
        }

        self.half_steps = self.half_steps.saturating_add(1);
        let event = RepEvent {
            count: self.count(),
            completed_rep: self.half_steps % 2 == 0,
        };
        trace!(count = event.count, phase = ?self.phase, "rep counter advanced");
        Some(event)
    }

    /// Current count in reps
    #[must_use]
    pub fn count(&self) -> f64 {
        f64::from(self.half_steps) / 2.0
    }

    /// Completed full reps
    #[must_use]
    pub const fn full_reps(&self) -> u32 {
        self.half_steps / 2
    }

    /// Phase the counter is in
    #[must_use]
    pub const fn phase(&self) -> RepPhase {
        self.phase
    }

    /// Return to the initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MotionSignal::{Contracted, Extended, Neutral};

    fn feed(counter: &mut RepCounter, signals: &[MotionSignal]) {
        for signal in signals {
            counter.observe(*signal);
        }
    }

    #[test]
    fn test_two_full_cycles_count_two() {
        let mut counter = RepCounter::new();
        feed(&mut counter, &[Extended, Contracted, Extended, Contracted]);
        assert!((counter.count() - 2.0).abs() < f64::EPSILON);
        assert_eq!(counter.full_reps(), 2);
    }

    #[test]
    fn test_dead_band_oscillation_counts_nothing() {
        let mut counter = RepCounter::new();
        feed(&mut counter, &[Neutral; 50]);
        assert!(counter.count().abs() < f64::EPSILON);
    }

    #[test]
    fn test_repeated_signal_counts_once() {
        let mut counter = RepCounter::new();
        feed(&mut counter, &[Extended, Extended, Neutral, Extended]);
        assert!((counter.count() - 0.5).abs() < f64::EPSILON);
        assert_eq!(counter.phase(), RepPhase::AwaitingContraction);
    }

    #[test]
    fn test_contraction_first_is_ignored() {
        let mut counter = RepCounter::new();
        assert!(counter.observe(Contracted).is_none());
        let event = counter.observe(Extended).unwrap();
        assert!(!event.completed_rep);
        let event = counter.observe(Contracted).unwrap();
        assert!(event.completed_rep);
        assert!((event.count - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let mut counter = RepCounter::new();
        feed(&mut counter, &[Extended, Contracted]);
        counter.reset();
        assert_eq!(counter, RepCounter::new());
    }
}
