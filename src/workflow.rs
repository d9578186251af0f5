// ABOUTME: Manual and scheduled workout workflows built on the session controller
// ABOUTME: Resolves default targets, stamps result metadata, appends history, updates daily totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! # Workout Workflows
//!
//! [`Coach`] is the entry point the UI talks to. A manual workout runs one
//! session for an exercise the user picked. A scheduled workout pops the
//! next item of a [`ScheduleRun`], fills in any target the plan text did not
//! give, runs it, and folds the result into the day's totals. Every finished
//! session is appended to the history log exactly once.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::{load_calibration, CoachConfig, IntelligenceConfig};
use crate::errors::AppResult;
use crate::games::FlapController;
use crate::history::{HistoryLog, JsonlHistory, MemoryHistory};
use crate::models::{ActivityKind, SessionResult, Target, WorkoutMode};
use crate::schedule::{ScheduleItem, ScheduleRun};
use crate::session::{
    ControlReceiver, ControlSignal, ExerciseDescriptor, ExerciseRegistry, PoseDetector,
    SessionController, SessionEvent, SessionRequest, SessionState, VideoSource,
};

/// What happened when the next scheduled item was taken
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduledStep {
    /// Nothing was left for the day
    DayComplete,
    /// The item was a rest entry; nothing was tracked
    Rest(ScheduleItem),
    /// A session ran (or failed to start) and produced this record
    Finished(SessionResult),
    /// The user exited; the day stopped at this item and nothing was recorded
    Aborted(Option<ScheduleItem>),
}

/// Workout front door: registry, controller, and history in one place
pub struct Coach {
    config: CoachConfig,
    controller: SessionController,
    history: Box<dyn HistoryLog>,
    rep_tolerance: f64,
}

impl Coach {
    /// Coach over explicit calibration and history
    #[must_use]
    pub fn new(
        config: CoachConfig,
        intelligence: &IntelligenceConfig,
        history: Box<dyn HistoryLog>,
    ) -> Self {
        let registry = Arc::new(ExerciseRegistry::builtin(intelligence));
        let controller = SessionController::new(registry).with_pause_poll(config.pause_poll);
        Self {
            config,
            controller,
            history,
            rep_tolerance: intelligence.rep_tolerance,
        }
    }

    /// Coach built from runtime configuration
    ///
    /// Loads the calibration file and the JSON-lines history when their
    /// paths are set; otherwise uses the shipped tables and in-memory history.
    ///
    /// # Errors
    ///
    /// Returns an error when the calibration file cannot be loaded
    pub fn from_config(config: CoachConfig) -> AppResult<Self> {
        let mut intelligence = match &config.calibration_path {
            Some(path) => load_calibration(path)?,
            None => IntelligenceConfig::default(),
        };
        if let Some(tolerance) = config.rep_tolerance {
            intelligence.rep_tolerance = tolerance;
        }
        let history = config.history_path.as_ref().map_or_else(
            || Box::new(MemoryHistory::new()) as Box<dyn HistoryLog>,
            |path| Box::new(JsonlHistory::new(path.clone())) as Box<dyn HistoryLog>,
        );
        Ok(Self::new(config, &intelligence, history))
    }

    /// Forward live session events to `sender`
    #[must_use]
    pub fn with_events(mut self, sender: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.controller = self.controller.with_events(sender);
        self
    }

    /// Registered exercises
    #[must_use]
    pub fn registry(&self) -> &ExerciseRegistry {
        self.controller.registry()
    }

    /// Runtime configuration
    #[must_use]
    pub const fn config(&self) -> &CoachConfig {
        &self.config
    }

    /// Rep trigger tolerance in effect, in percent of range of motion
    #[must_use]
    pub const fn rep_tolerance(&self) -> f64 {
        self.rep_tolerance
    }

    /// Arm-raise game controller using the coach's pause poll and tolerance
    #[must_use]
    pub fn game_controller(&self) -> FlapController {
        FlapController::default()
            .with_tolerance(self.rep_tolerance)
            .with_pause_poll(self.config.pause_poll)
    }

    /// History log
    #[must_use]
    pub fn history(&self) -> &dyn HistoryLog {
        self.history.as_ref()
    }

    /// Target used when none was given for `descriptor`
    #[must_use]
    pub fn default_target(&self, descriptor: &ExerciseDescriptor) -> Target {
        match (descriptor.kind, &descriptor.family) {
            (ActivityKind::Reps, _) => Target::Reps(self.config.default_target_reps),
            (ActivityKind::Hold, None) => {
                Target::Seconds(f64::from(self.config.default_hold_seconds))
            }
            (ActivityKind::Hold, Some(_)) => {
                Target::Seconds(f64::from(self.config.default_pose_seconds))
            }
        }
    }

    /// Request for a hand-picked exercise, filling in the default target
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the exercise is not registered
    pub fn manual_request(&self, exercise: &str, target: Option<Target>) -> AppResult<SessionRequest> {
        let handler = self.registry().resolve(exercise)?;
        let target = target.unwrap_or_else(|| self.default_target(handler.descriptor()));
        Ok(SessionRequest::new(handler.descriptor().name.clone(), target)
            .with_weight_kg(self.config.weight_kg))
    }

    /// Run one hand-picked session and record it
    ///
    /// # Errors
    ///
    /// Returns an error when the request is rejected before the session
    /// starts, or when the result cannot be appended to history
    pub async fn run_manual<S, D>(
        &mut self,
        request: &SessionRequest,
        source: &mut S,
        detector: &mut D,
        control: &ControlReceiver,
    ) -> AppResult<SessionResult>
    where
        S: VideoSource,
        D: PoseDetector<S::Image>,
    {
        let outcome = self.controller.run(request, source, detector, control).await?;
        let mut result = outcome.result.with_mode(WorkoutMode::Manual);
        result.timestamp = Utc::now();
        self.history.append(&result)?;
        Ok(result)
    }

    /// Take the next item of `run`, run it, and fold the result into the day
    ///
    /// Unsupported exercises and rejected targets become `Fail` records
    /// carrying the error text rather than errors. An exit request stops the
    /// day: the interrupted item is neither recorded nor written to history,
    /// and the run refuses to escalate.
    ///
    /// # Errors
    ///
    /// Returns an error only when the result cannot be appended to history
    pub async fn run_scheduled_item<S, D>(
        &mut self,
        run: &mut ScheduleRun,
        source: &mut S,
        detector: &mut D,
        control: &ControlReceiver,
    ) -> AppResult<ScheduledStep>
    where
        S: VideoSource,
        D: PoseDetector<S::Image>,
    {
        if run.is_aborted() || control.current() == ControlSignal::Exit {
            run.abort();
            return Ok(ScheduledStep::Aborted(run.peek()));
        }
        let Some(item) = run.start_next() else {
            return Ok(ScheduledStep::DayComplete);
        };
        let Some(exercise) = item.exercise.clone() else {
            info!(item = %item.raw, "rest item");
            run.record(&item.raw, 0.0);
            return Ok(ScheduledStep::Rest(item));
        };

        let target = self.scheduled_target(&exercise, item.target);
        let result = match target {
            Ok(target) => {
                let request =
                    SessionRequest::new(exercise.clone(), target).with_weight_kg(self.config.weight_kg);
                match self.controller.run(&request, source, detector, control).await {
                    Ok(outcome) if outcome.final_state == SessionState::Aborted => {
                        run.abort();
                        return Ok(ScheduledStep::Aborted(Some(item)));
                    }
                    Ok(outcome) => outcome.result,
                    Err(error) => {
                        warn!(exercise = %exercise, error = %error, "scheduled session rejected");
                        SessionResult::failed(exercise.clone(), error.message).with_target(target)
                    }
                }
            }
            Err(error) => {
                warn!(exercise = %exercise, error = %error, "scheduled exercise not supported");
                let mut failed = SessionResult::failed(exercise.clone(), error.message);
                failed.target = item.target;
                failed
            }
        };

        let mut result = result.with_schedule(run.stamp());
        result.timestamp = Utc::now();
        self.history.append(&result)?;
        run.record(&item.raw, result.calories);
        info!(
            item = %item.raw,
            status = result.status.as_str(),
            daily_calories = run.daily_calories(),
            remaining = run.remaining().len(),
            "scheduled item finished"
        );
        Ok(ScheduledStep::Finished(result))
    }

    /// Target for a plan item: planks always hold, missing targets use defaults
    fn scheduled_target(&self, exercise: &str, planned: Option<Target>) -> AppResult<Target> {
        let handler = self.registry().resolve(exercise)?;
        let descriptor = handler.descriptor();
        let target = match (descriptor.kind, planned) {
            (ActivityKind::Hold, Some(Target::Reps(value))) => Target::Seconds(f64::from(value)),
            (ActivityKind::Reps, Some(Target::Seconds(_))) | (_, None) => {
                self.default_target(descriptor)
            }
            (_, Some(target)) => target,
        };
        Ok(target)
    }
}

impl fmt::Debug for Coach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coach")
            .field("config", &self.config)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}
