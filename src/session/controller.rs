// ABOUTME: Session controller driving one exercise attempt from first frame to result record
// ABOUTME: Polls the control signal per frame, freezes progress while paused, always releases the source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! # Session Controller
//!
//! One call to [`SessionController::run`] is one workout attempt:
//!
//! ```text
//! Initializing -> Running <-> Paused -> CompletedSuccess | CompletedFail | Aborted
//! ```
//!
//! The loop is cooperative and frame-synchronous. Each iteration reads the
//! control signal, then pulls, detects, classifies and applies exactly one
//! frame. Camera and detector failures end the session with a `Fail`
//! record carrying the error text; they are never returned as `Err`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task;
use tokio::time;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::control::{ControlReceiver, ControlSignal};
use super::handler::{ExerciseHandler, Finalization, ProgressEvent, SessionProgress};
use super::registry::ExerciseRegistry;
use super::source::{FrameRead, PoseDetector, VideoGuard, VideoSource};
use crate::config::{validate_target, validate_weight_kg};
use crate::constants::defaults;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::SessionLogger;
use crate::models::{ActivityKind, SessionResult, SessionStatus, Target, TargetKind};
use getupgo_intelligence::{HoldEvent, RepEvent};

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Acquiring the video source and building the handler
    Initializing,
    /// Processing frames
    Running,
    /// Control signal says pause; progress is frozen
    Paused,
    /// Target reached
    CompletedSuccess,
    /// Stream ended or a failure occurred
    CompletedFail,
    /// User asked to exit
    Aborted,
}

impl SessionState {
    /// True for the three end states
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::CompletedSuccess | Self::CompletedFail | Self::Aborted
        )
    }

    /// Result status for an end state
    #[must_use]
    pub const fn status(self) -> SessionStatus {
        match self {
            Self::CompletedSuccess => SessionStatus::Success,
            _ => SessionStatus::Fail,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initializing => "initializing",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::CompletedSuccess => "completed_success",
            Self::CompletedFail => "completed_fail",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// What to run
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRequest {
    /// Exercise or pose name, aliases accepted
    pub exercise: String,
    /// Goal that ends the session with success
    pub target: Target,
    /// Body weight for the calorie estimate (kg)
    pub weight_kg: f64,
}

impl SessionRequest {
    /// Request with the default body weight
    #[must_use]
    pub fn new(exercise: impl Into<String>, target: Target) -> Self {
        Self {
            exercise: exercise.into(),
            target,
            weight_kg: defaults::WEIGHT_KG,
        }
    }

    /// Override the body weight
    #[must_use]
    pub const fn with_weight_kg(mut self, weight_kg: f64) -> Self {
        self.weight_kg = weight_kg;
        self
    }
}

/// Live feedback for a UI collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Lifecycle transition
    StateChanged {
        /// Previous state
        from: SessionState,
        /// New state
        to: SessionState,
    },
    /// Rep counter advanced by a half step
    RepCounted {
        /// Count after the step
        count: f64,
        /// True when the step finished a full repetition
        completed_rep: bool,
    },
    /// Target pose entered
    HoldStarted,
    /// Target pose lost; progress reset
    HoldBroken {
        /// Seconds held before the break
        lost_seconds: f64,
    },
    /// Shown once per pause entry
    PauseNotice,
    /// Target reached; the session is about to end
    TargetReached,
}

/// End state plus the record it produced
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    /// How the session ended
    pub final_state: SessionState,
    /// Immutable result record
    pub result: SessionResult,
    /// Error code of the failure that ended the session, if any
    pub failure: Option<ErrorCode>,
}

/// Drives sessions for exercises in a shared registry
#[derive(Debug, Clone)]
pub struct SessionController {
    registry: Arc<ExerciseRegistry>,
    pause_poll: Duration,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl SessionController {
    /// Controller with the default pause poll interval
    #[must_use]
    pub fn new(registry: Arc<ExerciseRegistry>) -> Self {
        Self {
            registry,
            pause_poll: Duration::from_millis(defaults::PAUSE_POLL_MS),
            events: None,
        }
    }

    /// Idle interval between control polls while paused
    #[must_use]
    pub const fn with_pause_poll(mut self, pause_poll: Duration) -> Self {
        self.pause_poll = pause_poll;
        self
    }

    /// Forward live events to `sender`
    #[must_use]
    pub fn with_events(mut self, sender: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    /// Shared exercise registry
    #[must_use]
    pub fn registry(&self) -> &ExerciseRegistry {
        &self.registry
    }

    /// Run one session to completion
    ///
    /// # Errors
    ///
    /// Returns an error before any frame is read when the exercise is not
    /// registered, the target unit does not match the exercise, or the
    /// weight or target is outside its limits. Failures after the session
    /// has started are reported as a `Fail` result instead.
    pub async fn run<S, D>(
        &self,
        request: &SessionRequest,
        source: &mut S,
        detector: &mut D,
        control: &ControlReceiver,
    ) -> AppResult<SessionOutcome>
    where
        S: VideoSource,
        D: PoseDetector<S::Image>,
    {
        let handler = self.registry.resolve(&request.exercise)?;
        let descriptor = handler.descriptor();
        if !descriptor.accepts(&request.target) {
            return Err(AppError::invalid_input(format!(
                "{} is scored in {}, got a target of {}",
                descriptor.name,
                match descriptor.kind {
                    ActivityKind::Reps => TargetKind::Reps,
                    ActivityKind::Hold => TargetKind::Seconds,
                },
                request.target
            ))
            .with_exercise(descriptor.name.clone()));
        }
        let target = validate_target(request.target)?;
        let weight_kg = validate_weight_kg(request.weight_kg)?;

        let session_id = Uuid::new_v4();
        SessionLogger::log_session_start(
            &session_id.to_string(),
            &descriptor.name,
            &target.to_string(),
        );

        let mut state = SessionState::Initializing;
        let mut progress = SessionProgress::new();

        let (final_state, error) = match VideoGuard::open(source) {
            Ok(mut guard) => {
                self.transition(&mut state, SessionState::Running);
                let ended = self
                    .drive(
                        &mut guard,
                        detector,
                        control,
                        handler.as_ref(),
                        &target,
                        &mut progress,
                        &mut state,
                    )
                    .await;
                guard.release();
                ended
            }
            Err(error) => (SessionState::CompletedFail, Some(error)),
        };
        self.transition(&mut state, final_state);

        let error = error.map(|error| {
            let error = error
                .with_session_id(session_id)
                .with_exercise(descriptor.name.clone());
            warn!(
                session.id = %session_id,
                error.code = ?error.code,
                error = %error,
                "session failed"
            );
            error
        });
        let failure = error.as_ref().map(|error| error.code);

        let result = handler.finalize(
            &progress,
            Finalization {
                session_id,
                status: final_state.status(),
                error: error.map(|error| error.message),
                weight_kg,
                target,
            },
        );
        SessionLogger::log_session_result(&result);

        Ok(SessionOutcome {
            final_state,
            result,
            failure,
        })
    }

    #[allow(clippy::too_many_arguments)]
    async fn drive<S, D>(
        &self,
        guard: &mut VideoGuard<'_, S>,
        detector: &mut D,
        control: &ControlReceiver,
        handler: &dyn ExerciseHandler,
        target: &Target,
        progress: &mut SessionProgress,
        state: &mut SessionState,
    ) -> (SessionState, Option<AppError>)
    where
        S: VideoSource,
        D: PoseDetector<S::Image>,
    {
        let mut pause_notice_shown = false;

        loop {
            match control.current() {
                ControlSignal::Exit => {
                    info!("exit requested");
                    return (SessionState::Aborted, None);
                }
                ControlSignal::Paused => {
                    if !pause_notice_shown {
                        pause_notice_shown = true;
                        progress.pause();
                        self.transition(state, SessionState::Paused);
                        self.emit(SessionEvent::PauseNotice);
                    }
                    time::sleep(self.pause_poll).await;
                    continue;
                }
                ControlSignal::Running => {
                    if pause_notice_shown {
                        pause_notice_shown = false;
                        self.transition(state, SessionState::Running);
                    }
                }
            }

            let (image, timestamp) = match guard.read() {
                Ok(FrameRead::Frame(frame)) => (Some(frame.image), frame.timestamp),
                Ok(FrameRead::Dropped { timestamp }) => (None, timestamp),
                Ok(FrameRead::Exhausted) => {
                    info!(frames = progress.frames(), "video stream exhausted");
                    return (SessionState::CompletedFail, None);
                }
                Err(error) => {
                    let failure = AppError::processing(error.message.clone()).with_source(error);
                    return (SessionState::CompletedFail, Some(failure));
                }
            };

            let landmarks = match image.as_ref().map(|image| detector.detect(image)) {
                Some(Ok(landmarks)) => landmarks,
                None => None,
                Some(Err(error)) => {
                    let failure = AppError::detector(error.message.clone()).with_source(error);
                    return (SessionState::CompletedFail, Some(failure));
                }
            };

            let signal = handler.classify(landmarks.as_ref());
            if let Some(event) = progress.apply(signal, timestamp) {
                self.report(event);
            }

            if handler.is_terminal(progress, target) {
                debug!(frames = progress.frames(), "target reached");
                self.emit(SessionEvent::TargetReached);
                return (SessionState::CompletedSuccess, None);
            }

            task::yield_now().await;
        }
    }

    fn report(&self, event: ProgressEvent) {
        let event = match event {
            ProgressEvent::Rep(RepEvent {
                count,
                completed_rep,
            }) => {
                debug!(count, completed_rep, "rep counted");
                SessionEvent::RepCounted {
                    count,
                    completed_rep,
                }
            }
            ProgressEvent::Hold(HoldEvent::Started) => SessionEvent::HoldStarted,
            ProgressEvent::Hold(HoldEvent::Broken { lost_seconds }) => {
                SessionEvent::HoldBroken { lost_seconds }
            }
            ProgressEvent::Hold(HoldEvent::Holding { .. } | HoldEvent::Idle) => return,
        };
        self.emit(event);
    }

    fn transition(&self, state: &mut SessionState, next: SessionState) {
        if *state == next {
            return;
        }
        info!(from = %state, to = %next, "session state changed");
        self.emit(SessionEvent::StateChanged {
            from: *state,
            to: next,
        });
        *state = next;
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(sender) = &self.events {
            if sender.send(event).is_err() {
                debug!("session event receiver dropped");
            }
        }
    }
}
