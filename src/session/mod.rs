// ABOUTME: Workout session orchestration: control signal, video contracts, handlers, and controller
// ABOUTME: Turns a frame stream into exactly one immutable result record per session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

/// Pause/resume/exit control channel
pub mod control;

/// Session state machine and frame loop
pub mod controller;

/// Built-in rep and hold handlers
pub mod exercises;

/// Uniform exercise handler interface
pub mod handler;

/// Exercise lookup by name and alias
pub mod registry;

/// Recorded landmark replay
pub mod replay;

/// Video source and detector contracts
pub mod source;

pub use control::{control_channel, ControlHandle, ControlReceiver, ControlSignal};
pub use controller::{
    SessionController, SessionEvent, SessionOutcome, SessionRequest, SessionState,
};
pub use exercises::{HoldPoseHandler, RepExerciseHandler};
pub use handler::{
    ExerciseDescriptor, ExerciseHandler, Finalization, ProgressEvent, SessionProgress, Signal,
};
pub use registry::ExerciseRegistry;
pub use replay::{RecordedFrame, ReplayDetector, ReplaySource};
pub use source::{CapturedFrame, FrameRead, PoseDetector, VideoGuard, VideoSource};
