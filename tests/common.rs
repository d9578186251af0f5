// ABOUTME: Shared test utilities for GetUpGo integration tests
// ABOUTME: Quiet logging setup plus landmark frame builders for planks, squats, and standing bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_precision_loss
)]
//! Shared test utilities for `getupgo`

use std::env;
use std::sync::Once;

use getupgo::models::{Joint, Landmark, LandmarkFrame};
use getupgo::session::{RecordedFrame, ReplaySource};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Side-on body lying in a straight horizontal line
pub fn plank() -> LandmarkFrame {
    LandmarkFrame::new()
        .with(Joint::LeftShoulder, Landmark::new(0.20, 0.50))
        .with(Joint::LeftHip, Landmark::new(0.50, 0.50))
        .with(Joint::LeftKnee, Landmark::new(0.65, 0.50))
        .with(Joint::LeftAnkle, Landmark::new(0.80, 0.50))
        .with(Joint::RightShoulder, Landmark::new(0.20, 0.52))
        .with(Joint::RightHip, Landmark::new(0.50, 0.52))
        .with(Joint::RightKnee, Landmark::new(0.65, 0.52))
        .with(Joint::RightAnkle, Landmark::new(0.80, 0.52))
}

/// Standing body, upright torso, knees in a given state
pub fn squat(bent: bool) -> LandmarkFrame {
    // Knee pushed forward bends the leg well under 90 degrees
    let knee_dx = if bent { 0.3 } else { 0.0 };
    LandmarkFrame::new()
        .with(Joint::LeftShoulder, Landmark::new(0.6, 0.2))
        .with(Joint::LeftHip, Landmark::new(0.6, 0.5))
        .with(Joint::LeftKnee, Landmark::new(0.6 + knee_dx, 0.7))
        .with(Joint::LeftAnkle, Landmark::new(0.6, 0.9))
        .with(Joint::RightShoulder, Landmark::new(0.4, 0.2))
        .with(Joint::RightHip, Landmark::new(0.4, 0.5))
        .with(Joint::RightKnee, Landmark::new(0.4 + knee_dx, 0.7))
        .with(Joint::RightAnkle, Landmark::new(0.4, 0.9))
}

/// Recording of `frames` taken one second apart, starting at `t = 0`
pub fn recording(frames: &[LandmarkFrame]) -> Vec<RecordedFrame> {
    frames
        .iter()
        .enumerate()
        .map(|(index, frame)| RecordedFrame::detected(index as f64, frame))
        .collect()
}

/// Plank held for `seconds + 1` frames, one per second
pub fn plank_source(seconds: usize) -> ReplaySource {
    ReplaySource::from_frames(recording(&vec![plank(); seconds + 1]))
}

/// `reps` full squats: standing, bent, standing, bent, ...
pub fn squat_source(reps: usize) -> ReplaySource {
    let frames: Vec<LandmarkFrame> = (0..reps * 2).map(|index| squat(index % 2 == 1)).collect();
    ReplaySource::from_frames(recording(&frames))
}
