// ABOUTME: Arm-raise gesture controller for the flapping-bird fitness game
// ABOUTME: Each half step of the arm-raise counter becomes one Flap input; game rendering lives elsewhere
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use std::time::Duration;

use getupgo_intelligence::{JointAngle, MotionRule, MotionSignal, RepCounter};
use serde::Serialize;
use tokio::{task, time};
use tracing::{debug, info};

use crate::constants::defaults;
use crate::errors::AppResult;
use crate::models::LandmarkFrame;
use crate::session::{
    ControlReceiver, ControlSignal, FrameRead, PoseDetector, VideoGuard, VideoSource,
};

/// Input sent to a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameInput {
    /// Flap (or start a new round when the game is idle)
    Flap,
}

/// Arm raise rule: elbow-shoulder-hip angle on both sides, 30°–80°
#[must_use]
pub fn arm_raise_rule() -> MotionRule {
    MotionRule::new(
        "Flap",
        vec![JointAngle::LeftShoulder, JointAngle::RightShoulder],
        30.0,
        80.0,
    )
}

/// Turns arm raises into game inputs
#[derive(Debug, Clone)]
pub struct FlapController {
    rule: MotionRule,
    counter: RepCounter,
    tolerance: f64,
    min_visibility: f32,
    pause_poll: Duration,
    flaps: u64,
}

impl Default for FlapController {
    fn default() -> Self {
        Self::new(arm_raise_rule())
    }
}

impl FlapController {
    /// Controller for a custom gesture rule
    #[must_use]
    pub const fn new(rule: MotionRule) -> Self {
        Self {
            rule,
            counter: RepCounter::new(),
            tolerance: 0.0,
            min_visibility: 0.0,
            pause_poll: Duration::from_millis(defaults::PAUSE_POLL_MS),
            flaps: 0,
        }
    }

    /// Accept triggers within `tolerance` percent of the range ends
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Idle interval between control polls while paused
    #[must_use]
    pub const fn with_pause_poll(mut self, pause_poll: Duration) -> Self {
        self.pause_poll = pause_poll;
        self
    }

    /// Feed one frame; frames without a body are ignored
    pub fn observe(&mut self, frame: Option<&LandmarkFrame>) -> Option<GameInput> {
        let frame = frame?;
        let signal = self
            .rule
            .classify(Some(frame), self.tolerance, self.min_visibility);
        if signal == MotionSignal::Neutral {
            return None;
        }
        // Every half step is consumed by the game as soon as it lands
        self.counter.observe(signal)?;
        self.flaps += 1;
        debug!(flaps = self.flaps, "flap");
        Some(GameInput::Flap)
    }

    /// Inputs emitted so far
    #[must_use]
    pub const fn flaps(&self) -> u64 {
        self.flaps
    }

    /// Read frames until the stream ends or the control signal says exit,
    /// handing every input to `on_input`
    ///
    /// # Errors
    ///
    /// Returns the source's open or read error, or the detector's error
    pub async fn pump<S, D, F>(
        &mut self,
        source: &mut S,
        detector: &mut D,
        control: &ControlReceiver,
        mut on_input: F,
    ) -> AppResult<u64>
    where
        S: VideoSource,
        D: PoseDetector<S::Image>,
        F: FnMut(GameInput),
    {
        let mut guard = VideoGuard::open(source)?;
        let start = self.flaps;
        loop {
            match control.current() {
                ControlSignal::Exit => break,
                ControlSignal::Paused => {
                    time::sleep(self.pause_poll).await;
                    continue;
                }
                ControlSignal::Running => {}
            }
            let image = match guard.read()? {
                FrameRead::Frame(frame) => frame.image,
                FrameRead::Dropped { .. } => {
                    task::yield_now().await;
                    continue;
                }
                FrameRead::Exhausted => break,
            };
            let landmarks = detector.detect(&image)?;
            if let Some(input) = self.observe(landmarks.as_ref()) {
                on_input(input);
            }
            task::yield_now().await;
        }
        guard.release();
        let emitted = self.flaps - start;
        info!(inputs = emitted, "gesture stream ended");
        Ok(emitted)
    }
}
