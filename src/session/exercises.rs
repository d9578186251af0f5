// ABOUTME: Built-in exercise handlers for repetition exercises and hold poses
// ABOUTME: Wraps the motion and pose classifiers and builds result records with calorie estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use std::sync::Arc;

use chrono::Utc;
use getupgo_intelligence::{CalorieEstimator, MotionRule, PoseClassifier, PoseRule};

use super::handler::{ExerciseDescriptor, ExerciseHandler, Finalization, SessionProgress, Signal};
use crate::models::{round2, ActivityKind, LandmarkFrame, SessionResult, Target};

/// Repetition exercise scored by a motion rule
#[derive(Debug, Clone)]
pub struct RepExerciseHandler {
    descriptor: ExerciseDescriptor,
    rule: MotionRule,
    tolerance: f64,
    min_visibility: f32,
    calories: Arc<CalorieEstimator>,
}

impl RepExerciseHandler {
    /// Handler for one motion rule
    #[must_use]
    pub fn new(
        rule: MotionRule,
        tolerance: f64,
        min_visibility: f32,
        calories: Arc<CalorieEstimator>,
    ) -> Self {
        Self {
            descriptor: ExerciseDescriptor {
                name: rule.name.clone(),
                aliases: rule.aliases.clone(),
                kind: ActivityKind::Reps,
                family: None,
            },
            rule,
            tolerance,
            min_visibility,
            calories,
        }
    }
}

impl ExerciseHandler for RepExerciseHandler {
    fn descriptor(&self) -> &ExerciseDescriptor {
        &self.descriptor
    }

    fn classify(&self, frame: Option<&LandmarkFrame>) -> Signal {
        Signal::Motion(
            self.rule
                .classify(frame, self.tolerance, self.min_visibility),
        )
    }

    fn is_terminal(&self, progress: &SessionProgress, target: &Target) -> bool {
        matches!(target, Target::Reps(_)) && target.is_met_by(progress.reps())
    }

    fn finalize(&self, progress: &SessionProgress, finalization: Finalization) -> SessionResult {
        let reps = progress.reps();
        let calories = self
            .calories
            .for_reps(&self.descriptor.name, finalization.weight_kg, reps);
        SessionResult {
            session_id: finalization.session_id,
            status: finalization.status,
            exercise: self.descriptor.name.clone(),
            pose: None,
            reps: Some(round2(reps)),
            time: None,
            calories: round2(calories),
            timestamp: Utc::now(),
            error: finalization.error,
            target: Some(finalization.target),
            mode: None,
            day: None,
            level: None,
        }
    }
}

/// Hold pose scored by continuous dwell time
#[derive(Debug, Clone)]
pub struct HoldPoseHandler {
    descriptor: ExerciseDescriptor,
    classifier: Arc<PoseClassifier>,
    calories: Arc<CalorieEstimator>,
}

impl HoldPoseHandler {
    /// Handler for one pose rule of `classifier`
    #[must_use]
    pub fn new(rule: &PoseRule, classifier: Arc<PoseClassifier>, calories: Arc<CalorieEstimator>) -> Self {
        Self {
            descriptor: ExerciseDescriptor {
                name: rule.name.clone(),
                aliases: rule.aliases.clone(),
                kind: ActivityKind::Hold,
                family: rule.family.clone(),
            },
            classifier,
            calories,
        }
    }
}

impl ExerciseHandler for HoldPoseHandler {
    fn descriptor(&self) -> &ExerciseDescriptor {
        &self.descriptor
    }

    fn classify(&self, frame: Option<&LandmarkFrame>) -> Signal {
        Signal::Pose(self.classifier.matches(&self.descriptor.name, frame))
    }

    fn is_terminal(&self, progress: &SessionProgress, target: &Target) -> bool {
        matches!(target, Target::Seconds(_)) && progress.hold_timer().is_success(target.value())
    }

    fn finalize(&self, progress: &SessionProgress, finalization: Finalization) -> SessionResult {
        let held = progress.held_seconds();
        let calories =
            self.calories
                .for_duration(&self.descriptor.name, finalization.weight_kg, held);
        let (exercise, pose) = self.descriptor.family.as_ref().map_or_else(
            || (self.descriptor.name.clone(), None),
            |family| (family.clone(), Some(self.descriptor.name.clone())),
        );
        SessionResult {
            session_id: finalization.session_id,
            status: finalization.status,
            exercise,
            pose,
            reps: None,
            time: Some(round2(held)),
            calories: round2(calories),
            timestamp: Utc::now(),
            error: finalization.error,
            target: Some(finalization.target),
            mode: None,
            day: None,
            level: None,
        }
    }
}
