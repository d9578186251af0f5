// ABOUTME: Body landmark model produced by the external pose detector once per frame
// ABOUTME: Defines the Joint index enum, Landmark points, and the immutable LandmarkFrame snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use serde::{Deserialize, Serialize};

use crate::constants::landmarks::POSE_LANDMARK_COUNT;
use crate::errors::{AppError, AppResult};

/// Named body landmark, numbered the way full-body pose detectors index them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(usize)]
pub enum Joint {
    /// Nose tip
    Nose = 0,
    /// Inner corner of the left eye
    LeftEyeInner = 1,
    /// Left eye centre
    LeftEye = 2,
    /// Outer corner of the left eye
    LeftEyeOuter = 3,
    /// Inner corner of the right eye
    RightEyeInner = 4,
    /// Right eye centre
    RightEye = 5,
    /// Outer corner of the right eye
    RightEyeOuter = 6,
    /// Left ear
    LeftEar = 7,
    /// Right ear
    RightEar = 8,
    /// Left mouth corner
    MouthLeft = 9,
    /// Right mouth corner
    MouthRight = 10,
    /// Left shoulder
    LeftShoulder = 11,
    /// Right shoulder
    RightShoulder = 12,
    /// Left elbow
    LeftElbow = 13,
    /// Right elbow
    RightElbow = 14,
    /// Left wrist
    LeftWrist = 15,
    /// Right wrist
    RightWrist = 16,
    /// Left pinky knuckle
    LeftPinky = 17,
    /// Right pinky knuckle
    RightPinky = 18,
    /// Left index knuckle
    LeftIndex = 19,
    /// Right index knuckle
    RightIndex = 20,
    /// Left thumb
    LeftThumb = 21,
    /// Right thumb
    RightThumb = 22,
    /// Left hip
    LeftHip = 23,
    /// Right hip
    RightHip = 24,
    /// Left knee
    LeftKnee = 25,
    /// Right knee
    RightKnee = 26,
    /// Left ankle
    LeftAnkle = 27,
    /// Right ankle
    RightAnkle = 28,
    /// Left heel
    LeftHeel = 29,
    /// Right heel
    RightHeel = 30,
    /// Left foot index (toe)
    LeftFootIndex = 31,
    /// Right foot index (toe)
    RightFootIndex = 32,
}

impl Joint {
    /// Detector index of this joint
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A single landmark in normalized image coordinates
///
/// `x` grows to the right and `y` grows downward, both in `[0, 1]` for points
/// inside the frame. `z` is relative depth and is ignored by the 2-D rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position
    pub x: f32,
    /// Vertical position (downward)
    pub y: f32,
    /// Relative depth
    #[serde(default)]
    pub z: f32,
    /// Detector confidence that the point is visible
    #[serde(default = "full_visibility")]
    pub visibility: f32,
}

const fn full_visibility() -> f32 {
    1.0
}

impl Landmark {
    /// Create a fully visible 2-D landmark
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    /// Set the visibility score
    #[must_use]
    pub const fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = visibility;
        self
    }
}

/// Snapshot of every detected landmark for one video frame
///
/// Produced by the landmark detector, consumed once by the classifier, then
/// dropped. A frame in which no body was found is represented by the absence
/// of a `LandmarkFrame`, not by an empty one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    points: Vec<Option<Landmark>>,
}

impl Default for LandmarkFrame {
    fn default() -> Self {
        Self {
            points: vec![None; POSE_LANDMARK_COUNT],
        }
    }
}

impl LandmarkFrame {
    /// Create a frame with no joints populated
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from a detector's indexed `[x, y, z, visibility]` output
    ///
    /// # Errors
    ///
    /// Returns `AppError::invalid_input` if more points are supplied than the
    /// landmark model defines
    pub fn from_points(points: &[[f32; 4]]) -> AppResult<Self> {
        let rows: Vec<Option<[f32; 4]>> = points.iter().copied().map(Some).collect();
        Self::from_rows(&rows)
    }

    /// Build a frame from indexed rows where `None` marks an undetected joint
    ///
    /// # Errors
    ///
    /// Returns `AppError::invalid_input` if more rows are supplied than the
    /// landmark model defines
    pub fn from_rows(rows: &[Option<[f32; 4]>]) -> AppResult<Self> {
        if rows.len() > POSE_LANDMARK_COUNT {
            return Err(AppError::invalid_input(format!(
                "Landmark frame has {} points, expected at most {POSE_LANDMARK_COUNT}",
                rows.len()
            )));
        }

        let mut frame = Self::default();
        for (slot, row) in frame.points.iter_mut().zip(rows) {
            *slot = row.map(|[x, y, z, visibility]| Landmark {
                x,
                y,
                z,
                visibility,
            });
        }
        Ok(frame)
    }

    /// Indexed `[x, y, z, visibility]` rows, `None` for undetected joints
    #[must_use]
    pub fn rows(&self) -> Vec<Option<[f32; 4]>> {
        self.points
            .iter()
            .map(|point| point.map(|lm| [lm.x, lm.y, lm.z, lm.visibility]))
            .collect()
    }

    /// Set one joint, returning the updated frame
    #[must_use]
    pub fn with(mut self, joint: Joint, landmark: Landmark) -> Self {
        self.set(joint, landmark);
        self
    }

    /// Set one joint in place
    pub fn set(&mut self, joint: Joint, landmark: Landmark) {
        if let Some(slot) = self.points.get_mut(joint.index()) {
            *slot = Some(landmark);
        }
    }

    /// Look up a joint
    #[must_use]
    pub fn get(&self, joint: Joint) -> Option<&Landmark> {
        self.points.get(joint.index()).and_then(Option::as_ref)
    }

    /// Look up a joint, treating points below `min_visibility` as missing
    #[must_use]
    pub fn visible(&self, joint: Joint, min_visibility: f32) -> Option<&Landmark> {
        self.get(joint)
            .filter(|landmark| landmark.visibility >= min_visibility)
    }

    /// Number of populated joints
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.iter().filter(|point| point.is_some()).count()
    }

    /// True when no joint is populated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
