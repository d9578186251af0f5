// ABOUTME: Joint angle geometry computed from three landmarks per angle
// ABOUTME: Provides angle_at, the JointAngle catalogue, and the per-frame AngleSet
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! Angle Geometry
//!
//! Every pose and motion threshold in the calibration tables was tuned against
//! [`angle_at`], which folds the absolute difference of two ray headings
//! rather than computing the textbook minimal angle between vectors. The two
//! agree for most body geometries but not all, so thresholds and this formula
//! must change together.

use getupgo_core::models::{Joint, Landmark, LandmarkFrame};
use serde::{Deserialize, Serialize};

/// Angle in degrees at vertex `b` formed by the rays `b→a` and `b→c`
///
/// Computed as `|atan2(c - b) - atan2(a - b)|` in degrees, folded to
/// `360 - angle` when it exceeds 180. The argument order of `a` and `c` does
/// not matter. Returns `NaN` when either ray has zero length; every range
/// check treats `NaN` as not satisfied.
#[must_use]
#[allow(clippy::float_cmp)] // Exact zero-length rays only
pub fn angle_at(a: &Landmark, b: &Landmark, c: &Landmark) -> f64 {
    let (ax, ay) = (f64::from(a.x - b.x), f64::from(a.y - b.y));
    let (cx, cy) = (f64::from(c.x - b.x), f64::from(c.y - b.y));
    if (ax == 0.0 && ay == 0.0) || (cx == 0.0 && cy == 0.0) {
        return f64::NAN;
    }

    let radians = cy.atan2(cx) - ay.atan2(ax);
    let angle = radians.to_degrees().abs();
    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Named joint angle used by pose and motion rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointAngle {
    /// Shoulder - hip - knee, left side
    LeftHip,
    /// Shoulder - hip - knee, right side
    RightHip,
    /// Shoulder - elbow - wrist, left side
    LeftElbow,
    /// Shoulder - elbow - wrist, right side
    RightElbow,
    /// Elbow - shoulder - hip, left side
    LeftShoulder,
    /// Elbow - shoulder - hip, right side
    RightShoulder,
    /// Hip - knee - ankle, left side
    LeftKnee,
    /// Hip - knee - ankle, right side
    RightKnee,
    /// Left knee - left hip - right knee (spread between the legs)
    LegSpread,
}

impl JointAngle {
    /// Every angle, in `AngleSet` storage order
    pub const ALL: [Self; 9] = [
        Self::LeftHip,
        Self::RightHip,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LegSpread,
    ];

    /// The `(a, vertex, c)` landmarks that define this angle
    #[must_use]
    pub const fn joints(self) -> (Joint, Joint, Joint) {
        match self {
            Self::LeftHip => (Joint::LeftShoulder, Joint::LeftHip, Joint::LeftKnee),
            Self::RightHip => (Joint::RightShoulder, Joint::RightHip, Joint::RightKnee),
            Self::LeftElbow => (Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist),
            Self::RightElbow => (Joint::RightShoulder, Joint::RightElbow, Joint::RightWrist),
            Self::LeftShoulder => (Joint::LeftElbow, Joint::LeftShoulder, Joint::LeftHip),
            Self::RightShoulder => (Joint::RightHip, Joint::RightShoulder, Joint::RightElbow),
            Self::LeftKnee => (Joint::LeftHip, Joint::LeftKnee, Joint::LeftAnkle),
            Self::RightKnee => (Joint::RightHip, Joint::RightKnee, Joint::RightAnkle),
            Self::LegSpread => (Joint::LeftKnee, Joint::LeftHip, Joint::RightKnee),
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }

    /// Measure this angle on a frame, `NaN` if any landmark is missing
    #[must_use]
    pub fn measure(self, frame: &LandmarkFrame, min_visibility: f32) -> f64 {
        let (a, b, c) = self.joints();
        match (
            frame.visible(a, min_visibility),
            frame.visible(b, min_visibility),
            frame.visible(c, min_visibility),
        ) {
            (Some(a), Some(b), Some(c)) => angle_at(a, b, c),
            _ => f64::NAN,
        }
    }
}

/// Every joint angle of one frame, recomputed per frame and never cached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSet {
    degrees: [f64; JointAngle::ALL.len()],
}

impl AngleSet {
    /// Compute all angles for a frame
    #[must_use]
    pub fn from_frame(frame: &LandmarkFrame, min_visibility: f32) -> Self {
        let mut degrees = [f64::NAN; JointAngle::ALL.len()];
        for angle in JointAngle::ALL {
            degrees[angle.slot()] = angle.measure(frame, min_visibility);
        }
        Self { degrees }
    }

    /// Angle in degrees, `NaN` when it could not be measured
    #[must_use]
    pub const fn get(&self, angle: JointAngle) -> f64 {
        self.degrees[angle.slot()]
    }

    /// True when the angle lies strictly between `min` and `max`
    #[must_use]
    pub fn within(&self, angle: JointAngle, min: f64, max: f64) -> bool {
        let value = self.get(angle);
        min < value && value < max
    }
}
