// ABOUTME: Table-driven hold-pose rules evaluated against one landmark frame
// ABOUTME: Each rule is a conjunction of angle ranges and positional constraints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! # Pose Rules
//!
//! A [`PoseRule`] names a target body configuration ("Tree Pose", "Plank")
//! and lists the [`Constraint`]s that must all hold. Rules are plain data:
//! adding a pose means adding a rule to the table, never touching
//! [`PoseClassifier::matches`].
//!
//! Angle bounds are exclusive, matching the calibration they were tuned with.

use getupgo_core::models::{Joint, LandmarkFrame};
use serde::{Deserialize, Serialize};

use crate::geometry::{AngleSet, JointAngle};

/// One condition inside a pose rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Constraint {
    /// Joint angle strictly between `min` and `max` degrees
    Angle {
        /// Angle to measure
        angle: JointAngle,
        /// Exclusive lower bound
        min: f64,
        /// Exclusive upper bound
        max: f64,
    },
    /// `upper` is higher in the image than `lower` (smaller y)
    Above {
        /// Joint expected on top
        upper: Joint,
        /// Joint expected below
        lower: Joint,
    },
    /// The segment `from`-`to` is within `max_degrees` of horizontal
    Horizontal {
        /// Segment start
        from: Joint,
        /// Segment end
        to: Joint,
        /// Largest accepted tilt
        max_degrees: f64,
    },
    /// Every nested constraint holds
    All {
        /// Nested constraints
        of: Vec<Constraint>,
    },
    /// At least one nested constraint holds
    Any {
        /// Nested constraints
        of: Vec<Constraint>,
    },
}

impl Constraint {
    /// Angle range shorthand
    #[must_use]
    pub const fn angle(angle: JointAngle, min: f64, max: f64) -> Self {
        Self::Angle { angle, min, max }
    }

    /// Same angle range applied to a left/right pair
    #[must_use]
    pub fn both(left: JointAngle, right: JointAngle, min: f64, max: f64) -> [Self; 2] {
        [Self::angle(left, min, max), Self::angle(right, min, max)]
    }

    fn holds(&self, angles: &AngleSet, frame: &LandmarkFrame, min_visibility: f32) -> bool {
        match self {
            Self::Angle { angle, min, max } => angles.within(*angle, *min, *max),
            Self::Above { upper, lower } => match (
                frame.visible(*upper, min_visibility),
                frame.visible(*lower, min_visibility),
            ) {
                (Some(upper), Some(lower)) => upper.y < lower.y,
                _ => false,
            },
            Self::Horizontal {
                from,
                to,
                max_degrees,
            } => match (
                frame.visible(*from, min_visibility),
                frame.visible(*to, min_visibility),
            ) {
                (Some(from), Some(to)) => {
                    let dx = f64::from((to.x - from.x).abs());
                    let dy = f64::from((to.y - from.y).abs());
                    dy.atan2(dx).to_degrees() <= *max_degrees
                }
                _ => false,
            },
            Self::All { of } => of
                .iter()
                .all(|inner| inner.holds(angles, frame, min_visibility)),
            Self::Any { of } => of
                .iter()
                .any(|inner| inner.holds(angles, frame, min_visibility)),
        }
    }
}

/// Named target configuration for a hold activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseRule {
    /// Canonical pose name
    pub name: String,
    /// Alternative names accepted on lookup
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Activity family reported in results (e.g. "Yoga"); the pose name when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Conditions that must all hold
    pub constraints: Vec<Constraint>,
}

impl PoseRule {
    /// True when `name` is the canonical name or an alias (case-insensitive)
    #[must_use]
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    }

    /// Evaluate the rule on precomputed angles
    #[must_use]
    pub fn holds(&self, angles: &AngleSet, frame: &LandmarkFrame, min_visibility: f32) -> bool {
        self.constraints
            .iter()
            .all(|constraint| constraint.holds(angles, frame, min_visibility))
    }

    /// Rules shipped with the application
    #[must_use]
    pub fn builtin_catalog() -> Vec<Self> {
        use JointAngle::{
            LeftElbow, LeftHip, LeftKnee, LeftShoulder, RightElbow, RightHip, RightKnee,
            RightShoulder,
        };

        let tree = Self {
            name: "Tree Pose".to_owned(),
            family: Some("Yoga".to_owned()),
            aliases: vec!["Tree".to_owned()],
            constraints: [
                Constraint::both(LeftElbow, RightElbow, 165.0, 195.0),
                Constraint::both(LeftShoulder, RightShoulder, 80.0, 110.0),
                Constraint::both(LeftKnee, RightKnee, 160.0, 195.0),
            ]
            .concat(),
        };

        let warrior = Self {
            name: "Warrior II Pose".to_owned(),
            family: Some("Yoga".to_owned()),
            aliases: vec!["Warrior Pose".to_owned(), "Warrior II".to_owned()],
            constraints: [
                Constraint::both(LeftElbow, RightElbow, 150.0, 210.0).to_vec(),
                Constraint::both(LeftShoulder, RightShoulder, 70.0, 120.0).to_vec(),
                vec![Constraint::Any {
                    of: vec![
                        Constraint::All {
                            of: vec![
                                Constraint::angle(LeftKnee, 80.0, 130.0),
                                Constraint::angle(RightKnee, 150.0, 210.0),
                            ],
                        },
                        Constraint::All {
                            of: vec![
                                Constraint::angle(RightKnee, 80.0, 130.0),
                                Constraint::angle(LeftKnee, 150.0, 210.0),
                            ],
                        },
                    ],
                }],
            ]
            .concat(),
        };

        let chair = Self {
            name: "Chair Pose".to_owned(),
            family: Some("Yoga".to_owned()),
            aliases: vec!["Chair".to_owned()],
            constraints: [
                Constraint::both(LeftKnee, RightKnee, 70.0, 140.0).to_vec(),
                Constraint::both(LeftHip, RightHip, 70.0, 130.0).to_vec(),
                vec![
                    Constraint::Above {
                        upper: Joint::LeftWrist,
                        lower: Joint::LeftShoulder,
                    },
                    Constraint::Above {
                        upper: Joint::RightWrist,
                        lower: Joint::RightShoulder,
                    },
                ],
                Constraint::both(LeftElbow, RightElbow, 150.0, 195.0).to_vec(),
            ]
            .concat(),
        };

        let plank = Self {
            name: "Plank".to_owned(),
            aliases: Vec::new(),
            family: None,
            constraints: [
                Constraint::both(LeftHip, RightHip, 150.0, 195.0).to_vec(),
                Constraint::both(LeftKnee, RightKnee, 150.0, 195.0).to_vec(),
                vec![
                    Constraint::Horizontal {
                        from: Joint::LeftShoulder,
                        to: Joint::LeftAnkle,
                        max_degrees: 35.0,
                    },
                    Constraint::Horizontal {
                        from: Joint::RightShoulder,
                        to: Joint::RightAnkle,
                        max_degrees: 35.0,
                    },
                ],
            ]
            .concat(),
        };

        vec![tree, warrior, chair, plank]
    }
}

/// Looks up a pose rule by name and evaluates it against a frame
#[derive(Debug, Clone)]
pub struct PoseClassifier {
    rules: Vec<PoseRule>,
    min_visibility: f32,
}

impl PoseClassifier {
    /// Build a classifier over a rule table
    #[must_use]
    pub const fn new(rules: Vec<PoseRule>, min_visibility: f32) -> Self {
        Self {
            rules,
            min_visibility,
        }
    }

    /// Find a rule by canonical name or alias
    #[must_use]
    pub fn rule(&self, pose_name: &str) -> Option<&PoseRule> {
        self.rules.iter().find(|rule| rule.answers_to(pose_name))
    }

    /// All known rules
    #[must_use]
    pub fn rules(&self) -> &[PoseRule] {
        &self.rules
    }

    /// True when the frame shows the named pose
    ///
    /// Unknown pose names and frames without a detected body are not errors;
    /// they simply do not match.
    #[must_use]
    pub fn matches(&self, pose_name: &str, frame: Option<&LandmarkFrame>) -> bool {
        let (Some(rule), Some(frame)) = (self.rule(pose_name), frame) else {
            return false;
        };
        let angles = AngleSet::from_frame(frame, self.min_visibility);
        rule.holds(&angles, frame, self.min_visibility)
    }
}

impl Default for PoseClassifier {
    fn default() -> Self {
        Self::new(PoseRule::builtin_catalog(), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use getupgo_core::models::Landmark;

    /// Upright body with straight legs and arms held out to the sides
    fn t_pose() -> LandmarkFrame {
        LandmarkFrame::new()
            .with(Joint::LeftShoulder, Landmark::new(0.60, 0.30))
            .with(Joint::RightShoulder, Landmark::new(0.40, 0.30))
            .with(Joint::LeftElbow, Landmark::new(0.75, 0.30))
            .with(Joint::RightElbow, Landmark::new(0.25, 0.30))
            .with(Joint::LeftWrist, Landmark::new(0.90, 0.30))
            .with(Joint::RightWrist, Landmark::new(0.10, 0.30))
            .with(Joint::LeftHip, Landmark::new(0.58, 0.60))
            .with(Joint::RightHip, Landmark::new(0.42, 0.60))
            .with(Joint::LeftKnee, Landmark::new(0.58, 0.75))
            .with(Joint::RightKnee, Landmark::new(0.42, 0.75))
            .with(Joint::LeftAnkle, Landmark::new(0.58, 0.90))
            .with(Joint::RightAnkle, Landmark::new(0.42, 0.90))
    }

    /// T-pose with one knee bent forward, the other leg straight behind
    fn warrior(front_left: bool) -> LandmarkFrame {
        if front_left {
            t_pose()
                .with(Joint::LeftKnee, Landmark::new(0.75, 0.70))
                .with(Joint::LeftAnkle, Landmark::new(0.75, 0.90))
        } else {
            t_pose()
                .with(Joint::RightKnee, Landmark::new(0.25, 0.70))
                .with(Joint::RightAnkle, Landmark::new(0.25, 0.90))
        }
    }

    /// Side-on squat with straight arms either raised overhead or hanging down
    fn chair(arms_up: bool) -> LandmarkFrame {
        let (elbow_dy, wrist_dy) = if arms_up { (-0.15, -0.30) } else { (0.15, 0.30) };
        let (elbow_dx, wrist_dx) = if arms_up { (-0.05, -0.10) } else { (0.0, 0.0) };
        let mut frame = LandmarkFrame::new();
        for (offset, [shoulder, elbow, wrist, hip, knee, ankle]) in [
            (
                0.0,
                [
                    Joint::LeftShoulder,
                    Joint::LeftElbow,
                    Joint::LeftWrist,
                    Joint::LeftHip,
                    Joint::LeftKnee,
                    Joint::LeftAnkle,
                ],
            ),
            (
                0.02,
                [
                    Joint::RightShoulder,
                    Joint::RightElbow,
                    Joint::RightWrist,
                    Joint::RightHip,
                    Joint::RightKnee,
                    Joint::RightAnkle,
                ],
            ),
        ] {
            frame = frame
                .with(shoulder, Landmark::new(0.50, 0.30 + offset))
                .with(elbow, Landmark::new(0.50 + elbow_dx, 0.30 + elbow_dy + offset))
                .with(wrist, Landmark::new(0.50 + wrist_dx, 0.30 + wrist_dy + offset))
                .with(hip, Landmark::new(0.60, 0.55 + offset))
                .with(knee, Landmark::new(0.40, 0.65 + offset))
                .with(ankle, Landmark::new(0.45, 0.90 + offset));
        }
        frame
    }

    /// Side-on body lying in a straight horizontal line
    fn plank() -> LandmarkFrame {
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

    #[test]
    fn test_warrior_matches_with_either_leg_forward() {
        let classifier = PoseClassifier::default();
        assert!(classifier.matches("Warrior II Pose", Some(&warrior(true))));
        assert!(classifier.matches("Warrior Pose", Some(&warrior(false))));
        assert!(!classifier.matches("Tree Pose", Some(&warrior(true))));
        assert!(!classifier.matches("Warrior II Pose", Some(&t_pose())));
    }

    #[test]
    fn test_chair_needs_wrists_above_shoulders() {
        let classifier = PoseClassifier::default();
        assert!(classifier.matches("Chair Pose", Some(&chair(true))));

        let arms_down = chair(false);
        let angles = AngleSet::from_frame(&arms_down, 0.0);
        assert!(angles.within(JointAngle::LeftElbow, 150.0, 195.0));
        assert!(angles.within(JointAngle::LeftKnee, 70.0, 140.0));
        assert!(!classifier.matches("Chair", Some(&arms_down)));
    }

    #[test]
    fn test_plank_matches_horizontal_body() {
        let classifier = PoseClassifier::default();
        assert!(classifier.matches("Plank", Some(&plank())));
        assert!(!classifier.matches("Chair Pose", Some(&plank())));

        // Same body standing up is no longer horizontal
        let standing = LandmarkFrame::new()
            .with(Joint::LeftShoulder, Landmark::new(0.50, 0.20))
            .with(Joint::LeftHip, Landmark::new(0.50, 0.50))
            .with(Joint::LeftKnee, Landmark::new(0.50, 0.65))
            .with(Joint::LeftAnkle, Landmark::new(0.50, 0.80))
            .with(Joint::RightShoulder, Landmark::new(0.52, 0.20))
            .with(Joint::RightHip, Landmark::new(0.52, 0.50))
            .with(Joint::RightKnee, Landmark::new(0.52, 0.65))
            .with(Joint::RightAnkle, Landmark::new(0.52, 0.80));
        assert!(!classifier.matches("Plank", Some(&standing)));
    }

    #[test]
    fn test_angle_on_a_bound_does_not_match() {
        let frame = warrior(true);
        let knee = AngleSet::from_frame(&frame, 0.0).get(JointAngle::LeftKnee);
        let rule = |min: f64, max: f64| PoseRule {
            name: "Lunge".to_owned(),
            aliases: Vec::new(),
            family: None,
            constraints: vec![Constraint::angle(JointAngle::LeftKnee, min, max)],
        };

        let on_min = PoseClassifier::new(vec![rule(knee, 170.0)], 0.0);
        let on_max = PoseClassifier::new(vec![rule(60.0, knee)], 0.0);
        let inside = PoseClassifier::new(vec![rule(knee - 0.01, knee + 0.01)], 0.0);

        assert!(!on_min.matches("Lunge", Some(&frame)));
        assert!(!on_max.matches("Lunge", Some(&frame)));
        assert!(inside.matches("Lunge", Some(&frame)));
    }

    #[test]
    fn test_matching_is_repeatable() {
        let classifier = PoseClassifier::default();
        let frames = [t_pose(), warrior(true), warrior(false), chair(true), chair(false), plank()];
        for rule in classifier.rules() {
            for frame in &frames {
                let first = classifier.matches(&rule.name, Some(frame));
                let copy = frame.clone();
                assert_eq!(first, classifier.matches(&rule.name, Some(frame)));
                assert_eq!(first, classifier.matches(&rule.name, Some(&copy)));
            }
        }
    }

    #[test]
    fn test_t_pose_matches_tree_rule() {
        let classifier = PoseClassifier::default();
        assert!(classifier.matches("Tree Pose", Some(&t_pose())));
        assert!(classifier.matches("tree pose", Some(&t_pose())));
    }

    #[test]
    fn test_t_pose_is_not_plank() {
        let classifier = PoseClassifier::default();
        assert!(!classifier.matches("Plank", Some(&t_pose())));
    }

    #[test]
    fn test_unknown_pose_and_missing_frame_do_not_match() {
        let classifier = PoseClassifier::default();
        assert!(!classifier.matches("Crow Pose", Some(&t_pose())));
        assert!(!classifier.matches("Tree Pose", None));
    }

    #[test]
    fn test_warrior_alias_resolves() {
        let classifier = PoseClassifier::default();
        let rule = classifier.rule("Warrior Pose").unwrap();
        assert_eq!(rule.name, "Warrior II Pose");
    }

    #[test]
    fn test_rules_round_trip_through_json() {
        let rules = PoseRule::builtin_catalog();
        let json = serde_json::to_string(&rules).unwrap();
        let parsed: Vec<PoseRule> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rules);
    }
}
