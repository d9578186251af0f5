// ABOUTME: Weekly workout plans: difficulty level × weekday → ordered free-text items
// ABOUTME: Ships the built-in Beginner/Intermediate/Advanced table and loads custom plans from YAML
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! Weekly plan tables
//!
//! A plan file is a YAML (or JSON) mapping from level name to day name to an
//! ordered list of items. Mapping order is significant: levels escalate in
//! the order they are written.
//!
//! ```yaml
//! Beginner:
//!   Monday: ["Squats – 3 sets of 15 reps", "Tree Pose – 30 sec"]
//!   Thursday: ["Rest or gentle Yoga"]
//! ```

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::errors::{AppError, AppResult, ErrorCode};

/// Item used for a day missing from a level
pub const REST_DAY_ITEM: &str = "Rest or gentle Yoga";

/// One weekday of a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPlan {
    /// Day name (e.g. "Monday")
    pub day: String,
    /// Items in the order they are performed
    pub items: Vec<String>,
}

/// One difficulty level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelPlan {
    /// Level name (e.g. "Beginner")
    pub name: String,
    /// Days in plan order
    pub days: Vec<DayPlan>,
}

/// Immutable weekly plan table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulePlan {
    levels: Vec<LevelPlan>,
}

impl SchedulePlan {
    /// Plan from explicit levels
    #[must_use]
    pub const fn new(levels: Vec<LevelPlan>) -> Self {
        Self { levels }
    }

    /// The shipped three-level plan
    #[must_use]
    #[rustfmt::skip]
    pub fn builtin() -> Self {
        Self::new(vec![
            level_plan(
                "Beginner",
                [
                    ("Monday", &["Squats – 3 sets of 15 reps", "Pushups – 3 sets of 10 reps", "Tree Pose – 30 sec"]),
                    ("Tuesday", &["Crunches – 3 sets of 15 reps", "Plank – 30 sec", "Warrior Pose – 30 sec"]),
                    ("Wednesday", &["Lunges – 3 sets of 10 reps", "Side-lying leg raises – 3 sets of 12 reps", "Chair Pose – 30 sec"]),
                    ("Thursday", &["Rest or gentle Yoga"]),
                    ("Friday", &["Squats – 4 sets of 15 reps", "Pushups – 3 sets of 12 reps", "Tree Pose – 30 sec"]),
                    ("Saturday", &["Crunches – 4 sets of 20 reps", "Plank – 45 sec", "Warrior Pose – 30 sec"]),
                    ("Sunday", &["Rest or gentle Yoga"]),
                ],
            ),
            level_plan(
                "Intermediate",
                [
                    ("Monday", &["Squats – 4 sets of 20 reps", "Pushups – 4 sets of 15 reps", "Tree Pose – 45 sec"]),
                    ("Tuesday", &["Crunches – 4 sets of 20 reps", "Plank – 45 sec", "Warrior Pose – 45 sec"]),
                    ("Wednesday", &["Lunges – 4 sets of 15 reps", "Side-lying leg raises – 4 sets of 15 reps", "Chair Pose – 45 sec"]),
                    ("Thursday", &["Yoga Flow: Tree → Warrior → Chair Pose (hold 1 min each)"]),
                    ("Friday", &["Squats – 5 sets of 20 reps", "Pushups – 4 sets of 20 reps", "Plank – 1 min"]),
                    ("Saturday", &["Crunches – 5 sets of 25 reps", "Plank – 1 min", "Warrior Pose – 1 min"]),
                    ("Sunday", &["Rest or full-body Yoga flow"]),
                ],
            ),
            level_plan(
                "Advanced",
                [
                    ("Monday", &["Squats – 5 sets of 25 reps", "Pushups – 5 sets of 20 reps", "Plank – 90 sec"]),
                    ("Tuesday", &["Crunches – 5 sets of 30 reps", "Lunges – 5 sets of 20 reps", "Chair Pose – 90 sec"]),
                    ("Wednesday", &["Side-lying leg raises – 5 sets of 20 reps", "Warrior Pose – 90 sec", "Tree Pose – 90 sec"]),
                    ("Thursday", &["Pushups – 6 sets of 25 reps", "Squats – 5 sets of 30 reps", "Plank – 120 sec"]),
                    ("Friday", &["Crunches – 5 sets of 35 reps", "Lunges – 6 sets of 25 reps", "Warrior Pose – 90 sec"]),
                    ("Saturday", &["Chair Pose – 120 sec", "Tree Pose – 120 sec", "Plank – 120 sec"]),
                    ("Sunday", &["Rest or advanced Yoga flow"]),
                ],
            ),
        ])
    }

    /// Parse a plan from YAML or JSON text
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` when the text is not a level → day → list mapping
    pub fn from_yaml(text: &str) -> AppResult<Self> {
        let root: Value = serde_yaml::from_str(text).map_err(|e| {
            AppError::new(ErrorCode::InvalidFormat, format!("Invalid schedule plan: {e}"))
        })?;
        let levels = as_mapping(&root, "plan")?
            .iter()
            .map(|(name, days)| {
                let name = as_string(name, "level name")?;
                let days = as_mapping(days, &name)?
                    .iter()
                    .map(|(day, items)| {
                        let day = as_string(day, "day name")?;
                        let items = items
                            .as_sequence()
                            .ok_or_else(|| invalid(format!("{name}/{day} must be a list")))?
                            .iter()
                            .map(|item| as_string(item, "item"))
                            .collect::<AppResult<Vec<_>>>()?;
                        Ok(DayPlan { day, items })
                    })
                    .collect::<AppResult<Vec<_>>>()?;
                Ok(LevelPlan { name, days })
            })
            .collect::<AppResult<Vec<_>>>()?;

        if levels.is_empty() {
            return Err(invalid("Schedule plan has no levels".to_owned()));
        }
        Ok(Self::new(levels))
    }

    /// Load a plan file
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Level names in escalation order
    #[must_use]
    pub fn levels(&self) -> Vec<&str> {
        self.levels.iter().map(|level| level.name.as_str()).collect()
    }

    /// Look up a level by name (case-insensitive)
    #[must_use]
    pub fn level(&self, name: &str) -> Option<&LevelPlan> {
        self.levels
            .iter()
            .find(|level| level.name.eq_ignore_ascii_case(name))
    }

    /// Day names of a level
    #[must_use]
    pub fn days(&self, level: &str) -> Vec<&str> {
        self.level(level)
            .map(|level| level.days.iter().map(|day| day.day.as_str()).collect())
            .unwrap_or_default()
    }

    /// Items for one day; a day the level does not list is a rest day
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the level does not exist
    pub fn items(&self, level: &str, day: &str) -> AppResult<Vec<String>> {
        let plan = self
            .level(level)
            .ok_or_else(|| AppError::not_found(format!("Schedule level '{level}'")))?;
        Ok(plan
            .days
            .iter()
            .find(|entry| entry.day.eq_ignore_ascii_case(day))
            .map_or_else(|| vec![REST_DAY_ITEM.to_owned()], |entry| entry.items.clone()))
    }

    /// Level after `level`, `None` after the last one
    #[must_use]
    pub fn next_level(&self, level: &str) -> Option<&str> {
        let index = self
            .levels
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(level))?;
        self.levels.get(index + 1).map(|entry| entry.name.as_str())
    }
}

fn level_plan(name: &str, days: [(&str, &[&str]); 7]) -> LevelPlan {
    LevelPlan {
        name: name.to_owned(),
        days: days
            .iter()
            .map(|(day, items)| DayPlan {
                day: (*day).to_owned(),
                items: items.iter().map(|item| (*item).to_owned()).collect(),
            })
            .collect(),
    }
}

impl Default for SchedulePlan {
    fn default() -> Self {
        Self::builtin()
    }
}

fn invalid(message: String) -> AppError {
    AppError::new(ErrorCode::InvalidFormat, message)
}

fn as_mapping<'v>(value: &'v Value, what: &str) -> AppResult<&'v Mapping> {
    value
        .as_mapping()
        .ok_or_else(|| invalid(format!("{what} must be a mapping")))
}

fn as_string(value: &Value, what: &str) -> AppResult<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| invalid(format!("{what} must be a string")))
}
