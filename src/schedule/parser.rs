// ABOUTME: Parses free-text schedule items like "Squats – 3 sets of 15 reps" into exercise and target
// ABOUTME: Rest days yield no target; minutes convert to seconds; otherwise the last integer is reps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::Target;

/// Matches: 1 min, 1.5 min, 2 minutes
static MINUTES_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d+(\.\d+)?)\s*min").ok());

/// Matches: 45 sec, 90 seconds
static SECONDS_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*sec").ok());

static INTEGER_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\d+").ok());

const EN_DASH: char = '\u{2013}';

/// One parsed line of a day's plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// Text as written in the plan
    pub raw: String,
    /// Normalised exercise name, `None` on rest days
    pub exercise: Option<String>,
    /// Parsed goal, `None` when the text names none
    pub target: Option<Target>,
}

impl ScheduleItem {
    /// Parse one plan line
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if is_rest(raw) {
            return Self {
                raw: raw.to_owned(),
                exercise: None,
                target: None,
            };
        }
        let (name, target_text) = split_item(raw);
        Self {
            raw: raw.to_owned(),
            exercise: Some(normalize_exercise_name(name)),
            target: parse_target(target_text),
        }
    }

    /// True for rest entries
    #[must_use]
    pub const fn is_rest(&self) -> bool {
        self.exercise.is_none()
    }
}

fn is_rest(text: &str) -> bool {
    text.to_lowercase().contains("rest")
}

/// Extract the goal from an item's target text
///
/// Rest text and text without a number give `None`. A minute quantity wins
/// over a second quantity; anything else takes the last integer as reps.
#[must_use]
pub fn parse_target(text: &str) -> Option<Target> {
    if text.trim().is_empty() || is_rest(text) {
        return None;
    }
    let lower = text.to_lowercase();

    if let Some(minutes) = first_capture(&MINUTES_PATTERN, &lower)
        .and_then(|value| value.parse::<f64>().ok())
    {
        return Some(Target::Seconds((minutes * 60.0).trunc()));
    }

    if let Some(seconds) =
        first_capture(&SECONDS_PATTERN, &lower).and_then(|value| value.parse::<u32>().ok())
    {
        return Some(Target::Seconds(f64::from(seconds)));
    }

    INTEGER_PATTERN
        .as_ref()?
        .find_iter(&lower)
        .last()
        .and_then(|found| found.as_str().parse().ok())
        .map(Target::Reps)
}

fn first_capture<'t>(pattern: &LazyLock<Option<Regex>>, text: &'t str) -> Option<&'t str> {
    pattern
        .as_ref()?
        .captures(text)?
        .get(1)
        .map(|found| found.as_str())
}

/// Split "Name – target text" on the first en dash, else the first hyphen
#[must_use]
pub fn split_item(item: &str) -> (&str, &str) {
    item.split_once(EN_DASH)
        .or_else(|| item.split_once('-'))
        .map_or((item.trim(), ""), |(name, rest)| (name.trim(), rest.trim()))
}

/// Canonical exercise name for a plan entry
///
/// Anything mentioning tree, warrior or chair is that yoga pose; other names
/// are title-cased ("side-lying leg raises" becomes "Side-Lying Leg Raises").
#[must_use]
pub fn normalize_exercise_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    for (keyword, pose) in [
        ("tree", "Tree Pose"),
        ("warrior", "Warrior Pose"),
        ("chair", "Chair Pose"),
    ] {
        if lower.contains(keyword) {
            return pose.to_owned();
        }
    }
    title_case(&lower)
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
