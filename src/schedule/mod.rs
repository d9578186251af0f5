// ABOUTME: Weekly schedule plans, free-text item parsing, and the per-day run sequencer
// ABOUTME: Turns "Plank – 45 sec" style plan lines into exercise names and typed targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

/// Plan item text parsing
pub mod parser;

/// Level × day plan tables
pub mod plan;

/// Day run queue and escalation
pub mod sequencer;

pub use parser::{normalize_exercise_name, parse_target, split_item, ScheduleItem};
pub use plan::{DayPlan, LevelPlan, SchedulePlan, REST_DAY_ITEM};
pub use sequencer::{Escalation, ScheduleRun};
