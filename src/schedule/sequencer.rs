// ABOUTME: One day's scheduled run: an ordered queue of plan items plus daily accumulators
// ABOUTME: Pops items one at a time and escalates Beginner → Intermediate → Advanced → free choice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::parser::ScheduleItem;
use super::plan::SchedulePlan;
use crate::errors::{AppError, AppResult};
use crate::models::ScheduleStamp;

/// Where a finished day goes next
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "next", content = "level", rename_all = "snake_case")]
pub enum Escalation {
    /// The next harder level of the same day was queued
    Level(String),
    /// No harder level remains; the user picks a manual workout or another day
    FreeChoice,
}

/// Mutable state of one day's scheduled run
#[derive(Debug, Clone)]
pub struct ScheduleRun {
    plan: Arc<SchedulePlan>,
    level: String,
    day: String,
    queue: VecDeque<String>,
    current: Option<ScheduleItem>,
    completed: Vec<String>,
    daily_calories: f64,
    aborted: bool,
}

impl ScheduleRun {
    /// Queue the items of `level` on `day`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the plan has no such level
    pub fn start(plan: Arc<SchedulePlan>, level: &str, day: &str) -> AppResult<Self> {
        let queue: VecDeque<String> = plan.items(level, day)?.into();
        let level = plan
            .level(level)
            .map_or_else(|| level.to_owned(), |entry| entry.name.clone());
        info!(level = %level, day = %day, items = queue.len(), "scheduled run started");
        Ok(Self {
            plan,
            level,
            day: day.to_owned(),
            queue,
            current: None,
            completed: Vec::new(),
            daily_calories: 0.0,
            aborted: false,
        })
    }

    /// Next item without removing it, for the announcement
    #[must_use]
    pub fn peek(&self) -> Option<ScheduleItem> {
        self.queue.front().map(|raw| ScheduleItem::parse(raw))
    }

    /// Remove the next item and make it current; nothing once the day was stopped
    pub fn start_next(&mut self) -> Option<ScheduleItem> {
        if self.aborted {
            return None;
        }
        let item = ScheduleItem::parse(&self.queue.pop_front()?);
        self.current = Some(item.clone());
        Some(item)
    }

    /// Drop the next item without running it
    pub fn skip(&mut self) -> Option<String> {
        let skipped = self.queue.pop_front()?;
        info!(item = %skipped, "scheduled item skipped");
        Some(skipped)
    }

    /// Abandon the rest of the day's queue
    pub fn finish_day(&mut self) {
        self.queue.clear();
        self.current = None;
    }

    /// Items still queued, in order
    #[must_use]
    pub fn remaining(&self) -> Vec<&str> {
        self.queue.iter().map(String::as_str).collect()
    }

    /// True when nothing is left for the day
    #[must_use]
    pub fn is_day_complete(&self) -> bool {
        self.queue.is_empty()
    }

    /// Item most recently taken with [`start_next`](Self::start_next)
    #[must_use]
    pub const fn current(&self) -> Option<&ScheduleItem> {
        self.current.as_ref()
    }

    /// Stop the day early
    ///
    /// The interrupted item goes back to the front of the queue, and the
    /// run can no longer start items or escalate.
    pub fn abort(&mut self) {
        if let Some(item) = self.current.take() {
            self.queue.push_front(item.raw);
        }
        if !self.aborted {
            info!(
                level = %self.level,
                day = %self.day,
                remaining = self.queue.len(),
                "scheduled day stopped"
            );
        }
        self.aborted = true;
    }

    /// True once the day was stopped with [`abort`](Self::abort)
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Add a finished item to the daily accumulators
    pub fn record(&mut self, item: &str, calories: f64) {
        self.current = None;
        self.completed.push(item.to_owned());
        self.daily_calories += calories;
    }

    /// Move to the next harder level of the same day
    ///
    /// # Errors
    ///
    /// Returns an error when the day was stopped early or items are still
    /// queued for the current level
    pub fn escalate(&mut self) -> AppResult<Escalation> {
        if self.aborted {
            return Err(AppError::invalid_input(format!(
                "{} was stopped on {} and cannot escalate",
                self.level, self.day
            )));
        }
        if !self.queue.is_empty() {
            return Err(AppError::invalid_input(format!(
                "{} still has {} item(s) queued for {}",
                self.level,
                self.queue.len(),
                self.day
            )));
        }
        let Some(next) = self.plan.next_level(&self.level).map(str::to_owned) else {
            info!(level = %self.level, "final level completed");
            return Ok(Escalation::FreeChoice);
        };

        self.queue = self.plan.items(&next, &self.day)?.into();
        self.completed.clear();
        self.daily_calories = 0.0;
        self.current = None;
        info!(from = %self.level, to = %next, day = %self.day, "schedule escalated");
        self.level.clone_from(&next);
        Ok(Escalation::Level(next))
    }

    /// Items finished today at the current level
    #[must_use]
    pub fn completed(&self) -> &[String] {
        &self.completed
    }

    /// Calories burned today at the current level
    #[must_use]
    pub const fn daily_calories(&self) -> f64 {
        self.daily_calories
    }

    /// Current level name
    #[must_use]
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Day being run
    #[must_use]
    pub fn day(&self) -> &str {
        &self.day
    }

    /// Day and level for result records
    #[must_use]
    pub fn stamp(&self) -> ScheduleStamp {
        ScheduleStamp {
            day: self.day.clone(),
            level: self.level.clone(),
        }
    }
}
