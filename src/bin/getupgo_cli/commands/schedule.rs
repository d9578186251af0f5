// ABOUTME: Weekly schedule commands for getupgo-cli
// ABOUTME: Shows plan days, parses plan items, and replays a whole day item by item
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use getupgo::config::CoachConfig;
use getupgo::schedule::{Escalation, ScheduleItem, SchedulePlan, ScheduleRun};
use getupgo::session::{ReplayDetector, ReplaySource};
use getupgo::workflow::{Coach, ScheduledStep};
use tracing::{info, warn};

use crate::helpers::display::{print_list, print_result};
use crate::helpers::interrupt::exit_on_interrupt;

/// Plan from `path`, or the shipped plan
pub fn load_plan(path: Option<&Path>) -> Result<SchedulePlan> {
    Ok(path.map_or_else(|| Ok(SchedulePlan::builtin()), SchedulePlan::load)?)
}

fn today() -> String {
    Local::now().format("%A").to_string()
}

/// Print one day of `level`
pub fn show(plan: &SchedulePlan, level: &str, day: Option<String>) -> Result<()> {
    let day = day.unwrap_or_else(today);
    let items = plan.items(level, &day)?;
    print_list(&format!("{level} - {day}"), &items);
    Ok(())
}

/// Print how a single plan item is understood
pub fn parse(item: &str) -> Result<()> {
    let parsed = ScheduleItem::parse(item);
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

/// Run every item of one day, item N replaying `recordings/N.jsonl`
pub async fn run(plan: SchedulePlan, level: &str, day: Option<String>, recordings: &Path) -> Result<()> {
    let day = day.unwrap_or_else(today);
    let mut coach = Coach::from_config(CoachConfig::from_env()?)?;
    let mut run = ScheduleRun::start(Arc::new(plan), level, &day)?;
    let control = exit_on_interrupt();

    let mut index = 0_usize;
    let finished = loop {
        index += 1;
        let mut source = ReplaySource::from_file(recordings.join(format!("{index}.jsonl")));
        match coach
            .run_scheduled_item(&mut run, &mut source, &mut ReplayDetector, &control)
            .await?
        {
            ScheduledStep::DayComplete => break true,
            ScheduledStep::Aborted(item) => {
                if let Some(item) = item {
                    warn!(item = %item.raw, "stopped before the day was finished");
                }
                break false;
            }
            ScheduledStep::Rest(item) => info!(item = %item.raw, "rest"),
            ScheduledStep::Finished(result) => print_result(&result)?,
        }
    };

    eprintln!(
        "{} {day}: {} items, {} kcal",
        run.level(),
        run.completed().len(),
        run.daily_calories()
    );
    if !finished {
        return Ok(());
    }
    match run.escalate()? {
        Escalation::Level(next) => eprintln!("Next level unlocked: {next}"),
        Escalation::FreeChoice => warn!("final level finished; pick any exercise next"),
    }
    Ok(())
}
