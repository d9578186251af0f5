// ABOUTME: Exercise catalogue and history commands for getupgo-cli
// ABOUTME: Lists registered exercises with their default targets and prints recorded sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use anyhow::Result;
use getupgo::config::CoachConfig;
use getupgo::models::{ActivityKind, Target};
use getupgo::workflow::Coach;
use tracing::warn;

use crate::helpers::display::print_result;

/// List registered exercises, optionally only one kind
pub fn list(kind: Option<ActivityKind>) -> Result<()> {
    let coach = Coach::from_config(CoachConfig::from_env()?)?;
    for descriptor in coach.registry().descriptors(kind) {
        let target = match coach.default_target(descriptor) {
            Target::Reps(reps) => format!("{reps} reps"),
            Target::Seconds(seconds) => format!("{seconds} s"),
        };
        let family = descriptor
            .family
            .as_deref()
            .map(|family| format!(" [{family}]"))
            .unwrap_or_default();
        let aliases = if descriptor.aliases.is_empty() {
            String::new()
        } else {
            format!(" (also: {})", descriptor.aliases.join(", "))
        };
        println!("{:<16} default {target}{family}{aliases}", descriptor.name);
    }
    Ok(())
}

/// Print every recorded session, oldest first
pub fn history() -> Result<()> {
    let config = CoachConfig::from_env()?;
    if config.history_path.is_none() {
        warn!("GETUPGO_HISTORY_PATH is not set; history is kept in memory only");
    }
    let coach = Coach::from_config(config)?;
    for entry in coach.history().entries()? {
        print_result(&entry)?;
    }
    Ok(())
}
