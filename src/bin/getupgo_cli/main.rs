// ABOUTME: GetUpGo CLI - replays recorded landmark streams through coaching sessions
// ABOUTME: Also inspects weekly schedules, parses plan items, and lists registered exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors
//!
//! Usage:
//! ```bash
//! # Replay a recording as a squat session with a 5-rep target
//! getupgo-cli run --exercise squats --reps 5 --recording squats.jsonl
//!
//! # Replay a recording as a 30-second plank
//! getupgo-cli run --exercise plank --seconds 30 --recording plank.jsonl
//!
//! # Show today's beginner plan
//! getupgo-cli schedule show --level Beginner
//!
//! # Run Monday's beginner plan, one recording per item (1.jsonl, 2.jsonl, ...)
//! getupgo-cli schedule run --level Beginner --day Monday --recordings ./monday
//!
//! # Parse one plan line
//! getupgo-cli schedule parse "Plank – 45 sec"
//!
//! # List registered exercises
//! getupgo-cli exercises
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use getupgo::constants::service_names;
use getupgo::logging::LoggingConfig;
use getupgo::models::ActivityKind;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "getupgo-cli",
    about = "GetUpGo fitness coach CLI",
    long_about = "Replay recorded body-landmark streams through coaching sessions and inspect workout schedules."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Run one session over a recorded landmark stream
    Run {
        /// Exercise or pose name (aliases accepted)
        #[arg(long)]
        exercise: String,

        /// Repetition target
        #[arg(long, conflicts_with = "seconds")]
        reps: Option<u32>,

        /// Hold target in seconds
        #[arg(long)]
        seconds: Option<f64>,

        /// JSON-lines landmark recording
        #[arg(long)]
        recording: PathBuf,

        /// Body weight override (kg)
        #[arg(long)]
        weight_kg: Option<f64>,
    },

    /// Weekly schedule commands
    Schedule {
        /// Custom plan file (YAML or JSON); the shipped plan when omitted
        #[arg(long, global = true)]
        plan: Option<PathBuf>,

        #[command(subcommand)]
        action: ScheduleCommand,
    },

    /// List registered exercises
    Exercises {
        /// Only show exercises scored this way
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Print the recorded workout history
    History,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ScheduleCommand {
    /// Show one day of a level
    Show {
        /// Plan level (Beginner, Intermediate, Advanced)
        #[arg(long, default_value = "Beginner")]
        level: String,

        /// Day name; today when omitted
        #[arg(long)]
        day: Option<String>,
    },

    /// Run one day, replaying one recording per item
    Run {
        /// Plan level to start at
        #[arg(long, default_value = "Beginner")]
        level: String,

        /// Day name; today when omitted
        #[arg(long)]
        day: Option<String>,

        /// Directory holding 1.jsonl, 2.jsonl, ... in item order
        #[arg(long)]
        recordings: PathBuf,
    },

    /// Parse a single plan item
    Parse {
        /// Item text, e.g. "Squats – 3 sets of 15 reps"
        item: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Reps,
    Hold,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env().with_service_name(service_names::GETUPGO_CLI);
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;
    debug!("GetUpGo CLI");

    match cli.command {
        Command::Run {
            exercise,
            reps,
            seconds,
            recording,
            weight_kg,
        } => {
            commands::run::run(&exercise, reps, seconds, recording, weight_kg).await?;
        }
        Command::Schedule { plan, action } => {
            let plan = commands::schedule::load_plan(plan.as_deref())?;
            match action {
                ScheduleCommand::Show { level, day } => {
                    commands::schedule::show(&plan, &level, day)?;
                }
                ScheduleCommand::Run {
                    level,
                    day,
                    recordings,
                } => {
                    commands::schedule::run(plan, &level, day, &recordings).await?;
                }
                ScheduleCommand::Parse { item } => {
                    commands::schedule::parse(&item)?;
                }
            }
        }
        Command::Exercises { kind } => {
            commands::exercises::list(kind.map(|kind| match kind {
                KindArg::Reps => ActivityKind::Reps,
                KindArg::Hold => ActivityKind::Hold,
            }))?;
        }
        Command::History => commands::exercises::history()?,
    }

    Ok(())
}
