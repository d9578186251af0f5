// ABOUTME: Single-session command for getupgo-cli
// ABOUTME: Replays one landmark recording as a manual workout and prints the result record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use std::path::PathBuf;

use anyhow::{bail, Result};
use getupgo::config::CoachConfig;
use getupgo::models::Target;
use getupgo::session::{ReplayDetector, ReplaySource};
use getupgo::workflow::Coach;
use tracing::info;

use crate::helpers::display::print_result;
use crate::helpers::interrupt::exit_on_interrupt;

/// Replay `recording` as a manual session of `exercise`
pub async fn run(
    exercise: &str,
    reps: Option<u32>,
    seconds: Option<f64>,
    recording: PathBuf,
    weight_kg: Option<f64>,
) -> Result<()> {
    let mut config = CoachConfig::from_env()?;
    if let Some(weight_kg) = weight_kg {
        config.weight_kg = weight_kg;
    }
    let mut coach = Coach::from_config(config)?;

    let target = match (reps, seconds) {
        (Some(_), Some(_)) => bail!("Give either --reps or --seconds, not both"),
        (Some(reps), None) => Some(Target::Reps(reps)),
        (None, Some(seconds)) => Some(Target::Seconds(seconds)),
        (None, None) => None,
    };
    let request = coach.manual_request(exercise, target)?;
    info!(
        exercise = %request.exercise,
        recording = %recording.display(),
        "replaying session"
    );

    let mut source = ReplaySource::from_file(recording);
    let control = exit_on_interrupt();
    let result = coach
        .run_manual(&request, &mut source, &mut ReplayDetector, &control)
        .await?;

    print_result(&result)
}
