// ABOUTME: Output formatting helpers for getupgo-cli
// ABOUTME: Prints session records as JSON lines plus a short human summary on stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use anyhow::Result;
use getupgo::models::SessionResult;

/// Print `result` as one JSON line on stdout and a summary on stderr
pub fn print_result(result: &SessionResult) -> Result<()> {
    println!("{}", serde_json::to_string(result)?);

    let progress = match (result.reps, result.time) {
        (Some(reps), _) => format!("{reps} reps"),
        (None, Some(time)) => format!("{time} s"),
        (None, None) => "no progress".to_owned(),
    };
    eprintln!(
        "{} {}: {progress}, {} kcal",
        result.status.as_str(),
        result.pose.as_deref().unwrap_or(&result.exercise),
        result.calories
    );
    if let Some(error) = &result.error {
        eprintln!("   error: {error}");
    }
    Ok(())
}

/// Print a titled, numbered list
pub fn print_list(title: &str, items: &[String]) {
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    for (index, item) in items.iter().enumerate() {
        println!("{:>3}. {item}", index + 1);
    }
}
