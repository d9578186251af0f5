// ABOUTME: Main library entry point for the GetUpGo webcam fitness coach
// ABOUTME: Session controller, exercise registry, schedule sequencer, workflows, and history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

#![deny(unsafe_code)]

//! # GetUpGo
//!
//! A webcam fitness coach core. Body landmarks come in one frame at a time;
//! repetitions, hold times, calorie estimates and one result record per
//! session come out.
//!
//! ## Architecture
//!
//! - **intelligence** (`getupgo-intelligence`): angle geometry, pose and
//!   motion rules, rep counter, hold timer, calorie estimator
//! - **session**: video/detector contracts, exercise handlers and registry,
//!   the session state machine and its pause/resume/exit control signal
//! - **schedule**: weekly plans, plan-item parsing, the day sequencer
//! - **workflow**: manual and scheduled workouts over a history log
//! - **games**: body-movement input for the arcade games
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use getupgo::config::CoachConfig;
//! use getupgo::errors::AppResult;
//! use getupgo::models::Target;
//! use getupgo::session::{control_channel, ReplayDetector, ReplaySource};
//! use getupgo::workflow::Coach;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let mut coach = Coach::from_config(CoachConfig::from_env()?)?;
//!     let request = coach.manual_request("Plank", Some(Target::Seconds(30.0)))?;
//!
//!     let mut source = ReplaySource::from_file("plank.jsonl");
//!     let (_handle, control) = control_channel();
//!     let result = coach
//!         .run_manual(&request, &mut source, &mut ReplayDetector, &control)
//!         .await?;
//!
//!     println!("{}", serde_json::to_string(&result)?);
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// Unified error handling
pub mod errors;

/// Body-movement game controllers
pub mod games;

/// Append-only workout history
pub mod history;

/// Structured logging setup
pub mod logging;

/// Core data models
pub mod models;

/// Weekly schedules and the day sequencer
pub mod schedule;

/// Session orchestration
pub mod session;

/// Manual and scheduled workout workflows
pub mod workflow;

pub use getupgo_intelligence as intelligence;
