// ABOUTME: Re-exports command modules for getupgo-cli
// ABOUTME: Provides session replay, schedule, and exercise listing commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

pub mod exercises;
pub mod run;
pub mod schedule;
