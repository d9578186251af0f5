// ABOUTME: Shared helpers for getupgo-cli commands
// ABOUTME: Output formatting and Ctrl-C wiring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

pub mod display;
pub mod interrupt;
