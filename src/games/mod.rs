// ABOUTME: Body-movement controllers for the arcade fitness games
// ABOUTME: Converts landmark streams into discrete game inputs; game processes are launched elsewhere
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

/// Flapping-bird arm-raise controller
pub mod flap;

pub use flap::{arm_raise_rule, FlapController, GameInput};
