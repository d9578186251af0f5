// ABOUTME: Re-exports domain constants from getupgo-core
// ABOUTME: Input limits, defaults, landmark model sizes, and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

pub use getupgo_core::constants::*;
