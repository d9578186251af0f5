// ABOUTME: Re-exports landmark and session record models from getupgo-core
// ABOUTME: Ensures LandmarkFrame and SessionResult are the same type across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

pub use getupgo_core::models::*;
