// ABOUTME: Re-exports the unified error type from getupgo-core
// ABOUTME: Keeps AppError and ErrorCode the same type across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

pub use getupgo_core::errors::*;
