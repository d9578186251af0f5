// ABOUTME: Core types and constants for the GetUpGo fitness coaching engine
// ABOUTME: Foundation crate with error handling, landmark model, session records, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

#![deny(unsafe_code)]

//! # GetUpGo Core
//!
//! Foundation crate providing shared types and constants for the GetUpGo
//! pose-driven fitness coach. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Domain constants (input limits, default MET, landmark count)
//! - **models**: Landmark frames, activity targets, and session result records

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (landmarks, targets, session results)
pub mod models;
