// ABOUTME: Input limit validation for body weight and session targets
// ABOUTME: Rejects values outside the ranges the workout form accepts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::models::Target;

/// Check a body weight in kilograms
///
/// # Errors
///
/// Returns `ValueOutOfRange` outside 30-150 kg
pub fn validate_weight_kg(weight_kg: f64) -> AppResult<f64> {
    if (limits::MIN_WEIGHT_KG..=limits::MAX_WEIGHT_KG).contains(&weight_kg) {
        Ok(weight_kg)
    } else {
        Err(AppError::out_of_range(format!(
            "Weight must be between {} and {} kg, got {weight_kg}",
            limits::MIN_WEIGHT_KG,
            limits::MAX_WEIGHT_KG
        )))
    }
}

/// Check a session target against the hold and repetition limits
///
/// # Errors
///
/// Returns `ValueOutOfRange` for holds outside 5-600 s or reps outside 1-100
pub fn validate_target(target: Target) -> AppResult<Target> {
    match target {
        Target::Reps(reps) if !(limits::MIN_TARGET_REPS..=limits::MAX_TARGET_REPS).contains(&reps) => {
            Err(AppError::out_of_range(format!(
                "Target reps must be between {} and {}, got {reps}",
                limits::MIN_TARGET_REPS,
                limits::MAX_TARGET_REPS
            )))
        }
        Target::Seconds(seconds)
            if !(limits::MIN_HOLD_SECONDS..=limits::MAX_HOLD_SECONDS).contains(&seconds) =>
        {
            Err(AppError::out_of_range(format!(
                "Hold time must be between {} and {} seconds, got {seconds}",
                limits::MIN_HOLD_SECONDS,
                limits::MAX_HOLD_SECONDS
            )))
        }
        _ => Ok(target),
    }
}
