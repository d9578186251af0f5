// ABOUTME: Integration tests for environment configuration and calibration loading
// ABOUTME: Mutates GETUPGO_* variables, so every test runs serially
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::io::Write;
use std::time::Duration;

use getupgo::config::{load_calibration, CoachConfig, Environment};
use getupgo::errors::ErrorCode;
use getupgo::models::Target;
use getupgo::workflow::Coach;
use serial_test::serial;

const VARS: [&str; 10] = [
    "GETUPGO_ENV",
    "GETUPGO_WEIGHT_KG",
    "GETUPGO_PAUSE_POLL_MS",
    "GETUPGO_DEFAULT_HOLD_SECONDS",
    "GETUPGO_DEFAULT_POSE_SECONDS",
    "GETUPGO_DEFAULT_TARGET_REPS",
    "GETUPGO_REP_TOLERANCE",
    "GETUPGO_HISTORY_PATH",
    "GETUPGO_CALIBRATION_PATH",
    "GETUPGO_LOG_LEVEL",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("test"),
        Environment::Testing
    );
    assert_eq!(
        Environment::from_str_or_default("anything"),
        Environment::Development
    );
}

#[test]
#[serial]
fn test_defaults_without_variables() {
    clear_env();
    let config = CoachConfig::from_env().unwrap();

    assert_eq!(config.environment, Environment::Development);
    assert!((config.weight_kg - 60.0).abs() < f64::EPSILON);
    assert_eq!(config.pause_poll, Duration::from_secs(1));
    assert_eq!(config.default_target_reps, 10);
    assert_eq!(config.default_hold_seconds, 30);
    assert_eq!(config.default_pose_seconds, 30);
    assert!(config.rep_tolerance.is_none());
    assert!(config.history_path.is_none());
    assert!(config.calibration_path.is_none());
}

#[test]
#[serial]
fn test_variables_override_defaults() {
    clear_env();
    env::set_var("GETUPGO_ENV", "production");
    env::set_var("GETUPGO_WEIGHT_KG", "72.5");
    env::set_var("GETUPGO_PAUSE_POLL_MS", "250");
    env::set_var("GETUPGO_DEFAULT_TARGET_REPS", "12");
    env::set_var("GETUPGO_DEFAULT_POSE_SECONDS", "45");
    env::set_var("GETUPGO_HISTORY_PATH", "/tmp/getupgo-history.jsonl");

    let config = CoachConfig::from_env().unwrap();
    clear_env();

    assert!(config.environment.is_production());
    assert!((config.weight_kg - 72.5).abs() < f64::EPSILON);
    assert_eq!(config.pause_poll, Duration::from_millis(250));
    assert_eq!(config.default_target_reps, 12);
    assert_eq!(config.default_pose_seconds, 45);
    assert_eq!(
        config.history_path.as_deref().and_then(|path| path.to_str()),
        Some("/tmp/getupgo-history.jsonl")
    );
}

#[test]
#[serial]
fn test_out_of_range_weight_is_rejected() {
    clear_env();
    env::set_var("GETUPGO_WEIGHT_KG", "20");
    let error = CoachConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(error.code, ErrorCode::ValueOutOfRange);
}

#[test]
#[serial]
fn test_unparseable_value_is_a_config_error() {
    clear_env();
    env::set_var("GETUPGO_PAUSE_POLL_MS", "soon");
    let error = CoachConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(error.code, ErrorCode::ConfigError);
    assert!(error.message.contains("GETUPGO_PAUSE_POLL_MS"));
}

#[test]
#[serial]
fn test_missing_calibration_file_fails_coach_construction() {
    clear_env();
    env::set_var("GETUPGO_CALIBRATION_PATH", "/nonexistent/calibration.yaml");
    let config = CoachConfig::from_env().unwrap();
    clear_env();

    assert!(Coach::from_config(config).is_err());
}

#[test]
fn test_unknown_calibration_extension_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(b"rep_tolerance = 5").unwrap();

    assert!(load_calibration(file.path()).is_err());
}

#[test]
#[serial]
fn test_calibrated_tolerance_survives_unless_overridden() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(b"rep_tolerance: 4.0\n").unwrap();

    clear_env();
    env::set_var("GETUPGO_CALIBRATION_PATH", file.path());
    let calibrated = Coach::from_config(CoachConfig::from_env().unwrap()).unwrap();

    env::set_var("GETUPGO_REP_TOLERANCE", "0");
    let exact = Coach::from_config(CoachConfig::from_env().unwrap()).unwrap();
    clear_env();

    assert!((calibrated.rep_tolerance() - 4.0).abs() < f64::EPSILON);
    assert!(exact.rep_tolerance().abs() < f64::EPSILON);
}

#[test]
#[serial]
fn test_pose_default_target_comes_from_environment() {
    clear_env();
    env::set_var("GETUPGO_DEFAULT_POSE_SECONDS", "45");
    let coach = Coach::from_config(CoachConfig::from_env().unwrap()).unwrap();
    clear_env();

    let tree = coach.manual_request("Tree Pose", None).unwrap();
    assert_eq!(tree.target, Target::Seconds(45.0));
    let plank = coach.manual_request("Plank", None).unwrap();
    assert_eq!(plank.target, Target::Seconds(30.0));
}
