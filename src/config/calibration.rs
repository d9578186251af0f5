// ABOUTME: Loads substitute calibration tables from YAML or JSON files
// ABOUTME: Parsed tables are validated before they reach any classifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use std::fs;
use std::path::Path;

use getupgo_intelligence::IntelligenceConfig;
use tracing::info;

use crate::errors::{AppError, AppResult};

/// Serialization of a calibration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl CalibrationFormat {
    /// Format implied by a file extension
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for any other extension
    pub fn from_path(path: &Path) -> AppResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(AppError::invalid_input(format!(
                "Calibration file must be .yaml, .yml or .json: {}",
                path.display()
            ))),
        }
    }
}

/// Parse and validate a calibration table from text
///
/// # Errors
///
/// Returns an error if the text does not parse or the table fails validation
pub fn parse_calibration(text: &str, format: CalibrationFormat) -> AppResult<IntelligenceConfig> {
    let config: IntelligenceConfig = match format {
        CalibrationFormat::Yaml => serde_yaml::from_str(text)
            .map_err(|e| AppError::config(format!("Invalid calibration YAML: {e}")))?,
        CalibrationFormat::Json => serde_json::from_str(text)
            .map_err(|e| AppError::config(format!("Invalid calibration JSON: {e}")))?,
    };
    config.validate()?;
    Ok(config)
}

/// Load and validate a calibration table from disk
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, or fails validation
pub fn load_calibration(path: &Path) -> AppResult<IntelligenceConfig> {
    let format = CalibrationFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|e| {
        AppError::config(format!("Cannot read {}: {e}", path.display())).with_source(e)
    })?;
    let config = parse_calibration(&text, format)?;
    info!(
        path = %path.display(),
        poses = config.poses.len(),
        motions = config.motions.len(),
        "Calibration loaded"
    );
    Ok(config)
}
