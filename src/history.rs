// ABOUTME: Append-only workout history log with in-memory and JSON-lines file backends
// ABOUTME: Records are written once after a session ends and never mutated afterwards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::models::SessionResult;

/// Append-only store of session results
pub trait HistoryLog: Send {
    /// Append one record
    ///
    /// # Errors
    ///
    /// Returns a storage error when the record cannot be persisted
    fn append(&mut self, result: &SessionResult) -> AppResult<()>;

    /// All records, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be read
    fn entries(&self) -> AppResult<Vec<SessionResult>>;
}

/// History held for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Vec<SessionResult>,
}

impl MemoryHistory {
    /// Empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HistoryLog for MemoryHistory {
    fn append(&mut self, result: &SessionResult) -> AppResult<()> {
        self.entries.push(result.clone());
        Ok(())
    }

    fn entries(&self) -> AppResult<Vec<SessionResult>> {
        Ok(self.entries.clone())
    }
}

/// History stored as one JSON object per line
#[derive(Debug, Clone)]
pub struct JsonlHistory {
    path: PathBuf,
}

impl JsonlHistory {
    /// History backed by `path`; the file is created on first append
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryLog for JsonlHistory {
    fn append(&mut self, result: &SessionResult) -> AppResult<()> {
        let line = serde_json::to_string(result)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                AppError::storage(format!("Cannot open history {}: {e}", self.path.display()))
            })?;
        writeln!(file, "{line}")?;
        debug!(path = %self.path.display(), session.id = %result.session_id, "history appended");
        Ok(())
    }

    fn entries(&self) -> AppResult<Vec<SessionResult>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(AppError::from))
            .collect()
    }
}
