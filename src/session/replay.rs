// ABOUTME: Recorded landmark streams replayed as a video source
// ABOUTME: Reads JSON-lines recordings or in-memory frame lists; detection is a passthrough
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

//! Replay of recorded landmark streams
//!
//! Each line of a recording is one frame:
//!
//! ```json
//! {"t": 0.033, "landmarks": [[0.51, 0.22, 0.0, 0.99], ...]}
//! {"t": 0.066, "landmarks": null}
//! ```
//!
//! `landmarks` holds up to 33 `[x, y, z, visibility]` rows in detector
//! index order, with `null` rows for joints the detector missed; a `null`
//! list means no body was detected in that frame.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::source::{CapturedFrame, FrameRead, PoseDetector, VideoSource};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::LandmarkFrame;

/// One recorded frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Seconds since the start of the recording
    #[serde(alias = "timestamp")]
    pub t: f64,
    /// Detector output rows, `None` when no body was found
    #[serde(default)]
    pub landmarks: Option<Vec<Option<[f32; 4]>>>,
}

impl RecordedFrame {
    /// Frame carrying a landmark snapshot
    #[must_use]
    pub fn detected(t: f64, frame: &LandmarkFrame) -> Self {
        Self {
            t,
            landmarks: Some(frame.rows()),
        }
    }

    /// Frame with no detected body
    #[must_use]
    pub const fn empty(t: f64) -> Self {
        Self { t, landmarks: None }
    }
}

#[derive(Debug, Clone)]
enum ReplayOrigin {
    File(PathBuf),
    Memory(Vec<RecordedFrame>),
    Unavailable(String),
}

/// Video source that replays a recording
#[derive(Debug, Clone)]
pub struct ReplaySource {
    origin: ReplayOrigin,
    pending: VecDeque<RecordedFrame>,
    opened: bool,
    reads: usize,
    releases: usize,
}

impl ReplaySource {
    fn with_origin(origin: ReplayOrigin) -> Self {
        Self {
            origin,
            pending: VecDeque::new(),
            opened: false,
            reads: 0,
            releases: 0,
        }
    }

    /// Replay a JSON-lines recording from disk
    #[must_use]
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::with_origin(ReplayOrigin::File(path.into()))
    }

    /// Replay frames held in memory
    #[must_use]
    pub fn from_frames(frames: Vec<RecordedFrame>) -> Self {
        Self::with_origin(ReplayOrigin::Memory(frames))
    }

    /// Source whose `open` always fails, as an unplugged camera does
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::with_origin(ReplayOrigin::Unavailable(reason.into()))
    }

    /// True between a successful `open` and `release`
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.opened
    }

    /// Frames handed out so far
    #[must_use]
    pub const fn reads(&self) -> usize {
        self.reads
    }

    /// Number of `release` calls
    #[must_use]
    pub const fn releases(&self) -> usize {
        self.releases
    }

    fn parse_recording(path: &Path) -> AppResult<Vec<RecordedFrame>> {
        let text = fs::read_to_string(path).map_err(|e| {
            AppError::resource_unavailable(format!("Cannot open recording {}: {e}", path.display()))
        })?;
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| {
                    AppError::new(
                        ErrorCode::InvalidFormat,
                        format!("{} line {}: {e}", path.display(), index + 1),
                    )
                })
            })
            .collect()
    }
}

impl VideoSource for ReplaySource {
    type Image = Option<Vec<Option<[f32; 4]>>>;

    fn open(&mut self) -> AppResult<()> {
        let frames = match &self.origin {
            ReplayOrigin::File(path) => Self::parse_recording(path)?,
            ReplayOrigin::Memory(frames) => frames.clone(),
            ReplayOrigin::Unavailable(reason) => {
                return Err(AppError::resource_unavailable(reason.clone()));
            }
        };
        info!(frames = frames.len(), "replay opened");
        self.pending = frames.into();
        self.opened = true;
        Ok(())
    }

    fn read(&mut self) -> AppResult<FrameRead<Self::Image>> {
        if !self.opened {
            return Err(AppError::resource_unavailable("Replay source is not open"));
        }
        let Some(frame) = self.pending.pop_front() else {
            return Ok(FrameRead::Exhausted);
        };
        self.reads += 1;
        let timestamp = Duration::try_from_secs_f64(frame.t).map_err(|e| {
            AppError::new(
                ErrorCode::InvalidFormat,
                format!("Invalid frame timestamp {}: {e}", frame.t),
            )
        })?;
        Ok(FrameRead::Frame(CapturedFrame {
            image: frame.landmarks,
            timestamp,
        }))
    }

    fn release(&mut self) {
        if self.opened {
            debug!(remaining = self.pending.len(), "replay released");
        }
        self.opened = false;
        self.pending.clear();
        self.releases += 1;
    }
}

/// Detector for replayed streams: the landmarks are already in the frame
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayDetector;

impl PoseDetector<Option<Vec<Option<[f32; 4]>>>> for ReplayDetector {
    fn detect(
        &mut self,
        image: &Option<Vec<Option<[f32; 4]>>>,
    ) -> AppResult<Option<LandmarkFrame>> {
        image
            .as_deref()
            .map(LandmarkFrame::from_rows)
            .transpose()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_memory_replay_reads_then_exhausts() {
        let mut source = ReplaySource::from_frames(vec![RecordedFrame::empty(0.0)]);
        source.open().unwrap();
        assert!(matches!(source.read().unwrap(), FrameRead::Frame(_)));
        assert_eq!(source.read().unwrap(), FrameRead::Exhausted);
        source.release();
        assert!(!source.is_open());
    }

    #[test]
    fn test_unavailable_source_fails_to_open() {
        let mut source = ReplaySource::unavailable("camera 0 not found");
        let error = source.open().unwrap_err();
        assert_eq!(error.code, ErrorCode::ResourceUnavailable);
    }

    #[test]
    fn test_file_replay_and_passthrough_detection() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"t": 0.0, "landmarks": [[0.5, 0.5, 0.0, 1.0]]}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"timestamp": 0.5, "landmarks": null}}"#).unwrap();

        let mut source = ReplaySource::from_file(file.path());
        source.open().unwrap();
        let mut detector = ReplayDetector;

        let FrameRead::Frame(first) = source.read().unwrap() else {
            panic!("expected a frame");
        };
        assert!(detector.detect(&first.image).unwrap().is_some());

        let FrameRead::Frame(second) = source.read().unwrap() else {
            panic!("expected a frame");
        };
        assert_eq!(second.timestamp, Duration::from_millis(500));
        assert!(detector.detect(&second.image).unwrap().is_none());
    }

    #[test]
    fn test_malformed_line_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();
        let mut source = ReplaySource::from_file(file.path());
        let error = source.open().unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidFormat);
        assert!(error.message.contains("line 1"));
    }
}
