// ABOUTME: Contracts for the external video source and body-landmark detector
// ABOUTME: VideoGuard releases the capture resource on every exit path, including early returns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use std::time::Duration;

use tracing::debug;

use crate::errors::AppResult;
use crate::models::LandmarkFrame;

/// One image pulled from a video source
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedFrame<I> {
    /// Source-specific image payload
    pub image: I,
    /// Offset from the start of the stream
    pub timestamp: Duration,
}

/// Result of pulling from a video source
#[derive(Debug, Clone, PartialEq)]
pub enum FrameRead<I> {
    /// A frame was captured
    Frame(CapturedFrame<I>),
    /// The source produced nothing this tick; treated as "no person visible"
    Dropped {
        /// Offset from the start of the stream
        timestamp: Duration,
    },
    /// The stream has ended
    Exhausted,
}

/// Exclusive video capture resource (camera, recording)
pub trait VideoSource {
    /// Image type handed to the detector
    type Image;

    /// Acquire the resource
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` when the device or file cannot be opened
    fn open(&mut self) -> AppResult<()>;

    /// Pull the next frame
    ///
    /// # Errors
    ///
    /// Returns an error when the device fails mid-stream
    fn read(&mut self) -> AppResult<FrameRead<Self::Image>>;

    /// Release the resource; must be safe to call more than once
    fn release(&mut self);
}

/// Black-box body landmark detector
pub trait PoseDetector<I> {
    /// Landmarks for one image, `None` when no body is found
    ///
    /// # Errors
    ///
    /// Returns an error when the detector itself fails
    fn detect(&mut self, image: &I) -> AppResult<Option<LandmarkFrame>>;
}

/// Scoped ownership of an opened video source
///
/// The source is released when the guard is dropped, so a session cannot
/// leak the camera on any path out of the frame loop.
pub struct VideoGuard<'a, S: VideoSource + ?Sized> {
    source: &'a mut S,
    released: bool,
}

impl<'a, S: VideoSource + ?Sized> VideoGuard<'a, S> {
    /// Open the source and take scoped ownership of it
    ///
    /// # Errors
    ///
    /// Returns the source's open error; the source is released before returning
    pub fn open(source: &'a mut S) -> AppResult<Self> {
        if let Err(error) = source.open() {
            source.release();
            return Err(error);
        }
        debug!("video source opened");
        Ok(Self {
            source,
            released: false,
        })
    }

    /// Pull the next frame
    ///
    /// # Errors
    ///
    /// Returns the source's read error
    pub fn read(&mut self) -> AppResult<FrameRead<S::Image>> {
        if self.released {
            return Ok(FrameRead::Exhausted);
        }
        self.source.read()
    }

    /// Release now instead of at drop
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.source.release();
            debug!("video source released");
        }
    }
}

impl<S: VideoSource + ?Sized> Drop for VideoGuard<'_, S> {
    fn drop(&mut self) {
        self.release();
    }
}
