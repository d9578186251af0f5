// ABOUTME: Pause/resume/exit control signal shared between the UI and a running session
// ABOUTME: Level-triggered watch channel; the session reads the latest value once per frame
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

/// Tri-state control value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlSignal {
    /// Process frames
    #[default]
    Running,
    /// Freeze progress and idle
    Paused,
    /// Stop the session
    Exit,
}

/// Writer side, held by the UI
#[derive(Debug, Clone)]
pub struct ControlHandle {
    sender: watch::Sender<ControlSignal>,
}

/// Reader side, consumed by the session controller
#[derive(Debug, Clone)]
pub struct ControlReceiver {
    receiver: watch::Receiver<ControlSignal>,
}

/// Create a control channel starting in `Running`
#[must_use]
pub fn control_channel() -> (ControlHandle, ControlReceiver) {
    let (sender, receiver) = watch::channel(ControlSignal::Running);
    (ControlHandle { sender }, ControlReceiver { receiver })
}

impl ControlHandle {
    /// Replace the current signal; succeeds even when no session is listening
    pub fn set(&self, signal: ControlSignal) {
        let previous = self.sender.send_replace(signal);
        if previous != signal {
            debug!(from = ?previous, to = ?signal, "control signal changed");
        }
    }

    /// Request a pause
    pub fn pause(&self) {
        self.set(ControlSignal::Paused);
    }

    /// Resume after a pause
    pub fn resume(&self) {
        self.set(ControlSignal::Running);
    }

    /// Request the session to stop
    pub fn exit(&self) {
        self.set(ControlSignal::Exit);
    }

    /// Latest signal
    #[must_use]
    pub fn current(&self) -> ControlSignal {
        *self.sender.borrow()
    }

    /// New reader for another session
    #[must_use]
    pub fn subscribe(&self) -> ControlReceiver {
        ControlReceiver {
            receiver: self.sender.subscribe(),
        }
    }
}

impl ControlReceiver {
    /// Latest signal; may be read any number of times
    #[must_use]
    pub fn current(&self) -> ControlSignal {
        *self.receiver.borrow()
    }

    /// Receiver that stays `Running` forever
    #[must_use]
    pub fn always_running() -> Self {
        let (_, receiver) = watch::channel(ControlSignal::Running);
        Self { receiver }
    }
}
