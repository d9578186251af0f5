// ABOUTME: Ctrl-C handling for getupgo-cli
// ABOUTME: Turns the first interrupt into an exit signal for the running session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

use getupgo::session::{control_channel, ControlReceiver};
use tokio::signal;
use tracing::{info, warn};

/// Control receiver that flips to `Exit` on Ctrl-C
pub fn exit_on_interrupt() -> ControlReceiver {
    let (handle, receiver) = control_channel();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupt received, stopping session");
                handle.exit();
            }
            Err(e) => warn!("Cannot listen for Ctrl-C: {e}"),
        }
    });
    receiver
}
