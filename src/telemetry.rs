//! Periodic telemetry reporting.
//!
//! A [`Snapshot`] of the monitor is serialized to a single JSON line and
//! emitted through the log facade on the configured interval. Downstream
//! log collectors parse the line; nothing here persists state.

use serde::Serialize;

use crate::adapters::time::MonotonicTime;
use crate::signal::{SigState, SignalMonitor};

/// Point-in-time view of the monitor, shaped for the log pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub uptime_secs: u64,
    pub freq_hz: u32,
    pub avg_freq_hz: u32,
    pub state: SigState,
    pub samples: u32,
}

impl Snapshot {
    pub fn capture(monitor: &SignalMonitor, time: &MonotonicTime) -> Self {
        Self {
            uptime_secs: time.uptime_secs(),
            freq_hz: monitor.read_rate(),
            avg_freq_hz: monitor.avg_rate(),
            state: monitor.read_state(),
            samples: monitor.samples_taken(),
        }
    }

    /// Emit the snapshot as one JSON log line.
    pub fn log(&self) {
        match serde_json::to_string(self) {
            Ok(json) => log::info!("telemetry: {json}"),
            Err(e) => log::warn!("telemetry: serialize failed: {e}"),
        }
    }
}
