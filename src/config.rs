//! System configuration parameters
//!
//! All tunable parameters for the charger signal monitor. Values can be
//! overridden at boot from a JSON blob (provisioning image or test
//! harness); the defaults match the reference hardware.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::signal::Thresholds;

/// Core monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Sampling ---
    /// Sampling period for the pulse-rate computation (milliseconds)
    pub sample_period_ms: u32,
    /// Classifier band boundaries (Hz, inclusive upper bounds)
    pub thresholds: Thresholds,

    // --- Timing ---
    /// Main loop delay between tick() calls (milliseconds)
    pub loop_delay_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            // 100 ms window: fast enough to track charge-phase changes,
            // long enough for single-Hz steps at the band edges.
            sample_period_ms: 100,
            thresholds: Thresholds::default(),

            loop_delay_ms: 10,
            telemetry_interval_secs: 10,
        }
    }
}

impl MonitorConfig {
    /// Parse and validate an override blob. Falling back to defaults on
    /// a bad blob is the caller's decision.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let cfg: Self = serde_json::from_str(json).map_err(|_| Error::Config("bad JSON"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the sampler cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.sample_period_ms == 0 {
            return Err(Error::Config("sample_period_ms must be > 0"));
        }
        if self.loop_delay_ms == 0 || self.loop_delay_ms > self.sample_period_ms {
            return Err(Error::Config(
                "loop_delay_ms must be > 0 and <= sample_period_ms",
            ));
        }
        if !self.thresholds.is_valid() {
            return Err(Error::Config("thresholds must be strictly ascending"));
        }
        Ok(())
    }
}
