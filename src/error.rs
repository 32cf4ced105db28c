//! Unified error types for the ChargeMon firmware.
//!
//! A single `Error` enum that every fallible subsystem converts into,
//! keeping the `main()` boundary uniform. All variants are `Copy` so they
//! can be passed around without allocation. The signal path itself has no
//! error returns: its only failure modes are hardware-contract violations
//! and the zero-length-window case, which the sampler guards internally.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral or ISR-service initialisation failed.
    Hw(HwInitError),
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hw(e) => write!(f, "hw: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Hw(e)
    }
}
