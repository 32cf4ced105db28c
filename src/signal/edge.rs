//! Edge-triggered pulse counting shared between a GPIO ISR and the sampler.
//!
//! The ISR path does exactly one lock-free increment; everything else
//! (window timing, rate arithmetic) happens in the main loop. The counter
//! uses `AtomicU32` rather than an interrupt-masked critical section so the
//! same code is correct on multi-core targets where global IRQ masking is
//! not an option.

use core::sync::atomic::{AtomicU32, Ordering};

/// Global atomic counter incremented by the GPIO ISR on the charger's
/// signal line. `static` because ISR callbacks in ESP-IDF cannot capture
/// closures.
static SIG_PULSE_COUNT: AtomicU32 = AtomicU32::new(0);

/// Called from the GPIO ISR on each rising edge of the signal line.
/// Performs a single lock-free increment and nothing else — no loops,
/// no allocation, no waiting.
pub fn sig_pulse_isr_handler() {
    SIG_PULSE_COUNT.fetch_add(1, Ordering::Relaxed);
}

/// Handle to one pulse-counting storage cell.
///
/// Binds a monitor instance to its backing static, so several monitored
/// pins can coexist, each with its own counter. Tests inject synthetic
/// edges through [`record_edge`](EdgeCounter::record_edge) — the same
/// entry point the ISR uses.
#[derive(Debug, Clone, Copy)]
pub struct EdgeCounter {
    cell: &'static AtomicU32,
}

impl EdgeCounter {
    /// The counter backing the charger signal line, serviced by
    /// [`sig_pulse_isr_handler`].
    pub fn signal_line() -> Self {
        Self {
            cell: &SIG_PULSE_COUNT,
        }
    }

    /// Bind to caller-provided storage (additional monitored pins, tests).
    pub const fn from_static(cell: &'static AtomicU32) -> Self {
        Self { cell }
    }

    /// Record one rising edge. Lock-free, safe from interrupt context.
    pub fn record_edge(&self) {
        self.cell.fetch_add(1, Ordering::Relaxed);
    }

    /// Atomically take the accumulated count, resetting it to zero.
    ///
    /// The swap is the entire exclusion region: an edge arriving during
    /// the call lands either in the returned count or in the next window,
    /// never both and never neither.
    pub fn drain(&self) -> u32 {
        self.cell.swap(0, Ordering::Relaxed)
    }

    /// Current count without resetting. Diagnostics only — the sampler
    /// must always go through [`drain`](EdgeCounter::drain).
    pub fn peek(&self) -> u32 {
        self.cell.load(Ordering::Relaxed)
    }
}
