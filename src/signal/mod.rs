//! Charger signal-line monitor.
//!
//! The charger reports its operating state as the frequency of a pulse
//! train. A GPIO ISR increments an atomic counter on each rising edge
//! ([`edge`]); [`SignalMonitor::tick`], driven from the main loop, drains
//! the counter once per sampling period and normalises the count by the
//! *measured* window length into a rate in Hz. [`state::classify`] maps
//! the published rate onto the discrete state bands on demand.
//!
//! Counting is decoupled from computation so the ISR path stays
//! minimal-latency; measuring the window instead of assuming the nominal
//! period keeps scheduling jitter in `tick` from biasing the rate.

pub mod edge;
pub mod state;

pub use edge::{sig_pulse_isr_handler, EdgeCounter};
pub use state::{classify, SigState, Thresholds};

use heapless::HistoryBuffer;

/// Published rates retained for trend queries ([`SignalMonitor::avg_rate`]).
const RATE_HISTORY_CAP: usize = 16;

/// One completed sampling window.
#[derive(Debug, Clone, Copy)]
pub struct SignalSample {
    /// Rising edges counted in the window.
    pub pulse_count: u32,
    /// Measured window length in milliseconds. Kept at the clock's full
    /// width so a long stall can never report a window that disagrees
    /// with the rate computed from it.
    pub window_ms: u64,
    /// Normalised rate, edges per second (integer truncation).
    pub freq_hz: u32,
}

/// Owns the sampling window and the published rate for one monitored pin.
///
/// Single-writer/multi-reader: only `tick` writes `freq_hz`; readers take
/// the accessors without synchronisation and tolerate a value that is
/// stale by at most one sampling period.
pub struct SignalMonitor {
    counter: EdgeCounter,
    sample_period_ms: u32,
    thresholds: Thresholds,
    /// Start instant of the current window, monotonic milliseconds.
    window_start_ms: u64,
    /// Last published rate. Zero until the first window completes,
    /// which reads as [`SigState::Off`].
    freq_hz: u32,
    history: HistoryBuffer<u32, RATE_HISTORY_CAP>,
    samples_taken: u32,
}

impl SignalMonitor {
    pub fn new(counter: EdgeCounter, sample_period_ms: u32, thresholds: Thresholds) -> Self {
        Self {
            counter,
            sample_period_ms,
            thresholds,
            window_start_ms: 0,
            freq_hz: 0,
            history: HistoryBuffer::new(),
            samples_taken: 0,
        }
    }

    /// Start the first sampling window at `now_ms`.
    ///
    /// Discards edges that arrived before the window opened (e.g. line
    /// noise during boot, before the ISR registration settled).
    pub fn arm(&mut self, now_ms: u64) {
        self.window_start_ms = now_ms;
        let discarded = self.counter.drain();
        if discarded > 0 {
            log::debug!("signal: discarded {discarded} pre-arm edges");
        }
    }

    /// Advance the sampler. Call from the main loop at least once per
    /// sampling period; returns immediately either way.
    ///
    /// A no-op until the period has elapsed. On a sampling boundary the
    /// counter is drained (atomic swap — the whole exclusion region) and
    /// the rate is recomputed from the measured window. A zero-length
    /// window carries no information: the update is skipped and both the
    /// accumulated count and the previous rate are retained.
    pub fn tick(&mut self, now_ms: u64) -> Option<SignalSample> {
        let elapsed_ms = now_ms.saturating_sub(self.window_start_ms);
        if elapsed_ms < u64::from(self.sample_period_ms) || elapsed_ms == 0 {
            return None;
        }

        let pulse_count = self.counter.drain();
        self.window_start_ms = now_ms;

        self.freq_hz = (u64::from(pulse_count) * 1000 / elapsed_ms) as u32;
        self.history.write(self.freq_hz);
        self.samples_taken = self.samples_taken.wrapping_add(1);

        Some(SignalSample {
            pulse_count,
            window_ms: elapsed_ms,
            freq_hz: self.freq_hz,
        })
    }

    /// Last published rate in Hz. No side effects.
    pub fn read_rate(&self) -> u32 {
        self.freq_hz
    }

    /// Current state band, recomputed fresh from the published rate.
    pub fn read_state(&self) -> SigState {
        classify(self.freq_hz, &self.thresholds)
    }

    /// Average of the recent published rates, zero before the first sample.
    pub fn avg_rate(&self) -> u32 {
        let len = self.history.len() as u32;
        if len == 0 {
            return 0;
        }
        let sum: u64 = self.history.oldest_ordered().map(|&r| u64::from(r)).sum();
        (sum / u64::from(len)) as u32
    }

    /// Completed sampling windows since boot (wraps).
    pub fn samples_taken(&self) -> u32 {
        self.samples_taken
    }

    /// Counter handle, for edge injection in tests and diagnostics.
    pub fn counter(&self) -> EdgeCounter {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::AtomicU32;

    fn monitor(cell: &'static AtomicU32, period_ms: u32) -> SignalMonitor {
        let mut m = SignalMonitor::new(
            EdgeCounter::from_static(cell),
            period_ms,
            Thresholds::default(),
        );
        m.arm(0);
        m
    }

    #[test]
    fn noop_until_period_elapses() {
        static CELL: AtomicU32 = AtomicU32::new(0);
        let mut m = monitor(&CELL, 100);

        for _ in 0..50 {
            m.counter().record_edge();
        }
        assert!(m.tick(10).is_none());
        assert!(m.tick(50).is_none());
        assert!(m.tick(99).is_none());
        // Counter untouched, rate unpublished.
        assert_eq!(m.counter().peek(), 50);
        assert_eq!(m.read_rate(), 0);
    }

    #[test]
    fn rate_uses_measured_window() {
        static CELL: AtomicU32 = AtomicU32::new(0);
        let mut m = monitor(&CELL, 100);

        // 100 edges over 200 ms — tick arrives late, the window is
        // measured, not assumed to be the 100 ms nominal period.
        for _ in 0..100 {
            m.counter().record_edge();
        }
        let sample = m.tick(200).unwrap();
        assert_eq!(sample.pulse_count, 100);
        assert_eq!(sample.window_ms, 200);
        assert_eq!(sample.freq_hz, 500);
        assert_eq!(m.read_rate(), 500);
        assert_eq!(m.read_state(), SigState::HighCurrent);
    }

    #[test]
    fn integer_truncation() {
        static CELL: AtomicU32 = AtomicU32::new(0);
        let mut m = monitor(&CELL, 100);

        // 7 edges / 300 ms = 23.33… Hz → 23.
        for _ in 0..7 {
            m.counter().record_edge();
        }
        assert_eq!(m.tick(300).unwrap().freq_hz, 23);
    }

    #[test]
    fn zero_edges_reads_off() {
        static CELL: AtomicU32 = AtomicU32::new(0);
        let mut m = monitor(&CELL, 100);

        let sample = m.tick(100).unwrap();
        assert_eq!(sample.freq_hz, 0);
        assert_eq!(m.read_rate(), 0);
        assert_eq!(m.read_state(), SigState::Off);
    }

    #[test]
    fn zero_length_window_retains_rate_and_count() {
        static CELL: AtomicU32 = AtomicU32::new(0);
        // Period zero makes a boundary with elapsed == 0 reachable.
        let mut m = monitor(&CELL, 0);

        for _ in 0..25 {
            m.counter().record_edge();
        }
        assert!(m.tick(0).is_none());
        assert_eq!(m.counter().peek(), 25, "count must survive the guard");
        assert_eq!(m.read_rate(), 0);

        // The retained edges publish normally once time advances.
        assert_eq!(m.tick(100).unwrap().freq_hz, 250);
        assert_eq!(m.read_state(), SigState::LowCurrent);
    }

    #[test]
    fn long_stall_window_reported_in_full() {
        static CELL: AtomicU32 = AtomicU32::new(0);
        let mut m = monitor(&CELL, 100);

        // A stall past the u32 millisecond range (~49.7 days) must report
        // the same window the rate math used, not a wrapped value.
        let stall_ms: u64 = 5_000_000_000;
        for _ in 0..1000 {
            m.counter().record_edge();
        }
        let sample = m.tick(stall_ms).unwrap();
        assert_eq!(sample.window_ms, stall_ms);
        assert_eq!(sample.freq_hz, 0); // 1000 edges over 58 days rounds to 0 Hz
        assert_eq!(m.read_state(), SigState::Off);
    }

    #[test]
    fn windows_do_not_mix() {
        static CELL: AtomicU32 = AtomicU32::new(0);
        let mut m = monitor(&CELL, 100);

        for _ in 0..12 {
            m.counter().record_edge();
        }
        assert_eq!(m.tick(100).unwrap().pulse_count, 12);

        // Next window starts from zero edges and the new start instant.
        for _ in 0..30 {
            m.counter().record_edge();
        }
        let second = m.tick(200).unwrap();
        assert_eq!(second.pulse_count, 30);
        assert_eq!(second.window_ms, 100);
        assert_eq!(second.freq_hz, 300);
    }

    #[test]
    fn arm_discards_preexisting_edges() {
        static CELL: AtomicU32 = AtomicU32::new(0);
        let counter = EdgeCounter::from_static(&CELL);
        for _ in 0..40 {
            counter.record_edge();
        }

        let mut m = SignalMonitor::new(counter, 100, Thresholds::default());
        m.arm(1000);
        assert_eq!(m.tick(1100).unwrap().pulse_count, 0);
    }

    #[test]
    fn avg_rate_tracks_history() {
        static CELL: AtomicU32 = AtomicU32::new(0);
        let mut m = monitor(&CELL, 100);
        assert_eq!(m.avg_rate(), 0);

        // Three windows at 100, 200, 300 Hz.
        let mut now = 0;
        for edges in [10u32, 20, 30] {
            now += 100;
            for _ in 0..edges {
                m.counter().record_edge();
            }
            m.tick(now).unwrap();
        }
        assert_eq!(m.avg_rate(), 200);
        assert_eq!(m.samples_taken(), 3);
    }
}
