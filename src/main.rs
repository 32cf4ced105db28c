//! ChargeMon Firmware — Main Entry Point
//!
//! Bring-up order matters: GPIO config first, then the ISR service, and
//! only then is the monitor armed so the first sampling window opens with
//! a clean counter.
//!
//! ```text
//! charger signal ──▶ GPIO ISR ──▶ EdgeCounter (atomic)
//!                                      │ drain, once per period
//!                                      ▼
//!            main loop ──tick──▶ SignalMonitor ──▶ rate + SigState
//!                                      │
//!                                      ├─▶ state-transition log
//!                                      ├─▶ status LED
//!                                      └─▶ telemetry JSON line
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{debug, error, info};

use chargemon::adapters::time::MonotonicTime;
use chargemon::config::MonitorConfig;
use chargemon::drivers::hw_init;
use chargemon::pins;
use chargemon::signal::{EdgeCounter, SigState, SignalMonitor};
use chargemon::telemetry::Snapshot;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("ChargeMon v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Hardware bring-up ──────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = hw_init::init_isr_service() {
        // Without the edge ISR there is nothing to measure.
        error!("ISR service init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Config ─────────────────────────────────────────────
    let config = MonitorConfig::default();
    config.validate().map_err(|e| anyhow::anyhow!("{e}"))?;
    info!(
        "config: period={}ms bands={}|{}|{} Hz",
        config.sample_period_ms,
        config.thresholds.completed_charge_max,
        config.thresholds.low_current_max,
        config.thresholds.high_current_max,
    );

    // ── 4. Monitor loop ───────────────────────────────────────
    let time = MonotonicTime::new();
    let mut monitor = SignalMonitor::new(
        EdgeCounter::signal_line(),
        config.sample_period_ms,
        config.thresholds,
    );
    monitor.arm(time.now_ms());

    let mut last_state = monitor.read_state();
    let mut last_telemetry_secs = 0u64;

    loop {
        let now_ms = time.now_ms();

        if let Some(sample) = monitor.tick(now_ms) {
            debug!(
                "sample: {} edges / {} ms = {} Hz",
                sample.pulse_count, sample.window_ms, sample.freq_hz
            );
        }

        let state = monitor.read_state();
        if state != last_state {
            info!(
                "signal state: {} → {} ({} Hz)",
                last_state,
                state,
                monitor.read_rate()
            );
            last_state = state;
        }

        // LED mirrors "charger active on the line".
        hw_init::gpio_write(pins::STATUS_LED_GPIO, state != SigState::Off);

        let uptime = time.uptime_secs();
        if uptime.saturating_sub(last_telemetry_secs) >= u64::from(config.telemetry_interval_secs) {
            Snapshot::capture(&monitor, &time).log();
            last_telemetry_secs = uptime;
        }

        esp_idf_hal::delay::FreeRtos::delay_ms(config.loop_delay_ms);
    }
}
