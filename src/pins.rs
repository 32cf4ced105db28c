//! GPIO pin assignments for the ChargeMon board.
//!
//! Single source of truth — drivers reference this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Charger status signal
// ---------------------------------------------------------------------------

/// Pulse-coded status line from the charger — rising-edge interrupt input.
/// Open-collector output on the charger side, so the internal pull-up is
/// enabled and the line idles high.
pub const SIG_PULSE_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

/// Digital output: heartbeat / charge-activity LED (active HIGH).
pub const STATUS_LED_GPIO: i32 = 8;
