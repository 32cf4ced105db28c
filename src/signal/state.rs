//! Signal-state vocabulary and the pulse-rate classifier.
//!
//! The charger encodes its operating state as the frequency of a pulse
//! train on the status line. [`classify`] maps a measured rate onto the
//! state bands; [`Thresholds`] carries the band boundaries so they can be
//! tuned from config without touching the classifier.

use serde::{Deserialize, Serialize};

/// Operating states encoded on the charger status line.
///
/// `Disable` and `Enable` are valid values of the vocabulary but are
/// never produced by [`classify`] — they exist for external producers
/// (e.g. a supervisor commanding the charger) and for forward
/// compatibility with additional frequency bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SigState {
    /// No pulses observed — signal line idle or charger off.
    Off,
    /// 1–150 Hz nominal ~125 Hz: charge complete, maintenance only.
    CompletedCharge,
    /// 151–350 Hz nominal ~250 Hz: low-current charge phase.
    LowCurrent,
    /// 351–550 Hz nominal ~500 Hz: high-current (bulk) charge phase.
    HighCurrent,
    /// Reserved — not produced by the classifier.
    Disable,
    /// Reserved — not produced by the classifier. A dedicated low-rate
    /// band (≤ 50 Hz) for this state was considered and left out; the
    /// 1–50 Hz range classifies as `CompletedCharge`.
    Enable,
    /// Rate above every known band — noise or an unknown encoding.
    Undefined,
}

impl core::fmt::Display for SigState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::Off => "off",
            Self::CompletedCharge => "completed-charge",
            Self::LowCurrent => "low-current",
            Self::HighCurrent => "high-current",
            Self::Disable => "disable",
            Self::Enable => "enable",
            Self::Undefined => "undefined",
        };
        f.write_str(s)
    }
}

/// Inclusive upper bounds of the classifier bands, in Hz.
///
/// Bands are evaluated in ascending order, first match wins; anything
/// above `high_current_max` is [`SigState::Undefined`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Upper bound of the completed-charge band.
    pub completed_charge_max: u32,
    /// Upper bound of the low-current band.
    pub low_current_max: u32,
    /// Upper bound of the high-current band.
    pub high_current_max: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            completed_charge_max: 150,
            low_current_max: 350,
            high_current_max: 550,
        }
    }
}

impl Thresholds {
    /// Bands must be strictly ascending or the ladder is ambiguous.
    pub fn is_valid(&self) -> bool {
        self.completed_charge_max > 0
            && self.completed_charge_max < self.low_current_max
            && self.low_current_max < self.high_current_max
    }
}

/// Map a measured pulse rate onto its state band.
///
/// Pure function of the inputs, no caching: callers re-evaluate on every
/// read so the state always reflects the latest published rate.
pub fn classify(rate_hz: u32, thresholds: &Thresholds) -> SigState {
    if rate_hz == 0 {
        SigState::Off
    } else if rate_hz <= thresholds.completed_charge_max {
        SigState::CompletedCharge
    } else if rate_hz <= thresholds.low_current_max {
        SigState::LowCurrent
    } else if rate_hz <= thresholds.high_current_max {
        SigState::HighCurrent
    } else {
        SigState::Undefined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_exact() {
        let th = Thresholds::default();
        let table = [
            (0, SigState::Off),
            (1, SigState::CompletedCharge),
            (149, SigState::CompletedCharge),
            (150, SigState::CompletedCharge),
            (151, SigState::LowCurrent),
            (350, SigState::LowCurrent),
            (351, SigState::HighCurrent),
            (500, SigState::HighCurrent),
            (550, SigState::HighCurrent),
            (551, SigState::Undefined),
            (u32::MAX, SigState::Undefined),
        ];
        for (rate, expected) in table {
            assert_eq!(classify(rate, &th), expected, "rate {rate}");
        }
    }

    #[test]
    fn reserved_states_never_produced() {
        let th = Thresholds::default();
        for rate in 0..=600 {
            let state = classify(rate, &th);
            assert_ne!(state, SigState::Disable);
            assert_ne!(state, SigState::Enable);
        }
    }

    #[test]
    fn default_thresholds_ascend() {
        assert!(Thresholds::default().is_valid());
    }

    #[test]
    fn custom_thresholds_respected() {
        let th = Thresholds {
            completed_charge_max: 10,
            low_current_max: 20,
            high_current_max: 30,
        };
        assert_eq!(classify(10, &th), SigState::CompletedCharge);
        assert_eq!(classify(11, &th), SigState::LowCurrent);
        assert_eq!(classify(31, &th), SigState::Undefined);
    }
}
