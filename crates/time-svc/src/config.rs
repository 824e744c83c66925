//! Driver configuration constants.
//!
//! Nothing here is read at runtime from storage: the RTC must be usable
//! before any filesystem or settings store exists, so the whole
//! configuration is fixed at compile time.

use platform::{
    HourFormat, OutputPolarity, OutputSelect, OutputType, RtcClockSource, RtcInitConfig,
    RTC_ASYNCH_PREDIV, RTC_SYNCH_PREDIV,
};

use crate::calendar::Weekday;

/// Year held by a year register of `0x00`.
pub const EPOCH_YEAR: u16 = 2000;

/// Weekday of January 1 of [`EPOCH_YEAR`], programmed on cold start.
pub const EPOCH_WEEKDAY: Weekday = Weekday::Saturday;

/// Clock routed to the RTC on cold start.
pub const CLOCK_SOURCE: RtcClockSource = RtcClockSource::Lse;

// Changing the epoch year without the weekday would program a wrong weekday
// on every cold start.
const _: () = assert!(
    matches!(Weekday::from_date(EPOCH_YEAR, 1, 1), Some(EPOCH_WEEKDAY)),
    "EPOCH_WEEKDAY does not match January 1 of EPOCH_YEAR"
);

/// Handle descriptor used on both boot paths: 24-hour format, 1 Hz from LSE,
/// no alarm/wakeup output pin.
#[must_use]
pub const fn handle_config() -> RtcInitConfig {
    RtcInitConfig {
        hour_format: HourFormat::Format24,
        asynch_prediv: RTC_ASYNCH_PREDIV,
        synch_prediv: RTC_SYNCH_PREDIV,
        output: OutputSelect::Disable,
        output_polarity: OutputPolarity::High,
        output_type: OutputType::OpenDrain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_config_matches_platform_default() {
        assert_eq!(handle_config(), RtcInitConfig::default());
    }

    #[test]
    fn epoch_is_a_saturday() {
        assert_eq!(Weekday::from_date(EPOCH_YEAR, 1, 1), Some(EPOCH_WEEKDAY));
    }
}
