//! Error types.
//!
//! Three layers:
//!
//! - [`ConversionError`] - a calendar value or register image cannot be
//!   converted (bad packed-decimal nibble, unrepresentable year, …).
//! - [`RtcError`] - what every runtime operation returns: a translated
//!   peripheral status or a conversion failure.
//! - [`InitError`] - what bring-up returns. Clock-configuration failures are
//!   kept apart from ordinary peripheral errors because no calendar function
//!   can work after them; boot code is expected to treat them as fatal.

use core::fmt;

use platform::HalStatus;

/// Calendar ↔ register conversion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionError {
    /// A packed-decimal byte has a nibble above 9.
    #[error("packed-decimal byte {0:#04x} has a nibble above 9")]
    InvalidBcd(u8),
    /// A binary value above 99 cannot be packed into two decimal digits.
    #[error("value {0} does not fit in two decimal digits")]
    NotTwoDigits(u8),
    /// The year lies outside the 100-year window starting at the epoch.
    #[error("year {0} is outside the RTC epoch window")]
    YearOutOfRange(u16),
    /// The weekday register holds something other than 1..=7.
    #[error("weekday register value {0} is not in 1..=7")]
    InvalidWeekday(u8),
}

/// Runtime RTC error.
///
/// Any `Err` means the calendar value is unknown or unchanged; this crate
/// never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcError {
    /// The peripheral reported it is busy.
    #[error("RTC peripheral busy")]
    Busy,
    /// A hardware ready flag did not latch in time.
    #[error("RTC operation timed out")]
    TimedOut,
    /// Hardware error, or a status code this driver does not recognise.
    #[error("RTC hardware fault")]
    HardwareFault,
    /// Calendar value or register content could not be converted.
    #[error("RTC calendar encoding: {0}")]
    InvalidEncoding(#[from] ConversionError),
}

/// Cold-start clock setup step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSetupStep {
    /// Switching on the LSE oscillator.
    EnableLse,
    /// Routing LSE to the RTC (RTCSEL).
    SelectClockSource,
}

impl fmt::Display for ClockSetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnableLse => f.write_str("LSE enable"),
            Self::SelectClockSource => f.write_str("RTC clock source selection"),
        }
    }
}

/// Bring-up failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// The RTC clock could not be set up. Fatal: without a running LSE the
    /// calendar cannot work at all.
    #[error("fatal RTC clock configuration failure: {step} returned status {code:#04x}", code = .status.raw())]
    ClockConfiguration {
        /// Step that failed.
        step: ClockSetupStep,
        /// Raw status returned by the peripheral.
        status: HalStatus,
    },
    /// Bring-up or epoch programming failed after the clock was running.
    #[error("RTC bring-up failed: {0}")]
    Peripheral(#[from] RtcError),
}

impl InitError {
    /// `true` for clock-configuration failures.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::ClockConfiguration { .. })
    }
}

impl From<ConversionError> for InitError {
    fn from(err: ConversionError) -> Self {
        Self::Peripheral(RtcError::InvalidEncoding(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_error_lifts_into_rtc_error() {
        let err: RtcError = ConversionError::InvalidBcd(0x1A).into();
        assert_eq!(err, RtcError::InvalidEncoding(ConversionError::InvalidBcd(0x1A)));
    }

    #[test]
    fn conversion_error_lifts_into_init_error() {
        let err: InitError = ConversionError::InvalidWeekday(0).into();
        assert_eq!(
            err,
            InitError::Peripheral(RtcError::InvalidEncoding(ConversionError::InvalidWeekday(0)))
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn clock_configuration_is_fatal() {
        let err = InitError::ClockConfiguration {
            step: ClockSetupStep::EnableLse,
            status: HalStatus::TIMEOUT,
        };
        assert!(err.is_fatal());
    }

    #[test]
    fn display_messages() {
        assert_eq!(RtcError::Busy.to_string(), "RTC peripheral busy");
        assert_eq!(
            ConversionError::InvalidBcd(0x1A).to_string(),
            "packed-decimal byte 0x1a has a nibble above 9"
        );
        let err = InitError::ClockConfiguration {
            step: ClockSetupStep::SelectClockSource,
            status: HalStatus::TIMEOUT,
        };
        assert_eq!(
            err.to_string(),
            "fatal RTC clock configuration failure: RTC clock source selection returned status 0x03"
        );
    }
}
