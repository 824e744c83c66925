//! Cold-start clock bring-up.
//!
//! Switches the LSE crystal on and routes it to the RTC. Selecting the RTC
//! clock resets the whole backup domain and leaves backup write access
//! enabled, so access is closed again right after the selection, whatever
//! its outcome.

use platform::{HalStatus, LseState, RtcPeripheral};

use crate::config::CLOCK_SOURCE;
use crate::error::{ClockSetupStep, InitError};

/// Enable LSE and select it as the RTC clock.
///
/// # Errors
///
/// [`InitError::ClockConfiguration`] naming the step that failed. Either
/// failure leaves the RTC without a usable clock.
pub fn configure_clock_source<P: RtcPeripheral>(peripheral: &mut P) -> Result<(), InitError> {
    debug!("rtc: enabling LSE");
    check(ClockSetupStep::EnableLse, peripheral.configure_lse(LseState::On))?;

    debug!("rtc: selecting LSE as RTC clock (backup domain reset)");
    let selected = peripheral.select_clock_source(CLOCK_SOURCE);
    peripheral.set_backup_access(false);
    check(ClockSetupStep::SelectClockSource, selected)
}

fn check(step: ClockSetupStep, status: HalStatus) -> Result<(), InitError> {
    if status.is_ok() {
        return Ok(());
    }
    error!("rtc: {} failed with status {}", step, status.raw());
    Err(InitError::ClockConfiguration { step, status })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use platform::mocks::{MockRtc, RtcCall, RtcOp};
    use platform::RtcClockSource;

    use super::*;

    #[test]
    fn enables_lse_then_selects_it_then_closes_access() {
        let mut rtc = MockRtc::cold();
        configure_clock_source(&mut rtc).unwrap();

        assert_eq!(
            rtc.calls(),
            &[
                RtcCall::ConfigureLse(LseState::On),
                RtcCall::SelectClockSource(RtcClockSource::Lse),
                RtcCall::BackupAccess(false),
            ]
        );
        assert!(!rtc.backup_access());
        assert_eq!(rtc.clock_source(), Some(RtcClockSource::Lse));
        assert_eq!(rtc.backup_domain_resets(), 1);
    }

    #[test]
    fn lse_failure_stops_before_clock_selection() {
        let mut rtc = MockRtc::cold();
        rtc.inject_fault(RtcOp::ConfigureLse, HalStatus::TIMEOUT);

        let err = configure_clock_source(&mut rtc).unwrap_err();
        assert_eq!(
            err,
            InitError::ClockConfiguration {
                step: ClockSetupStep::EnableLse,
                status: HalStatus::TIMEOUT,
            }
        );
        assert!(err.is_fatal());
        assert_eq!(rtc.calls(), &[RtcCall::ConfigureLse(LseState::On)]);
        assert_eq!(rtc.backup_domain_resets(), 0);
    }

    #[test]
    fn selection_failure_still_closes_access() {
        let mut rtc = MockRtc::cold();
        rtc.inject_fault(RtcOp::SelectClockSource, HalStatus::ERROR);

        let err = configure_clock_source(&mut rtc).unwrap_err();
        assert_eq!(
            err,
            InitError::ClockConfiguration {
                step: ClockSetupStep::SelectClockSource,
                status: HalStatus::ERROR,
            }
        );
        assert_eq!(rtc.calls().last(), Some(&RtcCall::BackupAccess(false)));
        assert!(!rtc.backup_access());
    }
}
