//! Bring-up tests: warm/cold detection against the in-memory RTC.
//! A warm boot must never disturb a running calendar; a cold boot must leave
//! a 1 Hz RTC counting from the epoch with the backup domain locked.

// Test file: unwrap/expect/panic acceptable in test code.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

use platform::mocks::{HandleState, MockRtc, RtcCall, RtcOp};
use platform::{
    DaylightSaving, HalStatus, HourFormat, LseState, RawDate, RawTime, RtcClockSource,
    StoreOperation, TimeFormat, RTC_ASYNCH_PREDIV, RTC_SYNCH_PREDIV,
};
use time_svc::config::{handle_config, EPOCH_WEEKDAY};
use time_svc::{BootPath, Calendar, ClockSetupStep, InitError, RealTimeClock, RtcError, Weekday};

fn non_epoch_date() -> RawDate {
    // Wednesday 2031-07-09
    RawDate { weekday: 3, month: 0x07, date: 0x09, year: 0x31 }
}

fn non_epoch_time() -> RawTime {
    RawTime {
        hours: 0x21,
        minutes: 0x04,
        seconds: 0x58,
        time_format: TimeFormat::Am,
        sub_seconds: 0,
        second_fraction: 0,
        daylight_saving: DaylightSaving::None,
        store_operation: StoreOperation::Reset,
    }
}

// ── Warm path ────────────────────────────────────────────────────────────────

#[test]
fn warm_boot_keeps_calendar_registers() {
    let mut mock = MockRtc::running(non_epoch_date(), non_epoch_time());

    let rtc = RealTimeClock::init(&mut mock).unwrap();
    assert_eq!(rtc.boot_path(), BootPath::Warm);

    assert_eq!(mock.date(), non_epoch_date());
    assert_eq!(mock.time(), non_epoch_time());
    assert_eq!(mock.backup_domain_resets(), 0);
}

#[test]
fn warm_boot_touches_neither_oscillator_nor_prescalers() {
    let mut mock = MockRtc::running(non_epoch_date(), non_epoch_time());
    RealTimeClock::init(&mut mock).unwrap();

    assert_eq!(mock.calls(), &[RtcCall::EnableBusBridge, RtcCall::Adopt]);
    assert_eq!(mock.lse_state(), LseState::On);
    assert_eq!(mock.prescalers(), Some((RTC_ASYNCH_PREDIV, RTC_SYNCH_PREDIV)));
}

#[test]
fn warm_boot_leaves_handle_ready_with_configured_descriptor() {
    let mut mock = MockRtc::running(non_epoch_date(), non_epoch_time());
    let rtc = RealTimeClock::init(&mut mock).unwrap();
    assert_eq!(rtc.handle_config(), &handle_config());

    assert_eq!(mock.handle_state(), HandleState::Ready);
    assert!(mock.bus_bridge_enabled());
    assert_eq!(mock.handle_config(), Some(handle_config()));
}

#[test]
fn warm_boot_load_returns_running_calendar() {
    let mock = MockRtc::running(non_epoch_date(), non_epoch_time());
    let mut rtc = RealTimeClock::init(mock).unwrap();

    let now = rtc.load().unwrap();
    assert_eq!((now.year, now.month, now.day), (2031, 7, 9));
    assert_eq!(now.weekday, Weekday::Wednesday);
    assert_eq!((now.hour, now.minute, now.second), (21, 4, 58));
}

#[test]
fn reset_after_cold_boot_takes_warm_path() {
    let mut mock = MockRtc::cold();
    let mut rtc = RealTimeClock::init(&mut mock).unwrap();
    let later = Calendar {
        year: 2026,
        month: 10,
        day: 16,
        weekday: Weekday::Friday,
        ..Calendar::epoch()
    };
    rtc.store(&later).unwrap();

    mock.system_reset();
    mock.clear_calls();

    let mut rtc = RealTimeClock::init(&mut mock).unwrap();
    assert_eq!(rtc.boot_path(), BootPath::Warm);
    assert_eq!(rtc.load().unwrap(), later);
}

// ── Cold path ────────────────────────────────────────────────────────────────

#[test]
fn cold_boot_programs_epoch() {
    let mut rtc = RealTimeClock::init(MockRtc::cold()).unwrap();
    assert_eq!(rtc.boot_path(), BootPath::Cold);

    let now = rtc.load().unwrap();
    assert_eq!(now, Calendar::epoch());
    assert_eq!(now.year_offset(), Some(0));
    assert_eq!((now.month, now.day), (1, 1));
    assert_eq!(now.weekday, EPOCH_WEEKDAY);
    assert_eq!(now.weekday, Weekday::Saturday);
    assert_eq!((now.hour, now.minute, now.second), (0, 0, 0));
}

#[test]
fn cold_boot_registers_hold_bcd_epoch() {
    let mut mock = MockRtc::cold();
    RealTimeClock::init(&mut mock).unwrap();

    assert_eq!(mock.date(), RawDate { weekday: 6, month: 0x01, date: 0x01, year: 0x00 });
    assert_eq!((mock.time().hours, mock.time().minutes, mock.time().seconds), (0, 0, 0));
}

#[test]
fn cold_boot_configures_1hz_24h_from_lse() {
    let mut mock = MockRtc::cold();
    RealTimeClock::init(&mut mock).unwrap();

    assert_eq!(mock.lse_state(), LseState::On);
    assert_eq!(mock.clock_source(), Some(RtcClockSource::Lse));
    assert_eq!(mock.prescalers(), Some((127, 255)));
    assert_eq!(mock.hour_format(), Some(HourFormat::Format24));
    assert_eq!(mock.backup_domain_resets(), 1);
}

#[test]
fn cold_boot_closes_backup_domain_after_clock_selection_and_after_epoch_write() {
    let mut mock = MockRtc::cold();
    RealTimeClock::init(&mut mock).unwrap();

    let calls = mock.calls();
    let select = calls
        .iter()
        .position(|c| *c == RtcCall::SelectClockSource(RtcClockSource::Lse))
        .unwrap();
    assert_eq!(calls.get(select + 1), Some(&RtcCall::BackupAccess(false)));
    assert_eq!(calls.last(), Some(&RtcCall::BackupAccess(false)));
    assert!(!mock.backup_access());
}

// ── Failures ─────────────────────────────────────────────────────────────────

#[test]
fn lse_failure_is_fatal() {
    let mut mock = MockRtc::cold();
    mock.inject_fault(RtcOp::ConfigureLse, HalStatus::TIMEOUT);

    let err = RealTimeClock::init(&mut mock).err().unwrap();
    assert!(err.is_fatal());
    assert_eq!(
        err,
        InitError::ClockConfiguration {
            step: ClockSetupStep::EnableLse,
            status: HalStatus::TIMEOUT,
        }
    );
    assert!(!mock.calls().contains(&RtcCall::Init));
}

#[test]
fn clock_selection_failure_is_fatal() {
    let mut mock = MockRtc::cold();
    mock.inject_fault(RtcOp::SelectClockSource, HalStatus::ERROR);

    let err = RealTimeClock::init(&mut mock).err().unwrap();
    assert_eq!(
        err,
        InitError::ClockConfiguration {
            step: ClockSetupStep::SelectClockSource,
            status: HalStatus::ERROR,
        }
    );
    assert!(!mock.backup_access());
}

#[test]
fn bring_up_failure_is_translated_not_fatal() {
    let mut mock = MockRtc::cold();
    mock.inject_fault(RtcOp::Init, HalStatus::from_raw(0x7E));

    let err = RealTimeClock::init(&mut mock).err().unwrap();
    assert_eq!(err, InitError::Peripheral(RtcError::HardwareFault));
    assert!(!err.is_fatal());
}

#[test]
fn epoch_write_failure_is_reported_and_window_closed() {
    let mut mock = MockRtc::cold();
    mock.inject_fault(RtcOp::WriteDate, HalStatus::BUSY);

    let err = RealTimeClock::init(&mut mock).err().unwrap();
    assert_eq!(err, InitError::Peripheral(RtcError::Busy));
    assert!(!mock.calls().contains(&RtcCall::WriteTime));
    assert!(!mock.backup_access());
}

#[test]
fn error_messages_name_the_failing_step() {
    let err = InitError::ClockConfiguration {
        step: ClockSetupStep::EnableLse,
        status: HalStatus::TIMEOUT,
    };
    assert!(err.to_string().contains("LSE enable"));
}
