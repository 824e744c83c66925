//! Behavioural tests for the in-memory RTC.
//! The driver tests lean on these semantics, so they are pinned here.

// Test file: unwrap/expect/panic acceptable in test code.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

use platform::mocks::{HandleState, MockRtc, RtcCall, RtcOp, CALL_LOG_CAPACITY};
use platform::{
    AlarmDateWeekdaySel, AlarmId, AlarmMask, HalStatus, LseState, RawAlarm, RawDate, RawTime,
    RtcClockSource, RtcInitConfig, RtcPeripheral, SubSecondMask,
};

fn bring_up(rtc: &mut MockRtc) {
    assert!(rtc.configure_lse(LseState::On).is_ok());
    assert!(rtc.select_clock_source(RtcClockSource::Lse).is_ok());
    rtc.set_backup_access(false);
    assert!(rtc.init(&RtcInitConfig::default()).is_ok());
}

#[test]
fn full_bring_up_enables_rtc() {
    let mut rtc = MockRtc::cold();
    assert!(!rtc.rtc_enabled());
    bring_up(&mut rtc);

    assert!(rtc.rtc_enabled());
    assert_eq!(rtc.handle_state(), HandleState::Ready);
    assert!(rtc.bus_bridge_enabled());
    assert!(!rtc.backup_access());
}

#[test]
fn init_without_clock_source_fails() {
    let mut rtc = MockRtc::cold();
    assert_eq!(rtc.init(&RtcInitConfig::default()), HalStatus::ERROR);
    assert!(!rtc.rtc_enabled());
}

#[test]
fn locked_backup_domain_rejects_writes() {
    let mut rtc = MockRtc::cold();
    bring_up(&mut rtc);

    let date = RawDate { weekday: 1, month: 0x03, date: 0x02, year: 0x26 };
    assert_eq!(rtc.write_date(&date), HalStatus::ERROR);
    assert_eq!(rtc.date(), RawDate::RESET);

    rtc.set_backup_access(true);
    assert_eq!(rtc.write_date(&date), HalStatus::OK);
    assert_eq!(rtc.date(), date);
}

#[test]
fn calendar_survives_system_reset_but_handle_does_not() {
    let mut rtc = MockRtc::cold();
    bring_up(&mut rtc);
    rtc.set_backup_access(true);
    let date = RawDate { weekday: 5, month: 0x12, date: 0x31, year: 0x99 };
    assert!(rtc.write_date(&date).is_ok());

    rtc.system_reset();

    assert!(rtc.rtc_enabled());
    assert_eq!(rtc.date(), date);
    assert_eq!(rtc.handle_state(), HandleState::Reset);
    assert!(!rtc.backup_access());
    assert_eq!(rtc.read_date(), Err(HalStatus::ERROR));

    rtc.adopt(&RtcInitConfig::default());
    assert_eq!(rtc.read_date(), Ok(date));
}

#[test]
fn reselecting_clock_wipes_alarms() {
    let mut rtc = MockRtc::cold();
    bring_up(&mut rtc);
    rtc.set_backup_access(true);
    let alarm = RawAlarm {
        time: RawTime::RESET,
        mask: AlarmMask::HOURS.union(AlarmMask::DATE_WEEKDAY),
        sub_second_mask: SubSecondMask::All,
        date_weekday_sel: AlarmDateWeekdaySel::Weekday,
        date_weekday: 3,
        alarm: AlarmId::A,
    };
    assert!(rtc.set_alarm(&alarm).is_ok());
    assert_eq!(rtc.alarm(AlarmId::A), Some(alarm));

    assert!(rtc.select_clock_source(RtcClockSource::Lse).is_ok());
    assert_eq!(rtc.alarm(AlarmId::A), None);
    assert_eq!(rtc.backup_domain_resets(), 2);
}

#[test]
fn fault_plan_can_be_cleared() {
    let mut rtc = MockRtc::cold();
    rtc.inject_fault(RtcOp::ConfigureLse, HalStatus::BUSY);
    assert_eq!(rtc.configure_lse(LseState::On), HalStatus::BUSY);
    assert_eq!(rtc.lse_state(), LseState::Off);

    rtc.clear_faults();
    assert_eq!(rtc.configure_lse(LseState::On), HalStatus::OK);
    assert_eq!(rtc.lse_state(), LseState::On);
}

#[test]
fn call_log_stops_at_capacity() {
    let mut rtc = MockRtc::cold();
    for _ in 0..CALL_LOG_CAPACITY + 10 {
        rtc.enable_bus_bridge();
    }
    assert_eq!(rtc.calls().len(), CALL_LOG_CAPACITY);
    assert!(rtc.calls().iter().all(|c| *c == RtcCall::EnableBusBridge));
}

#[test]
fn borrowed_mock_is_a_peripheral() {
    fn enabled<P: RtcPeripheral>(p: &P) -> bool {
        p.rtc_enabled()
    }

    let mut rtc = MockRtc::cold();
    bring_up(&mut rtc);
    let borrowed: &mut MockRtc = &mut rtc;
    assert!(enabled(&borrowed));
}
