//! Mock implementations for testing
//!
//! [`MockRtc`] models the battery-backed RTC register file in memory so the
//! calendar driver can be exercised on the host: warm and cold boots,
//! backup-domain resets, the DBP write lock and injected HAL failures.

#![cfg(any(test, feature = "std"))]

use crate::clock_config::RtcClockSource;
use crate::rtc::{
    AlarmId, HalStatus, HourFormat, LseState, RawAlarm, RawDate, RawTime, RtcInitConfig,
    RtcPeripheral,
};

/// Capacity of the recorded call log. Further calls are not recorded.
pub const CALL_LOG_CAPACITY: usize = 64;

/// A recorded [`RtcPeripheral`] call, in the order it was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcCall {
    /// [`RtcPeripheral::configure_lse`]
    ConfigureLse(LseState),
    /// [`RtcPeripheral::select_clock_source`]
    SelectClockSource(RtcClockSource),
    /// [`RtcPeripheral::set_backup_access`]
    BackupAccess(bool),
    /// [`RtcPeripheral::enable_bus_bridge`]
    EnableBusBridge,
    /// [`RtcPeripheral::init`]
    Init,
    /// [`RtcPeripheral::adopt`]
    Adopt,
    /// [`RtcPeripheral::read_date`]
    ReadDate,
    /// [`RtcPeripheral::read_time`]
    ReadTime,
    /// [`RtcPeripheral::write_date`]
    WriteDate,
    /// [`RtcPeripheral::write_time`]
    WriteTime,
    /// [`RtcPeripheral::set_alarm`]
    SetAlarm(AlarmId),
}

/// Fallible operations that can be forced to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcOp {
    /// [`RtcPeripheral::configure_lse`]
    ConfigureLse,
    /// [`RtcPeripheral::select_clock_source`]
    SelectClockSource,
    /// [`RtcPeripheral::init`]
    Init,
    /// [`RtcPeripheral::read_date`]
    ReadDate,
    /// [`RtcPeripheral::read_time`]
    ReadTime,
    /// [`RtcPeripheral::write_date`]
    WriteDate,
    /// [`RtcPeripheral::write_time`]
    WriteTime,
    /// [`RtcPeripheral::set_alarm`]
    SetAlarm,
}

/// Software state of the vendor HAL handle (not a register).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    /// Handle not yet initialised since the last MCU reset.
    Reset,
    /// Handle unlocked and ready.
    Ready,
}

/// In-memory RTC peripheral.
///
/// Register contents (`RTCEN`, LSE, clock source, prescalers, calendar and
/// alarms) live in the "backup domain" and survive [`MockRtc::system_reset`];
/// only a clock-source selection wipes them.
pub struct MockRtc {
    rtc_enabled: bool,
    lse: LseState,
    clock_source: Option<RtcClockSource>,
    prescalers: Option<(u32, u32)>,
    hour_format: Option<HourFormat>,
    date: RawDate,
    time: RawTime,
    sub_second_counter: u32,
    alarms: [Option<RawAlarm>; AlarmId::COUNT],
    backup_domain_resets: u32,

    backup_access: bool,
    bus_bridge: bool,
    handle_state: HandleState,
    handle_config: Option<RtcInitConfig>,

    faults: heapless::Vec<(RtcOp, HalStatus), 8>,
    calls: heapless::Vec<RtcCall, CALL_LOG_CAPACITY>,
}

impl MockRtc {
    /// Peripheral after VBAT loss: backup domain at reset values, RTC disabled.
    pub fn cold() -> Self {
        Self {
            rtc_enabled: false,
            lse: LseState::Off,
            clock_source: None,
            prescalers: None,
            hour_format: None,
            date: RawDate::RESET,
            time: RawTime::RESET,
            sub_second_counter: 0,
            alarms: [None; AlarmId::COUNT],
            backup_domain_resets: 0,
            backup_access: false,
            bus_bridge: false,
            handle_state: HandleState::Reset,
            handle_config: None,
            faults: heapless::Vec::new(),
            calls: heapless::Vec::new(),
        }
    }

    /// Peripheral after a warm reset: clocked from LSE at 1 Hz and holding
    /// `date`/`time`, while the MCU-side handle is fresh.
    pub fn running(date: RawDate, time: RawTime) -> Self {
        let cfg = RtcInitConfig::default();
        let mut rtc = Self::cold();
        rtc.rtc_enabled = true;
        rtc.lse = LseState::On;
        rtc.clock_source = Some(RtcClockSource::Lse);
        rtc.prescalers = Some((cfg.asynch_prediv, cfg.synch_prediv));
        rtc.hour_format = Some(cfg.hour_format);
        rtc.date = date;
        rtc.time = strip_read_only(time);
        rtc.sub_second_counter = cfg.synch_prediv;
        rtc
    }

    /// Simulate an MCU reset with VBAT present: the handle and bus bridge are
    /// lost, the backup domain is kept and DBP returns to its reset value.
    pub fn system_reset(&mut self) {
        self.backup_access = false;
        self.bus_bridge = false;
        self.handle_state = HandleState::Reset;
        self.handle_config = None;
    }

    /// Force every future call of `op` to return `status`.
    pub fn inject_fault(&mut self, op: RtcOp, status: HalStatus) {
        match self.faults.iter().position(|(o, _)| *o == op) {
            Some(i) => {
                if let Some(entry) = self.faults.get_mut(i) {
                    entry.1 = status;
                }
            }
            None => {
                let _ = self.faults.push((op, status));
            }
        }
    }

    /// Remove all injected faults.
    pub fn clear_faults(&mut self) {
        self.faults.clear();
    }

    /// Recorded calls, oldest first.
    pub fn calls(&self) -> &[RtcCall] {
        &self.calls
    }

    /// Forget recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Overwrite the calendar registers directly, bypassing write protection.
    pub fn seed(&mut self, date: RawDate, time: RawTime) {
        self.date = date;
        self.time = strip_read_only(time);
    }

    /// Set the RTC_SSR down-counter returned by the next reads.
    pub fn set_sub_second_counter(&mut self, ssr: u32) {
        self.sub_second_counter = ssr;
    }

    /// Current RTC_DR content.
    pub fn date(&self) -> RawDate {
        self.date
    }

    /// Current RTC_TR content (sub-second fields zero).
    pub fn time(&self) -> RawTime {
        self.time
    }

    /// Alarm programmed in `id`, if any.
    pub fn alarm(&self, id: AlarmId) -> Option<RawAlarm> {
        self.alarms.get(id.index()).copied().flatten()
    }

    /// PWR_CR.DBP.
    pub fn backup_access(&self) -> bool {
        self.backup_access
    }

    /// LSE oscillator state.
    pub fn lse_state(&self) -> LseState {
        self.lse
    }

    /// RCC_BDCR.RTCSEL.
    pub fn clock_source(&self) -> Option<RtcClockSource> {
        self.clock_source
    }

    /// Programmed `(PREDIV_A, PREDIV_S)`, `None` until the RTC is brought up.
    pub fn prescalers(&self) -> Option<(u32, u32)> {
        self.prescalers
    }

    /// Programmed RTC_CR.FMT.
    pub fn hour_format(&self) -> Option<HourFormat> {
        self.hour_format
    }

    /// Number of backup-domain resets caused by clock-source selection.
    pub fn backup_domain_resets(&self) -> u32 {
        self.backup_domain_resets
    }

    /// Whether the RTC bus bridge is open.
    pub fn bus_bridge_enabled(&self) -> bool {
        self.bus_bridge
    }

    /// HAL handle state.
    pub fn handle_state(&self) -> HandleState {
        self.handle_state
    }

    /// Configuration recorded in the HAL handle.
    pub fn handle_config(&self) -> Option<RtcInitConfig> {
        self.handle_config
    }

    fn record(&mut self, call: RtcCall) {
        let _ = self.calls.push(call);
    }

    fn fault(&self, op: RtcOp) -> Option<HalStatus> {
        self.faults
            .iter()
            .find(|(o, _)| *o == op)
            .map(|(_, status)| *status)
    }

    fn check_writable(&self) -> HalStatus {
        if self.handle_state != HandleState::Ready || !self.backup_access {
            HalStatus::ERROR
        } else {
            HalStatus::OK
        }
    }

    fn reset_backup_domain(&mut self) {
        self.rtc_enabled = false;
        self.prescalers = None;
        self.hour_format = None;
        self.date = RawDate::RESET;
        self.time = RawTime::RESET;
        self.sub_second_counter = 0;
        self.alarms = [None; AlarmId::COUNT];
        self.backup_domain_resets = self.backup_domain_resets.saturating_add(1);
    }
}

impl Default for MockRtc {
    fn default() -> Self {
        Self::cold()
    }
}

/// RTC_SSR and PREDIV_S are not part of RTC_TR.
fn strip_read_only(time: RawTime) -> RawTime {
    RawTime {
        sub_seconds: 0,
        second_fraction: 0,
        ..time
    }
}

impl RtcPeripheral for MockRtc {
    fn rtc_enabled(&self) -> bool {
        self.rtc_enabled
    }

    fn configure_lse(&mut self, state: LseState) -> HalStatus {
        self.record(RtcCall::ConfigureLse(state));
        if let Some(status) = self.fault(RtcOp::ConfigureLse) {
            return status;
        }
        self.lse = state;
        HalStatus::OK
    }

    fn select_clock_source(&mut self, source: RtcClockSource) -> HalStatus {
        self.record(RtcCall::SelectClockSource(source));
        if let Some(status) = self.fault(RtcOp::SelectClockSource) {
            return status;
        }
        if source == RtcClockSource::Lse && self.lse == LseState::Off {
            // LSERDY never latches.
            return HalStatus::TIMEOUT;
        }
        self.backup_access = true;
        self.reset_backup_domain();
        self.clock_source = Some(source);
        HalStatus::OK
    }

    fn set_backup_access(&mut self, enabled: bool) {
        self.record(RtcCall::BackupAccess(enabled));
        self.backup_access = enabled;
    }

    fn enable_bus_bridge(&mut self) {
        self.record(RtcCall::EnableBusBridge);
        self.bus_bridge = true;
    }

    fn init(&mut self, config: &RtcInitConfig) -> HalStatus {
        self.record(RtcCall::Init);
        if let Some(status) = self.fault(RtcOp::Init) {
            return status;
        }
        if self.clock_source.is_none() {
            return HalStatus::ERROR;
        }
        self.bus_bridge = true;
        self.rtc_enabled = true;
        self.prescalers = Some((config.asynch_prediv, config.synch_prediv));
        self.hour_format = Some(config.hour_format);
        self.sub_second_counter = config.synch_prediv;
        self.handle_config = Some(*config);
        self.handle_state = HandleState::Ready;
        HalStatus::OK
    }

    fn adopt(&mut self, config: &RtcInitConfig) {
        self.record(RtcCall::Adopt);
        self.handle_config = Some(*config);
        self.handle_state = HandleState::Ready;
    }

    fn read_date(&mut self) -> Result<RawDate, HalStatus> {
        self.record(RtcCall::ReadDate);
        if let Some(status) = self.fault(RtcOp::ReadDate) {
            return Err(status);
        }
        if self.handle_state != HandleState::Ready {
            return Err(HalStatus::ERROR);
        }
        Ok(self.date)
    }

    fn read_time(&mut self) -> Result<RawTime, HalStatus> {
        self.record(RtcCall::ReadTime);
        if let Some(status) = self.fault(RtcOp::ReadTime) {
            return Err(status);
        }
        if self.handle_state != HandleState::Ready {
            return Err(HalStatus::ERROR);
        }
        let synch_prediv = self.prescalers.map_or(0, |(_, s)| s);
        Ok(RawTime {
            sub_seconds: self.sub_second_counter,
            second_fraction: synch_prediv,
            ..self.time
        })
    }

    fn write_date(&mut self, date: &RawDate) -> HalStatus {
        self.record(RtcCall::WriteDate);
        if let Some(status) = self.fault(RtcOp::WriteDate) {
            return status;
        }
        let status = self.check_writable();
        if status.is_ok() {
            self.date = *date;
        }
        status
    }

    fn write_time(&mut self, time: &RawTime) -> HalStatus {
        self.record(RtcCall::WriteTime);
        if let Some(status) = self.fault(RtcOp::WriteTime) {
            return status;
        }
        let status = self.check_writable();
        if status.is_ok() {
            self.time = strip_read_only(*time);
            // Writing RTC_TR reloads the sub-second counter.
            self.sub_second_counter = self.prescalers.map_or(0, |(_, s)| s);
        }
        status
    }

    fn set_alarm(&mut self, alarm: &RawAlarm) -> HalStatus {
        self.record(RtcCall::SetAlarm(alarm.alarm));
        if let Some(status) = self.fault(RtcOp::SetAlarm) {
            return status;
        }
        let status = self.check_writable();
        if status.is_ok() {
            if let Some(slot) = self.alarms.get_mut(alarm.alarm.index()) {
                *slot = Some(*alarm);
            }
        }
        status
    }
}
