//! RTC peripheral access abstraction.
//!
//! [`RtcPeripheral`] is the seam between the calendar driver and the vendor
//! register layer. It mirrors what a vendor HAL offers for the backup
//! domain: oscillator and clock-source setup, the PWR_CR.DBP write unlock,
//! RTC bring-up, and BCD-format date/time/alarm register access.
//!
//! All date/time values crossing this interface are raw register images in
//! packed-decimal (BCD) form. Conversion to calendar values is the driver's
//! job, not the peripheral's.

use crate::clock_config::{RtcClockSource, RTC_ASYNCH_PREDIV, RTC_SYNCH_PREDIV};

// ── Status ───────────────────────────────────────────────────────────────────

/// Status code returned by a vendor HAL call.
///
/// Kept as a raw code rather than a closed enum: the register layer may hand
/// back values this crate does not know about, and callers must be able to
/// treat those as faults instead of silently accepting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct HalStatus(u8);

impl HalStatus {
    /// Operation completed.
    pub const OK: Self = Self(0x00);
    /// Operation failed (hardware or parameter error).
    pub const ERROR: Self = Self(0x01);
    /// Peripheral locked or busy with another operation.
    pub const BUSY: Self = Self(0x02);
    /// A hardware ready flag did not latch in time.
    pub const TIMEOUT: Self = Self(0x03);

    /// Wrap a raw status code.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw status code.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// `true` only for [`HalStatus::OK`].
    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.0 == Self::OK.0
    }
}

// ── Handle descriptor ────────────────────────────────────────────────────────

/// RTC_CR.FMT hour format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourFormat {
    /// 24-hour / day format.
    Format24,
    /// AM/PM hour format.
    Format12,
}

/// RTC_CR.OSEL output routed to the RTC_ALARM pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputSelect {
    /// Output disabled.
    Disable,
    /// Alarm A output enabled.
    AlarmA,
    /// Alarm B output enabled.
    AlarmB,
    /// Wakeup output enabled.
    Wakeup,
}

/// RTC_CR.POL output polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputPolarity {
    /// Pin is high when the selected flag is asserted.
    High,
    /// Pin is low when the selected flag is asserted.
    Low,
}

/// RTC_TAFCR.ALARMOUTTYPE output driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputType {
    /// Open-drain output.
    OpenDrain,
    /// Push-pull output.
    PushPull,
}

/// Static configuration of the RTC handle.
///
/// On a cold start this is programmed into RTC_CR/RTC_PRER by
/// [`RtcPeripheral::init`]. On a warm start the same values are adopted via
/// [`RtcPeripheral::adopt`] without touching any register, because a
/// correctly configured peripheral already contains them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcInitConfig {
    /// Hour format.
    pub hour_format: HourFormat,
    /// Asynchronous prescaler (PREDIV_A).
    pub asynch_prediv: u32,
    /// Synchronous prescaler (PREDIV_S).
    pub synch_prediv: u32,
    /// RTC_ALARM pin source.
    pub output: OutputSelect,
    /// RTC_ALARM pin polarity.
    pub output_polarity: OutputPolarity,
    /// RTC_ALARM pin driver type.
    pub output_type: OutputType,
}

impl Default for RtcInitConfig {
    /// 24-hour format, 1 Hz from a 32.768 kHz LSE, output disabled.
    fn default() -> Self {
        Self {
            hour_format: HourFormat::Format24,
            asynch_prediv: RTC_ASYNCH_PREDIV,
            synch_prediv: RTC_SYNCH_PREDIV,
            output: OutputSelect::Disable,
            output_polarity: OutputPolarity::High,
            output_type: OutputType::OpenDrain,
        }
    }
}

/// RCC_BDCR LSE oscillator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LseState {
    /// Oscillator off.
    Off,
    /// Crystal oscillator on.
    On,
    /// External clock fed into OSC32_IN, oscillator bypassed.
    Bypass,
}

// ── Raw register images ──────────────────────────────────────────────────────

/// RTC_DR image. `month`, `date` and `year` are packed-decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawDate {
    /// Week day unit, 1 = Monday … 7 = Sunday (0 is forbidden).
    pub weekday: u8,
    /// Month, BCD `0x01..=0x12`.
    pub month: u8,
    /// Day of month, BCD `0x01..=0x31`.
    pub date: u8,
    /// Year offset from the calendar epoch, BCD `0x00..=0x99`.
    pub year: u8,
}

impl RawDate {
    /// RTC_DR value after a backup-domain reset (`0x0000_2101`):
    /// year 00, Monday, January 1.
    pub const RESET: Self = Self {
        weekday: 1,
        month: 0x01,
        date: 0x01,
        year: 0x00,
    };
}

impl Default for RawDate {
    fn default() -> Self {
        Self::RESET
    }
}

/// RTC_TR.PM flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeFormat {
    /// AM, or 24-hour format.
    Am,
    /// PM (12-hour format only).
    Pm,
}

/// RTC_CR daylight-saving adjustment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DaylightSaving {
    /// No adjustment.
    None,
    /// Add one hour (summer time change).
    Add1h,
    /// Subtract one hour (winter time change).
    Sub1h,
}

/// RTC_CR.BKP "daylight saving already applied" marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreOperation {
    /// BKP bit cleared.
    Reset,
    /// BKP bit set.
    Set,
}

/// RTC_TR / RTC_SSR image. `hours`, `minutes` and `seconds` are packed-decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawTime {
    /// Hours, BCD `0x00..=0x23` in 24-hour format.
    pub hours: u8,
    /// Minutes, BCD `0x00..=0x59`.
    pub minutes: u8,
    /// Seconds, BCD `0x00..=0x59`.
    pub seconds: u8,
    /// AM/PM flag (always [`TimeFormat::Am`] in 24-hour format).
    pub time_format: TimeFormat,
    /// RTC_SSR sub-second down-counter. Read-only; ignored on write.
    pub sub_seconds: u32,
    /// PREDIV_S at the time of the read. Read-only; ignored on write.
    pub second_fraction: u32,
    /// Daylight-saving request.
    pub daylight_saving: DaylightSaving,
    /// Daylight-saving marker.
    pub store_operation: StoreOperation,
}

impl RawTime {
    /// RTC_TR value after a backup-domain reset: 00:00:00, no sub-seconds.
    pub const RESET: Self = Self {
        hours: 0x00,
        minutes: 0x00,
        seconds: 0x00,
        time_format: TimeFormat::Am,
        sub_seconds: 0,
        second_fraction: 0,
        daylight_saving: DaylightSaving::None,
        store_operation: StoreOperation::Reset,
    };
}

impl Default for RawTime {
    fn default() -> Self {
        Self::RESET
    }
}

// ── Alarm ────────────────────────────────────────────────────────────────────

/// Hardware alarm slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AlarmId {
    /// Alarm A (slot 0).
    A = 0,
    /// Alarm B (slot 1).
    B = 1,
}

impl AlarmId {
    /// Number of hardware alarm slots.
    pub const COUNT: usize = 2;

    /// Slot index, `0` for A and `1` for B.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for AlarmId {
    type Error = u8;

    fn try_from(slot: u8) -> Result<Self, Self::Error> {
        match slot {
            0 => Ok(Self::A),
            1 => Ok(Self::B),
            other => Err(other),
        }
    }
}

/// RTC_ALRMxR MSKx bits. A set bit excludes the field from the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct AlarmMask(u8);

impl AlarmMask {
    /// Compare every field.
    pub const NONE: Self = Self(0b0000);
    /// Ignore seconds (MSK1).
    pub const SECONDS: Self = Self(0b0001);
    /// Ignore minutes (MSK2).
    pub const MINUTES: Self = Self(0b0010);
    /// Ignore hours (MSK3).
    pub const HOURS: Self = Self(0b0100);
    /// Ignore date / weekday (MSK4).
    pub const DATE_WEEKDAY: Self = Self(0b1000);
    /// Ignore every field: the alarm fires each second.
    pub const ALL: Self = Self(0b1111);

    /// Union of two masks.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// `true` if every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Raw MSK bits, MSK1 in bit 0.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// RTC_ALRMxSSR.MASKSS: how many sub-second bits take part in the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubSecondMask {
    /// No sub-second bit is compared.
    All,
    /// Every sub-second bit is compared.
    None,
}

/// RTC_ALRMxR.WDSEL: whether `date_weekday` holds a day of month or a weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmDateWeekdaySel {
    /// `date_weekday` is a BCD day of month.
    Date,
    /// `date_weekday` is a weekday (1 = Monday … 7 = Sunday), recurring weekly.
    Weekday,
}

/// RTC_ALRMxR / RTC_ALRMxSSR image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawAlarm {
    /// Time-of-day to match (BCD).
    pub time: RawTime,
    /// Fields excluded from the match.
    pub mask: AlarmMask,
    /// Sub-second bits excluded from the match.
    pub sub_second_mask: SubSecondMask,
    /// Meaning of `date_weekday`.
    pub date_weekday_sel: AlarmDateWeekdaySel,
    /// BCD day of month, or weekday number.
    pub date_weekday: u8,
    /// Target slot.
    pub alarm: AlarmId,
}

// ── Peripheral trait ─────────────────────────────────────────────────────────

/// Register-access layer for the battery-backed RTC.
///
/// Implementations wrap the vendor HAL; [`crate::mocks::MockRtc`] provides an
/// in-memory model for host tests. Every method runs to completion on the
/// caller's context and may block briefly on hardware ready flags.
///
/// Write-protection contract: [`write_date`](Self::write_date),
/// [`write_time`](Self::write_time) and [`set_alarm`](Self::set_alarm) touch
/// backup-domain registers and only succeed while backup access is enabled
/// via [`set_backup_access`](Self::set_backup_access).
pub trait RtcPeripheral {
    /// RCC_BDCR.RTCEN: the RTC clock is enabled in the backup domain.
    ///
    /// This bit survives system resets as long as VBAT is present.
    fn rtc_enabled(&self) -> bool;

    /// Configure the LSE oscillator and wait for LSERDY.
    fn configure_lse(&mut self, state: LseState) -> HalStatus;

    /// Route `source` to the RTC (RCC_BDCR.RTCSEL).
    ///
    /// Side effects on real hardware: the whole backup domain is reset and
    /// backup write access (PWR_CR.DBP) is left **enabled**.
    fn select_clock_source(&mut self, source: RtcClockSource) -> HalStatus;

    /// Enable (`true`) or disable (`false`) write access to the backup domain
    /// (PWR_CR.DBP). Cannot fail.
    fn set_backup_access(&mut self, enabled: bool);

    /// Re-open the bus bridge to the RTC registers (APB clock, RTCAPB) after
    /// a reset that did not touch the backup domain. Cannot fail.
    fn enable_bus_bridge(&mut self);

    /// Canonical bring-up: enter init mode, program RTC_CR/RTC_PRER from
    /// `config`, exit init mode.
    fn init(&mut self, config: &RtcInitConfig) -> HalStatus;

    /// Adopt an already-running peripheral: record `config` in the handle
    /// and mark it unlocked and ready, without any register access.
    fn adopt(&mut self, config: &RtcInitConfig);

    /// Read RTC_DR.
    fn read_date(&mut self) -> Result<RawDate, HalStatus>;

    /// Read RTC_TR and RTC_SSR.
    fn read_time(&mut self) -> Result<RawTime, HalStatus>;

    /// Write RTC_DR.
    fn write_date(&mut self, date: &RawDate) -> HalStatus;

    /// Write RTC_TR.
    fn write_time(&mut self, time: &RawTime) -> HalStatus;

    /// Program and enable the alarm described by `alarm` in slot `alarm.alarm`.
    fn set_alarm(&mut self, alarm: &RawAlarm) -> HalStatus;
}

/// Lets a driver borrow a peripheral instead of owning it.
impl<T: RtcPeripheral + ?Sized> RtcPeripheral for &mut T {
    fn rtc_enabled(&self) -> bool {
        (**self).rtc_enabled()
    }

    fn configure_lse(&mut self, state: LseState) -> HalStatus {
        (**self).configure_lse(state)
    }

    fn select_clock_source(&mut self, source: RtcClockSource) -> HalStatus {
        (**self).select_clock_source(source)
    }

    fn set_backup_access(&mut self, enabled: bool) {
        (**self).set_backup_access(enabled);
    }

    fn enable_bus_bridge(&mut self) {
        (**self).enable_bus_bridge();
    }

    fn init(&mut self, config: &RtcInitConfig) -> HalStatus {
        (**self).init(config)
    }

    fn adopt(&mut self, config: &RtcInitConfig) {
        (**self).adopt(config);
    }

    fn read_date(&mut self) -> Result<RawDate, HalStatus> {
        (**self).read_date()
    }

    fn read_time(&mut self) -> Result<RawTime, HalStatus> {
        (**self).read_time()
    }

    fn write_date(&mut self, date: &RawDate) -> HalStatus {
        (**self).write_date(date)
    }

    fn write_time(&mut self, time: &RawTime) -> HalStatus {
        (**self).write_time(time)
    }

    fn set_alarm(&mut self, alarm: &RawAlarm) -> HalStatus {
        (**self).set_alarm(alarm)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
