//! Calendar driver.

use platform::{AlarmId, RtcInitConfig, RtcPeripheral};

use crate::alarm::alarm_for;
use crate::backup::WriteWindow;
use crate::calendar::{self, Calendar};
use crate::config;
use crate::error::{InitError, RtcError};
use crate::init::{initialize, BootPath};
use crate::status::translate;

/// Battery-backed real-time clock.
///
/// Owns the peripheral handle. Construction through [`RealTimeClock::init`]
/// is the only way to get one, so every calendar access happens on an
/// initialised peripheral.
///
/// Not re-entrant: callers serialise access (`&mut self` enforces that
/// within one owner).
///
/// # Example
///
/// ```
/// use platform::mocks::MockRtc;
/// use time_svc::{Calendar, RealTimeClock};
///
/// let mut rtc = RealTimeClock::init(MockRtc::cold()).unwrap();
/// assert_eq!(rtc.load().unwrap(), Calendar::epoch());
/// ```
pub struct RealTimeClock<P: RtcPeripheral> {
    peripheral: P,
    config: RtcInitConfig,
    boot_path: BootPath,
}

impl<P: RtcPeripheral> RealTimeClock<P> {
    /// Bring up the RTC, keeping a running calendar or restarting it at the
    /// epoch.
    ///
    /// # Errors
    ///
    /// See [`InitError`]. [`InitError::is_fatal`] failures mean the RTC has
    /// no clock.
    pub fn init(mut peripheral: P) -> Result<Self, InitError> {
        let config = config::handle_config();
        let boot_path = initialize(&mut peripheral, &config)?;
        Ok(Self {
            peripheral,
            config,
            boot_path,
        })
    }

    /// Read the current calendar value.
    ///
    /// Both registers are read even when the first read fails: a time read
    /// freezes the date shadow register until the date is read again.
    ///
    /// # Errors
    ///
    /// The first of: date read status, time read status, decode error.
    pub fn load(&mut self) -> Result<Calendar, RtcError> {
        let date = self.peripheral.read_date();
        let time = self.peripheral.read_time();

        let date = date.map_err(|status| Self::log_failure("date read", status.into()))?;
        let time = time.map_err(|status| Self::log_failure("time read", status.into()))?;
        Ok(calendar::to_calendar(&date, &time)?)
    }

    /// Set the calendar.
    ///
    /// `calendar.subsecond_millis` is ignored; the sub-second counter
    /// restarts on the write. Nothing is written if `calendar` cannot be
    /// encoded.
    ///
    /// # Errors
    ///
    /// Conversion error, else the first failing write. A failed date write
    /// leaves the time register untouched. If the time write fails the date
    /// may already be updated.
    pub fn store(&mut self, calendar: &Calendar) -> Result<(), RtcError> {
        let (date, time) = calendar::from_calendar(calendar)?;
        debug!("rtc: store {}", calendar);

        let mut window = WriteWindow::open(&mut self.peripheral);
        translate(window.write_date(&date))
            .map_err(|err| Self::log_failure("date write", err))?;
        translate(window.write_time(&time))
            .map_err(|err| Self::log_failure("time write", err))
    }

    /// Program alarm `alarm` to fire at `target`.
    ///
    /// Overwrites whatever the slot held. The calendar is not affected.
    ///
    /// # Errors
    ///
    /// Conversion error, else the translated alarm-write status.
    pub fn alarm_setup(&mut self, target: &Calendar, alarm: AlarmId) -> Result<(), RtcError> {
        let raw = alarm_for(target, alarm)?;
        debug!("rtc: alarm {} at {}", alarm.index(), target);

        let mut window = WriteWindow::open(&mut self.peripheral);
        translate(window.set_alarm(&raw)).map_err(|err| Self::log_failure("alarm write", err))
    }

    /// Path taken by [`init`](Self::init) on this boot.
    #[must_use]
    pub fn boot_path(&self) -> BootPath {
        self.boot_path
    }

    /// Handle descriptor in use.
    #[must_use]
    pub fn handle_config(&self) -> &RtcInitConfig {
        &self.config
    }

    /// Borrow the peripheral.
    #[must_use]
    pub fn peripheral(&self) -> &P {
        &self.peripheral
    }

    /// Give the peripheral back.
    #[must_use]
    pub fn release(self) -> P {
        self.peripheral
    }

    fn log_failure(what: &str, err: RtcError) -> RtcError {
        warn!("rtc: {} failed: {}", what, err);
        err
    }
}
