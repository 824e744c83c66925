//! Warm/cold bring-up.
//!
//! The RTC lives in the battery-backed domain and keeps counting across MCU
//! resets. RCC_BDCR.RTCEN tells the two situations apart:
//!
//! ```text
//!            RTCEN set?
//!           /          \
//!         yes           no
//!   ┌──────────┐   ┌────────────────────────────────────┐
//!   │  Warm    │   │  Cold                              │
//!   │ bus      │   │ LSE on → select LSE (domain reset) │
//!   │ bridge,  │   │ → lock → init → write epoch        │
//!   │ adopt    │   └────────────────────────────────────┘
//!   └──────────┘
//! ```
//!
//! The warm path never touches the oscillator, the prescalers or the
//! calendar: whatever the RTC counted while the MCU was down is kept.

use core::fmt;

use platform::{RtcInitConfig, RtcPeripheral};

use crate::backup::WriteWindow;
use crate::calendar::{self, Calendar};
use crate::clock_source::configure_clock_source;
use crate::error::InitError;
use crate::status::translate;

/// Which bring-up path a boot took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootPath {
    /// The RTC was already running; its configuration and calendar were kept.
    Warm,
    /// The backup domain was reset and the calendar restarted at the epoch.
    Cold,
}

impl fmt::Display for BootPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warm => f.write_str("warm"),
            Self::Cold => f.write_str("cold"),
        }
    }
}

/// Classify a boot from the RTC-enable bit.
#[must_use]
pub const fn detect(rtc_enabled: bool) -> BootPath {
    if rtc_enabled {
        BootPath::Warm
    } else {
        BootPath::Cold
    }
}

/// Bring the peripheral to a ready state with `config`.
///
/// Returns the path taken. Must run once per MCU reset, before any calendar
/// access.
///
/// # Errors
///
/// - [`InitError::ClockConfiguration`] if LSE cannot be enabled or selected.
/// - [`InitError::Peripheral`] if bring-up or the epoch write fails.
pub fn initialize<P: RtcPeripheral>(
    peripheral: &mut P,
    config: &RtcInitConfig,
) -> Result<BootPath, InitError> {
    let path = detect(peripheral.rtc_enabled());
    info!("rtc: {} start", path);

    match path {
        BootPath::Warm => warm_start(peripheral, config),
        BootPath::Cold => cold_start(peripheral, config)?,
    }
    Ok(path)
}

fn warm_start<P: RtcPeripheral>(peripheral: &mut P, config: &RtcInitConfig) {
    peripheral.enable_bus_bridge();
    peripheral.adopt(config);
}

fn cold_start<P: RtcPeripheral>(
    peripheral: &mut P,
    config: &RtcInitConfig,
) -> Result<(), InitError> {
    configure_clock_source(peripheral)?;

    debug!(
        "rtc: init prediv_a={} prediv_s={}",
        config.asynch_prediv,
        config.synch_prediv
    );
    translate(peripheral.init(config)).inspect_err(|err| {
        warn!("rtc: init failed: {}", err);
    })?;

    let (date, time) = calendar::from_calendar(&Calendar::epoch())?;
    let mut window = WriteWindow::open(peripheral);
    translate(window.write_date(&date))?;
    translate(window.write_time(&time))?;
    drop(window);

    info!("rtc: calendar reset to {}", Calendar::epoch());
    Ok(())
}
