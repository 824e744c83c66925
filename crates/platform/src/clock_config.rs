//! RTC clock configuration constants.
//!
//! The RTC calendar advances once per `ck_spre` tick. `ck_spre` is derived
//! from the selected RTC clock through two prescalers:
//!
//! ```text
//! f(ck_spre) = f(RTCCLK) / ((PREDIV_A + 1) * (PREDIV_S + 1))
//! ```
//!
//! With a 32.768 kHz watch crystal on LSE, `PREDIV_A = 127` and
//! `PREDIV_S = 255` give exactly 1 Hz. The asynchronous prescaler is kept
//! as large as possible to minimise power consumption.
//!
//! # Sources
//!
//! - STM32F4 Reference Manual (RM0090): Section 26.3.1 (RTC clock and prescalers)
//! - AN3371: "Using the hardware real-time clock (RTC) in STM32", Table 7

/// RTC input clock selection (RCC_BDCR.RTCSEL).
///
/// Changing this selection on real hardware forces a backup-domain reset:
/// the calendar, alarms and RCC_BDCR itself return to reset values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RtcClockSource {
    /// Low-speed external 32.768 kHz crystal. Keeps running on VBAT.
    Lse,
    /// Low-speed internal RC (~32 kHz, poor accuracy). Stops without VDD.
    Lsi,
    /// High-speed external clock divided by RTCPRE. Stops without VDD.
    HseDiv,
}

/// Frequency of the watch crystal fitted on the LSE pins.
pub const LSE_FREQUENCY_HZ: u32 = 32_768;

/// Asynchronous prescaler (RTC_PRER.PREDIV_A, 7 bits).
pub const RTC_ASYNCH_PREDIV: u32 = 127;

/// Synchronous prescaler (RTC_PRER.PREDIV_S, 15 bits).
///
/// Also the reload value of the sub-second down-counter (RTC_SSR).
pub const RTC_SYNCH_PREDIV: u32 = 255;

/// Calendar tick produced by a given crystal and prescaler pair.
///
/// Returns 0 if the divider product is zero or overflows.
#[must_use]
pub const fn calendar_tick_hz(clock_hz: u32, asynch_prediv: u32, synch_prediv: u32) -> u32 {
    let (Some(a), Some(s)) = (asynch_prediv.checked_add(1), synch_prediv.checked_add(1)) else {
        return 0;
    };
    let Some(div) = a.checked_mul(s) else {
        return 0;
    };
    match clock_hz.checked_div(div) {
        Some(hz) => hz,
        None => 0,
    }
}

/// `true` when the prescaler pair divides the clock to exactly 1 Hz.
#[must_use]
pub const fn divides_to_one_hz(clock_hz: u32, asynch_prediv: u32, synch_prediv: u32) -> bool {
    let (Some(a), Some(s)) = (asynch_prediv.checked_add(1), synch_prediv.checked_add(1)) else {
        return false;
    };
    match a.checked_mul(s) {
        Some(div) => div == clock_hz,
        None => false,
    }
}

// PREDIV_A is a 7-bit field, PREDIV_S a 15-bit field.
const _: () = assert!(RTC_ASYNCH_PREDIV <= 0x7F, "PREDIV_A must fit in 7 bits");
const _: () = assert!(RTC_SYNCH_PREDIV <= 0x7FFF, "PREDIV_S must fit in 15 bits");
const _: () = assert!(
    divides_to_one_hz(LSE_FREQUENCY_HZ, RTC_ASYNCH_PREDIV, RTC_SYNCH_PREDIV),
    "RTC prescalers must divide the LSE crystal to exactly 1 Hz"
);

// ─── Tests ───────────────────────────────────────────────────────────────────
