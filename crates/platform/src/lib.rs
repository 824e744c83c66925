//! RTC peripheral access layer for `time-svc`
//!
//! This crate describes the narrow interface the calendar driver needs from
//! the battery-backed RTC peripheral, so the driver can be developed and
//! tested without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Boot code / application
//!         ↓
//! time-svc (warm/cold init, calendar load/store, alarm)
//!         ↓
//! Platform access layer (this crate - trait + raw register types)
//!         ↓
//! Vendor HAL / PAC (RCC, PWR, RTC registers)
//! ```
//!
//! # Contents
//!
//! - [`RtcPeripheral`] - clock-source, backup-domain, date/time and alarm access
//! - [`HalStatus`] - status code returned by every fallible peripheral call
//! - [`RawDate`], [`RawTime`], [`RawAlarm`] - packed-decimal register images
//! - [`clock_config`] - crystal frequency and 1 Hz divider constants
//! - [`mocks`] - in-memory peripheral for host tests (`std` feature or `cfg(test)`)
//!
//! # Features
//!
//! - `std`: expose [`mocks`] to downstream crates
//! - `defmt`: derive `defmt::Format` on all public types
//!
//! # Example
//!
//! ```no_run
//! use platform::RtcPeripheral;
//!
//! fn running<P: RtcPeripheral>(rtc: &P) -> bool {
//!     rtc.rtc_enabled()
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this hardware access crate:
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors: callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod clock_config;
pub mod mocks;
pub mod rtc;

pub use clock_config::{RtcClockSource, LSE_FREQUENCY_HZ, RTC_ASYNCH_PREDIV, RTC_SYNCH_PREDIV};
pub use rtc::{
    AlarmDateWeekdaySel, AlarmId, AlarmMask, DaylightSaving, HalStatus, HourFormat, LseState,
    OutputPolarity, OutputSelect, OutputType, RawAlarm, RawDate, RawTime, RtcInitConfig,
    RtcPeripheral, StoreOperation, SubSecondMask, TimeFormat,
};
