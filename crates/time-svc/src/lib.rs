//! Battery-backed real-time clock driver
//!
//! Keeps wall-clock time across MCU resets using the RTC in the backup
//! domain, clocked from the 32.768 kHz LSE crystal.
//!
//! # Lifecycle
//!
//! ```text
//! RealTimeClock::init ──► warm (RTC already running): adopt, keep calendar
//!                     └─► cold (RTC off): LSE → reset domain → 1 Hz → epoch
//!         │
//!         ▼
//! load / store / alarm_setup   (any order, any number of times)
//! ```
//!
//! # Modules
//!
//! - [`rtc`] - [`RealTimeClock`], the public entry point
//! - [`init`] - warm/cold detection and bring-up
//! - [`calendar`] - [`Calendar`] and register conversion
//! - [`bcd`] - packed-decimal fields
//! - [`alarm`] - alarm register image
//! - [`backup`] - backup-domain write window guard
//! - [`status`] - peripheral status translation
//! - [`config`] - epoch and handle configuration
//!
//! # Features
//!
//! - `std`: host builds (enables `platform/std`)
//! - `defmt`: log through `defmt`, derive `defmt::Format`
//! - `tracing`: log through `tracing`
//! - `chrono`: `Calendar` ↔ `chrono::NaiveDateTime`

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
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::module_name_repetitions)]

#[macro_use]
mod log;

pub mod alarm;
pub mod backup;
pub mod bcd;
pub mod calendar;
#[cfg(feature = "chrono")]
mod calendar_chrono;
pub mod clock_source;
pub mod config;
pub mod error;
pub mod init;
pub mod rtc;
pub mod status;

pub use calendar::{Calendar, Weekday};
pub use error::{ClockSetupStep, ConversionError, InitError, RtcError};
pub use init::BootPath;
pub use platform::AlarmId;
pub use rtc::RealTimeClock;
