//! Calendar values and their register encoding.
//!
//! [`to_calendar`] and [`from_calendar`] convert between a [`Calendar`] and
//! the RTC_DR / RTC_TR images. Each field is converted on its own; the only
//! validation is what packed-decimal encoding itself demands, plus the year
//! window imposed by the two-digit year register. In particular the weekday
//! is carried as-is: the RTC only increments it, and whoever sets the clock
//! owns its consistency with the date ([`Calendar::with_derived_weekday`]
//! helps there).

use core::fmt;

use platform::{DaylightSaving, RawDate, RawTime, StoreOperation, TimeFormat};

use crate::bcd;
use crate::config::{EPOCH_WEEKDAY, EPOCH_YEAR};
use crate::error::ConversionError;

/// Day of the week.
///
/// Discriminants are the RTC weekday register values.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    /// Decode the RTC weekday register (1 = Monday … 7 = Sunday).
    ///
    /// # Errors
    ///
    /// [`ConversionError::InvalidWeekday`] for 0 and values above 7.
    pub const fn from_raw(raw: u8) -> Result<Self, ConversionError> {
        Ok(match raw {
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            6 => Self::Saturday,
            7 => Self::Sunday,
            x => return Err(ConversionError::InvalidWeekday(x)),
        })
    }

    /// RTC weekday register value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Days since the preceding Sunday (Sunday = 0), as in C `tm_wday`.
    #[must_use]
    pub const fn num_days_from_sunday(self) -> u8 {
        match self {
            Self::Sunday => 0,
            other => other as u8,
        }
    }

    /// Gregorian weekday of `year-month-day`.
    ///
    /// Returns `None` for month outside `1..=12`, day 0 or year 0. The day is
    /// not checked against the month length.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)] // u32 on inputs bounded by u16/u8: cannot overflow
    pub const fn from_date(year: u16, month: u8, day: u8) -> Option<Self> {
        // Sakamoto's method, month offsets for a year starting in March.
        let offset: u32 = match month {
            1 => 0,
            2 => 3,
            3 => 2,
            4 => 5,
            5 => 0,
            6 => 3,
            7 => 5,
            8 => 1,
            9 => 4,
            10 => 6,
            11 => 2,
            12 => 4,
            _ => return None,
        };
        if day == 0 || year == 0 {
            return None;
        }
        let y = if month < 3 { year as u32 - 1 } else { year as u32 };
        let from_sunday = (y + y / 4 - y / 100 + y / 400 + offset + day as u32) % 7;
        Some(match from_sunday {
            0 => Self::Sunday,
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            _ => Self::Saturday,
        })
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
            Self::Sunday => "Sun",
        })
    }
}

/// Broken-down calendar time as stored by the RTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calendar {
    /// Absolute year, `EPOCH_YEAR..=EPOCH_YEAR + 99` to be storable.
    pub year: u16,
    /// 1..=12, 1 is January
    pub month: u8,
    /// 1..=31
    pub day: u8,
    /// Day of the week. Trusted, not derived.
    pub weekday: Weekday,
    /// 0..=23
    pub hour: u8,
    /// 0..=59
    pub minute: u8,
    /// 0..=59
    pub second: u8,
    /// Fraction of the current second, truncated to milliseconds.
    /// Filled on load, ignored on store.
    pub subsecond_millis: u16,
}

impl Calendar {
    /// Midnight, January 1 of the epoch year.
    #[must_use]
    pub const fn epoch() -> Self {
        Self {
            year: EPOCH_YEAR,
            month: 1,
            day: 1,
            weekday: EPOCH_WEEKDAY,
            hour: 0,
            minute: 0,
            second: 0,
            subsecond_millis: 0,
        }
    }

    /// Years since the epoch, `None` before it.
    #[must_use]
    pub const fn year_offset(&self) -> Option<u16> {
        self.year.checked_sub(EPOCH_YEAR)
    }

    /// Gregorian leap year test for `self.year`.
    #[must_use]
    pub const fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    /// Day of the year, 1 = January 1. `None` if month or day is out of range
    /// for the month.
    #[must_use]
    pub fn day_of_year(&self) -> Option<u16> {
        if self.day == 0 || self.day > days_in_month(self.year, self.month)? {
            return None;
        }
        let preceding: u16 = (1..self.month)
            .filter_map(|m| days_in_month(self.year, m))
            .map(u16::from)
            .sum();
        preceding.checked_add(u16::from(self.day))
    }

    /// Copy with `weekday` recomputed from the date. Unchanged if the date is
    /// not a valid Gregorian month/day.
    #[must_use]
    pub fn with_derived_weekday(self) -> Self {
        match Weekday::from_date(self.year, self.month, self.day) {
            Some(weekday) => Self { weekday, ..self },
            None => self,
        }
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.weekday, self.hour, self.minute, self.second
        )
    }
}

/// Gregorian leap year test.
#[must_use]
#[allow(clippy::arithmetic_side_effects)] // remainder by non-zero constants
pub const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`, `None` for month outside `1..=12`.
#[must_use]
pub const fn days_in_month(year: u16, month: u8) -> Option<u8> {
    Some(match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => return None,
    })
}

/// Decode RTC_DR and RTC_TR images into a [`Calendar`].
///
/// The sub-second fraction is best effort: `(PREDIV_S - SSR) / (PREDIV_S + 1)`
/// truncated to milliseconds, 0 when the register layer reports no fraction.
///
/// # Errors
///
/// [`ConversionError::InvalidBcd`] for any field with a nibble above 9,
/// [`ConversionError::InvalidWeekday`] for a weekday outside 1..=7.
pub fn to_calendar(date: &RawDate, time: &RawTime) -> Result<Calendar, ConversionError> {
    Ok(Calendar {
        year: EPOCH_YEAR.saturating_add(u16::from(bcd::decode(date.year)?)),
        month: bcd::decode(date.month)?,
        day: bcd::decode(date.date)?,
        weekday: Weekday::from_raw(date.weekday)?,
        hour: bcd::decode(time.hours)?,
        minute: bcd::decode(time.minutes)?,
        second: bcd::decode(time.seconds)?,
        subsecond_millis: subsecond_millis(time.sub_seconds, time.second_fraction),
    })
}

/// Encode a [`Calendar`] into RTC_DR and RTC_TR images.
///
/// The sub-second fields are written as their idle value and the
/// daylight-saving flags as "no adjustment": neither is tracked here.
///
/// # Errors
///
/// [`ConversionError::YearOutOfRange`] if the year is outside the 100-year
/// epoch window, [`ConversionError::NotTwoDigits`] for any other field above 99.
pub fn from_calendar(calendar: &Calendar) -> Result<(RawDate, RawTime), ConversionError> {
    let year_offset = calendar
        .year_offset()
        .and_then(|offset| u8::try_from(offset).ok())
        .filter(|offset| *offset <= bcd::MAX_VALUE)
        .ok_or(ConversionError::YearOutOfRange(calendar.year))?;

    let date = RawDate {
        weekday: calendar.weekday.raw(),
        month: bcd::encode(calendar.month)?,
        date: bcd::encode(calendar.day)?,
        year: bcd::encode(year_offset)?,
    };
    let time = RawTime {
        hours: bcd::encode(calendar.hour)?,
        minutes: bcd::encode(calendar.minute)?,
        seconds: bcd::encode(calendar.second)?,
        time_format: TimeFormat::Am,
        sub_seconds: 0,
        second_fraction: 0,
        daylight_saving: DaylightSaving::None,
        store_operation: StoreOperation::Reset,
    };
    Ok((date, time))
}

fn subsecond_millis(sub_seconds: u32, second_fraction: u32) -> u16 {
    let elapsed = u64::from(second_fraction.saturating_sub(sub_seconds));
    let ticks_per_second = u64::from(second_fraction).saturating_add(1);
    let millis = elapsed
        .saturating_mul(1000)
        .checked_div(ticks_per_second)
        .unwrap_or(0);
    u16::try_from(millis).unwrap_or(999)
}
