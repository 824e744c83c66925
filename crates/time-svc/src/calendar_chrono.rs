//! `chrono` interop (feature `chrono`).

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::calendar::{Calendar, Weekday};
use crate::error::ConversionError;

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => Self::Mon,
            Weekday::Tuesday => Self::Tue,
            Weekday::Wednesday => Self::Wed,
            Weekday::Thursday => Self::Thu,
            Weekday::Friday => Self::Fri,
            Weekday::Saturday => Self::Sat,
            Weekday::Sunday => Self::Sun,
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl Calendar {
    /// As a `chrono` date-time. The stored weekday is not consulted.
    ///
    /// `None` if the fields do not form a valid Gregorian date and time.
    #[must_use]
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )?
        .and_hms_milli_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
            u32::from(self.subsecond_millis),
        )
    }
}

impl TryFrom<NaiveDateTime> for Calendar {
    type Error = ConversionError;

    /// Weekday is derived from the date. A leap second is folded into the
    /// last millisecond of the preceding second.
    fn try_from(dt: NaiveDateTime) -> Result<Self, Self::Error> {
        let year = u16::try_from(dt.year()).map_err(|_| {
            ConversionError::YearOutOfRange(if dt.year() < 0 { 0 } else { u16::MAX })
        })?;
        let millis = dt.nanosecond().checked_div(1_000_000).unwrap_or(0).min(999);
        Ok(Self {
            year,
            month: narrow(dt.month()),
            day: narrow(dt.day()),
            weekday: dt.weekday().into(),
            hour: narrow(dt.hour()),
            minute: narrow(dt.minute()),
            second: narrow(dt.second()),
            subsecond_millis: u16::try_from(millis).unwrap_or(999),
        })
    }
}

// chrono guarantees every calendar field fits.
fn narrow(field: u32) -> u8 {
    u8::try_from(field).unwrap_or(u8::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn weekday_mapping_is_bijective() {
        for raw in 1..=7 {
            let day = Weekday::from_raw(raw).unwrap();
            assert_eq!(Weekday::from(chrono::Weekday::from(day)), day);
            assert_eq!(
                chrono::Weekday::from(day).number_from_monday(),
                u32::from(raw)
            );
        }
    }

    #[test]
    fn converts_both_ways() {
        let dt = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_milli_opt(10, 30, 0, 250)
            .unwrap();
        let cal = Calendar::try_from(dt).unwrap();

        assert_eq!(cal.weekday, Weekday::Saturday);
        assert_eq!((cal.year, cal.month, cal.day), (2024, 6, 15));
        assert_eq!(cal.subsecond_millis, 250);
        assert_eq!(cal.to_naive_datetime(), Some(dt));
    }

    #[test]
    fn invalid_calendar_has_no_chrono_value() {
        let cal = Calendar { month: 2, day: 30, ..Calendar::epoch() };
        assert_eq!(cal.to_naive_datetime(), None);
    }

    #[test]
    fn negative_year_is_out_of_range() {
        let dt = NaiveDate::from_ymd_opt(-1, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            Calendar::try_from(dt),
            Err(ConversionError::YearOutOfRange(0))
        );
    }
}
