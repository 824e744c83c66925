//! Alarm programming.

use platform::{AlarmDateWeekdaySel, AlarmId, AlarmMask, RawAlarm, SubSecondMask};

use crate::calendar::{self, Calendar};
use crate::error::ConversionError;

/// Build the alarm register image firing at `target`.
///
/// The alarm compares hours, minutes, seconds and day-of-month; sub-seconds
/// are ignored. Month and year are not part of an RTC alarm, so a target
/// repeats monthly on the same day.
///
/// # Errors
///
/// Same as [`calendar::from_calendar`].
pub fn alarm_for(target: &Calendar, alarm: AlarmId) -> Result<RawAlarm, ConversionError> {
    let (date, time) = calendar::from_calendar(target)?;
    Ok(RawAlarm {
        time,
        mask: AlarmMask::NONE,
        sub_second_mask: SubSecondMask::All,
        date_weekday_sel: AlarmDateWeekdaySel::Date,
        date_weekday: date.date,
        alarm,
    })
}
