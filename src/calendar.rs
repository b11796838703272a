//! Week indexing and labeling.
//!
//! Weeks run Sunday..Saturday. A week belongs to the month holding its
//! Wednesday, and its ordinal inside that month is the Wednesday's
//! week-of-month.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::CalendarError;
use crate::models::{WeekKey, WeekSpan};

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// `ceil((day_of_month + weekday_of_the_1st) / 7)`, Sunday = 0.
pub fn week_of_month(date: NaiveDate) -> u32 {
    let day = date.day();
    let weekday = date.weekday().num_days_from_sunday();
    let first_weekday = (weekday + 7 - (day - 1) % 7) % 7;
    (day + first_weekday + 6) / 7
}

pub fn week_key(date: NaiveDate) -> WeekKey {
    WeekKey {
        year: date.year(),
        month: date.month0(),
        week_of_month: week_of_month(date),
    }
}

/// `"Feb W3"` style label.
pub fn label(date: NaiveDate) -> String {
    week_key(date).label()
}

pub fn first_day_of_year(year: i32) -> Result<NaiveDate, CalendarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CalendarError::UnsupportedYear(year));
    }
    NaiveDate::from_ymd_opt(year, 1, 1).ok_or(CalendarError::UnsupportedYear(year))
}

/// Every Sunday-started week overlapping `year`, ordered by start.
pub fn build_weeks(year: i32) -> Result<Vec<WeekSpan>, CalendarError> {
    let jan_first = first_day_of_year(year)?;
    let lead = i64::from(jan_first.weekday().num_days_from_sunday());
    let mut current = jan_first - Duration::days(lead);
    let mut weeks = Vec::with_capacity(54);

    while current.year() <= year {
        let end = current + Duration::days(6);
        let wednesday = current + Duration::days(3);

        if end.year() >= year && current.year() <= year {
            let key = week_key(wednesday);
            weeks.push(WeekSpan {
                start: current,
                end,
                label: key.label(),
                year: key.year,
                month: key.month,
                week_of_month: key.week_of_month,
            });
        }

        current = end + Duration::days(1);
    }

    Ok(weeks)
}

/// The weeks whose labeling Wednesday falls inside `year`.
///
/// Edge weeks labeled into the neighbouring December or January are left
/// out so their keys never shadow the target year's own weeks.
pub fn grid_weeks(year: i32) -> Result<Vec<WeekSpan>, CalendarError> {
    Ok(build_weeks(year)?
        .into_iter()
        .filter(|week| week.year == year)
        .collect())
}
