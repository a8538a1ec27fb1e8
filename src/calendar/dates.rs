use time::{Date, Month};

use crate::config::model::{HeaderFormat, WeekStart};
use crate::foundation::error::{CalwallError, CalwallResult};

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const SUNDAY_FIRST_LABELS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];
const MONDAY_FIRST_LABELS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

fn month_of(month0: u8) -> CalwallResult<Month> {
    month0
        .checked_add(1)
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(|| CalwallError::invalid_config(format!("month {month0} out of range 0..=11")))
}

fn first_of_month(year: i32, month0: u8) -> CalwallResult<Date> {
    Date::from_calendar_date(year, month_of(month0)?, 1)
        .map_err(|e| CalwallError::invalid_config(format!("date {year}-{month0}: {e}")))
}

/// Number of days in a zero-based month of the proleptic Gregorian calendar.
pub fn days_in_month(year: i32, month0: u8) -> CalwallResult<u8> {
    let first = first_of_month(year, month0)?;
    if first.month() == Month::December {
        return Ok(31);
    }
    let next = first_of_month(year, month0 + 1)?;
    Ok((next - first).whole_days() as u8)
}

/// Weekday of day 1 re-based to the configured week start (0 = first column).
pub fn first_day_offset(year: i32, month0: u8, week_start: WeekStart) -> CalwallResult<u8> {
    let weekday = first_of_month(year, month0)?.weekday();
    Ok(match week_start {
        WeekStart::Sunday => weekday.number_days_from_sunday(),
        WeekStart::Monday => weekday.number_days_from_monday(),
    })
}

/// Single-letter weekday labels in column order.
pub fn weekday_labels(week_start: WeekStart) -> [&'static str; 7] {
    match week_start {
        WeekStart::Sunday => SUNDAY_FIRST_LABELS,
        WeekStart::Monday => MONDAY_FIRST_LABELS,
    }
}

/// Month title text for the configured header format.
pub fn format_header(year: i32, month0: u8, format: HeaderFormat) -> CalwallResult<String> {
    let name = MONTH_NAMES
        .get(usize::from(month0))
        .copied()
        .ok_or_else(|| {
            CalwallError::invalid_config(format!("month {month0} out of range 0..=11"))
        })?;
    let short = &name[..3];
    let number = u32::from(month0) + 1;
    let short_year = year.rem_euclid(100);
    Ok(match format {
        HeaderFormat::Full => name.to_string(),
        HeaderFormat::Short => short.to_string(),
        HeaderFormat::Numeric => format!("{number:02}"),
        HeaderFormat::NumericFullYear => format!("{number:02}-{year}"),
        HeaderFormat::NumericShortYear => format!("{number:02}-{short_year:02}"),
        HeaderFormat::ShortShortYear => format!("{short} {short_year:02}"),
        HeaderFormat::ShortFullYear => format!("{short} {year}"),
    })
}

/// Grid cell of a date number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub day: u8,
    pub row: u8,
    pub col: u8,
}

/// Row/column placement of every day of the month.
pub fn month_cells(year: i32, month0: u8, week_start: WeekStart) -> CalwallResult<Vec<DayCell>> {
    let offset = first_day_offset(year, month0, week_start)?;
    let days = days_in_month(year, month0)?;
    Ok((1..=days)
        .map(|day| {
            let slot = offset + day - 1;
            DayCell {
                day,
                row: slot / 7,
                col: slot % 7,
            }
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/calendar/dates.rs"]
mod tests;
