//! Calendar helpers shared by the period and series modules.

use time::{Date, Duration, Month};

/// The Monday that starts the ISO week containing `date`.
///
/// Sunday is the seventh day of the week, so it maps to the Monday six days
/// before it rather than the following day.
///
/// Dates in the first partial week of the supported range map to the earliest
/// supported date.
pub fn week_start(date: Date) -> Date {
    let weekday_number = date.weekday().number_from_monday() as i64;
    date.checked_sub(Duration::days(weekday_number - 1)).unwrap_or(Date::MIN)
}

/// The first day of the calendar month containing `date`.
pub fn month_start(date: Date) -> Date {
    // Day 1 exists in every month.
    date.replace_day(1).unwrap_or(date)
}

/// January 1 of the year containing `date`.
pub fn year_start(date: Date) -> Date {
    date.replace_ordinal(1).unwrap_or(date)
}

/// The same calendar day `years` years earlier.
///
/// 29 February maps to 28 February when the target year is not a leap year.
/// Returns `None` if the target year is out of range.
pub fn years_earlier(date: Date, years: i32) -> Option<Date> {
    let year = date.year().checked_sub(years)?;
    let day = date.day().min(last_day_of_month(year, date.month()));

    Date::from_calendar_date(year, date.month(), day).ok()
}

/// The number of whole days from `from` to `to`, plus one.
///
/// A range that starts and ends on the same day has one day in it.
pub fn inclusive_day_count(from: Date, to: Date) -> i64 {
    (to - from).whole_days() + 1
}

pub fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
