//! Converts instants to calendar dates in the seller's time zone.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// The UTC offset of `canonical_timezone` (e.g. "Pacific/Auckland") at `instant`.
pub fn get_local_offset(canonical_timezone: &str, instant: OffsetDateTime) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&instant).to_utc())
}

/// The calendar date of `instant` in `canonical_timezone`.
///
/// This is the `now` the dashboard resolves periods against, so a seller in
/// Auckland sees "today" roll over at their midnight rather than UTC's.
///
/// # Errors
///
/// Returns [Error::InvalidTimezone] if `canonical_timezone` is not a known
/// time zone name.
pub fn local_date(canonical_timezone: &str, instant: OffsetDateTime) -> Result<Date, Error> {
    let offset = get_local_offset(canonical_timezone, instant)
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))?;

    Ok(instant.to_offset(offset).date())
}
