//! Resolves a preset or custom bounds into a concrete date interval.

use serde::Serialize;
use time::{Date, Duration};

use crate::{
    Error,
    calendar::{inclusive_day_count, year_start},
    period::Preset,
};

/// An inclusive range of calendar days.
///
/// The end is never before the start, so every interval covers at least one
/// day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateInterval {
    from: Date,
    to: Date,
}

impl DateInterval {
    /// Create an interval covering `from` to `to`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvertedRange] if `to` is before `from`.
    pub fn new(from: Date, to: Date) -> Result<Self, Error> {
        if to < from {
            return Err(Error::InvertedRange { from, to });
        }

        Ok(Self { from, to })
    }

    /// The interval of `day_count` days that ends on `to`.
    ///
    /// A `day_count` of zero is treated as one.
    ///
    /// # Errors
    ///
    /// Returns [Error::DateOutOfRange] if the interval would start before the
    /// earliest supported date.
    pub fn ending_on(to: Date, day_count: u32) -> Result<Self, Error> {
        let from = to
            .checked_sub(Duration::days(i64::from(day_count.max(1)) - 1))
            .ok_or(Error::DateOutOfRange(to))?;

        Ok(Self { from, to })
    }

    /// The first day of the interval.
    pub fn from(&self) -> Date {
        self.from
    }

    /// The last day of the interval.
    pub fn to(&self) -> Date {
        self.to
    }

    /// The number of days in the interval, counting both ends.
    pub fn day_count(&self) -> u32 {
        u32::try_from(inclusive_day_count(self.from, self.to)).unwrap_or(u32::MAX)
    }

    /// Whether `date` falls within the interval.
    pub fn contains(&self, date: Date) -> bool {
        (self.from..=self.to).contains(&date)
    }

    /// Every day in the interval in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + use<> {
        let to = self.to;
        std::iter::successors(Some(self.from), move |date| {
            date.next_day().filter(|next| *next <= to)
        })
    }
}

/// A preset resolved against a specific current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedPeriod {
    /// The preset the user picked.
    pub preset: Preset,
    /// The days the preset covers.
    pub interval: DateInterval,
    /// The number of days in `interval`, counting both ends.
    pub day_count: u32,
}

/// Resolves `preset` into concrete dates relative to `now`.
///
/// Named presets end on `now` (or the day before for [Preset::Yesterday]) and
/// reach back their fixed number of days. [Preset::Ytd] starts on January 1
/// of `now`'s year. [Preset::Custom] uses `custom_from` and `custom_to`, which
/// are ignored for every other preset.
///
/// # Errors
///
/// Returns [Error::MissingCustomBounds] if `preset` is [Preset::Custom] and
/// either bound is missing, or [Error::InvertedRange] if the custom end date
/// is before the custom start date. Returns [Error::DateOutOfRange] if the
/// period would start before the earliest supported date.
pub fn resolve(
    preset: Preset,
    now: Date,
    custom_from: Option<Date>,
    custom_to: Option<Date>,
) -> Result<ResolvedPeriod, Error> {
    let interval = match preset {
        Preset::Custom => {
            let (Some(from), Some(to)) = (custom_from, custom_to) else {
                tracing::warn!(
                    ?custom_from,
                    ?custom_to,
                    "Rejected custom range without both bounds"
                );
                return Err(Error::MissingCustomBounds);
            };

            DateInterval::new(from, to)?
        }
        Preset::Ytd => DateInterval::new(year_start(now), now)?,
        Preset::Yesterday => {
            let yesterday = now.previous_day().ok_or(Error::DateOutOfRange(now))?;
            DateInterval::ending_on(yesterday, 1)?
        }
        _ => {
            let day_count = preset.fixed_day_count().unwrap_or(1);
            DateInterval::ending_on(now, day_count)?
        }
    };

    let period = ResolvedPeriod {
        preset,
        interval,
        day_count: interval.day_count(),
    };

    tracing::debug!(
        %preset,
        from = %interval.from(),
        to = %interval.to(),
        day_count = period.day_count,
        "Resolved date range"
    );

    Ok(period)
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        Error,
        period::{DateInterval, Preset, resolve},
    };

    #[test]
    fn named_presets_have_fixed_day_counts() {
        let now = date!(2025 - 03 - 31);
        let expected = [
            (Preset::Today, 1),
            (Preset::Yesterday, 1),
            (Preset::Last7d, 7),
            (Preset::Last30d, 30),
            (Preset::Last60d, 60),
            (Preset::Last90d, 90),
            (Preset::Last2mo, 60),
            (Preset::Last3mo, 90),
            (Preset::Last6mo, 180),
            (Preset::Last12mo, 365),
            (Preset::Last365d, 365),
        ];

        for (preset, day_count) in expected {
            let period = resolve(preset, now, None, None).unwrap();
            assert_eq!(period.day_count, day_count, "day count for {preset}");
            assert_eq!(period.interval.day_count(), day_count);
        }
    }

    #[test]
    fn last30d_ends_today() {
        let period = resolve(Preset::Last30d, date!(2025 - 03 - 31), None, None).unwrap();

        assert_eq!(period.day_count, 30);
        assert_eq!(period.interval.from(), date!(2025 - 03 - 02));
        assert_eq!(period.interval.to(), date!(2025 - 03 - 31));
    }

    #[test]
    fn today_is_a_single_day() {
        let now = date!(2025 - 03 - 31);
        let period = resolve(Preset::Today, now, None, None).unwrap();

        assert_eq!(period.interval.from(), now);
        assert_eq!(period.interval.to(), now);
    }

    #[test]
    fn yesterday_ends_the_day_before_now() {
        let period = resolve(Preset::Yesterday, date!(2025 - 03 - 01), None, None).unwrap();

        assert_eq!(period.interval.from(), date!(2025 - 02 - 28));
        assert_eq!(period.interval.to(), date!(2025 - 02 - 28));
        assert_eq!(period.day_count, 1);
    }

    #[test]
    fn ytd_starts_on_january_first() {
        let period = resolve(Preset::Ytd, date!(2025 - 07 - 15), None, None).unwrap();

        assert_eq!(period.interval.from(), date!(2025 - 01 - 01));
        assert_eq!(period.interval.to(), date!(2025 - 07 - 15));
        assert_eq!(period.day_count, 196);
    }

    #[test]
    fn ytd_on_new_years_day_is_one_day() {
        let period = resolve(Preset::Ytd, date!(2025 - 01 - 01), None, None).unwrap();

        assert_eq!(period.day_count, 1);
    }

    #[test]
    fn custom_counts_both_ends() {
        let period = resolve(
            Preset::Custom,
            date!(2025 - 03 - 31),
            Some(date!(2025 - 02 - 01)),
            Some(date!(2025 - 02 - 28)),
        )
        .unwrap();

        assert_eq!(period.day_count, 28);
        assert_eq!(period.interval.from(), date!(2025 - 02 - 01));
        assert_eq!(period.interval.to(), date!(2025 - 02 - 28));
    }

    #[test]
    fn custom_without_both_bounds_fails() {
        let now = date!(2025 - 03 - 31);

        assert_eq!(
            resolve(Preset::Custom, now, None, None),
            Err(Error::MissingCustomBounds)
        );
        assert_eq!(
            resolve(Preset::Custom, now, Some(date!(2025 - 03 - 01)), None),
            Err(Error::MissingCustomBounds)
        );
        assert_eq!(
            resolve(Preset::Custom, now, None, Some(date!(2025 - 03 - 01))),
            Err(Error::MissingCustomBounds)
        );
    }

    #[test]
    fn custom_with_reversed_bounds_fails() {
        let result = resolve(
            Preset::Custom,
            date!(2025 - 03 - 31),
            Some(date!(2025 - 03 - 10)),
            Some(date!(2025 - 03 - 01)),
        );

        assert_eq!(
            result,
            Err(Error::InvertedRange {
                from: date!(2025 - 03 - 10),
                to: date!(2025 - 03 - 01)
            })
        );
    }

    #[test]
    fn named_presets_ignore_custom_bounds() {
        let now = date!(2025 - 03 - 31);
        let with_bounds = resolve(
            Preset::Last7d,
            now,
            Some(date!(2024 - 01 - 01)),
            Some(date!(2024 - 12 - 31)),
        )
        .unwrap();

        assert_eq!(with_bounds, resolve(Preset::Last7d, now, None, None).unwrap());
    }

    #[test]
    fn periods_before_earliest_date_fail() {
        assert_eq!(
            resolve(Preset::Last30d, Date::MIN, None, None),
            Err(Error::DateOutOfRange(Date::MIN))
        );
        assert_eq!(
            resolve(Preset::Yesterday, Date::MIN, None, None),
            Err(Error::DateOutOfRange(Date::MIN))
        );
        assert_eq!(
            resolve(Preset::Today, Date::MIN, None, None).map(|period| period.day_count),
            Ok(1)
        );
    }

    #[test]
    fn interval_dates_are_inclusive_and_ascending() {
        let interval = DateInterval::new(date!(2024 - 12 - 30), date!(2025 - 01 - 02)).unwrap();
        let dates: Vec<_> = interval.dates().collect();

        assert_eq!(
            dates,
            vec![
                date!(2024 - 12 - 30),
                date!(2024 - 12 - 31),
                date!(2025 - 01 - 01),
                date!(2025 - 01 - 02),
            ]
        );
        assert!(interval.contains(date!(2025 - 01 - 02)));
        assert!(!interval.contains(date!(2025 - 01 - 03)));
    }
}
