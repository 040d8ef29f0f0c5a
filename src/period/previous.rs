//! The comparison period shown next to the current one.

use std::fmt::Display;

use serde::Serialize;

use crate::{
    Error,
    calendar::years_earlier,
    period::{DateInterval, Preset},
};

/// A locale-free key for the "vs previous period" caption.
///
/// The key and optional count are looked up in the caller's translation table;
/// the [Display] impl is an English fallback for logs and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "key", content = "count")]
pub enum ComparisonLabel {
    /// Today compared with yesterday.
    #[serde(rename = "vs_yesterday")]
    Yesterday,
    /// Yesterday compared with the day before.
    #[serde(rename = "vs_day_before")]
    DayBefore,
    /// The preceding block of this many days.
    #[serde(rename = "vs_prior_days")]
    PriorDays(u32),
    /// The preceding block of this many months.
    #[serde(rename = "vs_prior_months")]
    PriorMonths(u32),
    /// The same span one year earlier.
    #[serde(rename = "vs_last_year")]
    LastYear,
    /// The preceding block of a custom range with this many days.
    #[serde(rename = "vs_prior_period")]
    PriorPeriod(u32),
}

impl ComparisonLabel {
    /// The label for comparisons against `preset`'s previous period.
    pub fn for_preset(preset: Preset, day_count: u32) -> Self {
        match preset {
            Preset::Today => Self::Yesterday,
            Preset::Yesterday => Self::DayBefore,
            Preset::Last7d
            | Preset::Last30d
            | Preset::Last60d
            | Preset::Last90d
            | Preset::Last365d => Self::PriorDays(day_count),
            Preset::Last2mo => Self::PriorMonths(2),
            Preset::Last3mo => Self::PriorMonths(3),
            Preset::Last6mo => Self::PriorMonths(6),
            Preset::Last12mo => Self::PriorMonths(12),
            Preset::Ytd => Self::LastYear,
            Preset::Custom => Self::PriorPeriod(day_count),
        }
    }

    /// The translation key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Yesterday => "vs_yesterday",
            Self::DayBefore => "vs_day_before",
            Self::PriorDays(_) => "vs_prior_days",
            Self::PriorMonths(_) => "vs_prior_months",
            Self::LastYear => "vs_last_year",
            Self::PriorPeriod(_) => "vs_prior_period",
        }
    }

    /// The number substituted into the translated text, if any.
    pub fn count(self) -> Option<u32> {
        match self {
            Self::PriorDays(count) | Self::PriorMonths(count) | Self::PriorPeriod(count) => {
                Some(count)
            }
            Self::Yesterday | Self::DayBefore | Self::LastYear => None,
        }
    }
}

impl Display for ComparisonLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yesterday => write!(f, "vs yesterday"),
            Self::DayBefore => write!(f, "vs day before"),
            Self::PriorDays(count) => write!(f, "vs prior {count} days"),
            Self::PriorMonths(count) => write!(f, "vs prior {count} months"),
            Self::LastYear => write!(f, "vs last year"),
            Self::PriorPeriod(count) => write!(f, "vs prior {count} days"),
        }
    }
}

/// The period the current one is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreviousPeriod {
    /// The days of the comparison period.
    pub interval: DateInterval,
    /// The caption for the comparison.
    pub label: ComparisonLabel,
}

/// Derives the comparison period for `interval`.
///
/// The previous period is the block of the same number of days that ends the
/// day before `interval` starts. Year to date is the exception: it is compared
/// with the same calendar span one year earlier.
///
/// # Errors
///
/// Returns [Error::DateOutOfRange] if the previous period would start before
/// the earliest supported date.
pub fn previous(preset: Preset, interval: DateInterval) -> Result<PreviousPeriod, Error> {
    let day_count = interval.day_count();
    let out_of_range = || Error::DateOutOfRange(interval.from());

    let previous_interval = match preset {
        Preset::Ytd => {
            let from = years_earlier(interval.from(), 1).ok_or_else(out_of_range)?;
            let to = years_earlier(interval.to(), 1).ok_or_else(out_of_range)?;
            DateInterval::new(from, to)?
        }
        _ => {
            let to = interval.from().previous_day().ok_or_else(out_of_range)?;
            DateInterval::ending_on(to, day_count)?
        }
    };

    Ok(PreviousPeriod {
        interval: previous_interval,
        label: ComparisonLabel::for_preset(preset, day_count),
    })
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        Error,
        period::{DateInterval, Preset, resolve},
    };

    use super::{ComparisonLabel, previous};

    #[test]
    fn previous_period_ends_the_day_before() {
        let current = resolve(Preset::Last30d, date!(2025 - 03 - 31), None, None).unwrap();
        let previous = previous(Preset::Last30d, current.interval).unwrap();

        assert_eq!(previous.interval.to(), date!(2025 - 03 - 01));
        assert_eq!(previous.interval.from(), date!(2025 - 01 - 31));
        assert_eq!(previous.interval.day_count(), 30);
        assert_eq!(previous.label, ComparisonLabel::PriorDays(30));
    }

    #[test]
    fn previous_period_has_same_length_for_every_fixed_preset() {
        let now = date!(2025 - 03 - 31);

        for preset in Preset::ALL
            .into_iter()
            .filter(|preset| preset.fixed_day_count().is_some())
        {
            let current = resolve(preset, now, None, None).unwrap();
            let previous = previous(preset, current.interval).unwrap();

            assert_eq!(previous.interval.day_count(), current.day_count, "{preset}");
            assert_eq!(
                previous.interval.to().next_day(),
                Some(current.interval.from()),
                "{preset}"
            );
        }
    }

    #[test]
    fn today_is_compared_with_yesterday() {
        let current = resolve(Preset::Today, date!(2025 - 03 - 01), None, None).unwrap();
        let previous = previous(Preset::Today, current.interval).unwrap();

        assert_eq!(previous.interval.from(), date!(2025 - 02 - 28));
        assert_eq!(previous.interval.to(), date!(2025 - 02 - 28));
        assert_eq!(previous.label, ComparisonLabel::Yesterday);
    }

    #[test]
    fn ytd_is_compared_with_same_span_last_year() {
        let current = resolve(Preset::Ytd, date!(2025 - 07 - 15), None, None).unwrap();
        let previous = previous(Preset::Ytd, current.interval).unwrap();

        assert_eq!(previous.interval.from(), date!(2024 - 01 - 01));
        assert_eq!(previous.interval.to(), date!(2024 - 07 - 15));
        assert_eq!(previous.label, ComparisonLabel::LastYear);
    }

    #[test]
    fn ytd_on_leap_day_maps_to_february_28() {
        let current = resolve(Preset::Ytd, date!(2024 - 02 - 29), None, None).unwrap();
        let previous = previous(Preset::Ytd, current.interval).unwrap();

        assert_eq!(previous.interval.to(), date!(2023 - 02 - 28));
    }

    #[test]
    fn custom_range_shifts_back_by_its_own_length() {
        let interval = DateInterval::new(date!(2025 - 02 - 10), date!(2025 - 02 - 21)).unwrap();
        let previous = previous(Preset::Custom, interval).unwrap();

        assert_eq!(previous.interval.from(), date!(2025 - 01 - 29));
        assert_eq!(previous.interval.to(), date!(2025 - 02 - 09));
        assert_eq!(previous.label, ComparisonLabel::PriorPeriod(12));
    }

    #[test]
    fn previous_period_before_earliest_date_fails() {
        let interval = DateInterval::new(Date::MIN, Date::MIN).unwrap();

        assert_eq!(
            previous(Preset::Custom, interval),
            Err(Error::DateOutOfRange(Date::MIN))
        );
        assert_eq!(
            previous(Preset::Ytd, interval),
            Err(Error::DateOutOfRange(Date::MIN))
        );
    }

    #[test]
    fn month_presets_use_month_labels() {
        let current = resolve(Preset::Last2mo, date!(2025 - 03 - 31), None, None).unwrap();
        let previous = previous(Preset::Last2mo, current.interval).unwrap();

        assert_eq!(previous.label, ComparisonLabel::PriorMonths(2));
        assert_eq!(previous.label.key(), "vs_prior_months");
        assert_eq!(previous.label.count(), Some(2));
        assert_eq!(previous.label.to_string(), "vs prior 2 months");
    }

    #[test]
    fn label_serializes_as_key_and_count() {
        let json = serde_json::to_value(ComparisonLabel::PriorDays(7)).unwrap();
        assert_eq!(json, serde_json::json!({"key": "vs_prior_days", "count": 7}));

        let json = serde_json::to_value(ComparisonLabel::LastYear).unwrap();
        assert_eq!(json, serde_json::json!({"key": "vs_last_year"}));
    }
}
