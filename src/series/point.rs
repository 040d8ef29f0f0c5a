//! Raw chart points and their date labels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// One chart point: a date label and the metric values for that date.
///
/// Data sources label hourly series with a time of day (`14:00`) and every
/// other series with a day and month (`09/03`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// The time of day or day/month the point belongs to.
    pub date_label: String,
    /// The metric values keyed by metric name.
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
}

impl SeriesPoint {
    /// Create a point from a label and `(name, value)` pairs.
    pub fn new<L, I, K>(date_label: L, metrics: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            date_label: date_label.into(),
            metrics: metrics
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// The value of the metric `name`, if the point has one.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

/// Why a point could not be placed in a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LabelError {
    /// The label is a time of day, which belongs in an hourly series.
    TimeOfDay,
    /// The label is not a valid `DD/MM` day and month.
    Unparsable,
}

/// Parses a `DD/MM` label into a date no later than `now`.
///
/// The label has no year, so it is read as `now`'s year first. If that date
/// is after `now`, or does not exist in that year (29/02), it is read as the
/// previous year instead. This places the labels of a range that crosses New
/// Year on the correct side of it.
pub(crate) fn parse_day_month(label: &str, now: Date) -> Result<Date, LabelError> {
    let label = label.trim();

    if label.contains(':') {
        return Err(LabelError::TimeOfDay);
    }

    let (day, month) = label.split_once('/').ok_or(LabelError::Unparsable)?;
    let day: u8 = day.trim().parse().map_err(|_| LabelError::Unparsable)?;
    let month: u8 = month.trim().parse().map_err(|_| LabelError::Unparsable)?;
    let month = Month::try_from(month).map_err(|_| LabelError::Unparsable)?;

    match Date::from_calendar_date(now.year(), month, day) {
        Ok(date) if date <= now => Ok(date),
        _ => Date::from_calendar_date(now.year() - 1, month, day)
            .map_err(|_| LabelError::Unparsable),
    }
}

/// Formats `date` as a `DD/MM` label.
pub(crate) fn day_month_label(date: Date) -> String {
    format!("{:02}/{:02}", date.day(), u8::from(date.month()))
}
