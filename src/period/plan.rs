//! Everything a dashboard needs to know about the selected date range.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    period::{Granularity, Preset, PreviousPeriod, ResolvedPeriod, previous, resolve},
    series::{AggregateOptions, Aggregation, SeriesPoint, aggregate},
};

/// The user's date range selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSelection {
    /// The date range preset.
    pub preset: Preset,
    /// The start of a custom range.
    pub custom_from: Option<Date>,
    /// The end of a custom range.
    pub custom_to: Option<Date>,
}

impl PeriodSelection {
    /// A selection of one of the named presets.
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            custom_from: None,
            custom_to: None,
        }
    }

    /// A custom range from `from` to `to`, both inclusive.
    pub fn custom(from: Date, to: Date) -> Self {
        Self {
            preset: Preset::Custom,
            custom_from: Some(from),
            custom_to: Some(to),
        }
    }
}

impl Default for PeriodSelection {
    fn default() -> Self {
        Self::preset(Preset::default_preset())
    }
}

/// The resolved period, its chart granularity and its comparison period.
///
/// Charts and KPI cards take one plan instead of each resolving the selection
/// on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeriodPlan {
    /// The date the plan was resolved against.
    pub now: Date,
    /// The current period.
    pub period: ResolvedPeriod,
    /// The bucket size for charts of the current period.
    pub granularity: Granularity,
    /// The period the current one is compared against.
    pub previous: PreviousPeriod,
}

impl PeriodPlan {
    /// Resolves `selection` relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [resolve] and [previous], e.g.
    /// [Error::MissingCustomBounds].
    pub fn new(selection: &PeriodSelection, now: Date) -> Result<Self, Error> {
        let period = resolve(
            selection.preset,
            now,
            selection.custom_from,
            selection.custom_to,
        )?;
        let granularity = Granularity::select(period.preset, period.day_count);
        let previous = previous(period.preset, period.interval)?;

        Ok(Self {
            now,
            period,
            granularity,
            previous,
        })
    }

    /// Buckets a raw series for the current period at the plan's granularity.
    pub fn aggregate<F>(
        &self,
        points: Vec<SeriesPoint>,
        options: &AggregateOptions,
        labeler: F,
    ) -> Aggregation
    where
        F: Fn(Date, Granularity) -> String,
    {
        aggregate(points, self.granularity, self.now, options, labeler)
    }
}
