//! Regroups daily chart points into weekly or monthly buckets.
//!
//! Charts of longer periods would have too many points to read if they were
//! drawn day by day, so daily series are averaged into weeks or months
//! depending on the period's [Granularity].

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    calendar::{month_abbrev, month_start, week_start},
    period::Granularity,
    series::{
        SeriesPoint,
        point::{LabelError, day_month_label, parse_day_month},
    },
};

/// How the values of one metric are combined within a bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    /// The average of the bucket's values.
    ///
    /// Suits percentages and per-day rates.
    #[default]
    Mean,
    /// The total of the bucket's values.
    ///
    /// Suits counts such as units sold.
    Sum,
}

impl Reduction {
    fn apply(self, accumulator: &Accumulator) -> f64 {
        match self {
            Self::Mean => accumulator.sum / accumulator.count as f64,
            Self::Sum => accumulator.sum,
        }
    }
}

/// Selects the [Reduction] for each metric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOptions {
    /// The reduction for metrics without an override.
    #[serde(default)]
    pub default_reduction: Reduction,
    /// Per metric reductions, keyed by metric name.
    #[serde(default)]
    pub overrides: HashMap<String, Reduction>,
}

impl AggregateOptions {
    /// Options that use `reduction` for every metric.
    pub fn with_default(reduction: Reduction) -> Self {
        Self {
            default_reduction: reduction,
            overrides: HashMap::new(),
        }
    }

    /// Use `reduction` for the metric `name`.
    pub fn reduce(mut self, name: impl Into<String>, reduction: Reduction) -> Self {
        self.overrides.insert(name.into(), reduction);
        self
    }

    /// The reduction for the metric `name`.
    pub fn reduction_for(&self, name: &str) -> Reduction {
        self.overrides
            .get(name)
            .copied()
            .unwrap_or(self.default_reduction)
    }
}

/// The result of bucketing a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    /// The bucketed points in chronological order.
    pub points: Vec<SeriesPoint>,
    /// The number of input points dropped because their label could not be
    /// read as a day and month.
    pub skipped: usize,
}

#[derive(Debug, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

#[derive(Debug)]
struct Bucket {
    /// The week or month start the bucket is labelled with.
    start: Date,
    /// The earliest point date, used for ordering.
    first_date: Date,
    metrics: BTreeMap<String, Accumulator>,
}

/// Buckets `points` by week or month.
///
/// Hourly and daily series are returned unchanged. For weekly and monthly
/// series each point's `DD/MM` label is read relative to `now` (see the
/// module docs of [crate::series]) and the point is added to the bucket of
/// its Monday-based week or its calendar month. Each metric is reduced as
/// `options` says, averaging by default.
///
/// Buckets are returned in chronological order and labelled by calling
/// `labeler` with the bucket's start: the Monday of the week or the first day
/// of the month, even when the series has no point for that day. Points whose
/// label is a time of day or is not a valid day and month are skipped and
/// counted in [Aggregation::skipped].
pub fn aggregate<F>(
    points: Vec<SeriesPoint>,
    granularity: Granularity,
    now: Date,
    options: &AggregateOptions,
    labeler: F,
) -> Aggregation
where
    F: Fn(Date, Granularity) -> String,
{
    if !granularity.regroups() {
        return Aggregation { points, skipped: 0 };
    }

    let mut buckets: HashMap<Date, Bucket> = HashMap::new();
    let mut skipped = 0;

    for point in points {
        let date = match parse_day_month(&point.date_label, now) {
            Ok(date) => date,
            Err(error) => {
                skipped += 1;
                match error {
                    LabelError::TimeOfDay => tracing::debug!(
                        label = %point.date_label,
                        %granularity,
                        "Skipping time of day label in a series that is not hourly"
                    ),
                    LabelError::Unparsable => tracing::debug!(
                        label = %point.date_label,
                        "Skipping series point with an unreadable date label"
                    ),
                }
                continue;
            }
        };

        let key = bucket_key(date, granularity);
        let bucket = buckets.entry(key).or_insert_with(|| Bucket {
            start: key,
            first_date: date,
            metrics: BTreeMap::new(),
        });

        if date < bucket.first_date {
            bucket.first_date = date;
        }

        for (name, value) in point.metrics {
            let accumulator = bucket.metrics.entry(name).or_default();
            accumulator.sum += value;
            accumulator.count += 1;
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, %granularity, "Dropped series points with unreadable date labels");
    }

    let mut sorted: Vec<Bucket> = buckets.into_values().collect();
    sorted.sort_by_key(|bucket| bucket.first_date);

    let points = sorted
        .into_iter()
        .map(|bucket| {
            let metrics = bucket
                .metrics
                .iter()
                .map(|(name, accumulator)| {
                    let value = options.reduction_for(name).apply(accumulator);
                    (name.clone(), value)
                })
                .collect();

            SeriesPoint {
                date_label: labeler(bucket.start, granularity),
                metrics,
            }
        })
        .collect();

    Aggregation { points, skipped }
}

/// The date that identifies the bucket `date` falls in.
fn bucket_key(date: Date, granularity: Granularity) -> Date {
    match granularity {
        Granularity::Weekly => week_start(date),
        Granularity::Monthly => month_start(date),
        Granularity::Hourly | Granularity::Daily => date,
    }
}

/// Formats a bucket label in English.
///
/// Weekly buckets read like "12 Mar" and monthly buckets like "Mar 2025".
/// Hourly and daily labels never pass through here, but fall back to
/// `DD/MM`.
pub fn default_bucket_label(date: Date, granularity: Granularity) -> String {
    match granularity {
        Granularity::Weekly => format!("{} {}", date.day(), month_abbrev(date.month())),
        Granularity::Monthly => format!("{} {}", month_abbrev(date.month()), date.year()),
        Granularity::Hourly | Granularity::Daily => day_month_label(date),
    }
}
