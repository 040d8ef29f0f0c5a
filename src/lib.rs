//! Time-range analytics for a marketplace seller dashboard.
//!
//! Every chart and KPI card on the dashboard shows data for the date range
//! the seller picked. This library turns that selection into concrete dates,
//! picks the chart granularity, finds the period to compare against, buckets
//! daily series into weeks or months, and computes the KPI ratios and the
//! percentage changes shown next to them.
//!
//! Nothing here reads the system clock: the current date is always passed in
//! as `now`, so the same inputs always give the same outputs.
//!
//! ```
//! use dashboard_analytics::{Granularity, PeriodPlan, PeriodSelection, Preset};
//! use time::macros::date;
//!
//! let plan = PeriodPlan::new(&PeriodSelection::preset(Preset::Last30d), date!(2025 - 03 - 31))?;
//!
//! assert_eq!(plan.period.interval.from(), date!(2025 - 03 - 02));
//! assert_eq!(plan.granularity, Granularity::Daily);
//! assert_eq!(plan.previous.interval.to(), date!(2025 - 03 - 01));
//! # Ok::<(), dashboard_analytics::Error>(())
//! ```

#![warn(missing_docs)]

mod calendar;
mod delta;
mod error;
mod format;
mod kpi;
mod period;
mod series;
mod timezone;

pub use delta::{DeltaResult, NEUTRAL_THRESHOLD_PERCENT, Trend, delta};
pub use error::Error;
pub use format::{format_currency, format_delta, format_percent};
pub use kpi::{KpiComparison, KpiDeltas, KpiSums, Kpis, average_order_value, margin_percent};
pub use period::{
    ComparisonLabel, DAILY_MAX_DAYS, DateInterval, Granularity, LabelFormat, PeriodPlan,
    PeriodSelection, Preset, PreviousPeriod, ResolvedPeriod, WEEKLY_MAX_DAYS, previous, resolve,
};
pub use series::{
    AggregateOptions, Aggregation, DATE_COLUMN, Reduction, SeriesPoint, aggregate,
    default_bucket_label, expected_point_count, parse_series_csv, parse_series_json,
    series_labels,
};
pub use timezone::{get_local_offset, local_date};
