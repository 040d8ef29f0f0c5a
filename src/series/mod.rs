//! Chart series and their bucketing.
//!
//! A data source supplies one [SeriesPoint] per hour (hourly series) or per
//! day (all other series) of a period. Day labels are `DD/MM` without a
//! year, so they are read relative to the `now` the period was resolved
//! against: a label that would fall after `now` belongs to the previous
//! year. Weekly and monthly charts regroup these points with [aggregate].

mod bucket;
mod input;
mod point;

pub use bucket::{AggregateOptions, Aggregation, Reduction, aggregate, default_bucket_label};
pub use input::{
    DATE_COLUMN, expected_point_count, parse_series_csv, parse_series_json, series_labels,
};
pub use point::SeriesPoint;
