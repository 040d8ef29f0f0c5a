//! Reads series exported by a data source.

use crate::{
    Error,
    period::{DateInterval, Granularity, LabelFormat},
    series::{SeriesPoint, point::day_month_label},
};

/// The header of the date label column in a CSV export.
pub const DATE_COLUMN: &str = "date";

const HOURS_PER_DAY: usize = 24;

/// Parses a CSV series export.
///
/// Expects `text` to have a header row whose first column is `date` and whose
/// other columns are metric names, e.g.:
///
/// ```text
/// date,revenue,conversion
/// 01/03,120.5,2.1
/// 02/03,98,
/// ```
///
/// Empty cells are left out of the point rather than read as zero, so they do
/// not drag a bucket's average down.
///
/// # Errors
///
/// Returns [Error::InvalidSeries] if the header is missing, a row has more
/// cells than the header, a date cell is empty or a metric cell is not a
/// number.
pub fn parse_series_csv(text: &str) -> Result<Vec<SeriesPoint>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    match headers.get(0) {
        Some(first) if first.eq_ignore_ascii_case(DATE_COLUMN) => {}
        _ => {
            return Err(Error::InvalidSeries(format!(
                "the first column must be \"{DATE_COLUMN}\""
            )));
        }
    }

    let mut points = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // The header is line 1.
        let line = record
            .position()
            .map_or(index as u64 + 2, |position| position.line());

        if record.len() > headers.len() {
            return Err(Error::InvalidSeries(format!(
                "line {line}: {} cells but only {} columns in the header",
                record.len(),
                headers.len()
            )));
        }

        let date_label = match record.get(0) {
            Some(label) if !label.is_empty() => label,
            _ => {
                return Err(Error::InvalidSeries(format!(
                    "line {line}: the {DATE_COLUMN} cell is empty"
                )));
            }
        };

        let mut metrics = Vec::new();
        for (name, cell) in headers.iter().zip(record.iter()).skip(1) {
            if cell.is_empty() {
                continue;
            }

            let value: f64 = cell.parse().map_err(|_| {
                Error::InvalidSeries(format!(
                    "line {line}: \"{cell}\" is not a number for the metric \"{name}\""
                ))
            })?;
            metrics.push((name, value));
        }

        points.push(SeriesPoint::new(date_label, metrics));
    }

    tracing::debug!("Parsed {} series points from CSV", points.len());

    Ok(points)
}

/// Parses a JSON array of series points.
///
/// # Errors
///
/// Returns [Error::InvalidSeries] if `text` is not an array of objects with a
/// `dateLabel` string and a `metrics` object.
pub fn parse_series_json(text: &str) -> Result<Vec<SeriesPoint>, Error> {
    let points: Vec<SeriesPoint> = serde_json::from_str(text)?;

    tracing::debug!("Parsed {} series points from JSON", points.len());

    Ok(points)
}

/// The date labels a data source should supply for `interval`.
///
/// Hourly series have 24 `HH:MM` labels per day, all other series one
/// `DD/MM` label per day.
pub fn series_labels(interval: DateInterval, granularity: Granularity) -> Vec<String> {
    match granularity.label_format() {
        LabelFormat::TimeOfDay => interval
            .dates()
            .flat_map(|_| (0..HOURS_PER_DAY).map(|hour| format!("{hour:02}:00")))
            .collect(),
        LabelFormat::DayMonth => interval.dates().map(day_month_label).collect(),
    }
}

/// The number of points a data source should supply for `interval`.
pub fn expected_point_count(interval: DateInterval, granularity: Granularity) -> usize {
    let days = interval.day_count() as usize;

    match granularity.label_format() {
        LabelFormat::TimeOfDay => days * HOURS_PER_DAY,
        LabelFormat::DayMonth => days,
    }
}
