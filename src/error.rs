//! Defines the crate level error type.
use time::Date;

/// The errors that may occur while planning periods or reading series data.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The custom preset was selected without both a start and an end date.
    ///
    /// Callers must ask the user for the missing bound instead of falling back
    /// to some default range.
    #[error("a custom range needs both a start and an end date")]
    MissingCustomBounds,

    /// The end of a date range is before its start.
    #[error("the range start {from} is after the range end {to}")]
    InvertedRange {
        /// The requested start date.
        from: Date,
        /// The requested end date.
        to: Date,
    },

    /// A period around this date would start before the earliest date that can
    /// be represented.
    #[error("no period can be formed around {0}: it is too close to the earliest supported date")]
    DateOutOfRange(Date),

    /// The string does not name one of the date range presets.
    #[error("\"{0}\" is not a valid date range preset")]
    InvalidPreset(String),

    /// The string does not name one of the chart granularities.
    #[error("\"{0}\" is not a valid granularity")]
    InvalidGranularity(String),

    /// The series export could not be parsed.
    ///
    /// The string describes the row or field that caused the error.
    #[error("could not parse the series data: {0}")]
    InvalidSeries(String),

    /// The series file could not be read.
    #[error("could not read the series file: {0}")]
    ReadSeries(String),

    /// An error occurred while serializing a struct as JSON.
    #[error("could not serialize as JSON: {0}")]
    JsonSerialization(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        match value.position() {
            Some(position) => Error::InvalidSeries(format!("line {}: {value}", position.line())),
            None => Error::InvalidSeries(value.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        // serde_json already includes the line and column in its message.
        Error::InvalidSeries(value.to_string())
    }
}
