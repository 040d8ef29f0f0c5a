//! Chooses how finely a period's chart data is bucketed.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, period::Preset};

/// The longest period, in days, that is still charted day by day.
pub const DAILY_MAX_DAYS: u32 = 31;

/// The longest period, in days, that is still charted week by week.
pub const WEEKLY_MAX_DAYS: u32 = 89;

/// The size of the time buckets on a chart's x-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One point per hour, labelled `HH:MM`.
    Hourly,
    /// One point per day, labelled `DD/MM`.
    Daily,
    /// Daily points averaged into Monday-based weeks.
    Weekly,
    /// Daily points averaged into calendar months.
    Monthly,
}

/// The format of the date labels in a series supplied by a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFormat {
    /// A time of day such as `14:00`.
    TimeOfDay,
    /// A day and month such as `09/03`.
    DayMonth,
}

impl Granularity {
    /// Every granularity, finest first.
    pub const ALL: [Granularity; 4] = [Self::Hourly, Self::Daily, Self::Weekly, Self::Monthly];

    /// Picks the granularity for a period.
    ///
    /// Single day presets are shown hour by hour. Otherwise periods of up to
    /// [DAILY_MAX_DAYS] days are daily, up to [WEEKLY_MAX_DAYS] days weekly,
    /// and anything longer monthly.
    pub fn select(preset: Preset, day_count: u32) -> Self {
        if preset.is_single_day() {
            Self::Hourly
        } else if day_count <= DAILY_MAX_DAYS {
            Self::Daily
        } else if day_count <= WEEKLY_MAX_DAYS {
            Self::Weekly
        } else {
            Self::Monthly
        }
    }

    /// The token for this granularity in query strings and JSON.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// The label format of the raw series a data source supplies.
    pub fn label_format(self) -> LabelFormat {
        match self {
            Self::Hourly => LabelFormat::TimeOfDay,
            Self::Daily | Self::Weekly | Self::Monthly => LabelFormat::DayMonth,
        }
    }

    /// Whether raw points are regrouped into larger buckets.
    ///
    /// Hourly and daily series are charted as they are.
    pub fn regroups(self) -> bool {
        matches!(self, Self::Weekly | Self::Monthly)
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();

        Self::ALL
            .into_iter()
            .find(|granularity| granularity.as_query_value().eq_ignore_ascii_case(token))
            .ok_or_else(|| Error::InvalidGranularity(s.to_owned()))
    }
}

impl Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query_value())
    }
}
