//! The date range presets a user can pick on the dashboard.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A named date range such as "last 30 days".
///
/// The string form of each preset (see [Preset::as_query_value]) is the token
/// used in query strings and JSON, e.g. `last30d` or `ytd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// The current day.
    Today,
    /// The day before the current day.
    Yesterday,
    /// The last 7 days, including today.
    Last7d,
    /// The last 30 days, including today.
    Last30d,
    /// The last 60 days, including today.
    Last60d,
    /// The last 90 days, including today.
    Last90d,
    /// The last two months, counted as 60 days.
    Last2mo,
    /// The last three months, counted as 90 days.
    Last3mo,
    /// The last six months, counted as 180 days.
    Last6mo,
    /// The last twelve months, counted as 365 days.
    Last12mo,
    /// The last 365 days, including today.
    Last365d,
    /// January 1 of the current year up to and including today.
    Ytd,
    /// A range with user supplied start and end dates.
    Custom,
}

impl Preset {
    /// Every preset, in the order they are offered to the user.
    pub const ALL: [Preset; 13] = [
        Self::Today,
        Self::Yesterday,
        Self::Last7d,
        Self::Last30d,
        Self::Last60d,
        Self::Last90d,
        Self::Last2mo,
        Self::Last3mo,
        Self::Last6mo,
        Self::Last12mo,
        Self::Last365d,
        Self::Ytd,
        Self::Custom,
    ];

    /// The default preset for the dashboard.
    pub fn default_preset() -> Self {
        Self::Last30d
    }

    /// The token for this preset in query strings and JSON.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Last7d => "last7d",
            Self::Last30d => "last30d",
            Self::Last60d => "last60d",
            Self::Last90d => "last90d",
            Self::Last2mo => "last2mo",
            Self::Last3mo => "last3mo",
            Self::Last6mo => "last6mo",
            Self::Last12mo => "last12mo",
            Self::Last365d => "last365d",
            Self::Ytd => "ytd",
            Self::Custom => "custom",
        }
    }

    /// A short English label, used for logs and the command line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::Last7d => "Last 7 days",
            Self::Last30d => "Last 30 days",
            Self::Last60d => "Last 60 days",
            Self::Last90d => "Last 90 days",
            Self::Last2mo => "Last 2 months",
            Self::Last3mo => "Last 3 months",
            Self::Last6mo => "Last 6 months",
            Self::Last12mo => "Last 12 months",
            Self::Last365d => "Last 365 days",
            Self::Ytd => "Year to date",
            Self::Custom => "Custom range",
        }
    }

    /// The number of days the preset always covers.
    ///
    /// Returns `None` for [Preset::Ytd] and [Preset::Custom], whose length
    /// depends on the current date or the user's bounds.
    pub fn fixed_day_count(self) -> Option<u32> {
        match self {
            Self::Today | Self::Yesterday => Some(1),
            Self::Last7d => Some(7),
            Self::Last30d => Some(30),
            Self::Last60d | Self::Last2mo => Some(60),
            Self::Last90d | Self::Last3mo => Some(90),
            Self::Last6mo => Some(180),
            Self::Last12mo | Self::Last365d => Some(365),
            Self::Ytd | Self::Custom => None,
        }
    }

    /// Whether the preset covers a single day shown hour by hour.
    pub fn is_single_day(self) -> bool {
        matches!(self, Self::Today | Self::Yesterday)
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();

        Self::ALL
            .into_iter()
            .find(|preset| preset.as_query_value().eq_ignore_ascii_case(token))
            .ok_or_else(|| Error::InvalidPreset(s.to_owned()))
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query_value())
    }
}
