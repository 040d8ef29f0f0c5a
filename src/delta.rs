//! Percentage change between a current value and the previous period's.

use serde::Serialize;

/// Changes smaller than this many percentage points are shown as flat.
pub const NEUTRAL_THRESHOLD_PERCENT: f64 = 0.5;

/// The change from a previous value to a current one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DeltaResult {
    /// A signed percentage change.
    #[serde(rename_all = "camelCase")]
    Finite {
        /// The change in percent, e.g. `12.5` for 12.5% up.
        value: f64,
        /// Whether the change is too small to show as up or down.
        is_neutral: bool,
    },
    /// The previous value was zero and the current value is positive.
    ///
    /// Displayed as "new" rather than as a percentage.
    PositiveInfinite,
    /// The change has no meaningful percentage, e.g. the previous value was
    /// zero and the current value is negative, or an input was not a number.
    Undefined,
}

/// The direction indicator for a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Trend {
    /// A change of at least [NEUTRAL_THRESHOLD_PERCENT] upwards.
    Up,
    /// A change of at least [NEUTRAL_THRESHOLD_PERCENT] downwards.
    Down,
    /// A change smaller than [NEUTRAL_THRESHOLD_PERCENT].
    Flat,
    /// Activity where the previous period had none.
    New,
    /// No comparison is possible.
    NotComparable,
}

impl DeltaResult {
    /// The percentage change, if it is finite.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Finite { value, .. } => Some(value),
            Self::PositiveInfinite | Self::Undefined => None,
        }
    }

    /// Whether the change should be shown as flat.
    pub fn is_neutral(self) -> bool {
        matches!(self, Self::Finite { is_neutral: true, .. })
    }

    /// The indicator to show for the change.
    pub fn trend(self) -> Trend {
        match self {
            Self::Finite {
                is_neutral: true, ..
            } => Trend::Flat,
            Self::Finite { value, .. } if value > 0.0 => Trend::Up,
            Self::Finite { .. } => Trend::Down,
            Self::PositiveInfinite => Trend::New,
            Self::Undefined => Trend::NotComparable,
        }
    }
}

/// Computes the percentage change from `previous` to `current`.
///
/// A previous value of zero has no percentage change: no activity in both
/// periods is a flat 0%, new activity is [DeltaResult::PositiveInfinite] and
/// anything else is [DeltaResult::Undefined].
pub fn delta(current: f64, previous: f64) -> DeltaResult {
    if current.is_nan() || previous.is_nan() {
        return DeltaResult::Undefined;
    }

    if previous == 0.0 {
        return if current == 0.0 {
            DeltaResult::Finite {
                value: 0.0,
                is_neutral: true,
            }
        } else if current > 0.0 {
            DeltaResult::PositiveInfinite
        } else {
            DeltaResult::Undefined
        };
    }

    let value = (current - previous) / previous * 100.0;

    if !value.is_finite() {
        return DeltaResult::Undefined;
    }

    DeltaResult::Finite {
        value,
        is_neutral: value.abs() < NEUTRAL_THRESHOLD_PERCENT,
    }
}
