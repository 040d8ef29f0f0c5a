//! Date range selection for the dashboard.
//!
//! Resolves the preset a user picks into concrete dates, chooses the chart
//! granularity for the range and derives the period it is compared against.

mod granularity;
mod plan;
mod preset;
mod previous;
mod resolve;

pub use granularity::{DAILY_MAX_DAYS, Granularity, LabelFormat, WEEKLY_MAX_DAYS};
pub use plan::{PeriodPlan, PeriodSelection};
pub use preset::Preset;
pub use previous::{ComparisonLabel, PreviousPeriod, previous};
pub use resolve::{DateInterval, ResolvedPeriod, resolve};
