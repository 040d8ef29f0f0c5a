//! Ratio KPIs derived from a period's sums.
//!
//! Both ratios read as zero when there was no activity in the period instead
//! of failing on a division by zero.

use serde::{Deserialize, Serialize};

use crate::delta::{DeltaResult, delta};

/// The average revenue per sale.
///
/// Returns zero when there were no sales.
pub fn average_order_value(revenue_sum: f64, sales_count: f64) -> f64 {
    if sales_count > 0.0 {
        revenue_sum / sales_count
    } else {
        0.0
    }
}

/// The net margin as a percentage of revenue.
///
/// Returns zero when there was no revenue.
pub fn margin_percent(net_margin_sum: f64, revenue_sum: f64) -> f64 {
    if revenue_sum > 0.0 {
        net_margin_sum / revenue_sum * 100.0
    } else {
        0.0
    }
}

/// The sums a data source reports for one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSums {
    /// Total revenue.
    pub revenue: f64,
    /// Number of sales.
    pub sales_count: f64,
    /// Total net margin after fees and costs.
    pub net_margin: f64,
}

/// The KPIs shown on the dashboard cards for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    /// Total revenue.
    pub revenue: f64,
    /// Number of sales.
    pub sales_count: f64,
    /// Total net margin.
    pub net_margin: f64,
    /// Average revenue per sale.
    pub average_order_value: f64,
    /// Net margin as a percentage of revenue.
    pub margin_percent: f64,
}

impl Kpis {
    /// Derives the ratio KPIs from `sums`.
    pub fn from_sums(sums: KpiSums) -> Self {
        Self {
            revenue: sums.revenue,
            sales_count: sums.sales_count,
            net_margin: sums.net_margin,
            average_order_value: average_order_value(sums.revenue, sums.sales_count),
            margin_percent: margin_percent(sums.net_margin, sums.revenue),
        }
    }
}

/// The change in each KPI from the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiDeltas {
    /// Change in revenue.
    pub revenue: DeltaResult,
    /// Change in the number of sales.
    pub sales_count: DeltaResult,
    /// Change in net margin.
    pub net_margin: DeltaResult,
    /// Change in average order value.
    pub average_order_value: DeltaResult,
    /// Change in margin percentage.
    ///
    /// This is the relative change of the percentage, not the difference in
    /// percentage points.
    pub margin_percent: DeltaResult,
}

/// KPIs for the current and previous period side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiComparison {
    /// KPIs of the current period.
    pub current: Kpis,
    /// KPIs of the previous period.
    pub previous: Kpis,
    /// The change in each KPI.
    pub deltas: KpiDeltas,
}

impl KpiComparison {
    /// Compares the sums of the current period with the previous period's.
    pub fn new(current: KpiSums, previous: KpiSums) -> Self {
        let current = Kpis::from_sums(current);
        let previous = Kpis::from_sums(previous);

        let deltas = KpiDeltas {
            revenue: delta(current.revenue, previous.revenue),
            sales_count: delta(current.sales_count, previous.sales_count),
            net_margin: delta(current.net_margin, previous.net_margin),
            average_order_value: delta(
                current.average_order_value,
                previous.average_order_value,
            ),
            margin_percent: delta(current.margin_percent, previous.margin_percent),
        };

        Self {
            current,
            previous,
            deltas,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::delta::DeltaResult;

    use super::{KpiComparison, KpiSums, Kpis, average_order_value, margin_percent};

    #[test]
    fn ratios_guard_division_by_zero() {
        assert_eq!(margin_percent(50.0, 0.0), 0.0);
        assert_eq!(average_order_value(500.0, 0.0), 0.0);
    }

    #[test]
    fn ratios() {
        assert_eq!(average_order_value(500.0, 4.0), 125.0);
        assert_eq!(margin_percent(25.0, 200.0), 12.5);
    }

    #[test]
    fn negative_revenue_has_zero_margin() {
        assert_eq!(margin_percent(-10.0, -100.0), 0.0);
    }

    #[test]
    fn kpis_from_sums() {
        let kpis = Kpis::from_sums(KpiSums {
            revenue: 1000.0,
            sales_count: 8.0,
            net_margin: 250.0,
        });

        assert_eq!(kpis.average_order_value, 125.0);
        assert_eq!(kpis.margin_percent, 25.0);
    }

    #[test]
    fn comparison_computes_a_delta_per_kpi() {
        let comparison = KpiComparison::new(
            KpiSums {
                revenue: 1200.0,
                sales_count: 10.0,
                net_margin: 240.0,
            },
            KpiSums {
                revenue: 1000.0,
                sales_count: 10.0,
                net_margin: 200.0,
            },
        );

        assert_eq!(comparison.deltas.revenue.value(), Some(20.0));
        assert_eq!(comparison.deltas.average_order_value.value(), Some(20.0));
        assert!(comparison.deltas.sales_count.is_neutral());
        assert!(comparison.deltas.margin_percent.is_neutral());
    }

    #[test]
    fn comparison_with_empty_previous_period() {
        let comparison = KpiComparison::new(
            KpiSums {
                revenue: 300.0,
                sales_count: 3.0,
                net_margin: 30.0,
            },
            KpiSums::default(),
        );

        assert_eq!(comparison.previous.average_order_value, 0.0);
        assert_eq!(comparison.deltas.revenue, DeltaResult::PositiveInfinite);
        assert_eq!(comparison.deltas.margin_percent, DeltaResult::PositiveInfinite);
    }
}
