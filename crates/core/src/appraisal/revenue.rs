//! Stage 4: sales revenue.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::costs::CostSchedule;
use super::input::Sanitized;
use super::sales::SalesBreakdown;

/// Projected revenue per sale category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSchedule {
    /// Revenue from parking-space sales.
    pub park_revenue: Decimal,
    /// Revenue from ground-floor sales.
    pub first_revenue: Decimal,
    /// Revenue from upper-floor sales.
    pub upper_revenue: Decimal,
    /// Total projected revenue.
    pub total_revenue: Decimal,
    /// Total cost as a percentage of total revenue; zero when there is no
    /// revenue. The headline financial-feasibility indicator.
    pub common_burden_pct: Decimal,
}

impl RevenueSchedule {
    /// Derives revenue from the sales breakdown and cost schedule.
    #[must_use]
    pub(crate) fn compute(
        input: &Sanitized,
        sales: &SalesBreakdown,
        costs: &CostSchedule,
    ) -> Self {
        let park_revenue = sales.total_parks * input.park_price;
        let first_revenue = sales.first_floor_sale * input.price_1f;
        let upper_revenue = sales.upper_floor_sale * input.price_2f;
        let total_revenue = park_revenue + first_revenue + upper_revenue;

        let common_burden_pct = if total_revenue > Decimal::ZERO {
            costs
                .total_cost
                .checked_div(total_revenue)
                .and_then(|q| q.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        Self {
            park_revenue,
            first_revenue,
            upper_revenue,
            total_revenue,
            common_burden_pct,
        }
    }
}
