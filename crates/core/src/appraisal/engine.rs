//! Appraisal engine threading the five calculation stages.

use serde::{Deserialize, Serialize};

use super::areas::AreaSchedule;
use super::costs::CostSchedule;
use super::equity::EquityOutcome;
use super::input::{AppraisalInput, Sanitized};
use super::revenue::RevenueSchedule;
use super::sales::SalesBreakdown;

/// Engine for running feasibility appraisals.
///
/// Stateless and total: every input produces a result, never an error and
/// never a panic. All defensive coercion happens inside
/// [`AppraisalEngine::run`]; the engine does not assume the caller validated
/// anything.
#[derive(Debug, Clone, Copy)]
pub struct AppraisalEngine;

/// Result of one appraisal run, grouped in production order.
///
/// Later sections may depend on earlier ones, never the reverse. A result is
/// derived fresh from each input snapshot and has no identity of its own; any
/// change to the input means a full recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppraisalResult {
    /// Stage 1: floor-area schedule.
    pub areas: AreaSchedule,
    /// Stage 2: sellable-area breakdown.
    pub sales: SalesBreakdown,
    /// Stage 3: construction cost schedule.
    pub costs: CostSchedule,
    /// Stage 4: sales revenue.
    pub revenue: RevenueSchedule,
    /// Stage 5: owner equity and exchange outcome.
    pub equity: EquityOutcome,
}

impl AppraisalEngine {
    /// Creates a new appraisal engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Runs the five-stage pipeline over one input snapshot.
    #[must_use]
    pub fn run(&self, input: &AppraisalInput) -> AppraisalResult {
        let sanitized = Sanitized::from(input);

        let areas = AreaSchedule::compute(&sanitized);
        let sales = SalesBreakdown::compute(&sanitized, &areas);
        let costs = CostSchedule::compute(&sanitized, &areas);
        let revenue = RevenueSchedule::compute(&sanitized, &sales, &costs);
        let equity = EquityOutcome::compute(&sanitized, &sales);

        AppraisalResult {
            areas,
            sales,
            costs,
            revenue,
            equity,
        }
    }
}

impl Default for AppraisalEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_run_produces_all_five_sections() {
        let result = AppraisalEngine::new().run(&AppraisalInput::demo());

        assert_eq!(result.areas.max_build_area, dec!(225));
        assert!(result.sales.total_sale_ping > Decimal::ZERO);
        assert!(result.costs.total_cost > Decimal::ZERO);
        assert!(result.revenue.total_revenue > Decimal::ZERO);
        assert!(result.equity.ping_exchange > Decimal::ZERO);
    }

    #[test]
    fn test_empty_input_runs_to_zeroes() {
        let result = AppraisalEngine::new().run(&AppraisalInput::default());

        assert_eq!(result.areas.total_m2, Decimal::ZERO);
        assert_eq!(result.sales.total_sale_ping, Decimal::ZERO);
        assert_eq!(result.costs.total_cost, Decimal::ZERO);
        assert_eq!(result.revenue.total_revenue, Decimal::ZERO);
        assert_eq!(result.revenue.common_burden_pct, Decimal::ZERO);
        assert_eq!(result.equity.return_indoor, Decimal::ZERO);
        assert_eq!(result.equity.ping_exchange, Decimal::ZERO);
    }
}
