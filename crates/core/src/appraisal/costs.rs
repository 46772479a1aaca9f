//! Stage 3: construction cost schedule.
//!
//! Every rate in here is a domain heuristic carried over verbatim from the
//! established fee practice for reconstruction projects; none of them is
//! derived at runtime.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::areas::AreaSchedule;
use super::input::Sanitized;

/// Design fee, as a fraction of the legal construction cost.
const DESIGN_FEE_RATE: Decimal = dec!(0.09);
/// Construction fund levy, as a fraction of the legal construction cost.
const FUND_RATE: Decimal = dec!(0.004);
/// Building license fee, as a fraction of the legal construction cost.
const LICENSE_FEE_RATE: Decimal = dec!(0.001);
/// Plan review fee, as a fraction of the legal construction cost.
const REVIEW_FEE_RATE: Decimal = dec!(0.0001);
/// Bonus-application fee, as a fraction of the legal construction cost.
const BONUS_APP_FEE_RATE: Decimal = dec!(0.002);
/// Utility pipe connection fee per new unit.
const PIPE_FEE_PER_UNIT: Decimal = dec!(97500);
/// Cadastral registration fee per new unit.
const CADASTRAL_FEE_PER_UNIT: Decimal = dec!(20000);
/// Flat annualized construction-loan rate.
const LOAN_RATE: Decimal = dec!(0.0326);
/// Stamp tax, as a fraction of the rebuild cost.
const STAMP_TAX_RATE: Decimal = dec!(0.001);
/// Annual trust fee, as a fraction of the rebuild cost.
const TRUST_FEE_RATE: Decimal = dec!(0.004);
/// Each management overhead line (HR, sales, risk reserve), as a fraction of
/// the rebuild cost.
const MGMT_LINE_RATE: Decimal = dec!(0.05);

/// Nine-item detail breakdown of the smaller cost lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Construction fund levy.
    pub fund: Decimal,
    /// Building license fee.
    pub license_fee: Decimal,
    /// Plan review fee.
    pub review_fee: Decimal,
    /// Bonus-application fee.
    pub bonus_app_fee: Decimal,
    /// Utility pipe connection fees.
    pub pipe_fee: Decimal,
    /// Cadastral registration fees.
    pub cadastral_fee: Decimal,
    /// Sum of the five fixed rights-related fee inputs.
    pub rights_fees: Decimal,
    /// Stamp tax.
    pub stamp_tax: Decimal,
    /// Construction trust fee over the loan timeline.
    pub trust_fee: Decimal,
}

/// Construction cost schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSchedule {
    /// Reconstruction cost (total ping × build cost per ping).
    pub rebuild_cost: Decimal,
    /// Design fee.
    pub design_fee: Decimal,
    /// Construction loan interest over the full timeline.
    pub loan_interest: Decimal,
    /// Management overhead (HR + sales + risk reserve).
    pub full_mgmt_fee: Decimal,
    /// Construction and sales timeline in years.
    pub loan_years: Decimal,
    /// Total project cost.
    pub total_cost: Decimal,
    /// Residual bucket for charting: total cost minus rebuild, design,
    /// interest, and management. Everything in `breakdown` lands here.
    pub other_fees: Decimal,
    /// Detail breakdown of the smaller cost lines.
    pub breakdown: FeeBreakdown,
}

impl CostSchedule {
    /// Derives the cost schedule from the sanitized input and area schedule.
    #[must_use]
    pub(crate) fn compute(input: &Sanitized, areas: &AreaSchedule) -> Self {
        let legal_total_cost = areas.legal_far * input.legal_cost;
        let rebuild_cost = areas.total_ping * input.build_cost;

        let design_fee = legal_total_cost * DESIGN_FEE_RATE;
        let fund = legal_total_cost * FUND_RATE;
        let license_fee = legal_total_cost * LICENSE_FEE_RATE;
        let review_fee = legal_total_cost * REVIEW_FEE_RATE;
        let bonus_app_fee = legal_total_cost * BONUS_APP_FEE_RATE;

        let new_units = Decimal::from(input.new_units);
        let pipe_fee = new_units * PIPE_FEE_PER_UNIT;
        let cadastral_fee = new_units * CADASTRAL_FEE_PER_UNIT;

        // Timeline heuristic in months: 6 of lead-in, 2 per basement level,
        // 1 per floor, 0.5 per rooftop layer, 18 to sell out.
        let months = dec!(6)
            + dec!(2) * Decimal::from(input.basement)
            + Decimal::from(input.floors)
            + dec!(0.5) * Decimal::from(input.roof_layers)
            + dec!(18);
        let loan_years = months / dec!(12);

        let loan_interest = rebuild_cost * LOAN_RATE * loan_years;
        let stamp_tax = rebuild_cost * STAMP_TAX_RATE;
        let trust_fee = rebuild_cost * TRUST_FEE_RATE * loan_years;

        let hr_fee = rebuild_cost * MGMT_LINE_RATE;
        let sales_fee = rebuild_cost * MGMT_LINE_RATE;
        let risk_fee = rebuild_cost * MGMT_LINE_RATE;
        let full_mgmt_fee = hr_fee + sales_fee + risk_fee;

        let rights_fees = input.plan_fee
            + input.eval_fee
            + input.boundary_fee
            + input.drill_fee
            + input.neighbor_fee;

        let total_cost = rebuild_cost
            + design_fee
            + fund
            + license_fee
            + review_fee
            + bonus_app_fee
            + pipe_fee
            + cadastral_fee
            + rights_fees
            + loan_interest
            + stamp_tax
            + trust_fee
            + full_mgmt_fee;

        let other_fees = total_cost - rebuild_cost - design_fee - loan_interest - full_mgmt_fee;

        Self {
            rebuild_cost,
            design_fee,
            loan_interest,
            full_mgmt_fee,
            loan_years,
            total_cost,
            other_fees,
            breakdown: FeeBreakdown {
                fund,
                license_fee,
                review_fee,
                bonus_app_fee,
                pipe_fee,
                cadastral_fee,
                rights_fees,
                stamp_tax,
                trust_fee,
            },
        }
    }
}
