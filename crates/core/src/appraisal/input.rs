//! Appraisal input snapshot and engine-side sanitation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use weilao_shared::types::percent_to_ratio;

/// Largest magnitude accepted for a general decimal input field.
///
/// `Decimal` arithmetic panics on overflow instead of producing infinity, so
/// inputs are clamped into a range where no formula chain in the pipeline can
/// leave the representable domain.
const MAX_MAGNITUDE: Decimal = dec!(100000000);

/// Largest magnitude accepted for a percentage input field.
///
/// Two orders of magnitude above a full 100%: enough headroom for floor-area
/// ratios well beyond 100% while keeping later products in range.
const MAX_PERCENT: Decimal = dec!(10000);

/// Largest accepted count (floors, basement levels, rooftop layers, units).
const MAX_COUNT: u32 = 1_000;

/// One user-edited appraisal snapshot.
///
/// Every field is `#[serde(default)]`: a missing field deserializes to zero
/// (or empty text), never to an error. The engine applies its own sanitation
/// on top of this and does not assume any upstream validation ran.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppraisalInput {
    /// Lot number (free text, unused in computation).
    pub lot_number: String,
    /// Land section (free text, unused in computation).
    pub section: String,
    /// Zoning designation (free text, unused in computation).
    pub zoning: String,

    /// Site area in m².
    pub area: Decimal,
    /// Width of the fronting road in meters (unused in computation).
    pub road_width: Decimal,
    /// Building height limit in meters (unused in computation).
    pub height: Decimal,

    /// Building coverage ratio, percent.
    pub bc_ratio: Decimal,
    /// Floor area ratio, percent (may legitimately exceed 100).
    pub far: Decimal,
    /// Excavation ratio, percent of site area.
    pub excavate: Decimal,

    /// Above-ground floor count.
    pub floors: u32,
    /// Basement level count.
    pub basement: u32,
    /// Rooftop structure layer count.
    pub roof_layers: u32,

    /// Mechanical-area exemption ratio, percent of legal FAR.
    pub mech: Decimal,
    /// Stairwell/fire-evacuation exemption ratio, percent of legal FAR.
    pub stair: Decimal,
    /// Balcony exemption ratio, percent of legal FAR.
    pub balcony: Decimal,
    /// Rooftop structure ratio, percent of the coverage footprint.
    pub roof: Decimal,

    /// Common-area (public facility) ratio, percent of sellable area.
    pub common: Decimal,
    /// Ping per parking space; non-positive falls back to the default of 8.
    pub park_size: Decimal,
    /// Construction cost per ping.
    pub build_cost: Decimal,
    /// Legal construction cost per m².
    pub legal_cost: Decimal,

    /// Reconstruction plan fee, fixed amount.
    pub plan_fee: Decimal,
    /// Property evaluation fee, fixed amount.
    pub eval_fee: Decimal,
    /// Boundary survey fee, fixed amount.
    pub boundary_fee: Decimal,
    /// Geological drilling fee, fixed amount.
    pub drill_fee: Decimal,
    /// Neighbor coordination fee, fixed amount.
    pub neighbor_fee: Decimal,

    /// Sale price per parking space.
    pub park_price: Decimal,
    /// Sale price per ping, ground floor.
    pub price_1f: Decimal,
    /// Sale price per ping, upper floors.
    pub price_2f: Decimal,

    /// Owner's pre-existing indoor area in ping.
    pub old_ping: Decimal,
    /// Number of units after redevelopment.
    pub new_units: u32,
    /// Number of existing owners (unused in computation).
    pub owners: u32,
    /// Share of new upper-floor area the owners agree to sell, percent.
    pub sell_percent: Decimal,
}

impl AppraisalInput {
    /// The original input form's starting snapshot.
    #[must_use]
    pub fn baseline() -> Self {
        Self {
            road_width: dec!(8),
            common: dec!(33),
            park_size: dec!(8),
            build_cost: dec!(250000),
            park_price: dec!(2500000),
            price_1f: dec!(1000000),
            price_2f: dec!(800000),
            old_ping: dec!(30),
            new_units: 10,
            owners: 1,
            ..Self::default()
        }
    }

    /// Built-in demo scenario for quick evaluation.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            area: dec!(500),
            bc_ratio: dec!(45),
            far: dec!(225),
            excavate: dec!(60),
            floors: 12,
            basement: 3,
            roof_layers: 2,
            mech: dec!(10),
            stair: dec!(10),
            balcony: dec!(10),
            roof: dec!(10),
            common: dec!(34),
            build_cost: dec!(280000),
            legal_cost: dec!(18000),
            park_price: dec!(3000000),
            price_1f: dec!(1200000),
            price_2f: dec!(950000),
            old_ping: dec!(40),
            new_units: 12,
            sell_percent: dec!(40),
            ..Self::baseline()
        }
    }
}

/// Engine-side sanitized view of an [`AppraisalInput`].
///
/// Percentages are converted to ratios, counts are floored into their valid
/// ranges, and magnitudes are clamped into overflow-safe bounds. Negative
/// decimal inputs pass through: the formulas keep them finite, and sign
/// policy belongs to the input boundary. Fields unused by the pipeline
/// (identification text, road width, height, owner count) are not carried.
#[derive(Debug, Clone)]
pub(crate) struct Sanitized {
    /// Site area in m².
    pub area: Decimal,
    /// Building coverage ratio.
    pub bc_ratio: Decimal,
    /// Floor area ratio.
    pub far: Decimal,
    /// Excavation ratio.
    pub excavate: Decimal,
    /// Mechanical-area exemption ratio.
    pub mech: Decimal,
    /// Stairwell exemption ratio.
    pub stair: Decimal,
    /// Balcony exemption ratio.
    pub balcony: Decimal,
    /// Rooftop structure ratio.
    pub roof: Decimal,
    /// Common-area ratio.
    pub common: Decimal,
    /// Agreed sell share of upper-floor area.
    pub sell_percent: Decimal,
    /// Above-ground floor count, at least 1.
    pub floors: u32,
    /// Basement level count.
    pub basement: u32,
    /// Rooftop structure layer count.
    pub roof_layers: u32,
    /// Number of units after redevelopment.
    pub new_units: u32,
    /// Ping per parking space, as supplied.
    pub park_size: Decimal,
    /// Construction cost per ping.
    pub build_cost: Decimal,
    /// Legal construction cost per m².
    pub legal_cost: Decimal,
    /// Reconstruction plan fee.
    pub plan_fee: Decimal,
    /// Property evaluation fee.
    pub eval_fee: Decimal,
    /// Boundary survey fee.
    pub boundary_fee: Decimal,
    /// Geological drilling fee.
    pub drill_fee: Decimal,
    /// Neighbor coordination fee.
    pub neighbor_fee: Decimal,
    /// Sale price per parking space.
    pub park_price: Decimal,
    /// Sale price per ping, ground floor.
    pub price_1f: Decimal,
    /// Sale price per ping, upper floors.
    pub price_2f: Decimal,
    /// Owner's pre-existing indoor area in ping.
    pub old_ping: Decimal,
}

fn clamp_amount(value: Decimal) -> Decimal {
    value.clamp(-MAX_MAGNITUDE, MAX_MAGNITUDE)
}

fn clamp_ratio(percent: Decimal) -> Decimal {
    percent_to_ratio(percent.clamp(-MAX_PERCENT, MAX_PERCENT))
}

impl From<&AppraisalInput> for Sanitized {
    fn from(input: &AppraisalInput) -> Self {
        Self {
            area: clamp_amount(input.area),
            bc_ratio: clamp_ratio(input.bc_ratio),
            far: clamp_ratio(input.far),
            excavate: clamp_ratio(input.excavate),
            mech: clamp_ratio(input.mech),
            stair: clamp_ratio(input.stair),
            balcony: clamp_ratio(input.balcony),
            roof: clamp_ratio(input.roof),
            common: clamp_ratio(input.common),
            sell_percent: clamp_ratio(input.sell_percent),
            floors: input.floors.clamp(1, MAX_COUNT),
            basement: input.basement.min(MAX_COUNT),
            roof_layers: input.roof_layers.min(MAX_COUNT),
            new_units: input.new_units.min(MAX_COUNT),
            park_size: clamp_amount(input.park_size),
            build_cost: clamp_amount(input.build_cost),
            legal_cost: clamp_amount(input.legal_cost),
            plan_fee: clamp_amount(input.plan_fee),
            eval_fee: clamp_amount(input.eval_fee),
            boundary_fee: clamp_amount(input.boundary_fee),
            drill_fee: clamp_amount(input.drill_fee),
            neighbor_fee: clamp_amount(input.neighbor_fee),
            park_price: clamp_amount(input.park_price),
            price_1f: clamp_amount(input.price_1f),
            price_2f: clamp_amount(input.price_2f),
            old_ping: clamp_amount(input.old_ping),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_to_zero() {
        let input: AppraisalInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, AppraisalInput::default());
        assert_eq!(input.area, Decimal::ZERO);
        assert_eq!(input.floors, 0);
    }

    #[test]
    fn test_floors_floored_at_one() {
        let sanitized = Sanitized::from(&AppraisalInput::default());
        assert_eq!(sanitized.floors, 1);
    }

    #[test]
    fn test_counts_capped() {
        let input = AppraisalInput {
            floors: 5_000,
            basement: 5_000,
            ..AppraisalInput::default()
        };
        let sanitized = Sanitized::from(&input);
        assert_eq!(sanitized.floors, MAX_COUNT);
        assert_eq!(sanitized.basement, MAX_COUNT);
    }

    #[test]
    fn test_percentages_become_ratios() {
        let sanitized = Sanitized::from(&AppraisalInput::demo());
        assert_eq!(sanitized.bc_ratio, dec!(0.45));
        assert_eq!(sanitized.far, dec!(2.25));
        assert_eq!(sanitized.common, dec!(0.34));
    }

    #[test]
    fn test_magnitudes_clamped() {
        let input = AppraisalInput {
            build_cost: dec!(1000000000000),
            area: dec!(-1000000000000),
            far: dec!(99999999),
            ..AppraisalInput::default()
        };
        let sanitized = Sanitized::from(&input);
        assert_eq!(sanitized.build_cost, MAX_MAGNITUDE);
        assert_eq!(sanitized.area, -MAX_MAGNITUDE);
        assert_eq!(sanitized.far, dec!(100));
    }
}
