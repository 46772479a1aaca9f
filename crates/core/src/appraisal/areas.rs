//! Stage 1: floor-area schedule.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use weilao_shared::types::sqm_to_ping;

use super::input::Sanitized;

/// Mechanical-area exemption cap, as a fraction of legal FAR.
const MECH_CAP: Decimal = dec!(0.10);
/// Stairwell/fire-evacuation exemption cap, as a fraction of legal FAR.
const STAIR_CAP: Decimal = dec!(0.15);
/// Balcony exemption cap, as a fraction of legal FAR.
const BALCONY_CAP: Decimal = dec!(0.10);
/// Rooftop structure cap, as a fraction of the coverage footprint per layer.
const ROOF_CAP_PER_LAYER: Decimal = dec!(0.10);
/// Bonus-incentive floor area as a flat share of legal FAR.
const BONUS_FAR_SHARE: Decimal = dec!(0.5);

/// Floor areas derived from site geometry and zoning controls.
///
/// All figures are m² except `total_ping`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaSchedule {
    /// Legal building-coverage footprint.
    pub max_build_area: Decimal,
    /// Legal gross floor area under floor-area-ratio rules.
    pub legal_far: Decimal,
    /// Bonus-incentive floor area, a flat 50% of legal FAR.
    pub bonus_far: Decimal,
    /// Mechanical floor area, capped at 10% of legal FAR.
    pub mech_area: Decimal,
    /// Stairwell and fire-evacuation area, capped at 15% of legal FAR.
    pub stair_area: Decimal,
    /// Balcony area, capped at 10% of legal FAR.
    pub balcony_area: Decimal,
    /// Rooftop structure area, capped at 10% of the footprint per layer.
    pub roof_area: Decimal,
    /// Excavated area.
    pub excavate_area: Decimal,
    /// Total basement floor area (excavation × basement levels).
    pub basement_area: Decimal,
    /// Total floor area in m².
    pub total_m2: Decimal,
    /// Total floor area in ping.
    pub total_ping: Decimal,
}

impl AreaSchedule {
    /// Derives the area schedule from the sanitized input.
    ///
    /// User-entered exemption ratios are clamped downward by the regulatory
    /// caps, never upward.
    #[must_use]
    pub(crate) fn compute(input: &Sanitized) -> Self {
        let max_build_area = input.area * input.bc_ratio;
        let legal_far = input.area * input.far;
        let bonus_far = legal_far * BONUS_FAR_SHARE;

        let mech_area = (legal_far * input.mech).min(legal_far * MECH_CAP);
        let stair_area = (legal_far * input.stair).min(legal_far * STAIR_CAP);
        let balcony_area = (legal_far * input.balcony).min(legal_far * BALCONY_CAP);

        let layers = Decimal::from(input.roof_layers);
        let roof_raw = max_build_area * input.roof * layers;
        let roof_area = roof_raw.min(max_build_area * ROOF_CAP_PER_LAYER * layers);

        let excavate_area = input.area * input.excavate;
        let basement_area = excavate_area * Decimal::from(input.basement);

        let total_m2 = legal_far
            + bonus_far
            + mech_area
            + stair_area
            + balcony_area
            + roof_area
            + basement_area;
        let total_ping = sqm_to_ping(total_m2);

        Self {
            max_build_area,
            legal_far,
            bonus_far,
            mech_area,
            stair_area,
            balcony_area,
            roof_area,
            excavate_area,
            basement_area,
            total_m2,
            total_ping,
        }
    }
}
