//! Stage 2: sellable-area breakdown.
//!
//! All areas are in ping from here on.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use weilao_shared::types::sqm_to_ping;

use super::areas::AreaSchedule;
use super::input::Sanitized;

/// Share of basement floor area usable as parking.
const PARK_SHARE_OF_BASEMENT: Decimal = dec!(0.65);
/// Share of above-ground sellable area assigned to the ground floor when the
/// building has more than one floor.
const GROUND_FLOOR_SHARE: Decimal = dec!(0.65);
/// Fallback ping-per-space when the supplied parking size is not positive.
const DEFAULT_PARK_SIZE: Decimal = dec!(8);
/// Divisor floor keeping sub-epsilon space sizes from producing absurd
/// counts.
const MIN_PARK_SIZE: Decimal = dec!(0.01);

/// Sellable floor area broken into parking, ground floor, and upper floors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesBreakdown {
    /// Basement parking area in ping.
    pub park_area_ping: Decimal,
    /// Number of parking spaces (floored quotient of parking area and space
    /// size).
    pub total_parks: Decimal,
    /// Ground-floor sellable area in ping.
    pub first_floor_sale: Decimal,
    /// Upper-floor sellable area in ping.
    pub upper_floor_sale: Decimal,
    /// Total sellable area in ping.
    pub total_sale_ping: Decimal,
    /// Sellable floor area over site area, both in ping.
    pub land_efficiency: Decimal,
}

impl SalesBreakdown {
    /// Derives the sellable-area breakdown from the area schedule.
    #[must_use]
    pub(crate) fn compute(input: &Sanitized, areas: &AreaSchedule) -> Self {
        let basement_ping = sqm_to_ping(areas.basement_area);
        let park_area_ping = basement_ping * PARK_SHARE_OF_BASEMENT;

        let park_size = if input.park_size > Decimal::ZERO {
            input.park_size.max(MIN_PARK_SIZE)
        } else {
            DEFAULT_PARK_SIZE
        };
        // checked_div is belt-and-braces; the quotient falls back to zero
        // rather than overflowing.
        let total_parks = park_area_ping
            .checked_div(park_size)
            .map_or(Decimal::ZERO, |spaces| spaces.floor());

        let above_ground_ping = (areas.total_ping - basement_ping).max(Decimal::ZERO);

        let (first_floor_sale, upper_floor_sale) = if input.floors > 1 {
            let first = above_ground_ping * GROUND_FLOOR_SHARE;
            (first, (above_ground_ping - first).max(Decimal::ZERO))
        } else {
            (above_ground_ping, Decimal::ZERO)
        };
        let total_sale_ping = first_floor_sale + upper_floor_sale;

        let site_ping = sqm_to_ping(input.area);
        let land_efficiency = if site_ping > Decimal::ZERO {
            total_sale_ping / site_ping
        } else {
            Decimal::ZERO
        };

        Self {
            park_area_ping,
            total_parks,
            first_floor_sale,
            upper_floor_sale,
            total_sale_ping,
            land_efficiency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appraisal::input::AppraisalInput;

    fn demo_stages() -> (Sanitized, AreaSchedule) {
        let sanitized = Sanitized::from(&AppraisalInput::demo());
        let areas = AreaSchedule::compute(&sanitized);
        (sanitized, areas)
    }

    #[test]
    fn test_ground_floor_gets_65_percent_when_multi_floor() {
        let (sanitized, areas) = demo_stages();
        let sales = SalesBreakdown::compute(&sanitized, &areas);

        assert_eq!(sales.first_floor_sale, dec!(407.01375));
        assert_eq!(sales.upper_floor_sale, dec!(219.16125));
        assert_eq!(sales.total_sale_ping, dec!(626.175));
    }

    #[test]
    fn test_single_floor_sells_everything_at_ground_level() {
        let (mut sanitized, areas) = demo_stages();
        sanitized.floors = 1;
        let sales = SalesBreakdown::compute(&sanitized, &areas);

        assert_eq!(sales.first_floor_sale, dec!(626.175));
        assert_eq!(sales.upper_floor_sale, Decimal::ZERO);
    }

    #[test]
    fn test_zero_site_area_has_zero_land_efficiency() {
        let sanitized = Sanitized::from(&AppraisalInput::default());
        let areas = AreaSchedule::compute(&sanitized);
        let sales = SalesBreakdown::compute(&sanitized, &areas);

        assert_eq!(sales.land_efficiency, Decimal::ZERO);
    }
}
