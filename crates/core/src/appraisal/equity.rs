//! Stage 5: owner equity and exchange outcome.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::input::Sanitized;
use super::sales::SalesBreakdown;

/// Smallest divisor accepted for the owner's pre-existing area.
const OLD_PING_FLOOR: Decimal = dec!(0.000001);

/// The owner's post-redevelopment return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityOutcome {
    /// Parking spaces surplus to the owner allocation, available for sale.
    pub sell_parks: Decimal,
    /// Upper-floor ping the owners agreed to sell.
    pub sell_upper_ping: Decimal,
    /// Cash returned from selling surplus parking and upper-floor ping.
    pub cash_back: Decimal,
    /// Upper-floor ping retained by the owners.
    pub remain_upper: Decimal,
    /// Owner's net indoor return area after the common-area deduction.
    pub return_indoor: Decimal,
    /// Indoor return over the owner's pre-existing area; 1.0 or above means
    /// a full one-for-one exchange.
    pub ping_exchange: Decimal,
    /// Indoor return over total sellable area; zero when nothing is sellable.
    pub return_ratio: Decimal,
}

impl EquityOutcome {
    /// Derives the equity outcome from the sales breakdown.
    #[must_use]
    pub(crate) fn compute(input: &Sanitized, sales: &SalesBreakdown) -> Self {
        let sell_parks =
            (sales.total_parks - Decimal::from(input.new_units)).max(Decimal::ZERO);
        let sell_upper_ping = sales.upper_floor_sale * input.sell_percent;
        let cash_back = sell_parks * input.park_price + sell_upper_ping * input.price_2f;

        let remain_upper = (sales.upper_floor_sale - sell_upper_ping).max(Decimal::ZERO);
        let return_indoor = (sales.first_floor_sale + remain_upper) * (Decimal::ONE - input.common);

        let old_ping = input.old_ping.max(OLD_PING_FLOOR);
        let ping_exchange = return_indoor / old_ping;

        let return_ratio = if sales.total_sale_ping > Decimal::ZERO {
            return_indoor / sales.total_sale_ping
        } else {
            Decimal::ZERO
        };

        Self {
            sell_parks,
            sell_upper_ping,
            cash_back,
            remain_upper,
            return_indoor,
            ping_exchange,
            return_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appraisal::areas::AreaSchedule;
    use crate::appraisal::input::AppraisalInput;

    fn equity_for(input: &AppraisalInput) -> EquityOutcome {
        let sanitized = Sanitized::from(input);
        let areas = AreaSchedule::compute(&sanitized);
        let sales = SalesBreakdown::compute(&sanitized, &areas);
        EquityOutcome::compute(&sanitized, &sales)
    }

    #[test]
    fn test_sell_parks_zero_when_units_consume_all_parking() {
        // Demo scenario yields 22 parking spaces.
        let input = AppraisalInput {
            new_units: 22,
            ..AppraisalInput::demo()
        };
        assert_eq!(equity_for(&input).sell_parks, Decimal::ZERO);
    }

    #[test]
    fn test_sell_parks_clamped_when_units_exceed_parking() {
        let input = AppraisalInput {
            new_units: 30,
            ..AppraisalInput::demo()
        };
        // Never negative, even with more units than spaces.
        assert_eq!(equity_for(&input).sell_parks, Decimal::ZERO);
    }

    #[test]
    fn test_zero_old_ping_floored_to_epsilon() {
        let input = AppraisalInput {
            old_ping: Decimal::ZERO,
            ..AppraisalInput::demo()
        };
        let equity = equity_for(&input);
        assert_eq!(equity.ping_exchange, equity.return_indoor / OLD_PING_FLOOR);
    }
}
