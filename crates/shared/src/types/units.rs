//! Area and percentage unit helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for area or money calculations.
//! Everything here is `rust_decimal::Decimal` for exact arithmetic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Ping per square meter (1 m² = 0.3025 ping; 1 ping ≈ 3.3058 m²).
///
/// This is the single source of the m²-to-ping conversion used by the
/// appraisal engine. The constant converts m² to ping, not the inverse.
pub const PING_PER_SQM: Decimal = dec!(0.3025);

/// Converts an area in square meters to ping.
#[must_use]
pub fn sqm_to_ping(sqm: Decimal) -> Decimal {
    sqm * PING_PER_SQM
}

/// Converts a raw percentage figure (e.g. `45` meaning 45%) to a ratio.
#[must_use]
pub fn percent_to_ratio(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(dec!(1), dec!(0.3025))]
    #[case(dec!(500), dec!(151.25))]
    #[case(dec!(2970), dec!(898.425))]
    #[case(dec!(0), dec!(0))]
    fn test_sqm_to_ping(#[case] sqm: Decimal, #[case] expected: Decimal) {
        assert_eq!(sqm_to_ping(sqm), expected);
    }

    #[rstest]
    #[case(dec!(45), dec!(0.45))]
    #[case(dec!(225), dec!(2.25))]
    #[case(dec!(0), dec!(0))]
    #[case(dec!(-10), dec!(-0.1))]
    fn test_percent_to_ratio(#[case] percent: Decimal, #[case] expected: Decimal) {
        assert_eq!(percent_to_ratio(percent), expected);
    }
}
