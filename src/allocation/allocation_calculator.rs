use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{DECIMAL_PRECISION, POINT_DOLLARS};

fn point_count(balance: Decimal) -> Decimal {
    (balance / Decimal::from(POINT_DOLLARS))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a net balance into whole allocation points: one point per hundred
/// dollars, midpoint rounded away from zero. Balances whose point count falls
/// outside the i64 range saturate at the range bounds.
pub fn earn_points(balance: Decimal) -> i64 {
    let points = point_count(balance);
    points.to_i64().unwrap_or_else(|| {
        if points.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

/// Earnings for one participant: points times the per-point earnings rate,
/// normalized to cents. Stays in decimal throughout, so the money path never
/// rides the saturating integer helper.
pub fn compute_earnings(balance: Decimal, earnings_percent: Decimal) -> Decimal {
    (point_count(balance) * earnings_percent)
        .round_dp_with_strategy(DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn points_round_half_away_from_zero() {
        assert_eq!(earn_points(dec!(9383)), 94); // 93.83 -> 94
        assert_eq!(earn_points(dec!(9350)), 94); // 93.50 -> 94, not banker's 93
        assert_eq!(earn_points(dec!(9349.99)), 93);
        assert_eq!(earn_points(dec!(49.99)), 0);
        assert_eq!(earn_points(dec!(50)), 1);
        assert_eq!(earn_points(Decimal::ZERO), 0);
    }

    #[test]
    fn earnings_are_points_times_rate() {
        assert_eq!(compute_earnings(dec!(9383), dec!(11)), dec!(1034));
        assert_eq!(compute_earnings(dec!(100), dec!(11)), dec!(11));
        assert_eq!(compute_earnings(dec!(49), dec!(11)), Decimal::ZERO);
    }

    #[test]
    fn extreme_balances_saturate_at_the_point_range() {
        assert_eq!(earn_points(Decimal::MAX), i64::MAX);
        assert_eq!(earn_points(Decimal::MIN), i64::MIN);
    }

    #[test]
    fn fractional_rates_round_to_cents() {
        // 94 points at 10.125 per point = 951.75
        assert_eq!(compute_earnings(dec!(9383), dec!(10.125)), dec!(951.75));
        // 3 points at 0.333 per point = 0.999 -> 1.00
        assert_eq!(compute_earnings(dec!(300), dec!(0.333)), dec!(1.00));
    }
}
