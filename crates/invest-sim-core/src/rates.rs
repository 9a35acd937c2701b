use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::Rate;

/// Convert an annual rate to its monthly-compounded equivalent.
///
/// Solves `(1 + r_m)^12 = 1 + annual`, so `r_m = (1 + annual)^(1/12) - 1`.
/// Rates are decimal fractions (0.08 = 8%). No validation: callers must not
/// pass rates <= -1, for which the result is undefined.
pub fn annual_to_monthly_equivalent(annual: Rate) -> Rate {
    (Decimal::ONE + annual).powd(Decimal::ONE / dec!(12)) - Decimal::ONE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_percent_annual_pins_to_six_decimals() {
        let monthly = annual_to_monthly_equivalent(dec!(0.08));
        // (1.08)^(1/12) - 1 = 0.0064340301...
        assert!(
            (monthly - dec!(0.006434030)).abs() < dec!(0.0000005),
            "monthly={}",
            monthly
        );
    }

    #[test]
    fn test_zero_rate_maps_to_zero() {
        assert_eq!(annual_to_monthly_equivalent(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_round_trip_over_representative_range() {
        // (1 + monthly)^12 should recover 1 + annual
        let annuals = [
            dec!(-0.5),
            dec!(-0.25),
            dec!(-0.04),
            dec!(0.02),
            dec!(0.10),
            dec!(0.50),
            dec!(1.0),
            dec!(2.0),
        ];
        for annual in annuals {
            let monthly = annual_to_monthly_equivalent(annual);
            let recovered = (Decimal::ONE + monthly).powd(dec!(12)) - Decimal::ONE;
            assert!(
                (recovered - annual).abs() < dec!(0.000001),
                "annual={} recovered={}",
                annual,
                recovered
            );
        }
    }

    #[test]
    fn test_negative_rates_stay_negative() {
        let monthly = annual_to_monthly_equivalent(dec!(-0.12));
        assert!(monthly < Decimal::ZERO);
        assert!(monthly > dec!(-0.12));
    }
}
