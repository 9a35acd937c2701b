use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::SimulatorError;
use crate::types::{round_money, with_metadata, ComputationOutput, Money};
use crate::SimResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a dividend-paying equity simulation.
///
/// Rates are annual percentages (5 = 5% p.a.).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableIncomeInputs {
    pub investment_amount: Money,
    pub annual_dividend_yield_pct: Decimal,
    pub annual_growth_pct: Decimal,
    pub time_in_years: u32,
    #[serde(default)]
    pub reinvest_dividends: bool,
}

/// One year of the projected position.
///
/// `investment_value` is the value at the start of the year, before that
/// year's growth and reinvestment. `accumulated_dividends` includes this
/// year's payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyPoint {
    pub year: u32,
    pub investment_value: Money,
    pub dividend_amount: Money,
    pub accumulated_dividends: Money,
}

/// Full variable-income projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendProjection {
    pub total_after_period: Money,
    pub total_dividends: Money,
    pub yearly_series: Vec<YearlyPoint>,
}

// ---------------------------------------------------------------------------
// Pure projection function
// ---------------------------------------------------------------------------

/// Project a dividend-paying position year by year.
///
/// Each year the dividend is computed on the start-of-year value, the point
/// is recorded, growth is applied, and — when reinvesting — the dividend is
/// added back after growth. Dividends already paid are never restated by
/// later growth. `total_after_period` reflects the final year's
/// growth/reinvestment step, so it runs one step ahead of the last recorded
/// `investment_value`.
///
/// No input defense: a zero horizon or non-positive investment produces
/// degenerate (empty or zero) output rather than an error.
pub fn project_dividends(input: &VariableIncomeInputs) -> DividendProjection {
    let yield_rate = input.annual_dividend_yield_pct / dec!(100);
    let growth_rate = input.annual_growth_pct / dec!(100);

    let mut current_value = input.investment_amount;
    let mut accumulated = Decimal::ZERO;
    let mut yearly_series = Vec::with_capacity(input.time_in_years as usize);

    for year in 1..=input.time_in_years {
        let dividend = current_value * yield_rate;
        accumulated += dividend;

        yearly_series.push(YearlyPoint {
            year,
            investment_value: round_money(current_value),
            dividend_amount: round_money(dividend),
            accumulated_dividends: round_money(accumulated),
        });

        current_value *= Decimal::ONE + growth_rate;
        if input.reinvest_dividends {
            current_value += dividend;
        }
    }

    DividendProjection {
        total_after_period: round_money(current_value),
        total_dividends: round_money(accumulated),
        yearly_series,
    }
}

// ---------------------------------------------------------------------------
// Core operation
// ---------------------------------------------------------------------------

/// Validated entry point wrapping [`project_dividends`].
pub fn project(
    input: &VariableIncomeInputs,
) -> SimResult<ComputationOutput<DividendProjection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.investment_amount <= Decimal::ZERO {
        return Err(SimulatorError::InvalidInput {
            field: "investment_amount".into(),
            reason: "investment_amount must be > 0".into(),
        });
    }
    if input.annual_dividend_yield_pct < Decimal::ZERO {
        return Err(SimulatorError::InvalidInput {
            field: "annual_dividend_yield_pct".into(),
            reason: "dividend yield must be >= 0".into(),
        });
    }
    if input.annual_growth_pct < Decimal::ZERO {
        return Err(SimulatorError::InvalidInput {
            field: "annual_growth_pct".into(),
            reason: "growth rate must be >= 0".into(),
        });
    }
    if input.time_in_years == 0 {
        return Err(SimulatorError::InvalidInput {
            field: "time_in_years".into(),
            reason: "horizon must be a positive number of years".into(),
        });
    }

    if input.annual_dividend_yield_pct > dec!(100) {
        warnings.push(format!(
            "Dividend yield of {}% p.a. is above 100%",
            input.annual_dividend_yield_pct
        ));
    }

    let output = project_dividends(input);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Dividend Projection (start-of-year yield, optional reinvestment after growth)",
        &serde_json::json!({
            "investment_amount": input.investment_amount.to_string(),
            "annual_dividend_yield_pct": input.annual_dividend_yield_pct.to_string(),
            "annual_growth_pct": input.annual_growth_pct.to_string(),
            "time_in_years": input.time_in_years,
            "reinvest_dividends": input.reinvest_dividends,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(years: u32, reinvest: bool) -> VariableIncomeInputs {
        VariableIncomeInputs {
            investment_amount: dec!(5000),
            annual_dividend_yield_pct: dec!(5),
            annual_growth_pct: dec!(8),
            time_in_years: years,
            reinvest_dividends: reinvest,
        }
    }

    // ---------------------------------------------------------------
    // 1. Golden one-year scenario, no reinvestment
    // ---------------------------------------------------------------
    #[test]
    fn test_single_year_without_reinvestment() {
        let result = project_dividends(&input(1, false));

        assert_eq!(result.yearly_series.len(), 1);
        let point = &result.yearly_series[0];
        assert_eq!(point.year, 1);
        assert_eq!(point.investment_value, dec!(5000.00));
        assert_eq!(point.dividend_amount, dec!(250.00));
        assert_eq!(point.accumulated_dividends, dec!(250.00));

        assert_eq!(result.total_after_period, dec!(5400.00));
        assert_eq!(result.total_dividends, dec!(250.00));
    }

    // ---------------------------------------------------------------
    // 2. Two years with reinvestment, step by step
    // ---------------------------------------------------------------
    #[test]
    fn test_two_years_with_reinvestment() {
        let result = project_dividends(&input(2, true));

        // Year 1: dividend on 5000, then 5000*1.08 + 250 = 5650
        // Year 2: dividend on 5650 = 282.50, then 5650*1.08 + 282.50
        let y2 = &result.yearly_series[1];
        assert_eq!(y2.investment_value, dec!(5650.00));
        assert_eq!(y2.dividend_amount, dec!(282.50));
        assert_eq!(y2.accumulated_dividends, dec!(532.50));

        assert_eq!(result.total_after_period, dec!(6384.50));
        assert_eq!(result.total_dividends, dec!(532.50));
    }

    // ---------------------------------------------------------------
    // 3. Two years without reinvestment
    // ---------------------------------------------------------------
    #[test]
    fn test_two_years_without_reinvestment() {
        let result = project_dividends(&input(2, false));
        assert_eq!(result.total_after_period, dec!(5832.00));
        assert_eq!(result.total_dividends, dec!(520.00));
    }

    // ---------------------------------------------------------------
    // 4. Reinvested trajectory dominates the non-reinvested one
    // ---------------------------------------------------------------
    #[test]
    fn test_reinvestment_dominates() {
        for years in [1u32, 2, 5, 20] {
            let with = project_dividends(&input(years, true));
            let without = project_dividends(&input(years, false));
            assert!(with.total_after_period >= without.total_after_period);
            if years > 1 {
                assert!(
                    with.total_after_period > without.total_after_period,
                    "strictly greater expected at {} years",
                    years
                );
            }
        }
    }

    // ---------------------------------------------------------------
    // 5. Last recorded value lags the final total by one step
    // ---------------------------------------------------------------
    #[test]
    fn test_last_point_is_pre_growth() {
        let result = project_dividends(&input(2, true));
        let last = result.yearly_series.last().unwrap();
        assert_eq!(last.investment_value, dec!(5650.00));
        assert!(result.total_after_period > last.investment_value);
    }

    // ---------------------------------------------------------------
    // 6. Zero yield pays nothing; growth still applies
    // ---------------------------------------------------------------
    #[test]
    fn test_zero_yield_still_grows() {
        let mut params = input(3, true);
        params.annual_dividend_yield_pct = Decimal::ZERO;
        let result = project_dividends(&params);
        assert_eq!(result.total_dividends, dec!(0.00));
        // 5000 * 1.08^3
        assert!((result.total_after_period - dec!(6298.56)).abs() < dec!(0.01));
    }

    // ---------------------------------------------------------------
    // 7. Series length matches the horizon
    // ---------------------------------------------------------------
    #[test]
    fn test_series_length() {
        let result = project_dividends(&input(7, false));
        assert_eq!(result.yearly_series.len(), 7);
        for (i, point) in result.yearly_series.iter().enumerate() {
            assert_eq!(point.year, i as u32 + 1);
        }
    }

    // ---------------------------------------------------------------
    // 8. Degenerate inputs produce degenerate output, not failure
    // ---------------------------------------------------------------
    #[test]
    fn test_zero_horizon_degenerates() {
        let result = project_dividends(&input(0, false));
        assert!(result.yearly_series.is_empty());
        assert_eq!(result.total_dividends, dec!(0.00));
        assert_eq!(result.total_after_period, dec!(5000.00));
    }

    // ---------------------------------------------------------------
    // 9. Idempotence
    // ---------------------------------------------------------------
    #[test]
    fn test_idempotent_over_repeated_invocation() {
        let params = input(10, true);
        assert_eq!(project_dividends(&params), project_dividends(&params));
    }

    // ---------------------------------------------------------------
    // 10. Envelope validation
    // ---------------------------------------------------------------
    #[test]
    fn test_rejects_non_positive_investment() {
        let mut params = input(5, false);
        params.investment_amount = Decimal::ZERO;
        assert!(project(&params).is_err());
    }

    #[test]
    fn test_rejects_zero_horizon() {
        assert!(project(&input(0, false)).is_err());
    }
}
