use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::SimulatorError;
use crate::types::{round_money, with_metadata, ComputationOutput, Money};
use crate::SimResult;

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a fixed-income simulation.
///
/// Rates are annual percentages (8 = 8% p.a.), matching the form fields they
/// arrive from. The horizon is a whole number of years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedIncomeInputs {
    pub initial_value: Money,
    pub monthly_contribution: Money,
    pub annual_interest_rate_pct: Decimal,
    #[serde(default)]
    pub annual_inflation_rate_pct: Decimal,
    pub time_in_years: u32,
}

/// One month of the projected trajectory.
///
/// `interest` and `contribution` are cumulative through this month;
/// `contribution` includes the initial value. Each field is rounded
/// independently at storage, so `interest == amount - contribution` only
/// holds to rounding tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: u32,
    pub amount: Money,
    pub interest: Money,
    pub contribution: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inflation_adjusted: Option<Money>,
}

/// Full fixed-income projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedIncomeProjection {
    pub final_amount: Money,
    pub total_contributions: Money,
    pub total_interest: Money,
    pub inflation_adjusted_final_amount: Money,
    pub monthly_series: Vec<MonthlyPoint>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Compute (1 + rate)^n via iterative multiplication (avoids powd drift).
fn compound(rate: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

fn monthly_rate(annual_pct: Decimal) -> Decimal {
    annual_pct / dec!(100) / dec!(12)
}

// ---------------------------------------------------------------------------
// Pure projection functions
// ---------------------------------------------------------------------------

/// Final balance of a recurring-contribution compound-interest investment.
///
/// Interest compounds before the contribution lands each month, so a
/// contribution never earns interest in the month it is made. The running
/// balance keeps full precision; only the result is rounded to cents.
pub fn final_amount(
    initial_value: Money,
    monthly_contribution: Money,
    annual_interest_rate_pct: Decimal,
    time_in_years: u32,
) -> Money {
    let rate = monthly_rate(annual_interest_rate_pct);
    let months = time_in_years * MONTHS_PER_YEAR;

    let mut balance = initial_value;
    for _ in 0..months {
        balance = balance * (Decimal::ONE + rate) + monthly_contribution;
    }

    round_money(balance)
}

/// Month-by-month trajectory of the same iteration.
///
/// When `annual_inflation_rate_pct` is nonzero, each point also carries the
/// balance deflated by `(1 + monthly_inflation)^month` — the
/// period-by-period purchasing-power view. This deliberately differs from
/// the whole-horizon deflation applied to the headline figure in
/// [`project`].
pub fn monthly_series(
    initial_value: Money,
    monthly_contribution: Money,
    annual_interest_rate_pct: Decimal,
    time_in_years: u32,
    annual_inflation_rate_pct: Decimal,
) -> Vec<MonthlyPoint> {
    let rate = monthly_rate(annual_interest_rate_pct);
    let inflation = monthly_rate(annual_inflation_rate_pct);
    let months = time_in_years * MONTHS_PER_YEAR;

    let mut balance = initial_value;
    let mut total_contribution = initial_value;
    let mut inflation_factor = Decimal::ONE;
    let mut series = Vec::with_capacity(months as usize);

    for month in 1..=months {
        let interest_earned = balance * rate;
        balance = balance + interest_earned + monthly_contribution;
        total_contribution += monthly_contribution;

        let inflation_adjusted = if annual_inflation_rate_pct.is_zero() {
            None
        } else {
            inflation_factor *= Decimal::ONE + inflation;
            Some(round_money(balance / inflation_factor))
        };

        series.push(MonthlyPoint {
            month,
            amount: round_money(balance),
            interest: round_money(balance - total_contribution),
            contribution: round_money(total_contribution),
            inflation_adjusted,
        });
    }

    series
}

// ---------------------------------------------------------------------------
// Core operation
// ---------------------------------------------------------------------------

/// Run a full fixed-income projection: final amount, monthly trajectory,
/// contribution/interest totals, and the inflation-adjusted headline value.
pub fn project(
    input: &FixedIncomeInputs,
) -> SimResult<ComputationOutput<FixedIncomeProjection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.initial_value < Decimal::ZERO {
        return Err(SimulatorError::InvalidInput {
            field: "initial_value".into(),
            reason: "initial_value must be >= 0".into(),
        });
    }
    if input.monthly_contribution < Decimal::ZERO {
        return Err(SimulatorError::InvalidInput {
            field: "monthly_contribution".into(),
            reason: "monthly_contribution must be >= 0".into(),
        });
    }
    if input.annual_interest_rate_pct < Decimal::ZERO {
        return Err(SimulatorError::InvalidInput {
            field: "annual_interest_rate_pct".into(),
            reason: "interest rate must be >= 0".into(),
        });
    }
    if input.annual_inflation_rate_pct < Decimal::ZERO {
        return Err(SimulatorError::InvalidInput {
            field: "annual_inflation_rate_pct".into(),
            reason: "inflation rate must be >= 0".into(),
        });
    }
    if input.time_in_years == 0 {
        return Err(SimulatorError::InvalidInput {
            field: "time_in_years".into(),
            reason: "horizon must be a positive number of years".into(),
        });
    }

    if input.annual_interest_rate_pct > dec!(100) {
        warnings.push(format!(
            "Interest rate of {}% p.a. is above 100%",
            input.annual_interest_rate_pct
        ));
    }

    let months = input.time_in_years * MONTHS_PER_YEAR;

    let final_value = final_amount(
        input.initial_value,
        input.monthly_contribution,
        input.annual_interest_rate_pct,
        input.time_in_years,
    );
    let series = monthly_series(
        input.initial_value,
        input.monthly_contribution,
        input.annual_interest_rate_pct,
        input.time_in_years,
        input.annual_inflation_rate_pct,
    );

    let total_contributions = round_money(
        input.initial_value + input.monthly_contribution * Decimal::from(months),
    );
    let total_interest = round_money(final_value - total_contributions);

    // Headline purchasing power: a single whole-horizon deflation at the
    // annual rate, distinct from the per-month deflation in the series.
    let annual_inflation = input.annual_inflation_rate_pct / dec!(100);
    let inflation_adjusted_final_amount =
        round_money(final_value / compound(annual_inflation, input.time_in_years));

    let output = FixedIncomeProjection {
        final_amount: final_value,
        total_contributions,
        total_interest,
        inflation_adjusted_final_amount,
        monthly_series: series,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Income Projection (monthly compounding with recurring contributions)",
        &serde_json::json!({
            "initial_value": input.initial_value.to_string(),
            "monthly_contribution": input.monthly_contribution.to_string(),
            "annual_interest_rate_pct": input.annual_interest_rate_pct.to_string(),
            "annual_inflation_rate_pct": input.annual_inflation_rate_pct.to_string(),
            "time_in_years": input.time_in_years,
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

    fn default_input() -> FixedIncomeInputs {
        FixedIncomeInputs {
            initial_value: dec!(1000),
            monthly_contribution: dec!(100),
            annual_interest_rate_pct: dec!(8),
            annual_inflation_rate_pct: dec!(4),
            time_in_years: 10,
        }
    }

    // ---------------------------------------------------------------
    // 1. Golden scenario: 1000 initial, 100/month, 8% p.a., 10 years
    // ---------------------------------------------------------------
    #[test]
    fn test_golden_final_amount() {
        let result = final_amount(dec!(1000), dec!(100), dec!(8), 10);
        assert!(
            (result - dec!(20514.24)).abs() < dec!(0.01),
            "final={}",
            result
        );
    }

    // ---------------------------------------------------------------
    // 2. Zero rate degenerates to pure accumulation
    // ---------------------------------------------------------------
    #[test]
    fn test_zero_rate_is_pure_accumulation() {
        let result = final_amount(dec!(1000), dec!(100), Decimal::ZERO, 10);
        assert_eq!(result, dec!(13000.00));
    }

    // ---------------------------------------------------------------
    // 3. Zero contribution degenerates to pure compounding
    // ---------------------------------------------------------------
    #[test]
    fn test_zero_contribution_is_pure_compounding() {
        // 12% p.a. = 1% per month; 1000 * 1.01^12
        let result = final_amount(dec!(1000), Decimal::ZERO, dec!(12), 1);
        assert!((result - dec!(1126.83)).abs() < dec!(0.01), "final={}", result);
    }

    // ---------------------------------------------------------------
    // 4. Series length and month numbering
    // ---------------------------------------------------------------
    #[test]
    fn test_series_length_and_ordering() {
        let series = monthly_series(dec!(1000), dec!(100), dec!(8), 10, dec!(4));
        assert_eq!(series.len(), 120);
        for (i, point) in series.iter().enumerate() {
            assert_eq!(point.month, i as u32 + 1);
        }
    }

    // ---------------------------------------------------------------
    // 5. Contributions are monotonic with an exact step
    // ---------------------------------------------------------------
    #[test]
    fn test_contribution_monotonic_with_exact_step() {
        let series = monthly_series(dec!(1000), dec!(100), dec!(8), 5, Decimal::ZERO);
        assert_eq!(series[0].contribution, dec!(1100.00));
        for pair in series.windows(2) {
            assert_eq!(pair[1].contribution - pair[0].contribution, dec!(100.00));
        }
    }

    // ---------------------------------------------------------------
    // 6. First months in detail
    // ---------------------------------------------------------------
    #[test]
    fn test_first_months_detail() {
        let series = monthly_series(dec!(1000), dec!(100), dec!(8), 10, dec!(4));

        let m1 = &series[0];
        assert_eq!(m1.amount, dec!(1106.67));
        assert_eq!(m1.interest, dec!(6.67));
        assert_eq!(m1.contribution, dec!(1100.00));
        assert_eq!(m1.inflation_adjusted, Some(dec!(1102.99)));

        let m2 = &series[1];
        assert_eq!(m2.amount, dec!(1214.04));
        assert_eq!(m2.contribution, dec!(1200.00));
    }

    // ---------------------------------------------------------------
    // 7. No inflation column when the rate is zero
    // ---------------------------------------------------------------
    #[test]
    fn test_inflation_column_absent_at_zero_rate() {
        let series = monthly_series(dec!(1000), dec!(100), dec!(8), 2, Decimal::ZERO);
        assert!(series.iter().all(|p| p.inflation_adjusted.is_none()));
    }

    // ---------------------------------------------------------------
    // 8. interest ~ amount - contribution, to rounding tolerance only
    // ---------------------------------------------------------------
    #[test]
    fn test_interest_tracks_amount_minus_contribution() {
        let series = monthly_series(dec!(1000), dec!(100), dec!(8), 10, Decimal::ZERO);
        for point in &series {
            let diff = (point.interest - (point.amount - point.contribution)).abs();
            assert!(diff <= dec!(0.02), "month {} diff {}", point.month, diff);
        }
    }

    // ---------------------------------------------------------------
    // 9. Envelope totals for the golden scenario
    // ---------------------------------------------------------------
    #[test]
    fn test_projection_totals() {
        let result = project(&default_input()).unwrap().result;
        assert_eq!(result.total_contributions, dec!(13000.00));
        assert!((result.final_amount - dec!(20514.24)).abs() < dec!(0.01));
        assert!((result.total_interest - dec!(7514.24)).abs() < dec!(0.01));
        assert_eq!(result.monthly_series.len(), 120);
    }

    // ---------------------------------------------------------------
    // 10. The two inflation formulas stay distinct
    // ---------------------------------------------------------------
    #[test]
    fn test_headline_deflation_differs_from_series_deflation() {
        let result = project(&default_input()).unwrap().result;

        // Headline: final / (1.04)^10
        assert!(
            (result.inflation_adjusted_final_amount - dec!(13858.69)).abs() < dec!(0.01),
            "headline={}",
            result.inflation_adjusted_final_amount
        );

        // Series tail: final deflated month-by-month at 4%/12
        let last = result.monthly_series.last().unwrap();
        let series_adjusted = last.inflation_adjusted.unwrap();
        assert!((series_adjusted - dec!(13760.26)).abs() < dec!(0.01));

        assert!(
            (result.inflation_adjusted_final_amount - series_adjusted).abs() > dec!(1),
            "the whole-horizon and per-month deflations must not collapse into one"
        );
    }

    // ---------------------------------------------------------------
    // 11. Without inflation the headline equals the nominal final
    // ---------------------------------------------------------------
    #[test]
    fn test_headline_equals_nominal_without_inflation() {
        let mut input = default_input();
        input.annual_inflation_rate_pct = Decimal::ZERO;
        let result = project(&input).unwrap().result;
        assert_eq!(result.inflation_adjusted_final_amount, result.final_amount);
    }

    // ---------------------------------------------------------------
    // 12. Repeated invocation is bit-identical
    // ---------------------------------------------------------------
    #[test]
    fn test_idempotent_over_repeated_invocation() {
        let input = default_input();
        let a = project(&input).unwrap().result;
        let b = project(&input).unwrap().result;
        assert_eq!(a, b);
    }

    // ---------------------------------------------------------------
    // 13. Validation
    // ---------------------------------------------------------------
    #[test]
    fn test_rejects_negative_initial_value() {
        let mut input = default_input();
        input.initial_value = dec!(-1);
        assert!(project(&input).is_err());
    }

    #[test]
    fn test_rejects_zero_horizon() {
        let mut input = default_input();
        input.time_in_years = 0;
        assert!(project(&input).is_err());
    }

    #[test]
    fn test_pure_series_degenerates_to_empty_on_zero_horizon() {
        let series = monthly_series(dec!(1000), dec!(100), dec!(8), 0, Decimal::ZERO);
        assert!(series.is_empty());
    }

    // ---------------------------------------------------------------
    // 14. Suspicious-but-legal rates warn instead of failing
    // ---------------------------------------------------------------
    #[test]
    fn test_rate_above_hundred_percent_warns() {
        let mut input = default_input();
        input.annual_interest_rate_pct = dec!(150);
        let output = project(&input).unwrap();
        assert!(!output.warnings.is_empty());
    }
}
