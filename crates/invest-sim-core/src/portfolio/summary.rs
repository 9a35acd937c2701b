use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use crate::error::SimulatorError;
use crate::fixed_income::projection::{FixedIncomeInputs, FixedIncomeProjection};
use crate::rates::annual_to_monthly_equivalent;
use crate::types::{round_money, with_metadata, ComputationOutput, Money, Rate};
use crate::variable_income::dividends::{DividendProjection, VariableIncomeInputs};
use crate::SimResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The slice of a fixed-income projection the consolidated view needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedIncomeSnapshot {
    pub initial_value: Money,
    pub final_amount: Money,
    pub total_contributions: Money,
    pub inflation_adjusted_final_amount: Money,
}

impl FixedIncomeSnapshot {
    pub fn from_projection(inputs: &FixedIncomeInputs, projection: &FixedIncomeProjection) -> Self {
        Self {
            initial_value: inputs.initial_value,
            final_amount: projection.final_amount,
            total_contributions: projection.total_contributions,
            inflation_adjusted_final_amount: projection.inflation_adjusted_final_amount,
        }
    }
}

/// The slice of a variable-income projection the consolidated view needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableIncomeSnapshot {
    pub investment_amount: Money,
    pub total_after_period: Money,
    pub total_dividends: Money,
}

impl VariableIncomeSnapshot {
    pub fn from_projection(
        inputs: &VariableIncomeInputs,
        projection: &DividendProjection,
    ) -> Self {
        Self {
            investment_amount: inputs.investment_amount,
            total_after_period: projection.total_after_period,
            total_dividends: projection.total_dividends,
        }
    }
}

/// Aggregation input: zero, one or both components over a shared horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioInputs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_income: Option<FixedIncomeSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_income: Option<VariableIncomeSnapshot>,
    pub time_in_years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetClass {
    FixedIncome,
    VariableIncome,
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetClass::FixedIncome => write!(f, "Fixed income"),
            AssetClass::VariableIncome => write!(f, "Variable income"),
        }
    }
}

/// Annualized rate and its monthly-compounded equivalent, as fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetReturn {
    pub annualized: Rate,
    pub monthly: Rate,
}

/// Per-class return rates. Absent classes are omitted, never zeroed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReturns {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_income: Option<AssetReturn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_income: Option<AssetReturn>,
    /// Fixed income deflated by inflation (real purchasing power).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_income_real: Option<AssetReturn>,
}

/// One slice of the final-value distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub asset_class: AssetClass,
    pub final_value: Money,
    pub share: Rate,
}

/// Consolidated portfolio metrics. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub initial_investment: Money,
    pub final_value: Money,
    pub total_gains: Money,
    /// Total gain over the whole horizon, as a fraction of the initial
    /// investment. 0 when nothing was invested.
    pub gain_pct: Rate,
    /// Monthly-compounded equivalent of `gain_pct`.
    pub monthly_gain_pct: Rate,
    pub average_monthly_gain: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_monthly_dividends: Option<Money>,
    pub returns: PortfolioReturns,
    pub distribution: Vec<DistributionSlice>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `(final/base)^(1/years) - 1`, or 0 when the ratio is undefined.
///
/// A non-positive base or final value reports 0 rather than dividing by zero
/// or taking the root of a negative ratio.
fn annualized_return(final_value: Money, base: Money, years: u32) -> Rate {
    if years == 0 || base <= Decimal::ZERO || final_value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (final_value / base).powd(Decimal::ONE / Decimal::from(years)) - Decimal::ONE
}

fn asset_return(final_value: Money, base: Money, years: u32) -> AssetReturn {
    let annualized = annualized_return(final_value, base, years);
    AssetReturn {
        annualized,
        monthly: annual_to_monthly_equivalent(annualized),
    }
}

fn empty_summary() -> PortfolioSummary {
    PortfolioSummary {
        initial_investment: Decimal::ZERO,
        final_value: Decimal::ZERO,
        total_gains: Decimal::ZERO,
        gain_pct: Decimal::ZERO,
        monthly_gain_pct: Decimal::ZERO,
        average_monthly_gain: Decimal::ZERO,
        average_monthly_dividends: None,
        returns: PortfolioReturns {
            fixed_income: None,
            variable_income: None,
            fixed_income_real: None,
        },
        distribution: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Core operation
// ---------------------------------------------------------------------------

/// Consolidate the present components into portfolio-level metrics.
///
/// Absent components contribute exactly zero to every sum and are excluded
/// from the return and distribution tables. With no components at all the
/// result is an all-zero summary, never a failure.
pub fn consolidate(input: &PortfolioInputs) -> SimResult<ComputationOutput<PortfolioSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let fixed = input.fixed_income.as_ref();
    let variable = input.variable_income.as_ref();

    if fixed.is_none() && variable.is_none() {
        warnings.push("No investment components present; summary is all zeros".into());
        let elapsed = start.elapsed().as_micros() as u64;
        return Ok(with_metadata(
            "Portfolio Consolidation (no components)",
            &serde_json::json!({ "time_in_years": input.time_in_years }),
            warnings,
            elapsed,
            empty_summary(),
        ));
    }

    if input.time_in_years == 0 {
        return Err(SimulatorError::InvalidInput {
            field: "time_in_years".into(),
            reason: "horizon must be a positive number of years".into(),
        });
    }

    let years = input.time_in_years;
    let months = Decimal::from(years * 12);

    let initial_investment = fixed.map_or(Decimal::ZERO, |f| f.initial_value)
        + variable.map_or(Decimal::ZERO, |v| v.investment_amount);
    let final_value = fixed.map_or(Decimal::ZERO, |f| f.final_amount)
        + variable.map_or(Decimal::ZERO, |v| v.total_after_period);
    let total_gains = final_value - initial_investment;

    let gain_pct = if initial_investment > Decimal::ZERO {
        total_gains / initial_investment
    } else {
        Decimal::ZERO
    };
    let monthly_gain_pct = annual_to_monthly_equivalent(gain_pct);
    let average_monthly_gain = round_money(total_gains / months);

    let average_monthly_dividends = variable.map(|v| round_money(v.total_dividends / months));

    // Fixed income annualizes against everything paid in (contributions
    // arrive throughout the horizon); variable income against the initial
    // position. The asymmetry is deliberate.
    let returns = PortfolioReturns {
        fixed_income: fixed.map(|f| asset_return(f.final_amount, f.total_contributions, years)),
        variable_income: variable
            .map(|v| asset_return(v.total_after_period, v.investment_amount, years)),
        fixed_income_real: fixed.map(|f| {
            asset_return(f.inflation_adjusted_final_amount, f.total_contributions, years)
        }),
    };

    let mut distribution = Vec::new();
    if let Some(f) = fixed {
        if f.final_amount > Decimal::ZERO {
            distribution.push(DistributionSlice {
                asset_class: AssetClass::FixedIncome,
                final_value: f.final_amount,
                share: f.final_amount / final_value,
            });
        }
    }
    if let Some(v) = variable {
        if v.total_after_period > Decimal::ZERO {
            distribution.push(DistributionSlice {
                asset_class: AssetClass::VariableIncome,
                final_value: v.total_after_period,
                share: v.total_after_period / final_value,
            });
        }
    }

    if initial_investment.is_zero() {
        warnings.push("Initial investment is zero; gain percentage reported as 0".into());
    }

    let output = PortfolioSummary {
        initial_investment,
        final_value,
        total_gains,
        gain_pct,
        monthly_gain_pct,
        average_monthly_gain,
        average_monthly_dividends,
        returns,
        distribution,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Portfolio Consolidation (presence-gated sums, per-class return rates)",
        &serde_json::json!({
            "time_in_years": input.time_in_years,
            "has_fixed_income": fixed.is_some(),
            "has_variable_income": variable.is_some(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
