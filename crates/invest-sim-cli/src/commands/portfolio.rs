use clap::Args;
use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use invest_sim_core::fixed_income::projection::{self as fixed_projection, FixedIncomeInputs};
use invest_sim_core::portfolio::summary::{
    self, FixedIncomeSnapshot, PortfolioInputs, PortfolioSummary, VariableIncomeSnapshot,
};
use invest_sim_core::variable_income::dividends::{self, VariableIncomeInputs};
use invest_sim_core::ComputationOutput;

use crate::input;

/// Arguments for the consolidated portfolio view
#[derive(Args)]
pub struct PortfolioArgs {
    /// Path to a JSON request file (or pipe the request via stdin)
    #[arg(long)]
    pub input: Option<String>,
}

/// Fixed-income parameters of a consolidation request. The horizon is
/// shared across components and lives at the request root.
#[derive(Debug, Deserialize)]
pub struct FixedIncomeParams {
    pub initial_value: Decimal,
    pub monthly_contribution: Decimal,
    pub interest_rate: Decimal,
    #[serde(default)]
    pub inflation_rate: Decimal,
}

/// Variable-income parameters of a consolidation request.
#[derive(Debug, Deserialize)]
pub struct VariableIncomeParams {
    pub investment_amount: Decimal,
    pub dividend_yield: Decimal,
    pub growth: Decimal,
    #[serde(default)]
    pub reinvest_dividends: bool,
}

/// A consolidation request: a shared horizon plus zero, one or both
/// component parameter blocks.
#[derive(Debug, Deserialize)]
pub struct PortfolioRequest {
    pub time_in_years: u32,
    #[serde(default)]
    pub fixed_income: Option<FixedIncomeParams>,
    #[serde(default)]
    pub variable_income: Option<VariableIncomeParams>,
}

/// Everything a consolidation run produces, for reuse by the report view.
pub struct ConsolidationRun {
    pub summary: ComputationOutput<PortfolioSummary>,
    pub fixed: Option<FixedIncomeSnapshot>,
    pub variable: Option<VariableIncomeSnapshot>,
    pub time_in_years: u32,
}

pub fn resolve_request(
    input_path: &Option<String>,
) -> Result<PortfolioRequest, Box<dyn std::error::Error>> {
    if let Some(ref path) = input_path {
        input::read_json(path)
    } else if let Some(request) = input::read_stdin()? {
        Ok(request)
    } else {
        Err("--input <file.json> or a piped JSON request is required".into())
    }
}

/// Run the present projections and consolidate them.
pub fn consolidate_request(
    request: &PortfolioRequest,
) -> Result<ConsolidationRun, Box<dyn std::error::Error>> {
    let fixed = match &request.fixed_income {
        Some(params) => {
            let inputs = FixedIncomeInputs {
                initial_value: params.initial_value,
                monthly_contribution: params.monthly_contribution,
                annual_interest_rate_pct: params.interest_rate,
                annual_inflation_rate_pct: params.inflation_rate,
                time_in_years: request.time_in_years,
            };
            let projection = fixed_projection::project(&inputs)?;
            Some(FixedIncomeSnapshot::from_projection(
                &inputs,
                &projection.result,
            ))
        }
        None => None,
    };

    let variable = match &request.variable_income {
        Some(params) => {
            let inputs = VariableIncomeInputs {
                investment_amount: params.investment_amount,
                annual_dividend_yield_pct: params.dividend_yield,
                annual_growth_pct: params.growth,
                time_in_years: request.time_in_years,
                reinvest_dividends: params.reinvest_dividends,
            };
            let projection = dividends::project(&inputs)?;
            Some(VariableIncomeSnapshot::from_projection(
                &inputs,
                &projection.result,
            ))
        }
        None => None,
    };

    debug!(
        "consolidating portfolio (fixed: {}, variable: {})",
        fixed.is_some(),
        variable.is_some()
    );

    let summary = summary::consolidate(&PortfolioInputs {
        fixed_income: fixed.clone(),
        variable_income: variable.clone(),
        time_in_years: request.time_in_years,
    })?;

    Ok(ConsolidationRun {
        summary,
        fixed,
        variable,
        time_in_years: request.time_in_years,
    })
}

pub fn run(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = resolve_request(&args.input)?;
    let run = consolidate_request(&request)?;
    Ok(serde_json::to_value(run.summary)?)
}
