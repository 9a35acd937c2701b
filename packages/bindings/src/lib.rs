use napi::Result as NapiResult;
use napi_derive::napi;

use rust_decimal::Decimal;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Rate conversion
// ---------------------------------------------------------------------------

/// Annual rate (decimal fraction, as a string) to its monthly-compounded
/// equivalent, returned as a string to keep full decimal precision.
#[napi]
pub fn annual_to_monthly_equivalent(annual_rate: String) -> NapiResult<String> {
    let rate: Decimal = annual_rate.parse().map_err(to_napi_error)?;
    Ok(invest_sim_core::rates::annual_to_monthly_equivalent(rate).to_string())
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

#[napi]
pub fn project_fixed_income(input_json: String) -> NapiResult<String> {
    let input: invest_sim_core::fixed_income::projection::FixedIncomeInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        invest_sim_core::fixed_income::projection::project(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_variable_income(input_json: String) -> NapiResult<String> {
    let input: invest_sim_core::variable_income::dividends::VariableIncomeInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        invest_sim_core::variable_income::dividends::project(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Consolidation
// ---------------------------------------------------------------------------

#[napi]
pub fn consolidate_portfolio(input_json: String) -> NapiResult<String> {
    let input: invest_sim_core::portfolio::summary::PortfolioInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        invest_sim_core::portfolio::summary::consolidate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
