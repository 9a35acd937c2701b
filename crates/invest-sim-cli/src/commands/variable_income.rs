use clap::Args;
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use invest_sim_core::variable_income::dividends::{self, VariableIncomeInputs};

/// Arguments for the variable-income (dividend) projection
#[derive(Args)]
pub struct VariableIncomeArgs {
    /// Amount invested in the position
    #[arg(long, default_value = "5000")]
    pub investment: Decimal,

    /// Annual dividend yield in percent (5 = 5% p.a.)
    #[arg(long, default_value = "5")]
    pub dividend_yield: Decimal,

    /// Expected annual growth in percent
    #[arg(long, default_value = "8")]
    pub growth: Decimal,

    /// Horizon in whole years
    #[arg(long, default_value = "10")]
    pub years: u32,

    /// Reinvest each year's dividends into the position
    #[arg(long)]
    pub reinvest: bool,
}

pub fn run(args: VariableIncomeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.investment <= Decimal::ZERO {
        return Err("--investment must be > 0".into());
    }
    if args.dividend_yield < Decimal::ZERO {
        return Err("--dividend-yield must be >= 0".into());
    }
    if args.growth < Decimal::ZERO {
        return Err("--growth must be >= 0".into());
    }
    if args.years == 0 {
        return Err("--years must be > 0".into());
    }

    let inputs = VariableIncomeInputs {
        investment_amount: args.investment,
        annual_dividend_yield_pct: args.dividend_yield,
        annual_growth_pct: args.growth,
        time_in_years: args.years,
        reinvest_dividends: args.reinvest,
    };

    debug!(
        "projecting dividends over {} years (reinvest: {})",
        args.years, args.reinvest
    );
    let result = dividends::project(&inputs)?;
    Ok(serde_json::to_value(result)?)
}
