use clap::Args;
use log::debug;
use rust_decimal::Decimal;
use serde_json::Value;

use invest_sim_core::fixed_income::projection::{self, FixedIncomeInputs};

/// Arguments for the fixed-income projection
#[derive(Args)]
pub struct FixedIncomeArgs {
    /// Amount invested up front
    #[arg(long, default_value = "1000")]
    pub initial_value: Decimal,

    /// Contribution added every month
    #[arg(long, default_value = "100")]
    pub monthly_contribution: Decimal,

    /// Annual interest rate in percent (8 = 8% p.a.)
    #[arg(long, default_value = "8")]
    pub interest_rate: Decimal,

    /// Annual inflation rate in percent
    #[arg(long, default_value = "4")]
    pub inflation_rate: Decimal,

    /// Horizon in whole years
    #[arg(long, default_value = "10")]
    pub years: u32,
}

pub fn run(args: FixedIncomeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.initial_value < Decimal::ZERO {
        return Err("--initial-value must be >= 0".into());
    }
    if args.monthly_contribution < Decimal::ZERO {
        return Err("--monthly-contribution must be >= 0".into());
    }
    if args.interest_rate < Decimal::ZERO {
        return Err("--interest-rate must be >= 0".into());
    }
    if args.inflation_rate < Decimal::ZERO {
        return Err("--inflation-rate must be >= 0".into());
    }
    if args.years == 0 {
        return Err("--years must be > 0".into());
    }

    let inputs = FixedIncomeInputs {
        initial_value: args.initial_value,
        monthly_contribution: args.monthly_contribution,
        annual_interest_rate_pct: args.interest_rate,
        annual_inflation_rate_pct: args.inflation_rate,
        time_in_years: args.years,
    };

    debug!("projecting fixed income over {} months", args.years * 12);
    let result = projection::project(&inputs)?;
    Ok(serde_json::to_value(result)?)
}
