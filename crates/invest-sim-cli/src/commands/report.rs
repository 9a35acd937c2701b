use chrono::Local;
use clap::Args;
use rust_decimal::Decimal;
use tabled::{builder::Builder, Table};

use crate::commands::portfolio::{consolidate_request, resolve_request};
use crate::money::{format_currency, format_percent};

/// Arguments for the printable consolidated report
#[derive(Args)]
pub struct ReportArgs {
    /// Path to a JSON request file (or pipe the request via stdin)
    #[arg(long)]
    pub input: Option<String>,
}

fn signed_percent(rate: Decimal) -> String {
    if rate >= Decimal::ZERO {
        format!("+{}", format_percent(rate))
    } else {
        format_percent(rate)
    }
}

/// Total return of a position against its starting value, when defined.
fn position_return(final_value: Decimal, initial: Decimal) -> String {
    if initial > Decimal::ZERO {
        signed_percent(final_value / initial - Decimal::ONE)
    } else {
        "-".to_string()
    }
}

pub fn run(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let request = resolve_request(&args.input)?;
    let run = consolidate_request(&request)?;
    let summary = &run.summary.result;

    println!("Investment Report - Consolidated Portfolio");
    println!("==========================================");
    println!();

    // --- Portfolio summary ---
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    builder.push_record([
        "Total initial investment",
        &format_currency(summary.initial_investment),
    ]);
    builder.push_record([
        "Projected final value",
        &format_currency(summary.final_value),
    ]);
    builder.push_record(["Total gains", &format_currency(summary.total_gains)]);
    builder.push_record(["Total return", &signed_percent(summary.gain_pct)]);
    builder.push_record(["Monthly return", &signed_percent(summary.monthly_gain_pct)]);
    builder.push_record([
        "Average monthly gains",
        &format_currency(summary.average_monthly_gain),
    ]);
    if let Some(dividends) = run.variable.as_ref().map(|v| v.total_dividends) {
        if dividends > Decimal::ZERO {
            builder.push_record(["Accumulated dividends", &format_currency(dividends)]);
        }
    }
    println!("{}", Table::from(builder));
    println!();

    // --- Breakdown by investment type ---
    let mut builder = Builder::default();
    builder.push_record(["Investment type", "Initial", "Final", "Gains", "Return"]);

    if let Some(fixed) = &run.fixed {
        if fixed.final_amount > Decimal::ZERO {
            builder.push_record([
                "Fixed income".to_string(),
                format_currency(fixed.initial_value),
                format_currency(fixed.final_amount),
                format_currency(fixed.final_amount - fixed.initial_value),
                position_return(fixed.final_amount, fixed.initial_value),
            ]);
            builder.push_record([
                "Fixed income (inflation-adjusted)".to_string(),
                format_currency(fixed.initial_value),
                format_currency(fixed.inflation_adjusted_final_amount),
                format_currency(fixed.inflation_adjusted_final_amount - fixed.initial_value),
                position_return(fixed.inflation_adjusted_final_amount, fixed.initial_value),
            ]);
        }
    }
    if let Some(variable) = &run.variable {
        if variable.total_after_period > Decimal::ZERO {
            builder.push_record([
                "Variable income".to_string(),
                format_currency(variable.investment_amount),
                format_currency(variable.total_after_period),
                format_currency(variable.total_after_period - variable.investment_amount),
                position_return(variable.total_after_period, variable.investment_amount),
            ]);
        }
    }
    println!("{}", Table::from(builder));
    println!();

    // --- Distribution ---
    if !summary.distribution.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Asset class", "Final value", "Share"]);
        for slice in &summary.distribution {
            builder.push_record([
                slice.asset_class.to_string(),
                format_currency(slice.final_value),
                format_percent(slice.share),
            ]);
        }
        println!("{}", Table::from(builder));
        println!();
    }

    for warning in &run.summary.warnings {
        println!("Warning: {}", warning);
    }

    println!(
        "Generated on {} over a {}-year horizon.",
        Local::now().format("%Y-%m-%d"),
        run.time_in_years
    );
    println!("This report is a simulation and does not constitute investment advice.");

    Ok(())
}
