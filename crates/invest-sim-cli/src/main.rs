mod commands;
mod input;
mod money;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::fixed_income::FixedIncomeArgs;
use commands::portfolio::PortfolioArgs;
use commands::report::ReportArgs;
use commands::variable_income::VariableIncomeArgs;

/// Deterministic investment projections
#[derive(Parser)]
#[command(
    name = "isim",
    version,
    about = "Deterministic investment projections with decimal precision",
    long_about = "Projects fixed-income (compound interest with recurring \
                  contributions, optional inflation adjustment) and \
                  variable-income (dividend-paying equity) investments, and \
                  consolidates both into portfolio-level metrics and a \
                  printable report."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a recurring-contribution compound-interest investment
    FixedIncome(FixedIncomeArgs),
    /// Project a dividend-paying equity position
    VariableIncome(VariableIncomeArgs),
    /// Consolidate both simulations into portfolio metrics
    Portfolio(PortfolioArgs),
    /// Render the printable consolidated report
    Report(ReportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::FixedIncome(args) => commands::fixed_income::run(args),
        Commands::VariableIncome(args) => commands::variable_income::run(args),
        Commands::Portfolio(args) => commands::portfolio::run(args),
        Commands::Report(args) => match commands::report::run(args) {
            Ok(()) => process::exit(0),
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e);
                process::exit(1);
            }
        },
        Commands::Version => {
            println!("isim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
