mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::assess::{AssessArgs, CompareArgs};
use commands::reporting::{ContributorsArgs, DrillDownArgs};
use commands::shock::{CarbonShockArgs, PhysicalShockArgs};

/// Climate-risk scoring and matrix aggregation for loan portfolios
#[derive(Parser)]
#[command(
    name = "cra",
    version,
    about = "Climate-risk scoring and matrix aggregation for loan portfolios",
    long_about = "A CLI for assessing climate risk across a bank's loan portfolio. \
                  Groups assets by location, region, or sector, scores each group on \
                  a 5x5 impact-likelihood matrix, ranks high-risk contributors, and \
                  derives shock parameters (physical damage index, implied carbon \
                  price) for downstream stress testing."
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
    /// Run a risk configuration against a portfolio (one matrix per method)
    Assess(AssessArgs),
    /// Run several configurations and flatten them into a comparison list
    Compare(CompareArgs),
    /// Rank top-exposure groups among high-risk assets
    TopContributors(ContributorsArgs),
    /// List the assets behind one matrix cell, largest exposure first
    DrillDown(DrillDownArgs),
    /// Derive the physical damage index for stress testing
    PhysicalShock(PhysicalShockArgs),
    /// Derive the implied carbon price for stress testing
    CarbonShock(CarbonShockArgs),
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
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Assess(args) => commands::assess::run_assess(args),
        Commands::Compare(args) => commands::assess::run_compare(args),
        Commands::TopContributors(args) => commands::reporting::run_top_contributors(args),
        Commands::DrillDown(args) => commands::reporting::run_drill_down(args),
        Commands::PhysicalShock(args) => commands::shock::run_physical_shock(args),
        Commands::CarbonShock(args) => commands::shock::run_carbon_shock(args),
        Commands::Version => {
            println!("cra {}", env!("CARGO_PKG_VERSION"));
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
