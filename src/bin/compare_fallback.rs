//! Compare the two mid-cycle rates of the annualized fallback
//! Test case defaults: weekly deposits of 100 into monthly compounding at 5%

use anyhow::{ensure, Result};
use clap::Parser;
use compound_projection::projection::{project, Algorithm};
use compound_projection::{Configuration, FallbackPartialRate, Frequency};

#[derive(Parser)]
#[command(name = "compare_fallback", about = "Year-by-year divergence of the annualized fallback partial rates")]
struct Cli {
    #[arg(long, default_value_t = 0.0)]
    initial: f64,

    #[arg(long, default_value_t = 100.0)]
    deposit: f64,

    /// daily, weekly or bi-weekly
    #[arg(long, default_value = "weekly")]
    deposit_interval: Frequency,

    #[arg(long, default_value_t = 5.0)]
    rate: f64,

    #[arg(long, default_value_t = 30)]
    years: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let general = Configuration {
        initial_investment: cli.initial,
        regular_deposit_amount: cli.deposit,
        regular_deposit_interval: cli.deposit_interval,
        interest_rate: cli.rate,
        compound_interval: Frequency::Monthly,
        timeframe: cli.years,
        fallback_partial_rate: FallbackPartialRate::General,
    };
    let annualized = Configuration {
        fallback_partial_rate: FallbackPartialRate::Annualized,
        ..general.clone()
    };

    let general = project(general)?;
    let annualized = project(annualized)?;
    ensure!(
        general.algorithm == Algorithm::AnnualizedFallback,
        "{} deposits into monthly compounding do not use the annualized fallback",
        cli.deposit_interval
    );

    println!("{} deposits of {:.2} at {}% compounded monthly", cli.deposit_interval, cli.deposit, cli.rate);
    println!("{:<6} {:<16} {:<16} {:<14} {:<10}", "Year", "General", "Annualized", "Diff", "Diff%");

    for (year, (g, a)) in general.year_end_records().zip(annualized.year_end_records()).enumerate() {
        let diff = g.current_value - a.current_value;
        let pct = if a.current_value > 0.0 { diff / a.current_value * 100.0 } else { 0.0 };
        println!(
            "{:<6} {:<16.2} {:<16.2} {:<14.4} {:<10.6}",
            year + 1,
            g.current_value,
            a.current_value,
            diff,
            pct
        );
    }
    Ok(())
}
