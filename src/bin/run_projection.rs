//! Run a compound interest projection and write the period table
//!
//! Several `--rate` values run as independent projections in parallel,
//! one row block per rate.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use compound_projection::config::load_config;
use compound_projection::{
    Configuration, FallbackPartialRate, Frequency, PeriodRecord, ProjectionEngine, ProjectionResult, RecordFilter,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PartialRate {
    General,
    Annualized,
}

#[derive(Parser)]
#[command(name = "run_projection", about = "Project investment growth under compound interest")]
struct Cli {
    /// JSON configuration file; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial lump sum
    #[arg(long)]
    initial: Option<f64>,

    /// Amount added every deposit period
    #[arg(long)]
    deposit: Option<f64>,

    /// Deposit cadence (daily, weekly, bi-weekly, monthly, quarterly, semi-annually, yearly)
    #[arg(long)]
    deposit_interval: Option<Frequency>,

    /// Annual rate in percent; repeat to project several rates
    #[arg(long = "rate")]
    rates: Vec<f64>,

    /// Compounding cadence
    #[arg(long)]
    compound: Option<Frequency>,

    /// Whole years to project
    #[arg(long)]
    years: Option<u32>,

    /// Mid-cycle rate for the annualized fallback
    #[arg(long, value_enum)]
    fallback_partial_rate: Option<PartialRate>,

    /// Output file (stdout if omitted)
    #[arg(long, short)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Only rows that are both a deposit and a compounding boundary
    #[arg(long)]
    skip_empty_rows: bool,

    /// Only year-end rows
    #[arg(long)]
    year_end_only: bool,
}

impl Cli {
    fn configurations(&self) -> Result<Vec<Configuration>> {
        let mut base = match &self.config {
            Some(path) => load_config(path).with_context(|| format!("failed to load {}", path.display()))?,
            None => Configuration::default(),
        };

        if let Some(initial) = self.initial {
            base.initial_investment = initial;
        }
        if let Some(deposit) = self.deposit {
            base.regular_deposit_amount = deposit;
        }
        if let Some(interval) = self.deposit_interval {
            base.regular_deposit_interval = interval;
        }
        if let Some(compound) = self.compound {
            base.compound_interval = compound;
        }
        if let Some(years) = self.years {
            base.timeframe = years;
        }
        if let Some(partial) = self.fallback_partial_rate {
            base.fallback_partial_rate = match partial {
                PartialRate::General => FallbackPartialRate::General,
                PartialRate::Annualized => FallbackPartialRate::Annualized,
            };
        }

        if self.rates.is_empty() {
            return Ok(vec![base]);
        }
        Ok(self.rates.iter().map(|&rate| base.with_rate(rate)).collect())
    }

    fn filter(&self) -> RecordFilter {
        RecordFilter {
            skip_empty_rows: self.skip_empty_rows,
            year_end_only: self.year_end_only,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    let configs = cli.configurations()?;
    if configs.is_empty() {
        bail!("nothing to project");
    }

    let results = ProjectionEngine::project_batch(&configs).context("invalid configuration")?;
    eprintln!("Projected {} configuration(s) in {:?}", results.len(), start.elapsed());

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let filter = cli.filter();
    match cli.format {
        OutputFormat::Csv => write_csv(writer, &configs, &results, &filter)?,
        OutputFormat::Json => write_json(writer, &configs, &results, &filter)?,
    }

    for (config, result) in configs.iter().zip(&results) {
        print_summary(config, result);
    }
    Ok(())
}

fn money(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

fn index(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_csv<W: Write>(
    writer: W,
    configs: &[Configuration],
    results: &[ProjectionResult],
    filter: &RecordFilter,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let period_label = configs[0].compound_interval.period_label();

    csv_writer.write_record([
        "Rate",
        "Step",
        "Deposit #",
        "Deposit",
        period_label,
        "Period Deposit",
        "Period Interest",
        "Total Interest",
        "Total Invested",
        "Current Value",
        "Year End",
    ])?;

    for (config, result) in configs.iter().zip(results) {
        for record in result.filtered(filter) {
            csv_writer.write_record(row(config.interest_rate, record))?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

fn row(rate: f64, record: &PeriodRecord) -> [String; 11] {
    [
        rate.to_string(),
        record.step.to_string(),
        index(record.deposit_num),
        money(record.deposit),
        index(record.period_num),
        money(record.period_deposit),
        money(record.period_interest),
        format!("{:.2}", record.total_interest),
        format!("{:.2}", record.total_invested),
        format!("{:.2}", record.current_value),
        record.is_year_end.to_string(),
    ]
}

fn write_json<W: Write>(
    mut writer: W,
    configs: &[Configuration],
    results: &[ProjectionResult],
    filter: &RecordFilter,
) -> Result<()> {
    let documents: Vec<serde_json::Value> = configs
        .iter()
        .zip(results)
        .map(|(config, result)| {
            let records: Vec<&PeriodRecord> = result.filtered(filter).collect();
            serde_json::json!({
                "configuration": config,
                "algorithm": result.algorithm,
                "finalValue": result.final_value(),
                "totalInterest": result.total_interest(),
                "totalInvested": result.total_invested(),
                "records": records,
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut writer, &documents)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn print_summary(config: &Configuration, result: &ProjectionResult) {
    eprintln!(
        "\n{:.2} initial plus {} deposits of {:.2} at {}% compounded {} for {} years ({:?}):",
        config.initial_investment,
        config.regular_deposit_interval,
        config.regular_deposit_amount,
        config.interest_rate,
        config.compound_interval,
        config.timeframe,
        result.algorithm,
    );
    eprintln!("  Total value:    {:.2}", result.final_value());
    eprintln!("  Total interest: {:.2}", result.total_interest());
    eprintln!("  Total invested: {:.2}", result.total_invested());
}
