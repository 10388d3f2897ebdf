//! CLI entry point for the categorical imputer.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use lex_imputer::{CategoricalImputer, ImputerConfig, MissingValues, Strategy, TieBreaking};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CLI-compatible imputation strategy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliStrategy {
    /// Use the most frequent value (mode)
    MostFrequent,
    /// Use the value given by --fill-value
    Constant,
}

impl From<CliStrategy> for Strategy {
    fn from(cli: CliStrategy) -> Self {
        match cli {
            CliStrategy::MostFrequent => Strategy::MostFrequent,
            CliStrategy::Constant => Strategy::Constant,
        }
    }
}

/// CLI-compatible tie-breaking policy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliTieBreaking {
    /// Fail when several values are equally frequent
    Error,
    /// Take the smallest tied value
    First,
    /// Pick a tied value at random
    Random,
}

impl From<CliTieBreaking> for TieBreaking {
    fn from(cli: CliTieBreaking) -> Self {
        match cli {
            CliTieBreaking::Error => TieBreaking::Error,
            CliTieBreaking::First => TieBreaking::First,
            CliTieBreaking::Random => TieBreaking::Random,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Categorical missing-value imputer",
    long_about = "Fill missing values in one categorical CSV column.\n\n\
                  EXAMPLES:\n  \
                  # Impute with the most frequent value\n  \
                  lex-imputer -i data.csv -c Embarked -o imputed.csv\n\n  \
                  # Learn from a training file, apply to another\n  \
                  lex-imputer -i test.csv --fit-input train.csv -c Embarked -o test_imputed.csv\n\n  \
                  # Treat '?' as missing and fill with a constant\n  \
                  lex-imputer -i data.csv -c Cabin --missing-values '?' --strategy constant --fill-value U"
)]
struct Args {
    /// Path to the CSV file to impute
    #[arg(short, long)]
    input: PathBuf,

    /// Column to impute
    #[arg(short, long)]
    column: String,

    /// CSV file to learn the fill value from
    ///
    /// If not specified, the fill value is learned from the input itself
    #[arg(long)]
    fit_input: Option<PathBuf>,

    /// Output CSV path
    ///
    /// If not specified, only a summary is printed
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// How the fill value is learned
    #[arg(long, value_enum, default_value = "most-frequent")]
    strategy: CliStrategy,

    /// Policy for equally frequent values
    #[arg(long, value_enum, default_value = "error")]
    tie_breaking: CliTieBreaking,

    /// Replacement used by the constant strategy
    #[arg(long, default_value = "?")]
    fill_value: String,

    /// Sentinel marking missing entries ("NaN" means empty/null cells)
    #[arg(long, default_value = "NaN")]
    missing_values: String,

    /// Seed for random tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output the summary as JSON to stdout
    ///
    /// Disables all logging so stdout only contains the JSON summary.
    #[arg(long)]
    json: bool,
}

/// Result of one CLI run.
#[derive(Debug, Serialize)]
struct ImputationSummary {
    column: String,
    strategy: String,
    tie_breaking: String,
    fill_value: String,
    rows: usize,
    filled: usize,
    output: Option<PathBuf>,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let mut config_builder = ImputerConfig::builder()
        .missing_values(MissingValues::parse(&args.missing_values))
        .strategy(args.strategy.into())
        .fill_value(args.fill_value.clone())
        .tie_breaking(args.tie_breaking.into());

    if let Some(seed) = args.seed {
        config_builder = config_builder.random_seed(seed);
    }

    let config = config_builder.build()?;
    debug!("Imputer configuration: {:?}", config);

    let mut imputer = CategoricalImputer::new(config)?;

    let mut data = load_csv(&args.input)?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    match &args.fit_input {
        Some(path) => {
            let train = load_csv(path)?;
            imputer.fit_series(column_series(&train, &args.column)?)?;
        }
        None => {
            imputer.fit_series(column_series(&data, &args.column)?)?;
        }
    }

    let fill_value = imputer
        .fill_value()
        .cloned()
        .ok_or_else(|| anyhow!("Imputer has no fill value after fitting"))?;
    info!("Fill value for '{}': {}", args.column, fill_value);

    let filled = imputer.transform_column(&mut data, &args.column)?;
    info!("Imputed {} missing entries in '{}'", filled, args.column);

    if let Some(ref output) = args.output {
        write_csv(&mut data, output)?;
        info!("Dataset saved: {}", output.display());
    }

    let summary = ImputationSummary {
        column: args.column.clone(),
        strategy: imputer.config().strategy.to_string(),
        tie_breaking: imputer.config().tie_breaking.to_string(),
        fill_value,
        rows: data.height(),
        filled,
        output: args.output.clone(),
    };

    print_summary(&summary, args.json)
}

fn load_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(anyhow!("Input file not found: {}", path.display()));
    }

    info!("Loading dataset from: {}", path.display());
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

fn column_series<'a>(df: &'a DataFrame, column: &str) -> Result<&'a Series> {
    let col = df
        .column(column)
        .map_err(|_| anyhow!("Column '{}' not found in dataset", column))?;
    Ok(col.as_materialized_series())
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(df)?;
    Ok(())
}

/// Print the run summary.
///
/// Uses `println!` intentionally: this is the CLI's result, not a log line.
fn print_summary(summary: &ImputationSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(60));
    println!("IMPUTATION SUMMARY");
    println!("{}", "=".repeat(60));
    println!("  Column:       {}", summary.column);
    println!("  Strategy:     {}", summary.strategy);
    println!("  Tie-breaking: {}", summary.tie_breaking);
    println!("  Fill value:   {}", summary.fill_value);
    println!("  Rows:         {}", summary.rows);
    println!("  Filled:       {}", summary.filled);
    if let Some(ref output) = summary.output {
        println!("  Output:       {}", output.display());
    }

    Ok(())
}
