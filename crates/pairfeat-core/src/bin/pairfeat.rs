//! pairfeat command-line tool
//!
//! Loads paired records from CSV, derives features, narrows columns by
//! pattern and draws seeded subsamples.

use clap::{Parser, Subcommand};
use pairfeat_core::{
    sampling, ColumnSelector, DerivationConfig, EmptySelectionPolicy, FeatureDeriver, Transform,
};
use pairfeat_io::{open_file, write_csv, Table};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pairfeat", version, about = "Comparative features for paired-entity tables")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive rate, ratio and comparison features
    Derive {
        #[arg(short, long)]
        input: String,
        #[arg(short, long)]
        output: String,
        /// TOML or JSON derivation config (defaults to the social rate table)
        #[arg(short, long)]
        config: Option<String>,
        /// Keep only derived columns matching this pattern
        #[arg(long)]
        select: Option<String>,
    },
    /// Keep the columns whose names match a pattern
    Select {
        #[arg(short, long)]
        input: String,
        #[arg(short, long)]
        pattern: String,
        #[arg(short, long)]
        output: String,
        /// Fail instead of writing an empty table when nothing matches
        #[arg(long)]
        reject_empty: bool,
    },
    /// Draw a seeded subsample without replacement
    Sample {
        #[arg(short, long)]
        input: String,
        /// Column holding the labels; it is written last in the output
        #[arg(short, long)]
        label: String,
        #[arg(long, allow_hyphen_values = true)]
        size: i64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(short, long)]
        output: String,
    },
    /// Print the inferred schema as JSON
    Schema {
        #[arg(short, long)]
        input: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Derive {
            input,
            output,
            config,
            select,
        } => {
            let config = match config {
                Some(path) => DerivationConfig::load(path)?,
                None => DerivationConfig::default(),
            };
            let table = load(&input)?;
            let mut derived = FeatureDeriver::new(config)?.derive(&table)?;
            if let Some(pattern) = select {
                derived = ColumnSelector::new(&pattern)?.transform(&derived)?;
            }
            write_csv(&derived, &output)?;
            tracing::info!("Wrote {} columns to {}", derived.num_columns(), output);
        }

        Command::Select {
            input,
            pattern,
            output,
            reject_empty,
        } => {
            let policy = if reject_empty {
                EmptySelectionPolicy::Reject
            } else {
                EmptySelectionPolicy::Allow
            };
            let table = load(&input)?;
            let narrowed = ColumnSelector::new(&pattern)?
                .with_policy(policy)
                .transform(&table)?;
            write_csv(&narrowed, &output)?;
            tracing::info!("Wrote {} columns to {}", narrowed.num_columns(), output);
        }

        Command::Sample {
            input,
            label,
            size,
            seed,
            output,
        } => {
            let table = load(&input)?;
            let labels = table.require(&label)?.clone();
            let feature_names: Vec<&str> = table
                .column_names()
                .into_iter()
                .filter(|name| *name != label)
                .collect();
            let features = table.select(&feature_names)?;

            let (features, labels) = sampling(&features, &labels, size, seed)?;
            let sampled = features.with_column(label, labels)?;
            write_csv(&sampled, &output)?;
            tracing::info!("Wrote {} sampled rows to {}", sampled.num_rows(), output);
        }

        Command::Schema { input } => {
            let schema = open_file(&input)?.read_schema()?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn load(path: &str) -> Result<Table, Box<dyn std::error::Error>> {
    let table = open_file(path)?.read_table()?;
    tracing::info!(
        "Loaded {} rows x {} columns from {}",
        table.num_rows(),
        table.num_columns(),
        path
    );
    Ok(table)
}
