mod bulk;
mod sample;
mod scrape;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Harvest an ingredient vocabulary from OpenFoodFacts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect unique ingredients from the paginated search API
    Scrape {
        /// Stop once this many unique tokens are collected
        #[arg(long, default_value_t = 10_000)]
        target: usize,
        /// Hard cap on pages fetched
        #[arg(long, default_value_t = 1_000)]
        max_pages: u32,
        /// Output file stem (writes <stem>.csv and <stem>.txt)
        #[arg(long, default_value = "unique_ingredients")]
        output: String,
    },
    /// Count ingredient frequencies from a bulk TSV dump
    Bulk {
        /// Path to the TSV dump
        file: PathBuf,
        /// Keep only the N most frequent ingredients
        #[arg(long, default_value_t = 10_000)]
        top: usize,
        /// Stop after reading this many rows
        #[arg(long)]
        max_rows: Option<u64>,
        /// Output file stem (writes <stem>.csv and <stem>.txt)
        #[arg(long, default_value = "top_ingredients")]
        output: String,
    },
    /// Fetch random products and dump the raw API data
    Sample {
        /// Number of products to fetch
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
        /// Do not save products to a JSON file
        #[arg(long)]
        no_save: bool,
    },
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Print the first `n` export rows to stdout.
pub(crate) fn preview(rows: &[larder_core::ExportRow], n: usize) {
    for row in rows.iter().take(n) {
        match row.count {
            Some(count) => println!("  {} ({count})", row.token),
            None => println!("  {}", row.token),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape {
            target,
            max_pages,
            output,
        } => scrape::run(target, max_pages, &output).await,
        Commands::Bulk {
            file,
            top,
            max_rows,
            output,
        } => bulk::run(file, top, max_rows, &output).await,
        Commands::Sample { count, no_save } => sample::run(count, !no_save).await,
    }
}
