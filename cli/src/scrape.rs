//! The `scrape` subcommand: paginated harvest into a uniqueness set.

use std::path::PathBuf;

use anyhow::{Context, Result};
use larder_core::{
    export, Aggregate, SearchConfig, SearchSource, StopwordFilter, UniqueAggregate, WebClient,
};

pub async fn run(target: usize, max_pages: u32, output: &str) -> Result<()> {
    let client = WebClient::new().context("Failed to build HTTP client")?;
    let source = SearchSource::new(SearchConfig {
        target_tokens: Some(target),
        max_pages: Some(max_pages),
        ..SearchConfig::default()
    });

    let mut aggregate = UniqueAggregate::new();

    tokio::select! {
        stats = source.harvest(&client, &mut aggregate) => {
            tracing::info!(
                pages = stats.pages_fetched,
                failed = stats.failed_pages,
                products = stats.products_seen,
                with_ingredients = stats.products_with_ingredients,
                "harvest finished"
            );
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted, saving partial results");
        }
    }

    aggregate.apply_filter(&StopwordFilter::default());
    let rows = aggregate.rows();

    println!("Sample of {} ingredients found:", rows.len().min(30));
    crate::preview(&rows, 30);

    let csv_path = PathBuf::from(format!("{output}.csv"));
    let txt_path = PathBuf::from(format!("{output}.txt"));
    export::write_csv(&csv_path, &rows)
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;
    export::write_txt(&txt_path, &rows)
        .with_context(|| format!("Failed to write {}", txt_path.display()))?;

    println!(
        "Saved {} ingredients to {} and {}",
        rows.len(),
        csv_path.display(),
        txt_path.display()
    );
    Ok(())
}
