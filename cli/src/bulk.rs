//! The `bulk` subcommand: frequency counts from a TSV dump.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use larder_core::{export, tsv, Aggregate, FrequencyAggregate, StopwordFilter, TsvConfig};

pub async fn run(file: PathBuf, top: usize, max_rows: Option<u64>, output: &str) -> Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupted, will save partial results");
                stop.store(true, Ordering::Relaxed);
            }
        });
    }

    // The dump pass is blocking file I/O; keep it off the async workers.
    let config = TsvConfig {
        max_rows,
        ..TsvConfig::default()
    };
    let display_path = file.display().to_string();
    let (mut aggregate, stats) = tokio::task::spawn_blocking(move || {
        let mut aggregate = FrequencyAggregate::new();
        let stats = tsv::harvest_file(&file, &config, &stop, &mut aggregate);
        (aggregate, stats)
    })
    .await?;
    let stats = stats.with_context(|| format!("Failed to process {display_path}"))?;

    tracing::info!(
        rows = stats.rows_read,
        ingested = stats.rows_ingested,
        unique = aggregate.len(),
        "dump processed"
    );

    aggregate.apply_filter(&StopwordFilter::default());
    let rows = aggregate.top(top);

    println!("Top {} most common ingredients:", rows.len().min(50));
    crate::preview(&rows, 50);

    let csv_path = PathBuf::from(format!("{output}.csv"));
    let txt_path = PathBuf::from(format!("{output}.txt"));
    export::write_csv(&csv_path, &rows)
        .with_context(|| format!("Failed to write {}", csv_path.display()))?;
    export::write_txt(&txt_path, &rows)
        .with_context(|| format!("Failed to write {}", txt_path.display()))?;

    println!(
        "Saved top {} ingredients to {} and {}",
        rows.len(),
        csv_path.display(),
        txt_path.display()
    );
    Ok(())
}
