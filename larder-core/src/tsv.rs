//! Bulk ingestion from the OpenFoodFacts TSV dump.
//!
//! The dump is a tab-separated file with a header row and a few hundred
//! columns; we only look at the country marker and the ingredient text.
//! Rows are filtered to US products before ingestion, matching what the
//! frequency data is used for.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use csv::ReaderBuilder;

use crate::aggregate::Aggregate;
use crate::error::SourceError;
use crate::tokenize::tokenize;
use crate::types::RawRecord;

const COL_CODE: &str = "code";
const COL_COUNTRIES: &str = "countries_en";
const COL_INGREDIENTS_EN: &str = "ingredients_text_en";
const COL_INGREDIENTS: &str = "ingredients_text";

/// Country markers a row must carry to be ingested.
const COUNTRY_MARKERS: &[&str] = &["united states", "usa"];

#[derive(Debug, Clone)]
pub struct TsvConfig {
    /// Stop after reading this many rows.
    pub max_rows: Option<u64>,
    /// Log progress every N rows.
    pub progress_every: u64,
}

impl Default for TsvConfig {
    fn default() -> Self {
        Self {
            max_rows: None,
            progress_every: 50_000,
        }
    }
}

/// Outcome counters for a dump pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct TsvStats {
    pub rows_read: u64,
    pub rows_ingested: u64,
}

/// Stream the dump, tokenizing matching rows into `aggregate`.
///
/// A missing or unreadable file is fatal. Individual malformed rows are
/// logged and skipped. Setting `stop` ends the pass early with whatever has
/// been aggregated so far (used for Ctrl-C partial saves).
pub fn harvest_file(
    path: &Path,
    config: &TsvConfig,
    stop: &AtomicBool,
    aggregate: &mut dyn Aggregate,
) -> Result<TsvStats, SourceError> {
    tracing::info!(path = %path.display(), "processing dump");

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|header| header == name);

    let countries_idx = column(COL_COUNTRIES)
        .ok_or_else(|| SourceError::MissingColumn(COL_COUNTRIES.to_string()))?;
    let code_idx = column(COL_CODE);
    let ingredients_en_idx = column(COL_INGREDIENTS_EN);
    let ingredients_idx = column(COL_INGREDIENTS);
    if ingredients_en_idx.is_none() && ingredients_idx.is_none() {
        return Err(SourceError::MissingColumn(COL_INGREDIENTS.to_string()));
    }

    let mut stats = TsvStats::default();

    for result in reader.records() {
        if stop.load(Ordering::Relaxed) {
            tracing::warn!(rows = stats.rows_read, "stopping early");
            break;
        }

        stats.rows_read += 1;
        if let Some(max) = config.max_rows {
            if stats.rows_read > max {
                tracing::info!(max_rows = max, "reached row limit");
                break;
            }
        }

        let row = match result {
            Ok(row) => row,
            Err(error) => {
                tracing::warn!(row = stats.rows_read, error = %error, "skipping malformed row");
                continue;
            }
        };

        let countries = row.get(countries_idx).unwrap_or("").to_lowercase();
        if !COUNTRY_MARKERS.iter().any(|marker| countries.contains(marker)) {
            continue;
        }

        // Prefer the English ingredient column, fall back to the generic one.
        let text = ingredients_en_idx
            .and_then(|idx| row.get(idx))
            .filter(|text| !text.trim().is_empty())
            .or_else(|| {
                ingredients_idx
                    .and_then(|idx| row.get(idx))
                    .filter(|text| !text.trim().is_empty())
            });
        let Some(text) = text else { continue };

        let source = code_idx
            .and_then(|idx| row.get(idx))
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("row {}", stats.rows_read));
        let record = RawRecord::new(source, text);

        for token in tokenize(&record.text) {
            aggregate.insert(token);
        }
        stats.rows_ingested += 1;

        if stats.rows_read % config.progress_every == 0 {
            tracing::info!(
                rows = stats.rows_read,
                ingested = stats.rows_ingested,
                unique = aggregate.len(),
                "dump progress"
            );
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::FrequencyAggregate;
    use std::io::Write;

    fn write_dump(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "code\tcountries_en\tingredients_text_en\tingredients_text").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_country_filter() {
        let file = write_dump(&[
            "1\tUnited States\twater, sugar\t",
            "2\tFrance\teau, sucre\t",
            "3\tUSA\tmilk\t",
        ]);

        let mut agg = FrequencyAggregate::new();
        let stats = harvest_file(
            file.path(),
            &TsvConfig::default(),
            &AtomicBool::new(false),
            &mut agg,
        )
        .unwrap();

        assert_eq!(stats.rows_read, 3);
        assert_eq!(stats.rows_ingested, 2);
        assert_eq!(agg.count("water"), 1);
        assert_eq!(agg.count("milk"), 1);
        assert_eq!(agg.count("eau"), 0);
    }

    #[test]
    fn test_falls_back_to_generic_ingredient_column() {
        let file = write_dump(&["1\tUSA\t\twater, salt"]);

        let mut agg = FrequencyAggregate::new();
        harvest_file(
            file.path(),
            &TsvConfig::default(),
            &AtomicBool::new(false),
            &mut agg,
        )
        .unwrap();

        assert_eq!(agg.count("water"), 1);
        assert_eq!(agg.count("salt"), 1);
    }

    #[test]
    fn test_row_limit() {
        let file = write_dump(&["1\tUSA\twater\t", "2\tUSA\tsugar\t", "3\tUSA\tsalt\t"]);

        let mut agg = FrequencyAggregate::new();
        let stats = harvest_file(
            file.path(),
            &TsvConfig {
                max_rows: Some(2),
                ..TsvConfig::default()
            },
            &AtomicBool::new(false),
            &mut agg,
        )
        .unwrap();

        assert_eq!(stats.rows_ingested, 2);
        assert_eq!(agg.count("salt"), 0);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let mut agg = FrequencyAggregate::new();
        let result = harvest_file(
            Path::new("/nonexistent/products.tsv"),
            &TsvConfig::default(),
            &AtomicBool::new(false),
            &mut agg,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_stop_flag_ends_pass_early() {
        let file = write_dump(&["1\tUSA\twater\t", "2\tUSA\tsugar\t"]);

        let mut agg = FrequencyAggregate::new();
        let stats = harvest_file(
            file.path(),
            &TsvConfig::default(),
            &AtomicBool::new(true),
            &mut agg,
        )
        .unwrap();

        assert_eq!(stats.rows_read, 0);
        assert!(agg.is_empty());
    }
}
