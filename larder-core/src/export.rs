//! Flat-file export of filtered aggregates.
//!
//! All writers create or overwrite the destination; there is no
//! partial-write recovery. Output is UTF-8.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::aggregate::ExportRow;
use crate::error::ExportError;

/// Write rows as CSV. The header is `ingredient` or `ingredient,frequency`
/// depending on whether counts are present.
pub fn write_csv(path: &Path, rows: &[ExportRow]) -> Result<(), ExportError> {
    let has_counts = rows.iter().any(|row| row.count.is_some());
    let mut writer = csv::Writer::from_path(path)?;

    if has_counts {
        writer.write_record(["ingredient", "frequency"])?;
        for row in rows {
            let count = row.count.unwrap_or(0).to_string();
            writer.write_record([row.token.as_str(), count.as_str()])?;
        }
    } else {
        writer.write_record(["ingredient"])?;
        for row in rows {
            writer.write_record([row.token.as_str()])?;
        }
    }

    writer.flush()?;
    tracing::info!(path = %path.display(), rows = rows.len(), "wrote CSV");
    Ok(())
}

/// Write tokens one per line.
pub fn write_txt(path: &Path, rows: &[ExportRow]) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    for row in rows {
        writeln!(out, "{}", row.token)?;
    }
    out.flush()?;
    tracing::info!(path = %path.display(), rows = rows.len(), "wrote TXT");
    Ok(())
}

/// Pretty-print a serializable value to a JSON file. Used for raw product dumps.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n")?;
    out.flush()?;
    tracing::info!(path = %path.display(), "wrote JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::Token;
    use std::fs;

    fn row(word: &str, count: Option<u64>) -> ExportRow {
        ExportRow {
            token: Token::parse(word).unwrap(),
            count,
        }
    }

    #[test]
    fn test_csv_without_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&path, &[row("milk", None), row("sugar", None)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "ingredient\nmilk\nsugar\n");
    }

    #[test]
    fn test_csv_with_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&path, &[row("milk", Some(2)), row("sugar", Some(1))]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "ingredient,frequency\nmilk,2\nsugar,1\n");
    }

    #[test]
    fn test_txt_one_token_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        write_txt(&path, &[row("citric acid", Some(3)), row("water", Some(1))]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "citric acid\nwater\n");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "stale contents").unwrap();

        write_txt(&path, &[row("water", None)]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "water\n");
    }
}
