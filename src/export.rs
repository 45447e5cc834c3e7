//! Serialization of a finished result set to CSV or JSON.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::MatchRecord;

/// Snippets are capped in exports so one degenerate document cannot bloat a
/// spreadsheet cell.
const SNIPPET_EXPORT_LIMIT: usize = 500;

const CSV_HEADER: [&str; 5] = ["Filename", "Path", "Size (bytes)", "Modified", "Snippet"];

/// Writes `records` as CSV rows under the standard header.
pub fn write_csv<W: Write>(records: &[MatchRecord], writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for record in records {
        let path = record.path.display().to_string();
        let size = record.size.to_string();
        let modified = record.modified.format("%Y-%m-%d %H:%M:%S").to_string();
        csv_writer.write_record([
            record.name.as_str(),
            path.as_str(),
            size.as_str(),
            modified.as_str(),
            truncate_chars(&record.snippet, SNIPPET_EXPORT_LIMIT),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes `records` as a CSV file at `path`.
pub fn export_csv(records: &[MatchRecord], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_csv(records, file)
        .with_context(|| format!("Failed to write CSV export: {}", path.display()))?;
    tracing::info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}

/// Serializes `records` as a pretty-printed JSON array.
pub fn to_json(records: &[MatchRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Cuts `s` to at most `limit` characters without splitting a code point.
fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;

    fn record(name: &str, snippet: &str) -> MatchRecord {
        MatchRecord {
            name: name.to_string(),
            path: PathBuf::from(format!("/data/{name}")),
            size: 2048,
            modified: Local.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
            extension: "txt".to_string(),
            snippet: snippet.to_string(),
        }
    }

    #[test]
    fn csv_has_header_and_formatted_rows() {
        let records = vec![record("report.txt", "Q4 results")];
        let mut buf = Vec::new();
        write_csv(&records, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Filename,Path,Size (bytes),Modified,Snippet"
        );
        assert_eq!(
            lines.next().unwrap(),
            "report.txt,/data/report.txt,2048,2024-03-05 14:30:00,Q4 results"
        );
    }

    #[test]
    fn csv_quotes_fields_containing_commas() {
        let records = vec![record("report.txt", "totals, by quarter")];
        let mut buf = Vec::new();
        write_csv(&records, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("\"totals, by quarter\""));
    }

    #[test]
    fn export_snippet_is_capped_at_500_chars() {
        let long = "s".repeat(800);
        let records = vec![record("report.txt", &long)];
        let mut buf = Vec::new();
        write_csv(&records, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains(&"s".repeat(500)));
        assert!(!out.contains(&"s".repeat(501)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let s = "é".repeat(10);
        assert_eq!(truncate_chars(&s, 4), "éééé");
        assert_eq!(truncate_chars("short", 500), "short");
    }

    #[test]
    fn json_round_trips_record_fields() {
        let records = vec![record("report.txt", "Q4 results")];
        let json = to_json(&records).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "report.txt");
        assert_eq!(value[0]["size"], 2048);
        assert_eq!(value[0]["snippet"], "Q4 results");
    }
}
