//! Spreadsheet report generation.
//!
//! Deduplicates the fetched rows and writes them to a dated `.xlsx` file:
//!
//! ```text
//! <dir>/news_monitoring_2025-05-06.xlsx
//! ```
//!
//! One file per calendar day; a second run on the same day overwrites the
//! first. No file is written when there is nothing to report.

use crate::error::ReportError;
use crate::models::ArticleRecord;
use chrono::NaiveDate;
use itertools::Itertools;
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// File name of the report for `date`.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("news_monitoring_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Drop rows whose `(title, link)` pair was already seen, keeping the first.
pub fn dedup_articles(table: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
    table
        .into_iter()
        .unique_by(|r| (r.title.clone(), r.link.clone()))
        .collect()
}

/// Deduplicate `table` and write it to `dir` as the report for `date`.
///
/// # Returns
///
/// * `Ok(Some(path))` - the report was written
/// * `Ok(None)` - nothing to report; no file was created
///
/// # Errors
///
/// Returns [`ReportError::Xlsx`] if the workbook cannot be built or saved.
/// A partially written file is removed before returning.
#[instrument(level = "info", skip_all, fields(dir = %dir.display(), %date, rows = table.len()))]
pub fn build_report(
    table: Vec<ArticleRecord>,
    dir: &Path,
    date: NaiveDate,
) -> Result<Option<PathBuf>, ReportError> {
    if table.is_empty() {
        info!("No articles; skipping report");
        return Ok(None);
    }

    let fetched = table.len();
    let table = dedup_articles(table);
    if table.is_empty() {
        info!("Nothing left after dedup; skipping report");
        return Ok(None);
    }
    info!(fetched, unique = table.len(), "Deduplicated articles");

    let path = dir.join(report_file_name(date));
    if let Err(e) = write_workbook(&table, &path) {
        discard_partial(&path);
        return Err(e);
    }
    info!(path = %path.display(), "Wrote report");

    Ok(Some(path))
}

fn write_workbook(table: &[ArticleRecord], path: &Path) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (col, name) in ArticleRecord::COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }
    for (i, record) in table.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, value) in record.cells().iter().enumerate() {
            sheet.write_string(row, col as u16, *value)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Remove whatever a failed save left at `path`.
fn discard_partial(path: &Path) {
    if !path.is_file() {
        return;
    }
    match std::fs::remove_file(path) {
        Ok(()) => warn!(path = %path.display(), "Removed partial report"),
        Err(e) => error!(path = %path.display(), error = %e, "Failed to remove partial report"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(keyword: &str, title: &str, link: &str, summary: &str) -> ArticleRecord {
        ArticleRecord {
            keyword: keyword.to_string(),
            published: "2024-05-01".to_string(),
            source: "Wire".to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            link: link.to_string(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name(date()), "news_monitoring_2024-05-01.xlsx");
    }

    #[test]
    fn test_dedup_identical_title_and_link() {
        let table = vec![
            record("Acme Corp", "Acme wins award", "http://x/1", "first"),
            record("Acme Corp", "Acme wins award", "http://x/1", "first"),
        ];
        assert_eq!(dedup_articles(table).len(), 1);
    }

    #[test]
    fn test_dedup_key_is_title_and_link() {
        let mut later = record("Other", "Same", "http://x/1", "different summary");
        later.published = "2024-04-30".to_string();
        let table = vec![
            record("Acme Corp", "Same", "http://x/1", "kept"),
            later,
            record("Acme Corp", "Same", "http://x/2", "other link"),
            record("Acme Corp", "Different", "http://x/1", "other title"),
        ];

        let deduped = dedup_articles(table);
        assert_eq!(deduped.len(), 3);
        assert_eq!(deduped[0].summary, "kept");
        assert_eq!(deduped[0].keyword, "Acme Corp");
        assert_eq!(deduped[1].link, "http://x/2");
        assert_eq!(deduped[2].title, "Different");
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let table = vec![
            record("A", "t1", "l1", "s"),
            record("B", "t1", "l1", "s"),
            record("A", "t2", "l1", "s"),
            record("C", "t2", "l1", "s"),
            record("A", "t1", "l2", "s"),
        ];

        let once = dedup_articles(table);
        let twice = dedup_articles(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let result = build_report(vec![], dir.path(), date()).unwrap();
        assert!(result.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_report_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let table = vec![
            record("Acme Corp", "Acme wins award", "http://x/1", "s"),
            record("Acme Corp", "Acme wins award", "http://x/1", "s"),
        ];

        let path = build_report(table, dir.path(), date()).unwrap().unwrap();
        assert_eq!(path, dir.path().join("news_monitoring_2024-05-01.xlsx"));

        // xlsx is a zip container
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_same_day_rerun_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = build_report(vec![record("A", "t", "l", "s")], dir.path(), date())
            .unwrap()
            .unwrap();
        let second = build_report(vec![record("B", "u", "m", "s")], dir.path(), date())
            .unwrap()
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_save_returns_error_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no_such_dir");

        let result = build_report(vec![record("A", "t", "l", "s")], &missing, date());

        assert!(matches!(result, Err(ReportError::Xlsx(_))));
        assert!(!missing.join(report_file_name(date())).exists());
    }

    #[test]
    fn test_discard_partial_removes_leftover_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(report_file_name(date()));
        std::fs::write(&path, b"PK\x03\x04truncated").unwrap();

        discard_partial(&path);

        assert!(!path.exists());
    }

    #[test]
    fn test_discard_partial_leaves_directories_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(report_file_name(date()));
        std::fs::create_dir(&path).unwrap();

        discard_partial(&path);

        assert!(path.is_dir());
    }
}
