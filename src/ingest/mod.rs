// src/ingest/mod.rs
//! Upload ingestion: file-kind dispatch, dataset parsing and ingest telemetry.

pub mod csv;
pub mod dataset;

pub use csv::{parse_rfc4180, CsvStats, CsvTable};
pub use dataset::{parse_csv_dataset, parse_json_dataset, DatasetRow, IngestReport};

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use std::path::Path;
use tracing::{info, warn};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_rows_valid_total", "Rows accepted from uploads.");
        describe_counter!(
            "ingest_rows_skipped_total",
            "Rows dropped because their text was empty."
        );
        describe_counter!("ingest_failures_total", "Uploads rejected as malformed.");
    });
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Csv,
    Json,
}

impl FileKind {
    /// Detect from the file name extension (case-insensitive).
    pub fn from_filename(name: &str) -> Option<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::Text),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A `.txt` upload is one document holding the whole (trimmed) content.
pub fn parse_text_document(content: &str) -> IngestReport {
    let text = content.trim_start_matches('\u{FEFF}').trim();
    if text.is_empty() {
        return IngestReport::failed("file is empty", 0);
    }
    IngestReport::ok(
        vec![DatasetRow {
            text: text.to_string(),
            ..Default::default()
        }],
        0,
    )
}

/// Parse an uploaded file by extension and record ingest metrics.
pub fn ingest_file(filename: &str, content: &str) -> IngestReport {
    ensure_metrics_described();

    let report = match FileKind::from_filename(filename) {
        Some(FileKind::Text) => parse_text_document(content),
        Some(FileKind::Csv) => parse_csv_dataset(content),
        Some(FileKind::Json) => parse_json_dataset(content),
        None => IngestReport::failed(
            format!("unsupported file type `{filename}` (expected .txt, .csv or .json)"),
            0,
        ),
    };

    counter!("ingest_rows_valid_total").increment(report.valid_count as u64);
    counter!("ingest_rows_skipped_total").increment(report.skipped_count as u64);
    if report.success {
        info!(
            target: "ingest",
            file = filename,
            valid = report.valid_count,
            skipped = report.skipped_count,
            "upload parsed"
        );
    } else {
        counter!("ingest_failures_total").increment(1);
        warn!(
            target: "ingest",
            file = filename,
            error = report.error.as_deref().unwrap_or_default(),
            "upload rejected"
        );
    }
    report
}

/// Short anonymized id for logs; raw document text is never logged.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_kind_by_extension() {
        assert_eq!(FileKind::from_filename("ulasan.CSV"), Some(FileKind::Csv));
        assert_eq!(FileKind::from_filename("data.json"), Some(FileKind::Json));
        assert_eq!(FileKind::from_filename("a/b/c.txt"), Some(FileKind::Text));
        assert_eq!(FileKind::from_filename("sheet.xlsx"), None);
        assert_eq!(FileKind::from_filename("noext"), None);
    }

    #[test]
    fn txt_is_single_document() {
        let r = ingest_file("review.txt", "  Gesits enak dipakai\nsetiap hari  ");
        assert!(r.success);
        assert_eq!(r.valid_count, 1);
        assert_eq!(r.rows[0].text, "Gesits enak dipakai\nsetiap hari");
    }

    #[test]
    fn empty_txt_and_unknown_type_fail() {
        assert!(!ingest_file("empty.txt", "  \n").success);
        let r = ingest_file("x.pdf", "whatever");
        assert!(!r.success);
        assert!(r.error.unwrap().contains("unsupported"));
    }

    #[test]
    fn dispatches_csv_and_json() {
        assert_eq!(ingest_file("a.csv", "text\nhalo\n").valid_count, 1);
        assert_eq!(ingest_file("a.json", r#"[{"text":"halo"}]"#).valid_count, 1);
    }

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("Viar Q1");
        assert_eq!(a.len(), 12);
        assert_eq!(a, anon_hash("Viar Q1"));
        assert_ne!(a, anon_hash("Viar Q2"));
    }
}
