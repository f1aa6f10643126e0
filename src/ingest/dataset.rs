//! Dataset row extraction for CSV and JSON uploads.
//!
//! Header / key matching ignores case and whitespace. Only `text` is required;
//! a record whose trimmed text is empty is skipped and counted, never fatal.
//! Blank CSV lines are not records and are ignored.

use super::csv::parse_rfc4180;
use anyhow::{anyhow, bail, Context, Result};
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;
use tracing::warn;

/// One normalized record. `text` is never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords_extracted: Option<String>,
}

/// Outcome of parsing one upload. Failures are values, never panics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub success: bool,
    pub rows: Vec<DatasetRow>,
    pub valid_count: usize,
    pub skipped_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IngestReport {
    pub fn ok(rows: Vec<DatasetRow>, skipped_count: usize) -> Self {
        Self {
            success: true,
            valid_count: rows.len(),
            rows,
            skipped_count,
            error: None,
        }
    }

    pub fn failed(error: impl Display, skipped_count: usize) -> Self {
        Self {
            success: false,
            rows: Vec::new(),
            valid_count: 0,
            skipped_count,
            error: Some(error.to_string()),
        }
    }

    /// Turn an extraction result into a report; zero valid rows is a failure
    /// that still carries the skip count.
    fn from_extracted(res: Result<(Vec<DatasetRow>, usize)>) -> Self {
        match res {
            Ok((rows, skipped)) if rows.is_empty() => {
                Self::failed("no records with non-empty `text`", skipped)
            }
            Ok((rows, skipped)) => Self::ok(rows, skipped),
            Err(e) => Self::failed(format!("{e:#}"), 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Id,
    Date,
    Region,
    Source,
    User,
    Text,
    AspectCategory,
    KeywordsExtracted,
}

/// Lower-case and drop all whitespace: `" Aspect_Category "` → `aspect_category`.
fn normalize_header(h: &str) -> String {
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"));
    re_ws
        .replace_all(h.trim_start_matches('\u{FEFF}'), "")
        .to_lowercase()
}

fn column_for(header: &str) -> Option<Column> {
    match normalize_header(header).as_str() {
        "id" => Some(Column::Id),
        "date" => Some(Column::Date),
        "region" => Some(Column::Region),
        "source" => Some(Column::Source),
        "user" => Some(Column::User),
        "text" => Some(Column::Text),
        "aspect_category" | "aspectcategory" => Some(Column::AspectCategory),
        "keywords_extracted" | "keywordsextracted" => Some(Column::KeywordsExtracted),
        _ => None,
    }
}

impl DatasetRow {
    /// Empty values never overwrite: with duplicate columns (`Text` and
    /// `text`), the non-empty one wins whatever the order.
    fn set(&mut self, col: Column, raw: &str) {
        let value = raw.trim();
        if value.is_empty() {
            return;
        }
        let opt = || Some(value.to_string());
        match col {
            Column::Text => self.text = value.to_string(),
            Column::Id => self.id = opt(),
            Column::Date => self.date = opt(),
            Column::Region => self.region = opt(),
            Column::Source => self.source = opt(),
            Column::User => self.user = opt(),
            Column::AspectCategory => self.aspect_category = opt(),
            Column::KeywordsExtracted => self.keywords_extracted = opt(),
        }
    }
}

/// A line with no content; never a record, not even the header.
fn is_blank_record(record: &[String]) -> bool {
    record.len() == 1 && record[0].trim().is_empty()
}

/// Parse a CSV upload (header row required, `text` column required).
pub fn parse_csv_dataset(content: &str) -> IngestReport {
    IngestReport::from_extracted(extract_csv(content))
}

/// Parse a JSON upload (non-empty array of objects, `text` key required).
pub fn parse_json_dataset(content: &str) -> IngestReport {
    IngestReport::from_extracted(extract_json(content))
}

fn extract_csv(content: &str) -> Result<(Vec<DatasetRow>, usize)> {
    let table = parse_rfc4180(content);
    if table.stats.unterminated_quote {
        warn!(target: "ingest", rows = table.stats.row_count, "CSV ended inside a quoted field");
    }

    let mut records = table.rows.into_iter().skip_while(|r| is_blank_record(r));
    let header = records
        .next()
        .filter(|h| h.iter().any(|c| !c.trim().is_empty()))
        .ok_or_else(|| anyhow!("file is empty"))?;

    let columns: Vec<Option<Column>> = header.iter().map(|h| column_for(h)).collect();
    if !columns.contains(&Some(Column::Text)) {
        bail!(
            "missing required column `text` (found: {})",
            header.join(", ")
        );
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in records {
        if is_blank_record(&record) {
            continue;
        }
        let mut row = DatasetRow::default();
        for (value, col) in record.iter().zip(columns.iter()) {
            if let Some(col) = col {
                row.set(*col, value);
            }
        }
        if row.text.is_empty() {
            skipped += 1;
        } else {
            rows.push(row);
        }
    }
    if rows.is_empty() && skipped == 0 {
        bail!("no data rows after the header");
    }
    Ok((rows, skipped))
}

fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn extract_json(content: &str) -> Result<(Vec<DatasetRow>, usize)> {
    let trimmed = content.trim_start_matches('\u{FEFF}').trim();
    if trimmed.is_empty() {
        bail!("file is empty");
    }
    let value: Value = serde_json::from_str(trimmed).context("invalid JSON")?;
    let items = value
        .as_array()
        .ok_or_else(|| anyhow!("JSON root must be an array of objects"))?;
    if items.is_empty() {
        bail!("JSON array is empty");
    }

    let has_text_key = items
        .iter()
        .filter_map(Value::as_object)
        .any(|o| o.keys().any(|k| column_for(k) == Some(Column::Text)));
    if !has_text_key {
        bail!("no object has a `text` key");
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for item in items {
        let Some(obj) = item.as_object() else {
            skipped += 1;
            continue;
        };
        let mut row = DatasetRow::default();
        for (k, v) in obj {
            if let (Some(col), Some(s)) = (column_for(k), scalar_to_string(v)) {
                row.set(col, &s);
            }
        }
        if row.text.is_empty() {
            skipped += 1;
        } else {
            rows.push(row);
        }
    }
    Ok((rows, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "ID,Date,Region,Source,User,text,Aspect_Category,Keywords_Extracted\n\
1,2024-01-02,Jakarta,Twitter,@a,Gesits irit banget,Price,irit\n\
2,2024-01-03,Bandung,Tiktok,@b,  ,Product,\n\
3,,,,,\"Viar Q1, mantap\",,\n";

    #[test]
    fn full_schema_csv() {
        let r = parse_csv_dataset(FULL);
        assert!(r.success, "{:?}", r.error);
        assert_eq!(r.valid_count, 2);
        assert_eq!(r.skipped_count, 1);
        assert_eq!(r.rows.len(), r.valid_count);
        let first = &r.rows[0];
        assert_eq!(first.id.as_deref(), Some("1"));
        assert_eq!(first.region.as_deref(), Some("Jakarta"));
        assert_eq!(first.aspect_category.as_deref(), Some("Price"));
        assert_eq!(first.text, "Gesits irit banget");
        let third = &r.rows[1];
        assert_eq!(third.text, "Viar Q1, mantap");
        assert_eq!(third.date, None);
    }

    #[test]
    fn header_matching_ignores_case_and_whitespace() {
        let r = parse_csv_dataset(" TEXT , Aspect Category\nhalo,Price\n");
        assert!(r.success);
        assert_eq!(r.rows[0].text, "halo");
        assert_eq!(r.rows[0].aspect_category.as_deref(), Some("Price"));
    }

    #[test]
    fn missing_text_column_fails() {
        let r = parse_csv_dataset("id,content\n1,halo\n");
        assert!(!r.success);
        assert_eq!(r.valid_count, 0);
        assert!(r.error.unwrap().contains("text"));
    }

    #[test]
    fn empty_and_header_only_files_fail() {
        for input in ["", "\u{FEFF}", "\n\n", "text\n"] {
            let r = parse_csv_dataset(input);
            assert!(!r.success, "input {input:?} should fail");
            assert!(r.error.is_some());
        }
    }

    #[test]
    fn all_rows_empty_text_fails_but_counts_skips() {
        let r = parse_csv_dataset("id,text\n1,\n2,   \n");
        assert!(!r.success);
        assert_eq!(r.skipped_count, 2);
        assert_eq!(r.valid_count, 0);
    }

    #[test]
    fn short_rows_are_skipped_when_text_column_missing() {
        let r = parse_csv_dataset("id,text\n1\n2,ok\n");
        assert!(r.success);
        assert_eq!((r.valid_count, r.skipped_count), (1, 1));
    }

    #[test]
    fn blank_lines_are_not_records() {
        let r = parse_csv_dataset("text\na\n\nb\n\n");
        assert_eq!((r.valid_count, r.skipped_count), (2, 0));
    }

    #[test]
    fn blank_lines_before_header_are_ignored() {
        let r = parse_csv_dataset("\n\r\n   \nid,text\n1,Gesits mantap\n");
        assert!(r.success, "{:?}", r.error);
        assert_eq!((r.valid_count, r.skipped_count), (1, 0));
        assert_eq!(r.rows[0].text, "Gesits mantap");
        assert_eq!(r.rows[0].id.as_deref(), Some("1"));

        let r = parse_csv_dataset("\n\n\n");
        assert_eq!(r.error.as_deref(), Some("file is empty"));
    }

    #[test]
    fn duplicate_text_keys_keep_the_non_empty_value() {
        for input in [
            r#"[{"Text":"Gesits mantap","text":""}]"#,
            r#"[{"text":"","Text":"Gesits mantap"}]"#,
            r#"[{"TEXT":"Gesits mantap","text":"   "}]"#,
        ] {
            let r = parse_json_dataset(input);
            assert!(r.success, "input {input:?}: {:?}", r.error);
            assert_eq!((r.valid_count, r.skipped_count), (1, 0), "input {input:?}");
            assert_eq!(r.rows[0].text, "Gesits mantap");
        }

        let r = parse_csv_dataset("text,Text\n,Viar Q1\n");
        assert_eq!(r.valid_count, 1);
        assert_eq!(r.rows[0].text, "Viar Q1");
    }

    #[test]
    fn json_any_casing_and_skips() {
        let r = parse_json_dataset(
            r#"[{"TEXT":"Selis oke","Region":"Medan"},{"Text":""},{"id":3},42,{"text":"  Alva One  ","ID":7}]"#,
        );
        assert!(r.success, "{:?}", r.error);
        assert_eq!(r.valid_count, 2);
        assert_eq!(r.skipped_count, 3);
        assert_eq!(r.rows[0].region.as_deref(), Some("Medan"));
        assert_eq!(r.rows[1].text, "Alva One");
        assert_eq!(r.rows[1].id.as_deref(), Some("7"));
    }

    #[test]
    fn json_failures() {
        let cases = [
            "",
            "not json",
            r#"{"text":"x"}"#,
            "[]",
            r#"[{"content":"x"}]"#,
        ];
        for c in cases {
            let r = parse_json_dataset(c);
            assert!(!r.success, "input {c:?} should fail");
            assert_eq!(r.valid_count, 0);
            assert!(r.error.is_some());
        }
    }

    #[test]
    fn json_invalid_reports_context() {
        let r = parse_json_dataset("[1,");
        assert!(r.error.unwrap().starts_with("invalid JSON"));
    }
}
