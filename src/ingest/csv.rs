//! RFC4180 tokenizer.
//!
//! Character-by-character with an `inside_quotes` flag:
//! - `"` toggles quote mode; `""` inside quotes is a literal `"`;
//! - outside quotes `,` ends a field and `\r\n`, `\n` or `\r` ends a row
//!   (CRLF counts once);
//! - inside quotes everything, newlines and commas included, is literal.
//!
//! The last field/row is flushed without a trailing terminator, and a final
//! terminator never produces an extra empty row.

use serde::Serialize;

const BOM: char = '\u{FEFF}';

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CsvStats {
    pub row_count: usize,
    /// Widest row seen.
    pub max_fields: usize,
    pub bom_stripped: bool,
    /// Input ended while still inside a quoted field.
    pub unterminated_quote: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CsvTable {
    pub rows: Vec<Vec<String>>,
    pub stats: CsvStats,
}

/// Tokenize `content` into rows of fields.
pub fn parse_rfc4180(content: &str) -> CsvTable {
    let (input, bom_stripped) = match content.strip_prefix(BOM) {
        Some(rest) => (rest, true),
        None => (content, false),
    };

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut inside_quotes = false;
    // true once the current row consumed anything (even an empty quoted field)
    let mut row_started = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if inside_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    inside_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' => {
                inside_quotes = true;
                row_started = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                row_started = true;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                row_started = false;
            }
            _ => {
                field.push(c);
                row_started = true;
            }
        }
    }

    if row_started || !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    let stats = CsvStats {
        row_count: rows.len(),
        max_fields: rows.iter().map(Vec::len).max().unwrap_or(0),
        bom_stripped,
        unterminated_quote: inside_quotes,
    };
    CsvTable { rows, stats }
}
