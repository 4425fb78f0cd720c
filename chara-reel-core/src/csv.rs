//! Minimal CSV tokenizer for sheet exports and the normalized video list.
//!
//! Quoting, embedded separators/newlines and `""` escapes are handled by the
//! `csv` crate; this module adds the header/record shaping the sources need.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::CsvError;

/// Parsed CSV with a lowercased header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    /// Header names, trimmed and lowercased
    pub headers: Vec<String>,
    /// One map per data row, keyed by header. Values are trimmed.
    pub records: Vec<HashMap<String, String>>,
}

impl CsvTable {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Drop carriage returns outside quoted fields. Only `\n` ends a row, so
/// `a,b\rc` is the two fields `a` and `bc`.
fn strip_carriage_returns(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    let mut in_quotes = false;
    let stripped = text
        .chars()
        .filter(|&c| {
            if c == '"' {
                in_quotes = !in_quotes;
            }
            c != '\r' || in_quotes
        })
        .collect();
    Cow::Owned(stripped)
}

/// Split CSV text into raw rows. Field values are returned untrimmed.
///
/// Rows may have differing lengths. Blank lines produce no row, and a final
/// row without a trailing newline is still emitted.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let text = strip_carriage_returns(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping malformed CSV row: {e}");
                continue;
            }
        };
        rows.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }
    rows
}

/// Parse CSV text into a header row plus keyed records.
///
/// Fields missing at the end of a short row map to `""`; extra fields beyond
/// the header are dropped. If two headers share a name, the later column wins.
pub fn parse_table(text: &str) -> CsvTable {
    let mut rows = parse_rows(text).into_iter();
    let Some(header_row) = rows.next() else {
        return CsvTable::default();
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let records = rows
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(idx, h)| {
                    let value = row.get(idx).map(|v| v.trim()).unwrap_or("");
                    (h.clone(), value.to_string())
                })
                .collect()
        })
        .collect();

    CsvTable { headers, records }
}

/// Serialize rows as CSV text, quoting fields only where needed.
pub fn write_rows<I, R, F>(rows: I) -> Result<String, CsvError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CsvError::write(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CsvError::write(e.to_string()))
}

#[cfg(test)]
#[path = "tests/csv_tests.rs"]
mod tests;
