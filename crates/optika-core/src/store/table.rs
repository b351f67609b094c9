//! Delimited-text encoding shared by every table.
//!
//! The format is RFC-4180-style CSV: comma separated, fields quoted when
//! they contain a comma, quote, or line break, embedded quotes doubled.
//! Note bodies span lines, so the parser tracks quoting across line breaks
//! instead of splitting the file on newlines.

use std::fs;
use std::io::Write;
use std::path::Path;

use super::{StoreError, StoreResult};

/// Parse a whole table: records of fields, blank lines skipped.
fn parse(input: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => record.push(std::mem::take(&mut field)),
                '\r' => {} // swallowed; '\n' ends the record
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                _ => field.push(c),
            }
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    records
        .into_iter()
        .filter(|r| r.iter().any(|f| !f.is_empty()))
        .collect()
}

/// Quote a field when it contains the delimiter, a quote, or a line break.
fn escape_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Encode one record as a terminated line.
fn format_record<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// Read a table file: header row plus data records.
pub fn read_table(path: &Path) -> StoreResult<(Vec<String>, Vec<Vec<String>>)> {
    let text = fs::read_to_string(path)?;
    let mut records = parse(&text).into_iter();
    let header = records.next().ok_or_else(|| StoreError::Malformed {
        file: path.display().to_string(),
        record: 0,
        reason: "missing header row".into(),
    })?;
    Ok((header, records.collect()))
}

/// Rewrite a table: the whole file is assembled in memory, written to a
/// sibling temp file, synced, then renamed over the original so an
/// interrupted write leaves the previous contents intact.
pub fn write_table<S: AsRef<str>>(
    path: &Path,
    header: &[S],
    rows: &[Vec<String>],
) -> StoreResult<()> {
    let mut out = format_record(header);
    for row in rows {
        out.push_str(&format_record(row));
    }

    let tmp = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(out.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Create a table file with just its header row if it does not exist yet.
pub fn ensure_table<S: AsRef<str>>(path: &Path, header: &[S]) -> StoreResult<()> {
    if !path.exists() {
        write_table(path, header, &[])?;
        tracing::info!(file = %path.display(), "table created");
    }
    Ok(())
}

/// Field accessor tolerant of short legacy rows: missing columns read as "".
pub fn field(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}
