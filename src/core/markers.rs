//! CSV marker extraction.
//!
//! A marker row is a data row whose value in the chosen column is a
//! non-negative integer. Rows are enumerated with the header at index 0, so
//! marker rows are 1-based positions among the data rows. Blank rows are
//! counted but never recorded.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::core::error::EditError;

static MARKER_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("static marker regex"));

/// Result of one marker scan; consumed by the alignment engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerSet
{
    /// Raw rows after newline normalization, header included
    pub rows: Vec<String>,

    /// 1-based row indices of marker rows, strictly increasing
    pub marker_rows: Vec<usize>,

    /// Parsed integer values, parallel to `marker_rows`
    pub marker_values: Vec<u64>,

    /// `rows.len() - 2`: excludes the header and the trailing row
    pub total_data_rows: usize,
}

impl MarkerSet
{
    pub fn len(&self) -> usize
    {
        self.marker_rows
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.marker_rows
            .is_empty()
    }

    /// Largest marker row, 0 when there are none
    pub fn max_row(&self) -> usize
    {
        self.marker_rows
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
    }
}

/// Split one CSV line into fields.
///
/// Double quotes toggle quoting, a doubled quote inside quotes yields a
/// literal quote, and commas only split outside quotes. Quote characters are
/// dropped from the field text.
pub fn parse_csv_line(line: &str) -> Vec<String>
{
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line
        .chars()
        .peekable();

    while let Some(c) = chars.next()
    {
        match c
        {
            '"' if in_quotes && chars.peek() == Some(&'"') =>
            {
                cur.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut cur)),
            _ => cur.push(c),
        }
    }

    fields.push(cur);
    fields
}

/// Normalize `\r\n` and lone `\r` to `\n` and split into rows
fn split_rows(text: &str) -> Vec<String>
{
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::to_owned)
        .collect()
}

/// Locate `column` in `text`'s header and collect its marker rows.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn extract_markers(
    text: &str,
    column: &str,
) -> Result<MarkerSet, EditError>
{
    let rows = split_rows(text);
    if rows.len() < 2
    {
        return Err(EditError::EmptyOrHeaderOnlyCsv);
    }

    let col = parse_csv_line(&rows[0])
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| EditError::ColumnNotFound { column: column.to_string() })?;

    let mut marker_rows = Vec::new();
    let mut marker_values = Vec::new();

    for (r, line) in rows
        .iter()
        .enumerate()
        .skip(1)
    {
        if line
            .trim()
            .is_empty()
        {
            continue;
        }

        let fields = parse_csv_line(line);
        let Some(raw) = fields.get(col)
        else
        {
            continue;
        };

        let value = raw.trim();
        if !MARKER_VALUE.is_match(value)
        {
            continue;
        }

        // Digits that overflow u64 are not usable as markers
        if let Ok(v) = value.parse::<u64>()
        {
            marker_rows.push(r);
            marker_values.push(v);
        }
    }

    let total_data_rows = rows
        .len()
        .saturating_sub(2);

    debug!(markers = marker_rows.len(), total_data_rows, "csv markers extracted");

    Ok(MarkerSet { rows, marker_rows, marker_values, total_data_rows })
}
