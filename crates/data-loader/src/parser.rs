//! Parser for the dashboard's CSV files.
//!
//! Two steps, each with its own failure kinds:
//! - [`read_table`]: bytes on disk -> untyped [`Table`] (empty / parse errors)
//! - [`parse_movies`]: untyped table -> typed [`MovieTable`] (missing columns)
//!
//! Cell-level problems (a rating of `"n/a"`, a blank year) never fail a
//! parse. They become `None` and the row simply stops matching filters.

use crate::error::{DataLoadError, Result};
use crate::registry::{RATING_COLUMNS, TITLE_COLUMNS};
use crate::types::{Movie, MovieTable, Table};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read a comma-separated file into a [`Table`].
///
/// - zero bytes or whitespace only (after a UTF-8 BOM) -> [`DataLoadError::EmptyFile`]
/// - unreadable file, invalid UTF-8, or a row wider than the header ->
///   [`DataLoadError::ParseError`]
/// - rows narrower than the header are padded with empty cells
/// - a header with no data rows is a valid (empty) table
pub fn read_table(path: &Path) -> Result<Table> {
    let file = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|e| DataLoadError::ParseError {
        file: file.clone(),
        reason: e.to_string(),
    })?;

    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes.as_slice());
    if content.iter().all(u8::is_ascii_whitespace) {
        return Err(DataLoadError::EmptyFile { path: file });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_parse_error(&file, &e))?
        .iter()
        .map(str::to_string)
        .collect();
    let width = headers.len();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_parse_error(&file, &e))?;
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(DataLoadError::ParseError {
                file,
                reason: format!(
                    "expected {} fields but found {} at line {}",
                    width,
                    record.len(),
                    line
                ),
            });
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(headers, rows))
}

fn csv_parse_error(file: &str, err: &csv::Error) -> DataLoadError {
    let reason = match err.position() {
        Some(pos) => format!("line {}: {}", pos.line(), err),
        None => err.to_string(),
    };
    DataLoadError::ParseError {
        file: file.to_string(),
        reason,
    }
}

/// Convert the complete-movies table into typed records.
///
/// Title, year, rating, duration and genre columns are required; director,
/// lead actor, votes and platform are optional.
pub fn parse_movies(table: &Table, file: &str) -> Result<MovieTable> {
    let title = require_column(table, file, TITLE_COLUMNS)?;
    let year = require_column(table, file, &["año"])?;
    let rating = require_column(table, file, RATING_COLUMNS)?;
    let duration = require_column(table, file, &["duracion"])?;
    let genre = require_column(table, file, &["genero"])?;

    let director = table.column_index("director");
    let lead_actor = table.column_index("actor_principal");
    let votes = table.column_index("votos");
    let where_to_watch = table.column_index("donde_ver");

    let movies = table
        .rows()
        .iter()
        .map(|row| Movie {
            title: row[title].clone(),
            year: parse_year(&row[year]),
            rating: parse_rating(&row[rating]),
            duration: parse_minutes(&row[duration]),
            genres: split_genres(&row[genre]),
            director: optional_text(row, director),
            lead_actor: optional_text(row, lead_actor),
            votes: votes.and_then(|i| parse_count(&row[i])),
            where_to_watch: optional_text(row, where_to_watch),
        })
        .collect();

    Ok(MovieTable::new(movies))
}

fn require_column(table: &Table, file: &str, aliases: &[&str]) -> Result<usize> {
    table
        .find_column(aliases)
        .ok_or_else(|| DataLoadError::ColumnMissing {
            file: file.to_string(),
            column: aliases.join("|"),
        })
}

fn optional_text(row: &[String], idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| non_empty(&row[i]))
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a numeric cell, accepting `"95 min"` and a decimal comma (`"8,5"`)
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let s = s.strip_suffix("min").unwrap_or(s).trim();
    if s.is_empty() {
        return None;
    }
    let value = s
        .parse::<f64>()
        .ok()
        .or_else(|| s.replace(',', ".").parse::<f64>().ok())?;
    value.is_finite().then_some(value)
}

/// Years must be whole numbers; pandas exports often write `2010.0`
fn parse_year(raw: &str) -> Option<i32> {
    let value = parse_number(raw)?;
    if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
        return None;
    }
    Some(value as i32)
}

fn parse_rating(raw: &str) -> Option<f32> {
    parse_number(raw).map(|v| v as f32)
}

/// Minutes are kept fractional; `89.6` is still under 90
fn parse_minutes(raw: &str) -> Option<f32> {
    let value = parse_number(raw)?;
    if value < 0.0 {
        return None;
    }
    Some(value as f32)
}

/// Parse a count or money cell: `"12,345"`, `"2_500_000"`, `"$1500"`.
///
/// Commas are thousands separators here, never a decimal comma.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    let value = cleaned.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

fn parse_count(raw: &str) -> Option<u64> {
    let value = parse_amount(raw)?;
    if value < 0.0 {
        return None;
    }
    Some(value.round() as u64)
}

/// Split a genre cell into individual genres.
///
/// Accepts the encodings found in the exports:
/// - `"Drama"`
/// - `"Drama, Crimen"` / `"Drama|Crimen"` / `"Drama/Crimen"`
/// - `"['Drama', 'Crimen']"` (a Python list literal)
pub fn split_genres(raw: &str) -> Vec<String> {
    raw.split(|c: char| matches!(c, ',' | '|' | '/' | ';'))
        .map(|part| {
            part.trim_matches(|c: char| c.is_whitespace() || matches!(c, '[' | ']' | '\'' | '"'))
        })
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
