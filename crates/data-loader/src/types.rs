//! Core data types for the movie dashboard.
//!
//! Two layers live here:
//! - [`Table`]: an untyped CSV table exactly as it was read (header + rows)
//! - [`Movie`] / [`MovieTable`]: typed records built once from the
//!   complete-movies table, so filters never index cells by column name

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// =============================================================================
// Untyped tables
// =============================================================================

/// An immutable CSV table: named columns and ordered rows of string cells.
///
/// Every row has exactly `headers.len()` cells; the parser pads short rows
/// before building a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, padding short rows with empty cells and dropping extra cells
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (the header is not counted)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, matched case-insensitively on the trimmed name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.headers
            .iter()
            .position(|h| h.trim().to_lowercase() == wanted)
    }

    /// Position of the first alias that names a column in this table
    pub fn find_column<S: AsRef<str>>(&self, aliases: &[S]) -> Option<usize> {
        aliases
            .iter()
            .find_map(|alias| self.column_index(alias.as_ref()))
    }

    /// Cell at `(row, column)`, or `None` when out of bounds
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// All cells of a named column, top to bottom
    pub fn column_values(&self, name: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_str()))
    }
}

/// A table together with the physical file it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedDataset {
    /// Resolved path of the candidate that won
    pub source: PathBuf,
    pub table: Table,
}

// =============================================================================
// Typed movie records
// =============================================================================

/// One row of the complete-movies table.
///
/// Numeric cells that fail to parse become `None`; the filters treat a
/// `None` as "does not match" instead of failing the whole request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: Option<i32>,
    /// Score on the dataset's own scale (0-10 in practice)
    pub rating: Option<f32>,
    /// Running time in minutes
    pub duration: Option<f32>,
    /// One entry per genre; multi-genre cells are split by the parser
    pub genres: Vec<String>,
    pub director: Option<String>,
    pub lead_actor: Option<String>,
    pub votes: Option<u64>,
    pub where_to_watch: Option<String>,
}

impl Movie {
    /// Minimal record, handy for building tables in code
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            rating: None,
            duration: None,
            genres: Vec::new(),
            director: None,
            lead_actor: None,
            votes: None,
            where_to_watch: None,
        }
    }
}

/// The validated, typed view of `peliculas_completas`.
///
/// Built once per load and never mutated; consumers borrow `&Movie`s and
/// copy out whatever they return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieTable {
    movies: Vec<Movie>,
}

impl MovieTable {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.movies.iter()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

impl<'a> IntoIterator for &'a MovieTable {
    type Item = &'a Movie;
    type IntoIter = std::slice::Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(
            vec!["Pelicula".to_string(), " año ".to_string(), "rating".to_string()],
            vec![
                vec!["X".to_string(), "2010".to_string(), "8.5".to_string()],
                vec!["Y".to_string(), "2019".to_string()],
            ],
        )
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = sample_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 2), Some(""));
        assert_eq!(table.cell(5, 0), None);
    }

    #[test]
    fn test_column_lookup_ignores_case_and_padding() {
        let table = sample_table();
        assert_eq!(table.column_index("pelicula"), Some(0));
        assert_eq!(table.column_index("AÑO"), Some(1));
        assert_eq!(table.find_column(&["titulo", "pelicula"]), Some(0));
        assert!(table.column_index("duracion").is_none());
    }

    #[test]
    fn test_column_values() {
        let table = sample_table();
        let years: Vec<&str> = table.column_values("año").unwrap().collect();
        assert_eq!(years, vec!["2010", "2019"]);
    }
}
