//! Dashboard statistics and chart-ready series.
//!
//! Nothing here draws. Each function shapes loaded data into the rows or
//! `(label, value)` points a chart or table widget consumes.

use data_loader::parser::parse_amount;
use data_loader::registry::{RECAUDACION_PELICULAS, TITLE_COLUMNS, TOP_10_MAS_VISTAS, TOP_10_MEJOR_PUNTUADAS};
use data_loader::{Catalog, DataLoadError, LoadedDataset, Movie, MovieTable};
use serde::Serialize;
use std::collections::BTreeSet;

/// Rows shown in each "top" list
pub const TOP_N: usize = 10;
/// A movie needs this many votes to enter the best-rated list
pub const TOP_RATED_MIN_VOTES: u64 = 100;

/// Headline numbers for the home page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub movie_count: Option<usize>,
    pub most_viewed_count: Option<usize>,
    pub top_rated_count: Option<usize>,
    pub datasets_loaded: usize,
    pub datasets_failed: usize,
}

impl DashboardSummary {
    /// `None` counts mean the dataset is not loaded
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let report = catalog.report();
        Self {
            movie_count: catalog.movies().map(MovieTable::len),
            most_viewed_count: catalog.table(TOP_10_MAS_VISTAS).map(|t| t.len()),
            top_rated_count: catalog.table(TOP_10_MEJOR_PUNTUADAS).map(|t| t.len()),
            datasets_loaded: report.succeeded().count(),
            datasets_failed: report.failed().count(),
        }
    }
}

/// Movies with the most votes first; movies without a vote count are left out
pub fn most_viewed(movies: &MovieTable, n: usize) -> Vec<&Movie> {
    let mut ranked: Vec<&Movie> = movies.iter().filter(|m| m.votes.is_some()).collect();
    ranked.sort_by(|a, b| b.votes.cmp(&a.votes));
    ranked.truncate(n);
    ranked
}

/// Best-rated movies among those with at least `min_votes` votes
pub fn top_rated(movies: &MovieTable, min_votes: u64, n: usize) -> Vec<&Movie> {
    let mut ranked: Vec<&Movie> = movies
        .iter()
        .filter(|m| m.rating.is_some() && m.votes.is_some_and(|v| v >= min_votes))
        .collect();
    ranked.sort_by(|a, b| {
        let (a, b) = (a.rating.unwrap_or(f32::MIN), b.rating.unwrap_or(f32::MIN));
        b.total_cmp(&a)
    });
    ranked.truncate(n);
    ranked
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// A bar chart's data: points sorted by value, largest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label_column: String,
    pub value_column: String,
    pub points: Vec<ChartPoint>,
}

/// Build a bar series from two columns of a loaded table.
///
/// The label column is the first of `label_aliases` present. Values are
/// counts or money, so commas are thousands separators and a leading `$`
/// is ignored. Rows whose value does not parse are skipped.
pub fn bar_series(
    dataset: &LoadedDataset,
    label_aliases: &[&str],
    value_column: &str,
    n: usize,
) -> Result<ChartSeries, DataLoadError> {
    let table = &dataset.table;
    let missing = |column: String| DataLoadError::ColumnMissing {
        file: dataset.source.display().to_string(),
        column,
    };
    let label_idx = table
        .find_column(label_aliases)
        .ok_or_else(|| missing(label_aliases.join("|")))?;
    let value_idx = table
        .column_index(value_column)
        .ok_or_else(|| missing(value_column.to_string()))?;

    let mut points: Vec<ChartPoint> = table
        .rows()
        .iter()
        .filter_map(|row| {
            let value = parse_amount(&row[value_idx])?;
            Some(ChartPoint {
                label: row[label_idx].clone(),
                value,
            })
        })
        .collect();
    points.sort_by(|a, b| b.value.total_cmp(&a.value));
    points.truncate(n);

    Ok(ChartSeries {
        label_column: table.headers()[label_idx].clone(),
        value_column: table.headers()[value_idx].clone(),
        points,
    })
}

/// Views per movie from `top_10_mas_vistas`; `None` if that table is not loaded
pub fn most_viewed_series(catalog: &Catalog) -> Option<Result<ChartSeries, DataLoadError>> {
    let dataset = catalog.report().dataset(TOP_10_MAS_VISTAS)?;
    Some(bar_series(dataset, TITLE_COLUMNS, "vistas", TOP_N))
}

/// Box office per movie from `recaudacion_peliculas`; `None` if not loaded
pub fn box_office_series(catalog: &Catalog) -> Option<Result<ChartSeries, DataLoadError>> {
    let dataset = catalog.report().dataset(RECAUDACION_PELICULAS)?;
    Some(bar_series(dataset, TITLE_COLUMNS, "recaudacion", TOP_N))
}

/// Distinct genres, sorted, for the genre selector
pub fn genre_options(movies: &MovieTable) -> Vec<String> {
    movies
        .iter()
        .flat_map(|m| m.genres.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct platforms (`donde_ver`), sorted, for the platform selector
pub fn platform_options(movies: &MovieTable) -> Vec<String> {
    movies
        .iter()
        .filter_map(|m| m.where_to_watch.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
