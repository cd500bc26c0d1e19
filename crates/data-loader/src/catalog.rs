//! The loaded dataset for one session.
//!
//! A [`Catalog`] is the explicit context object handed to the recommender
//! and the statistics code. It owns the [`LoadReport`] and the typed movie
//! table derived from `peliculas_completas`, and is read-only once built.

use crate::loader::{self, LoadReport};
use crate::parser;
use crate::registry::{DatasetRegistry, PELICULAS_COMPLETAS};
use crate::types::{MovieTable, Table};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct Catalog {
    report: LoadReport,
    movies: Option<MovieTable>,
}

impl Catalog {
    /// Load every registry entry from `data_dir` and build the movie table
    pub fn load(data_dir: &Path, registry: &DatasetRegistry) -> Self {
        Self::from_report(loader::load(data_dir, registry))
    }

    /// Build the typed movie table from an existing report.
    ///
    /// If `peliculas_completas` loaded but cannot be typed, its entry in the
    /// report is replaced by the failure so the status panel shows it.
    pub fn from_report(mut report: LoadReport) -> Self {
        let parsed = report.dataset(PELICULAS_COMPLETAS).map(|dataset| {
            parser::parse_movies(&dataset.table, &dataset.source.display().to_string())
        });

        let movies = match parsed {
            Some(Ok(movies)) => {
                info!("Movie table ready with {} movies", movies.len());
                Some(movies)
            }
            Some(Err(err)) => {
                warn!("Movie table unusable: {}", err);
                report.record_failure(PELICULAS_COMPLETAS, err);
                None
            }
            None => None,
        };

        Self { report, movies }
    }

    /// A catalog holding only an in-memory movie table
    pub fn from_movies(movies: MovieTable) -> Self {
        Self {
            report: LoadReport::default(),
            movies: Some(movies),
        }
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// The typed complete-movies table, or `None` when it is unavailable
    pub fn movies(&self) -> Option<&MovieTable> {
        self.movies.as_ref()
    }

    pub fn table(&self, key: &str) -> Option<&Table> {
        self.report.table(key)
    }
}
