//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible predicates to be applied to a movie table.

use data_loader::Movie;

/// Core trait for filtering movies.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows a pipeline to be shared between request handlers
/// - Filters work on borrowed rows (`&Movie`), so the loaded table is never
///   copied or mutated while filtering
/// - A row whose field cannot be evaluated (e.g. no parsed year) does not
///   match; filtering itself cannot fail
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether a single movie survives this filter.
    fn matches(&self, movie: &Movie) -> bool;

    /// Apply this filter to a set of movies, keeping their relative order.
    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        movies
            .into_iter()
            .filter(|movie| self.matches(movie))
            .collect()
    }
}
