//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::criteria::{FilterCriteria, GenreChoice};
use crate::filters::{DurationFilter, GenreFilter, MinimumRatingFilter, PlatformFilter, YearRangeFilter};
use crate::traits::Filter;
use data_loader::Movie;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// All filters are conjunctive: a movie survives the pipeline only if every
/// filter matches it. Since the filters are independent, their order does
/// not change the result, only the intermediate counts in the logs.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(GenreFilter::new("Drama"))
///     .add_filter(MinimumRatingFilter::new(7.0));
///
/// let survivors = pipeline.apply(movies.iter().collect());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Build the standard recommendation chain for a criteria value.
    ///
    /// Genre and platform filters are only added when the criteria select
    /// something; year, rating and duration filters are always present.
    /// A blank named genre selects every genre.
    pub fn for_criteria(criteria: &FilterCriteria) -> Self {
        let mut pipeline = Self::new();
        if let GenreChoice::Named(genre) = &criteria.genre {
            if !genre.trim().is_empty() {
                pipeline = pipeline.add_filter(GenreFilter::new(genre));
            }
        }
        pipeline = pipeline
            .add_filter(YearRangeFilter::new(criteria.year_range))
            .add_filter(MinimumRatingFilter::new(criteria.min_rating))
            .add_filter(DurationFilter::new(criteria.duration));
        if let Some(platform) = &criteria.platform {
            pipeline = pipeline.add_filter(PlatformFilter::new(platform));
        }
        pipeline
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Whether one movie passes every filter
    pub fn matches(&self, movie: &Movie) -> bool {
        self.filters.iter().all(|f| f.matches(movie))
    }

    /// Apply all filters in sequence to the movies.
    ///
    /// ## Algorithm
    /// 1. Start with the input movies
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return the survivors, in their original relative order
    pub fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        let mut current = movies;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
