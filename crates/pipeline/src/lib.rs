//! Filtering and ranking for the movie dashboard.
//!
//! This crate provides:
//! - FilterCriteria, the user's selector values for one request
//! - Filter trait and implementations, one per predicate
//! - FilterPipeline for composing filters
//! - recommend, which filters, ranks by rating and caps the result
//! - stats, the dashboard's summary numbers and chart series
//!
//! ## Architecture
//! A recommendation request runs in stages:
//! 1. The criteria are validated (no inverted year range, no NaN rating)
//! 2. The pipeline keeps movies matching every predicate
//! 3. Survivors are stable-sorted by rating, highest first
//! 4. The first `limit` rows are returned
//!
//! ## Example Usage
//! ```ignore
//! use data_loader::{Catalog, DatasetRegistry};
//! use pipeline::{recommend_from_catalog, DurationBucket, FilterCriteria, GenreChoice, DEFAULT_LIMIT};
//! use std::path::Path;
//!
//! let catalog = Catalog::load(Path::new("."), &DatasetRegistry::default());
//! let criteria = FilterCriteria::new(
//!     GenreChoice::Named("Drama".to_string()),
//!     (2000, 2023),
//!     7.0,
//!     DurationBucket::Any,
//! )?;
//!
//! let outcome = recommend_from_catalog(&catalog, &criteria, DEFAULT_LIMIT);
//! for rec in outcome.recommendations() {
//!     println!("{} ({}) {:.1}", rec.title, rec.year, rec.rating);
//! }
//! ```

pub mod criteria;
pub mod filter_pipeline;
pub mod filters;
pub mod recommend;
pub mod stats;
pub mod traits;

// Re-export main types
pub use criteria::{CriteriaError, DurationBucket, FilterCriteria, GenreChoice, YearRange};
pub use filter_pipeline::FilterPipeline;
pub use recommend::{
    recommend, recommend_from_catalog, Recommendation, RecommendationOutcome, DEFAULT_LIMIT,
};
pub use stats::{
    bar_series, box_office_series, genre_options, most_viewed, most_viewed_series,
    platform_options, top_rated, ChartPoint, ChartSeries, DashboardSummary, TOP_N,
    TOP_RATED_MIN_VOTES,
};
pub use traits::Filter;
