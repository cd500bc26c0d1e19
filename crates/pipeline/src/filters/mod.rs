//! Filter implementations for the recommendation pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod duration;
pub mod genre;
pub mod minimum_rating;
pub mod platform;
pub mod year_range;

// Re-export for convenience
pub use duration::DurationFilter;
pub use genre::GenreFilter;
pub use minimum_rating::MinimumRatingFilter;
pub use platform::PlatformFilter;
pub use year_range::YearRangeFilter;
