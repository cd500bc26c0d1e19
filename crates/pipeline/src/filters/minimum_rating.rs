//! Filter to ensure minimum quality threshold.
//!
//! Removes movies rated below the user's chosen minimum, ensuring we only
//! recommend content the user is likely to enjoy.

use crate::traits::Filter;
use data_loader::Movie;

/// Removes movies below the rating threshold.
///
/// ## Algorithm
/// For each movie:
/// 1. Read its parsed rating
/// 2. Keep it only if a rating exists and `rating >= min_rating`
pub struct MinimumRatingFilter {
    min_rating: f32,
}

impl MinimumRatingFilter {
    /// Create a new MinimumRatingFilter.
    ///
    /// # Arguments
    /// * `min_rating` - Minimum rating, inclusive (the dashboard slider uses 1.0-10.0)
    pub fn new(min_rating: f32) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn matches(&self, movie: &Movie) -> bool {
        movie.rating.is_some_and(|rating| rating >= self.min_rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, rating: Option<f32>) -> Movie {
        Movie {
            rating,
            ..Movie::new(title)
        }
    }

    #[test]
    fn test_minimum_rating_filter() {
        let movies = vec![
            movie("High Rated Movie", Some(8.5)),
            movie("Exactly At Threshold", Some(7.0)),
            movie("Low Rated Movie", Some(6.9)),
            movie("Unrated Movie", None),
        ];

        let filter = MinimumRatingFilter::new(7.0);
        let filtered = filter.apply(movies.iter().collect());

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].title, "High Rated Movie");
        assert_eq!(filtered[1].title, "Exactly At Threshold");
    }

    #[test]
    fn test_zero_threshold_still_requires_a_rating() {
        let filter = MinimumRatingFilter::new(0.0);
        assert!(filter.matches(&movie("Zero", Some(0.0))));
        assert!(!filter.matches(&movie("Unrated", None)));
    }
}
