//! Filter to keep only movies of the requested genre.
//!
//! A movie's genre cell may list several genres, so the test is membership
//! rather than equality.

use crate::traits::Filter;
use data_loader::Movie;

/// Keeps movies where any genre contains the requested one.
///
/// ## Algorithm
/// 1. Lowercase the requested genre once, at construction
/// 2. For each movie, lowercase each of its genres
/// 3. Keep the movie if any genre contains the requested text
pub struct GenreFilter {
    genre: String,
}

impl GenreFilter {
    pub fn new(genre: impl AsRef<str>) -> Self {
        Self {
            genre: genre.as_ref().trim().to_lowercase(),
        }
    }
}

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn matches(&self, movie: &Movie) -> bool {
        movie
            .genres
            .iter()
            .any(|genre| genre.to_lowercase().contains(&self.genre))
    }
}
