//! # Recommendation
//!
//! Turns a criteria value into a ranked list of movies:
//! 1. Build the filter chain for the criteria
//! 2. Apply it to the loaded movie table
//! 3. Stable-sort the survivors by rating, highest first
//! 4. Keep the first `limit`
//!
//! The function is pure: it borrows the table, never mutates it, and
//! returns owned copies of the selected rows.

use crate::criteria::FilterCriteria;
use crate::filter_pipeline::FilterPipeline;
use data_loader::{Catalog, Movie, MovieTable};
use serde::Serialize;
use tracing::{info, warn};

/// Result cap used when the caller does not pick one
pub const DEFAULT_LIMIT: usize = 5;

/// One recommended movie, as handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub director: Option<String>,
    pub year: i32,
    pub rating: f32,
    pub duration: Option<f32>,
    pub lead_actor: Option<String>,
    pub genres: Vec<String>,
    pub where_to_watch: Option<String>,
}

impl Recommendation {
    /// Copy the displayed fields out of a movie; `None` without year or rating
    fn from_movie(movie: &Movie) -> Option<Self> {
        Some(Self {
            title: movie.title.clone(),
            director: movie.director.clone(),
            year: movie.year?,
            rating: movie.rating?,
            duration: movie.duration,
            lead_actor: movie.lead_actor.clone(),
            genres: movie.genres.clone(),
            where_to_watch: movie.where_to_watch.clone(),
        })
    }

    /// Names the rendering layer can turn into portrait file names
    pub fn people(&self) -> Vec<&str> {
        self.director
            .iter()
            .chain(self.lead_actor.iter())
            .map(String::as_str)
            .collect()
    }
}

/// What a recommendation request produced.
///
/// "No match" and "no data" are both normal outcomes, kept apart so the
/// page can show the right message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "recommendations", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    /// At least one movie matched; at most `limit` of them, best first.
    /// The list is empty only when `limit` is 0.
    Ranked(Vec<Recommendation>),
    /// The table was available but nothing matched the criteria
    NoMatch,
    /// The complete-movies table was not loaded
    DataUnavailable,
}

impl RecommendationOutcome {
    /// The ranked movies; empty for `NoMatch` and `DataUnavailable`
    pub fn recommendations(&self) -> &[Recommendation] {
        match self {
            RecommendationOutcome::Ranked(list) => list.as_slice(),
            RecommendationOutcome::NoMatch | RecommendationOutcome::DataUnavailable => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.recommendations().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations().is_empty()
    }
}

/// Filter `movies` by `criteria` and return the top `limit` by rating.
///
/// Ties keep the order of the input table.
pub fn recommend(
    movies: Option<&MovieTable>,
    criteria: &FilterCriteria,
    limit: usize,
) -> RecommendationOutcome {
    let Some(movies) = movies else {
        warn!("Recommendation requested but the movie table is not loaded");
        return RecommendationOutcome::DataUnavailable;
    };

    let pipeline = FilterPipeline::for_criteria(criteria);
    let mut survivors = pipeline.apply(movies.iter().collect());
    info!(
        "{} of {} movies match genre={} years={}..={} min_rating={} duration={}",
        survivors.len(),
        movies.len(),
        criteria.genre,
        criteria.year_range.min,
        criteria.year_range.max,
        criteria.min_rating,
        criteria.duration
    );

    if survivors.is_empty() {
        return RecommendationOutcome::NoMatch;
    }

    // `sort_by` is stable, so equal ratings keep their table order
    survivors.sort_by(|a, b| rating_key(b).total_cmp(&rating_key(a)));

    let ranked = survivors
        .into_iter()
        .filter_map(Recommendation::from_movie)
        .take(limit)
        .collect();
    RecommendationOutcome::Ranked(ranked)
}

/// [`recommend`] against a session's catalog
pub fn recommend_from_catalog(
    catalog: &Catalog,
    criteria: &FilterCriteria,
    limit: usize,
) -> RecommendationOutcome {
    recommend(catalog.movies(), criteria, limit)
}

fn rating_key(movie: &Movie) -> f32 {
    movie.rating.unwrap_or(f32::NEG_INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{DurationBucket, GenreChoice};

    fn movie(title: &str, year: i32, rating: f32) -> Movie {
        Movie {
            year: Some(year),
            rating: Some(rating),
            duration: Some(100.0),
            genres: vec!["Drama".to_string()],
            ..Movie::new(title)
        }
    }

    #[test]
    fn test_data_unavailable() {
        let outcome = recommend(None, &FilterCriteria::default(), DEFAULT_LIMIT);
        assert_eq!(outcome, RecommendationOutcome::DataUnavailable);
        assert!(outcome.recommendations().is_empty());
    }

    #[test]
    fn test_ties_keep_table_order() {
        let table = MovieTable::new(vec![
            movie("First", 2000, 7.0),
            movie("Best", 2000, 9.0),
            movie("Second", 2000, 7.0),
            movie("Third", 2000, 7.0),
        ]);

        let outcome = recommend(Some(&table), &FilterCriteria::default(), 10);
        let titles: Vec<&str> = outcome.recommendations().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Best", "First", "Second", "Third"]);
    }

    #[test]
    fn test_limit_caps_output() {
        let table = MovieTable::new((0..20).map(|i| movie(&format!("M{}", i), 2000, i as f32 / 2.0)).collect());

        let outcome = recommend(Some(&table), &FilterCriteria::default(), 3);
        assert_eq!(outcome.len(), 3);
        assert_eq!(outcome.recommendations()[0].title, "M19");
    }

    #[test]
    fn test_zero_limit_still_reports_a_match() {
        let table = MovieTable::new(vec![movie("X", 2010, 8.0)]);

        let outcome = recommend(Some(&table), &FilterCriteria::default(), 0);
        assert_eq!(outcome, RecommendationOutcome::Ranked(Vec::new()));
        assert!(outcome.is_empty());

        let criteria = FilterCriteria::new(GenreChoice::All, (2000, 2020), 9.0, DurationBucket::Any).unwrap();
        assert_eq!(recommend(Some(&table), &criteria, 0), RecommendationOutcome::NoMatch);
    }

    #[test]
    fn test_source_table_is_untouched() {
        let table = MovieTable::new(vec![movie("Low", 2000, 5.0), movie("High", 2000, 9.0)]);
        let before = table.clone();

        recommend(Some(&table), &FilterCriteria::default(), 10);
        assert_eq!(table, before);
    }

    #[test]
    fn test_people_for_portraits() {
        let mut m = movie("X", 2010, 8.0);
        m.director = Some("Dir Uno".to_string());
        m.lead_actor = Some("Actor Uno".to_string());
        let table = MovieTable::new(vec![m]);

        let criteria = FilterCriteria::new(GenreChoice::All, (2000, 2020), 0.0, DurationBucket::Any).unwrap();
        let outcome = recommend(Some(&table), &criteria, DEFAULT_LIMIT);
        assert_eq!(outcome.recommendations()[0].people(), vec!["Dir Uno", "Actor Uno"]);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(RecommendationOutcome::NoMatch).unwrap();
        assert_eq!(json["status"], "no_match");

        let table = MovieTable::new(vec![movie("X", 2010, 8.0)]);
        let outcome = recommend(Some(&table), &FilterCriteria::default(), 1);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "ranked");
        assert_eq!(json["recommendations"][0]["title"], "X");
    }
}
