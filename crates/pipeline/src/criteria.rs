//! User-selected filter criteria.
//!
//! A [`FilterCriteria`] is built fresh for every recommendation request
//! from the selector values on the page (genre, year range, minimum
//! rating, duration bucket, and an optional platform).

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Movies shorter than this are [`DurationBucket::Short`]
pub const SHORT_BELOW_MINUTES: u32 = 90;
/// Movies longer than this are [`DurationBucket::Long`]
pub const LONG_ABOVE_MINUTES: u32 = 120;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CriteriaError {
    #[error("Year range is inverted: {min} > {max}")]
    InvertedYearRange { min: i32, max: i32 },

    #[error("Minimum rating must be a number, got {0}")]
    InvalidRating(f32),

    #[error("Unknown duration bucket '{0}' (expected any, short, medium or long)")]
    UnknownDuration(String),
}

/// Genre selector: a specific genre, or every genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenreChoice {
    All,
    Named(String),
}

impl FromStr for GenreChoice {
    type Err = CriteriaError;

    /// `""`, `"all"` and `"todos"` select every genre
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed.eq_ignore_ascii_case("todos")
        {
            Ok(GenreChoice::All)
        } else {
            Ok(GenreChoice::Named(trimmed.to_string()))
        }
    }
}

impl fmt::Display for GenreChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreChoice::All => f.write_str("all"),
            GenreChoice::Named(genre) => f.write_str(genre),
        }
    }
}

/// Running-time buckets with fixed boundaries at 90 and 120 minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationBucket {
    #[default]
    Any,
    /// Under 90 minutes
    Short,
    /// 90 to 120 minutes, both inclusive
    Medium,
    /// Over 120 minutes
    Long,
}

impl DurationBucket {
    /// Whether a running time falls in this bucket.
    ///
    /// `Any` accepts everything, including an unknown duration; every other
    /// bucket rejects an unknown duration.
    pub fn contains(self, minutes: Option<f32>) -> bool {
        let (short, long) = (SHORT_BELOW_MINUTES as f32, LONG_ABOVE_MINUTES as f32);
        match (self, minutes) {
            (DurationBucket::Any, _) => true,
            (_, None) => false,
            (DurationBucket::Short, Some(m)) => m < short,
            (DurationBucket::Medium, Some(m)) => (short..=long).contains(&m),
            (DurationBucket::Long, Some(m)) => m > long,
        }
    }
}

impl FromStr for DurationBucket {
    type Err = CriteriaError;

    /// Accepts the English names as well as the dashboard's own labels
    /// (`"Cualquiera"`, `"<90 min"`, `"90-120 min"`, `">120 min"`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let normalized = normalized.trim_end_matches("min").trim();
        match normalized {
            "" | "any" | "cualquiera" => Ok(DurationBucket::Any),
            "short" | "corta" | "<90" => Ok(DurationBucket::Short),
            "medium" | "media" | "90-120" => Ok(DurationBucket::Medium),
            "long" | "larga" | ">120" => Ok(DurationBucket::Long),
            _ => Err(CriteriaError::UnknownDuration(s.to_string())),
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DurationBucket::Any => "any",
            DurationBucket::Short => "<90 min",
            DurationBucket::Medium => "90-120 min",
            DurationBucket::Long => ">120 min",
        };
        f.write_str(label)
    }
}

/// Release years, inclusive at both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Result<Self, CriteriaError> {
        if min > max {
            return Err(CriteriaError::InvertedYearRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Every representable year
    pub fn unbounded() -> Self {
        Self {
            min: i32::MIN,
            max: i32::MAX,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// The conjunctive predicate parameters of one recommendation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub genre: GenreChoice,
    pub year_range: YearRange,
    pub min_rating: f32,
    pub duration: DurationBucket,
    /// Only keep movies available on this platform (`donde_ver`)
    pub platform: Option<String>,
}

impl FilterCriteria {
    pub fn new(
        genre: GenreChoice,
        year_range: (i32, i32),
        min_rating: f32,
        duration: DurationBucket,
    ) -> Result<Self, CriteriaError> {
        if min_rating.is_nan() {
            return Err(CriteriaError::InvalidRating(min_rating));
        }
        Ok(Self {
            genre,
            year_range: YearRange::new(year_range.0, year_range.1)?,
            min_rating,
            duration,
            platform: None,
        })
    }

    /// Restrict results to one platform (builder pattern)
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }
}

impl Default for FilterCriteria {
    /// Matches every movie that has a year and a rating
    fn default() -> Self {
        Self {
            genre: GenreChoice::All,
            year_range: YearRange::unbounded(),
            min_rating: f32::NEG_INFINITY,
            duration: DurationBucket::Any,
            platform: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_bucket_boundaries() {
        assert!(DurationBucket::Short.contains(Some(89.0)));
        assert!(!DurationBucket::Short.contains(Some(90.0)));
        assert!(DurationBucket::Medium.contains(Some(90.0)));
        assert!(DurationBucket::Medium.contains(Some(120.0)));
        assert!(!DurationBucket::Medium.contains(Some(121.0)));
        assert!(!DurationBucket::Long.contains(Some(120.0)));
        assert!(DurationBucket::Long.contains(Some(121.0)));
    }

    #[test]
    fn test_fractional_durations_near_boundaries() {
        assert!(DurationBucket::Short.contains(Some(89.6)));
        assert!(!DurationBucket::Medium.contains(Some(89.6)));
        assert!(DurationBucket::Medium.contains(Some(120.4)));
        assert!(!DurationBucket::Long.contains(Some(120.4)));
        assert!(DurationBucket::Long.contains(Some(120.6)));
    }

    #[test]
    fn test_unknown_duration_only_matches_any() {
        assert!(DurationBucket::Any.contains(None));
        assert!(!DurationBucket::Short.contains(None));
        assert!(!DurationBucket::Medium.contains(None));
        assert!(!DurationBucket::Long.contains(None));
    }

    #[test]
    fn test_duration_bucket_from_str() {
        assert_eq!("any".parse::<DurationBucket>().unwrap(), DurationBucket::Any);
        assert_eq!("Cualquiera".parse::<DurationBucket>().unwrap(), DurationBucket::Any);
        assert_eq!("<90 min".parse::<DurationBucket>().unwrap(), DurationBucket::Short);
        assert_eq!("90-120 min".parse::<DurationBucket>().unwrap(), DurationBucket::Medium);
        assert_eq!(">120".parse::<DurationBucket>().unwrap(), DurationBucket::Long);
        assert_eq!("LONG".parse::<DurationBucket>().unwrap(), DurationBucket::Long);
        assert!(matches!(
            "epic".parse::<DurationBucket>(),
            Err(CriteriaError::UnknownDuration(_))
        ));
    }

    #[test]
    fn test_genre_choice_from_str() {
        assert_eq!("all".parse::<GenreChoice>().unwrap(), GenreChoice::All);
        assert_eq!("ALL".parse::<GenreChoice>().unwrap(), GenreChoice::All);
        assert_eq!(
            " Drama ".parse::<GenreChoice>().unwrap(),
            GenreChoice::Named("Drama".to_string())
        );
    }

    #[test]
    fn test_year_range_inclusive() {
        let range = YearRange::new(2000, 2023).unwrap();
        assert!(range.contains(2000));
        assert!(range.contains(2023));
        assert!(!range.contains(1999));
        assert!(!range.contains(2024));
    }

    #[test]
    fn test_criteria_validation() {
        assert_eq!(
            FilterCriteria::new(GenreChoice::All, (2023, 2000), 0.0, DurationBucket::Any),
            Err(CriteriaError::InvertedYearRange { min: 2023, max: 2000 })
        );
        assert!(matches!(
            FilterCriteria::new(GenreChoice::All, (2000, 2023), f32::NAN, DurationBucket::Any),
            Err(CriteriaError::InvalidRating(_))
        ));

        let criteria = FilterCriteria::new(GenreChoice::All, (2000, 2000), 7.0, DurationBucket::Long)
            .unwrap()
            .with_platform("Netflix");
        assert_eq!(criteria.platform.as_deref(), Some("Netflix"));
    }
}
