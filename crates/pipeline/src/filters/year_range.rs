//! Filter for the requested release-year window.

use crate::criteria::YearRange;
use crate::traits::Filter;
use data_loader::Movie;

/// Keeps movies released inside an inclusive year range.
///
/// Movies without a parsed year are dropped.
pub struct YearRangeFilter {
    range: YearRange,
}

impl YearRangeFilter {
    pub fn new(range: YearRange) -> Self {
        Self { range }
    }
}

impl Filter for YearRangeFilter {
    fn name(&self) -> &str {
        "YearRangeFilter"
    }

    fn matches(&self, movie: &Movie) -> bool {
        movie.year.is_some_and(|year| self.range.contains(year))
    }
}
