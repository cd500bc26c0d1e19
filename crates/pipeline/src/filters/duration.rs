//! Filter for the running-time bucket.

use crate::criteria::DurationBucket;
use crate::traits::Filter;
use data_loader::Movie;

/// Keeps movies whose running time falls in a [`DurationBucket`].
pub struct DurationFilter {
    bucket: DurationBucket,
}

impl DurationFilter {
    pub fn new(bucket: DurationBucket) -> Self {
        Self { bucket }
    }
}

impl Filter for DurationFilter {
    fn name(&self) -> &str {
        "DurationFilter"
    }

    fn matches(&self, movie: &Movie) -> bool {
        self.bucket.contains(movie.duration)
    }
}
