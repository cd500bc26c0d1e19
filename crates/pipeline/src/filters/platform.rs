//! Filter to keep movies available on one streaming platform.

use crate::traits::Filter;
use data_loader::Movie;

/// Keeps movies whose `donde_ver` equals the platform, ignoring case.
pub struct PlatformFilter {
    platform: String,
}

impl PlatformFilter {
    pub fn new(platform: impl AsRef<str>) -> Self {
        Self {
            platform: platform.as_ref().trim().to_lowercase(),
        }
    }
}

impl Filter for PlatformFilter {
    fn name(&self) -> &str {
        "PlatformFilter"
    }

    fn matches(&self, movie: &Movie) -> bool {
        movie
            .where_to_watch
            .as_deref()
            .is_some_and(|p| p.trim().to_lowercase() == self.platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_filter() {
        let on = |title: &str, platform: Option<&str>| Movie {
            where_to_watch: platform.map(str::to_string),
            ..Movie::new(title)
        };
        let movies = vec![
            on("A", Some("Netflix")),
            on("B", Some("HBO Max")),
            on("C", Some("netflix ")),
            on("D", None),
        ];

        let filter = PlatformFilter::new("NETFLIX");
        let filtered = filter.apply(movies.iter().collect());

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].title, "A");
        assert_eq!(filtered[1].title, "C");
    }
}
