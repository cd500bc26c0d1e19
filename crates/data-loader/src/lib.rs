//! # Data Loader Crate
//!
//! This crate finds, loads and validates the movie dashboard's CSV tables.
//!
//! ## Main Components
//!
//! - **registry**: logical dataset keys and the file names each may go by
//! - **parser**: CSV files into [`Table`]s, and the movie table into typed [`Movie`]s
//! - **loader**: one [`LoadResult`] per key, collected into a [`LoadReport`]
//! - **catalog**: the session's read-only [`Catalog`] (report + typed movies)
//! - **cache**: [`DatasetCache`], memoizing catalogs per data directory
//! - **portraits**: `Firstname_Lastname.jpg` lookup for people
//! - **error**: error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Catalog, DatasetRegistry};
//! use std::path::Path;
//!
//! let catalog = Catalog::load(Path::new("data"), &DatasetRegistry::default());
//!
//! for status in catalog.report().statuses() {
//!     println!("{} [{}] {}", status.key, status.status, status.detail);
//! }
//!
//! if let Some(movies) = catalog.movies() {
//!     println!("{} movies available", movies.len());
//! }
//! ```
//!
//! ## Failure model
//!
//! Loading never fails as a whole. A missing, empty or malformed file only
//! affects its own key; every other dataset still loads.

pub mod cache;
pub mod catalog;
pub mod error;
pub mod loader;
pub mod parser;
pub mod portraits;
pub mod registry;
pub mod types;

// Re-export commonly used types for convenience
pub use cache::DatasetCache;
pub use catalog::Catalog;
pub use error::{DataLoadError, Result};
pub use loader::{load, DatasetStatus, LoadReport, LoadResult, LoadStatus};
pub use registry::{DatasetRegistry, RegistryEntry, PELICULAS_COMPLETAS};
pub use types::{LoadedDataset, Movie, MovieTable, Table};
