//! Dataset loading: resolve every registry key to a file and parse it.
//!
//! The load never aborts on a single bad file. Each key ends up with
//! exactly one [`LoadResult`], and the [`LoadReport`] partitions them into
//! succeeded and failed so the front end can tell the user which physical
//! files are missing, misnamed, or malformed.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::registry::{DatasetRegistry, RegistryEntry};
use crate::types::{LoadedDataset, Table};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of loading one registry key
pub type LoadResult = Result<LoadedDataset>;

/// Severity shown next to each dataset in the status panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Ok,
    Warning,
    Error,
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadStatus::Ok => "ok",
            LoadStatus::Warning => "warning",
            LoadStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// One line of the status panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStatus {
    pub key: String,
    pub status: LoadStatus,
    pub detail: String,
}

/// Every registry key mapped to its load outcome.
#[derive(Debug, Default)]
pub struct LoadReport {
    results: BTreeMap<String, LoadResult>,
}

impl LoadReport {
    pub fn results(&self) -> &BTreeMap<String, LoadResult> {
        &self.results
    }

    pub fn result(&self, key: &str) -> Option<&LoadResult> {
        self.results.get(key)
    }

    pub fn dataset(&self, key: &str) -> Option<&LoadedDataset> {
        self.results.get(key)?.as_ref().ok()
    }

    /// The table bound to `key`, if that key loaded successfully
    pub fn table(&self, key: &str) -> Option<&Table> {
        self.dataset(key).map(|d| &d.table)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = (&str, &LoadedDataset)> {
        self.results
            .iter()
            .filter_map(|(key, result)| result.as_ref().ok().map(|d| (key.as_str(), d)))
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &DataLoadError)> {
        self.results
            .iter()
            .filter_map(|(key, result)| result.as_ref().err().map(|e| (key.as_str(), e)))
    }

    /// Per-key status for display, in key order.
    ///
    /// - `ok`: loaded with at least one data row
    /// - `warning`: loaded with a header only, or no candidate file exists
    /// - `error`: the file exists but is empty, malformed, or lacks columns
    pub fn statuses(&self) -> Vec<DatasetStatus> {
        self.results
            .iter()
            .map(|(key, result)| {
                let (status, detail) = match result {
                    Ok(dataset) if dataset.table.is_empty() => (
                        LoadStatus::Warning,
                        format!("{} has a header but no rows", dataset.source.display()),
                    ),
                    Ok(dataset) => (
                        LoadStatus::Ok,
                        format!("{} rows from {}", dataset.table.len(), dataset.source.display()),
                    ),
                    Err(err @ DataLoadError::FileNotFound { .. }) => {
                        (LoadStatus::Warning, err.to_string())
                    }
                    Err(err) => (LoadStatus::Error, err.to_string()),
                };
                DatasetStatus {
                    key: key.clone(),
                    status,
                    detail,
                }
            })
            .collect()
    }

    /// Replace the outcome of `key` with a failure discovered after loading
    pub(crate) fn record_failure(&mut self, key: &str, err: DataLoadError) {
        self.results.insert(key.to_string(), Err(err));
    }
}

/// Load every registry entry from `data_dir`.
///
/// Entries are independent of each other, so they are attempted in parallel
/// with Rayon. The call still returns only after every key has a result.
pub fn load(data_dir: &Path, registry: &DatasetRegistry) -> LoadReport {
    info!(
        "Loading {} datasets from {}",
        registry.len(),
        data_dir.display()
    );

    let results: BTreeMap<String, LoadResult> = registry
        .entries()
        .par_iter()
        .map(|entry| {
            let result = load_entry(data_dir, entry);
            if let Err(err) = &result {
                warn!("Dataset '{}' not loaded: {}", entry.key, err);
            }
            (entry.key.clone(), result)
        })
        .collect();

    let report = LoadReport { results };
    info!(
        "Loaded {} datasets, {} failed",
        report.succeeded().count(),
        report.failed().count()
    );
    report
}

/// Try the candidates of one entry in order.
///
/// The first candidate that exists decides the outcome: an existing but
/// empty or malformed file is reported as such, never skipped in favour of
/// a later candidate.
fn load_entry(data_dir: &Path, entry: &RegistryEntry) -> LoadResult {
    for candidate in &entry.candidates {
        let path = data_dir.join(candidate);
        if !path.is_file() {
            debug!("Candidate {} for '{}' not found", path.display(), entry.key);
            continue;
        }

        let table = parser::read_table(&path)?;
        check_required_columns(&table, entry, &path)?;
        debug!(
            "Bound '{}' to {} ({} rows)",
            entry.key,
            path.display(),
            table.len()
        );
        return Ok(LoadedDataset { source: path, table });
    }

    Err(DataLoadError::FileNotFound {
        key: entry.key.clone(),
        candidates: entry.candidates.clone(),
    })
}

fn check_required_columns(table: &Table, entry: &RegistryEntry, path: &Path) -> Result<()> {
    for aliases in &entry.required_columns {
        if table.find_column(aliases).is_none() {
            return Err(DataLoadError::ColumnMissing {
                file: path.display().to_string(),
                column: aliases.join("|"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn registry() -> DatasetRegistry {
        DatasetRegistry::new(vec![
            RegistryEntry::new("vistas", ["vistas.csv", "vistas", "data/vistas.csv"]).require(["pelicula"]),
            RegistryEntry::new("premios", ["premios.csv"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("vistas"), "pelicula,vistas\nX,10\n").unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data/vistas.csv"), "pelicula,vistas\nY,20\nZ,30\n").unwrap();

        let report = load(dir.path(), &registry());
        let dataset = report.dataset("vistas").unwrap();
        assert_eq!(dataset.source, dir.path().join("vistas"));
        assert_eq!(dataset.table.len(), 1);
    }

    #[test]
    fn test_empty_file_stops_candidate_search() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("vistas.csv"), "").unwrap();
        fs::write(dir.path().join("vistas"), "pelicula,vistas\nX,10\n").unwrap();

        let report = load(dir.path(), &registry());
        assert!(matches!(
            report.result("vistas"),
            Some(Err(DataLoadError::EmptyFile { .. }))
        ));
        assert!(report.table("vistas").is_none());
    }

    #[test]
    fn test_parse_error_stops_candidate_search() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("vistas.csv"), "pelicula\nX,10,extra\n").unwrap();
        fs::write(dir.path().join("vistas"), "pelicula,vistas\nX,10\n").unwrap();

        let report = load(dir.path(), &registry());
        assert!(matches!(
            report.result("vistas"),
            Some(Err(DataLoadError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_missing_required_column() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("vistas.csv"), "titulo_original,vistas\nX,10\n").unwrap();

        let report = load(dir.path(), &registry());
        match report.result("vistas") {
            Some(Err(DataLoadError::ColumnMissing { column, .. })) => assert_eq!(column, "pelicula"),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_statuses() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("vistas.csv"), "pelicula,vistas\n").unwrap();

        let report = load(dir.path(), &registry());
        let statuses = report.statuses();

        assert_eq!(statuses.len(), 2);
        // BTreeMap order: "premios" < "vistas"
        assert_eq!(statuses[0].key, "premios");
        assert_eq!(statuses[0].status, LoadStatus::Warning);
        assert!(statuses[0].detail.contains("premios.csv"));
        assert_eq!(statuses[1].status, LoadStatus::Warning);
        assert!(statuses[1].detail.contains("no rows"));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&LoadStatus::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
