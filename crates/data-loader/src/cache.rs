//! Memoized catalog loading.
//!
//! A session keeps a [`DatasetCache`] between interactions. An entry is
//! reused while the registry and the modification signature of the data
//! directory are unchanged.

use crate::catalog::Catalog;
use crate::registry::DatasetRegistry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

/// Size and modification time of one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    len: u64,
    modified: Option<SystemTime>,
}

/// Stamp of every candidate path in a registry (`None` = not a file)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSignature(Vec<(PathBuf, Option<FileStamp>)>);

impl DataSignature {
    pub fn compute(data_dir: &Path, registry: &DatasetRegistry) -> Self {
        let stamps = registry
            .entries()
            .iter()
            .flat_map(|entry| entry.candidates.iter())
            .map(|candidate| {
                let path = data_dir.join(candidate);
                let stamp = std::fs::metadata(&path)
                    .ok()
                    .filter(|meta| meta.is_file())
                    .map(|meta| FileStamp {
                        len: meta.len(),
                        modified: meta.modified().ok(),
                    });
                (path, stamp)
            })
            .collect();
        Self(stamps)
    }
}

#[derive(Debug)]
struct CachedCatalog {
    registry: DatasetRegistry,
    signature: DataSignature,
    catalog: Arc<Catalog>,
}

/// Catalogs memoized per data directory
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CachedCatalog>,
    loads: usize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached catalog for `data_dir`, loading it when absent or stale
    pub fn get_or_load(&mut self, data_dir: &Path, registry: &DatasetRegistry) -> Arc<Catalog> {
        let signature = DataSignature::compute(data_dir, registry);

        if let Some(cached) = self.entries.get(data_dir) {
            if cached.signature == signature && cached.registry == *registry {
                debug!("Reusing cached catalog for {}", data_dir.display());
                return Arc::clone(&cached.catalog);
            }
            info!("Data in {} changed, reloading", data_dir.display());
        }

        let catalog = Arc::new(Catalog::load(data_dir, registry));
        self.loads += 1;
        self.entries.insert(
            data_dir.to_path_buf(),
            CachedCatalog {
                registry: registry.clone(),
                signature,
                catalog: Arc::clone(&catalog),
            },
        );
        catalog
    }

    /// Drop the entry for `data_dir`; returns whether one existed
    pub fn invalidate(&mut self, data_dir: &Path) -> bool {
        self.entries.remove(data_dir).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// How many times a catalog was actually loaded from disk
    pub fn load_count(&self) -> usize {
        self.loads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{RegistryEntry, PELICULAS_COMPLETAS};
    use std::fs;
    use tempfile::tempdir;

    fn registry() -> DatasetRegistry {
        DatasetRegistry::new(vec![RegistryEntry::new(
            PELICULAS_COMPLETAS,
            ["peliculas_completas.csv"],
        )])
        .unwrap()
    }

    const MOVIES: &str = "pelicula,año,rating,duracion,genero\nX,2010,8.5,95,Drama\n";

    #[test]
    fn test_unchanged_directory_hits_cache() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("peliculas_completas.csv"), MOVIES).unwrap();
        let mut cache = DatasetCache::new();

        let first = cache.get_or_load(dir.path(), &registry());
        let second = cache.get_or_load(dir.path(), &registry());

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.load_count(), 1);
    }

    #[test]
    fn test_changed_file_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("peliculas_completas.csv");
        fs::write(&path, MOVIES).unwrap();
        let mut cache = DatasetCache::new();

        let first = cache.get_or_load(dir.path(), &registry());
        fs::write(&path, format!("{}Z,2021,9.0,150,Drama\n", MOVIES)).unwrap();
        let second = cache.get_or_load(dir.path(), &registry());

        assert_eq!(cache.load_count(), 2);
        assert_eq!(first.movies().unwrap().len(), 1);
        assert_eq!(second.movies().unwrap().len(), 2);
    }

    #[test]
    fn test_new_file_appearing_reloads() {
        let dir = tempdir().unwrap();
        let mut cache = DatasetCache::new();

        let first = cache.get_or_load(dir.path(), &registry());
        assert!(first.movies().is_none());

        fs::write(dir.path().join("peliculas_completas.csv"), MOVIES).unwrap();
        let second = cache.get_or_load(dir.path(), &registry());
        assert!(second.movies().is_some());
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let dir = tempdir().unwrap();
        let mut cache = DatasetCache::new();

        cache.get_or_load(dir.path(), &registry());
        assert!(cache.invalidate(dir.path()));
        assert!(!cache.invalidate(dir.path()));
        cache.get_or_load(dir.path(), &registry());

        assert_eq!(cache.load_count(), 2);
    }
}
