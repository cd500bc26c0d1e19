//! The dataset registry: logical dataset keys and the physical file names
//! each key may go by on disk.
//!
//! Movie CSVs were exported under several naming conventions over time
//! (with and without `.csv`, typos, a `data/` sub-directory). The registry
//! is the single place that knows about those variants; everything past the
//! loader only ever sees the canonical key.

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Key of the complete-movies table consumed by the recommender
pub const PELICULAS_COMPLETAS: &str = "peliculas_completas";
pub const TOP_10_MAS_VISTAS: &str = "top_10_mas_vistas";
pub const TOP_10_MEJOR_PUNTUADAS: &str = "top_10_mejor_puntuadas";
pub const ACTORES_DIRECTORES: &str = "actores_directores";
pub const PELICULAS_PREMIOS: &str = "peliculas_premios";
pub const RECAUDACION_PELICULAS: &str = "recaudacion_peliculas";
pub const COMENTARIOS_PELICULAS: &str = "comentarios_peliculas";
pub const VISTAS_POR_PAIS: &str = "vistas_por_pais";

/// Aliases accepted for the title column
pub const TITLE_COLUMNS: &[&str] = &["pelicula", "titulo"];
/// Aliases accepted for the rating column
pub const RATING_COLUMNS: &[&str] = &["rating", "puntuacion"];

/// One logical dataset and the file names it may be stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub key: String,
    /// Tried in order; the first one that exists decides the outcome
    pub candidates: Vec<String>,
    /// Each requirement is a set of accepted aliases; at least one must be
    /// present in the header
    #[serde(default)]
    pub required_columns: Vec<Vec<String>>,
}

impl RegistryEntry {
    pub fn new<S: Into<String>>(key: impl Into<String>, candidates: impl IntoIterator<Item = S>) -> Self {
        Self {
            key: key.into(),
            candidates: candidates.into_iter().map(Into::into).collect(),
            required_columns: Vec::new(),
        }
    }

    /// Require one of `aliases` to be present in the loaded header (builder pattern)
    pub fn require<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        self.required_columns
            .push(aliases.into_iter().map(Into::into).collect());
        self
    }
}

/// Validated, ordered collection of registry entries.
///
/// Invariants: keys are unique, and every entry has at least one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetRegistry {
    entries: Vec<RegistryEntry>,
}

impl DatasetRegistry {
    /// Build a registry, rejecting duplicate keys and empty candidate lists
    pub fn new(entries: Vec<RegistryEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.key.trim().is_empty() {
                return Err(DataLoadError::InvalidRegistry(
                    "registry key must not be empty".to_string(),
                ));
            }
            if !seen.insert(entry.key.as_str()) {
                return Err(DataLoadError::InvalidRegistry(format!(
                    "duplicate key '{}'",
                    entry.key
                )));
            }
            if entry.candidates.is_empty() {
                return Err(DataLoadError::InvalidRegistry(format!(
                    "key '{}' has no candidate file names",
                    entry.key
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Parse a registry from a JSON array of entries
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<RegistryEntry> = serde_json::from_str(json)
            .map_err(|e| DataLoadError::InvalidRegistry(e.to_string()))?;
        Self::new(entries)
    }

    /// Read a registry from a JSON file on disk
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DatasetRegistry {
    /// The catalog of file names seen across the dashboard's data drops
    fn default() -> Self {
        let entries = vec![
            RegistryEntry::new(
                PELICULAS_COMPLETAS,
                [
                    "peliculas_completas.csv",
                    "peliculas_completas",
                    "peliculas.csv",
                    "data/peliculas_completas.csv",
                ],
            )
            .require(TITLE_COLUMNS.iter().copied())
            .require(["año"])
            .require(RATING_COLUMNS.iter().copied())
            .require(["duracion"])
            .require(["genero"]),
            RegistryEntry::new(
                TOP_10_MAS_VISTAS,
                [
                    "top_10_mas_vistas.csv",
                    "top_10_mas_vistas",
                    "top_10_mas_vista.csv",
                    "data/top_10_mas_vistas.csv",
                ],
            )
            .require(TITLE_COLUMNS.iter().copied()),
            RegistryEntry::new(
                TOP_10_MEJOR_PUNTUADAS,
                [
                    "top_10_mejor_puntuadas.csv",
                    "top_10_mejor_puntuadas",
                    "top_10_mejores_puntuadas.csv",
                    "data/top_10_mejor_puntuadas.csv",
                ],
            )
            .require(TITLE_COLUMNS.iter().copied()),
            RegistryEntry::new(
                ACTORES_DIRECTORES,
                [
                    "actores_directores.csv",
                    "actores_directores",
                    "data/actores_directores.csv",
                ],
            ),
            RegistryEntry::new(
                PELICULAS_PREMIOS,
                [
                    "peliculas_premios.csv",
                    "peliculas_premios",
                    "data/peliculas_premios.csv",
                ],
            ),
            RegistryEntry::new(
                RECAUDACION_PELICULAS,
                [
                    "recaudacion_peliculas.csv",
                    "recaudacion_peliculas",
                    "recaudacion.csv",
                    "data/recaudacion_peliculas.csv",
                ],
            )
            .require(TITLE_COLUMNS.iter().copied()),
            // Older exports doubled the extension
            RegistryEntry::new(
                COMENTARIOS_PELICULAS,
                [
                    "comentarios_peliculas.csv",
                    "comentarios_peliculas.csv.csv",
                    "comentarios_peliculas",
                    "data/comentarios_peliculas.csv",
                ],
            ),
            RegistryEntry::new(
                VISTAS_POR_PAIS,
                [
                    "vistas_por_pais.csv",
                    "vistas_por_pais",
                    "data/vistas_por_pais.csv",
                ],
            ),
        ];

        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_is_valid() {
        let registry = DatasetRegistry::default();
        let revalidated = DatasetRegistry::new(registry.entries().to_vec()).unwrap();

        assert_eq!(revalidated.len(), 8);
        let movies = registry.get(PELICULAS_COMPLETAS).unwrap();
        assert_eq!(movies.candidates[0], "peliculas_completas.csv");
        assert_eq!(movies.required_columns.len(), 5);
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let result = DatasetRegistry::new(vec![
            RegistryEntry::new("a", ["a.csv"]),
            RegistryEntry::new("a", ["b.csv"]),
        ]);
        assert!(matches!(result, Err(DataLoadError::InvalidRegistry(_))));
    }

    #[test]
    fn test_empty_candidates_rejected() {
        let result = DatasetRegistry::new(vec![RegistryEntry::new("a", Vec::<String>::new())]);
        assert!(matches!(result, Err(DataLoadError::InvalidRegistry(_))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"key": "movies", "candidates": ["movies.csv", "movies"], "required_columns": [["titulo", "pelicula"]]},
            {"key": "views", "candidates": ["views.csv"]}
        ]"#;

        let registry = DatasetRegistry::from_json(json).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("movies").unwrap().required_columns[0], vec!["titulo", "pelicula"]);
        assert!(registry.get("views").unwrap().required_columns.is_empty());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            DatasetRegistry::from_json("{not json"),
            Err(DataLoadError::InvalidRegistry(_))
        ));
    }
}
