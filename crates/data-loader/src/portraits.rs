//! Portrait lookup for actors and directors.
//!
//! Images are stored flat in one directory as `Firstname_Lastname.jpg`.
//! The core only builds names and checks existence; displaying them is the
//! front end's job.

use std::path::{Path, PathBuf};

/// `"Christopher Nolan"` -> `"Christopher_Nolan.jpg"`
pub fn portrait_file_name(name: &str) -> String {
    let stem = name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}.jpg", stem)
}

/// Path of the person's portrait, if the file exists
pub fn resolve_portrait(image_dir: &Path, name: &str) -> Option<PathBuf> {
    if name.trim().is_empty() {
        return None;
    }
    let path = image_dir.join(portrait_file_name(name));
    path.is_file().then_some(path)
}

/// Split a credits cell such as `"Actor Uno, Actora Dos"` into names
pub fn split_people(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_portrait_file_name() {
        assert_eq!(portrait_file_name("Christopher Nolan"), "Christopher_Nolan.jpg");
        assert_eq!(portrait_file_name("  Penélope   Cruz "), "Penélope_Cruz.jpg");
    }

    #[test]
    fn test_resolve_portrait() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Greta_Gerwig.jpg"), b"jpg").unwrap();

        assert_eq!(
            resolve_portrait(dir.path(), "Greta Gerwig"),
            Some(dir.path().join("Greta_Gerwig.jpg"))
        );
        assert_eq!(resolve_portrait(dir.path(), "Unknown Person"), None);
        assert_eq!(resolve_portrait(dir.path(), " "), None);
    }

    #[test]
    fn test_split_people() {
        assert_eq!(split_people("Ana Uno, Beto Dos,"), vec!["Ana Uno", "Beto Dos"]);
        assert!(split_people("").is_empty());
    }
}
