//! Library file persistence
//!
//! Handles saving and loading the book list to/from a JSON file.
//! Uses atomic writes (write to temp file, then rename) to prevent corruption.
//!
//! Storage location: `~/.local/share/shelf/library.json` (configurable via `Config`)

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::{StorageError, StorageResult};
use crate::config::Config;
use crate::models::Book;

/// Persistence layer for the library file
///
/// The whole book list is rewritten on every save.
pub struct JsonPersistence {
    path: PathBuf,
}

impl JsonPersistence {
    /// Create a persistence handler for the configured library file
    pub fn new(config: &Config) -> Self {
        Self::at(config.library_path())
    }

    /// Create a persistence handler for a specific file
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the library file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a library file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Save the book list using atomic write
    pub fn save(&self, books: &[Book]) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(books)?;
        atomic_write(&self.path, &bytes)?;
        debug!(path = ?self.path, count = books.len(), "Saved library");
        Ok(())
    }

    /// Load the book list from disk
    ///
    /// Returns `None` if the file doesn't exist.
    /// Returns an error if the file exists but can't be read or parsed; an
    /// unparsable file is copied aside before the error is returned so a
    /// later save cannot destroy it.
    pub fn load(&self) -> StorageResult<Option<Vec<Book>>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::read(&self.path, e)),
        };

        match serde_json::from_slice::<Vec<Book>>(&bytes) {
            Ok(books) => {
                debug!(path = ?self.path, count = books.len(), "Loaded library");
                Ok(Some(books))
            }
            Err(e) => Err(self.corrupt(e.to_string())),
        }
    }

    /// Path the corrupt-file backup is written to
    pub fn backup_path(&self) -> PathBuf {
        sibling(&self.path, ".corrupt.backup")
    }

    fn corrupt(&self, details: String) -> StorageError {
        let backup_path = self.backup_path();
        let backup = match fs::copy(&self.path, &backup_path) {
            Ok(_) => {
                warn!(path = ?self.path, backup = ?backup_path, "Library file is corrupted");
                Some(backup_path)
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Could not back up corrupted library file");
                None
            }
        };
        StorageError::Corrupt {
            path: self.path.clone(),
            backup,
            details,
        }
    }
}

/// `path` with `suffix` appended to its file name
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = sibling(path, ".tmp");

    let mut file = File::create(&temp_path).map_err(|e| StorageError::write(&temp_path, e))?;

    file.write_all(data)
        .and_then(|_| file.sync_all())
        .map_err(|e| StorageError::write(&temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        StorageError::Rename {
            from: temp_path.clone(),
            to: path.to_path_buf(),
            source,
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;
    use tempfile::TempDir;

    fn sample_books() -> Vec<Book> {
        vec![
            Book::new("Dune", "Frank Herbert", 1965, Genre::Science, false).unwrap(),
            Book::new("Emma", "Jane Austen", 1815, Genre::Romance, true).unwrap(),
        ]
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::at(temp_dir.path().join("library.json"));

        // Initially no file
        assert!(!persistence.exists());
        assert!(persistence.load().unwrap().is_none());

        let books = sample_books();
        persistence.save(&books).unwrap();
        assert!(persistence.exists());

        let loaded = persistence.load().unwrap().unwrap();
        assert_eq!(loaded, books);
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::at(temp_dir.path().join("library.json"));

        let mut books = sample_books();
        persistence.save(&books).unwrap();

        books.remove(0);
        persistence.save(&books).unwrap();

        let loaded = persistence.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Emma");
    }

    #[test]
    fn test_save_empty_list() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::at(temp_dir.path().join("library.json"));

        persistence.save(&[]).unwrap();
        let content = fs::read_to_string(persistence.path()).unwrap();
        assert_eq!(content.trim(), "[]");
        assert!(persistence.load().unwrap().unwrap().is_empty());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::at(temp_dir.path().join("library.json"));

        persistence.save(&sample_books()).unwrap();
        assert!(!temp_dir.path().join("library.json.tmp").exists());
    }

    #[test]
    fn test_temp_file_is_per_library_file() {
        let temp_dir = TempDir::new().unwrap();
        // Shares a stem with the library file and must survive its saves
        let neighbour = temp_dir.path().join("books.toml.tmp");
        fs::write(&neighbour, "keep me").unwrap();
        let other = temp_dir.path().join("books.tmp");
        fs::write(&other, "keep me too").unwrap();

        let persistence = JsonPersistence::at(temp_dir.path().join("books.json"));
        let books = sample_books();
        persistence.save(&books).unwrap();

        assert_eq!(fs::read_to_string(&neighbour).unwrap(), "keep me");
        assert_eq!(fs::read_to_string(&other).unwrap(), "keep me too");
        assert_eq!(persistence.load().unwrap().unwrap(), books);
    }

    #[test]
    fn test_library_file_with_tmp_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shelf.tmp");
        // Never writes through the library file itself
        assert_eq!(sibling(&path, ".tmp"), temp_dir.path().join("shelf.tmp.tmp"));

        let persistence = JsonPersistence::at(&path);
        let books = sample_books();
        persistence.save(&books).unwrap();
        persistence.save(&books).unwrap();

        assert_eq!(persistence.load().unwrap().unwrap(), books);
        assert!(!temp_dir.path().join("shelf.tmp.tmp").exists());
    }

    #[test]
    fn test_load_corrupt_file_creates_backup() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("library.json");
        fs::write(&path, "{ not json").unwrap();

        let persistence = JsonPersistence::at(&path);
        let err = persistence.load().unwrap_err();

        match err {
            StorageError::Corrupt {
                backup: Some(backup_path),
                ..
            } => {
                assert_eq!(backup_path, temp_dir.path().join("library.json.corrupt.backup"));
                assert_eq!(fs::read_to_string(backup_path).unwrap(), "{ not json");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Original left in place
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_load_wrong_shape_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("library.json");
        fs::write(&path, r#"[{"title": "Dune"}]"#).unwrap();

        let err = JsonPersistence::at(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn test_load_reads_legacy_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("library.json");
        fs::write(
            &path,
            r#"[{"title": "Dune", "author": "Frank Herbert", "publication_year": 1965, "genre": "Science", "read_status": false, "added_date": "2025-02-01 10:00:00"}]"#,
        )
        .unwrap();

        let books = JsonPersistence::at(&path).load().unwrap().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].author, "Frank Herbert");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir
            .path()
            .join("a")
            .join("b")
            .join("c")
            .join("file.txt");

        atomic_write(&nested_path, b"test data").unwrap();

        assert!(nested_path.exists());
        let content = fs::read_to_string(&nested_path).unwrap();
        assert_eq!(content, "test data");
    }

    #[test]
    fn test_backup_path() {
        let persistence = JsonPersistence::at("/data/shelf/library.json");
        assert_eq!(
            persistence.backup_path(),
            PathBuf::from("/data/shelf/library.json.corrupt.backup")
        );
    }
}
