//! Library file errors

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why reading or writing the library file failed
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Cannot create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied for '{path}'")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The temp file was written but could not replace the library file
    #[error("Cannot replace '{to}' with '{from}': {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not a JSON list of books
    #[error("Library '{path}' is not readable as a book list: {details}{}", backup_note(.backup.as_deref()))]
    Corrupt {
        path: PathBuf,
        /// Copy of the file taken before giving up, if one could be made
        backup: Option<PathBuf>,
        details: String,
    },

    #[error("Cannot encode library: {0}")]
    Encode(#[from] serde_json::Error),
}

fn backup_note(backup: Option<&Path>) -> String {
    match backup {
        Some(path) => format!(" (copy kept at '{}')", path.display()),
        None => String::new(),
    }
}

impl StorageError {
    /// A failed read of `path`
    pub fn read(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path: path.to_path_buf(),
                source,
            },
            _ => StorageError::Read {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// A failed write of `path`
    pub fn write(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => StorageError::PermissionDenied {
                path: path.to_path_buf(),
                source,
            },
            _ => StorageError::Write {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Whether the same operation can succeed once the environment is fixed
    ///
    /// The library file is never partially written, so every I/O failure
    /// leaves it as it was. A corrupt file or an encoding failure will fail
    /// the same way again.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            StorageError::Corrupt { .. } | StorageError::Encode(_)
        )
    }

    /// What the user can do about it, when there is something specific
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::PermissionDenied { .. } => {
                Some("Check the permissions of the library file and its directory.")
            }
            StorageError::CreateDirectory { .. } => {
                Some("Check that the data directory can be created, or set data_dir with `shelf config set`.")
            }
            StorageError::Corrupt { backup: Some(_), .. } => {
                Some("Repair the copy and move it back, or remove the library file to start empty.")
            }
            StorageError::Corrupt { backup: None, .. } => {
                Some("Copy the library file somewhere safe before changing anything.")
            }
            _ => None,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
