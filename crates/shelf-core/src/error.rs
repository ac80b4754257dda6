//! Library error types
//!
//! Every failure is recoverable: callers display it and carry on.

use thiserror::Error;

use crate::storage::StorageError;

/// A book failed validation on add
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Author must not be empty")]
    EmptyAuthor,

    #[error("Publication year {year} is out of range ({min}-{max})")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("Unknown genre: '{0}'")]
    UnknownGenre(String),
}

/// Errors returned by library operations
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Book rejected; the library is unchanged
    #[error("Invalid book: {0}")]
    Validation(#[from] ValidationError),

    /// Position does not address a book; the library is unchanged
    #[error("No book at position {index} (library has {len} book(s))")]
    IndexOutOfRange { index: usize, len: usize },

    /// Library file could not be read or written
    #[error(transparent)]
    Persistence(#[from] StorageError),
}

/// Result type for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;
