//! Library store
//!
//! The `Library` owns the ordered list of books and mirrors it to the
//! library file after every change.
//!
//! ## Usage
//!
//! ```ignore
//! let mut library = Library::open()?;  // Loads the library file if present
//!
//! library.add(Book::new("Dune", "Frank Herbert", 1965, Genre::Science, false)?)?;
//! library.toggle_read_at(0)?;
//!
//! let hits = library.search("dune", SearchField::Title);
//! let stats = library.stats();
//! ```
//!
//! Books are addressed by position. Removing a book shifts every later book
//! down by one.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{LibraryError, LibraryResult};
use crate::models::{Book, Genre};
use crate::search::{self, SearchField, SearchHit};
use crate::stats::{self, LibraryStats};
use crate::storage::JsonPersistence;

/// Outcome of loading the library file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// File read; the library now holds this many books
    Loaded(usize),
    /// No library file yet; the library was left as it was
    NotFound,
}

/// The book collection
pub struct Library {
    books: Vec<Book>,
    persistence: JsonPersistence,
    last_search: Option<Vec<SearchHit>>,
}

impl Library {
    /// Open the library at the configured location
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(&config)
    }

    /// Open the library with a specific configuration
    ///
    /// A missing library file gives an empty library.
    pub fn open_with_config(config: &Config) -> Result<Self> {
        let mut library = Self::new(JsonPersistence::new(config));
        library.load().context("Failed to load library")?;
        Ok(library)
    }

    /// Create an empty library backed by `persistence` without reading it
    pub fn new(persistence: JsonPersistence) -> Self {
        Self {
            books: Vec::new(),
            persistence,
            last_search: None,
        }
    }

    /// Path of the backing library file
    pub fn path(&self) -> &Path {
        self.persistence.path()
    }

    // ==================== Persistence ====================

    /// Replace the in-memory books with the library file's contents
    ///
    /// A missing file is not an error. On any failure the in-memory books
    /// are left untouched.
    pub fn load(&mut self) -> LibraryResult<LoadOutcome> {
        match self.persistence.load()? {
            Some(books) => {
                let count = books.len();
                self.books = books;
                self.last_search = None;
                info!(path = ?self.path(), count, "Library loaded");
                Ok(LoadOutcome::Loaded(count))
            }
            None => {
                debug!(path = ?self.path(), "No library file found");
                Ok(LoadOutcome::NotFound)
            }
        }
    }

    /// Write every book to the library file
    pub fn save(&self) -> LibraryResult<()> {
        self.persistence.save(&self.books).map_err(|e| {
            warn!(path = ?self.path(), error = %e, "Failed to save library");
            LibraryError::from(e)
        })
    }

    // ==================== Book Operations ====================

    /// Validate a book, append it and save
    ///
    /// An invalid book leaves the library unchanged. If saving fails the
    /// book stays in memory; call `save()` to retry.
    pub fn add(&mut self, book: Book) -> LibraryResult<()> {
        book.validate(Local::now().year())?;
        info!(title = %book.title, author = %book.author, "Adding book");
        self.books.push(book);
        self.changed()
    }

    /// Build a book from its fields, validate it, append it and save
    ///
    /// Returns the new book's position.
    pub fn add_book(
        &mut self,
        title: &str,
        author: &str,
        publication_year: i32,
        genre: Genre,
        read_status: bool,
    ) -> LibraryResult<usize> {
        let book = Book::new(title, author, publication_year, genre, read_status)?;
        self.add(book)?;
        Ok(self.books.len() - 1)
    }

    /// Remove the book at `index` and save
    ///
    /// Later books move down one position.
    pub fn remove_at(&mut self, index: usize) -> LibraryResult<Book> {
        self.check_index(index)?;
        let book = self.books.remove(index);
        info!(index, title = %book.title, "Removed book");
        self.changed()?;
        Ok(book)
    }

    /// Flip the read status of the book at `index` and save
    ///
    /// Returns the new read status.
    pub fn toggle_read_at(&mut self, index: usize) -> LibraryResult<bool> {
        self.check_index(index)?;
        let book = &mut self.books[index];
        book.toggle_read();
        let read = book.read_status;
        info!(index, read, "Toggled read status");
        self.changed()?;
        Ok(read)
    }

    // ==================== Queries ====================

    /// All books, in insertion order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Get the book at `index`
    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Search one field and remember the result
    pub fn search(&mut self, term: &str, field: SearchField) -> &[SearchHit] {
        let hits = search::search(&self.books, term, field);
        debug!(term, %field, matches = hits.len(), "Searched library");
        self.last_search.insert(hits)
    }

    /// Result of the most recent search
    ///
    /// `None` until a search runs, and again after any change to the books.
    pub fn last_search(&self) -> Option<&[SearchHit]> {
        self.last_search.as_deref()
    }

    /// Compute statistics over the current books
    pub fn stats(&self) -> LibraryStats {
        stats::compute_stats(&self.books)
    }

    fn check_index(&self, index: usize) -> LibraryResult<()> {
        if index < self.books.len() {
            Ok(())
        } else {
            Err(LibraryError::IndexOutOfRange {
                index,
                len: self.books.len(),
            })
        }
    }

    /// Positions may have shifted, so the last search is stale
    fn changed(&mut self) -> LibraryResult<()> {
        self.last_search = None;
        self.save()
    }
}
