//! Shelf Core Library
//!
//! This crate provides the core functionality for Shelf, a personal
//! book collection tracker.
//!
//! # Architecture
//!
//! - **Library**: ordered list of books held in memory, mirrored to a JSON
//!   file after every change
//!
//! Search and statistics are computed from the in-memory list on demand.
//!
//! # Quick Start
//!
//! ```text
//! let mut library = Library::open()?;
//!
//! // Add a book
//! library.add_book("Dune", "Frank Herbert", 1965, Genre::Science, false)?;
//!
//! // Query
//! let hits = library.search("dune", SearchField::Title);
//! let stats = library.stats();
//! ```
//!
//! # Modules
//!
//! - `store`: The library (main entry point)
//! - `models`: Book and genre
//! - `search`: Field search
//! - `stats`: Aggregate statistics
//! - `storage`: JSON file persistence
//! - `config`: Application configuration
//! - `error`: Error types

pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod stats;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{LibraryError, LibraryResult, ValidationError};
pub use models::{Book, Genre, MIN_PUBLICATION_YEAR};
pub use search::{search, SearchField, SearchHit};
pub use stats::{compute_stats, LibraryStats};
pub use storage::{JsonPersistence, StorageError};
pub use store::{Library, LoadOutcome};
