//! Storage layer
//!
//! Handles persistence of the book list as a single JSON file.
//!
//! The file is the durable mirror of the in-memory library and is rewritten
//! whole on every change.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::JsonPersistence;
