//! Book command handlers

use anyhow::{Context, Result};

use shelf_core::{Genre, Library, SearchField};

use super::to_index;
use crate::output::Output;
use crate::prompt::confirm;

/// Which books `list` shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFilter {
    All,
    Read,
    Unread,
}

impl ReadFilter {
    pub fn from_flags(read: bool, unread: bool) -> Self {
        match (read, unread) {
            (true, false) => ReadFilter::Read,
            (false, true) => ReadFilter::Unread,
            _ => ReadFilter::All,
        }
    }

    fn matches(&self, read_status: bool) -> bool {
        match self {
            ReadFilter::All => true,
            ReadFilter::Read => read_status,
            ReadFilter::Unread => !read_status,
        }
    }
}

/// Add a new book
pub fn add(
    library: &mut Library,
    title: String,
    author: String,
    year: i32,
    genre: Genre,
    read: bool,
    output: &Output,
) -> Result<()> {
    let index = library
        .add_book(&title, &author, year, genre, read)
        .context("Failed to add book")?;

    if let Some(book) = library.get(index) {
        output.success(&format!("Added '{}' at position {}", book.title, index + 1));
        if !output.is_json() {
            output.print_book(index, book);
        }
    }

    Ok(())
}

/// List books, optionally filtered by read status
pub fn list(library: &Library, filter: ReadFilter, output: &Output) -> Result<()> {
    if library.is_empty() && output.should_prompt() {
        output.message("Your library is empty. Add some books to get started!");
        return Ok(());
    }

    output.print_books(
        library
            .books()
            .iter()
            .enumerate()
            .filter(|(_, book)| filter.matches(book.read_status)),
    );
    Ok(())
}

/// Show a single book
pub fn show(library: &Library, position: usize, output: &Output) -> Result<()> {
    let index = to_index(position)?;
    let book = library
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("No book at position {}", position))?;

    output.print_book(index, book);
    Ok(())
}

/// Remove a book
pub fn remove(library: &mut Library, position: usize, yes: bool, output: &Output) -> Result<()> {
    let index = to_index(position)?;

    if !yes && output.should_prompt() {
        if let Some(book) = library.get(index) {
            println!("Remove book {}: {} by {}", position, book.title, book.author);
            if !confirm("Are you sure?")? {
                println!("Cancelled.");
                return Ok(());
            }
        }
    }

    let book = library
        .remove_at(index)
        .with_context(|| format!("Failed to remove book at position {}", position))?;

    output.success(&format!("Removed '{}'", book.title));
    Ok(())
}

/// Toggle read status of a book
pub fn toggle(library: &mut Library, position: usize, output: &Output) -> Result<()> {
    let index = to_index(position)?;

    let read = library
        .toggle_read_at(index)
        .with_context(|| format!("Failed to update book at position {}", position))?;

    if let Some(book) = library.get(index) {
        let status = if read { "read" } else { "unread" };
        output.success(&format!("Marked '{}' as {}", book.title, status));
    }
    Ok(())
}

/// Search books
pub fn search(library: &mut Library, term: String, field: SearchField, output: &Output) -> Result<()> {
    let hits = library.search(&term, field);
    output.print_hits(&term, field, hits);
    Ok(())
}

/// List the genres a book can have
pub fn genres(output: &Output) -> Result<()> {
    output.print_genres();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use shelf_core::{Config, LibraryError};
    use tempfile::TempDir;

    fn open(temp_dir: &TempDir) -> Library {
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            library_file: None,
            log_file: None,
        };
        Library::open_with_config(&config).unwrap()
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_read_filter() {
        assert_eq!(ReadFilter::from_flags(false, false), ReadFilter::All);
        assert_eq!(ReadFilter::from_flags(true, false), ReadFilter::Read);
        assert_eq!(ReadFilter::from_flags(false, true), ReadFilter::Unread);

        assert!(ReadFilter::Read.matches(true));
        assert!(!ReadFilter::Read.matches(false));
        assert!(ReadFilter::Unread.matches(false));
        assert!(ReadFilter::All.matches(false));
    }

    #[test]
    fn test_add_then_remove() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = open(&temp_dir);

        add(
            &mut library,
            "Dune".into(),
            "Frank Herbert".into(),
            1965,
            Genre::Science,
            false,
            &quiet(),
        )
        .unwrap();
        assert_eq!(library.len(), 1);

        remove(&mut library, 1, true, &quiet()).unwrap();
        assert!(library.is_empty());
    }

    #[test]
    fn test_add_invalid_year_reports_validation() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = open(&temp_dir);

        let err = add(
            &mut library,
            "Emma".into(),
            "Jane Austen".into(),
            815,
            Genre::Fiction,
            false,
            &quiet(),
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LibraryError>(),
            Some(LibraryError::Validation(_))
        ));
        assert!(library.is_empty());
    }

    #[test]
    fn test_toggle_uses_one_based_positions() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = open(&temp_dir);
        library
            .add_book("Dune", "Frank Herbert", 1965, Genre::Science, false)
            .unwrap();

        toggle(&mut library, 1, &quiet()).unwrap();
        assert!(library.get(0).unwrap().read_status);

        assert!(toggle(&mut library, 0, &quiet()).is_err());
        let err = toggle(&mut library, 2, &quiet()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LibraryError>(),
            Some(LibraryError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_search_records_result() {
        let temp_dir = TempDir::new().unwrap();
        let mut library = open(&temp_dir);
        library
            .add_book("Dune", "Frank Herbert", 1965, Genre::Science, false)
            .unwrap();

        search(&mut library, "herb".into(), SearchField::Author, &quiet()).unwrap();
        assert_eq!(library.last_search().map(|h| h.len()), Some(1));
    }
}
