//! Book search
//!
//! Case-insensitive substring matching over a single field. Results keep
//! library order and remember where each match sits in the library.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::models::Book;

/// Field a search term is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchField {
    Title,
    Author,
    Genre,
}

impl SearchField {
    fn value_of<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            SearchField::Title => &book.title,
            SearchField::Author => &book.author,
            SearchField::Genre => book.genre.label(),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Genre => "genre",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "genre" => Ok(SearchField::Genre),
            other => Err(format!(
                "unknown search field '{}' (expected title, author or genre)",
                other
            )),
        }
    }
}

/// A book matched by a search, with its position in the library
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub position: usize,
    pub book: Book,
}

/// Find books whose `field` contains `term`, ignoring case
///
/// An empty term matches nothing.
pub fn search(books: &[Book], term: &str, field: SearchField) -> Vec<SearchHit> {
    if term.is_empty() {
        return Vec::new();
    }

    let needle = term.to_lowercase();
    books
        .iter()
        .enumerate()
        .filter(|(_, book)| field.value_of(book).to_lowercase().contains(&needle))
        .map(|(position, book)| SearchHit {
            position,
            book: book.clone(),
        })
        .collect()
}
