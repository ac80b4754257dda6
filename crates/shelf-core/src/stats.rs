//! Library statistics
//!
//! Derived counts over a snapshot of the library. Always computed fresh.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::Serialize;

use crate::models::{Book, Genre};

/// Aggregate view of the library
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryStats {
    pub total_books: usize,
    pub read_books: usize,
    /// Share of books read, 0-100 (0 for an empty library)
    pub percent_read: f64,
    /// Most common first; ties keep first-seen order
    pub genre_counts: Vec<(Genre, usize)>,
    /// Most common first; ties keep first-seen order
    pub author_counts: Vec<(String, usize)>,
    /// Oldest decade first
    pub decade_counts: Vec<(i32, usize)>,
}

impl LibraryStats {
    pub fn unread_books(&self) -> usize {
        self.total_books.saturating_sub(self.read_books)
    }

    /// The `n` authors with the most books
    pub fn top_authors(&self, n: usize) -> &[(String, usize)] {
        &self.author_counts[..n.min(self.author_counts.len())]
    }
}

/// Compute statistics over `books`
pub fn compute_stats(books: &[Book]) -> LibraryStats {
    let total_books = books.len();
    let read_books = books.iter().filter(|b| b.read_status).count();
    let percent_read = if total_books == 0 {
        0.0
    } else {
        read_books as f64 / total_books as f64 * 100.0
    };

    let mut decades: BTreeMap<i32, usize> = BTreeMap::new();
    for book in books {
        *decades.entry(book.decade()).or_insert(0) += 1;
    }

    LibraryStats {
        total_books,
        read_books,
        percent_read,
        genre_counts: count_by_frequency(books.iter().map(|b| b.genre)),
        author_counts: count_by_frequency(books.iter().map(|b| b.author.clone())),
        decade_counts: decades.into_iter().collect(),
    }
}

/// Count occurrences, most frequent first
///
/// The sort is stable, so equal counts stay in first-seen order.
fn count_by_frequency<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for key in keys {
        match slots.get(&key).copied() {
            Some(slot) => counts[slot].1 += 1,
            None => {
                slots.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(author: &str, year: i32, genre: Genre, read: bool) -> Book {
        Book::new("Title", author, year, genre, read).unwrap()
    }

    #[test]
    fn test_empty_library() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_books, 0);
        assert_eq!(stats.read_books, 0);
        assert_eq!(stats.percent_read, 0.0);
        assert!(stats.genre_counts.is_empty());
        assert!(stats.author_counts.is_empty());
        assert!(stats.decade_counts.is_empty());
    }

    #[test]
    fn test_read_counts() {
        let books = vec![
            book("A", 2001, Genre::Art, true),
            book("B", 2002, Genre::Art, false),
            book("C", 2003, Genre::Art, false),
            book("D", 2004, Genre::Art, true),
        ];
        let stats = compute_stats(&books);
        assert_eq!(stats.total_books, 4);
        assert_eq!(stats.read_books, 2);
        assert_eq!(stats.unread_books(), 2);
        assert_eq!(stats.percent_read, 50.0);
    }

    #[test]
    fn test_genre_counts_sorted_by_count() {
        let books = vec![
            book("A", 2000, Genre::Fiction, false),
            book("B", 2000, Genre::Fiction, false),
            book("C", 2000, Genre::Science, false),
        ];
        let stats = compute_stats(&books);
        assert_eq!(
            stats.genre_counts,
            vec![(Genre::Fiction, 2), (Genre::Science, 1)]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let books = vec![
            book("Le Guin", 1969, Genre::Fantasy, false),
            book("Asimov", 1951, Genre::Science, false),
            book("Asimov", 1950, Genre::Science, false),
            book("Le Guin", 1974, Genre::Fantasy, false),
            book("Austen", 1815, Genre::Romance, false),
        ];
        let stats = compute_stats(&books);
        assert_eq!(
            stats.genre_counts,
            vec![
                (Genre::Fantasy, 2),
                (Genre::Science, 2),
                (Genre::Romance, 1)
            ]
        );
        assert_eq!(
            stats.author_counts,
            vec![
                ("Le Guin".to_string(), 2),
                ("Asimov".to_string(), 2),
                ("Austen".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_decade_counts_ascending() {
        let books = vec![
            book("A", 2021, Genre::Other, false),
            book("B", 1995, Genre::Other, false),
            book("C", 1991, Genre::Other, false),
        ];
        let stats = compute_stats(&books);
        assert_eq!(stats.decade_counts, vec![(1990, 2), (2020, 1)]);
    }

    #[test]
    fn test_top_authors() {
        let books = vec![
            book("X", 2000, Genre::Other, false),
            book("Y", 2000, Genre::Other, false),
            book("Y", 2000, Genre::Other, false),
        ];
        let stats = compute_stats(&books);
        assert_eq!(stats.top_authors(1), &[("Y".to_string(), 2)]);
        assert_eq!(stats.top_authors(5).len(), 2);
        assert!(stats.top_authors(0).is_empty());
    }

    #[test]
    fn test_unread_books_never_underflows() {
        let stats = LibraryStats {
            total_books: 1,
            read_books: 3,
            percent_read: 0.0,
            genre_counts: Vec::new(),
            author_counts: Vec::new(),
            decade_counts: Vec::new(),
        };
        assert_eq!(stats.unread_books(), 0);
    }

    #[test]
    fn test_percent_read_fraction() {
        let books = vec![
            book("A", 2000, Genre::Poetry, true),
            book("B", 2000, Genre::Poetry, false),
            book("C", 2000, Genre::Poetry, false),
        ];
        let stats = compute_stats(&books);
        assert!((stats.percent_read - 100.0 / 3.0).abs() < 1e-9);
    }
}
