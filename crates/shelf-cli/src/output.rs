//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)
//!
//! Positions are shown 1-based; the library itself counts from 0.

use serde_json::json;
use shelf_core::{Book, Genre, LibraryStats, SearchField, SearchHit};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single book with its library index
    pub fn print_book(&self, index: usize, book: &Book) {
        match self.format {
            OutputFormat::Human => {
                println!("Position:    {}", index + 1);
                println!("Title:       {}", book.title);
                println!("Author:      {}", book.author);
                println!("Published:   {}", book.publication_year);
                println!("Genre:       {}", book.genre);
                println!("Status:      {}", read_label(book.read_status));
                println!("Added:       {}", book.added_date().format("%Y-%m-%d %H:%M"));
            }
            OutputFormat::Json => {
                println!("{}", pretty(&book_json(index, book)));
            }
            OutputFormat::Quiet => {
                println!("{}", index + 1);
            }
        }
    }

    /// Print books alongside their library indexes
    pub fn print_books<'a, I>(&self, books: I)
    where
        I: IntoIterator<Item = (usize, &'a Book)>,
    {
        let books: Vec<(usize, &Book)> = books.into_iter().collect();
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("No books found.");
                    return;
                }
                for (index, book) in &books {
                    println!("{}", book_row(*index, book));
                }
                println!("\n{} book(s)", books.len());
            }
            OutputFormat::Json => {
                let json_books: Vec<_> = books
                    .iter()
                    .map(|(index, book)| book_json(*index, book))
                    .collect();
                println!("{}", pretty(&json_books));
            }
            OutputFormat::Quiet => {
                for (index, _) in &books {
                    println!("{}", index + 1);
                }
            }
        }
    }

    /// Print search results
    pub fn print_hits(&self, term: &str, field: SearchField, hits: &[SearchHit]) {
        if self.format == OutputFormat::Human {
            if term.is_empty() {
                println!("Enter a search term.");
                return;
            }
            if hits.is_empty() {
                println!("No books found matching {} '{}'.", field, term);
                return;
            }
            println!("Found {} result(s) for {} '{}':\n", hits.len(), field, term);
        }
        self.print_books(hits.iter().map(|hit| (hit.position, &hit.book)));
    }

    /// Print library statistics, listing at most `top` authors
    pub fn print_stats(&self, stats: &LibraryStats, top: usize) {
        match self.format {
            OutputFormat::Human => {
                if stats.total_books == 0 {
                    println!("Your library is empty. Add some books to see stats!");
                    return;
                }
                println!("Library Statistics");
                println!("==================");
                println!();
                println!("Total books:     {}", stats.total_books);
                println!("Books read:      {}", stats.read_books);
                println!("Books unread:    {}", stats.unread_books());
                println!("Percentage read: {:.1}%", stats.percent_read);

                println!();
                println!("By genre:");
                for (genre, count) in &stats.genre_counts {
                    println!("  {:<12} {}", genre.label(), count);
                }

                println!();
                println!("By decade:");
                for (decade, count) in &stats.decade_counts {
                    println!("  {}s        {}", decade, count);
                }

                let authors = stats.top_authors(top);
                if !authors.is_empty() {
                    println!();
                    println!("Top authors:");
                    for (author, count) in authors {
                        println!("  {}: {} book{}", author, count, plural(*count));
                    }
                }
            }
            OutputFormat::Json => {
                let genres: Vec<_> = stats
                    .genre_counts
                    .iter()
                    .map(|(genre, count)| json!({"genre": genre, "count": count}))
                    .collect();
                let authors: Vec<_> = stats
                    .top_authors(top)
                    .iter()
                    .map(|(author, count)| json!({"author": author, "count": count}))
                    .collect();
                let decades: Vec<_> = stats
                    .decade_counts
                    .iter()
                    .map(|(decade, count)| json!({"decade": decade, "count": count}))
                    .collect();
                println!(
                    "{}",
                    pretty(&json!({
                        "total_books": stats.total_books,
                        "read_books": stats.read_books,
                        "percent_read": stats.percent_read,
                        "genres": genres,
                        "authors": authors,
                        "decades": decades
                    }))
                );
            }
            OutputFormat::Quiet => {
                println!(
                    "{} {} {:.1}",
                    stats.total_books, stats.read_books, stats.percent_read
                );
            }
        }
    }

    /// Print the accepted genres
    pub fn print_genres(&self) {
        match self.format {
            OutputFormat::Json => {
                let labels: Vec<_> = Genre::ALL.iter().map(|g| g.label()).collect();
                println!("{}", pretty(&labels));
            }
            OutputFormat::Human | OutputFormat::Quiet => {
                for genre in Genre::ALL {
                    println!("{}", genre);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!("{}", json!({"status": "success", "message": message}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn book_json(index: usize, book: &Book) -> serde_json::Value {
    json!({
        "position": index + 1,
        "title": book.title,
        "author": book.author,
        "publication_year": book.publication_year,
        "genre": book.genre,
        "read_status": book.read_status,
        "added_date": book.added_date().format("%Y-%m-%d %H:%M:%S").to_string()
    })
}

fn book_row(index: usize, book: &Book) -> String {
    format!(
        "{:>3} | {:<30} | {:<20} | {} | {:<11} | {}",
        index + 1,
        truncate(&book.title, 30),
        truncate(&book.author, 20),
        book.publication_year,
        book.genre.label(),
        read_label(book.read_status)
    )
}

fn pretty(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| json!({"error": e.to_string()}).to_string())
}

fn read_label(read: bool) -> &'static str {
    if read {
        "Read"
    } else {
        "Unread"
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
