//! Data models for Shelf
//!
//! Defines the core data structures: Book and Genre.
//! Field names match the JSON file the library is persisted to.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Earliest publication year accepted for a new book
pub const MIN_PUBLICATION_YEAR: i32 = 1000;

/// Book genre
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Science,
    Technology,
    Fantasy,
    Romance,
    Poetry,
    #[serde(rename = "Self-help")]
    SelfHelp,
    Art,
    Religion,
    History,
    Other,
}

impl Genre {
    /// All genres, in the order they are offered for selection
    pub const ALL: [Genre; 12] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Science,
        Genre::Technology,
        Genre::Fantasy,
        Genre::Romance,
        Genre::Poetry,
        Genre::SelfHelp,
        Genre::Art,
        Genre::Religion,
        Genre::History,
        Genre::Other,
    ];

    /// Display label, identical to the persisted form
    pub fn label(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::Science => "Science",
            Genre::Technology => "Technology",
            Genre::Fantasy => "Fantasy",
            Genre::Romance => "Romance",
            Genre::Poetry => "Poetry",
            Genre::SelfHelp => "Self-help",
            Genre::Art => "Art",
            Genre::Religion => "Religion",
            Genre::History => "History",
            Genre::Other => "Other",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Genre {
    type Err = ValidationError;

    /// Parse a genre label, ignoring case, spaces and hyphens
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Genre::ALL
            .into_iter()
            .find(|genre| normalize_label(genre.label()) == wanted)
            .ok_or_else(|| ValidationError::UnknownGenre(s.trim().to_string()))
    }
}

fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// A book in the collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Book title
    pub title: String,
    /// Author name
    pub author: String,
    /// Year of publication
    pub publication_year: i32,
    /// Genre
    pub genre: Genre,
    /// Whether the book has been read
    pub read_status: bool,
    /// When the book was added to the library (local time, second precision)
    #[serde(with = "added_date_format")]
    added_date: NaiveDateTime,
}

impl Book {
    /// Create a new book, validating it against the current calendar year
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
        genre: Genre,
        read_status: bool,
    ) -> Result<Self, ValidationError> {
        let now = Local::now().naive_local().trunc_subsecs(0);
        Self::new_at(title, author, publication_year, genre, read_status, now)
    }

    /// Create a new book with an explicit creation timestamp
    ///
    /// The year's upper bound is taken from `added_date`.
    pub fn new_at(
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
        genre: Genre,
        read_status: bool,
        added_date: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        let book = Self {
            title: title.into().trim().to_string(),
            author: author.into().trim().to_string(),
            publication_year,
            genre,
            read_status,
            added_date,
        };
        book.validate(added_date.year())?;
        Ok(book)
    }

    /// Check the record invariants, accepting years up to `max_year`
    ///
    /// The fields are public and books can be deserialized, so anything
    /// entering the library is checked again here.
    pub fn validate(&self, max_year: i32) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.author.trim().is_empty() {
            return Err(ValidationError::EmptyAuthor);
        }
        if !(MIN_PUBLICATION_YEAR..=max_year).contains(&self.publication_year) {
            return Err(ValidationError::YearOutOfRange {
                year: self.publication_year,
                min: MIN_PUBLICATION_YEAR,
                max: max_year,
            });
        }
        Ok(())
    }

    /// When the book was added
    pub fn added_date(&self) -> NaiveDateTime {
        self.added_date
    }

    /// Decade bucket the publication year falls in
    pub fn decade(&self) -> i32 {
        self.publication_year.div_euclid(10) * 10
    }

    pub(crate) fn toggle_read(&mut self) {
        self.read_status = !self.read_status;
    }
}

/// `added_date` is stored as `YYYY-MM-DD HH:MM:SS`
mod added_date_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
