//! Domain models that mirror the JSON storage file and get passed throughout
//! the TUI. These types stay light-weight data holders so the store can focus
//! on persistence and the UI on presentation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One book's metadata. The field names double as the JSON keys in the
/// storage file, so renaming any of them breaks existing libraries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Title shown in listings. Also the (non-unique) lookup key for removal.
    pub title: String,
    pub author: String,
    /// Publication year as typed by the user. Kept as text so entries like
    /// "c. 1600" or "unknown" survive a round-trip.
    pub year: String,
    pub genre: String,
    /// Whether the book has been read.
    pub read: bool,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            genre: genre.into(),
            read,
        }
    }

    /// Human label for the `read` flag.
    pub fn read_status(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "Unread"
        }
    }

    /// Compose the `Title by Author (Year) - Genre - Status` line every list
    /// view renders.
    pub fn display_line(&self) -> String {
        format!(
            "{} by {} ({}) - {} - {}",
            self.title,
            self.author,
            self.year,
            self.genre,
            self.read_status()
        )
    }
}

/// Snapshot of how much of the collection has been read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingProgress {
    pub read: usize,
    pub total: usize,
    /// `read / total * 100`, or `0.0` for an empty collection.
    pub percentage: f64,
}

impl ReadingProgress {
    pub fn from_counts(read: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            read as f64 / total as f64 * 100.0
        };
        Self {
            read,
            total,
            percentage,
        }
    }
}

impl fmt::Display for ReadingProgress {
    /// Two decimals, matching the "Completion Rate" line in the progress view.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.percentage)
    }
}
