use std::path::{Path, PathBuf};

use log::info;

use crate::models::{Book, ReadingProgress};

use super::error::StoreError;
use super::file::{read_books, write_books};

/// In-memory book collection bound to its storage file.
///
/// Insertion order is preserved and duplicate titles are allowed. Every
/// mutation rewrites the whole file before returning.
#[derive(Debug)]
pub struct BookStore {
    path: PathBuf,
    books: Vec<Book>,
}

impl BookStore {
    /// Bind a store to `path` and hydrate it from disk.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self {
            path: path.into(),
            books: Vec::new(),
        };
        store.load()?;
        Ok(store)
    }

    /// Replace the in-memory collection with the storage file's contents.
    /// Missing or malformed files leave the store empty.
    pub fn load(&mut self) -> Result<(), StoreError> {
        self.books = read_books(&self.path)?;
        Ok(())
    }

    /// Overwrite the storage file with the current collection.
    pub fn save(&self) -> Result<(), StoreError> {
        write_books(&self.path, &self.books)?;
        info!(
            "event=store_save status=ok path={} total={}",
            self.path.display(),
            self.books.len()
        );
        Ok(())
    }

    /// Append a book and persist.
    pub fn add(&mut self, book: Book) -> Result<(), StoreError> {
        self.books.push(book);
        info!("event=book_add status=ok total={}", self.books.len());
        self.save()
    }

    /// Remove the first book whose title equals `title` ignoring case, persist,
    /// and hand the removed record back.
    pub fn delete(&mut self, title: &str) -> Result<Book, StoreError> {
        let needle = title.to_lowercase();
        let Some(index) = self
            .books
            .iter()
            .position(|book| book.title.to_lowercase() == needle)
        else {
            info!("event=book_delete status=not_found");
            return Err(StoreError::NotFound(title.to_string()));
        };

        let removed = self.books.remove(index);
        info!("event=book_delete status=ok total={}", self.books.len());
        self.save()?;
        Ok(removed)
    }

    /// Books whose title or author contains `term`, ignoring case, in
    /// collection order.
    pub fn search(&self, term: &str) -> Vec<Book> {
        let needle = term.to_lowercase();
        self.books
            .iter()
            .filter(|book| {
                book.title.to_lowercase().contains(&needle)
                    || book.author.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub fn progress(&self) -> ReadingProgress {
        let read = self.books.iter().filter(|book| book.read).count();
        ReadingProgress::from_counts(read, self.books.len())
    }

    /// Every book in insertion order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
