//! Persistence module split across logical submodules.

mod books;
mod error;
mod file;

pub use books::BookStore;
pub use error::StoreError;
pub use file::{read_books, write_books};
