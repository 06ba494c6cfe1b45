use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{info, warn};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::models::Book;

use super::error::StoreError;

/// Indentation used for the pretty-printed storage file.
const JSON_INDENT: &[u8] = b"    ";

/// Read the storage file into a book list.
///
/// A missing file or content that does not decode as a JSON array of books
/// yields an empty list. Any other I/O failure is returned to the caller.
pub fn read_books(path: &Path) -> Result<Vec<Book>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                "event=store_load status=missing path={}",
                path.display()
            );
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_slice::<Vec<Book>>(&bytes) {
        Ok(books) => {
            info!(
                "event=store_load status=ok path={} total={}",
                path.display(),
                books.len()
            );
            Ok(books)
        }
        Err(err) => {
            warn!(
                "event=store_load status=corrupt path={} error={}",
                path.display(),
                err
            );
            Ok(Vec::new())
        }
    }
}

/// Overwrite the storage file with the full book list, creating the parent
/// directory on first use.
pub fn write_books(path: &Path, books: &[Book]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(JSON_INDENT));
    books.serialize(&mut serializer)?;
    buffer.push(b'\n');

    fs::write(path, buffer).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
