use std::fs;
use std::path::PathBuf;

use book_collection_manager::store::{read_books, write_books};
use book_collection_manager::{Book, BookStore, StoreError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn library_path(dir: &TempDir) -> PathBuf {
    dir.path().join("books_data.json")
}

fn sample_books() -> Vec<Book> {
    vec![
        Book::new("Dune", "Frank Herbert", "1965", "Sci-Fi", true),
        Book::new("Emma", "Jane Austen", "1815", "Novel", false),
        Book::new("Children of Dune", "Frank Herbert", "1976", "Sci-Fi", false),
    ]
}

fn store_with(dir: &TempDir, books: Vec<Book>) -> BookStore {
    let mut store = BookStore::open(library_path(dir)).unwrap();
    for book in books {
        store.add(book).unwrap();
    }
    store
}

#[test]
fn missing_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    let store = BookStore::open(library_path(&dir)).unwrap();
    assert!(store.is_empty());
    assert!(!library_path(&dir).exists());
}

#[test]
fn corrupt_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(library_path(&dir), "{ not json").unwrap();
    let store = BookStore::open(library_path(&dir)).unwrap();
    assert!(store.is_empty());
}

#[test]
fn wrong_shape_opens_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(library_path(&dir), r#"{"title": "Dune"}"#).unwrap();
    assert!(BookStore::open(library_path(&dir)).unwrap().is_empty());

    fs::write(library_path(&dir), r#"[{"title": "Dune"}]"#).unwrap();
    assert!(BookStore::open(library_path(&dir)).unwrap().is_empty());
}

#[test]
fn non_utf8_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(library_path(&dir), [0xff, 0xfe, 0x5b]).unwrap();
    assert!(BookStore::open(library_path(&dir)).unwrap().is_empty());
}

#[test]
fn unreadable_path_is_a_fatal_error() {
    let dir = TempDir::new().unwrap();
    let err = BookStore::open(dir.path()).unwrap_err();
    assert!(matches!(err, StoreError::Read { .. }));
}

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let store = store_with(&dir, sample_books());

    let reopened = BookStore::open(store.path()).unwrap();
    assert_eq!(reopened.books(), sample_books().as_slice());
}

#[test]
fn add_keeps_insertion_order_and_persists_each_time() {
    let dir = TempDir::new().unwrap();
    let mut store = BookStore::open(library_path(&dir)).unwrap();

    for (count, book) in sample_books().into_iter().enumerate() {
        store.add(book).unwrap();
        assert_eq!(read_books(&library_path(&dir)).unwrap().len(), count + 1);
    }

    let titles: Vec<&str> = store.books().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Dune", "Emma", "Children of Dune"]);
}

#[test]
fn duplicate_titles_are_kept() {
    let dir = TempDir::new().unwrap();
    let book = Book::new("Dune", "Frank Herbert", "1965", "Sci-Fi", true);
    let store = store_with(&dir, vec![book.clone(), book]);
    assert_eq!(store.len(), 2);
}

#[test]
fn delete_is_case_insensitive_and_removes_first_match() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(
        &dir,
        vec![
            Book::new("Dune", "Frank Herbert", "1965", "Sci-Fi", true),
            Book::new("Emma", "Jane Austen", "1815", "Novel", false),
            Book::new("DUNE", "Someone Else", "2001", "Parody", false),
        ],
    );

    let removed = store.delete("dUnE").unwrap();
    assert_eq!(removed.author, "Frank Herbert");
    assert_eq!(store.len(), 2);
    assert_eq!(store.books()[1].author, "Someone Else");

    let on_disk = read_books(&library_path(&dir)).unwrap();
    assert_eq!(on_disk, store.books());
}

#[test]
fn delete_requires_exact_title() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(&dir, sample_books());

    let err = store.delete("Dun").unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, StoreError::NotFound(ref title) if title == "Dun"));
    assert_eq!(store.books(), sample_books().as_slice());
}

#[test]
fn delete_missing_title_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(&dir, sample_books());
    let before = fs::read(library_path(&dir)).unwrap();

    assert!(store.delete("Ulysses").is_err());

    assert_eq!(fs::read(library_path(&dir)).unwrap(), before);
}

#[test]
fn search_matches_title_or_author_ignoring_case() {
    let dir = TempDir::new().unwrap();
    let store = store_with(&dir, sample_books());

    let by_title: Vec<String> = store.search("DUNE").into_iter().map(|b| b.title).collect();
    assert_eq!(by_title, vec!["Dune", "Children of Dune"]);

    let by_author: Vec<String> = store.search("austen").into_iter().map(|b| b.title).collect();
    assert_eq!(by_author, vec!["Emma"]);

    assert!(store.search("tolkien").is_empty());
}

#[test]
fn search_ignores_genre_and_year() {
    let dir = TempDir::new().unwrap();
    let store = store_with(&dir, sample_books());
    assert!(store.search("sci-fi").is_empty());
    assert!(store.search("1965").is_empty());
}

#[test]
fn empty_search_term_matches_everything() {
    let dir = TempDir::new().unwrap();
    let store = store_with(&dir, sample_books());
    assert_eq!(store.search(""), sample_books());
}

#[test]
fn progress_counts_read_books() {
    let dir = TempDir::new().unwrap();
    let store = store_with(&dir, sample_books());
    let progress = store.progress();
    assert_eq!(progress.read, 1);
    assert_eq!(progress.total, 3);
    assert_eq!(progress.to_string(), "33.33%");
}

#[test]
fn progress_edges() {
    let dir = TempDir::new().unwrap();
    let empty = BookStore::open(library_path(&dir)).unwrap();
    assert_eq!(empty.progress().percentage, 0.0);

    let other = TempDir::new().unwrap();
    let all_read = store_with(
        &other,
        vec![
            Book::new("Dune", "Frank Herbert", "1965", "Sci-Fi", true),
            Book::new("Emma", "Jane Austen", "1815", "Novel", true),
        ],
    );
    assert_eq!(all_read.progress().percentage, 100.0);
}

#[test]
fn storage_file_is_pretty_json_with_expected_keys() {
    let dir = TempDir::new().unwrap();
    store_with(
        &dir,
        vec![Book::new("Dune", "Frank Herbert", "1965", "Sci-Fi", true)],
    );

    let text = fs::read_to_string(library_path(&dir)).unwrap();
    let expected = r#"[
    {
        "title": "Dune",
        "author": "Frank Herbert",
        "year": "1965",
        "genre": "Sci-Fi",
        "read": true
    }
]
"#;
    assert_eq!(text, expected);
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b").join("books.json");
    write_books(&nested, &sample_books()).unwrap();
    assert_eq!(read_books(&nested).unwrap(), sample_books());
}

#[test]
fn load_discards_unsaved_state() {
    let dir = TempDir::new().unwrap();
    let mut store = store_with(&dir, sample_books());

    write_books(&library_path(&dir), &[]).unwrap();
    store.load().unwrap();
    assert!(store.is_empty());
}

#[test]
fn reads_files_written_by_other_tools() {
    let dir = TempDir::new().unwrap();
    fs::write(
        library_path(&dir),
        r#"[{"title":"Emma","author":"Jane Austen","year":"1815","genre":"Novel","read":false}]"#,
    )
    .unwrap();
    let store = BookStore::open(library_path(&dir)).unwrap();
    assert_eq!(
        store.books(),
        &[Book::new("Emma", "Jane Austen", "1815", "Novel", false)]
    );
}
