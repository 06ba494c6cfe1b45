//! Core library surface for the Book Collection Manager TUI application.
//!
//! The `bin` target wires these pieces together; tests and other tooling can
//! drive the store directly without a terminal.
pub mod config;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;

/// Runtime settings resolved from the home directory, arguments and env.
pub use config::{AppConfig, ConfigOverrides};

/// The two domain types other layers manipulate.
pub use models::{Book, ReadingProgress};

/// The JSON-backed collection and its error type.
pub use store::{BookStore, StoreError};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
