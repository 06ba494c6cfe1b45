//! Binary entry point that glues the JSON-backed book store to the TUI: resolve
//! the configuration, start file logging, load the library, and drive the
//! Ratatui event loop until the user exits.
use book_collection_manager::logging::init_logging;
use book_collection_manager::{run_app, App, AppConfig, BookStore};

/// Returning a `Result` bubbles fatal problems (an unreadable library file, a
/// failed save) up to the terminal after the screen has been restored.
fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Logging is best effort; the library works without it.
    let _logger = match init_logging(&config.log_level, &config.log_dir) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            None
        }
    };

    let store = BookStore::open(&config.data_file)?;
    let mut app = App::new(store);
    run_app(&mut app)
}
