//! Terminal front end: a numbered menu on the left, the active view on the
//! right, and modal prompts for the operations that need input.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
