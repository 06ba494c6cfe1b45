use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use log::info;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::Book;
use crate::store::BookStore;

use super::forms::{BookField, BookForm, TextPrompt};
use super::helpers::{centered_rect, cursor_position, numbered_lines, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Shown on the welcome panel so libraries kept elsewhere stay reachable.
const LIBRARY_HINT: &str =
    "Open another library: book-collection-manager <path/to/books_data.json>";
/// Width of the menu column on the left.
const MENU_WIDTH: u16 = 30;

/// The six operations the main menu offers, in the order they are numbered.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum MenuAction {
    AddBook,
    RemoveBook,
    SearchBooks,
    ViewAll,
    ViewProgress,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 6] = [
        MenuAction::AddBook,
        MenuAction::RemoveBook,
        MenuAction::SearchBooks,
        MenuAction::ViewAll,
        MenuAction::ViewProgress,
        MenuAction::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuAction::AddBook => "Add a new book",
            MenuAction::RemoveBook => "Remove a book",
            MenuAction::SearchBooks => "Search for books",
            MenuAction::ViewAll => "View all books",
            MenuAction::ViewProgress => "View reading progress",
            MenuAction::Exit => "Exit",
        }
    }

    /// Map a typed menu digit (`'1'`..=`'6'`) to its action.
    fn from_digit(ch: char) -> Option<Self> {
        let index = ch.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }
}

/// What the main panel shows.
enum Screen {
    Welcome,
    Library,
    SearchResults(SearchResults),
    Progress,
}

/// Snapshot of a finished search. The term is kept so the results can be
/// refreshed after the collection changes.
struct SearchResults {
    term: String,
    books: Vec<Book>,
}

/// Modal overlays scoped to the current screen.
enum Mode {
    Normal,
    AddingBook(BookForm),
    RemovingBook(TextPrompt),
    Searching(TextPrompt),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Owns the store so every
/// mutation goes through it.
pub struct App {
    store: BookStore,
    selected: usize,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: BookStore) -> Self {
        Self {
            store,
            selected: 0,
            screen: Screen::Welcome,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn store(&self) -> &BookStore {
        &self.store
    }

    /// Feed one key press through the state machine. Returns `true` once the
    /// user has exited and the library has been saved.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::RemovingBook(prompt) => self.handle_remove_prompt(code, prompt)?,
            Mode::Searching(prompt) => self.handle_search_prompt(code, prompt)?,
        };

        Ok(exit)
    }

    /// Save and leave, regardless of the current mode.
    pub fn exit(&mut self) -> Result<()> {
        self.mode = Mode::Normal;
        self.store.save().context("failed to save library on exit")?;
        info!("event=app_exit status=ok total={}", self.store.len());
        self.set_status(
            "Thank you for using Book Collection Manager. Goodbye!",
            StatusKind::Info,
        );
        Ok(())
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Enter => {
                let action = MenuAction::ALL[self.selected];
                return self.run_action(action, exit);
            }
            KeyCode::Esc => {
                self.clear_status();
                self.screen = Screen::Welcome;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                return self.run_action(MenuAction::Exit, exit);
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() => match MenuAction::from_digit(ch) {
                Some(action) => {
                    self.selected = MenuAction::ALL
                        .iter()
                        .position(|candidate| *candidate == action)
                        .unwrap_or(0);
                    return self.run_action(action, exit);
                }
                None => self.set_status(
                    "Invalid input. Please choose between 1 and 6.",
                    StatusKind::Error,
                ),
            },
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn run_action(&mut self, action: MenuAction, exit: &mut bool) -> Result<Mode> {
        self.clear_status();
        match action {
            MenuAction::AddBook => return Ok(Mode::AddingBook(BookForm::default())),
            MenuAction::RemoveBook => return Ok(Mode::RemovingBook(TextPrompt::default())),
            MenuAction::SearchBooks => return Ok(Mode::Searching(TextPrompt::default())),
            MenuAction::ViewAll => self.screen = Screen::Library,
            MenuAction::ViewProgress => self.screen = Screen::Progress,
            MenuAction::Exit => {
                self.exit()?;
                *exit = true;
            }
        }
        Ok(Mode::Normal)
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok(book) => {
                    self.store.add(book).context("failed to save new book")?;
                    self.refresh_search();
                    self.set_status("Book has been added successfully!", StatusKind::Info);
                    return Ok(Mode::Normal);
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::AddingBook(form))
    }

    fn handle_remove_prompt(&mut self, code: KeyCode, mut prompt: TextPrompt) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Removal cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Enter => {
                match self.store.delete(&prompt.input) {
                    Ok(_) => {
                        self.refresh_search();
                        self.set_status("Book has been deleted successfully.", StatusKind::Info);
                    }
                    Err(err) if err.is_not_found() => {
                        self.set_status("Book not found!", StatusKind::Error);
                    }
                    Err(err) => return Err(err).context("failed to save after removal"),
                }
                return Ok(Mode::Normal);
            }
            KeyCode::Char(ch) => prompt.push_char(ch),
            _ => {}
        }
        Ok(Mode::RemovingBook(prompt))
    }

    fn handle_search_prompt(&mut self, code: KeyCode, mut prompt: TextPrompt) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Search cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Enter => {
                let books = self.store.search(&prompt.input);
                if books.is_empty() {
                    self.set_status("No matching book found!", StatusKind::Error);
                } else {
                    self.set_status(format!("{} matching book(s).", books.len()), StatusKind::Info);
                }
                self.screen = Screen::SearchResults(SearchResults {
                    term: prompt.input,
                    books,
                });
                return Ok(Mode::Normal);
            }
            KeyCode::Char(ch) => prompt.push_char(ch),
            _ => {}
        }
        Ok(Mode::Searching(prompt))
    }

    /// Re-run the visible search so results never show removed books.
    fn refresh_search(&mut self) {
        if let Screen::SearchResults(results) = &mut self.screen {
            results.books = self.store.search(&results.term);
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = MenuAction::ALL.len() as isize;
        let next = (self.selected as isize + delta).rem_euclid(len);
        self.selected = next as usize;
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(0)])
            .split(content_area);

        self.draw_menu(frame, columns[0]);
        match &self.screen {
            Screen::Welcome => self.draw_welcome(frame, columns[1]),
            Screen::Library => self.draw_library(frame, columns[1]),
            Screen::SearchResults(results) => self.draw_search_results(frame, columns[1], results),
            Screen::Progress => self.draw_progress(frame, columns[1]),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingBook(form) => self.draw_book_form(frame, area, form),
            Mode::RemovingBook(prompt) => {
                self.draw_prompt(frame, area, "Remove a Book", "Title", prompt)
            }
            Mode::Searching(prompt) => {
                self.draw_prompt(frame, area, "Search", "Title or author", prompt)
            }
            Mode::Normal => {}
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = MenuAction::ALL
            .iter()
            .enumerate()
            .map(|(idx, action)| ListItem::new(format!("{}. {}", idx + 1, action.label())))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_welcome(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Welcome to Your Book Collection Manager!",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("{} book(s) in your library.", self.store.len())),
            Line::from(Span::styled(
                self.store.path().display().to_string(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                LIBRARY_HINT,
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_library(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Your Books Collection");
        if self.store.is_empty() {
            let message = Paragraph::new("Your library is empty!")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }
        self.render_book_list(frame, area, self.store.books(), block);
    }

    fn draw_search_results(&self, frame: &mut Frame, area: Rect, results: &SearchResults) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Matching Books: '{}'", results.term));
        if results.books.is_empty() {
            let message = Paragraph::new("No matching book found!")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }
        self.render_book_list(frame, area, &results.books, block);
    }

    fn render_book_list(&self, frame: &mut Frame, area: Rect, books: &[Book], block: Block) {
        let lines: Vec<Line> = numbered_lines(books).into_iter().map(Line::from).collect();
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn draw_progress(&self, frame: &mut Frame, area: Rect) {
        let progress = self.store.progress();
        let lines = vec![
            Line::from(Span::styled(
                "Reading Progress:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Books Read: {}/{}", progress.read, progress.total)),
            Line::from(format!("Completion Rate: {progress}")),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match self.mode {
            Mode::AddingBook(_) => Line::from(vec![
                Span::styled("[Enter]", key),
                Span::raw(" Save  "),
                Span::styled("[Tab]", key),
                Span::raw(" Next field  "),
                Span::styled("[Space]", key),
                Span::raw(" Toggle read  "),
                Span::styled("[Esc]", key),
                Span::raw(" Cancel"),
            ]),
            Mode::RemovingBook(_) | Mode::Searching(_) => Line::from(vec![
                Span::styled("[Enter]", key),
                Span::raw(" Confirm  "),
                Span::styled("[Esc]", key),
                Span::raw(" Cancel"),
            ]),
            Mode::Normal => Line::from(vec![
                Span::styled("[1-6]", key),
                Span::raw(" Choose  "),
                Span::styled("[Up/Down]", key),
                Span::raw(" Move  "),
                Span::styled("[Enter]", key),
                Span::raw(" Open  "),
                Span::styled("[Esc]", key),
                Span::raw(" Back  "),
                Span::styled("[q]", key),
                Span::raw(" Save & quit"),
            ]),
        }
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add a New Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line(BookField::Title),
            form.build_line(BookField::Author),
            form.build_line(BookField::Year),
            form.build_line(BookField::Genre),
            form.build_line(BookField::Read),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save | Tab to switch | Space toggles read | Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        if let Some((column, row)) = form.cursor_offset() {
            frame.set_cursor_position(cursor_position(inner, column, row));
        }
    }

    fn draw_prompt(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        label: &str,
        prompt: &TextPrompt,
    ) {
        let popup_area = centered_rect(60, 20, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        let prefix = format!("{label}: ");
        let paragraph = Paragraph::new(Span::raw(format!("{prefix}{}", prompt.input)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let column = prefix.len().saturating_add(prompt.input.chars().count());
        frame.set_cursor_position(cursor_position(inner, column, 0));
    }
}
