use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Book;

/// Form state for adding a book.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) genre: String,
    pub(crate) read: bool,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Enumerates the fields within the book form to drive focus management.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Year,
    Genre,
    Read,
}

impl BookField {
    const ORDER: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Year,
        BookField::Genre,
        BookField::Read,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Year => "Year",
            BookField::Genre => "Genre",
            BookField::Read => "Read",
        }
    }

    fn index(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }
}

impl BookForm {
    /// Move focus forward, wrapping back to the title.
    pub(crate) fn next_field(&mut self) {
        let next = (self.active.index() + 1) % BookField::ORDER.len();
        self.active = BookField::ORDER[next];
    }

    /// Move focus backward, wrapping to the read toggle.
    pub(crate) fn previous_field(&mut self) {
        let len = BookField::ORDER.len();
        let previous = (self.active.index() + len - 1) % len;
        self.active = BookField::ORDER[previous];
    }

    /// Feed a character to the active field. The read toggle only reacts to
    /// space, `y` and `n`.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if self.active == BookField::Read {
            return match ch.to_ascii_lowercase() {
                ' ' => {
                    self.read = !self.read;
                    true
                }
                'y' => {
                    self.read = true;
                    true
                }
                'n' => {
                    self.read = false;
                    true
                }
                _ => false,
            };
        }

        if ch.is_control() {
            return false;
        }
        match self.text_field_mut() {
            Some(value) => {
                value.push(ch);
                true
            }
            None => false,
        }
    }

    /// Remove the last character from the active text field.
    pub(crate) fn backspace(&mut self) {
        if let Some(value) = self.text_field_mut() {
            value.pop();
        }
    }

    fn text_field_mut(&mut self) -> Option<&mut String> {
        match self.active {
            BookField::Title => Some(&mut self.title),
            BookField::Author => Some(&mut self.author),
            BookField::Year => Some(&mut self.year),
            BookField::Genre => Some(&mut self.genre),
            BookField::Read => None,
        }
    }

    fn display_value(&self, field: BookField) -> String {
        match field {
            BookField::Title => self.title.clone(),
            BookField::Author => self.author.clone(),
            BookField::Year => self.year.clone(),
            BookField::Genre => self.genre.clone(),
            BookField::Read => {
                let label = if self.read { "[x] yes" } else { "[ ] no" };
                label.to_string()
            }
        }
    }

    /// Build the record to persist, keeping every field exactly as typed so
    /// removal by the same text always matches. Only the title is mandatory
    /// since it is the lookup key for removal.
    pub(crate) fn parse_inputs(&self) -> Result<Book> {
        if self.title.trim().is_empty() {
            return Err(anyhow!("Book title is required."));
        }
        Ok(Book::new(
            self.title.clone(),
            self.author.clone(),
            self.year.clone(),
            self.genre.clone(),
            self.read,
        ))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        let value = self.display_value(field);
        let is_active = self.active == field;
        let is_blank = field != BookField::Read && value.is_empty();

        let display = if is_blank && field == BookField::Title {
            "<required>".to_string()
        } else {
            value
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if is_blank {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Cursor column offset for the active field, or `None` on the toggle.
    pub(crate) fn cursor_offset(&self) -> Option<(usize, usize)> {
        let value = match self.active {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Year => &self.year,
            BookField::Genre => &self.genre,
            BookField::Read => return None,
        };
        let column = self.active.label().len() + 2 + value.chars().count();
        Some((column, self.active.index()))
    }
}

/// Single-line text prompt used for removal and search.
#[derive(Default, Clone)]
pub(crate) struct TextPrompt {
    pub(crate) input: String,
}

impl TextPrompt {
    pub(crate) fn push_char(&mut self, ch: char) {
        if !ch.is_control() {
            self.input.push(ch);
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.input.pop();
    }
}
