use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::models::Book;

/// Number each book starting at one, using the shared listing format.
pub(crate) fn numbered_lines(books: &[Book]) -> Vec<String> {
    books
        .iter()
        .enumerate()
        .map(|(idx, book)| format!("{}. {}", idx + 1, book.display_line()))
        .collect()
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Place a cursor `column` cells right and `row` lines down from the top-left
/// of `area`, pinned inside it however long the typed text grows.
pub(crate) fn cursor_position(area: Rect, column: usize, row: usize) -> (u16, u16) {
    let last_x = area.right().saturating_sub(1).max(area.x);
    let last_y = area.bottom().saturating_sub(1).max(area.y);
    let column = u16::try_from(column).unwrap_or(u16::MAX);
    let row = u16::try_from(row).unwrap_or(u16::MAX);
    (
        area.x.saturating_add(column).min(last_x),
        area.y.saturating_add(row).min(last_y),
    )
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn numbering_starts_at_one() {
        let books = vec![
            Book::new("Dune", "Frank Herbert", "1965", "Sci-Fi", true),
            Book::new("Emma", "Jane Austen", "1815", "Novel", false),
        ];
        assert_eq!(
            numbered_lines(&books),
            vec![
                "1. Dune by Frank Herbert (1965) - Sci-Fi - Read".to_string(),
                "2. Emma by Jane Austen (1815) - Novel - Unread".to_string(),
            ]
        );
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }

    #[test]
    fn cursor_follows_short_input() {
        let area = Rect::new(10, 5, 40, 4);
        assert_eq!(cursor_position(area, 7, 1), (17, 6));
    }

    #[test]
    fn cursor_is_clamped_for_huge_input() {
        let area = Rect::new(10, 5, 40, 4);
        assert_eq!(cursor_position(area, 70_000, 0), (49, 5));
        assert_eq!(cursor_position(area, usize::MAX, usize::MAX), (49, 8));
    }

    #[test]
    fn cursor_stays_put_in_empty_area() {
        let area = Rect::new(3, 2, 0, 0);
        assert_eq!(cursor_position(area, 12, 1), (3, 2));
    }

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = anyhow!("disk full").context("failed to save library");
        assert_eq!(surface_error(&err), "disk full");
    }
}
