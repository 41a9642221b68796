//! Shared helpers for TUI views

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Color;

use crate::domain::ContentStatus;

/// Truncate a string to max_len characters, ending in "~" if cut
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len == 0 {
        String::new()
    } else {
        let mut truncated: String = s.chars().take(max_len - 1).collect();
        truncated.push('~');
        truncated
    }
}

/// Calendar colour for a status
pub fn status_color(status: ContentStatus) -> Color {
    match status {
        ContentStatus::Pending => Color::Gray,
        ContentStatus::InProgress => Color::Yellow,
        ContentStatus::Review => Color::Magenta,
        ContentStatus::Complete => Color::Green,
    }
}

/// Rect of the given size centred in `area`, clamped to fit
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}
