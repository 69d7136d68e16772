//! Shared empty state component for consistent "no data" messages.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::Palette;

/// Render an empty state message with consistent styling.
///
/// Used when a list/table has no data to display.
///
/// # Arguments
/// * `title` - The block title (e.g., "Expenses", "Categories")
/// * `message` - The message to display (e.g., "No expenses found")
/// * `hint` - Optional hint text below the message
pub fn render_empty_state(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    hint: Option<&str>,
    palette: &Palette,
) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, palette.loading_style())),
    ];

    if let Some(hint_text) = hint {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            hint_text,
            palette.help_text_style(),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(paragraph, area);
}

/// Render a loading state message with consistent styling.
///
/// Used when data is being loaded and nothing has been received yet.
pub fn render_loading_state(f: &mut Frame, area: Rect, title: &str, message: &str, palette: &Palette) {
    render_empty_state(f, area, title, message, None, palette);
}

/// Render the failure of the last load with a retry hint.
pub fn render_error_state(f: &mut Frame, area: Rect, title: &str, error: &str, palette: &Palette) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(error, palette.error_style())),
        Line::from(""),
        Line::from(Span::styled("Press r to retry", palette.help_text_style())),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(paragraph, area);
}
