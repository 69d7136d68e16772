//! Shared text input for search and date range entry.

use ratatui::prelude::Rect;
use ratatui::{
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::Palette;

pub const SEARCH_TITLE: &str = "Search (Enter: apply, Esc: clear)";
pub const DATE_RANGE_TITLE: &str = "Date range, e.g. 2025-04-01 to 2025-04-30 (Enter: apply, Esc: cancel)";

/// Render a single-line input with the current text.
pub fn render_filter_input(f: &mut Frame, area: Rect, title: &str, query: &str, palette: &Palette) {
    let input = Paragraph::new(format!("{}▏", query))
        .style(palette.loading_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.accent_border_style())
                .title(title),
        );

    f.render_widget(input, area);
}
