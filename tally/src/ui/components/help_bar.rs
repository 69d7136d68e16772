//! Shared help bar component for consistent bottom navigation hints.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::Palette;

/// Render a standard help bar with the given text.
///
/// The help bar is styled consistently with muted text in a bordered block,
/// centered alignment. All screens should use this for their help bar.
pub fn render_help_bar(f: &mut Frame, area: Rect, text: &str, palette: &Palette) {
    let help = Paragraph::new(text)
        .style(palette.help_text_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, area);
}

/// Standard help bar text used across most screens
pub const HELP_TEXT_DEFAULT: &str = "Press ? for help";

pub const HELP_TEXT_LIST: &str =
    "n: new  e: edit  d: delete  space: select  /: search  t: dates  p/P: print  ?: help";

pub const HELP_TEXT_CATEGORIES: &str =
    "a: add  s: subcategory  e: rename  c: duplicate  d: delete  /: search  ?: help";

pub const HELP_TEXT_FORM: &str = "Tab: next field  Enter/Ctrl+S: save  Esc: cancel";
