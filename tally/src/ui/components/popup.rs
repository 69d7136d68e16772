//! Shared popup/modal base component.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    style::Style,
    widgets::{Block, Borders, Clear},
    Frame,
};

use crate::ui::layouts;

/// Render a popup frame and return the inner area for content.
///
/// This handles:
/// - Centering the popup
/// - Clearing the background
/// - Drawing the border with title
///
/// # Arguments
/// * `size` - Tuple of (width_percent, height_percent)
/// * `title` - The popup title
/// * `border_style` - Style for the border (`palette.danger_border_style()`, etc.)
///
/// # Returns
/// The inner area where popup content should be rendered
pub fn render_popup_frame(
    f: &mut Frame,
    parent_area: Rect,
    size: (u16, u16),
    title: &str,
    border_style: Style,
) -> Rect {
    let area = layouts::centered_popup(size.0, size.1, parent_area);
    render_frame_at(f, area, title, border_style)
}

/// Popup with a fixed number of content rows, centered horizontally at
/// `width_percent` of the parent.
pub fn render_popup_rows(
    f: &mut Frame,
    parent_area: Rect,
    width_percent: u16,
    rows: u16,
    title: &str,
    border_style: Style,
) -> Rect {
    let column = layouts::centered_popup(width_percent, 100, parent_area);
    let height = (rows + 2).min(parent_area.height);
    let y = parent_area.y + (parent_area.height - height) / 2;
    let area = Rect::new(column.x, y, column.width, height);
    render_frame_at(f, area, title, border_style)
}

fn render_frame_at(f: &mut Frame, area: Rect, title: &str, border_style: Style) -> Rect {
    // Clear the background
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    f.render_widget(block, area);

    inner
}
