//! Reusable layout builders for consistent screen structure.
//!
//! These functions provide standard layouts that all screens should use
//! to ensure consistent margins, spacing, and element positioning.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{
    FILTER_INPUT_HEIGHT, HELP_BAR_HEIGHT, PAGINATION_HEIGHT, SCREEN_MARGIN, SIDEBAR_WIDTH,
    SUMMARY_CARD_HEIGHT, TITLE_HEIGHT,
};

/// Standard screen layout with title, content area, and help bar.
///
/// Returns a tuple of (title_area, content_area, help_area)
pub fn screen_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(10),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Areas of a paged list screen.
pub struct ListLayout {
    pub title: Rect,
    pub cards: Rect,
    pub input: Option<Rect>,
    pub table: Rect,
    pub pagination: Rect,
    pub help: Rect,
}

/// List screen layout: title, summary cards, optional text input, table,
/// page bar and help bar.
pub fn list_layout(area: Rect, with_input: bool) -> ListLayout {
    let mut constraints = vec![
        Constraint::Length(TITLE_HEIGHT),
        Constraint::Length(SUMMARY_CARD_HEIGHT),
    ];
    if with_input {
        constraints.push(Constraint::Length(FILTER_INPUT_HEIGHT));
    }
    constraints.extend([
        Constraint::Min(6),
        Constraint::Length(PAGINATION_HEIGHT),
        Constraint::Length(HELP_BAR_HEIGHT),
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints(constraints)
        .split(area);

    let offset = usize::from(with_input);
    ListLayout {
        title: chunks[0],
        cards: chunks[1],
        input: with_input.then(|| chunks[2]),
        table: chunks[2 + offset],
        pagination: chunks[3 + offset],
        help: chunks[4 + offset],
    }
}

/// Screen layout with filter input visible.
///
/// Returns a tuple of (title_area, filter_area, content_area, help_area)
pub fn screen_layout_with_filter(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(FILTER_INPUT_HEIGHT),
            Constraint::Min(10),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2], chunks[3])
}

/// Split a title area into title text and loading indicator.
///
/// Returns (title_text_area, loading_indicator_area)
pub fn title_with_loading(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(100), Constraint::Length(1)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Split a row into `count` equally wide cards.
pub fn card_row(area: Rect, count: usize) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count.max(1) as u32); count])
        .split(area)
        .to_vec()
}

/// Create a centered popup rectangle.
///
/// # Arguments
/// * `percent_x` - Width as percentage of parent (0-100)
/// * `percent_y` - Height as percentage of parent (0-100)
/// * `area` - The parent area to center within
pub fn centered_popup(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Split the frame into an optional sidebar and the main area.
pub fn with_sidebar(area: Rect, sidebar_open: bool) -> (Option<Rect>, Rect) {
    if !sidebar_open {
        return (None, area);
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(area);

    (Some(chunks[0]), chunks[1])
}

/// Stack of toast rows anchored to the top-right corner.
pub fn toast_area(area: Rect, count: u16, width: u16) -> Rect {
    let width = width.min(area.width);
    let height = (count * 3).min(area.height);
    Rect::new(area.x + area.width - width, area.y, width, height)
}

/// Standard popup sizes
pub mod popup_sizes {
    /// Small popup (50% x 30%) - for simple confirmations
    pub const SMALL: (u16, u16) = (50, 30);

    /// Medium popup (60% x 40%) - for single-field editors
    pub const MEDIUM: (u16, u16) = (60, 40);

    /// Large popup (80% x 80%) - for help screens and complex dialogs
    pub const LARGE: (u16, u16) = (80, 80);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_layout_input_slot() {
        let area = Rect::new(0, 0, 100, 40);
        assert!(list_layout(area, false).input.is_none());

        let layout = list_layout(area, true);
        let input = layout.input.unwrap();
        assert!(input.y < layout.table.y);
        assert_eq!(input.height, FILTER_INPUT_HEIGHT);
    }

    #[test]
    fn test_sidebar_split() {
        let area = Rect::new(0, 0, 100, 40);
        let (sidebar, main) = with_sidebar(area, true);
        assert_eq!(sidebar.unwrap().width, SIDEBAR_WIDTH);
        assert_eq!(main.width, 100 - SIDEBAR_WIDTH);
        assert_eq!(with_sidebar(area, false), (None, area));
    }
}
