//! Labelled single-line inputs shared by the popups.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::Palette;

const LABEL_WIDTH: u16 = 12;

/// Rows a field occupies: the input line and its error line.
pub const FIELD_HEIGHT: u16 = 2;

/// Split a field area into (label, input, error) areas.
pub fn field_areas(area: Rect) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)])
        .split(rows[0]);
    let error = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)])
        .split(rows[1])[1];
    (columns[0], columns[1], error)
}

pub fn render_label(f: &mut Frame, area: Rect, label: &str, focused: bool, palette: &Palette) {
    let style = if focused {
        palette.header_style()
    } else {
        palette.help_text_style()
    };
    f.render_widget(Paragraph::new(Span::styled(label.to_string(), style)), area);
}

pub fn render_error(f: &mut Frame, area: Rect, error: Option<&str>, palette: &Palette) {
    if let Some(message) = error {
        f.render_widget(
            Paragraph::new(Span::styled(message.to_string(), palette.error_style())),
            area,
        );
    }
}

/// Label, value and inline error. A cursor is drawn after a focused value.
pub fn render_field(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    error: Option<&str>,
    palette: &Palette,
) {
    let (label_area, input_area, error_area) = field_areas(area);
    render_label(f, label_area, label, focused, palette);
    f.render_widget(
        Paragraph::new(input_line(value, focused, palette)),
        input_area,
    );
    render_error(f, error_area, error, palette);
}

pub fn input_line(value: &str, focused: bool, palette: &Palette) -> Line<'static> {
    if focused {
        Line::from(vec![
            Span::styled(value.to_string(), palette.form_field_focused_style()),
            Span::styled("▏", palette.form_field_focused_style()),
        ])
    } else {
        Line::from(Span::styled(value.to_string(), palette.form_field_style()))
    }
}
