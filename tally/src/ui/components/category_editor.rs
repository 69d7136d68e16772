use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use super::{form_field, popup};
use crate::state::forms::CategoryEditor;
use crate::state::validators::Field;
use crate::ui::theme::Palette;

/// Single-field popup for adding or renaming a category.
pub fn render_category_editor(
    f: &mut Frame,
    editor: &CategoryEditor,
    parent_name: Option<&str>,
    palette: &Palette,
) {
    let inner = popup::render_popup_rows(
        f,
        f.area(),
        60,
        6,
        &format!(" {} ", editor.title()),
        palette.info_border_style(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(form_field::FIELD_HEIGHT),
            Constraint::Length(1),
        ])
        .split(inner);

    if let Some(parent) = parent_name {
        f.render_widget(
            Paragraph::new(Span::styled(
                format!("Under {}", parent),
                palette.help_text_style(),
            )),
            chunks[0],
        );
    }

    form_field::render_field(
        f,
        chunks[1],
        "Name",
        &editor.name,
        true,
        editor.errors.get(Field::Name),
        palette,
    );

    f.render_widget(
        Paragraph::new(Span::styled(
            "Enter: save  Esc: cancel",
            palette.help_text_style(),
        )),
        chunks[2],
    );
}
