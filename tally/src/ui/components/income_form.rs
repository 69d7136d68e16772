use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use super::{form_field, help_bar, popup};
use crate::state::forms::{IncomeFocus, IncomeForm};
use crate::state::validators::Field;
use crate::ui::theme::Palette;

pub fn render_income_form(f: &mut Frame, form: &IncomeForm, palette: &Palette) {
    let title = if form.is_edit_mode() {
        " Edit Income "
    } else {
        " New Income "
    };
    let inner = popup::render_popup_rows(f, f.area(), 60, 12, title, palette.info_border_style());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(form_field::FIELD_HEIGHT),
            Constraint::Length(form_field::FIELD_HEIGHT),
            Constraint::Length(form_field::FIELD_HEIGHT),
            Constraint::Length(form_field::FIELD_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let fields = [
        (IncomeFocus::Amount, "Amount", &form.amount, Field::Amount),
        (IncomeFocus::Date, "Date", &form.date, Field::Date),
        (IncomeFocus::Payer, "Payer", &form.payer, Field::Payer),
        (IncomeFocus::Note, "Note", &form.note, Field::Note),
    ];
    for ((focus, label, value, field), area) in fields.into_iter().zip(chunks.iter()) {
        form_field::render_field(
            f,
            *area,
            label,
            value,
            form.focus == focus,
            form.errors.get(field),
            palette,
        );
    }

    let footer = if form.in_flight {
        Span::styled("Saving...", palette.loading_style())
    } else {
        Span::styled(help_bar::HELP_TEXT_FORM, palette.help_text_style())
    };
    f.render_widget(Paragraph::new(footer), chunks[4]);
}
