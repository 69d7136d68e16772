use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{autocomplete_input::AutocompleteInput, form_field, help_bar, popup};
use crate::state::autocomplete;
use crate::state::category_tree::CategoryTree;
use crate::state::forms::{ExpenseFocus, ExpenseForm, ItemColumn};
use crate::state::validators::Field;
use crate::ui::{theme::Palette, utils};

const PRICE_WIDTH: u16 = 12;
const QUANTITY_WIDTH: u16 = 8;

/// Expense popup: category picker, date, detail, total and the breakdown rows.
pub fn render_expense_form(
    f: &mut Frame,
    form: &ExpenseForm,
    categories: &CategoryTree,
    palette: &Palette,
) {
    let title = if form.is_edit_mode() {
        " Edit Expense "
    } else {
        " New Expense "
    };
    let item_rows = form.items.len().max(1) as u16;
    let inner = popup::render_popup_rows(
        f,
        f.area(),
        80,
        4 * form_field::FIELD_HEIGHT + item_rows + 5,
        title,
        palette.info_border_style(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(form_field::FIELD_HEIGHT), // Category
            Constraint::Length(form_field::FIELD_HEIGHT), // Date
            Constraint::Length(form_field::FIELD_HEIGHT), // Detail
            Constraint::Length(form_field::FIELD_HEIGHT), // Amount or total
            Constraint::Length(1),                        // Breakdown header
            Constraint::Length(item_rows),                // Breakdown rows
            Constraint::Length(1),                        // Items error / footer
        ])
        .split(inner);

    // Category picker; its dropdown is drawn last so it overlaps the fields below
    let (label_area, category_area, error_area) = form_field::field_areas(chunks[0]);
    let category_focused = form.focus == ExpenseFocus::Category;
    form_field::render_label(f, label_area, "Category", category_focused, palette);
    form_field::render_error(f, error_area, form.errors.get(Field::Category), palette);

    let labels: Vec<String> = form
        .category_matches
        .iter()
        .map(|c| autocomplete::category_label(categories, c))
        .collect();
    let hint = (form.category_id.is_none()
        && labels.is_empty()
        && !form.category_query.is_empty())
    .then_some("No matching categories");
    let picker = AutocompleteInput::new(&form.category_query, "Type to search categories", palette)
        .focused(category_focused)
        .items(&labels)
        .selected_index(form.category_selection)
        .hint(hint);
    picker.render_input(f, category_area);

    form_field::render_field(
        f,
        chunks[1],
        "Date",
        &form.date,
        form.focus == ExpenseFocus::Date,
        form.errors.get(Field::Date),
        palette,
    );
    form_field::render_field(
        f,
        chunks[2],
        "Detail",
        &form.detail,
        form.focus == ExpenseFocus::Detail,
        None,
        palette,
    );

    if form.items.is_empty() {
        form_field::render_field(
            f,
            chunks[3],
            "Amount",
            &form.amount,
            form.focus == ExpenseFocus::Amount,
            form.errors.get(Field::Amount),
            palette,
        );
    } else {
        let (label_area, value_area, error_area) = form_field::field_areas(chunks[3]);
        form_field::render_label(f, label_area, "Total", false, palette);
        f.render_widget(
            Paragraph::new(utils::amount_span(form.total(), palette)),
            value_area,
        );
        form_field::render_error(f, error_area, form.errors.get(Field::Amount), palette);
    }

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Breakdown ", palette.header_style()),
            Span::styled("(Ctrl+A: add item, Ctrl+D: remove item)", palette.help_text_style()),
        ])),
        chunks[4],
    );
    render_items(f, chunks[5], form, palette);

    let footer = if let Some(error) = form.errors.get(Field::Items) {
        Span::styled(error.to_string(), palette.error_style())
    } else if form.in_flight {
        Span::styled("Saving...", palette.loading_style())
    } else {
        Span::styled(help_bar::HELP_TEXT_FORM, palette.help_text_style())
    };
    f.render_widget(Paragraph::new(footer), chunks[6]);

    picker.render_dropdown(f, category_area);
}

fn render_items(f: &mut Frame, area: Rect, form: &ExpenseForm, palette: &Palette) {
    if form.items.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled(
                "No items. The amount above is used as the total.",
                palette.help_text_style(),
            )),
            area,
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); form.items.len()])
        .split(area);

    for (index, (item, row_area)) in form.items.iter().zip(rows.iter()).enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .spacing(1)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(PRICE_WIDTH),
                Constraint::Length(QUANTITY_WIDTH),
            ])
            .split(*row_area);

        let cells = [
            (ItemColumn::Name, &item.name, "name"),
            (ItemColumn::Price, &item.price, "price"),
            (ItemColumn::Quantity, &item.quantity, "qty"),
        ];
        for ((column, value, placeholder), cell_area) in cells.into_iter().zip(columns.iter()) {
            let focused = form.focus == ExpenseFocus::Item { row: index, column };
            let line = if value.is_empty() && !focused {
                Line::from(Span::styled(placeholder, palette.help_text_style()))
            } else {
                form_field::input_line(value, focused, palette)
            };
            f.render_widget(Paragraph::new(line), *cell_area);
        }
    }
}
