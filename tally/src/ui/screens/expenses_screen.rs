use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};
use tally_api::endpoints::{expenses::Expense, Amount};

use crate::state::{ExpensesState, InputMode, LoadingState};
use crate::ui::{
    components::{
        empty_state, filter_input, help_bar, pagination_bar, record_detail, screen_title,
        summary_cards::{self, Card},
    },
    layouts,
    theme::{Palette, TABLE_COLUMN_SPACING},
    utils,
};
use crate::utils::dates;

pub fn render(
    f: &mut Frame,
    area: Rect,
    state: &ExpensesState,
    monthly_budget: Amount,
    palette: &Palette,
) {
    let input = match state.input_mode {
        InputMode::DateRange => Some((filter_input::DATE_RANGE_TITLE, &state.range_input)),
        InputMode::Filter => Some((filter_input::SEARCH_TITLE, &state.search)),
        _ if !state.search.is_empty() => Some((filter_input::SEARCH_TITLE, &state.search)),
        _ => None,
    };
    let layout = layouts::list_layout(area, input.is_some());

    screen_title::render_screen_title(f, layout.title, &title(state), &state.loading, palette);

    let remaining = state.remaining_budget(monthly_budget);
    summary_cards::render_cards(
        f,
        layout.cards,
        vec![
            Card::new("Total", utils::format_amount(state.total_amount)),
            Card::new("Remaining Budget", utils::amount_span(remaining, palette)),
            Card::new("Items", state.total_rows.to_string()),
        ],
        palette,
    );

    if let (Some(input_area), Some((input_title, text))) = (layout.input, input) {
        filter_input::render_filter_input(f, input_area, input_title, text, palette);
    }

    render_table(f, layout.table, state, palette);
    pagination_bar::render_pagination(f, layout.pagination, &state.pagination, palette);
    help_bar::render_help_bar(f, layout.help, help_bar::HELP_TEXT_LIST, palette);
}

fn title(state: &ExpensesState) -> String {
    let mut title = "Expenses".to_string();
    if let Some(range) = &state.date_range {
        title.push_str(&format!(" · {}", range));
    }
    if !state.selection.is_empty() {
        title.push_str(&format!(" ({} selected)", state.selection.len()));
    }
    title
}

fn render_table(f: &mut Frame, area: Rect, state: &ExpensesState, palette: &Palette) {
    if state.loading.is_loading() && state.expenses.is_empty() {
        empty_state::render_loading_state(f, area, "Expenses", "Loading expenses...", palette);
        return;
    }
    if let LoadingState::Error(error) = &state.loading {
        if state.expenses.is_empty() {
            empty_state::render_error_state(f, area, "Expenses", error, palette);
            return;
        }
    }
    if state.expenses.is_empty() {
        let filtered = !state.search.is_empty() || state.date_range.is_some();
        let (message, hint) = if filtered {
            ("No matching expenses", Some("Esc clears the search, T clears the dates"))
        } else {
            ("No expenses yet", Some("Press n to add one"))
        };
        empty_state::render_empty_state(f, area, "Expenses", message, hint, palette);
        return;
    }

    let all_selected = state
        .selection
        .all_selected(state.expenses.iter().map(|e| &e.id));
    let header = Row::new(vec![
        Cell::from(checkbox(all_selected)),
        Cell::from("Date"),
        Cell::from("Category"),
        Cell::from("Detail"),
        Cell::from(Text::from("Amount").right_aligned()),
    ])
    .style(palette.header_style())
    .underlined();

    let rows: Vec<Row> = state
        .expenses
        .iter()
        .map(|expense| expense_row(expense, state, palette))
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(12),
            Constraint::Percentage(25),
            Constraint::Min(20),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .column_spacing(TABLE_COLUMN_SPACING)
    .block(Block::default().borders(Borders::ALL))
    .row_highlight_style(palette.selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

fn expense_row<'a>(expense: &'a Expense, state: &ExpensesState, palette: &Palette) -> Row<'a> {
    let selected = state.selection.contains(&expense.id);
    let expanded = state.expanded.contains(&expense.id);

    let marker = if expense.breakdown_items.is_empty() {
        ""
    } else if expanded {
        "▾ "
    } else {
        "▸ "
    };
    let mut detail = Text::from(Line::from(vec![
        Span::styled(marker, palette.help_text_style()),
        Span::raw(expense.detail.clone().unwrap_or_default()),
    ]));
    let mut height = 1;
    if expanded {
        let lines = record_detail::expense_detail_lines(expense, palette);
        height += lines.len() as u16;
        detail.extend(lines);
    }

    let row = Row::new(vec![
        Cell::from(checkbox(selected)).style(Style::default().fg(palette.marked)),
        Cell::from(dates::format_display(expense.date)),
        Cell::from(utils::category_display(&state.categories, &expense.category_id)),
        Cell::from(detail),
        Cell::from(Text::from(utils::format_amount(expense.expense)).right_aligned()),
    ])
    .height(height);

    if selected {
        row.style(Style::default().fg(palette.marked))
    } else {
        row
    }
}

pub(super) fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}
