use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};
use tally_api::endpoints::incomes::Income;

use super::expenses_screen::checkbox;
use crate::state::{IncomesState, InputMode, LoadingState};
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

pub fn render(f: &mut Frame, area: Rect, state: &IncomesState, palette: &Palette) {
    let input = match state.input_mode {
        InputMode::DateRange => Some((filter_input::DATE_RANGE_TITLE, &state.range_input)),
        InputMode::Filter => Some((filter_input::SEARCH_TITLE, &state.search)),
        _ if !state.search.is_empty() => Some((filter_input::SEARCH_TITLE, &state.search)),
        _ => None,
    };
    let layout = layouts::list_layout(area, input.is_some());

    let mut title = "Income".to_string();
    if let Some(range) = &state.date_range {
        title.push_str(&format!(" · {}", range));
    }
    if !state.selection.is_empty() {
        title.push_str(&format!(" ({} selected)", state.selection.len()));
    }
    screen_title::render_screen_title(f, layout.title, &title, &state.loading, palette);

    let filtered = state.filtered();
    summary_cards::render_cards(
        f,
        layout.cards,
        vec![
            Card::new("Total", utils::amount_span(state.total_amount(), palette)),
            Card::new("Items", filtered.len().to_string()),
        ],
        palette,
    );

    if let (Some(input_area), Some((input_title, text))) = (layout.input, input) {
        filter_input::render_filter_input(f, input_area, input_title, text, palette);
    }

    render_table(f, layout.table, state, palette);
    pagination_bar::render_pagination(f, layout.pagination, &state.pagination(), palette);
    help_bar::render_help_bar(f, layout.help, help_bar::HELP_TEXT_LIST, palette);
}

fn render_table(f: &mut Frame, area: Rect, state: &IncomesState, palette: &Palette) {
    if state.loading.is_loading() && state.incomes.is_empty() {
        empty_state::render_loading_state(f, area, "Income", "Loading income...", palette);
        return;
    }
    if let LoadingState::Error(error) = &state.loading {
        if state.incomes.is_empty() {
            empty_state::render_error_state(f, area, "Income", error, palette);
            return;
        }
    }

    let page = state.page_items();
    if page.is_empty() {
        let (message, hint) = if state.incomes.is_empty() {
            ("No income recorded yet", Some("Press n to add one"))
        } else {
            ("No matching income", Some("Esc clears the search, T clears the dates"))
        };
        empty_state::render_empty_state(f, area, "Income", message, hint, palette);
        return;
    }

    let filtered_ids = state.filtered_ids();
    let header = Row::new(vec![
        Cell::from(checkbox(state.selection.all_selected(filtered_ids.iter()))),
        Cell::from("Date"),
        Cell::from("Payer"),
        Cell::from("Note"),
        Cell::from(Text::from("Amount").right_aligned()),
    ])
    .style(palette.header_style())
    .underlined();

    let rows: Vec<Row> = page
        .iter()
        .map(|income| income_row(income, state, palette))
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

fn income_row<'a>(income: &'a Income, state: &IncomesState, palette: &Palette) -> Row<'a> {
    let selected = state.selection.contains(&income.id);

    let mut note = Text::from(utils::truncate(
        income.note.as_deref().unwrap_or_default(),
        60,
    ));
    let mut height = 1;
    if state.expanded.contains(&income.id) {
        let lines = record_detail::income_detail_lines(income.note.as_deref(), palette);
        height += lines.len() as u16;
        note.extend(lines);
    }

    let row = Row::new(vec![
        Cell::from(checkbox(selected)),
        Cell::from(dates::format_display(income.date)),
        Cell::from(income.payer.clone().unwrap_or_default()),
        Cell::from(note),
        Cell::from(Text::from(utils::format_amount(income.amount)).right_aligned())
            .style(Style::default().fg(palette.positive)),
    ])
    .height(height);

    if selected {
        row.style(Style::default().fg(palette.marked))
    } else {
        row
    }
}
