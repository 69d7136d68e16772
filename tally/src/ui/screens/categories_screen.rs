use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::state::category_tree::CategoryRow;
use crate::state::{CategoriesState, InputMode, LoadingState};
use crate::ui::{
    components::{empty_state, filter_input, help_bar, screen_title},
    layouts,
    theme::{Palette, TABLE_COLUMN_SPACING},
};

pub fn render(f: &mut Frame, area: Rect, state: &CategoriesState, palette: &Palette) {
    if state.input_mode == InputMode::Filter || !state.search.is_empty() {
        let (title_area, filter_area, content_area, help_area) =
            layouts::screen_layout_with_filter(area);

        screen_title::render_screen_title(f, title_area, "Categories", &state.loading, palette);
        filter_input::render_filter_input(
            f,
            filter_area,
            filter_input::SEARCH_TITLE,
            &state.search,
            palette,
        );
        render_content(f, content_area, state, palette);
        help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_CATEGORIES, palette);
    } else {
        let (title_area, content_area, help_area) = layouts::screen_layout(area);

        screen_title::render_screen_title(f, title_area, "Categories", &state.loading, palette);
        render_content(f, content_area, state, palette);
        help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_CATEGORIES, palette);
    }
}

fn render_content(f: &mut Frame, area: Rect, state: &CategoriesState, palette: &Palette) {
    if state.loading.is_loading() && state.tree.is_empty() {
        empty_state::render_loading_state(f, area, "Categories", "Loading categories...", palette);
        return;
    }
    if let LoadingState::Error(error) = &state.loading {
        if state.tree.is_empty() {
            empty_state::render_error_state(f, area, "Categories", error, palette);
            return;
        }
    }

    let rows = state.rows();
    if rows.is_empty() {
        let (message, hint) = if state.search.is_empty() {
            ("No categories yet", Some("Press a to add one"))
        } else {
            ("No matching categories", None)
        };
        empty_state::render_empty_state(f, area, "Categories", message, hint, palette);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from(Text::from("Subcategories").right_aligned()),
    ])
    .style(palette.header_style())
    .underlined();

    let table_rows: Vec<Row> = rows.iter().map(|row| category_row(row, palette)).collect();

    let title = if state.search.is_empty() {
        "Categories".to_string()
    } else {
        format!("Categories ({} matching)", rows.len())
    };

    let table = Table::new(
        table_rows,
        [Constraint::Percentage(80), Constraint::Percentage(20)],
    )
    .header(header)
    .column_spacing(TABLE_COLUMN_SPACING)
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(palette.selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

fn category_row(row: &CategoryRow, palette: &Palette) -> Row<'static> {
    let name = Line::from(vec![
        Span::raw(row_prefix(row)),
        Span::styled(
            row.name.clone(),
            if row.depth == 0 {
                palette.text_style().add_modifier(Modifier::BOLD)
            } else {
                palette.text_style()
            },
        ),
    ]);
    let count = if row.depth == 0 {
        row.child_count.to_string()
    } else {
        String::new()
    };

    Row::new(vec![
        Cell::from(name),
        Cell::from(Text::from(count).right_aligned()).style(palette.help_text_style()),
    ])
}

/// Expand marker for parents, indentation for subcategories.
fn row_prefix(row: &CategoryRow) -> &'static str {
    match (row.depth, row.child_count, row.is_expanded) {
        (0, 0, _) => "  ",
        (0, _, true) => "▾ ",
        (0, _, false) => "▸ ",
        _ => "    └ ",
    }
}
