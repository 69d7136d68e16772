use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Row, Table},
};

use crate::state::summary::DashboardSummary;
use crate::state::{DashboardState, LoadingState};
use crate::ui::{
    components::{
        empty_state, help_bar, screen_title,
        summary_cards::{self, Card},
    },
    layouts,
    theme::{Palette, SUMMARY_CARD_HEIGHT},
    utils,
};
use crate::utils::dates;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn render(f: &mut Frame, area: Rect, state: &DashboardState, palette: &Palette) {
    let (title_area, content_area, help_area) = layouts::screen_layout(area);

    let title = match &state.summary {
        Some(summary) => format!("Dashboard {}", summary.year),
        None => "Dashboard".to_string(),
    };
    screen_title::render_screen_title(f, title_area, &title, &state.loading, palette);
    help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_DEFAULT, palette);

    let Some(summary) = &state.summary else {
        match &state.loading {
            LoadingState::Error(error) => {
                empty_state::render_error_state(f, content_area, "Dashboard", error, palette)
            }
            _ => empty_state::render_loading_state(
                f,
                content_area,
                "Dashboard",
                "Loading dashboard...",
                palette,
            ),
        }
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SUMMARY_CARD_HEIGHT),
            Constraint::Min(10),
            Constraint::Length(12),
        ])
        .split(content_area);

    summary_cards::render_cards(
        f,
        chunks[0],
        vec![
            Card::new("Total Income", utils::amount_span(summary.total_income, palette)),
            Card::new(
                "Total Expense",
                Span::styled(
                    utils::format_amount(summary.total_expense),
                    Style::default().fg(palette.negative),
                ),
            ),
            Card::new("Balance", utils::amount_span(summary.balance(), palette)),
        ],
        palette,
    );

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_monthly_chart(f, middle[0], summary, palette);
    render_category_breakdown(f, middle[1], summary, palette);
    render_recent(f, chunks[2], state, summary, palette);
}

/// Whole currency units; the chart only needs the magnitude.
fn bar_value(cents: i64) -> u64 {
    (cents.max(0) / 100) as u64
}

fn render_monthly_chart(f: &mut Frame, area: Rect, summary: &DashboardSummary, palette: &Palette) {
    let income_style = Style::default().fg(palette.positive);
    let expense_style = Style::default().fg(palette.negative);

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(vec![
                    Span::raw("Monthly "),
                    Span::styled("income", income_style),
                    Span::raw(" vs "),
                    Span::styled("expense", expense_style),
                    Span::raw(" "),
                ])),
        )
        .bar_width(2)
        .bar_gap(0)
        .group_gap(1);

    for (month, label) in MONTHS.iter().enumerate() {
        let bars = [
            Bar::default()
                .value(bar_value(summary.monthly_income[month].cents()))
                .text_value(String::new())
                .style(income_style),
            Bar::default()
                .value(bar_value(summary.monthly_expense[month].cents()))
                .text_value(String::new())
                .style(expense_style),
        ];
        chart = chart.data(BarGroup::default().label(Line::from(*label)).bars(&bars));
    }

    f.render_widget(chart, area);
}

fn render_category_breakdown(
    f: &mut Frame,
    area: Rect,
    summary: &DashboardSummary,
    palette: &Palette,
) {
    if summary.by_category.is_empty() {
        empty_state::render_empty_state(
            f,
            area,
            "By Category",
            "No expenses this year",
            None,
            palette,
        );
        return;
    }

    let rows: Vec<Row> = summary
        .by_category
        .iter()
        .map(|share| {
            Row::new(vec![
                Cell::from(share.name.clone()),
                Cell::from(Text::from(utils::format_amount(share.amount)).right_aligned()),
                Cell::from(Text::from(format!("{:.1}%", share.percent)).right_aligned()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
        ],
    )
    .header(
        Row::new(vec!["Category", "Amount", "Share"])
            .style(palette.header_style())
            .underlined(),
    )
    .block(Block::default().borders(Borders::ALL).title("By Category"));

    f.render_widget(table, area);
}

fn render_recent(
    f: &mut Frame,
    area: Rect,
    state: &DashboardState,
    summary: &DashboardSummary,
    palette: &Palette,
) {
    if summary.recent.is_empty() {
        empty_state::render_empty_state(
            f,
            area,
            "Recent Expenses",
            "No expenses yet",
            Some("Press 3 to open expenses"),
            palette,
        );
        return;
    }

    let rows: Vec<Row> = summary
        .recent
        .iter()
        .map(|expense| {
            Row::new(vec![
                Cell::from(dates::format_display(expense.date)),
                Cell::from(utils::category_display(&state.categories, &expense.category_id)),
                Cell::from(expense.detail.clone().unwrap_or_default()),
                Cell::from(Text::from(utils::format_amount(expense.expense)).right_aligned()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Percentage(30),
            Constraint::Percentage(45),
            Constraint::Percentage(25),
        ],
    )
    .header(
        Row::new(vec!["Date", "Category", "Detail", "Amount"])
            .style(palette.header_style())
            .underlined(),
    )
    .column_spacing(crate::ui::theme::TABLE_COLUMN_SPACING)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Recent Expenses"),
    )
    .row_highlight_style(palette.selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_values_are_whole_units() {
        assert_eq!(bar_value(12_345), 123);
        assert_eq!(bar_value(-500), 0);
    }
}
