//! Detail rows shown under an expanded expense or income.

use ratatui::{
    style::Modifier,
    text::{Line, Span},
};
use tally_api::endpoints::expenses::Expense;

use crate::ui::{theme::Palette, utils};

const INDENT: &str = "    ";

/// Notes line followed by the breakdown sub-table and its subtotal. The
/// subtotal is the sum of item prices even when it differs from the stored
/// total.
pub fn expense_detail_lines(expense: &Expense, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let muted = palette.help_text_style();

    if let Some(detail) = expense.detail.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(Line::from(vec![
            Span::styled(format!("{}Notes: ", INDENT), muted),
            Span::styled(detail.to_string(), palette.text_style()),
        ]));
    }

    if expense.breakdown_items.is_empty() {
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("{}No notes or breakdown", INDENT),
                muted,
            )));
        }
        return lines;
    }

    lines.push(Line::from(Span::styled(
        format!("{}{:<24} {:>8} {:>12}", INDENT, "Item", "Qty", "Price"),
        palette.header_style(),
    )));
    for item in &expense.breakdown_items {
        lines.push(Line::from(Span::styled(
            format!(
                "{}{:<24} {:>8} {:>12}",
                INDENT,
                utils::truncate(&item.name, 24),
                item.quantity.to_string(),
                utils::format_amount(item.price)
            ),
            palette.text_style(),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!(
            "{}{:<24} {:>8} {:>12}",
            INDENT,
            "Subtotal",
            "",
            utils::format_amount(expense.breakdown_subtotal())
        ),
        palette.text_style().add_modifier(Modifier::BOLD),
    )));

    lines
}

pub fn income_detail_lines(note: Option<&str>, palette: &Palette) -> Vec<Line<'static>> {
    let text = note
        .filter(|n| !n.trim().is_empty())
        .map(|n| format!("{}Notes: {}", INDENT, n))
        .unwrap_or_else(|| format!("{}No notes", INDENT));
    vec![Line::from(Span::styled(text, palette.help_text_style()))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DARK;
    use chrono::NaiveDate;
    use tally_api::endpoints::{expenses::BreakdownItem, Amount, Id, Quantity};

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_subtotal_uses_item_prices() {
        let expense = Expense {
            id: Id::new("1"),
            category_id: Id::new("4"),
            expense: Amount::from_cents(2_000),
            date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            detail: Some("Weekly shop".into()),
            breakdown_items: vec![
                BreakdownItem {
                    id: None,
                    name: "Milk".into(),
                    price: Amount::from_cents(1_000),
                    quantity: Quantity::new("2"),
                },
                BreakdownItem {
                    id: None,
                    name: "Bread".into(),
                    price: Amount::from_cents(500),
                    quantity: Quantity::new("1"),
                },
            ],
        };

        let lines = text(&expense_detail_lines(&expense, &DARK));
        assert!(lines[0].contains("Weekly shop"));
        assert_eq!(lines.len(), 5);
        assert!(lines[4].contains("Subtotal"));
        assert!(lines[4].contains("$15.00"));
    }

    #[test]
    fn test_empty_detail_placeholder() {
        assert_eq!(
            text(&income_detail_lines(Some("  "), &DARK)),
            vec!["    No notes".to_string()]
        );
    }
}
