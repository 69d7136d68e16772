use ratatui::{style::Style, text::Span};
use tally_api::endpoints::{Amount, Id};

use super::theme::Palette;
use crate::state::{autocomplete, category_tree::CategoryTree};

/// Format an amount with a currency symbol and thousands separators,
/// e.g. `$1,234.50` or `-$12.00`.
pub fn format_amount(amount: Amount) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let cents = amount.cents().unsigned_abs();
    format!(
        "{}${}.{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Amount span colored by sign.
pub fn amount_span(amount: Amount, palette: &Palette) -> Span<'static> {
    Span::styled(
        format_amount(amount),
        Style::default().fg(palette.amount_color(amount)),
    )
}

/// Category label for a record; falls back to the raw id for categories
/// that are no longer listed.
pub fn category_display(tree: &CategoryTree, id: &Id) -> String {
    tree.find(id)
        .map(|category| autocomplete::category_label(tree, category))
        .unwrap_or_else(|| id.to_string())
}

/// Truncate to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Amount::from_cents(0)), "$0.00");
        assert_eq!(format_amount(Amount::from_cents(123_456_789)), "$1,234,567.89");
        assert_eq!(format_amount(Amount::from_cents(-1_200)), "-$12.00");
        assert_eq!(format_amount(Amount::from_cents(100_000)), "$1,000.00");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
        assert_eq!(truncate("Electricity bill", 6), "Elect…");
    }
}
