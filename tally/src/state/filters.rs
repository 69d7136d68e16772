use crate::state::category_tree::CategoryTree;
use crate::utils::dates;
use chrono::NaiveDate;
use tally_api::endpoints::{expenses::Expense, incomes::Income};

const RANGE_SEPARATOR: &str = " to ";

/// Inclusive day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Parse `"Apr 1, 2025 to Apr 30, 2025"` or `"2025-04-01 to 2025-04-30"`.
    /// A single date selects that one day.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        match input.split_once(RANGE_SEPARATOR) {
            Some((start, end)) => Some(Self::new(
                dates::parse_flexible(start)?,
                dates::parse_flexible(end)?,
            )),
            None => dates::parse_flexible(input).map(|day| Self::new(day, day)),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn as_tuple(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            dates::format_display(self.start),
            RANGE_SEPARATOR,
            dates::format_display(self.end)
        )
    }
}

fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}

/// Search over category name, detail and breakdown item names.
pub fn expense_matches(expense: &Expense, categories: &CategoryTree, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    let category_name = categories
        .name_of(&expense.category_id)
        .unwrap_or(expense.category_id.as_str());

    contains_term(category_name, &term)
        || expense
            .detail
            .as_deref()
            .is_some_and(|detail| contains_term(detail, &term))
        || expense
            .breakdown_items
            .iter()
            .any(|item| contains_term(&item.name, &term))
}

/// Search over note and payer.
pub fn income_matches(income: &Income, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    [income.note.as_deref(), income.payer.as_deref()]
        .into_iter()
        .flatten()
        .any(|text| contains_term(text, &term))
}

/// Search and date range applied together; both must match.
pub fn filter_incomes<'a>(
    incomes: &'a [Income],
    search: &str,
    range: Option<&DateRange>,
) -> Vec<&'a Income> {
    incomes
        .iter()
        .filter(|income| range.is_none_or(|range| range.contains(income.date)))
        .filter(|income| income_matches(income, search))
        .collect()
}
