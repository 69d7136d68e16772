//! Printable HTML reports for expenses and incomes.
//!
//! A report is built from already loaded records, rendered to a standalone
//! HTML document and opened in the default browser, where an embedded script
//! starts printing.

mod html;

use crate::state::autocomplete::category_label;
use crate::state::category_tree::CategoryTree;
use crate::state::filters::DateRange;
use chrono::NaiveDateTime;
use itertools::Itertools;
use std::io::Write;
use std::path::PathBuf;
use tally_api::endpoints::{
    expenses::{BreakdownItem, Expense},
    incomes::Income,
    Amount, Id,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to keep report file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Expenses,
    Incomes,
}

/// Which records went into the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    /// Every loaded record; includes the per-category breakdown.
    All,
    Selected,
    Single,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub id: Id,
    /// Category for expenses, payer for incomes.
    pub label: String,
    pub date: chrono::NaiveDate,
    pub amount: Amount,
    pub notes: Option<String>,
    pub breakdown: Vec<BreakdownItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub amount: Amount,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub kind: ReportKind,
    pub scope: ReportScope,
    pub period: Option<DateRange>,
    pub generated_at: NaiveDateTime,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn for_expenses(
        expenses: &[&Expense],
        categories: &CategoryTree,
        scope: ReportScope,
        period: Option<DateRange>,
        generated_at: NaiveDateTime,
    ) -> Self {
        let rows = expenses
            .iter()
            .map(|expense| ReportRow {
                id: expense.id.clone(),
                label: categories
                    .find(&expense.category_id)
                    .map(|c| category_label(categories, c))
                    .unwrap_or_else(|| expense.category_id.to_string()),
                date: expense.date,
                amount: expense.expense,
                notes: expense.detail.clone().filter(|d| !d.trim().is_empty()),
                breakdown: expense.breakdown_items.clone(),
            })
            .collect();

        Self {
            kind: ReportKind::Expenses,
            scope,
            period,
            generated_at,
            rows,
        }
    }

    pub fn for_incomes(
        incomes: &[&Income],
        scope: ReportScope,
        period: Option<DateRange>,
        generated_at: NaiveDateTime,
    ) -> Self {
        let rows = incomes
            .iter()
            .map(|income| ReportRow {
                id: income.id.clone(),
                label: income.payer.clone().unwrap_or_else(|| "-".to_string()),
                date: income.date,
                amount: income.amount,
                notes: income.note.clone().filter(|n| !n.trim().is_empty()),
                breakdown: Vec::new(),
            })
            .collect();

        Self {
            kind: ReportKind::Incomes,
            scope,
            period,
            generated_at,
            rows,
        }
    }

    pub fn total(&self) -> Amount {
        self.rows.iter().map(|row| row.amount).sum()
    }

    /// Per-category totals, largest first. Only all-records expense reports
    /// carry one.
    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        if self.kind != ReportKind::Expenses || self.scope != ReportScope::All {
            return Vec::new();
        }

        let total = self.total();
        self.rows
            .iter()
            .into_group_map_by(|row| row.label.clone())
            .into_iter()
            .map(|(name, rows)| {
                let amount: Amount = rows.iter().map(|row| row.amount).sum();
                CategoryTotal {
                    name,
                    amount,
                    percent: amount.percent_of(total),
                }
            })
            .sorted_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)))
            .collect()
    }

    pub fn render(&self) -> String {
        html::render(self).into_string()
    }
}

/// Write the document to a temp file that outlives the process and open it
/// in the default browser.
pub fn write_and_open(document: &str) -> Result<PathBuf, ReportError> {
    let mut file = tempfile::Builder::new()
        .prefix("tally-report-")
        .suffix(".html")
        .tempfile()?;
    file.write_all(document.as_bytes())?;
    let (_, path) = file.keep()?;

    open::that(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_api::endpoints::{categories::Category, Quantity};

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn tree() -> CategoryTree {
        CategoryTree::new(vec![
            Category::new("1", "Rent", None),
            Category::new("2", "Food <& Drinks>", None),
        ])
    }

    fn expense(id: &str, category: &str, cents: i64) -> Expense {
        Expense {
            id: Id::new(id),
            category_id: Id::new(category),
            expense: Amount::from_cents(cents),
            date: NaiveDate::from_ymd_opt(2025, 4, 3).unwrap(),
            detail: Some("Paid <early>".to_string()),
            breakdown_items: vec![BreakdownItem {
                id: Some(Id::new("b1")),
                name: "Line".to_string(),
                price: Amount::from_cents(cents),
                quantity: Quantity::new("2kg"),
            }],
        }
    }

    #[test]
    fn test_category_totals_percentages() {
        let (a, b, c) = (expense("1", "1", 750_00), expense("2", "2", 200_00), expense("3", "2", 50_00));
        let report = Report::for_expenses(&[&a, &b, &c], &tree(), ReportScope::All, None, at());

        let totals = report.category_totals();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].name, "Rent");
        assert!((totals[0].percent - 75.0).abs() < 1e-9);
        assert_eq!(totals[1].amount, Amount::from_cents(250_00));
        assert_eq!(report.total(), Amount::from_cents(1000_00));
    }

    #[test]
    fn test_single_record_has_no_breakdown_section() {
        let a = expense("1", "1", 10_00);
        let report = Report::for_expenses(&[&a], &tree(), ReportScope::Single, None, at());
        assert!(report.category_totals().is_empty());
        assert!(!report.render().contains("Category Breakdown"));
    }

    #[test]
    fn test_document_content() {
        let a = expense("1", "2", 12_50);
        let period = DateRange::parse("2025-04-01 to 2025-04-30");
        let html = Report::for_expenses(&[&a], &tree(), ReportScope::All, period, at()).render();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Expense Report"));
        assert!(html.contains("Apr 1, 2025 to Apr 30, 2025"));
        assert!(html.contains("Food &lt;&amp; Drinks&gt;"));
        assert!(html.contains("Paid &lt;early&gt;"));
        assert!(html.contains("Subtotal"));
        assert!(html.contains("100.0%"));
        assert!(html.contains("window.print()"));
        assert!(!html.contains("<early>"));
    }

    #[test]
    fn test_income_report_layout() {
        let income = Income {
            id: Id::new("7"),
            amount: Amount::from_cents(2500_00),
            date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            note: None,
            payer: Some("ABC Company".to_string()),
        };
        let html = Report::for_incomes(&[&income], ReportScope::Selected, None, at()).render();
        assert!(html.contains("Income Report"));
        assert!(html.contains("All dates"));
        assert!(html.contains("ABC Company"));
        assert!(html.contains("2500.00"));
        assert!(!html.contains("Subtotal"));
    }
}
