use crate::state::category_tree::CategoryTree;
use chrono::Datelike;
use itertools::Itertools;
use std::collections::HashMap;
use tally_api::endpoints::{expenses::Expense, incomes::Income, Amount, Id};

const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    pub amount: Amount,
    pub percent: f64,
}

/// Totals shown on the dashboard for one calendar year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub year: i32,
    pub total_income: Amount,
    pub total_expense: Amount,
    pub monthly_income: [Amount; 12],
    pub monthly_expense: [Amount; 12],
    /// Largest first, rolled up to top-level categories.
    pub by_category: Vec<CategoryShare>,
    pub recent: Vec<Expense>,
}

impl DashboardSummary {
    pub fn compute(
        year: i32,
        expenses: &[Expense],
        incomes: &[Income],
        categories: &CategoryTree,
    ) -> Self {
        let mut summary = Self {
            year,
            ..Self::default()
        };

        for income in incomes.iter().filter(|i| i.date.year() == year) {
            summary.total_income += income.amount;
            summary.monthly_income[income.date.month0() as usize] += income.amount;
        }

        let mut per_category: HashMap<Id, Amount> = HashMap::new();
        for expense in expenses.iter().filter(|e| e.date.year() == year) {
            summary.total_expense += expense.expense;
            summary.monthly_expense[expense.date.month0() as usize] += expense.expense;

            let bucket = categories
                .root_of(&expense.category_id)
                .map(|root| root.id.clone())
                .unwrap_or_else(|| expense.category_id.clone());
            *per_category.entry(bucket).or_default() += expense.expense;
        }

        summary.by_category = per_category
            .into_iter()
            .map(|(id, amount)| CategoryShare {
                name: categories
                    .name_of(&id)
                    .map(str::to_string)
                    .unwrap_or_else(|| id.to_string()),
                amount,
                percent: amount.percent_of(summary.total_expense),
            })
            .sorted_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)))
            .collect();

        summary.recent = expenses
            .iter()
            .sorted_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)))
            .take(RECENT_LIMIT)
            .cloned()
            .collect();

        summary
    }

    pub fn balance(&self) -> Amount {
        self.total_income - self.total_expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_api::endpoints::categories::Category;

    fn expense(id: i64, category: &str, cents: i64, y: i32, m: u32, d: u32) -> Expense {
        Expense {
            id: Id::from(id),
            category_id: Id::new(category),
            expense: Amount::from_cents(cents),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            detail: None,
            breakdown_items: Vec::new(),
        }
    }

    fn income(cents: i64, m: u32) -> Income {
        Income {
            id: Id::new("i"),
            amount: Amount::from_cents(cents),
            date: NaiveDate::from_ymd_opt(2025, m, 1).unwrap(),
            note: None,
            payer: None,
        }
    }

    fn tree() -> CategoryTree {
        let mut utilities = Category::new("1", "Utilities", None);
        utilities.children = vec![Category::new("2", "Electricity", Some(Id::new("1")))];
        CategoryTree::new(vec![utilities, Category::new("4", "Groceries", None)])
    }

    #[test]
    fn test_totals_and_months() {
        let expenses = vec![
            expense(1, "2", 60_00, 2025, 1, 10),
            expense(2, "4", 40_00, 2025, 3, 5),
            expense(3, "4", 99_00, 2024, 12, 31),
        ];
        let incomes = vec![income(500_00, 1), income(250_00, 3)];
        let summary = DashboardSummary::compute(2025, &expenses, &incomes, &tree());

        assert_eq!(summary.total_expense, Amount::from_cents(100_00));
        assert_eq!(summary.total_income, Amount::from_cents(750_00));
        assert_eq!(summary.balance(), Amount::from_cents(650_00));
        assert_eq!(summary.monthly_expense[0], Amount::from_cents(60_00));
        assert_eq!(summary.monthly_income[2], Amount::from_cents(250_00));
    }

    #[test]
    fn test_subcategories_roll_up() {
        let expenses = vec![
            expense(1, "2", 60_00, 2025, 1, 10),
            expense(2, "1", 15_00, 2025, 1, 11),
            expense(3, "4", 25_00, 2025, 1, 12),
        ];
        let summary = DashboardSummary::compute(2025, &expenses, &[], &tree());

        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.by_category[0].name, "Utilities");
        assert_eq!(summary.by_category[0].amount, Amount::from_cents(75_00));
        assert!((summary.by_category[0].percent - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recent_is_newest_first_and_capped() {
        let expenses: Vec<_> = (1..=12)
            .map(|day| expense(day, "4", 100, 2025, 2, day as u32))
            .collect();
        let summary = DashboardSummary::compute(2025, &expenses, &[], &tree());
        assert_eq!(summary.recent.len(), 10);
        assert_eq!(summary.recent[0].date.day(), 12);
    }
}
