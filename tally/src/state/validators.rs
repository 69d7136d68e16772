use crate::state::forms::{CategoryEditor, ExpenseForm, IncomeForm};
use crate::utils::dates;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tally_api::endpoints::{
    expenses::{BreakdownItem, NewExpense},
    incomes::NewIncome,
    Amount, Quantity,
};

static PRICE_INPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*\.?\d{0,2}$").expect("valid price pattern"));

/// Form field an error message is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Category,
    Date,
    Amount,
    Items,
    Payer,
    Note,
    Name,
}

/// Field-scoped validation messages, shown inline under each input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<Field, String>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Keeps the first message recorded for a field.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Digits with at most one dot and two decimals. Partial input such as `"12."`
/// is accepted so it can be typed character by character.
pub fn is_price_input(input: &str) -> bool {
    PRICE_INPUT.is_match(input)
}

pub fn validate_date(input: &str) -> Result<NaiveDate, &'static str> {
    if input.trim().is_empty() {
        return Err("Date is required");
    }
    dates::parse_flexible(input).ok_or("Enter a valid date (YYYY-MM-DD)")
}

fn validate_positive_amount(input: &str) -> Result<Amount, &'static str> {
    match Amount::parse(input) {
        Some(amount) if amount.is_positive() => Ok(amount),
        _ => Err("Amount must be positive"),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Validate and build the request body from an expense form.
///
/// Rows left completely blank are ignored. When no rows remain, the plain
/// amount field is used as the expense total.
pub fn validate_and_build_expense(form: &ExpenseForm) -> Result<NewExpense, FormErrors> {
    let mut errors = FormErrors::default();

    if form.category_id.is_none() {
        errors.insert(Field::Category, "Category is required");
    }

    let date = validate_date(&form.date).map_err(|e| errors.insert(Field::Date, e));

    let mut items = Vec::new();
    for row in form.items.iter().filter(|row| !row.is_blank()) {
        if row.name.trim().is_empty() {
            errors.insert(Field::Items, "All items must have a name");
        }
        match validate_positive_amount(&row.price) {
            Ok(price) => items.push(BreakdownItem {
                id: row.id.clone(),
                name: row.name.trim().to_string(),
                price,
                quantity: if row.quantity.is_empty() {
                    Quantity::default()
                } else {
                    Quantity::new(row.quantity.clone())
                },
            }),
            Err(_) => errors.insert(Field::Items, "All items must have a valid price"),
        }
    }

    let amount = if items.is_empty() && errors.get(Field::Items).is_none() {
        validate_positive_amount(&form.amount).map_err(|e| errors.insert(Field::Amount, e))
    } else {
        Ok(Amount::ZERO)
    };

    match (form.category_id.clone(), date, amount) {
        (Some(category_id), Ok(date), Ok(amount)) if errors.is_empty() => {
            let mut expense = NewExpense::new(category_id, date);
            expense.detail = form.detail.trim().to_string();
            if items.is_empty() {
                expense.expense = amount;
                Ok(expense)
            } else {
                Ok(expense.with_breakdown(items))
            }
        }
        _ => Err(errors),
    }
}

/// Validate and build the request body from an income form.
pub fn validate_and_build_income(form: &IncomeForm) -> Result<NewIncome, FormErrors> {
    let mut errors = FormErrors::default();

    let amount = if form.amount.trim().is_empty() {
        errors.insert(Field::Amount, "Amount is required");
        None
    } else {
        validate_positive_amount(&form.amount)
            .map_err(|e| errors.insert(Field::Amount, e))
            .ok()
    };

    let date = validate_date(&form.date)
        .map_err(|e| errors.insert(Field::Date, e))
        .ok();

    match (amount, date) {
        (Some(amount), Some(date)) => {
            let mut income = NewIncome::new(amount, date);
            income.payer = non_empty(&form.payer);
            income.note = non_empty(&form.note);
            Ok(income)
        }
        _ => Err(errors),
    }
}

pub fn validate_category_name(editor: &CategoryEditor) -> Result<String, FormErrors> {
    non_empty(&editor.name).ok_or_else(|| {
        let mut errors = FormErrors::default();
        errors.insert(Field::Name, "Category name cannot be empty");
        errors
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::BreakdownRow;
    use tally_api::endpoints::Id;

    fn income_form(amount: &str, date: &str) -> IncomeForm {
        IncomeForm {
            amount: amount.to_string(),
            date: date.to_string(),
            ..IncomeForm::default()
        }
    }

    fn row(name: &str, price: &str) -> BreakdownRow {
        BreakdownRow {
            name: name.to_string(),
            price: price.to_string(),
            ..BreakdownRow::default()
        }
    }

    fn expense_form(items: Vec<BreakdownRow>) -> ExpenseForm {
        ExpenseForm {
            category_id: Some(Id::new("4")),
            date: "2025-04-02".to_string(),
            items,
            ..ExpenseForm::default()
        }
    }

    #[test]
    fn test_price_input_pattern() {
        assert!(is_price_input(""));
        assert!(is_price_input("12"));
        assert!(is_price_input("12."));
        assert!(is_price_input("12.5"));
        assert!(is_price_input(".75"));
        assert!(!is_price_input("12.345"));
        assert!(!is_price_input("1.2.3"));
        assert!(!is_price_input("-4"));
        assert!(!is_price_input("abc"));
    }

    #[test]
    fn test_income_amount_must_be_positive() {
        let err = validate_and_build_income(&income_form("0", "2025-04-01")).unwrap_err();
        assert_eq!(err.get(Field::Amount), Some("Amount must be positive"));

        let err = validate_and_build_income(&income_form("-5", "2025-04-01")).unwrap_err();
        assert_eq!(err.get(Field::Amount), Some("Amount must be positive"));

        let err = validate_and_build_income(&income_form("", "2025-04-01")).unwrap_err();
        assert_eq!(err.get(Field::Amount), Some("Amount is required"));

        let income = validate_and_build_income(&income_form("0.01", "2025-04-01")).unwrap();
        assert_eq!(income.amount, Amount::from_cents(1));
    }

    #[test]
    fn test_income_requires_date() {
        let err = validate_and_build_income(&income_form("10", "")).unwrap_err();
        assert_eq!(err.get(Field::Date), Some("Date is required"));
        assert_eq!(err.get(Field::Amount), None);

        let err = validate_and_build_income(&income_form("10", "2025-13-40")).unwrap_err();
        assert!(err.get(Field::Date).is_some());
    }

    #[test]
    fn test_income_optional_text_fields() {
        let mut form = income_form("2500", "2025-04-01");
        form.payer = "  ABC Company ".to_string();
        let income = validate_and_build_income(&form).unwrap();
        assert_eq!(income.payer.as_deref(), Some("ABC Company"));
        assert_eq!(income.note, None);
    }

    #[test]
    fn test_expense_total_is_sum_of_items() {
        let expense =
            validate_and_build_expense(&expense_form(vec![row("Milk", "10"), row("Bread", "5")]))
                .unwrap();
        assert_eq!(expense.expense, Amount::from_cents(15_00));
        assert_eq!(expense.breakdown_items.len(), 2);
        assert_eq!(expense.breakdown_items[0].quantity.as_str(), "1");
    }

    #[test]
    fn test_expense_item_rules() {
        let err = validate_and_build_expense(&expense_form(vec![row("", "10")])).unwrap_err();
        assert_eq!(err.get(Field::Items), Some("All items must have a name"));

        let err = validate_and_build_expense(&expense_form(vec![row("Milk", "0")])).unwrap_err();
        assert_eq!(err.get(Field::Items), Some("All items must have a valid price"));
    }

    #[test]
    fn test_blank_rows_are_dropped() {
        let expense =
            validate_and_build_expense(&expense_form(vec![row("Milk", "3.5"), row(" ", "")]))
                .unwrap();
        assert_eq!(expense.breakdown_items.len(), 1);
        assert_eq!(expense.expense, Amount::from_cents(350));
    }

    #[test]
    fn test_expense_without_items_uses_amount() {
        let mut form = expense_form(Vec::new());
        let err = validate_and_build_expense(&form).unwrap_err();
        assert_eq!(err.get(Field::Amount), Some("Amount must be positive"));

        form.amount = "42.10".to_string();
        let expense = validate_and_build_expense(&form).unwrap();
        assert_eq!(expense.expense, Amount::from_cents(4210));
        assert!(expense.breakdown_items.is_empty());
    }

    #[test]
    fn test_expense_requires_category_and_date() {
        let form = ExpenseForm {
            amount: "5".to_string(),
            ..ExpenseForm::default()
        };
        let err = validate_and_build_expense(&form).unwrap_err();
        assert_eq!(err.get(Field::Category), Some("Category is required"));
        assert_eq!(err.get(Field::Date), Some("Date is required"));
    }

    #[test]
    fn test_category_name_required() {
        let editor = CategoryEditor::new_main();
        let err = validate_category_name(&editor).unwrap_err();
        assert_eq!(err.get(Field::Name), Some("Category name cannot be empty"));
    }
}
