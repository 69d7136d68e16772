//! Editable state behind the category, expense and income popups.

use crate::state::autocomplete;
use crate::state::category_tree::CategoryTree;
use crate::state::validators::{self, Field, FormErrors};
use crate::utils::dates;
use chrono::NaiveDate;
use tally_api::endpoints::{
    categories::Category, expenses::Expense, incomes::Income, Amount, Id, Quantity,
};

/// What a category edit popup will do on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Rename { id: Id },
    NewMain,
    NewSubcategory { parent_id: Id },
}

/// The single pending category edit. Opening a new one replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryEditor {
    pub target: EditTarget,
    pub name: String,
    pub errors: FormErrors,
}

impl CategoryEditor {
    pub fn new_main() -> Self {
        Self {
            target: EditTarget::NewMain,
            name: String::new(),
            errors: FormErrors::default(),
        }
    }

    pub fn new_subcategory(parent_id: Id) -> Self {
        Self {
            target: EditTarget::NewSubcategory { parent_id },
            ..Self::new_main()
        }
    }

    pub fn rename(category: &Category) -> Self {
        Self {
            target: EditTarget::Rename {
                id: category.id.clone(),
            },
            name: category.name.clone(),
            errors: FormErrors::default(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.target {
            EditTarget::Rename { .. } => "Rename Category",
            EditTarget::NewMain => "New Category",
            EditTarget::NewSubcategory { .. } => "New Subcategory",
        }
    }

    pub fn push(&mut self, c: char) {
        self.name.push(c);
        self.errors.clear(Field::Name);
    }

    pub fn backspace(&mut self) {
        self.name.pop();
    }
}

/// Editable breakdown line. Inputs are kept as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownRow {
    pub id: Option<Id>,
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl Default for BreakdownRow {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            price: String::new(),
            quantity: Quantity::default().to_string(),
        }
    }
}

impl BreakdownRow {
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() && self.price.trim().is_empty()
    }

    pub fn price(&self) -> Amount {
        Amount::parse(&self.price).unwrap_or(Amount::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemColumn {
    Name,
    Price,
    Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseFocus {
    #[default]
    Category,
    Date,
    Detail,
    Amount,
    Item {
        row: usize,
        column: ItemColumn,
    },
}

/// State for the expense create/edit popup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseForm {
    pub editing_id: Option<Id>,
    pub focus: ExpenseFocus,

    // Category autocomplete
    pub category_query: String,
    pub category_id: Option<Id>,
    pub category_matches: Vec<Category>,
    pub category_selection: usize,

    pub date: String,
    pub detail: String,
    /// Used as the total only while there are no breakdown rows.
    pub amount: String,
    pub items: Vec<BreakdownRow>,
    /// Server ids of saved rows removed while editing. Deleted remotely only
    /// after the expense itself is saved.
    pub removed_items: Vec<Id>,

    pub errors: FormErrors,
    pub in_flight: bool,
}

impl ExpenseForm {
    pub fn new(today: NaiveDate, categories: &CategoryTree) -> Self {
        Self {
            date: dates::format_iso(today),
            category_matches: autocomplete::filter_categories(categories, ""),
            ..Self::default()
        }
    }

    pub fn from_expense(expense: &Expense, categories: &CategoryTree) -> Self {
        let category_query = categories
            .find(&expense.category_id)
            .map(|c| autocomplete::category_label(categories, c))
            .unwrap_or_else(|| expense.category_id.to_string());

        Self {
            editing_id: Some(expense.id.clone()),
            category_query,
            category_id: Some(expense.category_id.clone()),
            date: dates::format_iso(expense.date),
            detail: expense.detail.clone().unwrap_or_default(),
            amount: expense.expense.to_string(),
            items: expense
                .breakdown_items
                .iter()
                .map(|item| BreakdownRow {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    price: item.price.to_string(),
                    quantity: item.quantity.to_string(),
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Current total: the sum of item prices, or the amount field when the
    /// expense has no breakdown.
    pub fn total(&self) -> Amount {
        if self.items.is_empty() {
            Amount::parse(&self.amount).unwrap_or(Amount::ZERO)
        } else {
            self.items.iter().map(BreakdownRow::price).sum()
        }
    }

    fn focus_order(&self) -> Vec<ExpenseFocus> {
        let mut order = vec![
            ExpenseFocus::Category,
            ExpenseFocus::Date,
            ExpenseFocus::Detail,
        ];
        if self.items.is_empty() {
            order.push(ExpenseFocus::Amount);
        }
        for row in 0..self.items.len() {
            for column in [ItemColumn::Name, ItemColumn::Price, ItemColumn::Quantity] {
                order.push(ExpenseFocus::Item { row, column });
            }
        }
        order
    }

    pub fn navigate_field(&mut self, forward: bool) {
        let order = self.focus_order();
        let position = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (position + 1) % order.len()
        } else {
            (position + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }

    pub fn is_autocomplete_focused(&self) -> bool {
        self.focus == ExpenseFocus::Category && !self.category_matches.is_empty()
    }

    pub fn append_char(&mut self, c: char, categories: &CategoryTree) {
        match self.focus {
            ExpenseFocus::Category => {
                self.category_query.push(c);
                self.refresh_matches(categories);
            }
            ExpenseFocus::Date => {
                if let Some(date) = dates::append_date_char(&self.date, c) {
                    self.date = date;
                    self.errors.clear(Field::Date);
                }
            }
            ExpenseFocus::Detail => self.detail.push(c),
            ExpenseFocus::Amount => {
                let candidate = format!("{}{}", self.amount, c);
                if validators::is_price_input(&candidate) {
                    self.amount = candidate;
                    self.errors.clear(Field::Amount);
                }
            }
            ExpenseFocus::Item { row, column } => {
                let Some(item) = self.items.get_mut(row) else {
                    return;
                };
                let (value, accepts): (&mut String, fn(&str) -> bool) = match column {
                    ItemColumn::Name => (&mut item.name, any_text),
                    ItemColumn::Price => (&mut item.price, validators::is_price_input),
                    ItemColumn::Quantity => (&mut item.quantity, Quantity::is_valid_input),
                };
                let candidate = format!("{}{}", value, c);
                if accepts(&candidate) {
                    *value = candidate;
                    self.errors.clear(Field::Items);
                }
            }
        }
    }

    pub fn delete_char(&mut self, categories: &CategoryTree) {
        match self.focus {
            ExpenseFocus::Category => {
                self.category_query.pop();
                self.refresh_matches(categories);
            }
            ExpenseFocus::Date => {
                self.date.pop();
            }
            ExpenseFocus::Detail => {
                self.detail.pop();
            }
            ExpenseFocus::Amount => {
                self.amount.pop();
            }
            ExpenseFocus::Item { row, column } => {
                if let Some(item) = self.items.get_mut(row) {
                    match column {
                        ItemColumn::Name => item.name.pop(),
                        ItemColumn::Price => item.price.pop(),
                        ItemColumn::Quantity => item.quantity.pop(),
                    };
                }
            }
        }
    }

    /// Typing into the picker forgets the previous choice until a suggestion
    /// is confirmed again.
    fn refresh_matches(&mut self, categories: &CategoryTree) {
        self.category_id = None;
        self.category_matches = autocomplete::filter_categories(categories, &self.category_query);
        self.category_selection = 0;
    }

    pub fn select_autocomplete_item(&mut self, up: bool) {
        let count = self.category_matches.len();
        if count == 0 {
            return;
        }
        self.category_selection = if up {
            (self.category_selection + count - 1) % count
        } else {
            (self.category_selection + 1) % count
        };
    }

    pub fn confirm_autocomplete(&mut self, categories: &CategoryTree) {
        if let Some(category) = self.category_matches.get(self.category_selection) {
            self.category_query = autocomplete::category_label(categories, category);
            self.category_id = Some(category.id.clone());
            self.category_matches.clear();
            self.category_selection = 0;
            self.errors.clear(Field::Category);
            self.focus = ExpenseFocus::Date;
        }
    }

    /// Append an empty breakdown row. Rows need a category first.
    pub fn add_item(&mut self) -> bool {
        if self.category_id.is_none() {
            self.errors
                .insert(Field::Category, "Select a category before adding items");
            return false;
        }
        if self.items.is_empty() && !self.amount.is_empty() {
            self.items.push(BreakdownRow {
                price: self.amount.clone(),
                ..BreakdownRow::default()
            });
        } else {
            self.items.push(BreakdownRow::default());
        }
        self.focus = ExpenseFocus::Item {
            row: self.items.len() - 1,
            column: ItemColumn::Name,
        };
        true
    }

    /// Remove the focused breakdown row. A row that already exists remotely
    /// is remembered in `removed_items`.
    pub fn remove_item(&mut self) {
        let ExpenseFocus::Item { row, .. } = self.focus else {
            return;
        };
        if row >= self.items.len() {
            return;
        }
        let removed = self.items.remove(row);
        self.focus = if self.items.is_empty() {
            self.amount.clear();
            ExpenseFocus::Amount
        } else {
            ExpenseFocus::Item {
                row: row.min(self.items.len() - 1),
                column: ItemColumn::Name,
            }
        };
        if let Some(id) = removed.id.filter(|_| self.is_edit_mode()) {
            self.removed_items.push(id);
        }
    }
}

fn any_text(_: &str) -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncomeFocus {
    #[default]
    Amount,
    Date,
    Payer,
    Note,
}

impl IncomeFocus {
    const ORDER: [IncomeFocus; 4] = [
        IncomeFocus::Amount,
        IncomeFocus::Date,
        IncomeFocus::Payer,
        IncomeFocus::Note,
    ];
}

/// State for the income create/edit popup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomeForm {
    pub editing_id: Option<Id>,
    pub focus: IncomeFocus,
    pub amount: String,
    pub date: String,
    pub payer: String,
    pub note: String,
    pub errors: FormErrors,
    pub in_flight: bool,
}

impl IncomeForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: dates::format_iso(today),
            ..Self::default()
        }
    }

    pub fn from_income(income: &Income) -> Self {
        Self {
            editing_id: Some(income.id.clone()),
            amount: income.amount.to_string(),
            date: dates::format_iso(income.date),
            payer: income.payer.clone().unwrap_or_default(),
            note: income.note.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn navigate_field(&mut self, forward: bool) {
        let order = IncomeFocus::ORDER;
        let position = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (position + 1) % order.len()
        } else {
            (position + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }

    pub fn append_char(&mut self, c: char) {
        match self.focus {
            IncomeFocus::Amount => {
                let candidate = format!("{}{}", self.amount, c);
                if validators::is_price_input(&candidate) {
                    self.amount = candidate;
                    self.errors.clear(Field::Amount);
                }
            }
            IncomeFocus::Date => {
                if let Some(date) = dates::append_date_char(&self.date, c) {
                    self.date = date;
                    self.errors.clear(Field::Date);
                }
            }
            IncomeFocus::Payer => self.payer.push(c),
            IncomeFocus::Note => self.note.push(c),
        }
    }

    pub fn delete_char(&mut self) {
        match self.focus {
            IncomeFocus::Amount => self.amount.pop(),
            IncomeFocus::Date => self.date.pop(),
            IncomeFocus::Payer => self.payer.pop(),
            IncomeFocus::Note => self.note.pop(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_api::endpoints::expenses::BreakdownItem;

    fn tree() -> CategoryTree {
        let mut utilities = Category::new("1", "Utilities", None);
        utilities.children = vec![Category::new("2", "Electricity", Some(Id::new("1")))];
        CategoryTree::new(vec![utilities, Category::new("4", "Groceries", None)])
    }

    fn type_str(form: &mut ExpenseForm, text: &str, tree: &CategoryTree) {
        for c in text.chars() {
            form.append_char(c, tree);
        }
    }

    fn form_with_category(tree: &CategoryTree) -> ExpenseForm {
        let mut form = ExpenseForm::new(NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(), tree);
        type_str(&mut form, "groc", tree);
        form.confirm_autocomplete(tree);
        form
    }

    #[test]
    fn test_autocomplete_picks_category() {
        let tree = tree();
        let form = form_with_category(&tree);
        assert_eq!(form.category_id, Some(Id::new("4")));
        assert_eq!(form.category_query, "Groceries");
        assert_eq!(form.focus, ExpenseFocus::Date);
    }

    #[test]
    fn test_typing_clears_chosen_category() {
        let tree = tree();
        let mut form = form_with_category(&tree);
        form.focus = ExpenseFocus::Category;
        form.delete_char(&tree);
        assert_eq!(form.category_id, None);
    }

    #[test]
    fn test_add_item_requires_category() {
        let tree = tree();
        let mut form = ExpenseForm::new(NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(), &tree);
        assert!(!form.add_item());
        assert!(form.items.is_empty());
        assert!(form.errors.get(Field::Category).is_some());
    }

    #[test]
    fn test_breakdown_total_tracks_edits() {
        let tree = tree();
        let mut form = form_with_category(&tree);

        form.add_item();
        type_str(&mut form, "Milk", &tree);
        form.navigate_field(true);
        type_str(&mut form, "10", &tree);

        form.add_item();
        type_str(&mut form, "Bread", &tree);
        form.navigate_field(true);
        type_str(&mut form, "5", &tree);
        assert_eq!(form.total(), Amount::from_cents(15_00));

        form.remove_item();
        assert!(form.removed_items.is_empty());
        assert_eq!(form.total(), Amount::from_cents(10_00));
    }

    #[test]
    fn test_price_and_quantity_inputs_are_filtered() {
        let tree = tree();
        let mut form = form_with_category(&tree);
        form.add_item();
        form.focus = ExpenseFocus::Item {
            row: 0,
            column: ItemColumn::Price,
        };
        type_str(&mut form, "1x2.345", &tree);
        assert_eq!(form.items[0].price, "12.34");

        form.focus = ExpenseFocus::Item {
            row: 0,
            column: ItemColumn::Quantity,
        };
        form.delete_char(&tree);
        type_str(&mut form, "3kg", &tree);
        assert_eq!(form.items[0].quantity, "3kg");
    }

    #[test]
    fn test_removing_saved_item_in_edit_mode_records_id() {
        let tree = tree();
        let expense = Expense {
            id: Id::new("9"),
            category_id: Id::new("4"),
            expense: Amount::from_cents(700),
            date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            detail: None,
            breakdown_items: vec![BreakdownItem {
                id: Some(Id::new("77")),
                name: "Eggs".into(),
                price: Amount::from_cents(700),
                quantity: Quantity::new("12"),
            }],
        };
        let mut form = ExpenseForm::from_expense(&expense, &tree);
        assert_eq!(form.category_query, "Groceries");

        form.focus = ExpenseFocus::Item {
            row: 0,
            column: ItemColumn::Name,
        };
        form.remove_item();
        assert_eq!(form.removed_items, vec![Id::new("77")]);
        assert_eq!(form.focus, ExpenseFocus::Amount);
        assert_eq!(form.total(), Amount::ZERO);
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = IncomeForm::new(NaiveDate::from_ymd_opt(2025, 4, 2).unwrap());
        form.navigate_field(false);
        assert_eq!(form.focus, IncomeFocus::Note);
        form.navigate_field(true);
        assert_eq!(form.focus, IncomeFocus::Amount);
    }

    #[test]
    fn test_income_date_typing_inserts_dashes() {
        let mut form = IncomeForm::default();
        form.focus = IncomeFocus::Date;
        for c in "20250401".chars() {
            form.append_char(c);
        }
        assert_eq!(form.date, "2025-04-01");
    }
}
