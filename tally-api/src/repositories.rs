use crate::endpoints::{
    Id,
    categories::{AddCategory, DeleteCategory, ListCategories, UpdateCategory},
    expenses::{
        AddExpense, DeleteBreakdownItem, DeleteExpenses, EditExpense, ListExpenses, NewExpense,
    },
    incomes::{AddIncome, DeleteIncomes, EditIncome, ListIncomes, NewIncome},
};

#[derive(Default)]
pub struct CategoryRepository {
    user_id: String,
}

impl CategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn list(&self) -> ListCategories {
        ListCategories::new().user_id(self.user_id.clone())
    }

    pub fn add(&self, name: impl Into<String>, parent_id: Option<Id>) -> AddCategory {
        AddCategory::new(name, parent_id).user_id(self.user_id.clone())
    }

    pub fn update(&self, category_id: Id, name: impl Into<String>) -> UpdateCategory {
        UpdateCategory::new(category_id, name).user_id(self.user_id.clone())
    }

    pub fn delete(&self, category_id: Id) -> DeleteCategory {
        DeleteCategory::new(category_id).user_id(self.user_id.clone())
    }
}

#[derive(Default)]
pub struct ExpenseRepository {
    user_id: String,
}

impl ExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn list(&self) -> ListExpenses {
        ListExpenses::new().user_id(self.user_id.clone())
    }

    pub fn add(&self, expense: NewExpense) -> AddExpense {
        AddExpense::new(expense).user_id(self.user_id.clone())
    }

    pub fn edit(&self, id: Id, expense: NewExpense) -> EditExpense {
        EditExpense::new(id, expense).user_id(self.user_id.clone())
    }

    pub fn delete(&self, expense_ids: Vec<Id>) -> DeleteExpenses {
        DeleteExpenses::new(expense_ids).user_id(self.user_id.clone())
    }

    pub fn delete_breakdown_item(&self, breakdown_item_id: Id) -> DeleteBreakdownItem {
        DeleteBreakdownItem::new(breakdown_item_id).user_id(self.user_id.clone())
    }
}

#[derive(Default)]
pub struct IncomeRepository {
    user_id: String,
}

impl IncomeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn list(&self) -> ListIncomes {
        ListIncomes::new().user_id(self.user_id.clone())
    }

    pub fn add(&self, income: NewIncome) -> AddIncome {
        AddIncome::new(income).user_id(self.user_id.clone())
    }

    pub fn edit(&self, id: Id, income: NewIncome) -> EditIncome {
        EditIncome::new(id, income).user_id(self.user_id.clone())
    }

    pub fn delete(&self, income_ids: Vec<Id>) -> DeleteIncomes {
        DeleteIncomes::new(income_ids).user_id(self.user_id.clone())
    }
}
