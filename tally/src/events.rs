use crate::preferences::Preferences;
use crate::state::category_tree::TreeUndo;
use crate::state::filters::DateRange;
use crate::ui::screens::ScreenKind;
use tally_api::endpoints::{
    categories::Category,
    expenses::{Expense, NewExpense},
    incomes::{Income, NewIncome},
    Amount, Id,
};

/// Commands to execute (user actions → state changes and background jobs)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SelectNext,
    SelectPrevious,
    NavigateToTop,
    NavigateToBottom,

    // Navigation
    NavigateBack,
    SwitchScreen(ScreenKind),
    Refresh,

    // Filter mode
    EnterFilterMode,
    ExitFilterMode,
    AppendFilterChar(char),
    DeleteFilterChar,
    ClearFilter,

    // Date range input
    EnterDateRangeMode,
    AppendDateRangeChar(char),
    DeleteDateRangeChar,
    ApplyDateRange,
    CancelDateRange,
    ClearDateRange,

    // Paging
    NextPage,
    PreviousPage,

    // Rows
    ToggleRowSelection,
    ToggleSelectAll,
    ToggleRowExpanded,

    // Category tree
    ToggleCategoryExpanded,
    StartAddCategory,
    StartAddSubcategory,
    StartRenameCategory,
    DuplicateCategory,

    // Popup forms (category editor, expense and income forms)
    OpenCreateForm,
    OpenEditForm,
    CloseForm,
    NavigateFormField {
        forward: bool,
    },
    AppendFormFieldChar {
        c: char,
    },
    DeleteFormFieldChar,
    SelectAutocompleteItem {
        up: bool,
    },
    ConfirmAutocompleteSelection,
    AddBreakdownItem,
    RemoveBreakdownItem,
    SubmitForm,

    // Deletion
    InitiateDelete,
    InitiateDeleteSelected,
    ConfirmDelete,
    CancelDelete,

    // Reports
    PrintHighlighted,
    PrintSelection,

    // Shell
    ToggleHelp,
    ToggleSidebar,
    ToggleTheme,
    SignOut,

    // Key sequence state
    SetPendingKey(char),
    ClearPendingKey,

    // System
    Quit,
}

/// Parameters of one expense list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseQuery {
    pub search: String,
    pub range: Option<DateRange>,
    pub page: u32,
}

impl Default for ExpenseQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            range: None,
            page: 1,
        }
    }
}

/// Side effects requested by a command. Produced synchronously, executed by
/// the background loader.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundJob {
    LoadDashboard {
        year: i32,
    },
    LoadCategories,
    LoadExpenses {
        query: ExpenseQuery,
    },
    LoadIncomes,

    AddCategory {
        temp_id: Id,
        name: String,
        parent_id: Option<Id>,
        undo: TreeUndo,
    },
    RenameCategory {
        id: Id,
        name: String,
        undo: TreeUndo,
    },
    DeleteCategory {
        id: Id,
        undo: TreeUndo,
    },

    SaveExpense {
        id: Option<Id>,
        expense: NewExpense,
        /// Saved breakdown items removed in the form, deleted after the save.
        removed_items: Vec<Id>,
        query: ExpenseQuery,
    },
    DeleteExpenses {
        ids: Vec<Id>,
        query: ExpenseQuery,
    },

    SaveIncome {
        id: Option<Id>,
        income: NewIncome,
    },
    DeleteIncomes {
        ids: Vec<Id>,
    },

    OpenReport {
        html: String,
    },
    SavePreferences(Preferences),
}

impl BackgroundJob {
    /// Re-issuing a load with the same key aborts the running one.
    pub fn task_key(&self) -> String {
        match self {
            BackgroundJob::LoadDashboard { .. } => "load_dashboard".to_string(),
            BackgroundJob::LoadCategories => "load_categories".to_string(),
            BackgroundJob::LoadExpenses { .. } => "load_expenses".to_string(),
            BackgroundJob::LoadIncomes => "load_incomes".to_string(),
            BackgroundJob::AddCategory { temp_id, .. } => format!("add_category_{}", temp_id),
            BackgroundJob::RenameCategory { id, .. } => format!("rename_category_{}", id),
            BackgroundJob::DeleteCategory { id, .. } => format!("delete_category_{}", id),
            BackgroundJob::SaveExpense { .. } => "save_expense".to_string(),
            BackgroundJob::DeleteExpenses { .. } => "delete_expenses".to_string(),
            BackgroundJob::SaveIncome { .. } => "save_income".to_string(),
            BackgroundJob::DeleteIncomes { .. } => "delete_incomes".to_string(),
            BackgroundJob::OpenReport { .. } => "open_report".to_string(),
            BackgroundJob::SavePreferences(_) => "save_preferences".to_string(),
        }
    }

    /// Screen whose loads this job belongs to. Scoped jobs are aborted when
    /// that screen is left; mutations always run to completion.
    pub fn scope(&self) -> Option<ScreenKind> {
        match self {
            BackgroundJob::LoadDashboard { .. } => Some(ScreenKind::Dashboard),
            BackgroundJob::LoadCategories => Some(ScreenKind::Categories),
            BackgroundJob::LoadExpenses { .. } => Some(ScreenKind::Expenses),
            BackgroundJob::LoadIncomes => Some(ScreenKind::Incomes),
            _ => None,
        }
    }
}

/// Events from background tasks (responses to jobs)
#[derive(Debug, Clone)]
pub enum DataEvent {
    DashboardLoaded {
        expenses: Vec<Expense>,
        incomes: Vec<Income>,
        categories: Vec<Category>,
        year: i32,
    },
    CategoriesLoaded {
        categories: Vec<Category>,
    },
    ExpensesLoaded {
        expenses: Vec<Expense>,
        total_pages: u32,
        total_rows: u32,
        total_amount: Amount,
    },
    IncomesLoaded {
        incomes: Vec<Income>,
    },

    // Category mutations
    CategoryAdded {
        temp_id: Id,
        category: Category,
    },
    CategoryRenamed {
        id: Id,
    },
    CategoryDeleted {
        id: Id,
    },
    CategoryMutationFailed {
        undo: TreeUndo,
        error: String,
    },

    // Expense mutations
    ExpenseSaved {
        created: bool,
    },
    ExpenseSaveFailed {
        error: String,
    },
    ExpensesDeleted {
        count: usize,
    },

    // Income mutations
    IncomeSaved {
        created: bool,
    },
    IncomeSaveFailed {
        error: String,
    },
    IncomesDeleted {
        count: usize,
    },

    DeleteFailed {
        error: String,
    },

    // Reports
    ReportOpened {
        path: String,
    },
    ReportFailed {
        error: String,
    },

    // Errors
    LoadError {
        error: String,
    },
    /// The server no longer accepts the session token.
    SessionExpired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_are_scoped_mutations_are_not() {
        assert_eq!(BackgroundJob::LoadIncomes.scope(), Some(ScreenKind::Incomes));
        assert_eq!(
            BackgroundJob::DeleteIncomes { ids: Vec::new() }.scope(),
            None
        );
    }

    #[test]
    fn test_reloads_share_a_key() {
        let first = BackgroundJob::LoadExpenses {
            query: ExpenseQuery::default(),
        };
        let second = BackgroundJob::LoadExpenses {
            query: ExpenseQuery {
                page: 4,
                ..ExpenseQuery::default()
            },
        };
        assert_eq!(first.task_key(), second.task_key());
    }
}
