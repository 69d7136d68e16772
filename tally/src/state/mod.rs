pub mod autocomplete;
pub mod category_tree;
pub mod filters;
pub mod forms;
pub mod pagination;
pub mod reducer;
pub mod selection;
pub mod summary;
pub mod validators;

use crate::events::ExpenseQuery;
use crate::notifications::Notifications;
use crate::preferences::Preferences;
use crate::ui::screens::{Screen, ScreenKind};
use crate::ui::theme::ThemeMode;
use category_tree::{CategoryRow, CategoryTree};
use filters::DateRange;
use forms::{CategoryEditor, ExpenseForm, IncomeForm};
use pagination::Pagination;
use ratatui::widgets::TableState;
use selection::Selection;
use std::cell::RefCell;
use std::collections::HashSet;
use summary::DashboardSummary;
use tally_api::endpoints::{expenses::Expense, incomes::Income, Amount, Id};
use throbber_widgets_tui::ThrobberState;

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

impl LoadingState {
    pub fn start() -> Self {
        LoadingState::Loading(ThrobberState::default())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }
}

/// Represents input mode for screens that support editing
#[derive(Default, Debug, Clone, PartialEq)]
pub enum InputMode {
    #[default]
    Normal,
    Filter,
    DateRange,
    Form,
    DeleteConfirmation,
}

/// What a pending delete confirmation will remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Single(Id),
    Selected(Vec<Id>),
}

impl DeleteTarget {
    pub fn ids(&self) -> Vec<Id> {
        match self {
            DeleteTarget::Single(id) => vec![id.clone()],
            DeleteTarget::Selected(ids) => ids.clone(),
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            DeleteTarget::Single(_) => "Are you sure you want to delete this item?".to_string(),
            DeleteTarget::Selected(ids) => format!(
                "Are you sure you want to delete {} selected items?",
                ids.len()
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub history: Vec<Screen>,

    // Session
    pub user_id: String,
    pub monthly_budget: Amount,

    // UI state
    pub theme: ThemeMode,
    pub sidebar_open: bool,
    pub notifications: Notifications,
    pub help_visible: bool,
    pub pending_key: Option<char>,

    // System
    pub should_quit: bool,
    /// Remove the stored session on exit.
    pub clear_session: bool,
    /// Printed after the terminal is restored.
    pub exit_message: Option<String>,
}

impl AppState {
    pub fn new(user_id: impl Into<String>, monthly_budget: Amount) -> Self {
        Self {
            history: vec![Screen::empty(ScreenKind::Dashboard)],

            user_id: user_id.into(),
            monthly_budget,

            theme: ThemeMode::default(),
            sidebar_open: true,
            notifications: Notifications::default(),
            help_visible: false,
            pending_key: None,

            should_quit: false,
            clear_session: false,
            exit_message: None,
        }
    }

    pub fn apply_preferences(&mut self, preferences: Preferences) {
        self.theme = preferences.theme;
        self.sidebar_open = preferences.sidebar_open;
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            theme: self.theme,
            sidebar_open: self.sidebar_open,
        }
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        self.history
            .last()
            .expect("Navigation stack should never be empty")
    }

    /// Get mutable reference to current screen
    pub fn current_screen_mut(&mut self) -> &mut Screen {
        self.history
            .last_mut()
            .expect("Navigation stack should never be empty")
    }

    pub fn current_kind(&self) -> ScreenKind {
        self.current_screen().kind()
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to {:?}, stack depth: {} -> {}",
            screen.kind(),
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            tracing::debug!(
                "Navigating back, stack depth: {} -> {}",
                self.history.len(),
                self.history.len() - 1
            );
            self.history.pop();
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        let loading = match self.current_screen_mut() {
            Screen::Dashboard(state) => &mut state.loading,
            Screen::Categories(state) => &mut state.loading,
            Screen::Expenses(state) => &mut state.loading,
            Screen::Incomes(state) => &mut state.loading,
        };
        match loading {
            LoadingState::Loading(throbber_state) => Some(throbber_state),
            _ => None,
        }
    }

    /// Input mode of the current screen; the dashboard is always normal.
    pub fn input_mode(&self) -> InputMode {
        match self.current_screen() {
            Screen::Dashboard(_) => InputMode::Normal,
            Screen::Categories(state) => state.input_mode.clone(),
            Screen::Expenses(state) => state.input_mode.clone(),
            Screen::Incomes(state) => state.input_mode.clone(),
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct DashboardState {
    pub loading: LoadingState,
    pub summary: Option<DashboardSummary>,
    pub categories: CategoryTree,
    pub table_state: RefCell<TableState>,
}

#[derive(Default, Debug, Clone)]
pub struct CategoriesState {
    pub loading: LoadingState,
    pub tree: CategoryTree,
    pub table_state: RefCell<TableState>,
    pub input_mode: InputMode,
    pub search: String,
    pub editor: Option<CategoryEditor>,
    pub delete_target: Option<Id>,
}

impl CategoriesState {
    pub fn rows(&self) -> Vec<CategoryRow> {
        self.tree.visible_rows(&self.search)
    }

    pub fn selected_row(&self) -> Option<CategoryRow> {
        let index = self.table_state.borrow().selected()?;
        self.rows().into_iter().nth(index)
    }
}

#[derive(Default, Debug, Clone)]
pub struct ExpensesState {
    pub loading: LoadingState,
    /// Current page as returned by the server.
    pub expenses: Vec<Expense>,
    pub categories: CategoryTree,
    pub table_state: RefCell<TableState>,
    pub input_mode: InputMode,
    pub search: String,
    pub range_input: String,
    pub date_range: Option<DateRange>,
    pub pagination: Pagination,
    pub total_amount: Amount,
    pub total_rows: u32,
    pub selection: Selection,
    pub expanded: HashSet<Id>,
    pub form: Option<ExpenseForm>,
    pub pending_delete: Option<DeleteTarget>,
}

impl ExpensesState {
    pub fn query(&self) -> ExpenseQuery {
        ExpenseQuery {
            search: self.search.trim().to_string(),
            range: self.date_range,
            page: self.pagination.page,
        }
    }

    pub fn highlighted(&self) -> Option<&Expense> {
        let index = self.table_state.borrow().selected()?;
        self.expenses.get(index)
    }

    pub fn visible_ids(&self) -> Vec<Id> {
        self.expenses.iter().map(|e| e.id.clone()).collect()
    }

    pub fn remaining_budget(&self, monthly_budget: Amount) -> Amount {
        monthly_budget - self.total_amount
    }
}

#[derive(Default, Debug, Clone)]
pub struct IncomesState {
    pub loading: LoadingState,
    /// Every income of the user; filtering and paging happen locally.
    pub incomes: Vec<Income>,
    pub table_state: RefCell<TableState>,
    pub input_mode: InputMode,
    pub search: String,
    pub range_input: String,
    pub date_range: Option<DateRange>,
    pub page: u32,
    pub selection: Selection,
    pub expanded: HashSet<Id>,
    pub form: Option<IncomeForm>,
    pub pending_delete: Option<DeleteTarget>,
}

impl IncomesState {
    pub fn filtered(&self) -> Vec<&Income> {
        filters::filter_incomes(&self.incomes, &self.search, self.date_range.as_ref())
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::for_items(self.page, self.filtered().len())
    }

    pub fn page_items(&self) -> Vec<&Income> {
        let filtered = self.filtered();
        let bounds = self.pagination().slice_bounds(filtered.len());
        filtered[bounds].to_vec()
    }

    pub fn highlighted(&self) -> Option<&Income> {
        let index = self.table_state.borrow().selected()?;
        self.page_items().get(index).copied()
    }

    /// Ids of the whole filtered set, across pages.
    pub fn filtered_ids(&self) -> Vec<Id> {
        self.filtered().iter().map(|i| i.id.clone()).collect()
    }

    pub fn total_amount(&self) -> Amount {
        self.filtered().iter().map(|i| i.amount).sum()
    }
}

pub trait Scrollable {
    fn num_items(&self) -> usize;
    fn table_state(&self) -> &RefCell<TableState>;

    fn select_prev(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            match table_state.selected() {
                Some(index) if index > 0 => table_state.select(Some(index.min(num_items) - 1)),
                _ => table_state.select(Some(num_items - 1)),
            }
        }
    }

    fn select_next(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            match table_state.selected() {
                Some(index) if index + 1 < num_items => table_state.select(Some(index + 1)),
                _ => table_state.select(Some(0)),
            }
        }
    }

    fn select_first(&mut self) {
        if self.num_items() > 0 {
            self.table_state().borrow_mut().select(Some(0));
        }
    }

    fn select_last(&mut self) {
        let num_items = self.num_items();
        if num_items > 0 {
            self.table_state().borrow_mut().select(Some(num_items - 1));
        }
    }

    /// Keep the cursor on a valid row after the item count changed.
    fn clamp_selection(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        match (num_items, table_state.selected()) {
            (0, _) => table_state.select(None),
            (n, Some(index)) if index >= n => table_state.select(Some(n - 1)),
            (_, None) => table_state.select(Some(0)),
            _ => {}
        }
    }
}

impl Scrollable for DashboardState {
    fn num_items(&self) -> usize {
        self.summary.as_ref().map_or(0, |s| s.recent.len())
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

impl Scrollable for CategoriesState {
    fn num_items(&self) -> usize {
        self.rows().len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

impl Scrollable for ExpensesState {
    fn num_items(&self) -> usize {
        self.expenses.len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}

impl Scrollable for IncomesState {
    fn num_items(&self) -> usize {
        self.page_items().len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}
