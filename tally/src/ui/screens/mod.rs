pub mod categories_screen;
pub mod dashboard_screen;
pub mod expenses_screen;
pub mod incomes_screen;

use crate::state::{CategoriesState, DashboardState, ExpensesState, IncomesState};

#[derive(Debug, Clone)]
pub enum Screen {
    Dashboard(Box<DashboardState>),
    Categories(CategoriesState),
    Expenses(Box<ExpensesState>),
    Incomes(Box<IncomesState>),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Dashboard(_) => ScreenKind::Dashboard,
            Screen::Categories(_) => ScreenKind::Categories,
            Screen::Expenses(_) => ScreenKind::Expenses,
            Screen::Incomes(_) => ScreenKind::Incomes,
        }
    }

    /// Fresh state for a screen of the given kind.
    pub fn empty(kind: ScreenKind) -> Self {
        match kind {
            ScreenKind::Dashboard => Screen::Dashboard(Box::default()),
            ScreenKind::Categories => Screen::Categories(CategoriesState::default()),
            ScreenKind::Expenses => Screen::Expenses(Box::default()),
            ScreenKind::Incomes => Screen::Incomes(Box::default()),
        }
    }
}

/// Pages listed in the sidebar, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Dashboard,
    Categories,
    Expenses,
    Incomes,
}

impl ScreenKind {
    pub const ALL: [ScreenKind; 4] = [
        ScreenKind::Dashboard,
        ScreenKind::Categories,
        ScreenKind::Expenses,
        ScreenKind::Incomes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScreenKind::Dashboard => "Dashboard",
            ScreenKind::Categories => "Categories",
            ScreenKind::Expenses => "Expenses",
            ScreenKind::Incomes => "Income",
        }
    }

    /// Digit shortcut shown next to the label.
    pub fn shortcut(self) -> char {
        match self {
            ScreenKind::Dashboard => '1',
            ScreenKind::Categories => '2',
            ScreenKind::Expenses => '3',
            ScreenKind::Incomes => '4',
        }
    }
}
