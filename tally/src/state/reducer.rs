use super::category_tree::CategoryTree;
use super::summary::DashboardSummary;
use super::{autocomplete, AppState, InputMode, LoadingState, Scrollable};
use crate::events::DataEvent;
use crate::ui::screens::Screen;

/// Pure state transition function for data events.
///
/// Loads only touch the screen they were issued for; a response that arrives
/// after the user navigated away is dropped. Notifications always apply.
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        DataEvent::DashboardLoaded {
            expenses,
            incomes,
            categories,
            year,
        } => {
            if let Screen::Dashboard(s) = state.current_screen_mut() {
                let tree = CategoryTree::new(categories);
                s.summary = Some(DashboardSummary::compute(
                    year, &expenses, &incomes, &tree,
                ));
                s.categories = tree;
                s.loading = LoadingState::Loaded;
                s.clamp_selection();
            } else {
                tracing::debug!("Dropping dashboard data, screen no longer visible");
            }
        }

        // The expense screen keeps its own copy for labels and the picker
        DataEvent::CategoriesLoaded { categories } => match state.current_screen_mut() {
            Screen::Categories(s) => {
                s.tree = CategoryTree::new(categories).with_expansion_from(&s.tree);
                s.loading = LoadingState::Loaded;
                s.clamp_selection();
            }
            Screen::Expenses(s) => {
                let s = s.as_mut();
                s.categories = CategoryTree::new(categories);
                if let Some(form) = s.form.as_mut() {
                    if form.category_id.is_none() {
                        form.category_matches =
                            autocomplete::filter_categories(&s.categories, &form.category_query);
                    }
                }
            }
            _ => {}
        },

        DataEvent::ExpensesLoaded {
            mut expenses,
            total_pages,
            total_rows,
            total_amount,
        } => {
            if let Screen::Expenses(s) = state.current_screen_mut() {
                let s = s.as_mut();
                // Sort in descending date order (most recent first)
                expenses.sort_by(|a, b| b.date.cmp(&a.date));
                s.expenses = expenses;
                s.pagination.total_pages = total_pages;
                s.total_rows = total_rows;
                s.total_amount = total_amount;
                s.selection
                    .retain_present(s.expenses.iter().map(|e| &e.id));
                s.expanded
                    .retain(|id| s.expenses.iter().any(|e| &e.id == id));
                s.loading = LoadingState::Loaded;
                s.clamp_selection();
            }
        }

        DataEvent::IncomesLoaded { mut incomes } => {
            if let Screen::Incomes(s) = state.current_screen_mut() {
                let s = s.as_mut();
                incomes.sort_by(|a, b| b.date.cmp(&a.date));
                s.incomes = incomes;
                s.page = s.pagination().page;
                s.selection.retain_present(s.incomes.iter().map(|i| &i.id));
                s.expanded
                    .retain(|id| s.incomes.iter().any(|i| &i.id == id));
                s.loading = LoadingState::Loaded;
                s.clamp_selection();
            }
        }

        // Category mutations
        DataEvent::CategoryAdded { temp_id, category } => {
            if let Screen::Categories(s) = state.current_screen_mut() {
                s.tree = s.tree.replace(&temp_id, &category);
            }
            state.notifications.success("Category added");
        }
        DataEvent::CategoryRenamed { id } => {
            tracing::debug!("Category {} renamed", id);
            state.notifications.success("Category updated");
        }
        DataEvent::CategoryDeleted { id } => {
            tracing::debug!("Category {} deleted", id);
            state.notifications.success("Category deleted");
        }
        DataEvent::CategoryMutationFailed { undo, error } => {
            tracing::warn!("Rolling back category change {:?}: {}", undo, error);
            if let Screen::Categories(s) = state.current_screen_mut() {
                s.tree = s.tree.undo(&undo);
                s.clamp_selection();
            }
            state.notifications.error(error);
        }

        // Expense mutations
        DataEvent::ExpenseSaved { created } => {
            if let Screen::Expenses(s) = state.current_screen_mut() {
                s.form = None;
                if s.input_mode == InputMode::Form {
                    s.input_mode = InputMode::Normal;
                }
            }
            state.notifications.success(if created {
                "Expense added"
            } else {
                "Expense updated"
            });
        }
        DataEvent::ExpenseSaveFailed { error } => {
            if let Screen::Expenses(s) = state.current_screen_mut() {
                if let Some(form) = s.form.as_mut() {
                    form.in_flight = false;
                }
            }
            state.notifications.error(error);
        }
        DataEvent::ExpensesDeleted { count } => {
            state.notifications.success(deleted_message(count, "expense"));
        }

        // Income mutations
        DataEvent::IncomeSaved { created } => {
            if let Screen::Incomes(s) = state.current_screen_mut() {
                s.form = None;
                if s.input_mode == InputMode::Form {
                    s.input_mode = InputMode::Normal;
                }
            }
            state.notifications.success(if created {
                "Income added"
            } else {
                "Income updated"
            });
        }
        DataEvent::IncomeSaveFailed { error } => {
            if let Screen::Incomes(s) = state.current_screen_mut() {
                if let Some(form) = s.form.as_mut() {
                    form.in_flight = false;
                }
            }
            state.notifications.error(error);
        }
        DataEvent::IncomesDeleted { count } => {
            state.notifications.success(deleted_message(count, "income"));
        }

        DataEvent::DeleteFailed { error } => state.notifications.error(error),

        // Reports
        DataEvent::ReportOpened { path } => {
            tracing::debug!("Report opened from {}", path);
            state.notifications.info("Report opened in your browser");
        }
        DataEvent::ReportFailed { error } => {
            state
                .notifications
                .error(format!("Failed to open report: {}", error));
        }

        // Errors
        DataEvent::LoadError { error } => {
            let loading = match state.current_screen_mut() {
                Screen::Dashboard(s) => &mut s.loading,
                Screen::Categories(s) => &mut s.loading,
                Screen::Expenses(s) => &mut s.loading,
                Screen::Incomes(s) => &mut s.loading,
            };
            *loading = LoadingState::Error(error.clone());
            state.notifications.error(error);
        }
        DataEvent::SessionExpired => {
            tracing::warn!("Session rejected by the server, signing out");
            state.should_quit = true;
            state.clear_session = true;
            state.exit_message =
                Some("Your session has expired. Please sign in again.".to_string());
        }
    }
}

fn deleted_message(count: usize, noun: &str) -> String {
    match count {
        1 => format!("1 {} deleted", noun),
        n => format!("{} {}s deleted", n, noun),
    }
}
