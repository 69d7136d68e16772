use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::events::{AppCommand, BackgroundJob};
use crate::report::{Report, ReportScope};
use crate::state::category_tree::{CategoryTree, TreeUndo};
use crate::state::filters::DateRange;
use crate::state::forms::{CategoryEditor, EditTarget, ExpenseForm, IncomeForm};
use crate::state::validators;
use crate::state::*;
use crate::ui::screens::{Screen, ScreenKind};
use chrono::{Datelike, Local};
use tally_api::endpoints::{categories::Category, expenses::Expense, incomes::Income, Id};

const TEMP_ID_PREFIX: &str = "tmp-";
const UNSAVED_CATEGORY: &str = "Category is still being saved";

/// Execute a command: apply its state change, then spawn the background jobs
/// it requested. Leaving a screen aborts that screen's pending loads.
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    let previous_kind = state.current_kind();
    let jobs = execute_command_sync(command, state);

    if state.current_kind() != previous_kind {
        task_manager.cancel_scope(previous_kind);
    }

    for job in jobs {
        tracing::debug!("Spawning background job {}", job.task_key());
        let data_loader = data_loader.clone();
        let task_id = job.task_key();
        let scope = job.scope();
        let future = async move {
            data_loader.run_job(job).await;
        };
        task_manager.spawn_load_task(task_id, scope, future);
    }
}

/// Apply a command to the state and return the side effects it requested,
/// without running them.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) -> Vec<BackgroundJob> {
    // Save whether we're setting a pending key (we don't want to clear it in that case)
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));
    let mut jobs = Vec::new();

    match command {
        // Simple state updates
        AppCommand::Quit => state.should_quit = true,
        AppCommand::ToggleHelp => state.help_visible = !state.help_visible,
        AppCommand::SetPendingKey(c) => state.pending_key = Some(c),
        AppCommand::ClearPendingKey => state.pending_key = None,

        AppCommand::ToggleSidebar => {
            state.sidebar_open = !state.sidebar_open;
            jobs.push(BackgroundJob::SavePreferences(state.preferences()));
        }
        AppCommand::ToggleTheme => {
            state.theme = state.theme.toggle();
            jobs.push(BackgroundJob::SavePreferences(state.preferences()));
        }
        AppCommand::SignOut => {
            tracing::info!("Signing out {}", state.user_id);
            state.should_quit = true;
            state.clear_session = true;
            state.exit_message = Some("Signed out.".to_string());
        }

        // Selection
        AppCommand::SelectNext => with_scrollable(state, |s| s.select_next()),
        AppCommand::SelectPrevious => with_scrollable(state, |s| s.select_prev()),
        AppCommand::NavigateToTop => with_scrollable(state, |s| s.select_first()),
        AppCommand::NavigateToBottom => with_scrollable(state, |s| s.select_last()),

        // Navigation
        AppCommand::NavigateBack => {
            if state.navigate_back() {
                jobs.extend(start_load(state));
            }
        }
        AppCommand::SwitchScreen(kind) => {
            if state.current_kind() != kind {
                // Keep one entry per page so the stack stays bounded
                state.history.retain(|screen| screen.kind() != kind);
                state.navigate_to(Screen::empty(kind));
                jobs.extend(start_load(state));
            }
        }
        AppCommand::Refresh => jobs.extend(start_load(state)),

        // Filter mode
        AppCommand::EnterFilterMode => match state.current_screen_mut() {
            Screen::Dashboard(_) => {}
            Screen::Categories(s) => s.input_mode = InputMode::Filter,
            Screen::Expenses(s) => s.input_mode = InputMode::Filter,
            Screen::Incomes(s) => s.input_mode = InputMode::Filter,
        },
        AppCommand::ExitFilterMode => match state.current_screen_mut() {
            Screen::Dashboard(_) => {}
            Screen::Categories(s) => s.input_mode = InputMode::Normal,
            Screen::Expenses(s) => {
                s.input_mode = InputMode::Normal;
                jobs.push(reload_first_page(s));
            }
            Screen::Incomes(s) => s.input_mode = InputMode::Normal,
        },
        AppCommand::AppendFilterChar(c) => match state.current_screen_mut() {
            Screen::Dashboard(_) => {}
            Screen::Categories(s) => {
                s.search.push(c);
                s.clamp_selection();
            }
            Screen::Expenses(s) => s.search.push(c),
            Screen::Incomes(s) => {
                s.search.push(c);
                s.page = 1;
                s.clamp_selection();
            }
        },
        AppCommand::DeleteFilterChar => match state.current_screen_mut() {
            Screen::Dashboard(_) => {}
            Screen::Categories(s) => {
                s.search.pop();
                s.clamp_selection();
            }
            Screen::Expenses(s) => {
                s.search.pop();
            }
            Screen::Incomes(s) => {
                s.search.pop();
                s.page = 1;
                s.clamp_selection();
            }
        },
        AppCommand::ClearFilter => match state.current_screen_mut() {
            Screen::Dashboard(_) => {}
            Screen::Categories(s) => {
                s.search.clear();
                s.input_mode = InputMode::Normal;
                s.clamp_selection();
            }
            Screen::Expenses(s) => {
                s.search.clear();
                s.input_mode = InputMode::Normal;
                jobs.push(reload_first_page(s));
            }
            Screen::Incomes(s) => {
                s.search.clear();
                s.input_mode = InputMode::Normal;
                s.page = 1;
                s.clamp_selection();
            }
        },

        // Date range input
        AppCommand::EnterDateRangeMode => match state.current_screen_mut() {
            Screen::Expenses(s) => {
                s.range_input = s.date_range.map(|r| r.to_string()).unwrap_or_default();
                s.input_mode = InputMode::DateRange;
            }
            Screen::Incomes(s) => {
                s.range_input = s.date_range.map(|r| r.to_string()).unwrap_or_default();
                s.input_mode = InputMode::DateRange;
            }
            _ => {}
        },
        AppCommand::AppendDateRangeChar(c) => match state.current_screen_mut() {
            Screen::Expenses(s) => s.range_input.push(c),
            Screen::Incomes(s) => s.range_input.push(c),
            _ => {}
        },
        AppCommand::DeleteDateRangeChar => match state.current_screen_mut() {
            Screen::Expenses(s) => {
                s.range_input.pop();
            }
            Screen::Incomes(s) => {
                s.range_input.pop();
            }
            _ => {}
        },
        AppCommand::ApplyDateRange => {
            let input = match state.current_screen() {
                Screen::Expenses(s) => s.range_input.clone(),
                Screen::Incomes(s) => s.range_input.clone(),
                _ => return jobs,
            };
            let range = if input.trim().is_empty() {
                None
            } else {
                match DateRange::parse(&input) {
                    Some(range) => Some(range),
                    None => {
                        state
                            .notifications
                            .error("Enter a range like 2025-04-01 to 2025-04-30");
                        return jobs;
                    }
                }
            };
            match state.current_screen_mut() {
                Screen::Expenses(s) => {
                    s.date_range = range;
                    s.input_mode = InputMode::Normal;
                    jobs.push(reload_first_page(s));
                }
                Screen::Incomes(s) => {
                    s.date_range = range;
                    s.input_mode = InputMode::Normal;
                    s.page = 1;
                    s.clamp_selection();
                }
                _ => {}
            }
        }
        AppCommand::CancelDateRange => match state.current_screen_mut() {
            Screen::Expenses(s) => {
                s.range_input.clear();
                s.input_mode = InputMode::Normal;
            }
            Screen::Incomes(s) => {
                s.range_input.clear();
                s.input_mode = InputMode::Normal;
            }
            _ => {}
        },
        AppCommand::ClearDateRange => match state.current_screen_mut() {
            Screen::Expenses(s) if s.date_range.is_some() => {
                s.date_range = None;
                jobs.push(reload_first_page(s));
            }
            Screen::Incomes(s) if s.date_range.is_some() => {
                s.date_range = None;
                s.page = 1;
                s.clamp_selection();
            }
            _ => {}
        },

        // Paging
        AppCommand::NextPage | AppCommand::PreviousPage => {
            let forward = command == AppCommand::NextPage;
            match state.current_screen_mut() {
                Screen::Expenses(s) => {
                    let moved = if forward {
                        s.pagination.next()
                    } else {
                        s.pagination.previous()
                    };
                    if moved {
                        s.loading = LoadingState::start();
                        jobs.push(BackgroundJob::LoadExpenses { query: s.query() });
                    }
                }
                Screen::Incomes(s) => {
                    let mut pagination = s.pagination();
                    let moved = if forward {
                        pagination.next()
                    } else {
                        pagination.previous()
                    };
                    if moved {
                        s.page = pagination.page;
                        s.table_state.borrow_mut().select(Some(0));
                    }
                }
                _ => {}
            }
        }

        // Rows
        AppCommand::ToggleRowSelection => match state.current_screen_mut() {
            Screen::Expenses(s) => {
                if let Some(id) = s.highlighted().map(|e| e.id.clone()) {
                    s.selection.toggle(&id);
                }
            }
            Screen::Incomes(s) => {
                if let Some(id) = s.highlighted().map(|i| i.id.clone()) {
                    s.selection.toggle(&id);
                }
            }
            _ => {}
        },
        AppCommand::ToggleSelectAll => match state.current_screen_mut() {
            Screen::Expenses(s) => {
                let ids = s.visible_ids();
                s.selection.toggle_all(&ids);
            }
            Screen::Incomes(s) => {
                let ids = s.filtered_ids();
                s.selection.toggle_all(&ids);
            }
            _ => {}
        },
        AppCommand::ToggleRowExpanded => match state.current_screen_mut() {
            Screen::Expenses(s) => {
                if let Some(id) = s.highlighted().map(|e| e.id.clone()) {
                    toggle_expanded(&mut s.expanded, id);
                }
            }
            Screen::Incomes(s) => {
                if let Some(id) = s.highlighted().map(|i| i.id.clone()) {
                    toggle_expanded(&mut s.expanded, id);
                }
            }
            _ => {}
        },

        // Category tree
        AppCommand::ToggleCategoryExpanded => {
            if let Screen::Categories(s) = state.current_screen_mut() {
                if let Some(row) = s.selected_row() {
                    if s.search.is_empty() && row.child_count > 0 {
                        s.tree = s.tree.toggle_expand(&row.id);
                        s.clamp_selection();
                    }
                }
            }
        }
        AppCommand::StartAddCategory => {
            if let Screen::Categories(s) = state.current_screen_mut() {
                open_category_editor(s, CategoryEditor::new_main());
            }
        }
        AppCommand::StartAddSubcategory => {
            let mut rejection = None;
            if let Screen::Categories(s) = state.current_screen_mut() {
                if let Some(row) = s.selected_row() {
                    if row.parent_id.is_some() {
                        rejection = Some("Cannot add subcategories to subcategories");
                    } else if is_unsaved(&row.id) {
                        rejection = Some(UNSAVED_CATEGORY);
                    } else {
                        open_category_editor(s, CategoryEditor::new_subcategory(row.id));
                    }
                }
            }
            if let Some(message) = rejection {
                state.notifications.error(message);
            }
        }
        AppCommand::StartRenameCategory => {
            let started = match state.current_screen_mut() {
                Screen::Categories(s) => start_rename(s),
                _ => true,
            };
            if !started {
                state.notifications.error(UNSAVED_CATEGORY);
            }
        }
        AppCommand::DuplicateCategory => {
            let mut failure = None;
            if let Screen::Categories(s) = state.current_screen_mut() {
                if let Some(category) = selected_category(s) {
                    let name = CategoryTree::duplicate_name(&category);
                    match add_category(s, name, category.parent_id.clone()) {
                        Ok(job) => jobs.push(job),
                        Err(message) => failure = Some(message),
                    }
                }
            }
            if let Some(message) = failure {
                state.notifications.error(message);
            }
        }

        // Popup forms
        AppCommand::OpenCreateForm => {
            let today = Local::now().date_naive();
            match state.current_screen_mut() {
                Screen::Categories(s) => open_category_editor(s, CategoryEditor::new_main()),
                Screen::Expenses(s) => {
                    s.form = Some(ExpenseForm::new(today, &s.categories));
                    s.input_mode = InputMode::Form;
                }
                Screen::Incomes(s) => {
                    s.form = Some(IncomeForm::new(today));
                    s.input_mode = InputMode::Form;
                }
                Screen::Dashboard(_) => {}
            }
        }
        AppCommand::OpenEditForm => {
            let started = match state.current_screen_mut() {
                Screen::Categories(s) => start_rename(s),
                Screen::Expenses(s) => {
                    if let Some(expense) = s.highlighted() {
                        let form = ExpenseForm::from_expense(expense, &s.categories);
                        s.form = Some(form);
                        s.input_mode = InputMode::Form;
                    }
                    true
                }
                Screen::Incomes(s) => {
                    if let Some(income) = s.highlighted() {
                        let form = IncomeForm::from_income(income);
                        s.form = Some(form);
                        s.input_mode = InputMode::Form;
                    }
                    true
                }
                Screen::Dashboard(_) => true,
            };
            if !started {
                state.notifications.error(UNSAVED_CATEGORY);
            }
        }
        AppCommand::CloseForm => match state.current_screen_mut() {
            Screen::Categories(s) => {
                s.editor = None;
                s.input_mode = InputMode::Normal;
            }
            Screen::Expenses(s) => {
                s.form = None;
                s.input_mode = InputMode::Normal;
            }
            Screen::Incomes(s) => {
                s.form = None;
                s.input_mode = InputMode::Normal;
            }
            Screen::Dashboard(_) => {}
        },
        AppCommand::NavigateFormField { forward } => match state.current_screen_mut() {
            Screen::Expenses(s) => {
                if let Some(form) = s.form.as_mut() {
                    form.navigate_field(forward);
                }
            }
            Screen::Incomes(s) => {
                if let Some(form) = s.form.as_mut() {
                    form.navigate_field(forward);
                }
            }
            _ => {}
        },
        AppCommand::AppendFormFieldChar { c } => match state.current_screen_mut() {
            Screen::Categories(s) => {
                if let Some(editor) = s.editor.as_mut() {
                    editor.push(c);
                }
            }
            Screen::Expenses(s) => {
                let s = s.as_mut();
                if let Some(form) = s.form.as_mut() {
                    form.append_char(c, &s.categories);
                }
            }
            Screen::Incomes(s) => {
                if let Some(form) = s.form.as_mut() {
                    form.append_char(c);
                }
            }
            Screen::Dashboard(_) => {}
        },
        AppCommand::DeleteFormFieldChar => match state.current_screen_mut() {
            Screen::Categories(s) => {
                if let Some(editor) = s.editor.as_mut() {
                    editor.backspace();
                }
            }
            Screen::Expenses(s) => {
                let s = s.as_mut();
                if let Some(form) = s.form.as_mut() {
                    form.delete_char(&s.categories);
                }
            }
            Screen::Incomes(s) => {
                if let Some(form) = s.form.as_mut() {
                    form.delete_char();
                }
            }
            Screen::Dashboard(_) => {}
        },
        AppCommand::SelectAutocompleteItem { up } => {
            if let Screen::Expenses(s) = state.current_screen_mut() {
                if let Some(form) = s.form.as_mut() {
                    form.select_autocomplete_item(up);
                }
            }
        }
        AppCommand::ConfirmAutocompleteSelection => {
            if let Screen::Expenses(s) = state.current_screen_mut() {
                let s = s.as_mut();
                if let Some(form) = s.form.as_mut() {
                    form.confirm_autocomplete(&s.categories);
                }
            }
        }
        AppCommand::AddBreakdownItem => {
            if let Screen::Expenses(s) = state.current_screen_mut() {
                if let Some(form) = s.form.as_mut() {
                    form.add_item();
                }
            }
        }
        AppCommand::RemoveBreakdownItem => {
            if let Screen::Expenses(s) = state.current_screen_mut() {
                if let Some(form) = s.form.as_mut() {
                    form.remove_item();
                }
            }
        }
        AppCommand::SubmitForm => match state.current_screen_mut() {
            Screen::Categories(s) => jobs.extend(submit_category_editor(s)),
            Screen::Expenses(s) => jobs.extend(submit_expense_form(s)),
            Screen::Incomes(s) => jobs.extend(submit_income_form(s)),
            Screen::Dashboard(_) => {}
        },

        // Deletion
        AppCommand::InitiateDelete => {
            let mut unsaved = false;
            match state.current_screen_mut() {
                Screen::Categories(s) => {
                    if let Some(row) = s.selected_row() {
                        if is_unsaved(&row.id) {
                            unsaved = true;
                        } else {
                            s.delete_target = Some(row.id);
                            s.input_mode = InputMode::DeleteConfirmation;
                        }
                    }
                }
                Screen::Expenses(s) => {
                    if let Some(id) = s.highlighted().map(|e| e.id.clone()) {
                        s.pending_delete = Some(DeleteTarget::Single(id));
                        s.input_mode = InputMode::DeleteConfirmation;
                    }
                }
                Screen::Incomes(s) => {
                    if let Some(id) = s.highlighted().map(|i| i.id.clone()) {
                        s.pending_delete = Some(DeleteTarget::Single(id));
                        s.input_mode = InputMode::DeleteConfirmation;
                    }
                }
                Screen::Dashboard(_) => {}
            }
            if unsaved {
                state.notifications.error(UNSAVED_CATEGORY);
            }
        }
        AppCommand::InitiateDeleteSelected => {
            let selected = match state.current_screen_mut() {
                Screen::Expenses(s) if !s.selection.is_empty() => {
                    s.pending_delete = Some(DeleteTarget::Selected(s.selection.ids()));
                    s.input_mode = InputMode::DeleteConfirmation;
                    true
                }
                Screen::Incomes(s) if !s.selection.is_empty() => {
                    s.pending_delete = Some(DeleteTarget::Selected(s.selection.ids()));
                    s.input_mode = InputMode::DeleteConfirmation;
                    true
                }
                _ => false,
            };
            if !selected {
                state.notifications.info("No items selected");
            }
        }
        AppCommand::ConfirmDelete => match state.current_screen_mut() {
            Screen::Categories(s) => {
                s.input_mode = InputMode::Normal;
                if let Some(id) = s.delete_target.take() {
                    if let (Some(category), Some(index)) =
                        (s.tree.find(&id).cloned(), s.tree.position(&id))
                    {
                        s.tree = s.tree.remove(&id, category.parent_id.as_ref());
                        s.clamp_selection();
                        jobs.push(BackgroundJob::DeleteCategory {
                            id,
                            undo: TreeUndo::Reinsert { category, index },
                        });
                    }
                }
            }
            Screen::Expenses(s) => {
                s.input_mode = InputMode::Normal;
                if let Some(target) = s.pending_delete.take() {
                    let ids = target.ids();
                    s.expenses.retain(|e| !ids.contains(&e.id));
                    for id in &ids {
                        s.selection.remove(id);
                    }
                    s.clamp_selection();
                    jobs.push(BackgroundJob::DeleteExpenses {
                        ids,
                        query: s.query(),
                    });
                }
            }
            Screen::Incomes(s) => {
                s.input_mode = InputMode::Normal;
                if let Some(target) = s.pending_delete.take() {
                    let ids = target.ids();
                    s.incomes.retain(|i| !ids.contains(&i.id));
                    for id in &ids {
                        s.selection.remove(id);
                    }
                    s.clamp_selection();
                    jobs.push(BackgroundJob::DeleteIncomes { ids });
                }
            }
            Screen::Dashboard(_) => {}
        },
        AppCommand::CancelDelete => match state.current_screen_mut() {
            Screen::Categories(s) => {
                s.delete_target = None;
                s.input_mode = InputMode::Normal;
            }
            Screen::Expenses(s) => {
                s.pending_delete = None;
                s.input_mode = InputMode::Normal;
            }
            Screen::Incomes(s) => {
                s.pending_delete = None;
                s.input_mode = InputMode::Normal;
            }
            Screen::Dashboard(_) => {}
        },

        // Reports
        AppCommand::PrintHighlighted | AppCommand::PrintSelection => {
            let highlighted_only = command == AppCommand::PrintHighlighted;
            match build_report(state.current_screen(), highlighted_only) {
                Some(report) => {
                    tracing::info!(
                        "Generating {:?} report with {} rows",
                        report.scope,
                        report.rows.len()
                    );
                    jobs.push(BackgroundJob::OpenReport {
                        html: report.render(),
                    });
                }
                None => state.notifications.info("Nothing to print"),
            }
        }
    }

    // Clear pending key after any command except SetPendingKey
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }

    jobs
}

fn with_scrollable(state: &mut AppState, f: impl FnOnce(&mut dyn Scrollable)) {
    match state.current_screen_mut() {
        Screen::Dashboard(s) => f(s.as_mut()),
        Screen::Categories(s) => f(s),
        Screen::Expenses(s) => f(s.as_mut()),
        Screen::Incomes(s) => f(s.as_mut()),
    }
}

/// Mark the current screen as loading and return the jobs that fill it.
fn start_load(state: &mut AppState) -> Vec<BackgroundJob> {
    match state.current_screen_mut() {
        Screen::Dashboard(s) => {
            s.loading = LoadingState::start();
            vec![BackgroundJob::LoadDashboard {
                year: Local::now().year(),
            }]
        }
        Screen::Categories(s) => {
            s.loading = LoadingState::start();
            vec![BackgroundJob::LoadCategories]
        }
        Screen::Expenses(s) => {
            s.loading = LoadingState::start();
            vec![
                BackgroundJob::LoadCategories,
                BackgroundJob::LoadExpenses { query: s.query() },
            ]
        }
        Screen::Incomes(s) => {
            s.loading = LoadingState::start();
            vec![BackgroundJob::LoadIncomes]
        }
    }
}

/// Search and date range changes restart from the first page.
fn reload_first_page(s: &mut ExpensesState) -> BackgroundJob {
    s.pagination.reset();
    s.loading = LoadingState::start();
    BackgroundJob::LoadExpenses { query: s.query() }
}

fn toggle_expanded(expanded: &mut std::collections::HashSet<Id>, id: Id) {
    if !expanded.remove(&id) {
        expanded.insert(id);
    }
}

fn selected_category(s: &CategoriesState) -> Option<Category> {
    let row = s.selected_row()?;
    s.tree.find(&row.id).cloned()
}

fn open_category_editor(s: &mut CategoriesState, editor: CategoryEditor) {
    s.editor = Some(editor);
    s.input_mode = InputMode::Form;
}

/// Open the rename editor on the selected row. Returns false when that row
/// has not been saved yet.
fn start_rename(s: &mut CategoriesState) -> bool {
    let Some(category) = selected_category(s) else {
        return true;
    };
    if is_unsaved(&category.id) {
        return false;
    }
    open_category_editor(s, CategoryEditor::rename(&category));
    true
}

fn temp_id() -> Id {
    Id::new(format!("{}{}", TEMP_ID_PREFIX, uuid::Uuid::new_v4()))
}

/// A category still waiting for its server id.
fn is_unsaved(id: &Id) -> bool {
    id.as_str().starts_with(TEMP_ID_PREFIX)
}

/// Optimistically insert a category and request it remotely.
fn add_category(
    s: &mut CategoriesState,
    name: String,
    parent_id: Option<Id>,
) -> Result<BackgroundJob, String> {
    let temp_id = temp_id();
    let category = Category::new(temp_id.clone(), name.clone(), parent_id.clone());

    s.tree = match &parent_id {
        Some(parent) => s
            .tree
            .add_subcategory(parent, category)
            .map_err(|e| e.to_string())?,
        None => s.tree.add_main(category),
    };
    s.clamp_selection();

    Ok(BackgroundJob::AddCategory {
        undo: TreeUndo::Remove {
            id: temp_id.clone(),
            parent_id: parent_id.clone(),
        },
        temp_id,
        name,
        parent_id,
    })
}

fn submit_category_editor(s: &mut CategoriesState) -> Vec<BackgroundJob> {
    let Some(editor) = s.editor.as_mut() else {
        return Vec::new();
    };
    let name = match validators::validate_category_name(editor) {
        Ok(name) => name,
        Err(errors) => {
            editor.errors = errors;
            return Vec::new();
        }
    };
    let target = editor.target.clone();

    let job = match target {
        EditTarget::Rename { id } => {
            let previous = s.tree.name_of(&id).unwrap_or_default().to_string();
            s.tree = s.tree.update_name(&id, &name);
            Ok(BackgroundJob::RenameCategory {
                undo: TreeUndo::Rename {
                    id: id.clone(),
                    previous,
                    attempted: name.clone(),
                },
                id,
                name,
            })
        }
        EditTarget::NewMain => add_category(s, name, None),
        EditTarget::NewSubcategory { parent_id } => add_category(s, name, Some(parent_id)),
    };

    match job {
        Ok(job) => {
            s.editor = None;
            s.input_mode = InputMode::Normal;
            vec![job]
        }
        Err(message) => {
            if let Some(editor) = s.editor.as_mut() {
                editor.errors.insert(validators::Field::Name, message);
            }
            Vec::new()
        }
    }
}

fn submit_expense_form(s: &mut ExpensesState) -> Vec<BackgroundJob> {
    let query = s.query();
    let Some(form) = s.form.as_mut() else {
        return Vec::new();
    };
    if form.in_flight {
        tracing::debug!("Expense submit ignored, previous save still running");
        return Vec::new();
    }

    match validators::validate_and_build_expense(form) {
        Ok(expense) => {
            form.errors.clear_all();
            form.in_flight = true;
            vec![BackgroundJob::SaveExpense {
                id: form.editing_id.clone(),
                expense,
                removed_items: form.removed_items.clone(),
                query,
            }]
        }
        Err(errors) => {
            form.errors = errors;
            Vec::new()
        }
    }
}

fn submit_income_form(s: &mut IncomesState) -> Vec<BackgroundJob> {
    let Some(form) = s.form.as_mut() else {
        return Vec::new();
    };
    if form.in_flight {
        tracing::debug!("Income submit ignored, previous save still running");
        return Vec::new();
    }

    match validators::validate_and_build_income(form) {
        Ok(income) => {
            form.errors.clear_all();
            form.in_flight = true;
            vec![BackgroundJob::SaveIncome {
                id: form.editing_id.clone(),
                income,
            }]
        }
        Err(errors) => {
            form.errors = errors;
            Vec::new()
        }
    }
}

/// Report for the highlighted record, or for the selection (all loaded
/// records when nothing is selected).
fn build_report(screen: &Screen, highlighted_only: bool) -> Option<Report> {
    let generated_at = Local::now().naive_local();

    match screen {
        Screen::Expenses(s) => {
            let (records, scope): (Vec<&Expense>, ReportScope) = if highlighted_only {
                (s.highlighted().into_iter().collect(), ReportScope::Single)
            } else if !s.selection.is_empty() {
                let selected = s
                    .expenses
                    .iter()
                    .filter(|e| s.selection.contains(&e.id))
                    .collect();
                (selected, ReportScope::Selected)
            } else {
                (s.expenses.iter().collect(), ReportScope::All)
            };
            if records.is_empty() {
                return None;
            }
            Some(Report::for_expenses(
                &records,
                &s.categories,
                scope,
                s.date_range,
                generated_at,
            ))
        }
        Screen::Incomes(s) => {
            let (records, scope): (Vec<&Income>, ReportScope) = if highlighted_only {
                (s.highlighted().into_iter().collect(), ReportScope::Single)
            } else if !s.selection.is_empty() {
                let selected = s
                    .incomes
                    .iter()
                    .filter(|i| s.selection.contains(&i.id))
                    .collect();
                (selected, ReportScope::Selected)
            } else {
                (s.filtered(), ReportScope::All)
            };
            if records.is_empty() {
                return None;
            }
            Some(Report::for_incomes(
                &records,
                scope,
                s.date_range,
                generated_at,
            ))
        }
        _ => None,
    }
}
