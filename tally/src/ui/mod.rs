pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;
pub mod utils;

use crate::state::forms::EditTarget;
use crate::state::{AppState, InputMode};
use ratatui::{style::Style, widgets::Block, Frame};
use screens::*;

const CATEGORY_DELETE_PROMPT: &str =
    "Are you sure you want to delete this category and all its subcategories?";

/// Pure render dispatcher - routes to appropriate screen renderer
/// This function is read-only and never mutates state
pub fn render_app(f: &mut Frame, state: &AppState) {
    let palette = state.theme.palette();

    f.render_widget(
        Block::default().style(Style::default().fg(palette.text)),
        f.area(),
    );

    let (sidebar_area, main_area) = layouts::with_sidebar(f.area(), state.sidebar_open);
    if let Some(area) = sidebar_area {
        components::sidebar::render_sidebar(
            f,
            area,
            state.current_kind(),
            &state.user_id,
            palette,
        );
    }

    match state.current_screen() {
        Screen::Dashboard(dashboard_state) => {
            dashboard_screen::render(f, main_area, dashboard_state, palette);
        }
        Screen::Categories(categories_state) => {
            categories_screen::render(f, main_area, categories_state, palette);

            if categories_state.input_mode == InputMode::Form {
                if let Some(editor) = &categories_state.editor {
                    let parent_name = match &editor.target {
                        EditTarget::NewSubcategory { parent_id } => {
                            categories_state.tree.name_of(parent_id)
                        }
                        _ => None,
                    };
                    components::category_editor::render_category_editor(
                        f,
                        editor,
                        parent_name,
                        palette,
                    );
                }
            }

            if categories_state.input_mode == InputMode::DeleteConfirmation
                && categories_state.delete_target.is_some()
            {
                components::delete_confirmation::render_delete_confirmation(
                    f,
                    CATEGORY_DELETE_PROMPT,
                    palette,
                );
            }
        }
        Screen::Expenses(expenses_state) => {
            expenses_screen::render(f, main_area, expenses_state, state.monthly_budget, palette);

            if expenses_state.input_mode == InputMode::Form {
                if let Some(form) = &expenses_state.form {
                    components::expense_form::render_expense_form(
                        f,
                        form,
                        &expenses_state.categories,
                        palette,
                    );
                }
            }

            if expenses_state.input_mode == InputMode::DeleteConfirmation {
                if let Some(target) = &expenses_state.pending_delete {
                    components::delete_confirmation::render_delete_confirmation(
                        f,
                        &target.prompt(),
                        palette,
                    );
                }
            }
        }
        Screen::Incomes(incomes_state) => {
            incomes_screen::render(f, main_area, incomes_state, palette);

            if incomes_state.input_mode == InputMode::Form {
                if let Some(form) = &incomes_state.form {
                    components::income_form::render_income_form(f, form, palette);
                }
            }

            if incomes_state.input_mode == InputMode::DeleteConfirmation {
                if let Some(target) = &incomes_state.pending_delete {
                    components::delete_confirmation::render_delete_confirmation(
                        f,
                        &target.prompt(),
                        palette,
                    );
                }
            }
        }
    }

    // Render help popup on top if visible
    if state.help_visible {
        components::help_popup::render_help_popup(f, state.current_screen(), palette);
    }

    components::notifications::render_toasts(f, &state.notifications, palette);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestApp;
    use crate::ui::screens::ScreenKind;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &TestApp) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_app(f, app.state())).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_every_screen_renders() {
        let mut app = TestApp::new();
        for kind in ScreenKind::ALL {
            app.execute(crate::events::AppCommand::SwitchScreen(kind));
            let screen = draw(&app);
            assert!(screen.contains(kind.label()));
        }
    }

    #[test]
    fn test_sidebar_hidden_when_closed() {
        let mut app = TestApp::new();
        assert!(draw(&app).contains(" tally "));
        app.state_mut().sidebar_open = false;
        assert!(!draw(&app).contains(" tally "));
    }
}
