use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::state::*;
use crate::ui::screens::{Screen, ScreenKind};

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Priority 1: Popup forms own every key
    if state.input_mode() == InputMode::Form {
        return handle_form_keys(event, state.current_screen());
    }

    // Priority 2: Delete confirmation popup
    if state.input_mode() == InputMode::DeleteConfirmation {
        return handle_delete_confirmation_keys(key);
    }

    // Priority 3: Text entry for search and date range
    match state.input_mode() {
        InputMode::Filter => {
            return match key {
                Key::Enter => Some(AppCommand::ExitFilterMode),
                Key::Backspace => Some(AppCommand::DeleteFilterChar),
                Key::Char(c) => Some(AppCommand::AppendFilterChar(c)),
                Key::Esc => Some(AppCommand::ClearFilter),
                _ => None,
            };
        }
        InputMode::DateRange => {
            return match key {
                Key::Enter => Some(AppCommand::ApplyDateRange),
                Key::Backspace => Some(AppCommand::DeleteDateRangeChar),
                Key::Char(c) => Some(AppCommand::AppendDateRangeChar(c)),
                Key::Esc => Some(AppCommand::CancelDateRange),
                _ => None,
            };
        }
        _ => {}
    }

    // Priority 4: Help popup
    // This must come before screen-specific Esc handling so help popup takes precedence
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Priority 5: Shell shortcuts
    if event.is_ctrl('b') {
        return Some(AppCommand::ToggleSidebar);
    }
    if event.is_ctrl('t') {
        return Some(AppCommand::ToggleTheme);
    }

    // Priority 6: Esc clears an active search
    if matches!(key, Key::Esc) && has_search(state.current_screen()) {
        return Some(AppCommand::ClearFilter);
    }

    // Handle multi-key sequences
    if let Some(pending) = state.pending_key {
        return match (pending, key) {
            ('g', Key::Char('g')) => Some(AppCommand::NavigateToTop),
            ('g', Key::Char('d')) => Some(AppCommand::SwitchScreen(ScreenKind::Dashboard)),
            ('g', Key::Char('c')) => Some(AppCommand::SwitchScreen(ScreenKind::Categories)),
            ('g', Key::Char('e')) => Some(AppCommand::SwitchScreen(ScreenKind::Expenses)),
            ('g', Key::Char('i')) => Some(AppCommand::SwitchScreen(ScreenKind::Incomes)),
            // Any other key clears the pending key
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    match (state.current_screen(), key) {
        // Global help toggle
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),

        // Global quit and sign out
        (_, Key::Char('q')) => Some(AppCommand::Quit),
        (_, Key::Char('Q')) => Some(AppCommand::SignOut),

        // Multi-key sequence initiator: 'g' sets pending key
        (_, Key::Char('g')) => Some(AppCommand::SetPendingKey('g')),
        (_, Key::Char('G')) => Some(AppCommand::NavigateToBottom),

        // Sidebar pages by number
        (_, Key::Char(c @ '1'..='4')) => ScreenKind::ALL
            .into_iter()
            .find(|kind| kind.shortcut() == c)
            .map(AppCommand::SwitchScreen),

        (_, Key::Left | Key::Char('h')) => Some(AppCommand::NavigateBack),
        (_, Key::Char('r')) => Some(AppCommand::Refresh),
        (_, Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (_, Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (_, Key::Home) => Some(AppCommand::NavigateToTop),
        (_, Key::End) => Some(AppCommand::NavigateToBottom),

        // Categories screen
        (Screen::Categories(..), Key::Enter | Key::Char(' ') | Key::Right | Key::Char('l')) => {
            Some(AppCommand::ToggleCategoryExpanded)
        }
        (Screen::Categories(..), Key::Char('/')) => Some(AppCommand::EnterFilterMode),
        (Screen::Categories(..), Key::Char('a') | Key::Char('n')) => {
            Some(AppCommand::StartAddCategory)
        }
        (Screen::Categories(..), Key::Char('s')) => Some(AppCommand::StartAddSubcategory),
        (Screen::Categories(..), Key::Char('e')) => Some(AppCommand::StartRenameCategory),
        (Screen::Categories(..), Key::Char('c')) => Some(AppCommand::DuplicateCategory),
        (Screen::Categories(..), Key::Char('d') | Key::Delete) => {
            Some(AppCommand::InitiateDelete)
        }

        // Expense and income lists
        (Screen::Expenses(..) | Screen::Incomes(..), key) => handle_list_keys(key),

        _ => None,
    }
}

fn handle_list_keys(key: Key) -> Option<AppCommand> {
    match key {
        Key::Char('/') => Some(AppCommand::EnterFilterMode),
        Key::Char('t') => Some(AppCommand::EnterDateRangeMode),
        Key::Char('T') => Some(AppCommand::ClearDateRange),
        Key::Char(']') | Key::PageDown => Some(AppCommand::NextPage),
        Key::Char('[') | Key::PageUp => Some(AppCommand::PreviousPage),
        Key::Char(' ') => Some(AppCommand::ToggleRowSelection),
        Key::Char('A') => Some(AppCommand::ToggleSelectAll),
        Key::Enter | Key::Right | Key::Char('l') => Some(AppCommand::ToggleRowExpanded),
        Key::Char('n') | Key::Char('a') => Some(AppCommand::OpenCreateForm),
        Key::Char('e') => Some(AppCommand::OpenEditForm),
        Key::Char('d') | Key::Delete => Some(AppCommand::InitiateDelete),
        Key::Char('D') => Some(AppCommand::InitiateDeleteSelected),
        Key::Char('p') => Some(AppCommand::PrintHighlighted),
        Key::Char('P') => Some(AppCommand::PrintSelection),
        _ => None,
    }
}

fn has_search(screen: &Screen) -> bool {
    match screen {
        Screen::Dashboard(_) => false,
        Screen::Categories(s) => !s.search.is_empty(),
        Screen::Expenses(s) => !s.search.is_empty(),
        Screen::Incomes(s) => !s.search.is_empty(),
    }
}

fn handle_form_keys(event: KeyEvent, screen: &Screen) -> Option<AppCommand> {
    let key = event.key;

    // Ctrl+S submits from any field
    if event.is_ctrl('s') {
        return Some(AppCommand::SubmitForm);
    }

    let autocomplete_focused = match screen {
        Screen::Expenses(s) => s
            .form
            .as_ref()
            .is_some_and(|form| form.is_autocomplete_focused()),
        _ => false,
    };

    if let Screen::Expenses(_) = screen {
        // Ctrl+A adds a breakdown row, Ctrl+D removes the focused one
        if event.is_ctrl('a') {
            return Some(AppCommand::AddBreakdownItem);
        }
        if event.is_ctrl('d') {
            return Some(AppCommand::RemoveBreakdownItem);
        }
    }

    match key {
        // Escape to cancel and close form
        Key::Esc => Some(AppCommand::CloseForm),

        Key::Tab => Some(AppCommand::NavigateFormField { forward: true }),
        Key::BackTab => Some(AppCommand::NavigateFormField { forward: false }),

        Key::Backspace => Some(AppCommand::DeleteFormFieldChar),

        // Arrow keys move through category suggestions
        Key::Up if autocomplete_focused => Some(AppCommand::SelectAutocompleteItem { up: true }),
        Key::Down if autocomplete_focused => {
            Some(AppCommand::SelectAutocompleteItem { up: false })
        }

        Key::Enter if autocomplete_focused => Some(AppCommand::ConfirmAutocompleteSelection),
        Key::Enter => Some(AppCommand::SubmitForm),

        Key::Char(_) if event.modifiers.ctrl => None,
        Key::Char(c) => Some(AppCommand::AppendFormFieldChar { c }),

        _ => None,
    }
}

fn handle_delete_confirmation_keys(key: Key) -> Option<AppCommand> {
    match key {
        // Confirm deletion with 'y'
        Key::Char('y') | Key::Char('Y') => Some(AppCommand::ConfirmDelete),

        // Any other key cancels
        _ => Some(AppCommand::CancelDelete),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{ExpenseForm, IncomeForm};
    use tally_api::endpoints::Amount;

    fn state_on(screen: Screen) -> AppState {
        let mut state = AppState::new("user@example.com", Amount::ZERO);
        state.navigate_to(screen);
        state
    }

    #[test]
    fn test_number_keys_switch_screens() {
        let state = AppState::new("user@example.com", Amount::ZERO);
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('3')), &state),
            Some(AppCommand::SwitchScreen(ScreenKind::Expenses))
        );
    }

    #[test]
    fn test_g_sequences() {
        let mut state = AppState::new("user@example.com", Amount::ZERO);
        state.pending_key = Some('g');
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('i')), &state),
            Some(AppCommand::SwitchScreen(ScreenKind::Incomes))
        );
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('x')), &state),
            Some(AppCommand::ClearPendingKey)
        );
    }

    #[test]
    fn test_form_enter_confirms_autocomplete_first() {
        let form = ExpenseForm {
            category_matches: vec![tally_api::endpoints::categories::Category::new(
                "1", "Food", None,
            )],
            ..Default::default()
        };
        let state = state_on(Screen::Expenses(Box::new(ExpensesState {
            input_mode: InputMode::Form,
            form: Some(form),
            ..Default::default()
        })));

        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Enter), &state),
            Some(AppCommand::ConfirmAutocompleteSelection)
        );
        assert_eq!(
            handle_key_input(KeyEvent::with_ctrl(Key::Char('s')), &state),
            Some(AppCommand::SubmitForm)
        );
    }

    #[test]
    fn test_income_form_has_no_breakdown_shortcuts() {
        let state = state_on(Screen::Incomes(Box::new(IncomesState {
            input_mode: InputMode::Form,
            form: Some(IncomeForm::default()),
            ..Default::default()
        })));

        assert_eq!(
            handle_key_input(KeyEvent::with_ctrl(Key::Char('a')), &state),
            None
        );
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('a')), &state),
            Some(AppCommand::AppendFormFieldChar { c: 'a' })
        );
    }

    #[test]
    fn test_delete_confirmation_cancels_on_other_keys() {
        let state = state_on(Screen::Incomes(Box::new(IncomesState {
            input_mode: InputMode::DeleteConfirmation,
            ..Default::default()
        })));
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('y')), &state),
            Some(AppCommand::ConfirmDelete)
        );
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('n')), &state),
            Some(AppCommand::CancelDelete)
        );
    }
}
