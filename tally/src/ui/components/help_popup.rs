use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use crate::state::InputMode;
use crate::ui::{layouts, screens::Screen, theme::Palette};

pub fn render_help_popup(f: &mut Frame, screen: &Screen, palette: &Palette) {
    let help_items = get_help_items(screen);

    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::LARGE,
        " Help (press ? or Esc to close) ",
        palette.accent_border_style(),
    );

    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), palette.header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(palette.text_style());

    f.render_widget(list, inner);
}

fn get_help_items(screen: &Screen) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    match screen {
        Screen::Dashboard(..) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("r", "Refresh this year's figures"));
        }
        Screen::Categories(state) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("Enter/Space", "Expand or collapse subcategories"));
            items.push(("a/n", "Add a category"));
            items.push(("s", "Add a subcategory to the selected category"));
            items.push(("e", "Rename selected category"));
            items.push(("c", "Duplicate selected category"));
            items.push(("d/Delete", "Delete selected category"));
            items.push(("/", "Search categories"));
            if state.input_mode == InputMode::Filter {
                push_search_help(&mut items);
            }
            items.push(("r", "Refresh categories"));
        }
        Screen::Expenses(state) => {
            push_list_help(&mut items);
            items.push(("Ctrl+A", "Add a breakdown item (in the form)"));
            items.push(("Ctrl+D", "Remove the focused breakdown item"));
            if state.input_mode == InputMode::Filter {
                push_search_help(&mut items);
            }
        }
        Screen::Incomes(state) => {
            push_list_help(&mut items);
            if state.input_mode == InputMode::Filter {
                push_search_help(&mut items);
            }
        }
    }

    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("1-4", "Switch page"));
    items.push(("g then d/c/e/i", "Go to dashboard, categories, expenses, income"));
    items.push(("h/←", "Navigate back"));
    items.push(("g then g", "Navigate to top of list"));
    items.push(("G", "Navigate to bottom of list"));
    items.push(("Ctrl+B", "Toggle sidebar"));
    items.push(("Ctrl+T", "Toggle light/dark theme"));
    items.push(("?", "Toggle this help"));
    items.push(("q", "Quit application"));
    items.push(("Q", "Sign out"));

    items
}

fn push_list_help(items: &mut Vec<(&'static str, &'static str)>) {
    items.push(("↑/k", "Move selection up"));
    items.push(("↓/j", "Move selection down"));
    items.push(("Enter/→/l", "Show notes and breakdown"));
    items.push(("n/a", "Create a new record"));
    items.push(("e", "Edit selected record"));
    items.push(("d/Delete", "Delete selected record"));
    items.push(("Space", "Toggle row selection"));
    items.push(("A", "Select or deselect every filtered record"));
    items.push(("D", "Delete all selected records"));
    items.push(("/", "Search"));
    items.push(("t", "Set a date range"));
    items.push(("T", "Clear the date range"));
    items.push(("]/PgDn", "Next page"));
    items.push(("[/PgUp", "Previous page"));
    items.push(("p", "Print the highlighted record"));
    items.push(("P", "Print the selection, or everything loaded"));
    items.push(("r", "Refresh"));
}

fn push_search_help(items: &mut Vec<(&'static str, &'static str)>) {
    items.push(("Type", "Filter by category, notes, payer or item names"));
    items.push(("Enter", "Exit search (keep filter active)"));
    items.push(("Esc", "Clear search"));
    items.push(("Backspace", "Delete last character"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::screens::ScreenKind;

    #[test]
    fn test_breakdown_keys_only_on_expenses() {
        let has_breakdown = |kind| {
            get_help_items(&Screen::empty(kind))
                .iter()
                .any(|(key, _)| *key == "Ctrl+A")
        };
        assert!(has_breakdown(ScreenKind::Expenses));
        assert!(!has_breakdown(ScreenKind::Incomes));
    }
}
