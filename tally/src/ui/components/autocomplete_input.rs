use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use crate::ui::theme::Palette;

/// A text input with a suggestion dropdown overlay
pub struct AutocompleteInput<'a> {
    pub value: &'a str,
    /// Shown when value is empty
    pub placeholder: &'a str,
    pub is_focused: bool,
    pub items: &'a [String],
    pub selected_index: usize,
    /// Optional hint text at bottom of dropdown
    pub hint: Option<&'a str>,
    palette: &'a Palette,
}

impl<'a> AutocompleteInput<'a> {
    pub fn new(value: &'a str, placeholder: &'a str, palette: &'a Palette) -> Self {
        Self {
            value,
            placeholder,
            is_focused: false,
            items: &[],
            selected_index: 0,
            hint: None,
            palette,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.is_focused = focused;
        self
    }

    pub fn items(mut self, items: &'a [String]) -> Self {
        self.items = items;
        self
    }

    pub fn selected_index(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn hint(mut self, hint: Option<&'a str>) -> Self {
        self.hint = hint;
        self
    }

    /// Render only the input line. The dropdown is drawn separately with
    /// [`AutocompleteInput::render_dropdown`] once the rest of the popup is
    /// on screen, so it overlaps the fields below.
    pub fn render_input(&self, f: &mut Frame, area: Rect) {
        let style = if self.is_focused {
            self.palette.form_field_focused_style()
        } else {
            self.palette.form_field_style()
        };

        let display_value = if self.value.is_empty() {
            Span::styled(self.placeholder, self.palette.help_text_style())
        } else {
            Span::styled(self.value, style)
        };

        f.render_widget(Clear, area);
        f.render_widget(Line::from(display_value).style(style), area);
    }

    pub fn render_dropdown(&self, f: &mut Frame, input_area: Rect) {
        if !self.is_focused {
            return;
        }

        let item_count = self.items.len();
        let has_hint = self.hint.is_some();
        let content_height = if has_hint { item_count + 1 } else { item_count };

        if content_height == 0 {
            return;
        }

        // Add 2 for borders
        let dropdown_height = (content_height + 2) as u16;
        let dropdown_width = input_area.width.max(20);

        let x = input_area.x;
        let y = input_area.y + 1;

        let frame_height = f.area().height;
        let frame_width = f.area().width;

        let (final_y, final_height) = if y + dropdown_height > frame_height {
            // Not enough room below, position above if possible
            if input_area.y >= dropdown_height {
                (
                    input_area.y.saturating_sub(dropdown_height),
                    dropdown_height,
                )
            } else {
                // Truncate to fit
                (y, frame_height.saturating_sub(y).max(3))
            }
        } else {
            (y, dropdown_height)
        };

        let final_width = dropdown_width.min(frame_width.saturating_sub(x));
        let dropdown_area = Rect::new(x, final_y, final_width, final_height);

        f.render_widget(Clear, dropdown_area);

        let mut list_items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let style = if i == self.selected_index {
                    self.palette.selection_style()
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::from(name.clone()).style(style)))
            })
            .collect();

        if let Some(hint) = self.hint {
            list_items.push(ListItem::new(Line::from(Span::styled(
                hint,
                self.palette.help_text_style(),
            ))));
        }

        let list = List::new(list_items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.palette.accent_border_style()),
        );

        f.render_widget(list, dropdown_area);
    }
}
