use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::{layouts, theme::Palette};

/// One headline figure.
pub struct Card<'a> {
    pub label: &'a str,
    pub value: Span<'a>,
}

impl<'a> Card<'a> {
    pub fn new(label: &'a str, value: impl Into<Span<'a>>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Render cards side by side, each a bordered box titled with its label.
pub fn render_cards(f: &mut Frame, area: Rect, cards: Vec<Card>, palette: &Palette) {
    let areas = layouts::card_row(area, cards.len());
    for (card, card_area) in cards.into_iter().zip(areas) {
        let style = palette
            .text_style()
            .add_modifier(Modifier::BOLD)
            .patch(card.value.style);
        let value = card.value.style(style);
        let paragraph = Paragraph::new(Line::from(value))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(palette.accent_border_style())
                    .title(Span::styled(card.label, palette.help_text_style())),
            );
        f.render_widget(paragraph, card_area);
    }
}
