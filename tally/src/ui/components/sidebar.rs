use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::ui::screens::ScreenKind;
use crate::ui::theme::Palette;

/// Navigation sidebar with the page shortcuts. The current page is highlighted.
pub fn render_sidebar(
    f: &mut Frame,
    area: Rect,
    current: ScreenKind,
    user_id: &str,
    palette: &Palette,
) {
    let mut items: Vec<ListItem> = ScreenKind::ALL
        .iter()
        .map(|kind| {
            let style = if *kind == current {
                palette.selection_style().fg(palette.title)
            } else {
                palette.text_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", kind.shortcut()), palette.help_text_style()),
                Span::styled(kind.label(), style),
            ]))
        })
        .collect();

    items.push(ListItem::new(""));
    items.push(ListItem::new(Line::from(Span::styled(
        format!(" {}", user_id),
        Style::default()
            .fg(palette.help_text)
            .add_modifier(Modifier::ITALIC),
    ))));

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.accent_border_style())
            .title(Span::styled(" tally ", palette.title_style())),
    );

    f.render_widget(list, area);
}
