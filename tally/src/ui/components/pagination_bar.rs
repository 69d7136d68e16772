use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::pagination::{PageItem, Pagination};
use crate::ui::theme::Palette;

/// `‹ 1 … 4 [5] 6 … 12 ›` with the current page highlighted.
pub fn render_pagination(f: &mut Frame, area: Rect, pagination: &Pagination, palette: &Palette) {
    if pagination.total_pages <= 1 {
        return;
    }

    let muted = palette.help_text_style();
    let mut spans = vec![Span::styled(
        "‹ [ ",
        if pagination.has_previous() {
            palette.text_style()
        } else {
            muted
        },
    )];

    for item in pagination.items() {
        match item {
            PageItem::Page(page) if page == pagination.page => {
                spans.push(Span::styled(format!("[{}]", page), palette.selection_style()));
            }
            PageItem::Page(page) => spans.push(Span::styled(page.to_string(), palette.text_style())),
            PageItem::Ellipsis => spans.push(Span::styled("…", muted)),
        }
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled(
        "] ›",
        if pagination.has_next() {
            palette.text_style()
        } else {
            muted
        },
    ));

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
