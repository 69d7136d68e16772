use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::notifications::{NotificationKind, Notifications};
use crate::ui::{layouts, theme::Palette, utils};

const TOAST_WIDTH: u16 = 44;

/// Draw the live notifications as toasts in the top-right corner, newest at
/// the bottom of the stack.
pub fn render_toasts(f: &mut Frame, notifications: &Notifications, palette: &Palette) {
    if notifications.is_empty() {
        return;
    }

    let area = layouts::toast_area(f.area(), notifications.len() as u16, TOAST_WIDTH);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); notifications.len()])
        .split(area);

    for (notification, row) in notifications.iter().zip(rows.iter()) {
        let (title, color) = match notification.kind {
            NotificationKind::Success => (" Success ", palette.positive),
            NotificationKind::Error => (" Error ", palette.negative),
            NotificationKind::Info => (" Info ", palette.border_info),
        };
        let text = utils::truncate(&notification.message, row.width.saturating_sub(2) as usize);

        f.render_widget(Clear, *row);
        f.render_widget(
            Paragraph::new(text).style(palette.text_style()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title),
            ),
            *row,
        );
    }
}

