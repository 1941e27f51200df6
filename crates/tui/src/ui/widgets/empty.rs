//! Placeholder shown in place of an empty or loading list.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::ui::theme::Theme;

/// Render `message` centered inside a bordered block titled `title`.
pub fn render_empty_state(f: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
    let placeholder = Paragraph::new(message)
        .style(theme.text_dim())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(format!(" {title} ")),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(placeholder, area);
}
