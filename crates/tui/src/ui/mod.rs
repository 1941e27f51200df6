//! Drawing the app with ratatui.
//!
//! Responsibilities:
//! - Lay out the tab header, the active tab, the status line and the footer.
//! - Draw the open overlay on top.
//!
//! Does NOT handle:
//! - Deciding footer content. The footer is rendered from the active
//!   interaction contract by `App::footer`.
//!
//! Invariants:
//! - Rendering reads state only; nothing here mutates the app.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::app::{App, Tab};
use crate::status::StatusLevel;

pub mod popup;
pub mod screens;
pub mod theme;
pub mod widgets;

use theme::Theme;

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 1;

pub fn render(f: &mut Frame, app: &App) {
    let theme = Theme::default();
    let [header, body, status, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(f.area());

    render_header(f, header, app, &theme);
    match app.state.tab {
        Tab::Transactions => screens::transactions::render(f, body, app, &theme),
        Tab::Categories => screens::categories::render(f, body, app, &theme),
        Tab::Dedup => screens::dedup::render(f, body, app, &theme),
    }
    render_status(f, status, app, &theme);
    f.render_widget(
        Paragraph::new(app.footer(footer.width as usize)).style(theme.text_dim()),
        footer,
    );

    if let Some(overlay) = &app.state.overlay {
        popup::render_overlay(f, overlay, &theme);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.title()))
        .select(app.state.tab.index())
        .style(theme.text())
        .highlight_style(theme.title())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(" tally "),
        );
    f.render_widget(tabs, area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let line = if let Some(status) = &app.state.status {
        let style = match status.level {
            StatusLevel::Info => theme.text(),
            StatusLevel::Success => theme.text().fg(theme.success),
            StatusLevel::Error => theme.text().fg(theme.error),
        };
        Line::from(vec![
            Span::styled(format!(" {} ", status.level.label()), style.add_modifier(Modifier::REVERSED)),
            Span::raw(" "),
            Span::styled(status.message.as_str(), style),
        ])
    } else if app.state.loading {
        Line::styled(" Loading...", theme.text_dim())
    } else {
        Line::default()
    };
    f.render_widget(Paragraph::new(line), area);
}
