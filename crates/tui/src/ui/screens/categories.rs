//! Categories tab.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};

use crate::app::App;
use crate::ui::theme::Theme;
use crate::ui::widgets::render_empty_state;

pub fn render(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let list = &app.state.categories;
    if list.categories().is_empty() {
        let message = if app.state.loading { "Loading categories..." } else { "No categories yet" };
        render_empty_state(f, area, "Categories", message, theme);
        return;
    }

    let rows = list.categories().iter().map(|category| {
        Row::new(vec![
            Cell::from(category.name.as_str()),
            Cell::from(category.group.as_deref().unwrap_or("-")).style(theme.text_dim()),
            Cell::from(list.usage(category).to_string()),
            Cell::from(category.keywords.join(", ")).style(theme.text_dim()),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Min(12),
        ],
    )
    .header(Row::new(["Name", "Group", "Used", "Keywords"]).style(theme.title()))
    .row_highlight_style(theme.highlight())
    .highlight_symbol("> ")
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(format!(" Categories ({}) ", list.categories().len())),
    );

    let mut state = TableState::default().with_selected(Some(list.cursor()));
    f.render_stateful_widget(table, area, &mut state);
}
