//! Duplicates tab: scan state and the list of groups found.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::app::App;
use crate::input::keymap::Scope;
use crate::ui::theme::Theme;
use crate::ui::widgets::render_empty_state;

pub fn render(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let dedup = &app.state.dedup;
    let scan_key = app
        .keymap()
        .key_for_command("dedup.scan", Scope::Dedup)
        .map(|chord| chord.to_string());

    if dedup.is_scanning() {
        render_empty_state(f, area, "Duplicates", "Scanning for duplicates...", theme);
        return;
    }
    if dedup.groups().is_empty() {
        let message = match (dedup.has_scanned(), scan_key) {
            (true, _) => "No duplicate groups found".to_string(),
            (false, Some(key)) => format!("Press {key} to scan for duplicates"),
            (false, None) => "Run a duplicate scan from the command palette".to_string(),
        };
        render_empty_state(f, area, "Duplicates", &message, theme);
        return;
    }

    let data = dedup.data();
    let items: Vec<ListItem> = dedup
        .groups()
        .iter()
        .map(|group| {
            let first = group.transactions.first().and_then(|&id| data.transaction(id));
            let summary = first
                .map(|t| format!("{}  {}  {}", t.date, t.payee, t.amount_display()))
                .unwrap_or_else(|| "(missing transactions)".to_string());
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} x ", group.transactions.len()), theme.section()),
                Span::styled(summary, theme.text()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(theme.highlight())
        .highlight_symbol("> ")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(format!(" Duplicates ({} groups) ", dedup.groups().len())),
        );
    let mut state = ListState::default().with_selected(dedup.selected_index());
    f.render_stateful_widget(list, area, &mut state);
}
