//! Transactions tab: the filter line and the ledger table.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::app::App;
use crate::ui::theme::Theme;
use crate::ui::widgets::render_empty_state;

pub fn render(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let list = &app.state.transactions;
    let show_filter = list.is_filtering() || !list.filter().is_empty();
    let [filter_area, table_area] = if show_filter {
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area)
    } else {
        [Rect::default(), area]
    };

    if show_filter {
        let border = if list.is_filtering() {
            theme.border_focused()
        } else {
            theme.border()
        };
        let field = Paragraph::new(list.filter().value()).style(theme.text()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Filter "),
        );
        f.render_widget(field, filter_area);
        if list.is_filtering() && app.state.overlay.is_none() {
            f.set_cursor_position(Position::new(
                filter_area.x + 1 + list.filter().cursor() as u16,
                filter_area.y + 1,
            ));
        }
    }

    let title = format!("Transactions ({})", list.row_count());
    if list.row_count() == 0 {
        let message = if app.state.loading {
            "Loading transactions..."
        } else if list.filter().is_empty() {
            "No transactions"
        } else {
            "No transactions match the filter"
        };
        render_empty_state(f, table_area, &title, message, theme);
        return;
    }

    let data = list.data();
    let rows = list.rows().map(|txn| {
        Row::new(vec![
            Cell::from(txn.date.as_str()),
            Cell::from(txn.payee.as_str()),
            Cell::from(txn.amount_display()).style(theme.amount(txn.amount_cents)),
            Cell::from(data.category_name(txn.category)),
            Cell::from(txn.tags.join(", ")).style(theme.text_dim()),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(18),
            Constraint::Length(11),
            Constraint::Length(16),
            Constraint::Min(10),
        ],
    )
    .header(Row::new(["Date", "Payee", "Amount", "Category", "Tags"]).style(theme.title()))
    .row_highlight_style(theme.highlight())
    .highlight_symbol("> ")
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(format!(" {title} ")),
    );

    let mut state = TableState::default().with_selected(Some(list.cursor()));
    f.render_stateful_widget(table, table_area, &mut state);
}
