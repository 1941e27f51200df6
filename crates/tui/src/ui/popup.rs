//! Overlay rendering.
//!
//! Each overlay draws into a centered rectangle over the current tab.
//! Text fields place the terminal cursor so editing is visible.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::context::{
    CategoryEditor, ConfirmContext, DedupReview, Overlay, PaletteContext, PickerContext,
    SuggestionState, ViewerContext,
};
use crate::picker::{Mark, Row, SelectionMode};
use crate::text_field::TextField;
use crate::ui::theme::Theme;

pub fn render_overlay(f: &mut Frame, overlay: &Overlay, theme: &Theme) {
    match overlay {
        Overlay::Confirm(confirm) => render_confirm(f, confirm, theme),
        Overlay::CategoryEditor(editor) => render_editor(f, editor, theme),
        Overlay::CategoryPicker(picker) | Overlay::TagPicker(picker) => {
            render_picker(f, picker, theme)
        }
        Overlay::Palette(palette) => render_palette(f, palette, theme),
        Overlay::DedupReview(review) => render_review(f, review, theme),
        Overlay::Viewer(viewer) | Overlay::Help(viewer) => render_viewer(f, viewer, theme),
    }
}

/// A rectangle of the given percentage of `r`, centered.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(r);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}

fn popup_block<'a>(title: impl Into<Line<'a>>, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .title(title)
        .title_style(theme.title())
}

/// Sides and bottom only; the query field above supplies the top border.
fn list_block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
        .border_style(theme.border_focused())
}

/// Draw a one-line text field with its cursor.
fn render_field(f: &mut Frame, area: Rect, field: &TextField, title: &str, theme: &Theme) {
    let widget = Paragraph::new(field.value())
        .style(theme.text())
        .block(popup_block(format!(" {title} "), theme));
    f.render_widget(widget, area);
    f.set_cursor_position(Position::new(
        area.x + 1 + (field.cursor() as u16).min(area.width.saturating_sub(3)),
        area.y + 1,
    ));
}

fn render_confirm(f: &mut Frame, confirm: &ConfirmContext, theme: &Theme) {
    let area = centered_rect(50, 25, f.area());
    f.render_widget(Clear, area);
    let body = Paragraph::new(confirm.message())
        .style(theme.text())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            popup_block(format!(" {} ", confirm.title()), theme)
                .border_style(theme.text().fg(theme.error)),
        );
    f.render_widget(body, area);
}

fn render_editor(f: &mut Frame, editor: &CategoryEditor, theme: &Theme) {
    let area = centered_rect(50, 20, f.area());
    let area = Rect { height: area.height.min(3), ..area };
    f.render_widget(Clear, area);
    render_field(f, area, editor.name(), editor.title(), theme);
}

fn mark_prefix(mode: SelectionMode, mark: Mark) -> &'static str {
    match (mode, mark) {
        (SelectionMode::Single, _) => "",
        (_, Mark::On) => "[x] ",
        (_, Mark::Off) => "[ ] ",
        (_, Mark::Partial) => "[-] ",
    }
}

fn render_picker(f: &mut Frame, context: &PickerContext, theme: &Theme) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);
    let [query_area, list_area, note_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let picker = context.picker();
    let mut selected = None;
    let items: Vec<ListItem> = picker
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| match row {
            Row::Header(title) => ListItem::new(Line::styled(title.to_string(), theme.section())),
            Row::Item {
                item,
                mark,
                highlighted,
            } => {
                if highlighted {
                    selected = Some(i);
                }
                let style = if item.selectable { theme.text() } else { theme.disabled() };
                let mut spans = vec![
                    Span::styled(mark_prefix(picker.mode(), mark), style),
                    Span::styled(item.label.clone(), style),
                ];
                if let Some(meta) = &item.meta {
                    spans.push(Span::styled(format!("  {meta}"), theme.text_dim()));
                }
                ListItem::new(Line::from(spans))
            }
            Row::Create { query, highlighted } => {
                if highlighted {
                    selected = Some(i);
                }
                ListItem::new(Line::styled(format!("+ Create \"{query}\""), theme.text()))
            }
            Row::Empty => ListItem::new(Line::styled("No matches", theme.text_dim())),
        })
        .collect();

    let list = List::new(items)
        .highlight_style(theme.highlight())
        .highlight_symbol("> ")
        .block(list_block(theme));
    let mut state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, list_area, &mut state);

    let note = match context.suggestions() {
        SuggestionState::Pending => "Fetching suggestions...".to_string(),
        SuggestionState::Ready(0) => "No suggestions".to_string(),
        SuggestionState::Ready(n) => format!("{n} suggested"),
        SuggestionState::Failed => "Suggestions unavailable".to_string(),
        SuggestionState::NotRequested => String::new(),
    };
    f.render_widget(Paragraph::new(note).style(theme.text_dim()), note_area);

    render_field(f, query_area, picker.query_field(), &context.title(), theme);
}

fn render_palette(f: &mut Frame, palette: &PaletteContext, theme: &Theme) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);
    let [query_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    let items: Vec<ListItem> = palette
        .entries()
        .iter()
        .map(|entry| {
            let mut spans = vec![Span::styled(
                entry.name.clone(),
                if entry.disabled.is_some() { theme.disabled() } else { theme.text() },
            )];
            match &entry.disabled {
                Some(reason) => spans.push(Span::styled(format!("  ({reason})"), theme.text_dim())),
                None => spans.push(Span::styled(format!("  {}", entry.description), theme.text_dim())),
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let empty = items.is_empty();
    let list = List::new(items)
        .highlight_style(theme.highlight())
        .highlight_symbol("> ")
        .block(list_block(theme));
    let mut state = ListState::default().with_selected((!empty).then(|| palette.cursor()));
    f.render_stateful_widget(list, list_area, &mut state);

    render_field(f, query_area, palette.query_field(), "Commands", theme);
}

fn render_review(f: &mut Frame, review: &DedupReview, theme: &Theme) {
    let area = centered_rect(70, 50, f.area());
    f.render_widget(Clear, area);
    let (position, total) = review.position();
    let lines: Vec<Line> = review
        .members()
        .into_iter()
        .enumerate()
        .map(|(i, txn)| {
            let marker = if i == 0 { "keep  " } else { "drop  " };
            Line::from(vec![
                Span::styled(marker, if i == 0 { theme.text().fg(theme.success) } else { theme.text_dim() }),
                Span::styled(
                    format!(
                        "#{} {}  {}  {}{}",
                        txn.id,
                        txn.date,
                        txn.payee,
                        txn.amount_display(),
                        txn.memo.as_deref().map(|m| format!("  ({m})")).unwrap_or_default()
                    ),
                    theme.text(),
                ),
            ])
        })
        .collect();
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(popup_block(format!(" Duplicate group {position}/{total} "), theme));
    f.render_widget(body, area);
}

fn render_viewer(f: &mut Frame, viewer: &ViewerContext, theme: &Theme) {
    let area = centered_rect(70, 70, f.area());
    f.render_widget(Clear, area);
    let lines: Vec<Line> = viewer
        .lines()
        .iter()
        .map(|line| Line::styled(line.as_str(), theme.text()))
        .collect();
    let body = Paragraph::new(lines)
        .scroll((viewer.scroll() as u16, 0))
        .block(popup_block(format!(" {} ", viewer.title()), theme));
    f.render_widget(body, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 50, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 20);
        assert_eq!(inner.y, 10);
    }

    #[test]
    fn marks_only_show_outside_single_mode() {
        assert_eq!(mark_prefix(SelectionMode::Single, Mark::On), "");
        assert_eq!(mark_prefix(SelectionMode::TriState, Mark::Partial), "[-] ");
        assert_eq!(mark_prefix(SelectionMode::Multi, Mark::Off), "[ ] ");
    }
}
