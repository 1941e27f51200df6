//! Generalized selection engine.
//!
//! Responsibilities:
//! - Filter and rank a list of `PickerItem`s against a query, grouped by
//!   section.
//! - Track single, multi or tri-state selection and emit a `Patch` relative
//!   to the marks the picker was opened with.
//! - Offer a "create new" entry when the caller allows it and nothing matches.
//!
//! Does NOT handle:
//! - Building items from domain data (each context does that).
//! - Rendering (see `ui`), which consumes `rows()`.
//!
//! Invariants:
//! - Ordering is a pure function of (items, query, match mode): section order
//!   is first appearance in the source list; within a section, score
//!   descending, then source order.
//! - The cursor resets to the first entry on every filter change and always
//!   indexes a real entry (or 0 when there are none).
//! - `replace_items` keeps the highlighted item highlighted wherever it lands;
//!   only when it disappears does the cursor fall back to its old index.
//! - `Cancel` restores the marks captured at construction.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use crossterm::event::{KeyCode, KeyEvent};
use tally_config::constants::DEFAULT_PAGE_SIZE;

use crate::action::Action;
use crate::text_field::{FieldFlags, TextField};

pub mod matcher;

pub use matcher::MatchMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    Multi,
    TriState,
}

/// Per-item mark in multi and tri-state pickers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    On,
    #[default]
    Off,
    /// Applies to some but not all of the underlying targets.
    Partial,
}

impl Mark {
    fn alternate(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off | Self::Partial => Self::On,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub id: String,
    pub label: String,
    pub section: Option<String>,
    pub meta: Option<String>,
    /// Extra text matched by the query but not displayed.
    pub search: Option<String>,
    /// Initial mark; ignored in single mode.
    pub mark: Mark,
    pub selectable: bool,
}

impl PickerItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            section: None,
            meta: None,
            search: None,
            mark: Mark::Off,
            selectable: true,
        }
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn mark(mut self, mark: Mark) -> Self {
        self.mark = mark;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.selectable = false;
        self
    }
}

/// Selection change relative to the initial marks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
}

impl Patch {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Item(PickerItem),
    Patch(Patch),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerResult {
    Moved,
    FilterChanged,
    Toggled(String),
    Selected(Selection),
    Created(String),
    Cancelled,
    NoOp,
}

/// One display row, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row<'a> {
    Header(&'a str),
    Item {
        item: &'a PickerItem,
        mark: Mark,
        highlighted: bool,
    },
    Create {
        query: &'a str,
        highlighted: bool,
    },
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Item(usize),
    Create,
}

#[derive(Debug, Clone)]
pub struct Picker {
    items: Vec<PickerItem>,
    mode: SelectionMode,
    match_mode: MatchMode,
    allow_create: bool,
    page_size: usize,
    query: TextField,
    initial: HashMap<String, Mark>,
    marks: HashMap<String, Mark>,
    visible: Vec<usize>,
    cursor: usize,
}

impl Picker {
    pub fn new(items: Vec<PickerItem>, mode: SelectionMode) -> Self {
        let initial: HashMap<String, Mark> = items
            .iter()
            .map(|item| (item.id.clone(), item.mark))
            .collect();
        let mut picker = Self {
            items,
            mode,
            match_mode: MatchMode::default(),
            allow_create: false,
            page_size: DEFAULT_PAGE_SIZE,
            query: TextField::new(FieldFlags::PRINTABLE_FIRST | FieldFlags::VIM_NAV_SUPPRESSED),
            marks: initial.clone(),
            initial,
            visible: Vec::new(),
            cursor: 0,
        };
        picker.refilter();
        picker
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self.refilter();
        self
    }

    pub fn with_create(mut self, allow: bool) -> Self {
        self.allow_create = allow;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        self.query.value()
    }

    pub fn query_field(&self) -> &TextField {
        &self.query
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn source_len(&self) -> usize {
        self.items.len()
    }

    /// Filtered, ranked items in display order.
    pub fn items(&self) -> Vec<&PickerItem> {
        self.visible.iter().map(|&i| &self.items[i]).collect()
    }

    pub fn mark(&self, id: &str) -> Option<Mark> {
        self.marks.get(id).copied()
    }

    pub fn highlighted(&self) -> Option<&PickerItem> {
        match self.entry_at(self.cursor)? {
            Entry::Item(i) => Some(&self.items[i]),
            Entry::Create => None,
        }
    }

    fn show_create(&self) -> bool {
        self.allow_create && self.visible.is_empty() && !self.query.value().trim().is_empty()
    }

    fn entry_count(&self) -> usize {
        self.visible.len() + usize::from(self.show_create())
    }

    fn entry_at(&self, index: usize) -> Option<Entry> {
        match self.visible.get(index) {
            Some(&i) => Some(Entry::Item(i)),
            None if index == self.visible.len() && self.show_create() => Some(Entry::Create),
            None => None,
        }
    }

    /// Display rows: section headers, items, the create entry, or `Empty`.
    pub fn rows(&self) -> Vec<Row<'_>> {
        let sectioned = self.items.iter().any(|item| item.section.is_some());
        let mut rows = Vec::with_capacity(self.visible.len() + 4);
        let mut current: Option<Option<&str>> = None;
        for (pos, &i) in self.visible.iter().enumerate() {
            let item = &self.items[i];
            let section = item.section.as_deref();
            if sectioned && current != Some(section) {
                if let Some(name) = section {
                    rows.push(Row::Header(name));
                }
                current = Some(section);
            }
            rows.push(Row::Item {
                item,
                mark: self.marks.get(&item.id).copied().unwrap_or_default(),
                highlighted: pos == self.cursor,
            });
        }
        if self.show_create() {
            rows.push(Row::Create {
                query: self.query.value().trim(),
                highlighted: self.cursor == self.visible.len(),
            });
        }
        if rows.is_empty() {
            rows.push(Row::Empty);
        }
        rows
    }

    /// Recompute the visible list from the query. Resets the cursor.
    pub fn refilter(&mut self) {
        let mut scorer = matcher::QueryScorer::new(self.query.value(), self.match_mode);

        let mut section_rank: HashMap<Option<&str>, usize> = HashMap::new();
        for item in &self.items {
            let next = section_rank.len();
            section_rank.entry(item.section.as_deref()).or_insert(next);
        }

        let mut ranked: Vec<(usize, Reverse<u8>, usize)> = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let score = scorer.score(item)?;
                Some((section_rank[&item.section.as_deref()], Reverse(score), i))
            })
            .collect();
        ranked.sort_unstable();

        self.visible = ranked.into_iter().map(|(_, _, i)| i).collect();
        self.cursor = 0;
    }

    pub fn set_query(&mut self, query: &str) -> PickerResult {
        if self.query.value() == query {
            return PickerResult::NoOp;
        }
        self.query.set_value(query);
        self.refilter();
        PickerResult::FilterChanged
    }

    /// Apply a text-editing key to the query.
    pub fn edit_query(&mut self, key: KeyEvent) -> PickerResult {
        if self.query.handle_key(key).changed_text() {
            self.refilter();
            PickerResult::FilterChanged
        } else {
            PickerResult::NoOp
        }
    }

    /// Rebuild the source list, keeping marks and the highlight for ids
    /// that survive.
    pub fn replace_items(&mut self, items: Vec<PickerItem>) {
        let cursor = self.cursor;
        let highlighted = self.entry_at(cursor).map(|entry| match entry {
            Entry::Item(i) => Some(self.items[i].id.clone()),
            Entry::Create => None,
        });
        let mut initial = HashMap::with_capacity(items.len());
        let mut marks = HashMap::with_capacity(items.len());
        for item in &items {
            let start = self.initial.get(&item.id).copied().unwrap_or(item.mark);
            let now = self.marks.get(&item.id).copied().unwrap_or(item.mark);
            initial.insert(item.id.clone(), start);
            marks.insert(item.id.clone(), now);
        }
        self.items = items;
        self.initial = initial;
        self.marks = marks;
        self.refilter();
        let found = match &highlighted {
            Some(Some(id)) => self.visible.iter().position(|&i| self.items[i].id == *id),
            Some(None) if self.show_create() => Some(self.visible.len()),
            _ => None,
        };
        self.cursor = found.unwrap_or_else(|| cursor.min(self.entry_count().saturating_sub(1)));
    }

    pub fn patch(&self) -> Patch {
        let mut patch = Patch::default();
        for (id, &now) in &self.marks {
            let start = self.initial.get(id).copied().unwrap_or_default();
            if now == Mark::On && start != Mark::On {
                patch.added.insert(id.clone());
            } else if now == Mark::Off && start != Mark::Off {
                patch.removed.insert(id.clone());
            }
        }
        patch
    }

    fn move_to(&mut self, target: usize) -> PickerResult {
        let last = self.entry_count().saturating_sub(1);
        let target = target.min(last);
        if target == self.cursor {
            PickerResult::NoOp
        } else {
            self.cursor = target;
            PickerResult::Moved
        }
    }

    fn select(&self) -> PickerResult {
        match self.mode {
            SelectionMode::Single => match self.entry_at(self.cursor) {
                Some(Entry::Item(i)) if self.items[i].selectable => {
                    PickerResult::Selected(Selection::Item(self.items[i].clone()))
                }
                Some(Entry::Create) => {
                    PickerResult::Created(self.query.value().trim().to_string())
                }
                _ => PickerResult::NoOp,
            },
            SelectionMode::Multi | SelectionMode::TriState => {
                if self.visible.is_empty() {
                    PickerResult::NoOp
                } else {
                    PickerResult::Selected(Selection::Patch(self.patch()))
                }
            }
        }
    }

    fn highlighted_markable(&self) -> Option<String> {
        if self.mode == SelectionMode::Single {
            return None;
        }
        self.highlighted()
            .filter(|item| item.selectable)
            .map(|item| item.id.clone())
    }

    fn toggle(&mut self) -> PickerResult {
        let Some(id) = self.highlighted_markable() else {
            return PickerResult::NoOp;
        };
        let start = self.initial.get(&id).copied().unwrap_or_default();
        let now = self.marks.get(&id).copied().unwrap_or(start);
        let next = if now == start { start.alternate() } else { start };
        self.marks.insert(id.clone(), next);
        PickerResult::Toggled(id)
    }

    fn clear_mark(&mut self) -> PickerResult {
        let Some(id) = self.highlighted_markable() else {
            return PickerResult::NoOp;
        };
        match self.marks.get(&id) {
            Some(Mark::On | Mark::Partial) => {
                self.marks.insert(id.clone(), Mark::Off);
                PickerResult::Toggled(id)
            }
            _ => PickerResult::NoOp,
        }
    }

    fn cancel(&mut self) -> PickerResult {
        self.marks = self.initial.clone();
        PickerResult::Cancelled
    }

    /// Resolve a semantic action against the picker.
    pub fn handle_action(&mut self, action: Action) -> PickerResult {
        match action {
            Action::MoveDown => self.move_to(self.cursor + 1),
            Action::MoveUp => self.move_to(self.cursor.saturating_sub(1)),
            Action::PageDown => self.move_to(self.cursor + self.page_size),
            Action::PageUp => self.move_to(self.cursor.saturating_sub(self.page_size)),
            Action::Top => self.move_to(0),
            Action::Bottom => self.move_to(usize::MAX),
            Action::Select | Action::Confirm => self.select(),
            Action::Toggle => self.toggle(),
            Action::Delete => self.clear_mark(),
            Action::Cancel => self.cancel(),
            _ => PickerResult::NoOp,
        }
    }

    /// Standalone key handling for callers without a binding registry.
    pub fn handle_key(&mut self, key: KeyEvent) -> PickerResult {
        match key.code {
            KeyCode::Esc => self.handle_action(Action::Cancel),
            KeyCode::Enter => self.handle_action(Action::Select),
            KeyCode::Up => self.handle_action(Action::MoveUp),
            KeyCode::Down => self.handle_action(Action::MoveDown),
            KeyCode::PageUp => self.handle_action(Action::PageUp),
            KeyCode::PageDown => self.handle_action(Action::PageDown),
            KeyCode::Char(' ') if self.mode != SelectionMode::Single => {
                self.handle_action(Action::Toggle)
            }
            _ if self.query.claims(key) => self.edit_query(key),
            _ => PickerResult::NoOp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(picker: &mut Picker, text: &str) {
        for c in text.chars() {
            picker.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn labels(picker: &Picker) -> Vec<&str> {
        picker.items().iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn ranks_within_sections_and_keeps_section_order() {
        let items = vec![
            PickerItem::new("1", "Playground").section("B"),
            PickerItem::new("2", "Grocer").section("A"),
            PickerItem::new("3", "Agro").section("B"),
            PickerItem::new("4", "Groceries").section("B"),
        ];
        let mut picker = Picker::new(items, SelectionMode::Single);
        type_str(&mut picker, "gro");
        assert_eq!(labels(&picker), vec!["Groceries", "Playground", "Agro", "Grocer"]);
    }

    #[test]
    fn equal_scores_keep_source_order() {
        let items = vec![
            PickerItem::new("b", "Gross"),
            PickerItem::new("a", "Grove"),
        ];
        let mut picker = Picker::new(items, SelectionMode::Single);
        picker.set_query("gr");
        assert_eq!(labels(&picker), vec!["Gross", "Grove"]);
    }

    #[test]
    fn create_entry_only_when_nothing_matches() {
        let items = vec![PickerItem::new("1", "Rent")];
        let mut picker = Picker::new(items, SelectionMode::Single).with_create(true);
        type_str(&mut picker, "Gym");
        assert!(picker.items().is_empty());
        assert_eq!(
            picker.handle_key(key(KeyCode::Enter)),
            PickerResult::Created("Gym".into())
        );

        picker.set_query("re");
        assert!(matches!(
            picker.handle_key(key(KeyCode::Enter)),
            PickerResult::Selected(Selection::Item(_))
        ));
    }

    #[test]
    fn enter_on_empty_list_is_noop() {
        let mut single = Picker::new(vec![], SelectionMode::Single);
        assert_eq!(single.handle_key(key(KeyCode::Enter)), PickerResult::NoOp);
        assert_eq!(single.rows(), vec![Row::Empty]);
        let mut multi = Picker::new(vec![], SelectionMode::Multi);
        assert_eq!(multi.handle_key(key(KeyCode::Enter)), PickerResult::NoOp);
    }

    #[test]
    fn cursor_moves_clamp_and_reset_on_filter() {
        let items = vec![PickerItem::new("1", "a1"), PickerItem::new("2", "a2")];
        let mut picker = Picker::new(items, SelectionMode::Single);
        assert_eq!(picker.handle_key(key(KeyCode::Up)), PickerResult::NoOp);
        assert_eq!(picker.handle_key(key(KeyCode::Down)), PickerResult::Moved);
        assert_eq!(picker.handle_key(key(KeyCode::Down)), PickerResult::NoOp);
        assert_eq!(picker.cursor(), 1);
        type_str(&mut picker, "a");
        assert_eq!(picker.cursor(), 0);
    }

    #[test]
    fn tri_state_partial_toggles_on_then_back() {
        let items = vec![PickerItem::new("work", "work").mark(Mark::Partial)];
        let mut picker = Picker::new(items, SelectionMode::TriState);
        picker.handle_action(Action::Toggle);
        assert_eq!(picker.mark("work"), Some(Mark::On));
        assert_eq!(picker.patch().added, BTreeSet::from(["work".to_string()]));
        picker.handle_action(Action::Toggle);
        assert_eq!(picker.mark("work"), Some(Mark::Partial));
        assert!(picker.patch().is_empty());
    }

    #[test]
    fn delete_forces_off() {
        let items = vec![PickerItem::new("work", "work").mark(Mark::Partial)];
        let mut picker = Picker::new(items, SelectionMode::TriState);
        assert_eq!(
            picker.handle_action(Action::Delete),
            PickerResult::Toggled("work".into())
        );
        assert_eq!(picker.patch().removed, BTreeSet::from(["work".to_string()]));
        assert_eq!(picker.handle_action(Action::Delete), PickerResult::NoOp);
    }

    #[test]
    fn cancel_restores_initial_marks() {
        let items = vec![PickerItem::new("a", "a"), PickerItem::new("b", "b").mark(Mark::On)];
        let mut picker = Picker::new(items, SelectionMode::Multi);
        picker.handle_action(Action::Toggle);
        picker.handle_action(Action::MoveDown);
        picker.handle_action(Action::Toggle);
        assert!(!picker.patch().is_empty());
        assert_eq!(picker.handle_key(key(KeyCode::Esc)), PickerResult::Cancelled);
        assert!(picker.patch().is_empty());
    }

    #[test]
    fn replace_items_keeps_surviving_marks() {
        let items = vec![PickerItem::new("a", "a"), PickerItem::new("b", "b")];
        let mut picker = Picker::new(items, SelectionMode::Multi);
        picker.handle_action(Action::MoveDown);
        picker.handle_action(Action::Toggle);
        picker.replace_items(vec![
            PickerItem::new("b", "b"),
            PickerItem::new("c", "c").mark(Mark::On),
        ]);
        assert_eq!(picker.mark("b"), Some(Mark::On));
        assert_eq!(picker.mark("c"), Some(Mark::On));
        assert_eq!(picker.patch().added, BTreeSet::from(["b".to_string()]));
        assert_eq!(picker.highlighted().map(|i| i.id.as_str()), Some("b"));
        assert_eq!(picker.cursor(), 0);
    }

    #[test]
    fn replace_items_follows_the_highlighted_item() {
        let items = vec![
            PickerItem::new("1", "Alpha"),
            PickerItem::new("2", "Beta"),
            PickerItem::new("3", "Gamma"),
        ];
        let mut picker = Picker::new(items, SelectionMode::Single);
        picker.handle_action(Action::MoveDown);
        picker.replace_items(vec![
            PickerItem::new("3", "Gamma"),
            PickerItem::new("1", "Alpha"),
            PickerItem::new("2", "Beta"),
        ]);
        assert_eq!(picker.highlighted().map(|i| i.label.as_str()), Some("Beta"));
        assert_eq!(picker.cursor(), 2);

        picker.replace_items(vec![PickerItem::new("1", "Alpha"), PickerItem::new("3", "Gamma")]);
        assert_eq!(picker.cursor(), 1);
    }

    #[test]
    fn enter_with_no_visible_items_keeps_marks_pending() {
        let items = vec![PickerItem::new("a", "a"), PickerItem::new("b", "b")];
        let mut picker = Picker::new(items, SelectionMode::Multi);
        picker.handle_action(Action::Toggle);
        picker.set_query("zzz");
        assert_eq!(picker.rows(), vec![Row::Empty]);
        assert_eq!(picker.handle_action(Action::Select), PickerResult::NoOp);

        picker.set_query("");
        assert!(matches!(
            picker.handle_action(Action::Select),
            PickerResult::Selected(Selection::Patch(patch)) if patch.added.contains("a")
        ));
    }

    #[test]
    fn rows_include_headers_for_sections() {
        let items = vec![
            PickerItem::new("1", "Rent").section("Home"),
            PickerItem::new("2", "Bar").section("Fun"),
        ];
        let picker = Picker::new(items, SelectionMode::Single);
        let rows = picker.rows();
        assert!(matches!(rows[0], Row::Header("Home")));
        assert!(matches!(rows[1], Row::Item { highlighted: true, .. }));
        assert!(matches!(rows[2], Row::Header("Fun")));
    }

    #[test]
    fn space_is_query_text_in_single_mode() {
        let mut picker = Picker::new(vec![PickerItem::new("1", "Eating out")], SelectionMode::Single);
        type_str(&mut picker, "g o");
        assert_eq!(picker.query(), "g o");
    }
}
