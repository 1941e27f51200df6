//! Cursor-aware single-line text field shared by every text-entry surface.
//!
//! Responsibilities:
//! - Layer the field's mode flags over a `tui_input::Input` buffer.
//! - Report which keys a focused field consumes before binding lookup.
//!
//! Does NOT handle:
//! - Rendering or horizontal scrolling.
//! - Interpreting Enter/Esc; those resolve through the active scope.
//!
//! Invariants:
//! - `0 <= cursor <= len` after every operation; out-of-range moves clamp.
//! - Without `CURSOR_AWARE` the field is append-only and the cursor stays
//!   at the end.

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_input::{Input, InputRequest};

bitflags! {
    /// Mode flags for a text field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FieldFlags: u8 {
        /// Arbitrary-position insert, delete and cursor movement.
        const CURSOR_AWARE = 1 << 0;
        /// Printable characters go to the field before binding lookup.
        const PRINTABLE_FIRST = 1 << 1;
        /// `j`/`k` are literal characters, not navigation.
        const VIM_NAV_SUPPRESSED = 1 << 2;
    }
}

/// What a single edit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Inserted,
    Deleted,
    Moved,
    Cleared,
    Ignored,
}

impl TextEdit {
    /// Whether the buffer contents changed.
    pub fn changed_text(self) -> bool {
        matches!(self, Self::Inserted | Self::Deleted | Self::Cleared)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextField {
    input: Input,
    flags: FieldFlags,
}

impl TextField {
    pub fn new(flags: FieldFlags) -> Self {
        Self {
            input: Input::default(),
            flags,
        }
    }

    pub fn with_value(value: impl Into<String>, flags: FieldFlags) -> Self {
        Self {
            input: Input::new(value.into()),
            flags,
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.input.value().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    pub fn flags(&self) -> FieldFlags {
        self.flags
    }

    fn cursor_aware(&self) -> bool {
        self.flags.contains(FieldFlags::CURSOR_AWARE)
    }

    /// Forward one request to the buffer; `edit` if anything changed.
    fn request(&mut self, request: InputRequest, edit: TextEdit) -> TextEdit {
        match self.input.handle(request) {
            Some(changed) if changed.value || changed.cursor => edit,
            _ => TextEdit::Ignored,
        }
    }

    pub fn insert(&mut self, ch: char) -> TextEdit {
        if ch.is_control() {
            return TextEdit::Ignored;
        }
        if !self.cursor_aware() {
            self.input.handle(InputRequest::GoToEnd);
        }
        self.request(InputRequest::InsertChar(ch), TextEdit::Inserted)
    }

    pub fn delete_before_cursor(&mut self) -> TextEdit {
        if !self.cursor_aware() {
            self.input.handle(InputRequest::GoToEnd);
        }
        self.request(InputRequest::DeletePrevChar, TextEdit::Deleted)
    }

    pub fn delete_at_cursor(&mut self) -> TextEdit {
        if !self.cursor_aware() {
            return TextEdit::Ignored;
        }
        self.request(InputRequest::DeleteNextChar, TextEdit::Deleted)
    }

    pub fn move_cursor(&mut self, delta: isize) -> TextEdit {
        if !self.cursor_aware() {
            return TextEdit::Ignored;
        }
        let mut edit = TextEdit::Ignored;
        for _ in 0..delta.unsigned_abs() {
            let step = if delta < 0 {
                InputRequest::GoToPrevChar
            } else {
                InputRequest::GoToNextChar
            };
            match self.request(step, TextEdit::Moved) {
                TextEdit::Ignored => break,
                moved => edit = moved,
            }
        }
        edit
    }

    pub fn move_home(&mut self) -> TextEdit {
        if !self.cursor_aware() || self.cursor() == 0 {
            return TextEdit::Ignored;
        }
        self.request(InputRequest::GoToStart, TextEdit::Moved)
    }

    pub fn move_end(&mut self) -> TextEdit {
        if !self.cursor_aware() || self.cursor() == self.len() {
            return TextEdit::Ignored;
        }
        self.request(InputRequest::GoToEnd, TextEdit::Moved)
    }

    pub fn clear(&mut self) -> TextEdit {
        if self.is_empty() {
            return TextEdit::Ignored;
        }
        self.input = Input::default();
        TextEdit::Cleared
    }

    /// Replace the contents; the cursor moves to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.input = Input::new(value.into());
    }

    /// Whether a focused field consumes `key` ahead of binding lookup.
    pub fn claims(&self, key: KeyEvent) -> bool {
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('j' | 'k') if plain => {
                self.flags.contains(FieldFlags::VIM_NAV_SUPPRESSED)
            }
            KeyCode::Char(_) if plain => self.flags.contains(FieldFlags::PRINTABLE_FIRST),
            KeyCode::Char('u') => key.modifiers.contains(KeyModifiers::CONTROL),
            KeyCode::Backspace | KeyCode::Delete => true,
            KeyCode::Left | KeyCode::Right | KeyCode::Home | KeyCode::End => self.cursor_aware(),
            _ => false,
        }
    }

    /// Apply the editing meaning of `key`. Keys without one are `Ignored`.
    pub fn handle_key(&mut self, key: KeyEvent) -> TextEdit {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char(c) if !ctrl && !alt => self.insert(c),
            KeyCode::Backspace => self.delete_before_cursor(),
            KeyCode::Delete => self.delete_at_cursor(),
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => TextEdit::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn editable(value: &str) -> TextField {
        TextField::with_value(value, FieldFlags::all())
    }

    #[test]
    fn insert_in_middle_respects_utf8() {
        let mut field = editable("cafe");
        field.move_cursor(-1);
        assert_eq!(field.insert('é'), TextEdit::Inserted);
        assert_eq!(field.value(), "cafée");
        assert_eq!(field.cursor(), 4);
        assert_eq!(field.delete_before_cursor(), TextEdit::Deleted);
        assert_eq!(field.value(), "cafe");
    }

    #[test]
    fn moves_clamp_at_boundaries() {
        let mut field = editable("ab");
        assert_eq!(field.move_cursor(5), TextEdit::Ignored);
        assert_eq!(field.cursor(), 2);
        assert_eq!(field.move_cursor(-10), TextEdit::Moved);
        assert_eq!(field.cursor(), 0);
        assert_eq!(field.delete_before_cursor(), TextEdit::Ignored);
        assert_eq!(field.delete_at_cursor(), TextEdit::Deleted);
        assert_eq!(field.value(), "b");
    }

    #[test]
    fn append_only_field_ignores_movement() {
        let mut field = TextField::with_value("gro", FieldFlags::PRINTABLE_FIRST);
        assert_eq!(field.move_cursor(-1), TextEdit::Ignored);
        assert_eq!(field.move_home(), TextEdit::Ignored);
        field.insert('c');
        assert_eq!(field.value(), "groc");
        assert_eq!(field.cursor(), 4);
        field.delete_before_cursor();
        assert_eq!(field.value(), "gro");
        assert_eq!(field.delete_at_cursor(), TextEdit::Ignored);
    }

    #[test]
    fn vim_keys_claimed_only_when_suppressed() {
        let typing = TextField::new(FieldFlags::PRINTABLE_FIRST);
        assert!(typing.claims(key(KeyCode::Char('a'))));
        assert!(!typing.claims(key(KeyCode::Char('j'))));

        let literal = TextField::new(FieldFlags::PRINTABLE_FIRST | FieldFlags::VIM_NAV_SUPPRESSED);
        assert!(literal.claims(key(KeyCode::Char('j'))));
        assert!(literal.claims(key(KeyCode::Backspace)));
        assert!(!literal.claims(key(KeyCode::Left)));
        assert!(!literal.claims(key(KeyCode::Enter)));
        assert!(!literal.claims(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL)));

        assert!(editable("").claims(key(KeyCode::Home)));
    }

    #[test]
    fn handle_key_maps_editing_keys() {
        let mut field = editable("abc");
        assert_eq!(field.handle_key(key(KeyCode::Home)), TextEdit::Moved);
        assert_eq!(field.handle_key(key(KeyCode::Delete)), TextEdit::Deleted);
        assert_eq!(field.handle_key(key(KeyCode::Char('x'))), TextEdit::Inserted);
        assert_eq!(field.value(), "xbc");
        assert_eq!(
            field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            TextEdit::Cleared
        );
        assert!(field.is_empty());
        assert_eq!(field.handle_key(key(KeyCode::Esc)), TextEdit::Ignored);
    }

    #[test]
    fn multi_step_moves_stop_at_the_edge() {
        let mut field = editable("héllo");
        assert_eq!(field.move_cursor(-3), TextEdit::Moved);
        assert_eq!(field.cursor(), 2);
        assert_eq!(field.move_cursor(-9), TextEdit::Moved);
        assert_eq!(field.cursor(), 0);
        assert_eq!(field.move_end(), TextEdit::Moved);
        assert_eq!(field.move_end(), TextEdit::Ignored);
        assert_eq!(field.cursor(), 5);
    }

    #[test]
    fn control_chars_are_not_inserted() {
        let mut field = editable("");
        assert_eq!(field.insert('\n'), TextEdit::Ignored);
        assert!(field.is_empty());
    }
}
