//! Events consumed by the app loop.
//!
//! Terminal input, the UI tick and collaborator completions all arrive on
//! one channel, so the loop handles them strictly in order.

use crossterm::event::KeyEvent;

use crate::action::Completion;

#[derive(Debug, Clone)]
pub enum Event {
    Input(KeyEvent),
    Resize(u16, u16),
    Tick,
    Completion(Completion),
}

impl Event {
    /// Translate a terminal event. Mouse, focus and paste events are dropped.
    pub fn from_terminal(event: crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(key) => Some(Self::Input(key)),
            crossterm::event::Event::Resize(width, height) => Some(Self::Resize(width, height)),
            _ => None,
        }
    }
}

impl From<Completion> for Event {
    fn from(completion: Completion) -> Self {
        Self::Completion(completion)
    }
}
