//! Small widgets reused across screens.

pub mod empty;

pub use empty::render_empty_state;
