//! Default keybinding catalog grouped by scope family.
//!
//! Responsibilities:
//! - Provide the ordered list of built-in bindings for the registry.
//!
//! Does NOT handle:
//! - Resolving input events (see the parent module).
//! - Applying user overrides (see `overrides`).
//!
//! Invariants:
//! - Binding order is stable; help output and `key_for` depend on it.
//! - Only the global scope holds app-level actions reachable from modals.

mod global;
mod modals;
mod tabs;

use super::Binding;

pub(crate) fn defaults() -> Vec<Binding> {
    let mut bindings = Vec::new();
    bindings.extend(global::bindings());
    bindings.extend(tabs::bindings());
    bindings.extend(modals::bindings());
    bindings
}
