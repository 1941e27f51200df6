//! Help text rendered from the binding registry.
//!
//! Responsibilities:
//! - Turn the bindings visible in a scope into a readable, aligned listing.
//!
//! Does NOT handle:
//! - Footer hints (see `contract::footer`, which reads interaction contracts).
//! - Owning keybinding definitions (delegated to keymap).
//!
//! Invariants:
//! - Rendering order follows registry order, so output is stable.
//! - Consecutive bindings sharing an action and description collapse into
//!   one line ("j/Down").

use crate::input::keymap::{Binding, BindingRegistry, Scope};

/// Help for `scope`: its own bindings first, then unshadowed global keys.
pub fn help_text(registry: &BindingRegistry, scope: Scope) -> String {
    let (own, global): (Vec<&Binding>, Vec<&Binding>) = registry
        .visible_bindings(scope)
        .partition(|b| b.scope == scope && scope != Scope::Global);

    let mut out = String::new();
    for (title, entries) in [(scope.title(), own), (Scope::Global.title(), global)] {
        let entries = collapse(&entries);
        if entries.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(title);
        out.push('\n');
        let width = entries
            .iter()
            .map(|(keys, _)| keys.chars().count())
            .max()
            .unwrap_or(0);
        for (keys, description) in entries {
            let padding = width.saturating_sub(keys.chars().count()) + 2;
            out.push_str("  ");
            out.push_str(&keys);
            out.push_str(&" ".repeat(padding));
            out.push_str(description);
            out.push('\n');
        }
    }
    out
}

fn collapse(bindings: &[&Binding]) -> Vec<(String, &'static str)> {
    let mut entries: Vec<(String, &'static str)> = Vec::new();
    let mut last: Option<&Binding> = None;
    for binding in bindings {
        match (last, entries.last_mut()) {
            (Some(prev), Some((keys, _)))
                if prev.action == binding.action
                    && prev.command == binding.command
                    && prev.description == binding.description =>
            {
                keys.push('/');
                keys.push_str(&binding.chord.to_string());
            }
            _ => entries.push((binding.chord.to_string(), binding.description)),
        }
        last = Some(binding);
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_help_lists_scope_then_global() {
        let registry = BindingRegistry::with_defaults().unwrap();
        let text = help_text(&registry, Scope::Confirm);
        let confirm = text.find("Confirm\n").unwrap();
        let global = text.find("Global\n").unwrap();
        assert!(confirm < global);
        assert!(text.contains("  y/Enter  Confirm\n"));
        assert!(text.contains("Ctrl+p"));
    }

    #[test]
    fn shadowed_globals_are_hidden() {
        let registry = BindingRegistry::with_defaults().unwrap();
        let text = help_text(&registry, Scope::Transactions);
        assert!(text.contains("  j/Down"));
        assert!(text.contains("Filter transactions"));
        // Global F1 help is not shadowed in list scopes, so both help keys appear.
        assert!(text.contains("F1"));
        assert!(text.contains("?"));
    }
}
