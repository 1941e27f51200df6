//! Footer projection of an interaction contract.
//!
//! A pure function of (contract, registry). Scope-specific wording comes only
//! from the contract's labels and omit flags; nothing here branches on which
//! context is active.

use crate::input::keymap::BindingRegistry;

use super::{Intent, InteractionContract};

const SEPARATOR: &str = " |";
const ELLIPSIS: &str = " ...";

fn segment(intent: &Intent, contract: &InteractionContract, registry: &BindingRegistry) -> Option<String> {
    let chord = match intent.command {
        Some(id) => registry.key_for_command(id, contract.scope),
        None => registry.key_for(intent.action, contract.scope),
    }?;
    Some(format!(" {chord}:{}", intent.label))
}

fn segments(contract: &InteractionContract, registry: &BindingRegistry) -> Vec<String> {
    contract
        .visible()
        .filter_map(|intent| segment(intent, contract, registry))
        .collect()
}

/// Render every visible intent that has a key in the contract's scope.
pub fn render(contract: &InteractionContract, registry: &BindingRegistry) -> String {
    segments(contract, registry).join(SEPARATOR)
}

/// Like `render`, dropping trailing segments so the result fits `width` chars.
pub fn render_fitted(contract: &InteractionContract, registry: &BindingRegistry, width: usize) -> String {
    let segments = segments(contract, registry);
    let full = segments.join(SEPARATOR);
    if full.chars().count() <= width {
        return full;
    }

    let budget = width.saturating_sub(ELLIPSIS.len());
    let mut out = String::new();
    let mut used = 0;
    for (i, seg) in segments.iter().enumerate() {
        let sep = if i == 0 { 0 } else { SEPARATOR.len() };
        let len = seg.chars().count() + sep;
        if used + len > budget {
            break;
        }
        if i > 0 {
            out.push_str(SEPARATOR);
        }
        out.push_str(seg);
        used += len;
    }
    out.push_str(ELLIPSIS);
    out.chars().take(width).collect()
}
