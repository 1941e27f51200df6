//! One render function per tab.

pub mod categories;
pub mod dedup;
pub mod transactions;
