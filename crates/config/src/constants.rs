//! Centralized constants for the Tally workspace.
//!
//! Default values used across crates live here to avoid magic number
//! duplication.

// =============================================================================
// Event Loop
// =============================================================================

/// Capacity of the bounded event channel feeding the UI loop.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Default UI tick interval in milliseconds.
pub const DEFAULT_UI_TICK_MS: u64 = 250;

/// Smallest tick interval accepted from configuration.
pub const MIN_UI_TICK_MS: u64 = 16;

/// Largest tick interval accepted from configuration.
pub const MAX_UI_TICK_MS: u64 = 5_000;

// =============================================================================
// Interaction
// =============================================================================

/// Maximum number of recently executed commands listed first in the palette.
pub const MAX_RECENT_COMMANDS: usize = 10;

/// Number of rows moved by PageUp/PageDown in lists and pickers.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Seconds a status message stays visible.
pub const DEFAULT_STATUS_TTL_SECS: u64 = 5;

/// Seconds an error status message stays visible.
pub const DEFAULT_ERROR_STATUS_TTL_SECS: u64 = 10;

// =============================================================================
// Demo Collaborator
// =============================================================================

/// Simulated latency of the in-memory collaborator, in milliseconds.
pub const DEMO_LATENCY_MS: u64 = 150;
