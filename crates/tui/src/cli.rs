//! Command-line arguments for tally-tui.
//!
//! Responsibilities:
//! - Define the argument structure with clap derive.
//!
//! Does NOT handle:
//! - Loading settings (see `tally_config::ConfigLoader`).
//!
//! Invariants:
//! - Arguments are parsed once at startup.

use clap::Parser;
use std::path::PathBuf;
use tally_config::constants::DEMO_LATENCY_MS;

/// Command-line arguments for tally-tui.
///
/// Settings precedence (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables (e.g. TALLY_MATCH_MODE)
/// 3. The settings file
/// 4. Defaults
#[derive(Debug, Parser)]
#[command(
    name = "tally-tui",
    about = "Keyboard-driven terminal UI for categorizing transactions",
    version,
    after_help = "Examples:\n  tally-tui\n  tally-tui --config-path ./config.json\n  RUST_LOG=debug tally-tui --log-dir /tmp/tally\n"
)]
pub struct Cli {
    /// Path to a settings file
    #[arg(long)]
    pub config_path: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Simulated collaborator latency in milliseconds
    #[arg(long, env = "TALLY_DEMO_LATENCY_MS", default_value_t = DEMO_LATENCY_MS)]
    pub latency_ms: u64,
}
