//! CLI argument definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::display::DEFAULT_BAR_WIDTH;
use crate::flatten::DEFAULT_EVENT_PREFIX;

/// Output format for `--export`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Clockwork-style `{"timeline": [...]}` JSON
    Clockwork,
    /// Chrome Trace Event Format (Perfetto, chrome://tracing)
    Chrome,
}

#[derive(Parser, Debug)]
#[command(
    name = "twigprof",
    about = "Flatten a template render profile into timeline events",
    after_help = "\
EXAMPLES:
    twigprof profile.json                              Print a waterfall
    twigprof profile.json --export timeline.json       Write Clockwork timeline JSON
    twigprof profile.json --export trace.json --format chrome"
)]
pub struct Args {
    /// Profile tree to flatten (JSON)
    #[arg(value_name = "PROFILE")]
    pub profile: PathBuf,

    /// Export the timeline to a file instead of printing it
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Export format
    #[arg(long, value_enum, default_value_t = ExportFormat::Clockwork)]
    pub format: ExportFormat,

    /// Prefix for synthetic event names
    #[arg(long, default_value = DEFAULT_EVENT_PREFIX)]
    pub event_prefix: String,

    /// Width of waterfall bars
    #[arg(long, default_value_t = DEFAULT_BAR_WIDTH)]
    pub width: usize,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}
