//! Timeline export functionality
//!
//! This module writes a flattened [`Timeline`](crate::timeline::Timeline) to
//! JSON for external viewers:
//! - Clockwork-style timeline (`{"timeline": [...]}`), the format debug bars consume
//! - Chrome Trace Event Format, for Perfetto, Speedscope or `chrome://tracing`

pub mod chrome_trace;
pub mod clockwork;

pub use chrome_trace::ChromeTraceExporter;
pub use clockwork::ClockworkExporter;
