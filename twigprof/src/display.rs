//! Plain-text waterfall rendering
//!
//! ```text
//! twig-0   100.00ms/100%      2 MB ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓ main
//! twig-1     20.00ms/20%    512 KB ░░▓▓▓▓░░░░░░░░░░░░░░ ⎯⎯⤍ partial.html.twig
//! ```

// Bar positions are computed from float offsets for display only
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::timeline::{TimeAxis, Timeline, TimelineEvent};

/// Default number of cells in a waterfall bar
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Render one line per event, with a bar placed by the event's start and end
/// on the timeline's [`TimeAxis`].
#[must_use]
pub fn render_waterfall(timeline: &Timeline, width: usize) -> String {
    let Some(axis) = timeline.axis() else {
        return String::new();
    };
    let name_width = timeline.events().map(|e| e.name.len()).max().unwrap_or(0);

    timeline
        .events()
        .map(|event| {
            let metrics = event.metrics();
            format!(
                "{:<name_width$} {:>15} {:>9} {} {}\n",
                event.name,
                metrics.tm,
                metrics.mu,
                waterfall_bar(event, axis, width),
                event.label()
            )
        })
        .collect()
}

fn waterfall_bar(event: &TimelineEvent, axis: TimeAxis, width: usize) -> String {
    if axis.length <= 0.0 || width == 0 {
        return "░".repeat(width);
    }

    let (start, end) = axis.offsets(event);
    let cell = |t: f64| (t / axis.length * width as f64).clamp(0.0, width as f64);
    let begin = cell(start).floor() as usize;
    let finish = (cell(end).ceil() as usize).max(begin);

    format!(
        "{}{}{}",
        "░".repeat(begin),
        "▓".repeat(finish - begin),
        "░".repeat(width - finish)
    )
}
