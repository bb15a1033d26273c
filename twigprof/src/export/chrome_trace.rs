// Timestamps are converted from seconds to microseconds
#![allow(clippy::cast_precision_loss)]

use log::debug;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use crate::domain::ExportError;
use crate::timeline::Timeline;

/// All timeline events share one synthetic process
const TRACE_PID: u32 = 1;

/// Chrome Trace Event format
/// Spec: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU/preview
#[derive(Debug, Clone, Serialize)]
struct ChromeTraceEvent {
    /// Event name (the span label)
    name: String,
    /// Category for filtering/coloring
    cat: String,
    /// Phase: "X" = complete, "M" = metadata
    ph: String,
    /// Timestamp in microseconds
    ts: f64,
    /// Duration in microseconds (complete events only)
    #[serde(skip_serializing_if = "Option::is_none")]
    dur: Option<f64>,
    pid: u32,
    /// One track per template
    tid: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    args: Option<BTreeMap<String, JsonValue>>,
}

/// Chrome Trace Format container
#[derive(Debug, Serialize)]
struct ChromeTrace {
    #[serde(rename = "traceEvents")]
    trace_events: Vec<ChromeTraceEvent>,
    #[serde(rename = "displayTimeUnit")]
    display_time_unit: String,
}

/// Chrome trace exporter for timeline visualization
///
/// Every timeline event becomes a complete (`"X"`) event on the track of
/// its template; each track is named by a `thread_name` metadata event.
pub struct ChromeTraceExporter<'a> {
    timeline: &'a Timeline,
}

impl<'a> ChromeTraceExporter<'a> {
    pub fn new(timeline: &'a Timeline) -> Self {
        Self { timeline }
    }

    fn build(&self) -> ChromeTrace {
        let keys = self.timeline.keys();
        let tracks = track_ids(&keys);
        let axis = self.timeline.axis();
        let mut trace_events = Vec::with_capacity(self.timeline.len() + keys.len());

        for entry in self.timeline.entries() {
            let event = &entry.event;
            let tid = tracks.get(entry.key.as_str()).copied().unwrap_or(0);
            let (start, end) = axis.map_or((event.start, event.end), |axis| axis.offsets(event));

            let metrics = event.metrics();
            let mut args = BTreeMap::new();
            args.insert("event".to_string(), serde_json::json!(event.name));
            args.insert("template".to_string(), serde_json::json!(entry.key));
            args.insert("tm".to_string(), serde_json::json!(metrics.tm));
            args.insert("mu".to_string(), serde_json::json!(metrics.mu));
            if let Some(ref pmu) = metrics.pmu {
                args.insert("pmu".to_string(), serde_json::json!(pmu));
            }

            trace_events.push(ChromeTraceEvent {
                name: event.label().to_string(),
                cat: "twig".to_string(),
                ph: "X".to_string(), // Complete
                ts: start * 1_000_000.0,
                dur: Some((end - start).max(0.0) * 1_000_000.0),
                pid: TRACE_PID,
                tid,
                args: Some(args),
            });
        }

        // Name each template track
        for key in &keys {
            let tid = tracks.get(key).copied().unwrap_or(0);
            let mut args = BTreeMap::new();
            let name = if key.is_empty() { "(no template)" } else { *key };
            args.insert("name".to_string(), serde_json::json!(name));

            trace_events.push(ChromeTraceEvent {
                name: "thread_name".to_string(),
                cat: String::new(),
                ph: "M".to_string(), // Metadata
                ts: 0.0,
                dur: None,
                pid: TRACE_PID,
                tid,
                args: Some(args),
            });
        }

        ChromeTrace {
            trace_events,
            display_time_unit: "ms".to_string(),
        }
    }

    /// Export the trace to any writer (file, stdout, buffer, etc.)
    ///
    /// # Example
    /// ```
    /// use twigprof::export::ChromeTraceExporter;
    /// use twigprof::flatten::flatten;
    /// use twigprof::profile::{ProfileNode, ProfileTree};
    /// use twigprof::timeline::Timeline;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let tree = ProfileTree::new(ProfileNode::root("main", "layout.html.twig", 0.1))?;
    /// let mut timeline = Timeline::new();
    /// flatten(&tree, &mut timeline);
    ///
    /// let mut buffer = Vec::new();
    /// ChromeTraceExporter::new(&timeline).export(&mut buffer)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn export<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let trace = self.build();
        debug!(
            "Writing Chrome trace with {} events",
            trace.trace_events.len()
        );
        serde_json::to_writer_pretty(writer, &trace)?;
        Ok(())
    }
}

/// 1-based track of each key, in first-seen order
#[allow(clippy::cast_possible_truncation)]
fn track_ids<'k>(keys: &[&'k str]) -> HashMap<&'k str, u32> {
    keys.iter()
        .enumerate()
        .map(|(i, key)| (*key, i as u32 + 1))
        .collect()
}
