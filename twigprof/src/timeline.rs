//! Timeline event model and event sinks
//!
//! The flattener appends one [`TimelineEvent`] per profile span to an
//! [`EventSink`], keyed by the span's template. [`Timeline`] is the default
//! sink: it keeps every event in emission order and groups them by key on
//! demand, the way a devtools-style timeline panel lists views per template.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Display metrics attached to an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetrics {
    /// Duration and share of the root, e.g. `20.00ms/20%`
    pub tm: String,
    /// Memory usage, e.g. `1.5 MB`
    pub mu: String,
    /// Peak memory usage, root span only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmu: Option<String>,
}

/// Label and metrics shown for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(rename = "name")]
    pub label: String,
    #[serde(rename = "data")]
    pub metrics: EventMetrics,
}

/// One flattened profile span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Synthetic, unique name such as `twig-3`
    pub name: String,
    /// Start in seconds
    pub start: f64,
    /// End in seconds
    pub end: f64,
    pub data: EventPayload,
    /// Start and end are the `0..duration` fallback, not wall-clock times
    #[serde(skip)]
    pub synthetic: bool,
}

impl TimelineEvent {
    pub fn label(&self) -> &str {
        &self.data.label
    }

    pub fn metrics(&self) -> &EventMetrics {
        &self.data.metrics
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Shared time base for drawing a timeline.
///
/// Wall-clock events are placed relative to the earliest wall-clock start;
/// synthetic events have no wall-clock anchor and are placed from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    pub origin: f64,
    /// Latest end offset over all events, in seconds
    pub length: f64,
}

impl TimeAxis {
    /// `(start, end)` of `event` in seconds from the origin
    pub fn offsets(&self, event: &TimelineEvent) -> (f64, f64) {
        if event.synthetic {
            (event.start, event.end)
        } else {
            (event.start - self.origin, event.end - self.origin)
        }
    }
}

/// Ordered, append-only destination for timeline events.
///
/// Implementations must keep insertion order for events sharing a key.
pub trait EventSink {
    fn append(&mut self, key: &str, event: TimelineEvent);
}

impl EventSink for Vec<(String, TimelineEvent)> {
    fn append(&mut self, key: &str, event: TimelineEvent) {
        self.push((key.to_string(), event));
    }
}

/// Serializes appends from several producers into one sink.
impl<S: EventSink> EventSink for &Mutex<S> {
    fn append(&mut self, key: &str, event: TimelineEvent) {
        let mut sink = self.lock().unwrap_or_else(PoisonError::into_inner);
        sink.append(key, event);
    }
}

/// An event together with the key it was filed under
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub key: String,
    pub event: TimelineEvent,
}

/// Keyed timeline preserving global emission order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in emission order
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// All events in emission order
    pub fn events(&self) -> impl Iterator<Item = &TimelineEvent> {
        self.entries.iter().map(|entry| &entry.event)
    }

    /// Distinct keys in the order they were first seen
    pub fn keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|entry| entry.key.as_str())
            .filter(|key| seen.insert(*key))
            .collect()
    }

    /// Events filed under `key`, in emission order
    pub fn events_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a TimelineEvent> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.key == key)
            .map(|entry| &entry.event)
    }

    /// Time base covering every event, `None` when empty
    pub fn axis(&self) -> Option<TimeAxis> {
        if self.is_empty() {
            return None;
        }
        let origin = self
            .events()
            .filter(|event| !event.synthetic)
            .map(|event| event.start)
            .reduce(f64::min)
            .unwrap_or(0.0);
        let anchor = TimeAxis { origin, length: 0.0 };
        let length = self
            .events()
            .map(|event| anchor.offsets(event).1)
            .fold(0.0, f64::max);
        Some(TimeAxis { origin, length })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EventSink for Timeline {
    fn append(&mut self, key: &str, event: TimelineEvent) {
        self.entries.push(TimelineEntry {
            key: key.to_string(),
            event,
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn event(name: &str, start: f64, end: f64) -> TimelineEvent {
        TimelineEvent {
            name: name.to_string(),
            start,
            end,
            data: EventPayload {
                label: format!("label of {name}"),
                metrics: EventMetrics {
                    tm: "1.00ms/1%".to_string(),
                    mu: "0 B".to_string(),
                    pmu: None,
                },
            },
            synthetic: false,
        }
    }

    pub(crate) fn synthetic_event(name: &str, duration: f64) -> TimelineEvent {
        TimelineEvent {
            synthetic: true,
            ..event(name, 0.0, duration)
        }
    }

    #[test]
    fn test_timeline_keeps_emission_order() {
        let mut timeline = Timeline::new();
        timeline.append("a.twig", event("twig-0", 0.0, 1.0));
        timeline.append("b.twig", event("twig-1", 0.1, 0.5));
        timeline.append("a.twig", event("twig-2", 0.5, 0.9));

        let names: Vec<&str> = timeline.events().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["twig-0", "twig-1", "twig-2"]);
        assert_eq!(timeline.len(), 3);
        assert!(!timeline.is_empty());
    }

    #[test]
    fn test_timeline_groups_by_key() {
        let mut timeline = Timeline::new();
        timeline.append("b.twig", event("twig-0", 0.0, 1.0));
        timeline.append("a.twig", event("twig-1", 0.1, 0.5));
        timeline.append("b.twig", event("twig-2", 0.5, 0.9));

        assert_eq!(timeline.keys(), vec!["b.twig", "a.twig"]);
        let grouped: Vec<&str> = timeline.events_for("b.twig").map(|e| e.name.as_str()).collect();
        assert_eq!(grouped, vec!["twig-0", "twig-2"]);
        assert_eq!(timeline.events_for("missing").count(), 0);
    }

    #[test]
    fn test_axis_over_wall_clock_events() {
        let mut timeline = Timeline::new();
        assert_eq!(timeline.axis(), None);
        timeline.append("a", event("twig-0", 0.25, 1.0));
        timeline.append("a", event("twig-1", 0.125, 0.5));

        let axis = timeline.axis().unwrap();
        assert_eq!(axis.origin, 0.125);
        assert_eq!(axis.length, 0.875);
    }

    #[test]
    fn test_axis_anchors_synthetic_events_at_origin() {
        let mut timeline = Timeline::new();
        timeline.append("a", synthetic_event("twig-0", 0.5));
        timeline.append("b", event("twig-1", 1000.0, 1000.25));
        timeline.append("c", synthetic_event("twig-2", 0.125));

        let axis = timeline.axis().unwrap();
        assert_eq!(axis.origin, 1000.0);
        assert_eq!(axis.length, 0.5);

        let offsets: Vec<(f64, f64)> = timeline.events().map(|e| axis.offsets(e)).collect();
        assert_eq!(offsets, vec![(0.0, 0.5), (0.0, 0.25), (0.0, 0.125)]);
    }

    #[test]
    fn test_axis_with_only_synthetic_events() {
        let mut timeline = Timeline::new();
        timeline.append("a", synthetic_event("twig-0", 0.5));
        timeline.append("a", synthetic_event("twig-1", 0.25));

        assert_eq!(
            timeline.axis(),
            Some(TimeAxis {
                origin: 0.0,
                length: 0.5
            })
        );
    }

    #[test]
    fn test_mutex_sink_appends_through_lock() {
        let shared = Mutex::new(Timeline::new());
        let mut sink = &shared;
        sink.append("a", event("twig-0", 0.0, 1.0));
        sink.append("a", event("twig-1", 0.0, 1.0));
        assert_eq!(shared.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_event_serializes_with_nested_payload() {
        let value = serde_json::to_value(event("twig-0", 0.0, 0.25)).unwrap();
        assert_eq!(value["name"], "twig-0");
        assert_eq!(value["data"]["name"], "label of twig-0");
        assert_eq!(value["data"]["data"]["tm"], "1.00ms/1%");
        assert!(value["data"]["data"].get("pmu").is_none());
    }
}
