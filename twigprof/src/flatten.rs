//! Profile flattening
//!
//! Converts a [`ProfileTree`] into a flat sequence of [`TimelineEvent`]s for
//! a waterfall viewer. Spans are visited depth-first in pre-order, so every
//! parent precedes its children and siblings keep their execution order.
//!
//! ```text
//! main                                   twig-0  100.00ms/100%
//! ⎯⎯⤍ layout.html.twig                   twig-1   80.00ms/80%
//! ⎯⎯⎯⎯⤍ layout.html.twig::block(content) twig-2   50.00ms/50%
//! ⎯⎯⤍ footer.html.twig                   twig-3   10.00ms/10%
//! ```
//!
//! Each label is prefixed with one [`CONNECTOR`] per level below the root,
//! and each duration is reported as a share of the root duration.

use log::{debug, trace};

use crate::domain::EventId;
use crate::format::{format_time, percent_of};
use crate::profile::{ProfileNode, ProfileTree, SpanKind};
use crate::timeline::{EventMetrics, EventPayload, EventSink, TimelineEvent};

/// Prefix unit added to labels for each level of depth
pub const CONNECTOR: &str = "⎯⎯";

/// Marker placed between the depth prefix and a span's name
pub const MARKER: &str = "⤍";

/// Default prefix of synthetic event names (`twig-0`, `twig-1`, ...)
pub const DEFAULT_EVENT_PREFIX: &str = "twig";

/// Immutable per-pass state handed down the traversal
#[derive(Debug, Clone, Copy)]
struct FlattenContext<'a> {
    root_duration: f64,
    event_prefix: &'a str,
}

/// Flattens profile trees into timeline events.
///
/// Holds configuration only; all traversal state lives on the stack of a
/// single [`flatten`](Self::flatten) call, so one flattener can be shared
/// between threads working on different trees.
#[derive(Debug, Clone)]
pub struct ProfileFlattener {
    event_prefix: String,
}

impl Default for ProfileFlattener {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileFlattener {
    pub fn new() -> Self {
        Self::with_event_prefix(DEFAULT_EVENT_PREFIX)
    }

    /// Use `prefix` for synthetic event names instead of `twig`
    pub fn with_event_prefix(prefix: impl Into<String>) -> Self {
        Self {
            event_prefix: prefix.into(),
        }
    }

    /// Append one event per span of `tree` to `sink`, in pre-order.
    ///
    /// Returns the number of events emitted.
    pub fn flatten<S: EventSink + ?Sized>(&self, tree: &ProfileTree, sink: &mut S) -> usize {
        self.flatten_node(tree.root(), sink)
    }

    /// Like [`flatten`](Self::flatten) for a tree that was never validated.
    ///
    /// `root` is treated as the root span whatever its kind; a root span met
    /// further down is labelled by its name.
    pub fn flatten_node<S: EventSink + ?Sized>(&self, root: &ProfileNode, sink: &mut S) -> usize {
        let ctx = FlattenContext {
            root_duration: root.duration,
            event_prefix: &self.event_prefix,
        };
        let mut counter = 0;

        sink.append(&root.template, build_event(ctx, root, root.name.clone(), true, &mut counter));
        for child in &root.children {
            visit(ctx, child, CONNECTOR, sink, &mut counter);
        }

        debug!(
            "Flattened profile {:?} into {counter} events (root {:.2}ms)",
            root.name,
            root.duration * 1000.0
        );
        counter
    }
}

/// Flatten `tree` with the default event prefix.
pub fn flatten<S: EventSink + ?Sized>(tree: &ProfileTree, sink: &mut S) -> usize {
    ProfileFlattener::new().flatten(tree, sink)
}

fn visit<S: EventSink + ?Sized>(
    ctx: FlattenContext<'_>,
    node: &ProfileNode,
    prefix: &str,
    sink: &mut S,
    counter: &mut usize,
) {
    let label = span_label(node, prefix);
    sink.append(&node.template, build_event(ctx, node, label, false, counter));

    let child_prefix = format!("{prefix}{CONNECTOR}");
    for child in &node.children {
        visit(ctx, child, &child_prefix, sink, counter);
    }
}

/// Label of a non-root span; `prefix` already holds one connector per level
fn span_label(node: &ProfileNode, prefix: &str) -> String {
    match &node.kind {
        SpanKind::Template => format!("{prefix}{MARKER} {}", node.template),
        SpanKind::Call {
            call_type,
            call_name,
        } => format!("{prefix}{MARKER} {}::{call_type}({call_name})", node.template),
        SpanKind::Root => node.name.clone(),
    }
}

fn build_event(
    ctx: FlattenContext<'_>,
    node: &ProfileNode,
    label: String,
    is_root: bool,
    counter: &mut usize,
) -> TimelineEvent {
    let id = EventId(*counter);
    *counter += 1;

    let (start, end, synthetic) = match node.wall_time() {
        Some((start, end)) => (start, end, false),
        None => {
            trace!("{id}: no wall-clock telemetry for {:?}, using 0..duration", node.name);
            (0.0, node.duration, true)
        }
    };

    let percent = percent_of(node.duration, ctx.root_duration);
    let metrics = EventMetrics {
        tm: format_time(node.duration, percent),
        mu: node.memory().to_string(),
        pmu: is_root.then(|| node.peak_memory().to_string()),
    };

    TimelineEvent {
        name: id.name(ctx.event_prefix),
        start,
        end,
        data: EventPayload { label, metrics },
        synthetic,
    }
}
