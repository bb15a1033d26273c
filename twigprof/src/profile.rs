//! Template profile model
//!
//! A profile is a rooted, ordered tree of spans recorded while rendering
//! templates: one root span for the whole render, then one span per
//! template, block or macro call. Children are kept in execution order.
//!
//! Profiles are read from JSON:
//!
//! ```json
//! {
//!   "name": "main",
//!   "template": "layout.html.twig",
//!   "kind": { "type": "root" },
//!   "duration": 0.1,
//!   "memory_usage": 2097152,
//!   "peak_memory_usage": 4194304,
//!   "children": [
//!     {
//!       "name": "partial.html.twig",
//!       "template": "partial.html.twig",
//!       "kind": { "type": "template" },
//!       "duration": 0.02,
//!       "start": 1700000000.01,
//!       "end": 1700000000.03
//!     }
//!   ]
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::domain::{Bytes, ProfileError};

/// What a span measured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpanKind {
    /// The whole render; entry point of the tree
    Root,
    /// Rendering of one template
    Template,
    /// A block or macro call inside a template
    Call { call_type: String, call_name: String },
}

/// One span of the profile tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileNode {
    pub name: String,
    /// Template the span belongs to (may be empty)
    #[serde(default)]
    pub template: String,
    pub kind: SpanKind,
    /// Duration in seconds
    pub duration: f64,
    #[serde(default)]
    pub memory_usage: u64,
    /// Only meaningful on the root span
    #[serde(default)]
    pub peak_memory_usage: u64,
    /// Wall-clock start in seconds, if the profiler recorded it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    /// Wall-clock end in seconds, if the profiler recorded it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ProfileNode>,
}

impl ProfileNode {
    fn new(name: impl Into<String>, template: impl Into<String>, kind: SpanKind, duration: f64) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            kind,
            duration,
            memory_usage: 0,
            peak_memory_usage: 0,
            start: None,
            end: None,
            children: Vec::new(),
        }
    }

    /// Root span covering a whole render
    pub fn root(name: impl Into<String>, template: impl Into<String>, duration: f64) -> Self {
        Self::new(name, template, SpanKind::Root, duration)
    }

    /// Span for rendering `template`
    pub fn template(template: impl Into<String>, duration: f64) -> Self {
        let template = template.into();
        Self::new(template.clone(), template, SpanKind::Template, duration)
    }

    /// Span for a block or macro call inside `template`
    pub fn call(
        template: impl Into<String>,
        call_type: impl Into<String>,
        call_name: impl Into<String>,
        duration: f64,
    ) -> Self {
        let call_name = call_name.into();
        let kind = SpanKind::Call {
            call_type: call_type.into(),
            call_name: call_name.clone(),
        };
        Self::new(call_name, template, kind, duration)
    }

    #[must_use]
    pub fn with_memory(mut self, bytes: u64) -> Self {
        self.memory_usage = bytes;
        self
    }

    #[must_use]
    pub fn with_peak_memory(mut self, bytes: u64) -> Self {
        self.peak_memory_usage = bytes;
        self
    }

    #[must_use]
    pub fn with_wall_time(mut self, start: f64, end: f64) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: ProfileNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, SpanKind::Root)
    }

    pub fn is_template(&self) -> bool {
        matches!(self.kind, SpanKind::Template)
    }

    pub fn memory(&self) -> Bytes {
        Bytes(self.memory_usage)
    }

    pub fn peak_memory(&self) -> Bytes {
        Bytes(self.peak_memory_usage)
    }

    /// Recorded wall-clock `(start, end)`, if both are present and finite
    pub fn wall_time(&self) -> Option<(f64, f64)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start.is_finite() && end.is_finite() => Some((start, end)),
            _ => None,
        }
    }

    /// Number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ProfileNode::node_count).sum::<usize>()
    }

    /// Depth of this subtree (a leaf has depth 0)
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// A validated profile: the entry node is the only root span and every
/// duration is a finite, non-negative number.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTree {
    root: ProfileNode,
}

impl ProfileTree {
    /// Validate `root` and wrap it.
    pub fn new(root: ProfileNode) -> Result<Self, ProfileError> {
        if !root.is_root() {
            return Err(ProfileError::NotRoot { name: root.name });
        }
        check_duration(&root)?;
        for child in &root.children {
            check_descendant(child)?;
        }
        Ok(Self { root })
    }

    /// Parse a profile from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        debug!("Loading profile from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a profile from any JSON reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ProfileError> {
        let root: ProfileNode = serde_json::from_reader(reader)?;
        let tree = Self::new(root)?;
        debug!(
            "Loaded profile {:?}: {} spans, depth {}",
            tree.root.name,
            tree.node_count(),
            tree.depth()
        );
        Ok(tree)
    }

    pub fn root(&self) -> &ProfileNode {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

fn check_duration(node: &ProfileNode) -> Result<(), ProfileError> {
    if node.duration.is_finite() && node.duration >= 0.0 {
        Ok(())
    } else {
        Err(ProfileError::InvalidDuration {
            name: node.name.clone(),
            value: node.duration,
        })
    }
}

fn check_descendant(node: &ProfileNode) -> Result<(), ProfileError> {
    if node.is_root() {
        return Err(ProfileError::NestedRoot {
            name: node.name.clone(),
        });
    }
    check_duration(node)?;
    node.children.iter().try_for_each(check_descendant)
}
