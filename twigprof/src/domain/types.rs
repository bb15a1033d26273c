//! Domain types providing compile-time safety and self-documentation
//!
//! These newtype wrappers keep byte counts and event sequence numbers apart
//! from the plain integers and floats that flow through the flattener.

use std::fmt;

use crate::format::pretty_size;

/// A byte count as reported by the template profiler.
///
/// Displays in human-readable form (`1.5 KB`, `2 MB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bytes(pub u64);

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&pretty_size(self.0))
    }
}

/// Sequence number of an emitted timeline event (0-indexed, pre-order)
///
/// Assigned by the flattener from a counter shared across one pass, so it
/// is unique within a single flattened timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub usize);

impl EventId {
    /// Synthetic event name, e.g. `twig-3`
    #[must_use]
    pub fn name(self, prefix: &str) -> String {
        format!("{prefix}-{}", self.0)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_display_uses_pretty_size() {
        assert_eq!(Bytes(1536).to_string(), "1.5 KB");
        assert_eq!(Bytes(0).to_string(), "0 B");
    }

    #[test]
    fn test_event_id_name() {
        assert_eq!(EventId(0).name("twig"), "twig-0");
        assert_eq!(EventId(12).name("view"), "view-12");
    }
}
