//! Clockwork-style timeline JSON
//!
//! Each event is written with the key it was filed under as its
//! `description`, next to its start, end, duration and display payload.

use log::debug;
use serde::Serialize;
use std::io::Write;

use crate::domain::ExportError;
use crate::timeline::{EventPayload, Timeline};

#[derive(Debug, Serialize)]
struct ClockworkEvent<'a> {
    description: &'a str,
    name: &'a str,
    start: f64,
    end: f64,
    /// Milliseconds
    duration: f64,
    data: &'a EventPayload,
}

#[derive(Debug, Serialize)]
struct ClockworkTimeline<'a> {
    timeline: Vec<ClockworkEvent<'a>>,
}

/// Writes a timeline in the shape consumed by Clockwork-compatible debug bars
pub struct ClockworkExporter<'a> {
    timeline: &'a Timeline,
}

impl<'a> ClockworkExporter<'a> {
    pub fn new(timeline: &'a Timeline) -> Self {
        Self { timeline }
    }

    pub fn export<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let timeline = ClockworkTimeline {
            timeline: self
                .timeline
                .entries()
                .iter()
                .map(|entry| ClockworkEvent {
                    description: &entry.key,
                    name: &entry.event.name,
                    start: entry.event.start,
                    end: entry.event.end,
                    duration: entry.event.duration() * 1000.0,
                    data: &entry.event.data,
                })
                .collect(),
        };

        debug!("Writing Clockwork timeline with {} events", timeline.timeline.len());
        serde_json::to_writer_pretty(writer, &timeline)?;
        Ok(())
    }
}
