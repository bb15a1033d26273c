//! # twigprof - Template Profile Flattener
//!
//! twigprof turns the execution profile of a template render (a tree of
//! timed spans, one per template, block or macro call) into a flat list of
//! timeline events for waterfall-style debug viewers.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   Profile    │──▶│   Flatten    │──▶│   Timeline   │
//! │ (JSON tree)  │   │ (pre-order)  │   │  (EventSink) │
//! └──────────────┘   └──────────────┘   └──────┬───────┘
//!                                              │
//!                          ┌───────────────────┼──────────────────┐
//!                          ▼                   ▼                  ▼
//!                   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!                   │  Clockwork   │   │ Chrome trace │   │  Waterfall   │
//!                   │    JSON      │   │    JSON      │   │   (stdout)   │
//!                   └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`profile`]: the span tree, its JSON loading and validation
//! - [`flatten`]: depth-first flattening into timeline events
//! - [`timeline`]: event model and event sinks
//! - [`format`]: byte-size and duration formatting
//! - [`export`]: Clockwork and Chrome Trace Event Format writers
//! - [`display`]: plain-text waterfall
//! - [`cli`]: command-line argument parsing
//! - [`domain`]: newtypes and error types
//!
//! ## Example
//!
//! ```
//! use twigprof::flatten::flatten;
//! use twigprof::profile::{ProfileNode, ProfileTree};
//! use twigprof::timeline::Timeline;
//!
//! let root = ProfileNode::root("main", "layout.html.twig", 0.1)
//!     .with_child(ProfileNode::template("partial.html.twig", 0.02));
//! let tree = ProfileTree::new(root).unwrap();
//!
//! let mut timeline = Timeline::new();
//! flatten(&tree, &mut timeline);
//!
//! let labels: Vec<&str> = timeline.events().map(|e| e.label()).collect();
//! assert_eq!(labels, ["main", "⎯⎯⤍ partial.html.twig"]);
//! ```

pub mod cli;
pub mod display;
pub mod domain;
pub mod export;
pub mod flatten;
pub mod format;
pub mod profile;
pub mod timeline;
