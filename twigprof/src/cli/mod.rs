//! Command-line interface for twigprof
//!
//! This module contains CLI argument parsing and configuration

pub mod args;

pub use args::{Args, ExportFormat};
