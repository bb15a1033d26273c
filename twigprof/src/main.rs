//! # twigprof - Main Entry Point
//!
//! Loads a profile tree, flattens it and either prints a waterfall
//! (default) or exports the timeline with `--export FILE`.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};

use twigprof::cli::{Args, ExportFormat};
use twigprof::display::render_waterfall;
use twigprof::domain::ProfileError;
use twigprof::export::{ChromeTraceExporter, ClockworkExporter};
use twigprof::flatten::ProfileFlattener;
use twigprof::profile::ProfileTree;
use twigprof::timeline::Timeline;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_DATAERR: i32 = 65;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_code_for(&e)
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ProfileError>() {
        Some(ProfileError::Io(_)) | None => EXIT_ERROR,
        Some(_) => EXIT_DATAERR,
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let tree = ProfileTree::from_file(&args.profile)
        .with_context(|| format!("Failed to load profile {}", args.profile.display()))?;

    let flattener = ProfileFlattener::with_event_prefix(args.event_prefix.as_str());
    let mut timeline = Timeline::new();
    let emitted = flattener.flatten(&tree, &mut timeline);
    info!("Flattened {} into {emitted} events", args.profile.display());

    let Some(ref path) = args.export else {
        print!("{}", render_waterfall(&timeline, args.width));
        return Ok(());
    };

    if path.exists() {
        warn!("Overwriting existing file {}", path.display());
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let exported = match args.format {
        ExportFormat::Clockwork => ClockworkExporter::new(&timeline).export(&mut writer),
        ExportFormat::Chrome => ChromeTraceExporter::new(&timeline).export(&mut writer),
    };
    exported.with_context(|| format!("Failed to export timeline to {}", path.display()))?;
    writer.flush()?;

    if !args.quiet {
        println!(
            "Exported {} events ({:?}) to {}",
            timeline.len(),
            args.format,
            path.display()
        );
    }
    Ok(())
}
