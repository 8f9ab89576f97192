//! OAV Probe - Main Entry Point
//!
//! Loads a scene file, monitors its target element on a virtual clock and
//! prints one JSON status line per tick on stdout. Logs go to stderr.

mod args;
mod probe;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = args::Args::parse(std::env::args().skip(1))?;
    tracing::info!("oav-probe {} on {}", oav_core::VERSION, args.scene.display());

    let file = probe::ProbeFile::load(&args.scene)?;
    let stdout = std::io::stdout();
    let summary = probe::run(file, &args, &mut stdout.lock())?;

    tracing::info!(
        "Finished after {} ticks: {:?}, viewable = {}",
        summary.ticks,
        summary.phase,
        summary.viewable
    );
    Ok(())
}
