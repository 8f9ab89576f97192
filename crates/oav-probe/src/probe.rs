//! Scene file loading and the tick loop

use std::io::Write;
use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, Result};
use oav_core::{MonitorConfig, MonitorPhase, TimerQueue, check_viewability};
use oav_dom::{Page, Scene, TimelineEntry};
use serde::Deserialize;

use crate::args::Args;

/// Scene plus session settings
#[derive(Debug, Deserialize)]
pub struct ProbeFile {
    #[serde(flatten)]
    pub scene: Scene,
    /// Element to monitor
    pub target: String,
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// Ticks to run unless the session ends earlier
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
}

fn default_ticks() -> u64 {
    20
}

impl ProbeFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid scene {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub ticks: u64,
    pub phase: MonitorPhase,
    pub viewable: bool,
}

/// Run the session, writing one JSON line per status to `out`.
pub fn run<W: Write>(file: ProbeFile, args: &Args, out: &mut W) -> Result<Summary> {
    let mut loaded = Page::from_scene(&file.scene).context("failed to build page")?;
    let target = loaded.element(&file.target)?;

    let mut config = file.monitor;
    if args.debug {
        config = config.with_debug_mode(true);
    }
    let cadence = config.cadence();
    let ticks = args.ticks.unwrap_or(file.ticks);

    let (sender, receiver) = mpsc::channel();
    let mut timers = TimerQueue::new();
    let mut monitor = check_viewability(&mut timers, target, config, move |status| {
        // The receiver outlives the monitor.
        let _ = sender.send(status);
    });

    let mut elapsed = 0;
    for tick in 1..=ticks {
        for entry in file.timeline.iter().filter(|e| e.at_tick == tick) {
            loaded.apply(&entry.mutation)?;
        }

        monitor.drive(&loaded.page, &mut timers, cadence);
        elapsed = tick;

        for status in receiver.try_iter() {
            serde_json::to_writer(&mut *out, &status)?;
            writeln!(out)?;
        }

        if !monitor.is_running() {
            break;
        }
    }

    if monitor.is_running() {
        monitor.stop(&mut timers);
    }

    Ok(Summary {
        ticks: elapsed,
        phase: monitor.phase(),
        viewable: monitor.state().viewability_status,
    })
}
