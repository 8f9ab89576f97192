//! Command line

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

const USAGE: &str = "usage: oav-probe <scene.json> [--ticks N] [--debug]";

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub scene: PathBuf,
    /// Overrides the scene's tick count
    pub ticks: Option<u64>,
    /// Forces continuous sampling
    pub debug: bool,
}

impl Args {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut scene = None;
        let mut ticks = None;
        let mut debug = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--debug" => debug = true,
                "--ticks" => {
                    let value = args.next().context("--ticks needs a value")?;
                    ticks = Some(value.parse::<u64>().with_context(|| format!("invalid tick count '{}'", value))?);
                }
                "-h" | "--help" => bail!(USAGE),
                other if other.starts_with("--") => bail!("unknown option '{}'\n{}", other, USAGE),
                other => {
                    if scene.replace(PathBuf::from(other)).is_some() {
                        bail!("more than one scene given\n{}", USAGE);
                    }
                }
            }
        }

        Ok(Self {
            scene: scene.context(USAGE)?,
            ticks,
            debug,
        })
    }
}
