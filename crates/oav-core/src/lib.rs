//! OAV Core - Ad viewability measurement
//!
//! Decides whether an element is viewable under the MRC display guideline:
//! a share of its pixels on screen for a continuous second. The element may
//! sit inside any number of nested frames.
//!
//! # Pipeline
//! - CSS filter: `visibility: hidden` / `display: none`
//! - Occlusion: 3x3 hit test against foreign elements
//! - Geometry: clipping through every ancestor viewport
//! - Monitor: fixed-cadence sampling with a consecutive-pass counter
//!
//! The page itself is reached through the [`Host`] trait.
//!
//! # Example
//! ```rust,ignore
//! use oav_core::{MonitorConfig, TimerQueue, check_viewability};
//!
//! let mut timers = TimerQueue::new();
//! let mut monitor = check_viewability(&mut timers, ad, MonitorConfig::default(), |status| {
//!     println!("{}% viewable", status.state.percent_viewable);
//! });
//! monitor.drive(&page, &mut timers, std::time::Duration::from_secs(1));
//! ```

mod calculator;
mod config;
mod css;
mod error;
mod frame_chain;
mod host;
mod monitor;
mod occlusion;
mod rect;
mod state;
#[cfg(test)]
mod testing;
mod timers;
mod viewport;

pub use calculator::{GeometryReport, GeometryViewabilityCalculator};
pub use config::MonitorConfig;
pub use css::{CssInvisibility, css_invisibility, is_css_invisible};
pub use error::ViewabilityError;
pub use frame_chain::{
    FrameChain, FrameGeometry, min_viewport_across_chain, position_relative_to_viewport,
    visible_dimension,
};
pub use host::{Host, HostError};
pub use monitor::{ViewabilityMonitor, check_viewability};
pub use occlusion::{OcclusionDetector, SamplePoint, sample_points};
pub use rect::{Rect, overlap_fraction};
pub use state::{MonitorPhase, ViewabilityStatus, VisibilityCheckState};
pub use timers::{Scheduler, TimerId, TimerQueue};
pub use viewport::{ClientSize, ViewportSize, resolve_viewport_size, viewport_size_of};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
