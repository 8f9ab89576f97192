//! Per-session check state and the snapshots handed to callers

use serde::{Serialize, Serializer};

use crate::error::ViewabilityError;

/// Mutable state of one monitoring session.
///
/// Owned by a single [`ViewabilityMonitor`](crate::ViewabilityMonitor) and
/// passed by reference into the checks that write to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityCheckState {
    pub percent_obscured: f64,
    pub percent_viewable: f64,
    pub accepted_viewable_percentage: f64,
    pub viewability_status: bool,
    /// Milliseconds of uninterrupted passing samples.
    pub duration: u64,
    pub consecutive_pass_count: u32,
}

impl VisibilityCheckState {
    pub fn new(accepted_viewable_percentage: f64) -> Self {
        Self {
            percent_obscured: 0.0,
            percent_viewable: 0.0,
            accepted_viewable_percentage,
            viewability_status: false,
            duration: 0,
            consecutive_pass_count: 0,
        }
    }
}

impl Default for VisibilityCheckState {
    fn default() -> Self {
        Self::new(50.0)
    }
}

/// Lifecycle of a monitoring session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorPhase {
    /// Not started
    #[default]
    Idle,
    /// Polling, no verdict yet
    Sampling,
    /// Verdict reached. Terminal unless in debug mode.
    Viewable,
    /// A permanent measurement error ended the session.
    Failed,
    /// Cancelled by the caller.
    Stopped,
}

impl MonitorPhase {
    /// Whether no further ticks will be processed
    pub fn is_terminal(&self) -> bool {
        matches!(self, MonitorPhase::Failed | MonitorPhase::Stopped)
    }
}

/// Owned snapshot passed to the status callback on every tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewabilityStatus {
    /// 1-based tick number
    pub tick: u64,
    pub phase: MonitorPhase,
    #[serde(flatten)]
    pub state: VisibilityCheckState,
    /// Error of this tick's sample, if any
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<ViewabilityError>,
}

fn serialize_error<S: Serializer>(error: &Option<ViewabilityError>, serializer: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => serializer.serialize_some(&error.to_string()),
        None => serializer.serialize_none(),
    }
}
