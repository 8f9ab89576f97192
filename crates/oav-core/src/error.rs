//! Measurement errors

use crate::host::HostError;

/// Error produced while measuring a single sample.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewabilityError {
    /// No level of the frame chain reported a finite viewport size.
    #[error("Failed to determine viewport")]
    UnresolvedViewport,

    /// The host refused access to the frame hosting the window at `depth`.
    #[error("Cross-origin access denied to frame at depth {depth}")]
    CrossOrigin { depth: usize },

    /// A non-top window at `depth` has no hosting frame element.
    #[error("Window at depth {depth} has no frame element")]
    MissingFrameElement { depth: usize },

    /// A window at `depth` is its own parent but is not the top window.
    #[error("Window at depth {depth} is detached from the top window")]
    DetachedWindow { depth: usize },

    /// The ancestor chain is longer than the configured limit.
    #[error("Frame chain exceeds {limit} levels")]
    FrameChainTooDeep { limit: usize },
}

impl ViewabilityError {
    /// Whether retrying on the next tick can never succeed.
    ///
    /// An unresolved viewport is usually a zero-size state during page
    /// load and clears on its own; everything else describes the page
    /// structure and will not change between ticks.
    pub fn is_permanent(&self) -> bool {
        !matches!(self, ViewabilityError::UnresolvedViewport)
    }

    pub(crate) fn from_host(error: HostError, depth: usize) -> Self {
        match error {
            HostError::CrossOriginDenied => ViewabilityError::CrossOrigin { depth },
            HostError::NoFrameElement => ViewabilityError::MissingFrameElement { depth },
        }
    }
}
