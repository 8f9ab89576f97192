//! Viewport size resolution
//!
//! A window's viewport is narrowed from three host-reported sources:
//! body client size, root element client size and inner size.

use serde::{Deserialize, Serialize};

use crate::host::Host;

/// A pair of host-reported dimensions. Missing values are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientSize {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

impl ClientSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }
}

/// Resolved viewport of one window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
    pub area: f64,
}

impl ViewportSize {
    /// Starting point before any source is applied
    pub const UNRESOLVED: ViewportSize = ViewportSize {
        width: f64::INFINITY,
        height: f64::INFINITY,
        area: f64::INFINITY,
    };

    /// A viewport is resolved once its area is finite.
    pub fn is_resolved(&self) -> bool {
        self.area.is_finite()
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::UNRESOLVED
    }
}

/// Combine the three size sources of a window.
///
/// Precedence:
/// 1. body client size, when positive;
/// 2. root element client size, when nonzero, overwrites the body value
///    instead of taking the minimum with it;
/// 3. inner size, when nonzero, can only shrink the candidate.
///
/// Any `NaN` source is ignored.
pub fn resolve_viewport_size(
    body: ClientSize,
    root: Option<ClientSize>,
    inner: ClientSize,
) -> ViewportSize {
    let mut size = ViewportSize::UNRESOLVED;

    if let Some(width) = body.width.filter(|w| !w.is_nan() && *w > 0.0) {
        size.width = width;
    }
    if let Some(height) = body.height.filter(|h| !h.is_nan() && *h > 0.0) {
        size.height = height;
    }

    if let Some(root) = root {
        if let Some(width) = root.width.filter(|w| is_usable(*w)) {
            size.width = width;
        }
        if let Some(height) = root.height.filter(|h| is_usable(*h)) {
            size.height = height;
        }
    }

    if let Some(width) = inner.width.filter(|w| is_usable(*w)) {
        size.width = size.width.min(width);
    }
    if let Some(height) = inner.height.filter(|h| is_usable(*h)) {
        size.height = size.height.min(height);
    }

    size.area = size.width * size.height;
    size
}

/// Resolve the viewport of `window` from the host's size sources.
pub fn viewport_size_of<H: Host>(host: &H, window: H::Window) -> ViewportSize {
    let size = resolve_viewport_size(
        host.body_client_size(window),
        host.root_client_size(window),
        host.inner_size(window),
    );
    tracing::trace!(
        "Viewport of {:?}: {}x{} (area {})",
        window,
        size.width,
        size.height,
        size.area
    );
    size
}

fn is_usable(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_sources_is_unresolved() {
        let size = resolve_viewport_size(ClientSize::default(), None, ClientSize::default());
        assert!(!size.is_resolved());
        assert_eq!(size.area, f64::INFINITY);
    }

    #[test]
    fn test_body_only() {
        let size = resolve_viewport_size(ClientSize::new(800.0, 600.0), None, ClientSize::default());
        assert_eq!(size.width, 800.0);
        assert_eq!(size.height, 600.0);
        assert_eq!(size.area, 480_000.0);
    }

    #[test]
    fn test_inner_shrinks() {
        let size = resolve_viewport_size(
            ClientSize::new(1024.0, 2000.0),
            None,
            ClientSize::new(1000.0, 700.0),
        );
        assert_eq!(size.width, 1000.0);
        assert_eq!(size.height, 700.0);
    }

    #[test]
    fn test_inner_never_grows() {
        let size = resolve_viewport_size(
            ClientSize::new(300.0, 200.0),
            None,
            ClientSize::new(1000.0, 700.0),
        );
        assert_eq!(size.width, 300.0);
        assert_eq!(size.height, 200.0);
    }

    #[test]
    fn test_root_overwrites_body_even_when_larger() {
        // The root source replaces the body value outright; it is not a minimum.
        let size = resolve_viewport_size(
            ClientSize::new(300.0, 200.0),
            Some(ClientSize::new(900.0, 650.0)),
            ClientSize::default(),
        );
        assert_eq!(size.width, 900.0);
        assert_eq!(size.height, 650.0);
    }

    #[test]
    fn test_zero_and_nan_sources_ignored() {
        let size = resolve_viewport_size(
            ClientSize::new(0.0, f64::NAN),
            Some(ClientSize::new(0.0, 0.0)),
            ClientSize {
                width: Some(640.0),
                height: None,
            },
        );
        assert_eq!(size.width, 640.0);
        assert_eq!(size.height, f64::INFINITY);
        assert!(!size.is_resolved());
    }
}
