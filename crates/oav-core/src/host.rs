//! Host environment interface
//!
//! Everything the engine needs to know about a page is asked through
//! [`Host`]. A browser binding, a headless layout engine or the in-memory
//! page model used in tests can all stand behind it.

use std::fmt::Debug;

use crate::rect::Rect;
use crate::viewport::ClientSize;

/// Failure to reach across a frame boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The host denies access to the frame (different origin).
    #[error("cross-origin access denied")]
    CrossOriginDenied,

    /// The window is not the top window but has no hosting frame.
    #[error("window has no frame element")]
    NoFrameElement,
}

/// Read-only view of a page made of nested windows.
///
/// All queries are synchronous and side-effect free.
pub trait Host {
    /// Element handle. Compared by identity.
    type Element: Copy + Eq + Debug;
    /// Window handle. Compared by identity.
    type Window: Copy + Eq + Debug;

    /// Bounding rectangle of `element` in its own window's coordinates.
    fn bounding_rect(&self, element: Self::Element) -> Rect;

    /// Resolved computed value of a CSS property, if the host knows it.
    fn computed_style(&self, element: Self::Element, property: &str) -> Option<String>;

    /// Topmost rendered element at a point of `window`'s document.
    fn element_from_point(&self, window: Self::Window, x: f64, y: f64) -> Option<Self::Element>;

    /// Inclusive containment, like `Node.contains`.
    fn contains(&self, ancestor: Self::Element, candidate: Self::Element) -> bool;

    /// Window whose document owns `element`.
    fn owner_window(&self, element: Self::Element) -> Self::Window;

    /// `document.body.clientWidth/Height`.
    fn body_client_size(&self, window: Self::Window) -> ClientSize;

    /// `document.documentElement.clientWidth/Height`, `None` without a root element.
    fn root_client_size(&self, window: Self::Window) -> Option<ClientSize>;

    /// `window.innerWidth/Height`.
    fn inner_size(&self, window: Self::Window) -> ClientSize;

    /// Parent window. The top window is its own parent.
    fn parent_window(&self, window: Self::Window) -> Self::Window;

    /// Top-level window of the chain containing `window`.
    fn top_window(&self, window: Self::Window) -> Self::Window;

    /// Frame element hosting `window` inside its parent's document.
    fn frame_element(&self, window: Self::Window) -> Result<Self::Element, HostError>;
}
