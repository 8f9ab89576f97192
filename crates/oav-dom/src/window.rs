//! Windows (top level and framed)

use oav_core::ClientSize;

use crate::{ElementId, WindowId};

/// Browsing context with its document's viewport sources
#[derive(Debug, Clone)]
pub struct Window {
    /// Parent window, `None` for the top window
    pub parent: Option<WindowId>,
    /// Frame element hosting this window in the parent document
    pub frame_element: Option<ElementId>,
    /// Origin differs from the parent's
    pub cross_origin: bool,
    /// `document.body` client size
    pub body: ClientSize,
    /// `document.documentElement` client size, `None` without a root element
    pub root: Option<ClientSize>,
    /// `innerWidth` / `innerHeight`
    pub inner: ClientSize,
}

impl Window {
    /// Window whose sources all report `width` x `height`
    pub fn sized(parent: Option<WindowId>, width: f64, height: f64) -> Self {
        let size = ClientSize::new(width, height);
        Self {
            parent,
            frame_element: None,
            cross_origin: false,
            body: size,
            root: Some(size),
            inner: size,
        }
    }

    /// Is this the top window?
    pub fn is_top(&self) -> bool {
        self.parent.is_none()
    }
}
