//! Minimal host for unit tests
//!
//! Elements all live in window 0. Windows are plain indices with an
//! explicit parent table, so malformed chains can be built on purpose.

use crate::host::{Host, HostError};
use crate::rect::Rect;
use crate::viewport::ClientSize;

pub(crate) struct StubHost {
    pub rects: Vec<Rect>,
    pub viewport: ClientSize,
    /// Parent of each window
    pub parents: Vec<u32>,
    /// Reported top window
    pub top: u32,
}

impl StubHost {
    /// One 1000x800 top window holding the given elements
    pub fn single_window(rects: Vec<Rect>) -> Self {
        Self {
            rects,
            viewport: ClientSize::new(1000.0, 800.0),
            parents: vec![0],
            top: 0,
        }
    }
}

impl Host for StubHost {
    type Element = u32;
    type Window = u32;

    fn bounding_rect(&self, element: u32) -> Rect {
        self.rects.get(element as usize).copied().unwrap_or_default()
    }

    fn computed_style(&self, _element: u32, _property: &str) -> Option<String> {
        None
    }

    fn element_from_point(&self, _window: u32, _x: f64, _y: f64) -> Option<u32> {
        None
    }

    fn contains(&self, ancestor: u32, candidate: u32) -> bool {
        ancestor == candidate
    }

    fn owner_window(&self, _element: u32) -> u32 {
        0
    }

    fn body_client_size(&self, _window: u32) -> ClientSize {
        self.viewport
    }

    fn root_client_size(&self, _window: u32) -> Option<ClientSize> {
        None
    }

    fn inner_size(&self, _window: u32) -> ClientSize {
        self.viewport
    }

    fn parent_window(&self, window: u32) -> u32 {
        self.parents.get(window as usize).copied().unwrap_or(window)
    }

    fn top_window(&self, _window: u32) -> u32 {
        self.top
    }

    fn frame_element(&self, _window: u32) -> Result<u32, HostError> {
        Err(HostError::NoFrameElement)
    }
}
