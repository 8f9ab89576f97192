//! OAV DOM - In-memory page model
//!
//! Arena-allocated windows and elements with just enough layout, style and
//! hit testing to stand in for a browser behind [`oav_core::Host`].

mod element;
mod hit_test;
mod page;
mod scene;
mod window;

pub use element::{Display, Element, Visibility};
pub use page::Page;
pub use scene::{BoxSpec, ElementSpec, LoadedScene, Mutation, Scene, TimelineEntry, WindowSpec};
pub use window::Window;

/// Window identifier (index into the page's window arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub(crate) u32);

impl WindowId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Element identifier (index into the page's element arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Page construction error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Unknown window {0:?}")]
    UnknownWindow(WindowId),

    #[error("Unknown element {0:?}")]
    UnknownElement(ElementId),

    #[error("Element {child:?} and its parent {parent:?} live in different windows")]
    ParentInOtherWindow { child: ElementId, parent: ElementId },

    #[error("Frame element {0:?} already hosts a window")]
    FrameAlreadyHosted(ElementId),

    #[error("Frame element of {window:?} must live in its parent window")]
    FrameNotInParent { window: WindowId },

    #[error("Top window has no frame element")]
    TopWindowFrame,

    #[error("Unknown name '{0}' in scene")]
    UnknownName(String),

    #[error("Duplicate name '{0}' in scene")]
    DuplicateName(String),
}
