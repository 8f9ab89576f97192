//! Elements and their style

use oav_core::Rect;
use serde::Deserialize;

use crate::{ElementId, WindowId};

/// `display` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    #[default]
    Block,
    Inline,
    InlineBlock,
    None,
}

impl Display {
    pub fn as_str(&self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::Inline => "inline",
            Display::InlineBlock => "inline-block",
            Display::None => "none",
        }
    }
}

/// `visibility` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    Collapse,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
            Visibility::Collapse => "collapse",
        }
    }
}

/// Element node
#[derive(Debug, Clone)]
pub struct Element {
    /// Window whose document owns the element
    pub window: WindowId,
    /// Parent element in the same document
    pub parent: Option<ElementId>,
    /// Border box in the owner window's coordinates
    pub rect: Rect,
    pub display: Display,
    /// Explicit value; `None` inherits from the parent
    pub visibility: Option<Visibility>,
    /// Window hosted by this element, for frames
    pub content_window: Option<WindowId>,
}

impl Element {
    pub(crate) fn new(window: WindowId, parent: Option<ElementId>, rect: Rect) -> Self {
        Self {
            window,
            parent,
            rect,
            display: Display::default(),
            visibility: None,
            content_window: None,
        }
    }
}
