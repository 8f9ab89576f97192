//! Page - arena of windows and elements

use oav_core::{ClientSize, Host, HostError, Rect};

use crate::element::{Display, Element, Visibility};
use crate::window::Window;
use crate::{DomError, ElementId, WindowId};

/// A top window and every window nested inside it
#[derive(Debug, Default)]
pub struct Page {
    windows: Vec<Window>,
    /// Paint order: later elements are drawn above earlier ones.
    elements: Vec<Element>,
}

impl Page {
    /// Create an empty page
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            elements: Vec::with_capacity(64),
        }
    }

    /// Add a top-level window whose viewport is `width` x `height`
    pub fn add_top_window(&mut self, width: f64, height: f64) -> WindowId {
        self.push_window(Window::sized(None, width, height))
    }

    /// Add a window nested in `parent`, not yet attached to a frame element
    pub fn add_child_window(&mut self, parent: WindowId, width: f64, height: f64) -> Result<WindowId, DomError> {
        self.window(parent)?;
        Ok(self.push_window(Window::sized(Some(parent), width, height)))
    }

    /// Add a window hosted by `frame`, sized like the frame's box
    pub fn add_frame_window(&mut self, frame: ElementId) -> Result<WindowId, DomError> {
        let (parent, rect) = {
            let element = self.element(frame)?;
            (element.window, element.rect)
        };
        let window = self.add_child_window(parent, rect.width, rect.height)?;
        self.attach_frame(window, frame)?;
        Ok(window)
    }

    /// Make `frame` the element hosting `window`
    pub fn attach_frame(&mut self, window: WindowId, frame: ElementId) -> Result<(), DomError> {
        let parent = self.window(window)?.parent.ok_or(DomError::TopWindowFrame)?;
        let element = self.element(frame)?;
        if element.window != parent {
            return Err(DomError::FrameNotInParent { window });
        }
        if element.content_window.is_some() {
            return Err(DomError::FrameAlreadyHosted(frame));
        }
        self.elements[frame.index()].content_window = Some(window);
        self.windows[window.index()].frame_element = Some(frame);
        Ok(())
    }

    /// Add an element to `window`'s document
    pub fn add_element(
        &mut self,
        window: WindowId,
        parent: Option<ElementId>,
        rect: Rect,
    ) -> Result<ElementId, DomError> {
        self.window(window)?;
        let id = ElementId(self.elements.len() as u32);
        if let Some(parent) = parent {
            if self.element(parent)?.window != window {
                return Err(DomError::ParentInOtherWindow { child: id, parent });
            }
        }
        self.elements.push(Element::new(window, parent, rect));
        Ok(id)
    }

    /// Get a window by ID
    pub fn window(&self, id: WindowId) -> Result<&Window, DomError> {
        self.windows.get(id.index()).ok_or(DomError::UnknownWindow(id))
    }

    /// Get a mutable window by ID
    pub fn window_mut(&mut self, id: WindowId) -> Result<&mut Window, DomError> {
        self.windows.get_mut(id.index()).ok_or(DomError::UnknownWindow(id))
    }

    /// Get an element by ID
    pub fn element(&self, id: ElementId) -> Result<&Element, DomError> {
        self.elements.get(id.index()).ok_or(DomError::UnknownElement(id))
    }

    /// Get a mutable element by ID
    pub fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, DomError> {
        self.elements.get_mut(id.index()).ok_or(DomError::UnknownElement(id))
    }

    /// Elements in paint order, bottom first
    pub fn elements(&self) -> impl DoubleEndedIterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (ElementId(i as u32), e))
    }

    /// Number of windows
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Number of elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Move an element's box
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) -> Result<(), DomError> {
        self.element_mut(id)?.rect = rect;
        Ok(())
    }

    pub fn set_display(&mut self, id: ElementId, display: Display) -> Result<(), DomError> {
        self.element_mut(id)?.display = display;
        Ok(())
    }

    /// Set an explicit visibility, or `None` to inherit
    pub fn set_visibility(&mut self, id: ElementId, visibility: Option<Visibility>) -> Result<(), DomError> {
        self.element_mut(id)?.visibility = visibility;
        Ok(())
    }

    pub fn set_cross_origin(&mut self, id: WindowId, cross_origin: bool) -> Result<(), DomError> {
        self.window_mut(id)?.cross_origin = cross_origin;
        Ok(())
    }

    /// Replace the three viewport size sources of a window
    pub fn set_viewport_sources(
        &mut self,
        id: WindowId,
        body: ClientSize,
        root: Option<ClientSize>,
        inner: ClientSize,
    ) -> Result<(), DomError> {
        let window = self.window_mut(id)?;
        window.body = body;
        window.root = root;
        window.inner = inner;
        Ok(())
    }

    /// Scroll a document: every box in `window` moves by `(-dx, -dy)`.
    pub fn scroll_by(&mut self, window: WindowId, dx: f64, dy: f64) -> Result<(), DomError> {
        self.window(window)?;
        let mut moved = 0;
        for element in self.elements.iter_mut().filter(|e| e.window == window) {
            element.rect = element.rect.translate(-dx, -dy);
            moved += 1;
        }
        tracing::debug!("Scrolled {:?} by ({}, {}), {} boxes moved", window, dx, dy, moved);
        Ok(())
    }

    /// Resolved `visibility`: nearest explicit value up the ancestors
    pub fn computed_visibility(&self, id: ElementId) -> Visibility {
        let mut current = Some(id);
        while let Some(element) = current.and_then(|id| self.elements.get(id.index())) {
            if let Some(visibility) = element.visibility {
                return visibility;
            }
            current = element.parent;
        }
        Visibility::Visible
    }

    /// Whether the element or an ancestor has `display: none`
    pub fn is_display_none(&self, id: ElementId) -> bool {
        self.ancestors_inclusive(id)
            .any(|e| self.elements.get(e.index()).is_some_and(|e| e.display == Display::None))
    }

    /// Whether the element produces visible pixels
    pub fn is_rendered(&self, id: ElementId) -> bool {
        !self.is_display_none(id) && self.computed_visibility(id) == Visibility::Visible
    }

    /// `id` and its ancestors, nearest first
    pub fn ancestors_inclusive(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(Some(id), move |e| {
            self.elements.get(e.index()).and_then(|e| e.parent)
        })
    }

    fn push_window(&mut self, window: Window) -> WindowId {
        let id = WindowId(self.windows.len() as u32);
        self.windows.push(window);
        id
    }
}

impl Host for Page {
    type Element = ElementId;
    type Window = WindowId;

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.element(element).map(|e| e.rect).unwrap_or_default()
    }

    fn computed_style(&self, element: ElementId, property: &str) -> Option<String> {
        let node = self.element(element).ok()?;
        match property {
            "display" => Some(node.display.as_str().to_string()),
            "visibility" => Some(self.computed_visibility(element).as_str().to_string()),
            _ => None,
        }
    }

    fn element_from_point(&self, window: WindowId, x: f64, y: f64) -> Option<ElementId> {
        self.hit_test(window, x, y)
    }

    fn contains(&self, ancestor: ElementId, candidate: ElementId) -> bool {
        self.ancestors_inclusive(candidate).any(|e| e == ancestor)
    }

    fn owner_window(&self, element: ElementId) -> WindowId {
        self.element(element).map(|e| e.window).unwrap_or(WindowId(0))
    }

    fn body_client_size(&self, window: WindowId) -> ClientSize {
        self.window(window).map(|w| w.body).unwrap_or_default()
    }

    fn root_client_size(&self, window: WindowId) -> Option<ClientSize> {
        self.window(window).ok().and_then(|w| w.root)
    }

    fn inner_size(&self, window: WindowId) -> ClientSize {
        self.window(window).map(|w| w.inner).unwrap_or_default()
    }

    fn parent_window(&self, window: WindowId) -> WindowId {
        self.window(window).ok().and_then(|w| w.parent).unwrap_or(window)
    }

    fn top_window(&self, window: WindowId) -> WindowId {
        let mut current = window;
        // Bounded by the arena size so a malformed cycle cannot spin forever.
        for _ in 0..self.windows.len() {
            match self.window(current).ok().and_then(|w| w.parent) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    fn frame_element(&self, window: WindowId) -> Result<ElementId, HostError> {
        let window = self.window(window).map_err(|_| HostError::NoFrameElement)?;
        if window.cross_origin {
            return Err(HostError::CrossOriginDenied);
        }
        window.frame_element.ok_or(HostError::NoFrameElement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_inherits() {
        let mut page = Page::new();
        let top = page.add_top_window(800.0, 600.0);
        let parent = page.add_element(top, None, Rect::from_xywh(0.0, 0.0, 100.0, 100.0)).unwrap();
        let child = page.add_element(top, Some(parent), Rect::from_xywh(0.0, 0.0, 50.0, 50.0)).unwrap();

        page.set_visibility(parent, Some(Visibility::Hidden)).unwrap();
        assert_eq!(page.computed_visibility(child), Visibility::Hidden);

        page.set_visibility(child, Some(Visibility::Visible)).unwrap();
        assert_eq!(page.computed_visibility(child), Visibility::Visible);
    }

    #[test]
    fn test_display_not_inherited_but_not_rendered() {
        let mut page = Page::new();
        let top = page.add_top_window(800.0, 600.0);
        let parent = page.add_element(top, None, Rect::from_xywh(0.0, 0.0, 100.0, 100.0)).unwrap();
        let child = page.add_element(top, Some(parent), Rect::from_xywh(0.0, 0.0, 50.0, 50.0)).unwrap();
        page.set_display(parent, Display::None).unwrap();

        assert_eq!(page.computed_style(child, "display").as_deref(), Some("block"));
        assert!(!page.is_rendered(child));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let mut page = Page::new();
        let top = page.add_top_window(800.0, 600.0);
        let a = page.add_element(top, None, Rect::default()).unwrap();
        let b = page.add_element(top, Some(a), Rect::default()).unwrap();
        assert!(page.contains(a, a));
        assert!(page.contains(a, b));
        assert!(!page.contains(b, a));
    }

    #[test]
    fn test_frame_window_chain() {
        let mut page = Page::new();
        let top = page.add_top_window(800.0, 600.0);
        let iframe = page.add_element(top, None, Rect::from_xywh(10.0, 10.0, 300.0, 250.0)).unwrap();
        let inner = page.add_frame_window(iframe).unwrap();

        assert_eq!(page.parent_window(inner), top);
        assert_eq!(page.parent_window(top), top);
        assert_eq!(page.top_window(inner), top);
        assert_eq!(page.frame_element(inner), Ok(iframe));
        assert_eq!(page.inner_size(inner), ClientSize::new(300.0, 250.0));
    }

    #[test]
    fn test_cross_origin_frame_denied() {
        let mut page = Page::new();
        let top = page.add_top_window(800.0, 600.0);
        let iframe = page.add_element(top, None, Rect::from_xywh(0.0, 0.0, 300.0, 250.0)).unwrap();
        let inner = page.add_frame_window(iframe).unwrap();
        page.set_cross_origin(inner, true).unwrap();
        assert_eq!(page.frame_element(inner), Err(HostError::CrossOriginDenied));
    }

    #[test]
    fn test_frame_must_live_in_parent() {
        let mut page = Page::new();
        let top = page.add_top_window(800.0, 600.0);
        let child = page.add_child_window(top, 100.0, 100.0).unwrap();
        let stray = page.add_element(child, None, Rect::default()).unwrap();
        assert_eq!(
            page.attach_frame(child, stray),
            Err(DomError::FrameNotInParent { window: child })
        );
        assert_eq!(page.attach_frame(top, stray), Err(DomError::TopWindowFrame));
    }

    #[test]
    fn test_scroll_moves_only_that_window() {
        let mut page = Page::new();
        let top = page.add_top_window(800.0, 600.0);
        let iframe = page.add_element(top, None, Rect::from_xywh(0.0, 0.0, 300.0, 250.0)).unwrap();
        let inner = page.add_frame_window(iframe).unwrap();
        let ad = page.add_element(inner, None, Rect::from_xywh(0.0, 100.0, 50.0, 50.0)).unwrap();

        page.scroll_by(top, 0.0, 40.0).unwrap();
        assert_eq!(page.bounding_rect(iframe).top, -40.0);
        assert_eq!(page.bounding_rect(ad).top, 100.0);
    }
}
