//! Scene descriptions
//!
//! A serializable page layout with named windows and elements, plus the
//! scripted mutations applied while a session runs.

use std::collections::HashMap;

use oav_core::{ClientSize, Rect};
use serde::Deserialize;

use crate::element::{Display, Visibility};
use crate::page::Page;
use crate::{DomError, ElementId, WindowId};

/// Box position and size
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoxSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<BoxSpec> for Rect {
    fn from(b: BoxSpec) -> Self {
        Rect::from_xywh(b.x, b.y, b.width, b.height)
    }
}

/// Window description. Parents must be listed before their children.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowSpec {
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
    /// Element of the parent window hosting this one
    #[serde(default)]
    pub frame: Option<String>,
    #[serde(default)]
    pub cross_origin: bool,
    #[serde(default)]
    pub body: ClientSize,
    #[serde(default)]
    pub root: Option<ClientSize>,
    #[serde(default)]
    pub inner: ClientSize,
}

/// Element description, in paint order. Parents must come first.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementSpec {
    pub id: String,
    pub window: String,
    #[serde(default)]
    pub parent: Option<String>,
    pub rect: BoxSpec,
    #[serde(default)]
    pub display: Display,
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

/// Whole page description
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    pub windows: Vec<WindowSpec>,
    pub elements: Vec<ElementSpec>,
}

/// A change applied to a loaded page
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Mutation {
    /// Move or resize an element
    Move { element: String, rect: BoxSpec },
    /// Scroll a window's document
    Scroll { window: String, dx: f64, dy: f64 },
    /// Change an element's style; absent fields are left alone
    Style {
        element: String,
        #[serde(default)]
        display: Option<Display>,
        #[serde(default)]
        visibility: Option<Visibility>,
    },
    /// Resize a window's viewport (all three sources)
    Resize { window: String, width: f64, height: f64 },
}

/// Mutation scheduled before a given tick
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEntry {
    /// Applied right before this 1-based tick is sampled
    pub at_tick: u64,
    #[serde(flatten)]
    pub mutation: Mutation,
}

/// Page built from a [`Scene`] with its name table
#[derive(Debug)]
pub struct LoadedScene {
    pub page: Page,
    windows: HashMap<String, WindowId>,
    elements: HashMap<String, ElementId>,
}

impl LoadedScene {
    /// Look up a window by name
    pub fn window(&self, name: &str) -> Result<WindowId, DomError> {
        self.windows
            .get(name)
            .copied()
            .ok_or_else(|| DomError::UnknownName(name.to_string()))
    }

    /// Look up an element by name
    pub fn element(&self, name: &str) -> Result<ElementId, DomError> {
        self.elements
            .get(name)
            .copied()
            .ok_or_else(|| DomError::UnknownName(name.to_string()))
    }

    /// Apply a scripted mutation
    pub fn apply(&mut self, mutation: &Mutation) -> Result<(), DomError> {
        tracing::debug!("Applying {:?}", mutation);
        match mutation {
            Mutation::Move { element, rect } => {
                let id = self.element(element)?;
                self.page.set_rect(id, (*rect).into())
            }
            Mutation::Scroll { window, dx, dy } => {
                let id = self.window(window)?;
                self.page.scroll_by(id, *dx, *dy)
            }
            Mutation::Style {
                element,
                display,
                visibility,
            } => {
                let id = self.element(element)?;
                if let Some(display) = display {
                    self.page.set_display(id, *display)?;
                }
                if let Some(visibility) = visibility {
                    self.page.set_visibility(id, Some(*visibility))?;
                }
                Ok(())
            }
            Mutation::Resize { window, width, height } => {
                let id = self.window(window)?;
                let size = ClientSize::new(*width, *height);
                self.page.set_viewport_sources(id, size, Some(size), size)
            }
        }
    }
}

impl Page {
    /// Build a page from a scene description
    pub fn from_scene(scene: &Scene) -> Result<LoadedScene, DomError> {
        let mut page = Page::new();
        let mut windows = HashMap::new();
        let mut elements = HashMap::new();

        for spec in &scene.windows {
            if windows.contains_key(&spec.id) {
                return Err(DomError::DuplicateName(spec.id.clone()));
            }
            let id = match &spec.parent {
                None => page.add_top_window(0.0, 0.0),
                Some(parent) => {
                    let parent = *windows
                        .get(parent)
                        .ok_or_else(|| DomError::UnknownName(parent.clone()))?;
                    page.add_child_window(parent, 0.0, 0.0)?
                }
            };
            let window = page.window_mut(id)?;
            window.cross_origin = spec.cross_origin;
            window.body = spec.body;
            window.root = spec.root;
            window.inner = spec.inner;
            windows.insert(spec.id.clone(), id);
        }

        for spec in &scene.elements {
            if elements.contains_key(&spec.id) {
                return Err(DomError::DuplicateName(spec.id.clone()));
            }
            let window = *windows
                .get(&spec.window)
                .ok_or_else(|| DomError::UnknownName(spec.window.clone()))?;
            let parent = match &spec.parent {
                Some(name) => Some(
                    *elements
                        .get(name)
                        .ok_or_else(|| DomError::UnknownName(name.clone()))?,
                ),
                None => None,
            };
            let id = page.add_element(window, parent, spec.rect.into())?;
            page.set_display(id, spec.display)?;
            page.set_visibility(id, spec.visibility)?;
            elements.insert(spec.id.clone(), id);
        }

        for spec in &scene.windows {
            if let Some(frame) = &spec.frame {
                let frame = *elements
                    .get(frame)
                    .ok_or_else(|| DomError::UnknownName(frame.clone()))?;
                page.attach_frame(windows[&spec.id], frame)?;
            }
        }

        tracing::debug!(
            "Loaded scene: {} windows, {} elements",
            page.window_count(),
            page.element_count()
        );

        Ok(LoadedScene {
            page,
            windows,
            elements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oav_core::Host;

    const SCENE: &str = r#"{
        "windows": [
            { "id": "top", "inner": { "width": 1024, "height": 768 } },
            { "id": "frame", "parent": "top", "frame": "iframe",
              "inner": { "width": 300, "height": 250 } }
        ],
        "elements": [
            { "id": "iframe", "window": "top", "rect": { "x": 20, "y": 40, "width": 300, "height": 250 } },
            { "id": "ad", "window": "frame", "rect": { "x": 0, "y": 0, "width": 300, "height": 250 },
              "visibility": "visible" }
        ]
    }"#;

    #[test]
    fn test_load_scene() {
        let scene: Scene = serde_json::from_str(SCENE).unwrap();
        let loaded = Page::from_scene(&scene).unwrap();
        let top = loaded.window("top").unwrap();
        let frame = loaded.window("frame").unwrap();
        let iframe = loaded.element("iframe").unwrap();

        assert_eq!(loaded.page.parent_window(frame), top);
        assert_eq!(loaded.page.frame_element(frame), Ok(iframe));
        assert_eq!(loaded.page.root_client_size(top), None);
        assert!(loaded.element("missing").is_err());
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let scene: Scene = serde_json::from_str(
            r#"{ "windows": [{ "id": "child", "parent": "nowhere" }], "elements": [] }"#,
        )
        .unwrap();
        assert_eq!(
            Page::from_scene(&scene).unwrap_err(),
            DomError::UnknownName("nowhere".to_string())
        );
    }

    #[test]
    fn test_duplicate_element_rejected() {
        let scene: Scene = serde_json::from_str(
            r#"{
                "windows": [{ "id": "top" }],
                "elements": [
                    { "id": "a", "window": "top", "rect": { "x": 0, "y": 0, "width": 1, "height": 1 } },
                    { "id": "a", "window": "top", "rect": { "x": 0, "y": 0, "width": 1, "height": 1 } }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            Page::from_scene(&scene).unwrap_err(),
            DomError::DuplicateName("a".to_string())
        );
    }

    #[test]
    fn test_timeline_mutations() {
        let scene: Scene = serde_json::from_str(SCENE).unwrap();
        let mut loaded = Page::from_scene(&scene).unwrap();
        let timeline: Vec<TimelineEntry> = serde_json::from_str(
            r#"[
                { "at_tick": 3, "action": "scroll", "window": "top", "dx": 0, "dy": 100 },
                { "at_tick": 5, "action": "style", "element": "ad", "display": "none" }
            ]"#,
        )
        .unwrap();

        for entry in &timeline {
            loaded.apply(&entry.mutation).unwrap();
        }
        let iframe = loaded.element("iframe").unwrap();
        let ad = loaded.element("ad").unwrap();
        assert_eq!(loaded.page.bounding_rect(iframe).top, -60.0);
        assert_eq!(loaded.page.computed_style(ad, "display").as_deref(), Some("none"));
    }
}
