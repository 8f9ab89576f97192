//! Hit testing (`document.elementFromPoint`)

use crate::page::Page;
use crate::{ElementId, WindowId};

impl Page {
    /// Topmost rendered element of `window` containing the point.
    ///
    /// Paint order is insertion order, so the scan runs back to front.
    pub fn hit_test(&self, window: WindowId, x: f64, y: f64) -> Option<ElementId> {
        self.elements()
            .rev()
            .filter(|(_, e)| e.window == window && e.rect.contains_point(x, y))
            .map(|(id, _)| id)
            .find(|&id| self.is_rendered(id))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Display, Page, Visibility};
    use oav_core::Rect;

    #[test]
    fn test_hit_test_topmost() {
        let mut page = Page::new();
        let top = page.add_top_window(800.0, 600.0);
        let below = page.add_element(top, None, Rect::from_xywh(0.0, 0.0, 200.0, 200.0)).unwrap();
        let above = page.add_element(top, None, Rect::from_xywh(100.0, 100.0, 200.0, 200.0)).unwrap();

        assert_eq!(page.hit_test(top, 50.0, 50.0), Some(below));
        assert_eq!(page.hit_test(top, 150.0, 150.0), Some(above));
        assert_eq!(page.hit_test(top, 700.0, 500.0), None);
    }

    #[test]
    fn test_hit_test_skips_unrendered() {
        let mut page = Page::new();
        let top = page.add_top_window(800.0, 600.0);
        let below = page.add_element(top, None, Rect::from_xywh(0.0, 0.0, 200.0, 200.0)).unwrap();
        let hidden = page.add_element(top, None, Rect::from_xywh(0.0, 0.0, 200.0, 200.0)).unwrap();
        page.set_visibility(hidden, Some(Visibility::Hidden)).unwrap();
        assert_eq!(page.hit_test(top, 10.0, 10.0), Some(below));

        page.set_visibility(hidden, None).unwrap();
        page.set_display(hidden, Display::None).unwrap();
        assert_eq!(page.hit_test(top, 10.0, 10.0), Some(below));
    }

    #[test]
    fn test_hit_test_per_window() {
        let mut page = Page::new();
        let top = page.add_top_window(800.0, 600.0);
        let iframe = page.add_element(top, None, Rect::from_xywh(0.0, 0.0, 300.0, 300.0)).unwrap();
        let inner = page.add_frame_window(iframe).unwrap();
        let ad = page.add_element(inner, None, Rect::from_xywh(0.0, 0.0, 100.0, 100.0)).unwrap();

        assert_eq!(page.hit_test(inner, 10.0, 10.0), Some(ad));
        assert_eq!(page.hit_test(top, 10.0, 10.0), Some(iframe));
    }
}
