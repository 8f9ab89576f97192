//! Rectangle geometry
//!
//! Edge-based rectangles as reported by `getBoundingClientRect`, plus the
//! asymmetric overlap measure used by occlusion detection.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in some window's coordinate space.
///
/// `width` and `height` are stored alongside the edges because clipping
/// adjusts them independently of the edges. A rectangle whose width or
/// height is not positive covers no area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create from position and size
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
            width,
            height,
        }
    }

    /// Create from edges
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Covered area, zero for degenerate rectangles.
    pub fn area(&self) -> f64 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return 0.0;
        }
        self.width * self.height
    }

    /// Check for a non-positive width or height
    pub fn is_degenerate(&self) -> bool {
        self.area() <= 0.0
    }

    /// Shift left/top by an offset; right/bottom follow from the own size.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        let width = self.right - self.left;
        let height = self.bottom - self.top;
        let left = self.left + dx;
        let top = self.top + dy;
        Self::from_edges(left, top, left + width, top + height)
    }

    /// Re-derive width/height from the edges.
    pub fn recompute_size(&mut self) {
        self.width = self.right - self.left;
        self.height = self.bottom - self.top;
    }

    /// Check if point is inside (right/bottom exclusive)
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Fraction of this rectangle covered by `other`, in `[0, 1]`.
    ///
    /// The intersection is divided by the area of `self` only, so the
    /// result answers "how much of the target is covered" and is not
    /// symmetric under swapping the operands.
    pub fn overlap_fraction(&self, other: &Rect) -> f64 {
        let area = self.area();
        if area <= 0.0 {
            return 0.0;
        }
        let x_overlap = (self.right.min(other.right) - self.left.max(other.left)).max(0.0);
        let y_overlap = (self.bottom.min(other.bottom) - self.top.max(other.top)).max(0.0);
        (x_overlap * y_overlap / area).min(1.0)
    }
}

/// Fraction of `target` covered by `other`. See [`Rect::overlap_fraction`].
pub fn overlap_fraction(target: &Rect, other: &Rect) -> f64 {
    target.overlap_fraction(other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::from_xywh(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right, 40.0);
        assert_eq!(r.bottom, 60.0);
        assert_eq!(r.area(), 1200.0);
    }

    #[test]
    fn test_degenerate_area_is_zero() {
        let r = Rect::from_edges(50.0, 50.0, 40.0, 80.0);
        assert_eq!(r.width, -10.0);
        assert_eq!(r.area(), 0.0);
        assert!(r.is_degenerate());
    }

    #[test]
    fn test_overlap_disjoint() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_xywh(20.0, 20.0, 10.0, 10.0);
        assert_eq!(overlap_fraction(&a, &b), 0.0);
    }

    #[test]
    fn test_overlap_is_asymmetric() {
        let small = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let large = Rect::from_xywh(0.0, 0.0, 20.0, 20.0);
        assert_eq!(overlap_fraction(&small, &large), 1.0);
        assert_eq!(overlap_fraction(&large, &small), 0.25);
    }

    #[test]
    fn test_overlap_partial() {
        let target = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let cover = Rect::from_xywh(40.0, 0.0, 100.0, 100.0);
        assert!((overlap_fraction(&target, &cover) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_degenerate_target() {
        let target = Rect::from_xywh(0.0, 0.0, 0.0, 10.0);
        let cover = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        assert_eq!(overlap_fraction(&target, &cover), 0.0);
    }

    #[test]
    fn test_translate_keeps_size() {
        let r = Rect::from_xywh(5.0, 5.0, 10.0, 20.0).translate(-15.0, 100.0);
        assert_eq!(r.left, -10.0);
        assert_eq!(r.right, 0.0);
        assert_eq!(r.top, 105.0);
        assert_eq!(r.height, 20.0);
    }

    #[test]
    fn test_contains_point_edges() {
        let r = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(0.0, 0.0));
        assert!(!r.contains_point(10.0, 5.0));
    }
}
