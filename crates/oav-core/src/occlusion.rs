//! Occlusion Detector
//!
//! Hit-tests a 3x3 grid of points over the element and measures how much of
//! it the topmost foreign element at each point covers.

use crate::host::Host;
use crate::rect::Rect;
use crate::state::VisibilityCheckState;

/// Point in the element's window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

/// The nine hit-test points of `rect`, row by row from the top.
///
/// Corners and edge midpoints are inset by `inset`; the top row is never
/// above `y = 0`.
pub fn sample_points(rect: &Rect, inset: f64) -> [SamplePoint; 9] {
    let x_left = rect.left + inset;
    let x_right = rect.right - inset;
    let x_center = (rect.left + rect.width / 2.0).floor();
    let y_top = (rect.top + inset).max(0.0);
    let y_bottom = rect.bottom - inset;
    let y_center = (rect.top + rect.height / 2.0).floor();

    let point = |x, y| SamplePoint { x, y };
    [
        point(x_left, y_top),
        point(x_center, y_top),
        point(x_right, y_top),
        point(x_left, y_center),
        point(x_center, y_center),
        point(x_right, y_center),
        point(x_left, y_bottom),
        point(x_center, y_bottom),
        point(x_right, y_bottom),
    ]
}

/// Occlusion detector
#[derive(Debug, Clone, Copy)]
pub struct OcclusionDetector {
    inset: f64,
}

impl Default for OcclusionDetector {
    fn default() -> Self {
        Self::new(12.0)
    }
}

impl OcclusionDetector {
    pub fn new(inset: f64) -> Self {
        Self { inset }
    }

    /// Check whether a foreign element covers more than the accepted
    /// percentage of `element`.
    ///
    /// Every covering hit overwrites `state.percent_obscured`, so with
    /// several coverers the last one sampled is what remains. When a hit
    /// exceeds `state.accepted_viewable_percentage`, `percent_viewable` is
    /// set to the uncovered remainder and the scan stops.
    pub fn is_dom_obscured<H: Host>(
        &self,
        host: &H,
        element: H::Element,
        window: H::Window,
        state: &mut VisibilityCheckState,
    ) -> bool {
        let rect = host.bounding_rect(element);

        for point in sample_points(&rect, self.inset) {
            if point.x < 0.0 || point.y < 0.0 {
                continue;
            }
            let Some(hit) = host.element_from_point(window, point.x, point.y) else {
                continue;
            };
            if hit == element || host.contains(element, hit) {
                continue;
            }

            let overlap = rect.overlap_fraction(&host.bounding_rect(hit));
            if overlap <= 0.0 {
                continue;
            }

            state.percent_obscured = 100.0 * overlap;
            tracing::trace!(
                "{:?} covered {:.1}% by {:?} at ({}, {})",
                element,
                state.percent_obscured,
                hit,
                point.x,
                point.y
            );
            if state.percent_obscured > state.accepted_viewable_percentage {
                state.percent_viewable = 100.0 - state.percent_obscured;
                return true;
            }
        }

        false
    }
}
