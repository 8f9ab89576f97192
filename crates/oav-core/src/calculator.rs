//! Geometry Viewability Calculator
//!
//! Percentage of an element's area that lies inside every nested viewport.

use serde::Serialize;

use crate::error::ViewabilityError;
use crate::frame_chain::{FrameChain, FrameGeometry, min_viewport_across_chain};
use crate::host::Host;
use crate::rect::Rect;
use crate::viewport::viewport_size_of;

/// Outcome of one geometry measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryReport {
    /// Whole percent of the element inside all viewports, in `[0, 100]`.
    pub percent_viewable: f64,
    /// Width of the viewport the element was measured against.
    pub viewport_width: f64,
    /// Height of the viewport the element was measured against.
    pub viewport_height: f64,
    /// Element rectangle in its own window.
    pub element_rect: Rect,
    /// Whether the area-ratio shortcut was taken.
    pub fast_path: bool,
}

/// Geometry calculator
#[derive(Debug, Clone, Copy)]
pub struct GeometryViewabilityCalculator {
    fast_path_ratio: f64,
    max_frame_depth: usize,
}

impl Default for GeometryViewabilityCalculator {
    fn default() -> Self {
        Self::new(0.5, 64)
    }
}

impl GeometryViewabilityCalculator {
    /// Create a calculator.
    ///
    /// When the smallest viewport of the chain is less than
    /// `fast_path_ratio` times the element's area, the percentage is the
    /// area ratio and no per-edge clipping happens.
    pub fn new(fast_path_ratio: f64, max_frame_depth: usize) -> Self {
        Self {
            fast_path_ratio,
            max_frame_depth,
        }
    }

    /// Measure `element`, which lives in `window`.
    pub fn viewability_state<H: Host>(
        &self,
        host: &H,
        element: H::Element,
        window: H::Window,
    ) -> Result<GeometryReport, ViewabilityError> {
        let chain = FrameChain::collect(host, window, self.max_frame_depth)?;
        let min_viewport = min_viewport_across_chain(host, &chain);
        if !min_viewport.is_resolved() {
            return Err(ViewabilityError::UnresolvedViewport);
        }

        let element_rect = host.bounding_rect(element);
        let element_area = element_rect.area();
        if element_area <= 0.0 {
            return Ok(GeometryReport {
                percent_viewable: 0.0,
                viewport_width: min_viewport.width,
                viewport_height: min_viewport.height,
                element_rect,
                fast_path: true,
            });
        }

        if min_viewport.area / element_area < self.fast_path_ratio {
            let percent = (100.0 * min_viewport.area / element_area).floor();
            tracing::trace!("Fast path: viewport area {} for element area {}", min_viewport.area, element_area);
            return Ok(GeometryReport {
                percent_viewable: clamp_percent(percent),
                viewport_width: min_viewport.width,
                viewport_height: min_viewport.height,
                element_rect,
                fast_path: true,
            });
        }

        let top_viewport = viewport_size_of(host, chain.top_window());
        let geometry = FrameGeometry::resolve(host, &chain)?;
        let visible = geometry.visible_dimension(&element_rect, 0);

        let mut visible_width = visible.width;
        let mut visible_height = visible.height;
        if visible.bottom > top_viewport.height {
            visible_height -= visible.bottom - top_viewport.height;
        }
        if visible.top < 0.0 {
            visible_height += visible.top;
        }
        if visible.left < 0.0 {
            visible_width += visible.left;
        }
        if visible.right > top_viewport.width {
            visible_width -= visible.right - top_viewport.width;
        }

        let visible_area = visible_width.max(0.0) * visible_height.max(0.0);
        let percent = (100.0 * visible_area / element_area).floor();

        Ok(GeometryReport {
            percent_viewable: clamp_percent(percent),
            viewport_width: top_viewport.width,
            viewport_height: top_viewport.height,
            element_rect,
            fast_path: false,
        })
    }
}

fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(-12.0), 0.0);
        assert_eq!(clamp_percent(140.0), 100.0);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
        assert_eq!(clamp_percent(42.0), 42.0);
    }
}
