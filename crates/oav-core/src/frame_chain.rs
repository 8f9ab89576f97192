//! Frame Chain Resolver
//!
//! Walks from an element's own window up to the top window. Two things
//! come out of the walk:
//!
//! - the smallest viewport of any level ([`min_viewport_across_chain`]);
//! - the translation and clip rectangle of every level
//!   ([`FrameGeometry`]), used to express an element's rectangle in top
//!   window coordinates, clipped by each hosting frame.
//!
//! The chain is collected once per sample. Level `0` is the element's own
//! window, the last level is the top window.

use crate::error::ViewabilityError;
use crate::host::Host;
use crate::rect::Rect;
use crate::viewport::{ViewportSize, viewport_size_of};

/// Ordered windows from the own window to the top window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameChain<W> {
    windows: Vec<W>,
}

impl<W: Copy + Eq + std::fmt::Debug> FrameChain<W> {
    /// Collect the ancestors of `window`.
    ///
    /// Fails when the chain is longer than `max_depth` levels or a window
    /// turns out to be its own parent without being the top window.
    pub fn collect<H>(host: &H, window: W, max_depth: usize) -> Result<Self, ViewabilityError>
    where
        H: Host<Window = W>,
    {
        let top = host.top_window(window);
        let mut windows = vec![window];
        let mut current = window;

        while current != top {
            if windows.len() > max_depth {
                return Err(ViewabilityError::FrameChainTooDeep { limit: max_depth });
            }
            let parent = host.parent_window(current);
            if parent == current {
                return Err(ViewabilityError::DetachedWindow {
                    depth: windows.len() - 1,
                });
            }
            windows.push(parent);
            current = parent;
        }

        Ok(Self { windows })
    }

    /// The element's own window
    pub fn own_window(&self) -> W {
        self.windows[0]
    }

    /// The top window
    pub fn top_window(&self) -> W {
        self.windows[self.windows.len() - 1]
    }

    /// Windows, own window first
    pub fn windows(&self) -> &[W] {
        &self.windows
    }

    /// Number of levels (1 for an unnested window)
    pub fn levels(&self) -> usize {
        self.windows.len()
    }

    /// Whether the own window is the top window
    pub fn is_top_level(&self) -> bool {
        self.windows.len() == 1
    }
}

/// Smallest viewport of any level, by area.
///
/// Unresolved levels have infinite area and never win; the result is only
/// unresolved when every level is.
pub fn min_viewport_across_chain<H: Host>(host: &H, chain: &FrameChain<H::Window>) -> ViewportSize {
    let mut min = viewport_size_of(host, chain.own_window());
    for &window in &chain.windows()[1..] {
        let size = viewport_size_of(host, window);
        if size.area < min.area {
            min = size;
        }
    }
    min
}

/// Per-level translation and clipping of a collected chain
#[derive(Debug, Clone, PartialEq)]
pub struct FrameGeometry {
    /// Accumulated left/top offset of each level relative to the top window.
    offsets: Vec<(f64, f64)>,
    /// Visible rectangle (top coordinates) of the frame hosting each
    /// non-top level.
    clips: Vec<Rect>,
}

impl FrameGeometry {
    /// Resolve the frame elements of every non-top level.
    ///
    /// Any frame the host refuses to expose fails the whole chain.
    pub fn resolve<H: Host>(host: &H, chain: &FrameChain<H::Window>) -> Result<Self, ViewabilityError> {
        let levels = chain.levels();
        let mut frame_rects = Vec::with_capacity(levels.saturating_sub(1));
        for (depth, &window) in chain.windows()[..levels - 1].iter().enumerate() {
            let frame = host
                .frame_element(window)
                .map_err(|e| ViewabilityError::from_host(e, depth))?;
            frame_rects.push(host.bounding_rect(frame));
        }
        Ok(Self::from_frame_rects(&frame_rects))
    }

    /// Build from the bounding rectangle of each hosting frame, level `0`
    /// first. `frame_rects[i]` is in the coordinates of level `i + 1`.
    pub fn from_frame_rects(frame_rects: &[Rect]) -> Self {
        let levels = frame_rects.len() + 1;

        // Offsets accumulate from the top down: a level is shifted by its
        // frame's position plus everything above it.
        let mut offsets = vec![(0.0, 0.0); levels];
        for depth in (0..levels - 1).rev() {
            let (above_x, above_y) = offsets[depth + 1];
            let frame = &frame_rects[depth];
            offsets[depth] = (above_x + frame.left, above_y + frame.top);
        }

        // Each frame is clipped by the visible part of the frame above it.
        let mut clips = vec![Rect::default(); levels - 1];
        for depth in (0..levels - 1).rev() {
            let (dx, dy) = offsets[depth + 1];
            let mut frame = frame_rects[depth].translate(dx, dy);
            if depth + 1 < levels - 1 {
                clip_to_parent(&mut frame, &clips[depth + 1]);
            }
            tracing::trace!("Frame at depth {} visible as {:?}", depth, frame);
            clips[depth] = frame;
        }

        Self { offsets, clips }
    }

    /// Number of levels covered
    pub fn levels(&self) -> usize {
        self.offsets.len()
    }

    /// Express a rectangle of the window at `level` in top window
    /// coordinates.
    ///
    /// Only left/top offsets compose across levels; right/bottom follow
    /// from the rectangle's own size.
    pub fn position_relative_to_viewport(&self, rect: &Rect, level: usize) -> Rect {
        let (dx, dy) = self.offsets[level];
        rect.translate(dx, dy)
    }

    /// Rectangle of the window at `level`, in top coordinates, clipped by
    /// every hosting frame above it.
    pub fn visible_dimension(&self, rect: &Rect, level: usize) -> Rect {
        let mut visible = self.position_relative_to_viewport(rect, level);
        if level + 1 < self.levels() {
            clip_to_parent(&mut visible, &self.clips[level]);
        }
        visible
    }
}

/// Clip against the bottom and right edges of the hosting frame.
///
/// When the rectangle lies entirely past an edge it collapses onto that
/// edge, leaving zero extent on the axis.
fn clip_to_parent(rect: &mut Rect, parent: &Rect) {
    if parent.bottom < rect.bottom {
        if parent.bottom < rect.top {
            rect.top = parent.bottom;
        }
        rect.bottom = parent.bottom;
    }
    if parent.right < rect.right {
        if parent.right < rect.left {
            rect.left = parent.right;
        }
        rect.right = parent.right;
    }
    rect.recompute_size();
}

/// Position of `element` relative to the top window viewport.
pub fn position_relative_to_viewport<H: Host>(
    host: &H,
    element: H::Element,
    max_depth: usize,
) -> Result<Rect, ViewabilityError> {
    let chain = FrameChain::collect(host, host.owner_window(element), max_depth)?;
    let geometry = FrameGeometry::resolve(host, &chain)?;
    Ok(geometry.position_relative_to_viewport(&host.bounding_rect(element), 0))
}

/// Visible rectangle of `element` after clipping by every hosting frame.
pub fn visible_dimension<H: Host>(
    host: &H,
    element: H::Element,
    max_depth: usize,
) -> Result<Rect, ViewabilityError> {
    let chain = FrameChain::collect(host, host.owner_window(element), max_depth)?;
    let geometry = FrameGeometry::resolve(host, &chain)?;
    Ok(geometry.visible_dimension(&host.bounding_rect(element), 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubHost;

    #[test]
    fn test_self_parented_window_is_detached() {
        // Window 0 claims to be its own parent while the top window is 1.
        let mut host = StubHost::single_window(vec![]);
        host.parents = vec![0, 1];
        host.top = 1;
        assert_eq!(
            FrameChain::collect(&host, 0, 64),
            Err(ViewabilityError::DetachedWindow { depth: 0 })
        );
    }

    #[test]
    fn test_chain_longer_than_limit() {
        // 0 -> 1 -> 2 -> 3: three frame boundaries.
        let mut host = StubHost::single_window(vec![]);
        host.parents = vec![1, 2, 3, 3];
        host.top = 3;
        assert_eq!(FrameChain::collect(&host, 0, 3).map(|c| c.levels()), Ok(4));
        assert_eq!(
            FrameChain::collect(&host, 0, 2),
            Err(ViewabilityError::FrameChainTooDeep { limit: 2 })
        );
    }

    #[test]
    fn test_single_level_is_identity() {
        let geometry = FrameGeometry::from_frame_rects(&[]);
        let rect = Rect::from_xywh(10.0, 20.0, 30.0, 40.0);
        assert_eq!(geometry.levels(), 1);
        assert_eq!(geometry.position_relative_to_viewport(&rect, 0), rect);
        assert_eq!(geometry.visible_dimension(&rect, 0), rect);
    }

    #[test]
    fn test_offsets_compose_across_levels() {
        // Level 0 sits at (10, 20) inside level 1, which sits at (100, 200) in the top.
        let geometry = FrameGeometry::from_frame_rects(&[
            Rect::from_xywh(10.0, 20.0, 500.0, 500.0),
            Rect::from_xywh(100.0, 200.0, 800.0, 800.0),
        ]);
        let rect = Rect::from_xywh(1.0, 2.0, 50.0, 60.0);
        let positioned = geometry.position_relative_to_viewport(&rect, 0);
        assert_eq!(positioned.left, 111.0);
        assert_eq!(positioned.top, 222.0);
        assert_eq!(positioned.right, 161.0);
        assert_eq!(positioned.bottom, 282.0);
    }

    #[test]
    fn test_clip_bottom_right() {
        let geometry = FrameGeometry::from_frame_rects(&[Rect::from_xywh(0.0, 0.0, 100.0, 100.0)]);
        let rect = Rect::from_xywh(50.0, 60.0, 100.0, 100.0);
        let visible = geometry.visible_dimension(&rect, 0);
        assert_eq!(visible.right, 100.0);
        assert_eq!(visible.bottom, 100.0);
        assert_eq!(visible.width, 50.0);
        assert_eq!(visible.height, 40.0);
    }

    #[test]
    fn test_element_past_frame_edge_collapses() {
        let geometry = FrameGeometry::from_frame_rects(&[Rect::from_xywh(0.0, 0.0, 100.0, 100.0)]);
        let rect = Rect::from_xywh(0.0, 150.0, 50.0, 50.0);
        let visible = geometry.visible_dimension(&rect, 0);
        assert_eq!(visible.top, 100.0);
        assert_eq!(visible.bottom, 100.0);
        assert_eq!(visible.height, 0.0);
        assert_eq!(visible.width, 50.0);
    }

    #[test]
    fn test_outer_frame_clips_inner_frame() {
        // Inner frame 300 wide at x=0 inside an outer frame only 200 wide.
        let geometry = FrameGeometry::from_frame_rects(&[
            Rect::from_xywh(0.0, 0.0, 300.0, 300.0),
            Rect::from_xywh(0.0, 0.0, 200.0, 1000.0),
        ]);
        let rect = Rect::from_xywh(150.0, 0.0, 100.0, 100.0);
        let visible = geometry.visible_dimension(&rect, 0);
        assert_eq!(visible.left, 150.0);
        assert_eq!(visible.right, 200.0);
        assert_eq!(visible.width, 50.0);
    }
}
