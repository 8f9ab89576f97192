//! CSS Visibility Filter
//!
//! `visibility` is inherited and `display: none` removes the whole subtree,
//! so the element's own computed style is enough. Inheritance stops at the
//! document boundary; a hidden ancestor document shows up through the
//! geometry or occlusion checks instead.

use crate::host::Host;

/// Why an element is invisible by style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssInvisibility {
    /// `visibility: hidden`
    Hidden,
    /// `display: none`
    DisplayNone,
}

/// Inspect the computed style of `element`.
pub fn css_invisibility<H: Host>(host: &H, element: H::Element) -> Option<CssInvisibility> {
    let visibility = host.computed_style(element, "visibility");
    if visibility.as_deref() == Some("hidden") {
        return Some(CssInvisibility::Hidden);
    }
    let display = host.computed_style(element, "display");
    if display.as_deref() == Some("none") {
        return Some(CssInvisibility::DisplayNone);
    }
    None
}

/// Check for `visibility: hidden` or `display: none`.
pub fn is_css_invisible<H: Host>(host: &H, element: H::Element) -> bool {
    css_invisibility(host, element).is_some()
}
