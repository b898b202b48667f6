//! Window geometry: layout breakpoint and scroll offset.
//!
//! Browser-only reads fall back to desktop layout and zero scroll outside
//! the hydrated build, which is also what the server renders.

/// Widths strictly below this many CSS pixels use the mobile layout.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    Mobile,
    #[default]
    Desktop,
}

impl Layout {
    #[must_use]
    pub fn is_mobile(self) -> bool {
        self == Self::Mobile
    }
}

#[must_use]
pub fn layout_for(width: f64) -> Layout {
    if width < MOBILE_BREAKPOINT { Layout::Mobile } else { Layout::Desktop }
}

/// Layout for the current window width.
#[must_use]
pub fn current_layout() -> Layout {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .map_or(Layout::Desktop, layout_for)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Layout::Desktop
    }
}

/// Current vertical scroll offset in CSS pixels.
#[must_use]
pub fn scroll_y() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0.0
    }
}

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;
