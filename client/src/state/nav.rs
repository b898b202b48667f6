//! Navigation bar toggles.
//!
//! DESIGN
//! ======
//! Purely local presentation state. Nothing here reads or writes auth state;
//! the navbar combines the two when rendering.

/// Vertical scroll offset (px) past which the bar uses its scrolled style.
pub const SCROLL_THRESHOLD: f64 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    pub menu_open: bool,
    pub notifications_open: bool,
    pub sign_up_open: bool,
    pub scrolled: bool,
}

impl NavState {
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn toggle_notifications(&mut self) {
        self.notifications_open = !self.notifications_open;
    }

    /// Open the sign-up modal. The mobile menu closes underneath it.
    pub fn open_sign_up(&mut self) {
        self.menu_open = false;
        self.sign_up_open = true;
    }

    pub fn close_sign_up(&mut self) {
        self.sign_up_open = false;
    }

    /// Record the current scroll offset. Returns `true` if the style changed.
    pub fn set_scroll(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > SCROLL_THRESHOLD;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }
}

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;
