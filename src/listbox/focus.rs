use std::time::{Duration, Instant};

/// Open/closed menu state with blur suppression, the open re-entrancy guard,
/// focus intent and the listbox scroll offset.
#[derive(Clone, Debug)]
pub struct MenuFocus {
    open: bool,
    guard: Duration,
    guard_until: Option<Instant>,
    ignore_blur: bool,
    focus_requested: bool,
    scroll_top: usize,
}

impl MenuFocus {
    pub fn new(guard: Duration) -> Self {
        Self {
            open: false,
            guard,
            guard_until: None,
            ignore_blur: false,
            focus_requested: false,
            scroll_top: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn guard_active(&self, now: Instant) -> bool {
        self.guard_until.is_some_and(|until| now < until)
    }

    /// Request a menu state. A close arriving while the open guard is running
    /// is dropped. Returns true when the request was applied.
    pub fn set_open(&mut self, open: bool, call_focus: bool, now: Instant) -> bool {
        if !open && self.guard_active(now) {
            tracing::debug!("close suppressed by open guard");
            return false;
        }
        if open && !self.guard_active(now) {
            self.guard_until = Some(now + self.guard);
        }
        if self.open != open {
            tracing::debug!(open, "menu state changed");
        }
        self.open = open;
        self.focus_requested = call_focus;
        true
    }

    /// Click on the combo input.
    pub fn toggle(&mut self, now: Instant) -> bool {
        let open = !self.open;
        self.set_open(open, true, now)
    }

    /// Focus left the combo input. Suppressed once after `ignore_next_blur`.
    pub fn blur(&mut self, now: Instant) -> bool {
        if self.ignore_blur {
            self.ignore_blur = false;
            return false;
        }
        self.set_open(false, false, now)
    }

    /// Pointer went down on an option: the blur that follows must not close
    /// the menu, and the input takes focus back afterwards.
    pub fn ignore_next_blur(&mut self) {
        self.ignore_blur = true;
        self.focus_requested = true;
    }

    pub fn focus_requested(&self) -> bool {
        self.focus_requested
    }

    /// Consume the focus intent after the host has moved focus to the input.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Keep the item `[item_top, item_top + item_height)` inside a viewport of
    /// `viewport_height` when the menu is open and the content overflows.
    /// Returns the new offset when it moved.
    pub fn maintain_scroll(
        &mut self,
        item_top: usize,
        item_height: usize,
        viewport_height: usize,
        content_height: usize,
    ) -> Option<usize> {
        self.clamp_scroll(viewport_height, content_height);
        if !self.open || !is_scrollable(viewport_height, content_height) {
            return None;
        }
        let top = scroll_into_view(item_top, item_height, self.scroll_top, viewport_height)?;
        self.scroll_top = top;
        Some(top)
    }

    /// Pull the offset back so the viewport never starts past the last full
    /// page. Content that fits resets it to 0. Returns true when it moved.
    pub fn clamp_scroll(&mut self, viewport_height: usize, content_height: usize) -> bool {
        let max_top = content_height.saturating_sub(viewport_height);
        if self.scroll_top <= max_top {
            return false;
        }
        self.scroll_top = max_top;
        true
    }
}

pub fn is_scrollable(viewport_height: usize, content_height: usize) -> bool {
    viewport_height < content_height
}

/// New scroll offset that brings an item into view, or `None` when it is
/// already visible. Items above align their top, items below align their bottom.
pub fn scroll_into_view(
    item_top: usize,
    item_height: usize,
    scroll_top: usize,
    viewport_height: usize,
) -> Option<usize> {
    let item_bottom = item_top + item_height;
    if item_top < scroll_top {
        Some(item_top)
    } else if item_bottom > scroll_top + viewport_height {
        Some(item_bottom.saturating_sub(viewport_height))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus() -> MenuFocus {
        MenuFocus::new(Duration::from_millis(100))
    }

    #[test]
    fn test_close_within_guard_is_ignored() {
        let t0 = Instant::now();
        let mut f = focus();
        assert!(f.set_open(true, true, t0));
        assert!(!f.set_open(false, true, t0 + Duration::from_millis(50)));
        assert!(f.is_open());
        assert!(f.set_open(false, true, t0 + Duration::from_millis(100)));
        assert!(!f.is_open());
    }

    #[test]
    fn test_reopen_during_guard_does_not_extend_it() {
        let t0 = Instant::now();
        let mut f = focus();
        f.set_open(true, true, t0);
        f.set_open(true, true, t0 + Duration::from_millis(90));
        assert!(f.set_open(false, true, t0 + Duration::from_millis(110)));
    }

    #[test]
    fn test_toggle_flips_state() {
        let t0 = Instant::now();
        let mut f = focus();
        f.toggle(t0);
        assert!(f.is_open());
        f.toggle(t0 + Duration::from_secs(1));
        assert!(!f.is_open());
    }

    #[test]
    fn test_blur_after_option_mousedown_is_suppressed_once() {
        let t0 = Instant::now();
        let later = t0 + Duration::from_secs(1);
        let mut f = focus();
        f.set_open(true, true, t0);
        f.ignore_next_blur();
        assert!(!f.blur(later));
        assert!(f.is_open());
        assert!(f.blur(later));
        assert!(!f.is_open());
        // blur does not ask for focus back
        assert!(!f.focus_requested());
    }

    #[test]
    fn test_focus_request_is_consumed() {
        let mut f = focus();
        f.set_open(true, true, Instant::now());
        assert!(f.take_focus_request());
        assert!(!f.take_focus_request());
    }

    #[test]
    fn test_scroll_into_view_policy() {
        // above: align top
        assert_eq!(scroll_into_view(2, 1, 5, 4), Some(2));
        // below: align bottom
        assert_eq!(scroll_into_view(10, 1, 5, 4), Some(7));
        // visible: untouched
        assert_eq!(scroll_into_view(6, 1, 5, 4), None);
        assert_eq!(scroll_into_view(8, 1, 5, 4), None);
    }

    #[test]
    fn test_maintain_scroll_only_when_open_and_overflowing() {
        let mut f = focus();
        assert_eq!(f.maintain_scroll(10, 1, 4, 20), None);
        f.set_open(true, true, Instant::now());
        assert_eq!(f.maintain_scroll(10, 1, 4, 4), None);
        assert_eq!(f.maintain_scroll(10, 1, 4, 20), Some(7));
        assert_eq!(f.scroll_top(), 7);
        assert_eq!(f.maintain_scroll(8, 1, 4, 20), None);
    }

    #[test]
    fn test_shrunk_content_clamps_offset() {
        let mut f = focus();
        f.set_open(true, true, Instant::now());
        f.maintain_scroll(19, 1, 4, 20);
        assert_eq!(f.scroll_top(), 16);
        // list shrank to 10 but still overflows
        assert!(f.clamp_scroll(4, 10));
        assert_eq!(f.scroll_top(), 6);
        assert!(!f.clamp_scroll(4, 10));
        // list now fits
        assert!(f.clamp_scroll(4, 3));
        assert_eq!(f.scroll_top(), 0);
    }

    #[test]
    fn test_maintain_scroll_clamps_even_without_target_move() {
        let mut f = focus();
        f.set_open(true, true, Instant::now());
        f.maintain_scroll(19, 1, 4, 20);
        // active option 7 is inside the clamped window [6, 10)
        assert_eq!(f.maintain_scroll(7, 1, 4, 10), None);
        assert_eq!(f.scroll_top(), 6);
    }
}
