use std::ops::RangeInclusive;

use crate::listbox::store::{Flag, OptionStore};

/// Closed interval between two indices, low to high regardless of direction.
pub fn span(a: usize, b: usize) -> RangeInclusive<usize> {
    a.min(b)..=a.max(b)
}

/// Anchor/extent of a Shift-driven contiguous range.
///
/// `anchor` and `extent` are both unset or both refer to the current option
/// order. Ending the range keeps whatever flags were applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeTracker {
    anchor: Option<usize>,
    extent: Option<usize>,
    check_state: bool,
}

impl RangeTracker {
    /// Anchor a range at `active`, unless one is already anchored.
    /// `flag_at_anchor` is the anchor's current flag; the range will write its inverse.
    pub fn begin(&mut self, active: usize, flag_at_anchor: bool) -> bool {
        if self.anchor.is_some() {
            return false;
        }
        self.anchor = Some(active);
        self.extent = None;
        self.check_state = !flag_at_anchor;
        true
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn extent(&self) -> Option<usize> {
        self.extent
    }

    /// Value captured at anchor time: the inverse of the anchor's flag.
    pub fn check_state(&self) -> bool {
        self.check_state
    }

    /// Redraw the range from the anchor to `end` with `value`. The previous
    /// extent, if any, is first reset to `!value`. Returns false with no
    /// anchor.
    pub fn apply(&mut self, store: &mut OptionStore, flag: Flag, end: usize, value: bool) -> bool {
        let Some(anchor) = self.anchor else {
            tracing::trace!(end, "range apply without anchor ignored");
            return false;
        };
        let restore = self.extent.map(|prev| (span(anchor, prev), !value));
        store.write_spans(flag, restore, (span(anchor, end), value));
        self.extent = Some(end);
        true
    }

    /// Forget anchor and extent. Applied flags stay as they are.
    pub fn end(&mut self) {
        self.anchor = None;
        self.extent = None;
    }
}
