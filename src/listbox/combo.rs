use std::time::Instant;

use serde::Serialize;

use crate::listbox::Timings;
use crate::listbox::action::{Key, KeyInput, MenuAction, Modifiers};
use crate::listbox::focus::MenuFocus;
use crate::listbox::navigate::next_index;
use crate::listbox::range::RangeTracker;
use crate::listbox::store::{Flag, OptionState, OptionStore, SelectionChanged};
use crate::listbox::typeahead::{TypeAhead, resolve_index};

/// Snapshot the renderer paints from.
#[derive(Clone, Debug, Serialize)]
pub struct ListboxView<'a> {
    pub label: &'a str,
    pub options: &'a [String],
    pub states: &'a [OptionState],
    pub active_index: usize,
    pub open: bool,
    pub value: &'a str,
    pub focus_requested: bool,
    /// Option the host should scroll into view after painting.
    pub scroll_target: Option<usize>,
    pub scroll_top: usize,
    pub version: u64,
}

/// State shared by both widget variants.
#[derive(Clone, Debug)]
pub struct ComboBox {
    label: String,
    options: Vec<String>,
    store: OptionStore,
    active_index: usize,
    typeahead: TypeAhead,
    focus: MenuFocus,
    range: RangeTracker,
}

impl ComboBox {
    pub fn new(
        label: &str,
        options: Vec<String>,
        option_type: Option<&str>,
        timings: Timings,
    ) -> Self {
        let store = OptionStore::new(&options, option_type);
        Self {
            label: label.to_string(),
            options,
            store,
            active_index: 0,
            typeahead: TypeAhead::new(timings.search_reset),
            focus: MenuFocus::new(timings.open_guard),
            range: RangeTracker::default(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn store(&self) -> &OptionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut OptionStore {
        &mut self.store
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn focus(&self) -> &MenuFocus {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut MenuFocus {
        &mut self.focus
    }

    pub fn range(&self) -> &RangeTracker {
        &self.range
    }

    pub fn typeahead(&self) -> &TypeAhead {
        &self.typeahead
    }

    pub fn is_open(&self) -> bool {
        self.focus.is_open()
    }

    pub fn value(&self) -> &str {
        self.store.value()
    }

    /// Move the active index. Out-of-range indices are ignored.
    pub fn set_active(&mut self, index: usize) {
        if index < self.options.len() {
            self.active_index = index;
        }
    }

    /// Index reached by a navigation action, or `None` for an empty list.
    pub fn navigate(&self, action: MenuAction) -> Option<usize> {
        let max = self.options.len().checked_sub(1)?;
        Some(next_index(self.active_index, max, action))
    }

    /// Replace the option list, carrying flags forward by name. The active
    /// index is clamped into the new list and any running range is ended.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.store.reconcile(&options);
        self.options = options;
        self.active_index = self
            .active_index
            .min(self.options.len().saturating_sub(1));
        self.range.end();
        tracing::debug!(
            len = self.options.len(),
            active = self.active_index,
            "options reconciled"
        );
    }

    pub fn set_open(&mut self, open: bool, call_focus: bool, now: Instant) -> bool {
        self.focus.set_open(open, call_focus, now)
    }

    pub fn toggle_menu(&mut self, now: Instant) -> bool {
        self.focus.toggle(now)
    }

    pub fn blur(&mut self, now: Instant) -> bool {
        self.focus.blur(now)
    }

    /// Type-ahead: open the menu and jump to the first option matching the
    /// accumulated search, scanning from the option after the active one.
    /// Backspace and Clear only reset the search.
    pub fn type_key(&mut self, key: Key, now: Instant) {
        self.set_open(true, true, now);

        let Some(ch) = key.printable() else {
            self.typeahead.clear();
            return;
        };

        let search = self.typeahead.push(ch, now);
        match resolve_index(&self.options, search, self.active_index + 1) {
            Some(index) => self.active_index = index,
            None => tracing::trace!(search, "type-ahead found no match"),
        }
    }

    /// Fire timers that have come due.
    pub fn tick(&mut self, now: Instant) {
        self.typeahead.expire(now);
    }

    /// Follow the range modifier through a key press. Returns true when the
    /// press was the bare modifier and needs no further handling.
    ///
    /// Hosts that never report modifier presses or releases still get ranges:
    /// a Shift-navigation anchors at the active index, and any press without
    /// Shift ends a running range.
    pub fn track_range_modifier(
        &mut self,
        input: KeyInput,
        action: Option<MenuAction>,
        flag: Flag,
    ) -> bool {
        if input.key == Key::Shift {
            self.begin_range(flag);
            return true;
        }
        if !input.modifiers.shift {
            self.range.end();
        } else if action.is_some_and(MenuAction::is_navigation) {
            self.begin_range(flag);
        }
        false
    }

    /// Anchor a range at the active index, capturing the anchor's `flag`.
    pub fn begin_range(&mut self, flag: Flag) -> bool {
        let Some(state) = self.store.get(self.active_index) else {
            return false;
        };
        let current = state.flag(flag);
        self.range.begin(self.active_index, current)
    }

    pub fn apply_range(&mut self, flag: Flag, end: usize, value: bool) -> bool {
        if end >= self.options.len() {
            return false;
        }
        self.range.apply(&mut self.store, flag, end, value)
    }

    pub fn end_range(&mut self) {
        self.range.end();
    }

    pub fn toggle_checked(&mut self, index: usize) -> Vec<SelectionChanged> {
        self.store.toggle_checked(index).into_iter().collect()
    }

    pub fn view(&self) -> ListboxView<'_> {
        let open = self.focus.is_open();
        ListboxView {
            label: &self.label,
            options: &self.options,
            states: self.store.states(),
            active_index: self.active_index,
            open,
            value: self.store.value(),
            focus_requested: self.focus.focus_requested(),
            scroll_target: (open && !self.options.is_empty()).then_some(self.active_index),
            scroll_top: self.focus.scroll_top(),
            version: self.store.version(),
        }
    }
}

/// Event surface shared by both widget variants.
pub trait Listbox {
    fn combo(&self) -> &ComboBox;
    fn combo_mut(&mut self) -> &mut ComboBox;

    /// Key press on the combo input. Returns the confirmed check changes.
    fn key_down(&mut self, input: KeyInput, now: Instant) -> Vec<SelectionChanged>;

    /// Click on the option at `index`.
    fn click_option(
        &mut self,
        index: usize,
        modifiers: Modifiers,
        now: Instant,
    ) -> Vec<SelectionChanged>;

    /// Releasing the range modifier makes the current range permanent.
    fn key_up(&mut self, key: Key) {
        if key == Key::Shift {
            self.combo_mut().end_range();
        }
    }

    fn click_combo(&mut self, now: Instant) {
        self.combo_mut().toggle_menu(now);
    }

    fn mouse_down_option(&mut self) {
        self.combo_mut().focus_mut().ignore_next_blur();
    }

    fn blur(&mut self, now: Instant) {
        self.combo_mut().blur(now);
    }

    fn set_options(&mut self, options: Vec<String>) {
        self.combo_mut().set_options(options);
    }

    fn tick(&mut self, now: Instant) {
        self.combo_mut().tick(now);
    }

    fn view(&self) -> ListboxView<'_> {
        self.combo().view()
    }
}
