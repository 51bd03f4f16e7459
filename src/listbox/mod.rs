//! Interaction core of the combobox + listbox widgets: key classification,
//! navigation, type-ahead, range selection, option flags and menu focus.
//! Rendering is left to the host; it reads `ListboxView` snapshots.

pub mod action;
pub mod combo;
pub mod focus;
pub mod multiselect;
pub mod navigate;
pub mod range;
pub mod store;
pub mod todo_list;
pub mod typeahead;

use std::time::Duration;

pub use action::{Key, KeyInput, MenuAction, Modifiers, classify};
pub use combo::{ComboBox, Listbox, ListboxView};
pub use multiselect::MultiSelect;
pub use store::{Flag, OptionState, OptionStore, SelectionChanged};
pub use todo_list::TodoList;

/// Quiet period after which the type-ahead buffer resets.
pub const SEARCH_RESET: Duration = Duration::from_millis(500);
/// Window after opening during which close requests are dropped.
pub const OPEN_GUARD: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    pub search_reset: Duration,
    pub open_guard: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            search_reset: SEARCH_RESET,
            open_guard: OPEN_GUARD,
        }
    }
}
