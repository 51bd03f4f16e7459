use std::time::Instant;

use crate::listbox::Timings;
use crate::listbox::action::{KeyInput, MenuAction, Modifiers, classify};
use crate::listbox::combo::{ComboBox, Listbox};
use crate::listbox::store::{Flag, SelectionChanged};

/// Dual-state list: options carry a `selected` cursor flag next to `checked`.
///
/// Plain navigation moves a single selection with the active option,
/// Ctrl-navigation moves only the active option, Shift-navigation selects a
/// span. Space toggles `checked` on the active option and on every selected
/// one; Ctrl+Space toggles `selected` instead.
#[derive(Clone, Debug)]
pub struct TodoList {
    combo: ComboBox,
}

impl TodoList {
    pub fn new(
        label: &str,
        options: Vec<String>,
        option_type: Option<&str>,
        timings: Timings,
    ) -> Self {
        Self {
            combo: ComboBox::new(label, options, option_type, timings),
        }
    }

    /// Click on the option's checkbox: toggles that option only.
    pub fn click_checkbox(&mut self, index: usize) -> Vec<SelectionChanged> {
        self.combo.toggle_checked(index)
    }

    fn toggle_selected(&mut self, index: usize) {
        let store = self.combo.store_mut();
        if let Some(selected) = store.get(index).map(|state| state.selected) {
            store.set_selected(index, !selected, false);
        }
    }
}

impl Listbox for TodoList {
    fn combo(&self) -> &ComboBox {
        &self.combo
    }

    fn combo_mut(&mut self) -> &mut ComboBox {
        &mut self.combo
    }

    fn key_down(&mut self, input: KeyInput, now: Instant) -> Vec<SelectionChanged> {
        let action = classify(input, self.combo.is_open());

        if self
            .combo
            .track_range_modifier(input, action, Flag::Selected)
        {
            return Vec::new();
        }

        let Some(action) = action else {
            return Vec::new();
        };

        match action {
            MenuAction::Next | MenuAction::Last | MenuAction::First | MenuAction::Previous => {
                if let Some(index) = self.combo.navigate(action) {
                    if input.modifiers.shift {
                        self.combo.apply_range(Flag::Selected, index, true);
                    } else if !input.modifiers.ctrl {
                        self.combo.store_mut().set_selected(index, true, true);
                    }
                    self.combo.set_active(index);
                }
                Vec::new()
            }
            MenuAction::Select => {
                let active = self.combo.active_index();
                if input.modifiers.ctrl {
                    self.toggle_selected(active);
                    return Vec::new();
                }
                if self.combo.options().is_empty() {
                    return Vec::new();
                }
                self.combo.store_mut().confirm_selected_or_active(active)
            }
            MenuAction::Confirm | MenuAction::Close => {
                self.combo.set_open(false, true, now);
                Vec::new()
            }
            MenuAction::Type => {
                self.combo.type_key(input.key, now);
                Vec::new()
            }
            MenuAction::Open => {
                self.combo.set_open(true, true, now);
                Vec::new()
            }
            MenuAction::PageUp | MenuAction::PageDown => Vec::new(),
        }
    }

    fn click_option(
        &mut self,
        index: usize,
        modifiers: Modifiers,
        _now: Instant,
    ) -> Vec<SelectionChanged> {
        if !modifiers.shift {
            self.combo.end_range();
        }
        if index >= self.combo.options().len() {
            return Vec::new();
        }

        if modifiers.shift {
            self.combo.begin_range(Flag::Selected);
            self.combo.apply_range(Flag::Selected, index, true);
        } else if modifiers.ctrl {
            self.toggle_selected(index);
        } else {
            self.combo.store_mut().set_selected(index, true, true);
        }

        self.combo.set_active(index);
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listbox::action::Key;

    fn widget(len: usize) -> TodoList {
        let options = (0..len).map(|i| format!("Task {i}")).collect();
        TodoList::new("Favorite Books", options, Some("book"), Timings::default())
    }

    fn press(w: &mut TodoList, key: Key, modifiers: Modifiers, now: Instant) -> Vec<SelectionChanged> {
        w.key_down(KeyInput::new(key, modifiers), now)
    }

    fn selected(w: &TodoList) -> Vec<bool> {
        w.view().states.iter().map(|s| s.selected).collect()
    }

    fn checked(w: &TodoList) -> Vec<bool> {
        w.view().states.iter().map(|s| s.checked).collect()
    }

    fn opened(len: usize, now: Instant) -> TodoList {
        let mut w = widget(len);
        press(&mut w, Key::Enter, Modifiers::NONE, now);
        w
    }

    #[test]
    fn test_plain_navigation_moves_single_selection() {
        let t0 = Instant::now();
        let mut w = opened(4, t0);
        press(&mut w, Key::ArrowDown, Modifiers::NONE, t0);
        press(&mut w, Key::ArrowDown, Modifiers::NONE, t0);
        assert_eq!(selected(&w), vec![false, false, true, false]);
        assert_eq!(w.view().active_index, 2);
    }

    #[test]
    fn test_ctrl_navigation_moves_active_only() {
        let t0 = Instant::now();
        let mut w = opened(4, t0);
        press(&mut w, Key::ArrowDown, Modifiers::NONE, t0);
        press(&mut w, Key::ArrowDown, Modifiers::CTRL, t0);
        press(&mut w, Key::ArrowDown, Modifiers::CTRL, t0);
        assert_eq!(w.view().active_index, 3);
        assert_eq!(selected(&w), vec![false, true, false, false]);
        press(&mut w, Key::Space, Modifiers::CTRL, t0);
        assert_eq!(selected(&w), vec![false, true, false, true]);
        press(&mut w, Key::Space, Modifiers::CTRL, t0);
        assert_eq!(selected(&w), vec![false, true, false, false]);
        assert_eq!(checked(&w), vec![false; 4]);
    }

    #[test]
    fn test_bulk_confirm_toggles_active_and_selected() {
        let t0 = Instant::now();
        let mut w = opened(6, t0);
        w.click_option(2, Modifiers::NONE, t0);
        w.click_option(4, Modifiers::CTRL, t0);
        w.combo_mut().set_active(2);
        let changed = press(&mut w, Key::Space, Modifiers::NONE, t0);
        assert_eq!(
            changed.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            vec!["Task 2", "Task 4"]
        );
        assert!(changed.iter().all(|c| c.checked));
        assert_eq!(checked(&w), vec![false, false, true, false, true, false]);
        assert_eq!(w.view().value, "2 books selected");
    }

    #[test]
    fn test_shift_selection_range_unsets_on_retraction() {
        let t0 = Instant::now();
        let mut w = opened(6, t0);
        press(&mut w, Key::ArrowDown, Modifiers::NONE, t0);
        press(&mut w, Key::Shift, Modifiers::SHIFT, t0);
        press(&mut w, Key::End, Modifiers::SHIFT, t0);
        assert_eq!(selected(&w), vec![false, true, true, true, true, true]);
        press(&mut w, Key::Home, Modifiers::SHIFT, t0);
        assert_eq!(selected(&w), vec![true, true, false, false, false, false]);
        w.key_up(Key::Shift);
        assert_eq!(selected(&w), vec![true, true, false, false, false, false]);
    }

    #[test]
    fn test_shift_click_extends_from_anchor() {
        let t0 = Instant::now();
        let mut w = opened(5, t0);
        w.click_option(1, Modifiers::NONE, t0);
        w.click_option(3, Modifiers::SHIFT, t0);
        assert_eq!(selected(&w), vec![false, true, true, true, false]);
        w.click_option(2, Modifiers::SHIFT, t0);
        assert_eq!(selected(&w), vec![false, true, true, false, false]);
    }

    #[test]
    fn test_plain_click_ends_range_before_next_shift_click() {
        let t0 = Instant::now();
        let mut w = opened(8, t0);
        w.click_option(1, Modifiers::NONE, t0);
        w.click_option(3, Modifiers::SHIFT, t0);
        w.click_option(5, Modifiers::NONE, t0);
        assert!(!w.combo().range().is_active());
        w.click_option(6, Modifiers::SHIFT, t0);
        assert_eq!(
            selected(&w),
            vec![false, false, false, false, false, true, true, false]
        );
        assert_eq!(w.combo().range().anchor(), Some(5));
    }

    #[test]
    fn test_checkbox_click_toggles_single_option() {
        let t0 = Instant::now();
        let mut w = opened(3, t0);
        w.click_option(0, Modifiers::NONE, t0);
        w.click_option(1, Modifiers::CTRL, t0);
        let changed = w.click_checkbox(2);
        assert_eq!(changed.len(), 1);
        assert_eq!(checked(&w), vec![false, false, true]);
    }

    #[test]
    fn test_enter_closes_without_checking() {
        let t0 = Instant::now();
        let mut w = opened(3, t0);
        let later = t0 + std::time::Duration::from_secs(1);
        assert!(press(&mut w, Key::Enter, Modifiers::NONE, later).is_empty());
        assert!(!w.view().open);
        assert_eq!(checked(&w), vec![false; 3]);
    }

    #[test]
    fn test_empty_list_ignores_navigation_and_confirm() {
        let t0 = Instant::now();
        let mut w = opened(0, t0);
        press(&mut w, Key::ArrowDown, Modifiers::NONE, t0);
        assert!(press(&mut w, Key::Space, Modifiers::NONE, t0).is_empty());
        assert_eq!(w.view().active_index, 0);
    }
}
