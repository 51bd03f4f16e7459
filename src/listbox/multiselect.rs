use std::time::Instant;

use crate::listbox::Timings;
use crate::listbox::action::{KeyInput, MenuAction, Modifiers, classify};
use crate::listbox::combo::{ComboBox, Listbox};
use crate::listbox::store::{Flag, SelectionChanged};

/// Single-state multi-select: each option is checked or not.
///
/// Space toggles the active option. Shift+navigation checks (or unchecks)
/// the span between the anchor and the active option.
#[derive(Clone, Debug)]
pub struct MultiSelect {
    combo: ComboBox,
}

impl MultiSelect {
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
}

impl Listbox for MultiSelect {
    fn combo(&self) -> &ComboBox {
        &self.combo
    }

    fn combo_mut(&mut self) -> &mut ComboBox {
        &mut self.combo
    }

    fn key_down(&mut self, input: KeyInput, now: Instant) -> Vec<SelectionChanged> {
        let combo = &mut self.combo;
        let action = classify(input, combo.is_open());

        if combo.track_range_modifier(input, action, Flag::Checked) {
            return Vec::new();
        }

        let Some(action) = action else {
            return Vec::new();
        };

        match action {
            MenuAction::Next | MenuAction::Last | MenuAction::First | MenuAction::Previous => {
                if let Some(index) = combo.navigate(action) {
                    if input.modifiers.shift {
                        let value = combo.range().check_state();
                        combo.apply_range(Flag::Checked, index, value);
                    }
                    combo.set_active(index);
                }
                Vec::new()
            }
            MenuAction::Select => combo.toggle_checked(combo.active_index()),
            MenuAction::Confirm | MenuAction::Close => {
                combo.set_open(false, true, now);
                Vec::new()
            }
            MenuAction::Type => {
                combo.type_key(input.key, now);
                Vec::new()
            }
            MenuAction::Open => {
                combo.set_open(true, true, now);
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
        let combo = &mut self.combo;
        if !modifiers.shift {
            combo.end_range();
        }
        if index >= combo.options().len() {
            return Vec::new();
        }

        let changed = if modifiers.shift {
            combo.begin_range(Flag::Checked);
            // The anchor's own state spreads over the span.
            let value = combo
                .range()
                .anchor()
                .and_then(|anchor| combo.store().get(anchor))
                .is_some_and(|state| state.checked);
            combo.apply_range(Flag::Checked, index, value);
            Vec::new()
        } else {
            combo.toggle_checked(index)
        };

        combo.set_active(index);
        changed
    }
}
