use std::ops::RangeInclusive;

use serde::Serialize;

/// Per-option flags, kept in the same order as the option list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OptionState {
    pub name: String,
    pub checked: bool,
    /// Dual-state cursor/marking flag. Always false in the single-state widget.
    pub selected: bool,
}

impl OptionState {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            checked: false,
            selected: false,
        }
    }

    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::Checked => self.checked,
            Flag::Selected => self.selected,
        }
    }

    fn set_flag(&mut self, flag: Flag, value: bool) {
        match flag {
            Flag::Checked => self.checked = value,
            Flag::Selected => self.selected = value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    Checked,
    Selected,
}

/// Emitted once per confirmed check/uncheck. Never for cursor movement or range staging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectionChanged {
    pub name: String,
    pub checked: bool,
}

/// Ordered option flags plus the derived summary value.
///
/// Every mutating operation is one state transition: it bumps `version` once
/// and recomputes the summary, however many options it touched.
#[derive(Clone, Debug)]
pub struct OptionStore {
    states: Vec<OptionState>,
    option_type: Option<String>,
    value: String,
    version: u64,
}

impl OptionStore {
    pub fn new<S: AsRef<str>>(options: &[S], option_type: Option<&str>) -> Self {
        let states = options
            .iter()
            .map(|option| OptionState::new(option.as_ref()))
            .collect();
        let mut store = Self {
            states,
            option_type: option_type.map(str::to_string),
            value: String::new(),
            version: 0,
        };
        store.value = store.compute_value();
        store
    }

    /// Rebuild the states for a replaced option list. Options whose name existed
    /// before keep their flags (first match wins on duplicate names); new names
    /// start with every flag cleared.
    pub fn reconcile<S: AsRef<str>>(&mut self, options: &[S]) {
        let previous = std::mem::take(&mut self.states);
        self.states = options
            .iter()
            .map(|option| {
                let name = option.as_ref();
                previous
                    .iter()
                    .find(|state| state.name == name)
                    .cloned()
                    .unwrap_or_else(|| OptionState::new(name))
            })
            .collect();
        self.commit();
    }

    pub fn states(&self) -> &[OptionState] {
        &self.states
    }

    pub fn get(&self, index: usize) -> Option<&OptionState> {
        self.states.get(index)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Derived summary, e.g. "3 books selected".
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn checked_count(&self) -> usize {
        self.states.iter().filter(|state| state.checked).count()
    }

    pub fn checked_names(&self) -> impl Iterator<Item = &str> {
        self.states
            .iter()
            .filter(|state| state.checked)
            .map(|state| state.name.as_str())
    }

    /// Flip `checked` at `index`. Out-of-range indices are ignored.
    pub fn toggle_checked(&mut self, index: usize) -> Option<SelectionChanged> {
        let state = self.states.get_mut(index)?;
        state.checked = !state.checked;
        let changed = SelectionChanged {
            name: state.name.clone(),
            checked: state.checked,
        };
        self.commit();
        Some(changed)
    }

    /// Set `selected` at `index`. With `exclusive`, every other option is deselected.
    pub fn set_selected(&mut self, index: usize, value: bool, exclusive: bool) {
        if index >= self.states.len() {
            return;
        }
        if exclusive {
            for (i, state) in self.states.iter_mut().enumerate() {
                state.selected = i == index && value;
            }
        } else {
            self.states[index].selected = value;
        }
        self.commit();
    }

    /// Toggle `checked` on the active option and on every selected option.
    pub fn confirm_selected_or_active(&mut self, active: usize) -> Vec<SelectionChanged> {
        let mut changed = Vec::new();
        for (i, state) in self.states.iter_mut().enumerate() {
            if i == active || state.selected {
                state.checked = !state.checked;
                changed.push(SelectionChanged {
                    name: state.name.clone(),
                    checked: state.checked,
                });
            }
        }
        if !changed.is_empty() {
            self.commit();
        }
        changed
    }

    /// Check every option whose name is listed. No notifications are produced.
    pub fn check_names<S: AsRef<str>>(&mut self, names: &[S]) {
        for state in &mut self.states {
            if names.iter().any(|name| name.as_ref() == state.name) {
                state.checked = true;
            }
        }
        self.commit();
    }

    /// Apply a range edit as one transition: `restore` (if any) is written
    /// first, then `apply`. Indices past the end are skipped.
    pub(crate) fn write_spans(
        &mut self,
        flag: Flag,
        restore: Option<(RangeInclusive<usize>, bool)>,
        apply: (RangeInclusive<usize>, bool),
    ) {
        for (span, value) in restore.into_iter().chain(std::iter::once(apply)) {
            for state in self.states.iter_mut().take(span.end() + 1).skip(*span.start()) {
                state.set_flag(flag, value);
            }
        }
        self.commit();
    }

    fn commit(&mut self) {
        self.version += 1;
        self.value = self.compute_value();
    }

    fn compute_value(&self) -> String {
        summary(self.checked_count(), self.option_type.as_deref())
    }
}

/// Human-readable summary of the checked count. An unset or empty type reads as "option".
pub fn summary(checked: usize, option_type: Option<&str>) -> String {
    let word = option_type.filter(|t| !t.is_empty()).unwrap_or("option");
    match checked {
        0 => format!("No {word}s selected"),
        1 => format!("1 {word} selected"),
        n => format!("{n} {word}s selected"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn store(list: &[&str]) -> OptionStore {
        OptionStore::new(&names(list), Some("book"))
    }

    #[test]
    fn test_summary_strings() {
        assert_eq!(summary(0, Some("book")), "No books selected");
        assert_eq!(summary(1, Some("book")), "1 book selected");
        assert_eq!(summary(3, Some("book")), "3 books selected");
        assert_eq!(summary(2, None), "2 options selected");
        assert_eq!(summary(1, Some("")), "1 option selected");
    }

    #[test]
    fn test_new_store_starts_unchecked() {
        let s = store(&["a", "b"]);
        assert_eq!(s.len(), 2);
        assert!(s.states().iter().all(|st| !st.checked && !st.selected));
        assert_eq!(s.value(), "No books selected");
    }

    #[test]
    fn test_toggle_checked_updates_value_and_reports_name() {
        let mut s = store(&["a", "b", "c"]);
        let changed = s.toggle_checked(1).unwrap();
        assert_eq!(changed, SelectionChanged { name: "b".into(), checked: true });
        assert_eq!(s.value(), "1 book selected");
        let changed = s.toggle_checked(1).unwrap();
        assert!(!changed.checked);
        assert_eq!(s.value(), "No books selected");
        assert!(s.toggle_checked(9).is_none());
    }

    #[test]
    fn test_reconcile_identical_list_is_idempotent() {
        let mut s = store(&["a", "b", "c"]);
        s.toggle_checked(0);
        s.set_selected(2, true, false);
        let before = s.states().to_vec();
        s.reconcile(&names(&["a", "b", "c"]));
        assert_eq!(s.states(), &before[..]);
    }

    #[test]
    fn test_reconcile_rename_drops_only_renamed_flags() {
        let mut s = store(&["a", "b", "c"]);
        s.toggle_checked(0);
        s.toggle_checked(1);
        s.reconcile(&names(&["a", "B2", "c"]));
        assert!(s.get(0).unwrap().checked);
        assert_eq!(s.get(1).unwrap(), &OptionState::new("B2"));
        assert!(!s.get(2).unwrap().checked);
        assert_eq!(s.value(), "1 book selected");
    }

    #[test]
    fn test_reconcile_follows_names_through_reorder() {
        let mut s = store(&["a", "b", "c"]);
        s.toggle_checked(2);
        s.reconcile(&names(&["c", "a"]));
        assert_eq!(s.len(), 2);
        assert!(s.get(0).unwrap().checked);
        assert!(!s.get(1).unwrap().checked);
    }

    #[test]
    fn test_reconcile_duplicate_names_take_first_match() {
        let mut s = store(&["a", "a", "b"]);
        s.toggle_checked(0);
        s.reconcile(&names(&["a"]));
        assert!(s.get(0).unwrap().checked);
    }

    #[test]
    fn test_exclusive_selection_moves_cursor() {
        let mut s = store(&["a", "b", "c", "d"]);
        s.set_selected(1, true, false);
        s.set_selected(3, true, false);
        s.set_selected(2, true, true);
        let selected: Vec<bool> = s.states().iter().map(|st| st.selected).collect();
        assert_eq!(selected, vec![false, false, true, false]);
    }

    #[test]
    fn test_selected_and_checked_are_independent() {
        let mut s = store(&["a", "b"]);
        s.set_selected(0, true, true);
        s.toggle_checked(1);
        assert!(s.get(0).unwrap().selected && !s.get(0).unwrap().checked);
        assert!(!s.get(1).unwrap().selected && s.get(1).unwrap().checked);
    }

    #[test]
    fn test_bulk_confirm_toggles_active_and_selected_only() {
        let mut s = store(&["a", "b", "c", "d", "e"]);
        s.set_selected(2, true, false);
        s.set_selected(4, true, false);
        let version = s.version();
        let changed = s.confirm_selected_or_active(2);
        assert_eq!(
            changed,
            vec![
                SelectionChanged { name: "c".into(), checked: true },
                SelectionChanged { name: "e".into(), checked: true },
            ]
        );
        let checked: Vec<bool> = s.states().iter().map(|st| st.checked).collect();
        assert_eq!(checked, vec![false, false, true, false, true]);
        assert_eq!(s.version(), version + 1);
        assert_eq!(s.value(), "2 books selected");
    }

    #[test]
    fn test_check_names_is_one_transition() {
        let mut s = store(&["a", "b", "c"]);
        let version = s.version();
        s.check_names(&["a", "c", "zz"]);
        assert_eq!(s.checked_names().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(s.version(), version + 1);
    }

    #[test]
    fn test_write_spans_restores_then_applies() {
        let mut s = store(&["a", "b", "c", "d"]);
        s.write_spans(Flag::Selected, Some((0..=3, false)), (1..=2, true));
        let selected: Vec<bool> = s.states().iter().map(|st| st.selected).collect();
        assert_eq!(selected, vec![false, true, true, false]);
    }
}
