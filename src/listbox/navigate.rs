use crate::listbox::action::MenuAction;

/// Index after applying a navigation action. Clamped to `[0, max]`, never wraps.
/// `max` is `len - 1`; callers must not navigate an empty list.
pub fn next_index(current: usize, max: usize, action: MenuAction) -> usize {
    match action {
        MenuAction::First => 0,
        MenuAction::Last => max,
        MenuAction::Previous => current.saturating_sub(1),
        MenuAction::Next => (current + 1).min(max),
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MenuAction; 11] = [
        MenuAction::Close,
        MenuAction::Confirm,
        MenuAction::First,
        MenuAction::Last,
        MenuAction::Next,
        MenuAction::Open,
        MenuAction::PageDown,
        MenuAction::PageUp,
        MenuAction::Previous,
        MenuAction::Select,
        MenuAction::Type,
    ];

    #[test]
    fn test_first_and_last() {
        assert_eq!(next_index(3, 9, MenuAction::First), 0);
        assert_eq!(next_index(3, 9, MenuAction::Last), 9);
    }

    #[test]
    fn test_clamps_at_edges() {
        assert_eq!(next_index(0, 4, MenuAction::Previous), 0);
        assert_eq!(next_index(4, 4, MenuAction::Next), 4);
        assert_eq!(next_index(2, 4, MenuAction::Next), 3);
        assert_eq!(next_index(2, 4, MenuAction::Previous), 1);
    }

    #[test]
    fn test_result_always_in_bounds() {
        for len in 1..8usize {
            let max = len - 1;
            for current in 0..len {
                for action in ALL {
                    let idx = next_index(current, max, action);
                    assert!(idx <= max, "len={len} current={current} {action:?}");
                }
            }
        }
    }

    #[test]
    fn test_non_navigation_unchanged() {
        assert_eq!(next_index(2, 5, MenuAction::PageDown), 2);
        assert_eq!(next_index(2, 5, MenuAction::PageUp), 2);
        assert_eq!(next_index(2, 5, MenuAction::Select), 2);
    }
}
