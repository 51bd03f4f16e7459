use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥80 cols: widgets side by side
    Narrow, // <80 cols: widgets stacked
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 80 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }
}

pub struct AppLayout {
    pub header: Rect,
    /// Todo-list pane, then multi-select pane.
    pub panes: [Rect; 2],
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        let direction = match LayoutTier::from_area(area) {
            LayoutTier::Wide => Direction::Horizontal,
            LayoutTier::Narrow => Direction::Vertical,
        };
        let panes = Layout::default()
            .direction(direction)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(vertical[1]);

        Self {
            header: vertical[0],
            panes: [panes[0], panes[1]],
            footer: vertical[2],
        }
    }
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = "  ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_area_splits_horizontally() {
        let area = Rect::new(0, 0, 120, 40);
        assert_eq!(LayoutTier::from_area(area), LayoutTier::Wide);
        let layout = AppLayout::new(area);
        assert_eq!(layout.panes[0].y, layout.panes[1].y);
        assert!(layout.panes[0].x < layout.panes[1].x);
    }

    #[test]
    fn test_narrow_area_stacks() {
        let area = Rect::new(0, 0, 60, 40);
        assert_eq!(LayoutTier::from_area(area), LayoutTier::Narrow);
        let layout = AppLayout::new(area);
        assert_eq!(layout.panes[0].x, layout.panes[1].x);
        assert!(layout.panes[0].y < layout.panes[1].y);
    }

    #[test]
    fn test_hints_wrap_to_width() {
        let lines = pack_hint_lines(&["[Tab] Switch", "[Space] Check", "[Esc] Close"], 30);
        assert_eq!(lines, vec!["  [Tab] Switch  [Space] Check", "  [Esc] Close"]);
    }
}
