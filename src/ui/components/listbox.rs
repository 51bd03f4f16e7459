use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use combolist::listbox::ListboxView;

use crate::ui::theme::Theme;

/// Columns of an option row occupied by the checkbox, relative to the row.
pub const CHECKBOX_COLUMNS: Range<u16> = 2..5;

/// Screen regions of one widget: label, combo input, and the menu when open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListboxLayout {
    pub label: Rect,
    pub combo: Rect,
    pub menu: Option<Rect>,
}

impl ListboxLayout {
    pub fn new(area: Rect, open: bool) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let menu = (open && chunks[2].height > 2).then_some(chunks[2]);
        Self {
            label: chunks[0],
            combo: chunks[1],
            menu,
        }
    }

    fn menu_inner(&self) -> Option<Rect> {
        self.menu.map(|menu| Block::bordered().inner(menu))
    }

    /// Rows available for options.
    pub fn viewport_height(&self) -> usize {
        self.menu_inner().map_or(0, |inner| inner.height as usize)
    }

    /// Visible option rows as (option index, row rect).
    pub fn option_rows(&self, scroll_top: usize, len: usize) -> Vec<(usize, Rect)> {
        let Some(inner) = self.menu_inner() else {
            return Vec::new();
        };
        (scroll_top..len)
            .take(inner.height as usize)
            .enumerate()
            .map(|(row, index)| {
                let y = inner.y + row as u16;
                (index, Rect::new(inner.x, y, inner.width, 1))
            })
            .collect()
    }
}

pub fn is_checkbox_hit(row: Rect, column: u16) -> bool {
    CHECKBOX_COLUMNS.contains(&column.saturating_sub(row.x))
}

pub struct ListboxWidget<'a> {
    pub view: ListboxView<'a>,
    pub layout: ListboxLayout,
    pub theme: &'a Theme,
    pub focused: bool,
}

impl Widget for &ListboxWidget<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let view = &self.view;

        Paragraph::new(Line::from(Span::styled(
            view.label,
            Style::default()
                .fg(colors.fg())
                .add_modifier(Modifier::BOLD),
        )))
        .render(self.layout.label, buf);

        let border = if self.focused {
            colors.border_focused()
        } else {
            colors.border()
        };
        let arrow = if view.open { "▴" } else { "▾" };
        let combo = Block::bordered().border_style(Style::default().fg(border));
        let combo_inner = combo.inner(self.layout.combo);
        combo.render(self.layout.combo, buf);
        Paragraph::new(Line::from(vec![
            Span::styled(view.value, Style::default().fg(colors.fg())),
            Span::raw(" "),
            Span::styled(arrow, Style::default().fg(colors.accent())),
        ]))
        .render(combo_inner, buf);

        let Some(menu) = self.layout.menu else {
            return;
        };

        let rows = self.layout.option_rows(view.scroll_top, view.options.len());
        let hidden_below = view.scroll_top + rows.len() < view.options.len();
        let mut block = Block::bordered().border_style(Style::default().fg(colors.border()));
        if view.scroll_top > 0 {
            block = block.title_top(Line::from("▲").right_aligned());
        }
        if hidden_below {
            block = block.title_bottom(Line::from("▼").right_aligned());
        }
        block.render(menu, buf);

        for (index, row) in rows {
            let state = &view.states[index];
            let is_current = index == view.active_index;

            let mut style = Style::default().fg(colors.fg());
            if state.selected {
                style = style.bg(colors.option_selected_bg());
            }
            if is_current {
                style = style
                    .bg(colors.option_current_bg())
                    .add_modifier(Modifier::BOLD);
            }

            let indicator = if is_current { ">" } else { " " };
            let mark = if state.checked { "x" } else { " " };
            let line = Line::from(vec![
                Span::styled(format!("{indicator} ["), style),
                Span::styled(mark, style.fg(colors.option_checked())),
                Span::styled("] ", style),
                Span::styled(view.options[index].as_str(), style),
            ]);
            Paragraph::new(line).style(style).render(row, buf);
        }
    }
}
