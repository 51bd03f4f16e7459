use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use serde::Serialize;

use combolist::config::Config;
use combolist::listbox::{
    KeyInput, Listbox, ListboxView, Modifiers, MultiSelect, SelectionChanged, TodoList,
};
use combolist::options::{self, load_options};

use crate::ui::components::listbox::is_checkbox_hit;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pane {
    Todo,
    MultiSelect,
}

impl Pane {
    pub const ALL: [Pane; 2] = [Pane::Todo, Pane::MultiSelect];

    pub fn other(self) -> Self {
        match self {
            Pane::Todo => Pane::MultiSelect,
            Pane::MultiSelect => Pane::Todo,
        }
    }
}

/// What a pointer landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Combo(Pane),
    Option {
        pane: Pane,
        index: usize,
        checkbox: bool,
    },
}

/// Clickable regions recorded during the last render.
#[derive(Clone, Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Target)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, rect: Rect, target: Target) {
        self.regions.push((rect, target));
    }

    pub fn target_at(&self, column: u16, row: u16) -> Option<Target> {
        let pos = Position::new(column, row);
        self.regions
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|&(rect, target)| match target {
                Target::Option { pane, index, .. } => Target::Option {
                    pane,
                    index,
                    checkbox: is_checkbox_hit(rect, column),
                },
                other => other,
            })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Submission {
    pub label: String,
    pub value: String,
    pub checked: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

pub struct App {
    pub theme: &'static Theme,
    pub todo: TodoList,
    pub multiselect: MultiSelect,
    pub focused: Pane,
    pub options_path: Option<PathBuf>,
    pub status: Option<String>,
    pub status_error: bool,
    pub submissions: Vec<Submission>,
    pub hits: HitMap,
    pub should_quit: bool,
    pressed: Option<Target>,
}

impl App {
    pub fn new(
        config: &Config,
        theme: &'static Theme,
        options: Vec<String>,
        options_path: Option<PathBuf>,
    ) -> Self {
        let timings = config.timings();
        let todo = TodoList::new(
            &config.todo_label,
            options.clone(),
            config.option_type(),
            timings,
        );
        let multiselect = MultiSelect::new(
            &config.multiselect_label,
            options,
            config.option_type(),
            timings,
        );
        Self {
            theme,
            todo,
            multiselect,
            focused: Pane::Todo,
            options_path,
            status: None,
            status_error: false,
            submissions: Vec::new(),
            hits: HitMap::default(),
            should_quit: false,
            pressed: None,
        }
    }

    pub fn listbox(&self, pane: Pane) -> &dyn Listbox {
        match pane {
            Pane::Todo => &self.todo,
            Pane::MultiSelect => &self.multiselect,
        }
    }

    pub fn listbox_mut(&mut self, pane: Pane) -> &mut dyn Listbox {
        match pane {
            Pane::Todo => &mut self.todo,
            Pane::MultiSelect => &mut self.multiselect,
        }
    }

    /// Pre-check options named in a comma-separated list, in both widgets.
    pub fn precheck(&mut self, names: &str) {
        let found = options::find_matches(self.todo.combo().options(), names);
        for pane in Pane::ALL {
            self.listbox_mut(pane).combo_mut().store_mut().check_names(&found);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let input = KeyInput::from(&key);

        if key.kind == KeyEventKind::Release {
            self.listbox_mut(self.focused).key_up(input.key);
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('s') => {
                    self.submit();
                    return;
                }
                KeyCode::Char('r') => {
                    if let Err(err) = self.reload_options() {
                        tracing::warn!(error = %err, "option reload failed");
                        self.set_status(format!("Reload failed: {err}"), true);
                    }
                    return;
                }
                _ => {}
            }
        }

        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.focus(self.focused.other(), now);
            return;
        }

        let pane = self.focused;
        let changed = self.listbox_mut(pane).key_down(input, now);
        self.notify(pane, changed);
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let target = self.hits.target_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed = target;
                match target {
                    None => self.listbox_mut(self.focused).blur(now),
                    Some(Target::Combo(pane)) => self.focus(pane, now),
                    Some(Target::Option { pane, .. }) => {
                        // Focus leaves the input for the option; the widget
                        // suppresses the resulting blur.
                        let listbox = self.listbox_mut(pane);
                        listbox.mouse_down_option();
                        listbox.blur(now);
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let pressed = self.pressed.take();
                if target.is_none() || target != pressed {
                    return;
                }
                match target {
                    Some(Target::Combo(pane)) => self.listbox_mut(pane).click_combo(now),
                    Some(Target::Option {
                        pane,
                        index,
                        checkbox,
                    }) => {
                        let modifiers = Modifiers::from(mouse.modifiers);
                        self.click_option(pane, index, checkbox, modifiers, now);
                    }
                    None => {}
                }
            }
            _ => {}
        }
    }

    fn click_option(
        &mut self,
        pane: Pane,
        index: usize,
        checkbox: bool,
        modifiers: Modifiers,
        now: Instant,
    ) {
        let mut changed = Vec::new();
        if checkbox && pane == Pane::Todo {
            changed.extend(self.todo.click_checkbox(index));
        }
        changed.extend(self.listbox_mut(pane).click_option(index, modifiers, now));
        self.notify(pane, changed);
    }

    /// The terminal lost focus: the focused widget blurs like its input would.
    pub fn focus_lost(&mut self, now: Instant) {
        self.listbox_mut(self.focused).blur(now);
    }

    pub fn tick(&mut self, now: Instant) {
        for pane in Pane::ALL {
            self.listbox_mut(pane).tick(now);
        }
    }

    /// Move keyboard focus to `pane`, blurring the widget that had it.
    pub fn focus(&mut self, pane: Pane, now: Instant) {
        if pane != self.focused {
            self.listbox_mut(self.focused).blur(now);
            self.focused = pane;
        }
    }

    /// Hand focus to whichever input asked for it during the last transition.
    pub fn apply_focus_requests(&mut self) {
        for pane in Pane::ALL {
            if self.listbox_mut(pane).combo_mut().focus_mut().take_focus_request() {
                self.focused = pane;
            }
        }
    }

    fn notify(&mut self, pane: Pane, changed: Vec<SelectionChanged>) {
        if changed.is_empty() {
            return;
        }
        for change in &changed {
            tracing::info!(?pane, name = %change.name, checked = change.checked, "selection changed");
        }
        let combo = self.listbox(pane).combo();
        let message = format!("{} updated: {}", combo.label().to_lowercase(), combo.value());
        self.set_status(message, false);
    }

    fn set_status(&mut self, message: String, error: bool) {
        self.status = Some(message);
        self.status_error = error;
    }

    pub fn submit(&mut self) {
        let combo = self.multiselect.combo();
        let submission = Submission {
            label: combo.label().to_string(),
            value: combo.value().to_string(),
            checked: combo.store().checked_names().map(str::to_string).collect(),
            submitted_at: Utc::now(),
        };
        tracing::info!(count = submission.checked.len(), "order submitted");
        self.set_status(format!("Order submitted: {}", submission.value), false);
        self.submissions.push(submission);
    }

    pub fn reload_options(&mut self) -> Result<()> {
        let options = match &self.options_path {
            Some(path) => load_options(path)?,
            None => options::default_options(),
        };
        let len = options.len();
        for pane in Pane::ALL {
            self.listbox_mut(pane).set_options(options.clone());
        }
        self.set_status(format!("Reloaded {len} options"), false);
        Ok(())
    }
}

#[derive(Serialize)]
struct PaneDump<'a> {
    pane: Pane,
    #[serde(flatten)]
    view: ListboxView<'a>,
}

#[derive(Serialize)]
struct Dump<'a> {
    widgets: Vec<PaneDump<'a>>,
    submissions: &'a [Submission],
}

impl App {
    /// Final widget state and every submission, as pretty JSON.
    pub fn dump_json(&self) -> Result<String> {
        let dump = Dump {
            widgets: Pane::ALL
                .into_iter()
                .map(|pane| PaneDump {
                    pane,
                    view: self.listbox(pane).view(),
                })
                .collect(),
            submissions: &self.submissions,
        };
        Ok(serde_json::to_string_pretty(&dump)?)
    }
}
