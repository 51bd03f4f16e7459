mod app;
mod event;
mod telemetry;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Margin};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use combolist::config::Config;
use combolist::listbox::Listbox;
use combolist::options::{default_options, load_options};

use app::{App, Pane, Target};
use event::{AppEvent, EventHandler};
use ui::components::listbox::{ListboxLayout, ListboxWidget};
use ui::layout::{AppLayout, pack_hint_lines};
use ui::theme::Theme;

#[derive(Parser)]
#[command(
    name = "combolist",
    version,
    about = "Accessible multi-select and dual-state listbox widgets for the terminal"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Word used in the summary value, e.g. \"book\"")]
    option_type: Option<String>,

    #[arg(short, long, help = "File with one option per line")]
    options: Option<PathBuf>,

    #[arg(short, long, help = "Comma-separated option names to check at startup")]
    check: Option<String>,

    #[arg(long, help = "Write a JSON trace log to the configured log file")]
    log: bool,

    #[arg(long, help = "Print submissions and final widget state as JSON on exit")]
    dump: bool,

    #[arg(long, help = "Save the effective configuration and exit")]
    save_config: bool,

    #[arg(long, help = "List bundled themes and exit")]
    list_themes: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    if let Some(option_type) = &cli.option_type {
        config.option_type = option_type.clone();
    }
    if cli.log {
        config.log_enabled = true;
    }

    if cli.list_themes {
        for name in Theme::available_themes() {
            println!("{name}");
        }
        return Ok(());
    }
    if cli.save_config {
        config.save()?;
        println!("{}", Config::config_path().display());
        return Ok(());
    }

    if config.log_enabled {
        telemetry::init_tracing(Path::new(&config.log_file));
    }

    let options = match &cli.options {
        Some(path) => load_options(path)?,
        None => default_options(),
    };
    let theme: &'static Theme = Box::leak(Box::new(
        Theme::load(&config.theme).unwrap_or_default(),
    ));
    let tick_rate = config.tick_rate();

    let mut app = App::new(&config, theme, options, cli.options.clone());
    if let Some(names) = &cli.check {
        app.precheck(names);
    }
    tracing::info!(options = app.todo.combo().options().len(), "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;

    // Bare Shift presses and key releases drive range selection; terminals
    // without the enhancement fall back to Shift-modified navigation keys.
    let keyboard_enhanced = execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
        )
    )
    .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(tick_rate);

    let result = run_app(&mut terminal, &mut app, &events);

    if keyboard_enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    if cli.dump {
        println!("{}", app.dump_json()?);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;
        app.apply_focus_requests();

        match events.next()? {
            AppEvent::Key(key) => app.handle_key(key, Instant::now()),
            AppEvent::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
            AppEvent::FocusLost => app.focus_lost(Instant::now()),
            AppEvent::Tick => app.tick(Instant::now()),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &mut App) {
    let area = frame.area();
    let theme = app.theme;
    let colors = &theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);

    let header = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Dual state listbox",
            Style::default()
                .fg(colors.header_fg())
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    app.hits.clear();
    for (pane, pane_area) in Pane::ALL.into_iter().zip(layout.panes) {
        let pane_area = pane_area.inner(Margin::new(1, 0));
        let listbox = app.listbox_mut(pane);
        let view = listbox.view();
        let (open, len, scroll_target) = (view.open, view.options.len(), view.scroll_target);
        let lb_layout = ListboxLayout::new(pane_area, open);
        let viewport = lb_layout.viewport_height();

        let focus = listbox.combo_mut().focus_mut();
        match scroll_target {
            Some(target) => {
                focus.maintain_scroll(target, 1, viewport, len);
            }
            None => {
                focus.clamp_scroll(viewport, len);
            }
        }
        let scroll_top = focus.scroll_top();

        app.hits.push(lb_layout.combo, Target::Combo(pane));
        for (index, row) in lb_layout.option_rows(scroll_top, len) {
            app.hits.push(
                row,
                Target::Option {
                    pane,
                    index,
                    checkbox: false,
                },
            );
        }

        let widget = ListboxWidget {
            view: app.listbox(pane).view(),
            layout: lb_layout,
            theme,
            focused: app.focused == pane,
        };
        frame.render_widget(&widget, pane_area);
    }

    render_footer(frame, app, &layout);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, layout: &AppLayout) {
    let colors = &app.theme.colors;
    let hints = [
        "[Tab] Switch list",
        "[↑↓ Home End] Move",
        "[Shift+↑↓] Range",
        "[Space] Check",
        "[Ctrl+Space] Mark",
        "[Esc] Close",
        "[Ctrl+S] Submit",
        "[Ctrl+R] Reload",
        "[Ctrl+Q] Quit",
    ];
    let width = layout.footer.width as usize;
    let mut lines = Vec::new();
    if let Some(status) = &app.status {
        let color = if app.status_error {
            colors.error()
        } else {
            colors.success()
        };
        lines.push(Line::from(Span::styled(
            format!("  {status}"),
            Style::default().fg(color),
        )));
    }
    for hint in pack_hint_lines(&hints, width) {
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(colors.text_dim()),
        )));
    }
    frame.render_widget(Paragraph::new(lines), layout.footer);
}
