mod app;
mod layout;
pub mod terminal_compat;
pub mod theme;
pub mod tty;
mod ui;
mod watcher;

pub use app::App;
pub use terminal_compat::{ColorMode, TerminalCapabilities};
pub use theme::ThemeName;

use color_eyre::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;

/// Run the interactive preview until the user quits.
pub fn run(terminal: &mut DefaultTerminal, app: App) -> Result<()> {
    let mut app = app;
    app.update_active();

    let mut file_watcher = watcher::FileWatcher::new().ok();
    if let Some(ref mut watcher) = file_watcher {
        let _ = watcher.watch(&app.current_file_path);
    }

    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        // Poll with a timeout so external edits are picked up while idle
        if !tty::poll_event(Duration::from_millis(100))? {
            if let Some(ref mut watcher) = file_watcher {
                if watcher.check_for_changes() {
                    match app.reload_current_file() {
                        Ok(()) => {
                            app.status_message = Some("Reloaded (external change)".to_string());
                        }
                        Err(e) => app.status_message = Some(format!("Reload failed: {e}")),
                    }
                }
            }
            continue;
        }

        if let Event::Key(key) = tty::read_event()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if app.show_help {
                match key.code {
                    KeyCode::Char('?') | KeyCode::Esc => app.toggle_help(),
                    KeyCode::Char('q') => return Ok(()),
                    _ => {}
                }
                continue;
            }

            if app.show_filter {
                match key.code {
                    KeyCode::Esc => app.clear_filter(),
                    KeyCode::Enter => app.show_filter = false,
                    KeyCode::Backspace => app.filter_backspace(),
                    KeyCode::Down => app.next_entry(),
                    KeyCode::Up => app.previous_entry(),
                    KeyCode::Char(c) => app.filter_input(c),
                    _ => {}
                }
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('?') => app.toggle_help(),
                KeyCode::Char('/') | KeyCode::Char('s') => app.toggle_filter(),
                KeyCode::Tab => app.toggle_focus(),
                KeyCode::Char('j') | KeyCode::Down => match app.focus {
                    app::Focus::Outline => app.next_entry(),
                    app::Focus::Content => app.scroll_down(1),
                },
                KeyCode::Char('k') | KeyCode::Up => match app.focus {
                    app::Focus::Outline => app.previous_entry(),
                    app::Focus::Content => app.scroll_up(1),
                },
                KeyCode::Char('d') | KeyCode::PageDown => app.scroll_page_down(),
                KeyCode::Char('u') | KeyCode::PageUp => app.scroll_page_up(),
                KeyCode::Char('g') => app.scroll_top(),
                KeyCode::Char('G') => app.scroll_bottom(),
                KeyCode::Enter => app.jump_to_selected(),
                KeyCode::Char('y') => app.copy_anchor(),
                KeyCode::Char('o') => app.open_in_browser(),
                KeyCode::Char('w') => app.toggle_outline(),
                KeyCode::Char('[') => app.cycle_outline_width(false),
                KeyCode::Char(']') => app.cycle_outline_width(true),
                KeyCode::Char('S') => app.save_outline_width(),
                KeyCode::Char('t') => app.cycle_theme(),
                KeyCode::Char('r') => match app.reload_current_file() {
                    Ok(()) => app.status_message = Some("Reloaded".to_string()),
                    Err(e) => app.status_message = Some(format!("Reload failed: {e}")),
                },
                _ => {}
            }
        }
    }
}
