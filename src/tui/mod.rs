mod app;
pub mod theme;
mod ui;

pub use app::{App, Focus, MISSING_CONTENT_NOTICE, RowKind, SelectionState, SidebarRow};

use crate::keybindings::{Action, KeybindingMode};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;

/// Run the TUI application.
///
/// This function handles the main event loop for the interactive terminal
/// interface. It processes keyboard events and renders the UI until the user
/// quits.
pub fn run(terminal: &mut DefaultTerminal, app: App) -> Result<()> {
    let mut app = app;

    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let mode = if app.show_help {
            KeybindingMode::Help
        } else {
            KeybindingMode::Normal
        };

        let Some(action) = app.keybindings.dispatch(mode, key) else {
            continue;
        };

        // Any keypress dismisses a lingering notice.
        if app.status_message.is_some() {
            app.status_message = None;
        }

        match action {
            Action::Quit => return Ok(()),
            Action::ToggleHelp => app.toggle_help(),
            Action::Next => app.next(),
            Action::Previous => app.previous(),
            Action::First => app.first(),
            Action::Last => app.last(),
            Action::PageDown => app.scroll_page_down(),
            Action::PageUp => app.scroll_page_up(),
            Action::Activate => app.activate(),
            Action::CollapseAll => app.collapse_all(),
            Action::ToggleSidebar => app.toggle_sidebar(),
            Action::ToggleFocus => app.toggle_focus(),
        }
    }
}
