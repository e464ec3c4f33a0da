// TUI Controller - Bridges the terminal with the Session
//
// This module contains the TuiController which:
// - Puts the terminal into raw mode / alternate screen and restores it
// - Decodes crossterm key events into session Requests
// - Feeds Requests to the Session one at a time and logs the StateChanges
// - Redraws after every event

use crate::state::{Mode, Request, Session, StateChange};
use crate::ui::view;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout, Write};

/// Which key map applies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Typing a directory path: printable keys are text
    Prompt,
    /// Browsing: single-key commands
    Commands,
}

impl InputMode {
    pub fn of(session: &Session) -> Self {
        match session.mode() {
            Mode::AwaitingDirectory { .. } => InputMode::Prompt,
            Mode::Browsing(_) => InputMode::Commands,
        }
    }
}

/// Translate a key press into a session request.
///
/// `Ctrl+C` quits everywhere. While typing a path `q` is just a letter, so
/// `Esc` is the way out of the prompt.
pub fn map_key(mode: InputMode, key: KeyEvent) -> Option<Request> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Request::Quit),
            _ => None,
        };
    }

    match mode {
        InputMode::Prompt => match key.code {
            KeyCode::Enter => Some(Request::Submit),
            KeyCode::Esc => Some(Request::Quit),
            KeyCode::Backspace => Some(Request::DeleteChar),
            KeyCode::Char(c) => Some(Request::Input(c)),
            _ => None,
        },
        InputMode::Commands => match key.code {
            KeyCode::Enter => Some(Request::Submit),
            KeyCode::Esc => Some(Request::ToggleFocus),
            KeyCode::Up | KeyCode::Char('k') => Some(Request::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Request::Down),
            KeyCode::Char('b') => Some(Request::Back),
            KeyCode::Char('q') => Some(Request::Quit),
            KeyCode::Char(c @ '1'..='9') => Some(Request::SelectRow(c as usize - '1' as usize)),
            _ => None,
        },
    }
}

/// Owns the terminal for the lifetime of the interactive session
pub struct TuiController {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    session: Session,
}

impl TuiController {
    /// Enter raw mode and the alternate screen.
    pub fn new(session: Session) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = leave_screen(&mut io::stdout());
            return Err(e).context("Failed to enter alternate screen");
        }
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = leave_screen(&mut io::stdout());
                return Err(e).context("Failed to create terminal");
            }
        };

        tracing::info!("TUI controller initialized");
        Ok(Self { terminal, session })
    }

    /// Run the event loop until the operator quits, then restore the
    /// terminal. The session is handed back so the caller can report on it.
    pub fn run(mut self) -> Result<Session> {
        let result = self.event_loop();
        let restore = self.restore();
        result?;
        restore?;
        Ok(self.session)
    }

    fn event_loop(&mut self) -> Result<()> {
        while !self.session.should_quit() {
            let session = &self.session;
            self.terminal
                .draw(|frame| view::draw(frame, session))
                .context("Failed to draw frame")?;

            let Event::Key(key) = event::read().context("Failed to read terminal event")? else {
                continue;
            };
            let Some(request) = map_key(InputMode::of(&self.session), key) else {
                continue;
            };

            for change in self.session.handle(request) {
                log_change(&change);
            }
        }
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        leave_screen(self.terminal.backend_mut())?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Undo raw mode and the alternate screen, on every exit path out of the TUI
fn leave_screen<W: Write>(out: &mut W) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(out, LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    Ok(())
}

fn log_change(change: &StateChange) {
    match change {
        StateChange::InputChanged { .. } => {}
        StateChange::ScanCompleted { root, total } => {
            tracing::info!("Browsing {} ({} known files)", root, total);
        }
        StateChange::ScanFailed { root, message } => {
            tracing::warn!("Staying at directory prompt, {} failed: {}", root, message);
        }
        StateChange::ToggleApplied {
            filename,
            modified,
            file_errors,
            aborted,
        } => {
            tracing::info!(
                "Applied {}: {} modified, {} errors, aborted: {}",
                filename,
                modified,
                file_errors,
                aborted
            );
        }
        other => tracing::debug!("State change: {:?}", other),
    }
}
