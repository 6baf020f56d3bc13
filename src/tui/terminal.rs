//! Ownership of the terminal while the browser runs

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type Backend = CrosstermBackend<Stdout>;

/// Raw mode plus the alternate screen, restored when dropped.
///
/// Dropping happens on every way out of the event loop, including `?` returns
/// and panics that unwind. A panic hook restores the screen before the panic
/// message is printed so the message stays visible.
pub struct TerminalSession {
    terminal: Terminal<Backend>,
}

impl TerminalSession {
    pub fn start() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => {
                install_panic_hook();
                Ok(Self { terminal })
            }
            Err(e) => {
                restore(&mut io::stdout());
                Err(e)
            }
        }
    }

    pub fn terminal(&mut self) -> &mut Terminal<Backend> {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore(self.terminal.backend_mut());
        // take_hook panics on a panicking thread
        if !std::thread::panicking() {
            drop(panic::take_hook());
        }
    }
}

fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore(&mut io::stdout());
        original_hook(info);
    }));
}

/// Leave raw mode and the alternate screen and show the cursor again.
fn restore<W: Write>(out: &mut W) {
    let _ = disable_raw_mode();
    leave_screen(out);
}

fn leave_screen<W: Write>(out: &mut W) {
    let _ = execute!(out, LeaveAlternateScreen, Show);
}
