use std::io;

use crossterm::{
    event::{
        DisableBracketedPaste, DisableFocusChange, DisableMouseCapture,
        EnableBracketedPaste, EnableFocusChange, EnableMouseCapture,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::{Terminal, prelude::CrosstermBackend};

use anyhow::Result;

/// Where the UI is drawn. Stdout is left to the picked value so the picker
/// works inside `$(...)`.
#[cfg(unix)]
pub type TerminalOutput = std::fs::File;
#[cfg(not(unix))]
pub type TerminalOutput = io::Stderr;

pub type TtyTerminal = Terminal<CrosstermBackend<TerminalOutput>>;

#[cfg(unix)]
fn open_output() -> Result<TerminalOutput> {
    use anyhow::Context;

    std::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open("/dev/tty")
        .context("Failed to open /dev/tty")
}

#[cfg(not(unix))]
fn open_output() -> Result<TerminalOutput> {
    Ok(io::stderr())
}

/// Initializes the controlling terminal in raw mode and alternate screen,
/// with mouse, paste and focus reporting turned on.
///
/// Returns a [`TtyTerminal`] that must later be passed to [`restore`].
pub fn init() -> Result<TtyTerminal> {
    let mut output = open_output()?;
    enable_raw_mode()?;
    execute!(
        output,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(output);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restores the terminal to its normal mode and leaves the alternate screen.
pub fn restore(mut terminal: TtyTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Writes the picked value, and nothing else, to `out`.
pub fn write_value(out: &mut impl io::Write, value: &str) -> io::Result<()> {
    if !value.is_empty() {
        writeln!(out, "{value}")?;
    }
    out.flush()
}
