use color_eyre::eyre::{eyre, Result};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout, Write};

pub type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode plus the alternate screen. A failure part way through restores
/// the terminal before returning the error.
pub fn setup_terminal() -> Result<DashboardTerminal> {
    enable_raw_mode().map_err(|e| eyre!("Failed to enable raw mode: {e}"))?;

    let mut terminal = execute!(stdout(), EnterAlternateScreen, cursor::Hide)
        .and_then(|()| Terminal::new(CrosstermBackend::new(stdout())))
        .map_err(|e| {
            cleanup_terminal_state();
            eyre!("Failed to prepare the dashboard screen: {e}")
        })?;

    if let Err(e) = terminal.clear() {
        tracing::warn!(error = %e, "failed to clear terminal");
    }

    let size = terminal.size().ok();
    tracing::info!(?size, "terminal ready");
    Ok(terminal)
}

/// Leaves the alternate screen and raw mode. Each step is attempted even
/// when an earlier one fails.
pub fn cleanup_terminal_state() {
    let mut out = stdout();

    if let Err(e) = execute!(out, cursor::Show, LeaveAlternateScreen) {
        tracing::warn!(error = %e, "failed to leave alternate screen");
    }
    if let Err(e) = disable_raw_mode() {
        tracing::warn!(error = %e, "failed to disable raw mode");
    }
    let _ = out.flush();

    tracing::info!("terminal restored");
}
