use std::io;

use ratatui::DefaultTerminal;

pub type Tui = DefaultTerminal;

/// Enters the alternate screen in raw mode. Also installs a panic hook that restores the terminal.
pub fn init() -> io::Result<Tui> {
    ratatui::try_init()
}

pub fn restore() -> io::Result<()> {
    ratatui::try_restore()
}
