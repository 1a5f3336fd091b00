//! TTY handling for the interactive preview.
//!
//! The TUI needs a real terminal on stdin for keyboard input; CLI modes work
//! fine piped.

use crossterm::event::Event;
use std::time::Duration;

/// True when stdin is attached to a terminal.
#[cfg(unix)]
pub fn stdin_is_tty() -> bool {
    // SAFETY: isatty only inspects the descriptor
    unsafe { libc::isatty(libc::STDIN_FILENO) == 1 }
}

#[cfg(not(unix))]
pub fn stdin_is_tty() -> bool {
    true
}

/// Poll for a terminal event with a timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<bool> {
    crossterm::event::poll(timeout)
}

/// Read the next terminal event. Call only after [`poll_event`] returned
/// true.
pub fn read_event() -> std::io::Result<Event> {
    crossterm::event::read()
}
