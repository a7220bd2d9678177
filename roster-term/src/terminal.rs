//! Terminal setup and teardown with panic safety.

use std::io::{self, Stdout};
use std::panic;
use std::cell::Cell;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;

/// Set while the table renders rows. Column panics raised then are caught
/// by the row renderer, so the hook must leave the screen alone.
thread_local! {
    static RENDERING: Cell<bool> = const { Cell::new(false) };
}

struct RenderingFlag;

impl Drop for RenderingFlag {
    fn drop(&mut self) {
        RENDERING.set(false);
    }
}

/// Run `f` with panics logged instead of restoring the terminal.
///
/// A panic that escapes `f` still restores the terminal through
/// [`TerminalGuard`]'s `Drop` while unwinding.
pub fn with_caught_panics<R>(f: impl FnOnce() -> R) -> R {
    RENDERING.set(true);
    let _flag = RenderingFlag;
    f()
}

/// Raw-mode alternate screen that is restored on drop and on panic.
pub struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            if RENDERING.get() {
                warn!("Panic while rendering rows: {}", panic_info);
                return;
            }
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        Ok(Self { stdout })
    }

    pub fn stdout(&mut self) -> &mut Stdout {
        &mut self.stdout
    }

    /// Terminal size as `(columns, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Wait up to `timeout` for an event, then drain everything else that is
    /// already pending so the caller can handle a burst in one pass.
    pub fn poll(&self, timeout: Duration) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();
        if event::poll(timeout)? {
            events.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }
        Ok(events)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> io::Result<()> {
    execute!(
        io::stdout(),
        DisableMouseCapture,
        cursor::Show,
        LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendering_flag_scoped_to_closure() {
        assert!(!RENDERING.get());
        assert!(with_caught_panics(|| RENDERING.get()));
        assert!(!RENDERING.get());

        let escaped =
            panic::catch_unwind(|| with_caught_panics::<()>(|| panic!("cell exploded")));
        assert!(escaped.is_err());
        assert!(!RENDERING.get());
    }
}
