/*
 * Terminal lifecycle for the game screen.
 * Acquiring the guard switches the terminal to raw mode on the alternate
 * screen; dropping it (or panicking while it is held) puts everything back.
 */

use crate::core::Result;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use tracing::{debug, warn};

static ACQUIRED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK: Once = Once::new();

/// Exclusive control of the terminal for the lifetime of the value.
pub struct TerminalGuard {
    released: bool,
}

impl TerminalGuard {
    /// Enters raw mode and the alternate screen and hides the cursor.
    pub fn acquire() -> Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        ACQUIRED.store(true, Ordering::SeqCst);
        let guard = TerminalGuard { released: false };
        // On failure the guard drops here and undoes raw mode
        execute!(stdout(), EnterAlternateScreen, Hide)?;
        debug!("Terminal acquired");
        Ok(guard)
    }

    /// Restores the terminal now instead of on drop.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        restore()?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = restore() {
                warn!("Failed to restore terminal: {}", e);
            }
        }
    }
}

/// Current terminal size as `(columns, rows)`.
pub fn terminal_size() -> Result<(u16, u16)> {
    Ok(terminal::size()?)
}

/// Puts the terminal back into its normal state. Only the first call after
/// an acquire does anything.
fn restore() -> io::Result<()> {
    if !ACQUIRED.swap(false, Ordering::SeqCst) {
        return Ok(());
    }
    let screen = execute!(stdout(), Clear(ClearType::All), Show, LeaveAlternateScreen);
    let raw = disable_raw_mode();
    debug!("Terminal restored");
    screen.and(raw)
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            // Release builds abort on panic, so Drop never runs
            let _ = restore();
            previous(info);
        }));
    });
}
