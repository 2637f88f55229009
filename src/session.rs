//! Session loop
//!
//! A session owns one [`GridView`] and feeds it key presses until the player
//! quits. Everything runs on the calling thread; each key is handled to
//! completion before the next one is read.

use crate::core::{GameError, Result};
use crate::grid_view::{GridConfig, GridView};
use crate::input::{Action, CrosstermKeys, KeyMap, KeySource};
use crate::surface::{CrosstermSurface, Surface};
use crate::tui::{self, TerminalGuard};
use rand::Rng;
use std::io::{self, BufWriter};
use tracing::{debug, info};

/// What happened during a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Directional keys processed (including moves blocked by the border).
    pub moves: u64,
}

/// Everything needed to start an interactive session.
#[derive(Debug, Clone)]
pub struct PlaySettings {
    pub grid: GridConfig,
    pub seed: Option<u64>,
    pub keymap: KeyMap,
}

impl PlaySettings {
    pub fn new(grid: GridConfig) -> Self {
        PlaySettings {
            grid,
            seed: None,
            keymap: KeyMap::default(),
        }
    }
}

/// Draws the grid, then processes keys until a quit action.
pub fn run_session<S, R, K>(
    view: &mut GridView<S, R>,
    keys: &mut K,
    keymap: &KeyMap,
) -> Result<SessionSummary>
where
    S: Surface,
    R: Rng,
    K: KeySource + ?Sized,
{
    view.initialize()?;
    let mut summary = SessionSummary::default();

    loop {
        let key = keys.read_key()?;
        match keymap.action_for(key) {
            Action::Move(direction) => {
                let cursor = view.move_cursor(direction)?;
                summary.moves += 1;
                debug!(%direction, %cursor, "Moved");
            }
            Action::Quit => break,
            Action::Ignore => {}
        }
    }

    Ok(summary)
}

/// Runs an interactive session on the real terminal.
///
/// The terminal is checked for size before it is touched, and restored on
/// every exit path once acquired.
pub fn play(settings: &PlaySettings) -> Result<SessionSummary> {
    let needed = (settings.grid.width(), settings.grid.height());
    let available = tui::terminal_size()?;
    if needed.0 > available.0 || needed.1 > available.1 {
        return Err(GameError::TerminalTooSmall { needed, available });
    }

    info!(width = needed.0, height = needed.1, "Starting session");
    let guard = TerminalGuard::acquire()?;

    let surface = CrosstermSurface::new(BufWriter::new(io::stdout()));
    let result = match settings.seed {
        Some(seed) => {
            let mut view = GridView::with_seed(settings.grid.clone(), surface, seed);
            run_session(&mut view, &mut CrosstermKeys, &settings.keymap)
        }
        None => {
            let mut view = GridView::new(settings.grid.clone(), surface);
            run_session(&mut view, &mut CrosstermKeys, &settings.keymap)
        }
    };

    let summary = finish_session(result, guard.release())?;
    info!(moves = summary.moves, "Session ended");
    Ok(summary)
}

/// A session error wins over a failed terminal restore.
fn finish_session(
    result: Result<SessionSummary>,
    released: Result<()>,
) -> Result<SessionSummary> {
    let summary = result?;
    released?;
    Ok(summary)
}
