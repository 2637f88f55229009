/// Gridcatch Error Module
///
/// This module defines the error types for the gridcatch game.
/// Every fallible operation in the crate returns [`Result`].
use thiserror::Error;

/// Error type for the gridcatch game.
///
/// This enum covers every failure the game can report:
/// - Bad arguments handed to the grid (directions, target cells)
/// - Configuration validation (grid size, glyph choices)
/// - Terminal I/O and config file parsing
#[derive(Error, Debug)]
pub enum GameError {
    /// A value passed to the grid is outside its accepted set
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Grid size or glyph configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// The grid was used before `initialize()` drew it
    #[error("Grid has not been initialized")]
    NotInitialized,

    /// No interior cell is free for the target
    #[error("No free interior cell left for the target")]
    NoFreeCell,

    /// The terminal cannot display the whole grid
    #[error("Terminal too small: need {needed:?}, have {available:?}")]
    TerminalTooSmall {
        needed: (u16, u16),
        available: (u16, u16),
    },

    /// Terminal and file system I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Type alias for Result to use GameError as the error type.
pub type Result<T> = std::result::Result<T, GameError>;
