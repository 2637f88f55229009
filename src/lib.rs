// Core infrastructure modules
pub mod core;

// Game modules
pub mod cli;
pub mod config;
pub mod geometry;
pub mod grid_view;
pub mod input;
pub mod session;
pub mod surface;
pub mod tui;

pub use geometry::{Direction, Point};
pub use grid_view::{Glyphs, GridConfig, GridView};
