// Geometry Module for gridcatch
//
// Grid coordinates and the four movement directions. Coordinates are
// zero-based with the origin in the top-left corner, matching the terminal.

use crate::core::{GameError, Result};
use std::fmt;
use std::str::FromStr;

/// A cell position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Point { x, y }
    }

    /// Moves one cell towards `direction` and clamps both axes into
    /// `[1, max_x]` and `[1, max_y]`.
    pub fn step_clamped(self, direction: Direction, max_x: u16, max_y: u16) -> Point {
        let (dx, dy) = direction.delta();
        Point {
            x: clamp_axis(self.x, dx, max_x),
            y: clamp_axis(self.y, dy, max_y),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

fn clamp_axis(value: u16, delta: i8, max: u16) -> u16 {
    let moved = i32::from(value) + i32::from(delta);
    // max >= 1 for every validated grid
    moved.clamp(1, i32::from(max.max(1))) as u16
}

/// The four directions the cursor can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit delta `(dx, dy)`; `y` grows downwards.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Parses a direction name (case-insensitive). Anything else is rejected
    /// with `GameError::InvalidArgument`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(GameError::InvalidArgument(format!(
                "Unknown direction: '{}'. Expected one of: up, down, left, right",
                s
            ))),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = GameError;

    /// Numeric form, in declaration order: 0 = up, 1 = down, 2 = left, 3 = right.
    fn try_from(value: u8) -> Result<Self> {
        Direction::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| GameError::InvalidArgument(format!("Unknown direction code: {}", value)))
    }
}
