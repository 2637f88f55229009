//! Terminal surface abstraction
//!
//! The grid never talks to the terminal directly. It issues a handful of
//! primitive drawing calls through [`Surface`], which lets the same game logic
//! drive a real terminal ([`CrosstermSurface`]) or an in-memory buffer
//! ([`MemorySurface`]) in tests.

use crate::geometry::Point;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// Primitive drawing operations the grid needs from a terminal.
pub trait Surface {
    /// Erases all visible contents and resets the write position to the origin.
    fn clear(&mut self) -> io::Result<()>;

    /// Writes one glyph at the write position and advances it one column.
    fn write_char(&mut self, c: char) -> io::Result<()>;

    /// Moves the write position without writing.
    fn set_cursor_position(&mut self, x: u16, y: u16) -> io::Result<()>;

    /// Pushes any queued output to the device.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Surface backed by crossterm commands queued on any writer (usually stdout).
pub struct CrosstermSurface<W: Write> {
    writer: W,
}

impl<W: Write> CrosstermSurface<W> {
    pub fn new(writer: W) -> Self {
        CrosstermSurface { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Surface for CrosstermSurface<W> {
    fn clear(&mut self) -> io::Result<()> {
        queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    fn write_char(&mut self, c: char) -> io::Result<()> {
        queue!(self.writer, Print(c))?;
        Ok(())
    }

    fn set_cursor_position(&mut self, x: u16, y: u16) -> io::Result<()> {
        queue!(self.writer, MoveTo(x, y))?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// In-memory character buffer that behaves like a fixed-size terminal.
///
/// Writes outside the buffer are dropped but still advance the write
/// position, the way a terminal silently clips.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    cells: Vec<Vec<char>>,
    position: Point,
    flushes: usize,
}

impl MemorySurface {
    pub fn new(width: u16, height: u16) -> Self {
        MemorySurface {
            cells: vec![vec![' '; usize::from(width)]; usize::from(height)],
            position: Point::new(0, 0),
            flushes: 0,
        }
    }

    /// Glyph at `point`, or `None` when it lies outside the buffer.
    pub fn char_at(&self, point: Point) -> Option<char> {
        self.cells
            .get(usize::from(point.y))
            .and_then(|row| row.get(usize::from(point.x)))
            .copied()
    }

    /// Current write position.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    /// Every cell holding `glyph`, in row-major order.
    pub fn find_all(&self, glyph: char) -> Vec<Point> {
        let mut found = Vec::new();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, c) in row.iter().enumerate() {
                if *c == glyph {
                    found.push(Point::new(x as u16, y as u16));
                }
            }
        }
        found
    }

    /// Buffer rendered as text, one line per row, without a trailing newline.
    pub fn contents(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Surface for MemorySurface {
    fn clear(&mut self) -> io::Result<()> {
        for row in &mut self.cells {
            row.fill(' ');
        }
        self.position = Point::new(0, 0);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> io::Result<()> {
        let Point { x, y } = self.position;
        if let Some(cell) = self
            .cells
            .get_mut(usize::from(y))
            .and_then(|row| row.get_mut(usize::from(x)))
        {
            *cell = c;
        }
        self.position.x = x.saturating_add(1);
        Ok(())
    }

    fn set_cursor_position(&mut self, x: u16, y: u16) -> io::Result<()> {
        self.position = Point::new(x, y);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
