// Grid View Module for gridcatch
//
// The playing field: a bordered rectangle of glyphs, a cursor the player
// steers, and a target that jumps to a new free cell whenever the cursor
// lands on it. The view keeps its state and the surface in sync after every
// operation.

use crate::core::{GameError, Result};
use crate::geometry::{Direction, Point};
use crate::surface::Surface;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

pub const DEFAULT_WIDTH: u16 = 28;
pub const DEFAULT_HEIGHT: u16 = 10;
pub const TARGET_GLYPH: char = '*';

/// Largest accepted width or height.
pub const MAX_DIMENSION: u16 = 1024;

/// The player-configurable glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub background: char,
    pub foreground: char,
    pub border: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Glyphs {
            background: '.',
            foreground: 'X',
            border: 'O',
        }
    }
}

/// Validated, immutable grid settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    width: u16,
    height: u16,
    glyphs: Glyphs,
    target: char,
}

impl GridConfig {
    /// Builds a config, rejecting sizes without room for both cursor and
    /// target and glyph sets that would make cells indistinguishable.
    pub fn new(width: u16, height: u16, glyphs: Glyphs) -> Result<Self> {
        for (name, value) in [("width", width), ("height", height)] {
            if value < 3 {
                return Err(GameError::Config(format!(
                    "{} must be at least 3 to leave an interior, got {}",
                    name, value
                )));
            }
            if value > MAX_DIMENSION {
                return Err(GameError::Config(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_DIMENSION, value
                )));
            }
        }

        let interior = u32::from(width - 2) * u32::from(height - 2);
        if interior < 2 {
            return Err(GameError::Config(format!(
                "a {}x{} grid has {} interior cell; cursor and target need at least 2",
                width, height, interior
            )));
        }

        let named = [
            ("background", glyphs.background),
            ("foreground", glyphs.foreground),
            ("border", glyphs.border),
            ("target", TARGET_GLYPH),
        ];
        for (i, (name, glyph)) in named.iter().enumerate() {
            if glyph.is_control() || glyph.is_whitespace() {
                return Err(GameError::Config(format!(
                    "{} glyph must be a visible character, got {:?}",
                    name, glyph
                )));
            }
            if let Some((other, _)) = named[i + 1..].iter().find(|(_, g)| g == glyph) {
                return Err(GameError::Config(format!(
                    "{} and {} glyphs are both '{}'",
                    name, other, glyph
                )));
            }
        }

        Ok(GridConfig {
            width,
            height,
            glyphs,
            target: TARGET_GLYPH,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn glyphs(&self) -> Glyphs {
        self.glyphs
    }

    pub fn background(&self) -> char {
        self.glyphs.background
    }

    pub fn foreground(&self) -> char {
        self.glyphs.foreground
    }

    pub fn border(&self) -> char {
        self.glyphs.border
    }

    pub fn target(&self) -> char {
        self.target
    }

    /// Largest interior x.
    pub fn max_x(&self) -> u16 {
        self.width - 2
    }

    /// Largest interior y.
    pub fn max_y(&self) -> u16 {
        self.height - 2
    }

    pub fn is_interior(&self, point: Point) -> bool {
        (1..=self.max_x()).contains(&point.x) && (1..=self.max_y()).contains(&point.y)
    }

    pub fn is_border(&self, point: Point) -> bool {
        point.x == 0 || point.y == 0 || point.x == self.width - 1 || point.y == self.height - 1
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            glyphs: Glyphs::default(),
            target: TARGET_GLYPH,
        }
    }
}

/// One game session's grid: owns the config, cursor, target and surface.
///
/// The view starts Idle (no target); [`GridView::initialize`] draws it and
/// makes it Active.
pub struct GridView<S, R = StdRng> {
    config: GridConfig,
    cursor: Point,
    target: Option<Point>,
    surface: S,
    rng: R,
}

impl<S: Surface> GridView<S, StdRng> {
    pub fn new(config: GridConfig, surface: S) -> Self {
        Self::with_rng(config, surface, StdRng::from_entropy())
    }

    /// Deterministic target placement for replays and tests.
    pub fn with_seed(config: GridConfig, surface: S, seed: u64) -> Self {
        Self::with_rng(config, surface, StdRng::seed_from_u64(seed))
    }
}

impl<S: Surface, R: Rng> GridView<S, R> {
    pub fn with_rng(config: GridConfig, surface: S, rng: R) -> Self {
        GridView {
            config,
            cursor: Point::new(1, 1),
            target: None,
            surface,
            rng,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn target(&self) -> Option<Point> {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Draws the whole grid, places the target and shows the cursor.
    pub fn initialize(&mut self) -> Result<()> {
        let (width, height) = (self.config.width, self.config.height);
        self.surface.clear()?;
        for y in 0..height {
            self.surface.set_cursor_position(0, y)?;
            for x in 0..width {
                let glyph = if self.config.is_border(Point::new(x, y)) {
                    self.config.border()
                } else {
                    self.config.background()
                };
                self.surface.write_char(glyph)?;
            }
        }

        let target = self.place_random_target()?;
        self.draw(self.cursor, self.config.foreground())?;
        self.surface.flush()?;

        info!(
            width,
            height,
            cursor = %self.cursor,
            target = %target,
            "Grid initialized"
        );
        Ok(())
    }

    /// Moves the target to a uniformly chosen interior cell other than the
    /// cursor. The player cursor does not move and the write position is put
    /// back on it. Fails with `NotInitialized` before [`initialize`].
    ///
    /// [`initialize`]: GridView::initialize
    pub fn spawn_target(&mut self) -> Result<Point> {
        self.target.ok_or(GameError::NotInitialized)?;
        let target = self.place_random_target()?;
        self.draw_cursor_position()?;
        self.surface.flush()?;
        Ok(target)
    }

    fn place_random_target(&mut self) -> Result<Point> {
        let free = self.free_cells();
        let target = *free.choose(&mut self.rng).ok_or(GameError::NoFreeCell)?;
        if let Some(old) = self.target.filter(|old| *old != self.cursor) {
            self.draw(old, self.config.background())?;
        }
        self.draw(target, self.config.target())?;
        self.target = Some(target);
        Ok(target)
    }

    /// Moves the cursor one cell, clamped to the interior. Landing on the
    /// target captures it and spawns a new one. Returns the new cursor.
    pub fn move_cursor(&mut self, direction: Direction) -> Result<Point> {
        let target = self.target.ok_or(GameError::NotInitialized)?;

        self.draw(self.cursor, self.config.background())?;

        let next = self
            .cursor
            .step_clamped(direction, self.config.max_x(), self.config.max_y());
        self.cursor = next;

        if next == target {
            let respawned = self.place_random_target()?;
            debug!(at = %next, new_target = %respawned, "Target captured");
        }

        self.draw(next, self.config.foreground())?;
        self.surface.flush()?;
        Ok(next)
    }

    /// Moves the target to `point`, erasing the old one.
    pub fn place_target(&mut self, point: Point) -> Result<()> {
        let old = self.target.ok_or(GameError::NotInitialized)?;
        if !self.config.is_interior(point) {
            return Err(GameError::InvalidArgument(format!(
                "target {} is outside the interior",
                point
            )));
        }
        if point == self.cursor {
            return Err(GameError::InvalidArgument(format!(
                "target {} would sit on the cursor",
                point
            )));
        }

        self.draw(old, self.config.background())?;
        self.draw(point, self.config.target())?;
        self.target = Some(point);
        self.draw_cursor_position()?;
        self.surface.flush()?;
        Ok(())
    }

    fn free_cells(&self) -> Vec<Point> {
        let (cursor, max_x) = (self.cursor, self.config.max_x());
        (1..=self.config.max_y())
            .flat_map(|y| (1..=max_x).map(move |x| Point::new(x, y)))
            .filter(|p| *p != cursor)
            .collect()
    }

    /// Writes `glyph` at `point` and puts the write position back on `point`.
    fn draw(&mut self, point: Point, glyph: char) -> Result<()> {
        self.surface.set_cursor_position(point.x, point.y)?;
        self.surface.write_char(glyph)?;
        self.surface.set_cursor_position(point.x, point.y)?;
        Ok(())
    }

    fn draw_cursor_position(&mut self) -> Result<()> {
        self.surface
            .set_cursor_position(self.cursor.x, self.cursor.y)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    fn view(width: u16, height: u16) -> GridView<MemorySurface> {
        let config = GridConfig::new(width, height, Glyphs::default()).unwrap();
        GridView::with_seed(config, MemorySurface::new(width, height), 7)
    }

    #[test]
    fn test_default_config_matches_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.width(), 28);
        assert_eq!(config.height(), 10);
        assert_eq!(config.background(), '.');
        assert_eq!(config.foreground(), 'X');
        assert_eq!(config.border(), 'O');
        assert_eq!(config.target(), '*');
        assert_eq!(
            GridConfig::new(28, 10, Glyphs::default()).unwrap(),
            config
        );
    }

    #[test]
    fn test_rejects_grids_without_interior() {
        for (w, h) in [(2, 10), (28, 2), (0, 0), (1, 5)] {
            let result = GridConfig::new(w, h, Glyphs::default());
            assert!(matches!(result, Err(GameError::Config(_))), "{}x{}", w, h);
        }
    }

    #[test]
    fn test_rejects_single_interior_cell() {
        let result = GridConfig::new(3, 3, Glyphs::default());
        if let Err(GameError::Config(msg)) = result {
            assert!(msg.contains("3x3"));
        } else {
            panic!("Expected Config error");
        }
        assert!(GridConfig::new(3, 4, Glyphs::default()).is_ok());
        assert!(GridConfig::new(4, 3, Glyphs::default()).is_ok());
    }

    #[test]
    fn test_rejects_oversized_grid() {
        assert!(GridConfig::new(MAX_DIMENSION + 1, 10, Glyphs::default()).is_err());
    }

    #[test]
    fn test_rejects_duplicate_glyphs() {
        let glyphs = Glyphs {
            background: '.',
            foreground: '.',
            border: 'O',
        };
        let result = GridConfig::new(10, 10, glyphs);
        if let Err(GameError::Config(msg)) = result {
            assert!(msg.contains("background"));
            assert!(msg.contains("foreground"));
        } else {
            panic!("Expected Config error");
        }

        let clashes_with_target = Glyphs {
            border: '*',
            ..Glyphs::default()
        };
        assert!(GridConfig::new(10, 10, clashes_with_target).is_err());
    }

    #[test]
    fn test_rejects_invisible_glyphs() {
        let glyphs = Glyphs {
            background: ' ',
            ..Glyphs::default()
        };
        assert!(GridConfig::new(10, 10, glyphs).is_err());
    }

    #[test]
    fn test_move_before_initialize_fails() {
        let mut grid = view(10, 10);
        assert!(!grid.is_active());
        assert!(matches!(
            grid.move_cursor(Direction::Right),
            Err(GameError::NotInitialized)
        ));
        assert!(matches!(
            grid.place_target(Point::new(3, 3)),
            Err(GameError::NotInitialized)
        ));
    }

    #[test]
    fn test_spawn_target_before_initialize_fails() {
        let mut grid = view(10, 10);
        assert!(matches!(
            grid.spawn_target(),
            Err(GameError::NotInitialized)
        ));
        assert!(!grid.is_active());
        assert_eq!(grid.target(), None);
        assert!(matches!(
            grid.move_cursor(Direction::Right),
            Err(GameError::NotInitialized)
        ));
        assert_eq!(grid.surface().flush_count(), 0);
    }

    #[test]
    fn test_spawn_target_keeps_write_position_on_cursor() {
        let mut grid = view(10, 6);
        grid.initialize().unwrap();
        let flushes = grid.surface().flush_count();

        let target = grid.spawn_target().unwrap();
        assert_ne!(target, grid.cursor());
        assert_eq!(grid.cursor(), Point::new(1, 1));
        assert_eq!(grid.surface().position(), grid.cursor());
        assert!(grid.surface().flush_count() > flushes);
        assert_eq!(grid.surface().find_all('*'), vec![target]);
    }

    #[test]
    fn test_initialize_draws_border_and_background() {
        let mut grid = view(6, 5);
        grid.initialize().unwrap();
        assert!(grid.is_active());

        let surface = grid.surface();
        for y in 0..5 {
            for x in 0..6 {
                let p = Point::new(x, y);
                let c = surface.char_at(p).unwrap();
                if grid.config().is_border(p) {
                    assert_eq!(c, 'O', "border at {}", p);
                } else if p == grid.cursor() {
                    assert_eq!(c, 'X');
                } else if Some(p) == grid.target() {
                    assert_eq!(c, '*');
                } else {
                    assert_eq!(c, '.', "background at {}", p);
                }
            }
        }
        assert_eq!(surface.position(), Point::new(1, 1));
        assert_eq!(surface.flush_count(), 1);
    }

    #[test]
    fn test_spawn_target_on_smallest_grid() {
        let mut grid = view(3, 4);
        grid.initialize().unwrap();
        assert_eq!(grid.target(), Some(Point::new(1, 2)));
        for _ in 0..20 {
            assert_eq!(grid.spawn_target().unwrap(), Point::new(1, 2));
        }
    }

    #[test]
    fn test_place_target_rejects_bad_cells() {
        let mut grid = view(10, 10);
        grid.initialize().unwrap();
        assert!(matches!(
            grid.place_target(Point::new(0, 4)),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(
            grid.place_target(Point::new(9, 4)),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(
            grid.place_target(Point::new(1, 1)),
            Err(GameError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_place_target_erases_old_target() {
        let mut grid = view(10, 10);
        grid.initialize().unwrap();
        let old = grid.target().unwrap();
        let new = if old == Point::new(4, 4) {
            Point::new(5, 5)
        } else {
            Point::new(4, 4)
        };
        grid.place_target(new).unwrap();
        assert_eq!(grid.surface().char_at(old), Some('.'));
        assert_eq!(grid.surface().char_at(new), Some('*'));
        assert_eq!(grid.surface().find_all('*'), vec![new]);
    }
}
