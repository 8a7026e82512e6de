//! Grid map: cells, walls, and bounds
//!
//! The map is a rectangular grid of unit cells. Walls occupy whole cells,
//! everything else is open floor. The grid is read-only during play; this
//! core never mutates it inside a session.

use glam::{IVec2, Vec2};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Integer grid coordinate (column, row).
pub type Cell = IVec2;

/// The grid cell containing a world position.
///
/// Agents may sit fractionally inside a cell while interpolating between
/// waypoints; all grid algorithms operate on this floored cell.
#[must_use]
pub fn cell_of(pos: Vec2) -> Cell {
    pos.floor().as_ivec2()
}

/// World position of a cell's centre.
#[must_use]
pub fn cell_center(cell: Cell) -> Vec2 {
    cell.as_vec2() + Vec2::splat(0.5)
}

/// A rectangular grid with a set of wall cells
#[derive(Debug, Clone)]
pub struct Grid {
    cols: i32,
    rows: i32,
    walls: FxHashSet<Cell>,
}

impl Grid {
    /// Create an open grid with the given bounds
    #[must_use]
    pub fn new(cols: i32, rows: i32) -> Self {
        Self {
            cols: cols.max(0),
            rows: rows.max(0),
            walls: FxHashSet::default(),
        }
    }

    /// Create a grid with an explicit wall set
    #[must_use]
    pub fn with_walls(cols: i32, rows: i32, walls: impl IntoIterator<Item = Cell>) -> Self {
        let mut grid = Self::new(cols, rows);
        grid.walls.extend(walls);
        grid
    }

    /// Parse a grid from a row-major text layout.
    ///
    /// `#` marks a wall, any other character is open floor. Row `0` is the
    /// first string; column width is the longest row.
    #[must_use]
    pub fn from_layout(rows: &[&str]) -> Self {
        let cols = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(cols as i32, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    grid.walls.insert(Cell::new(x as i32, y as i32));
                }
            }
        }
        grid
    }

    /// Place or clear a wall (setup only; never called mid-session)
    pub fn set_wall(&mut self, cell: Cell, wall: bool) {
        if wall {
            self.walls.insert(cell);
        } else {
            self.walls.remove(&cell);
        }
    }

    /// Number of columns
    #[must_use]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of rows
    #[must_use]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Check if a cell lies inside the grid bounds
    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.cols && cell.y >= 0 && cell.y < self.rows
    }

    /// Check if a cell is occupied by a wall
    #[must_use]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    /// Check if a cell is open floor inside the bounds
    #[must_use]
    pub fn is_free(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.is_wall(cell)
    }

    /// Free 4-connected neighbours of a cell
    pub(crate) fn neighbors(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        const STEPS: [Cell; 4] = [
            Cell::new(1, 0),
            Cell::new(-1, 0),
            Cell::new(0, 1),
            Cell::new(0, -1),
        ];
        STEPS
            .iter()
            .map(|&step| cell + step)
            .filter(|&next| self.is_free(next))
            .collect()
    }
}
