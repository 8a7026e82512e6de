//! Grid line-of-sight test
//!
//! Walks the discrete line between two cells along its dominant axis and
//! reports whether any intermediate cell is a wall. Both endpoints are
//! excluded: standing inside a wall does not blind an agent to itself.

use crate::map::{Cell, Grid};

/// Check whether two cells can see each other.
///
/// Symmetric by construction: the walk always runs in canonical endpoint
/// order, so swapping `from` and `to` inspects the same cells.
#[must_use]
pub fn has_line_of_sight(grid: &Grid, from: Cell, to: Cell) -> bool {
    let (a, b) = if (from.x, from.y) <= (to.x, to.y) {
        (from, to)
    } else {
        (to, from)
    };

    let dx = (b.x - a.x).abs();
    let dy = (b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };

    let mut x = a.x;
    let mut y = a.y;

    // The error term is doubled so an exact hit on a cell boundary stays an
    // integer. When that happens the line passes between the two cells of the
    // next step, so neither one is checked.
    if dx > dy {
        let mut err = dx;
        let mut grazes = false;
        while x != b.x {
            if !grazes && blocks(grid, Cell::new(x, y), a, b) {
                return false;
            }
            err -= 2 * dy;
            grazes = err == 0;
            if err < 0 {
                y += sy;
                err += 2 * dx;
            }
            x += sx;
        }
    } else {
        let mut err = dy;
        let mut grazes = false;
        while y != b.y {
            if !grazes && blocks(grid, Cell::new(x, y), a, b) {
                return false;
            }
            err -= 2 * dx;
            grazes = err == 0;
            if err < 0 {
                x += sx;
                err += 2 * dy;
            }
            y += sy;
        }
    }

    true
}

fn blocks(grid: &Grid, cell: Cell, a: Cell, b: Cell) -> bool {
    cell != a && cell != b && grid.is_wall(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_cell_sees_itself() {
        let grid = Grid::new(5, 5);
        assert!(has_line_of_sight(&grid, Cell::new(2, 2), Cell::new(2, 2)));
    }

    #[test]
    fn test_open_grid_is_fully_visible() {
        let grid = Grid::new(6, 6);
        assert!(has_line_of_sight(&grid, Cell::new(0, 0), Cell::new(5, 5)));
        assert!(has_line_of_sight(&grid, Cell::new(0, 5), Cell::new(5, 0)));
    }

    #[test]
    fn test_wall_directly_between_blocks() {
        // Single wall on the straight line between the endpoints
        let mut grid = Grid::new(5, 5);
        grid.set_wall(Cell::new(2, 2), true);
        assert!(!has_line_of_sight(&grid, Cell::new(1, 2), Cell::new(3, 2)));

        // Moving either endpoint off the line by one row restores sight
        assert!(has_line_of_sight(&grid, Cell::new(1, 1), Cell::new(3, 2)));
        assert!(has_line_of_sight(&grid, Cell::new(1, 2), Cell::new(3, 3)));
    }

    #[test]
    fn test_corner_grazing_line_blocks_neither_cell() {
        // A line that crosses a row boundary exactly at a column passes
        // between the two cells there, so a wall in either one cannot
        // block it, in both diagonal directions.
        let mut grid = Grid::new(5, 5);
        grid.set_wall(Cell::new(2, 2), true);
        assert!(has_line_of_sight(&grid, Cell::new(1, 2), Cell::new(3, 3)));
        assert!(has_line_of_sight(&grid, Cell::new(3, 3), Cell::new(1, 2)));
        assert!(has_line_of_sight(&grid, Cell::new(1, 3), Cell::new(3, 2)));
        assert!(has_line_of_sight(&grid, Cell::new(3, 2), Cell::new(1, 3)));

        // A shallower line through the same wall is not a graze and stays
        // blocked
        assert!(!has_line_of_sight(&grid, Cell::new(1, 2), Cell::new(4, 3)));
    }

    #[test]
    fn test_endpoints_are_excluded() {
        let mut grid = Grid::new(5, 5);
        grid.set_wall(Cell::new(0, 0), true);
        grid.set_wall(Cell::new(4, 0), true);
        assert!(has_line_of_sight(&grid, Cell::new(0, 0), Cell::new(4, 0)));
    }

    #[test]
    fn test_vertical_wall_blocks_column() {
        let grid = Grid::from_layout(&[
            ".....", //
            "..#..", //
            ".....",
        ]);
        assert!(!has_line_of_sight(&grid, Cell::new(2, 0), Cell::new(2, 2)));
    }

    #[test]
    fn test_symmetry_over_all_free_pairs() {
        let grid = Grid::from_layout(&[
            "......", //
            ".##...", //
            "...#..", //
            ".#....", //
            "......",
        ]);
        let mut free = Vec::new();
        for y in 0..grid.rows() {
            for x in 0..grid.cols() {
                let cell = Cell::new(x, y);
                if grid.is_free(cell) {
                    free.push(cell);
                }
            }
        }
        for &a in &free {
            for &b in &free {
                assert_eq!(
                    has_line_of_sight(&grid, a, b),
                    has_line_of_sight(&grid, b, a),
                    "asymmetric result for {a:?} <-> {b:?}"
                );
            }
        }
    }
}
