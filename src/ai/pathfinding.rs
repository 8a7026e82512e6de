//! A* pathfinding on the wall grid
//!
//! Unit-cost 4-connected search with a Manhattan heuristic. Paths exclude
//! the start cell and end on the goal cell.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::map::{Cell, Grid};

/// A* node for the priority queue
#[derive(Debug, Clone, Copy)]
struct Node {
    cell: Cell,
    g_cost: u32,
    f_cost: u32,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.g_cost == other.g_cost
    }
}

impl Eq for Node {}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap; prefer deeper nodes on f-cost ties
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| self.g_cost.cmp(&other.g_cost))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn manhattan(a: Cell, b: Cell) -> u32 {
    ((a.x - b.x).abs() + (a.y - b.y).abs()) as u32
}

/// Find the shortest 4-connected path from `start` to `goal`.
///
/// The returned path excludes `start` and ends on `goal`. Empty when
/// `start == goal`, when `goal` is a wall or out of bounds, or when no
/// path exists. A walled-in `start` is tolerated; the search simply fails
/// to expand and returns empty.
#[must_use]
pub fn find_path(grid: &Grid, start: Cell, goal: Cell) -> Vec<Cell> {
    if start == goal || !grid.is_free(goal) {
        return Vec::new();
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: FxHashMap<Cell, Cell> = FxHashMap::default();
    let mut g_score: FxHashMap<Cell, u32> = FxHashMap::default();
    let mut finalized: FxHashSet<Cell> = FxHashSet::default();

    g_score.insert(start, 0);
    open_set.push(Node {
        cell: start,
        g_cost: 0,
        f_cost: manhattan(start, goal),
    });

    while let Some(current) = open_set.pop() {
        // Stale reinsertions are skipped; the first pop carries the best cost
        if !finalized.insert(current.cell) {
            continue;
        }
        if current.cell == goal {
            return reconstruct(&came_from, start, goal);
        }

        for next in grid.neighbors(current.cell) {
            if finalized.contains(&next) {
                continue;
            }
            let tentative_g = current.g_cost + 1;
            if tentative_g < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                came_from.insert(next, current.cell);
                g_score.insert(next, tentative_g);
                open_set.push(Node {
                    cell: next,
                    g_cost: tentative_g,
                    f_cost: tentative_g + manhattan(next, goal),
                });
            }
        }
    }

    Vec::new()
}

fn reconstruct(came_from: &FxHashMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
