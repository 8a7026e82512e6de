//! Wave spawning
//!
//! A new wave floods the grid from the player's cell to find every
//! reachable floor cell, then drops enemies on distinct random cells in
//! that region. Enemies can therefore always path to the player, and never
//! spawn inside a wall or a sealed-off room.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashSet;

use crate::ai::{Enemy, EnemyId};
use crate::config::GameConfig;
use crate::map::{self, Cell, Grid};
use crate::player::Player;

/// All cells connected to `from` through free 4-adjacent steps.
///
/// `from` itself is included when it lies in bounds, even if it is a wall
/// (a stale player cell still anchors the flood).
#[must_use]
pub fn reachable_cells(grid: &Grid, from: Cell) -> FxHashSet<Cell> {
    let mut visited = FxHashSet::default();
    if !grid.in_bounds(from) {
        return visited;
    }
    let mut queue = VecDeque::new();
    visited.insert(from);
    queue.push_back(from);
    while let Some(cell) = queue.pop_front() {
        for next in grid.neighbors(cell) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    visited
}

/// Spawn the enemies for a wave and restore the player to full health.
///
/// Spawns `min(wave * enemies_per_wave, reachable - 1)` enemies on distinct
/// random reachable cells, excluding the player's own cell, each placed at
/// its cell centre with full health and a fresh id from `next_id`.
pub fn spawn_wave(
    grid: &Grid,
    player: &mut Player,
    wave: u32,
    config: &GameConfig,
    rng: &mut StdRng,
    next_id: &mut u32,
) -> Vec<Enemy> {
    let player_cell = player.cell();
    let mut candidates: Vec<Cell> = reachable_cells(grid, player_cell)
        .into_iter()
        .filter(|&cell| cell != player_cell)
        .collect();
    // Hash order is arbitrary; sort so a seeded rng reproduces the wave
    candidates.sort_unstable_by_key(|cell| (cell.y, cell.x));

    let requested = wave as usize * config.wave.enemies_per_wave as usize;
    let count = requested.min(candidates.len());

    let enemies = candidates
        .choose_multiple(rng, count)
        .map(|&cell| {
            let id = EnemyId(*next_id);
            *next_id += 1;
            Enemy::new(id, map::cell_center(cell), config.enemy)
        })
        .collect();

    player.restore_health();
    enemies
}
