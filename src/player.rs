//! Player collaborator
//!
//! Movement and input live outside this core; combat only reads the
//! player's position and facing and applies damage.

use glam::Vec2;

use crate::map::{self, Cell};

/// The player: world position, facing angle, and clamped health
#[derive(Debug, Clone)]
pub struct Player {
    /// World position
    pub pos: Vec2,
    /// Facing angle in radians
    pub angle: f32,
    health: i32,
    max_health: i32,
}

impl Player {
    /// Create a player at full health
    #[must_use]
    pub fn new(pos: Vec2, angle: f32, max_health: i32) -> Self {
        Self {
            pos,
            angle,
            health: max_health,
            max_health,
        }
    }

    /// The grid cell the player currently occupies
    #[must_use]
    pub fn cell(&self) -> Cell {
        map::cell_of(self.pos)
    }

    /// Current health
    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Maximum health
    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Whether health has reached zero
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Apply damage, clamping health at zero
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    /// Restore health to maximum (wave start, respawn)
    pub fn restore_health(&mut self) {
        self.health = self.max_health;
    }
}
