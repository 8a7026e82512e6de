//! Arena shooter AI and combat core
//!
//! The simulation behind a wave-based first-person arena shooter:
//! - Grid pathfinding and line of sight for enemy AI
//! - Per-tick enemy decision loops (move, aim, fire)
//! - Occlusion-aware resolution of player shots against the renderer's
//!   depth buffer
//! - Reachability-checked wave spawning
//!
//! Rendering, asset loading, and input handling live outside; they
//! interact with this core through [`view::DepthBuffer`], [`player::Player`],
//! and the [`audio::AudioSink`] cue trait.

pub mod ai;
pub mod arena;
pub mod audio;
pub mod combat;
pub mod config;
pub mod map;
pub mod player;
pub mod view;
pub mod wave;

// Re-export for convenience
pub use glam;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::ai::{Enemy, EnemyId, Stance, TickContext, find_path, has_line_of_sight};
    pub use crate::arena::{Arena, TickOutcome};
    pub use crate::audio::{AudioSink, Cue, NullAudio, RodioAudio};
    pub use crate::combat::resolve_player_shot;
    pub use crate::config::{EnemyConfig, GameConfig, PlayerConfig, WaveConfig, WeaponConfig};
    pub use crate::map::{Cell, Grid, cell_center, cell_of};
    pub use crate::player::Player;
    pub use crate::view::{DepthBuffer, Projection, wrap_angle};
    pub use crate::wave::{reachable_cells, spawn_wave};
    pub use glam::{IVec2, Vec2};
}
