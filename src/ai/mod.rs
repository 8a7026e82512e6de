//! Enemy AI: pathfinding, line of sight, and the per-tick agent loop

mod agent;
mod pathfinding;
mod sight;

pub use agent::{Enemy, EnemyId, Stance, TickContext};
pub use pathfinding::find_path;
pub use sight::has_line_of_sight;
