//! Enemy agents
//!
//! Each enemy runs the same per-tick loop: advance its animation, follow
//! its path toward the player's cell, then attempt an attack if the
//! cooldown allows. Firing and hitting are decoupled: an enemy whose
//! jittered aim falls inside the cone fires (pose + sound) and only then
//! rolls its gun accuracy to decide whether damage lands.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use rand::rngs::StdRng;

use crate::audio::{AudioSink, Cue};
use crate::config::EnemyConfig;
use crate::map::{self, Cell, Grid};
use crate::player::Player;
use crate::view::wrap_angle;

use super::{find_path, has_line_of_sight};

/// Distance below which an enemy counts as standing on a waypoint
const WAYPOINT_EPSILON: f32 = 0.05;

/// Stable identity of a spawned enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnemyId(pub u32);

/// Visual stance of an enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stance {
    /// Cycling the walk animation
    Walking,
    /// Holding the attack pose until the flash timer expires
    Flashing {
        /// Clock time at which the pose reverts to walking
        until_ms: f64,
    },
}

/// Everything an enemy reads or mutates during one tick.
///
/// Passed explicitly so agents share no hidden globals.
pub struct TickContext<'a> {
    /// Wall grid (read-only)
    pub grid: &'a Grid,
    /// The player being hunted
    pub player: &'a mut Player,
    /// Cue sink for fire/hurt feedback
    pub audio: &'a mut dyn AudioSink,
    /// Session RNG (aim jitter, accuracy rolls)
    pub rng: &'a mut StdRng,
    /// Session clock in milliseconds
    pub now_ms: f64,
    /// Time since the previous tick in milliseconds
    pub delta_ms: f64,
}

/// A single enemy: position, health, path, timers, stance
#[derive(Debug, Clone)]
pub struct Enemy {
    id: EnemyId,
    pos: Vec2,
    health: i32,
    path: VecDeque<Cell>,
    path_goal: Option<Cell>,
    stance: Stance,
    walk_frame: usize,
    last_frame_at: f64,
    last_shot_at: f64,
    cfg: EnemyConfig,
}

impl Enemy {
    /// Spawn an enemy at full health with no path
    #[must_use]
    pub fn new(id: EnemyId, pos: Vec2, cfg: EnemyConfig) -> Self {
        Self {
            id,
            pos,
            health: cfg.max_health,
            path: VecDeque::new(),
            path_goal: None,
            stance: Stance::Walking,
            walk_frame: 0,
            last_frame_at: 0.0,
            last_shot_at: 0.0,
            cfg,
        }
    }

    /// Stable identity
    #[must_use]
    pub fn id(&self) -> EnemyId {
        self.id
    }

    /// World position
    #[must_use]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// The grid cell the enemy currently occupies
    #[must_use]
    pub fn cell(&self) -> Cell {
        map::cell_of(self.pos)
    }

    /// Current health
    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Health at spawn
    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.cfg.max_health
    }

    /// Whether health has reached zero
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Current visual stance
    #[must_use]
    pub fn stance(&self) -> Stance {
        self.stance
    }

    /// Current walk-cycle frame index
    #[must_use]
    pub fn walk_frame(&self) -> usize {
        self.walk_frame
    }

    /// Remaining waypoints, oldest first
    #[must_use]
    pub fn path(&self) -> &VecDeque<Cell> {
        &self.path
    }

    /// Run one tick: animation, movement, attack attempt
    pub fn update(&mut self, ctx: &mut TickContext<'_>) {
        self.advance_animation(ctx.now_ms);
        self.follow_path(ctx);
        self.try_shoot(ctx);
    }

    /// Apply damage, clamping health at zero
    pub fn take_damage(&mut self, amount: i32, audio: &mut dyn AudioSink) {
        audio.play(Cue::EnemyHurt);
        self.health = (self.health - amount).max(0);
    }

    fn advance_animation(&mut self, now_ms: f64) {
        match self.stance {
            Stance::Flashing { until_ms } => {
                if now_ms >= until_ms {
                    self.stance = Stance::Walking;
                }
            }
            Stance::Walking => {
                if now_ms - self.last_frame_at > self.cfg.walk_frame_ms {
                    self.walk_frame = (self.walk_frame + 1) % self.cfg.walk_frame_count.max(1);
                    self.last_frame_at = now_ms;
                }
            }
        }
    }

    /// Recompute the path only when the goal cell has moved, then advance
    /// toward the next waypoint centre without overshooting.
    fn follow_path(&mut self, ctx: &mut TickContext<'_>) {
        let player_cell = ctx.player.cell();
        if self.path_goal != Some(player_cell) {
            self.path = find_path(ctx.grid, self.cell(), player_cell).into();
            self.path_goal = Some(player_cell);
        }

        let Some(&next) = self.path.front() else {
            // Unreachable player: hold position until the goal cell changes
            return;
        };
        let target = map::cell_center(next);
        let delta = target - self.pos;
        let dist = delta.length();
        if dist > WAYPOINT_EPSILON {
            let step = (self.cfg.speed * ctx.delta_ms as f32).min(dist);
            self.pos += delta / dist * step;
        } else {
            self.pos = target;
            self.path.pop_front();
        }
    }

    /// Attempt an attack once the cooldown has elapsed.
    ///
    /// The cooldown resets whether or not the attempt fires, and firing
    /// resets it whether or not the shot lands.
    fn try_shoot(&mut self, ctx: &mut TickContext<'_>) {
        if ctx.now_ms - self.last_shot_at <= self.cfg.shoot_cooldown_ms {
            return;
        }
        self.last_shot_at = ctx.now_ms;

        let delta = ctx.player.pos - self.pos;
        let distance = delta.length();
        let bearing = delta.y.atan2(delta.x);

        // Jittered aim: the enemy's simulated facing wanders around the true
        // bearing, and only attempts inside the cone become shots
        let jitter_range = self.cfg.aim_jitter.max(0.0);
        let facing = bearing + ctx.rng.gen_range(-jitter_range..=jitter_range);
        let aim_error = wrap_angle(facing - bearing).abs();

        if aim_error < self.cfg.attack_cone
            && distance < self.cfg.attack_range
            && has_line_of_sight(ctx.grid, self.cell(), ctx.player.cell())
        {
            self.stance = Stance::Flashing {
                until_ms: ctx.now_ms + self.cfg.flash_ms,
            };
            ctx.audio.play(Cue::EnemyFired);

            if ctx.rng.r#gen::<f32>() < self.cfg.gun_accuracy {
                ctx.player.take_damage(self.cfg.damage);
                ctx.audio.play(Cue::PlayerHurt);
            }
        }
    }
}
