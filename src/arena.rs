//! Arena session
//!
//! Owns the live game state and drives one frame per [`Arena::tick`] call,
//! in a fixed order: enemy updates (pathfind, move, attack), then at most
//! one player shot, then reaping and wave boundaries. Everything runs on
//! the calling thread; the renderer hands its depth buffer in between
//! frames via [`Arena::submit_depth`].

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ai::{Enemy, EnemyId, TickContext};
use crate::audio::{AudioSink, Cue, NullAudio};
use crate::combat;
use crate::config::GameConfig;
use crate::map::Grid;
use crate::player::Player;
use crate::view::DepthBuffer;
use crate::wave;

/// What one tick did, for HUD and logging
#[derive(Debug, Default)]
pub struct TickOutcome {
    /// Enemy hit by the player's shot this tick, if any
    pub shot_hit: Option<EnemyId>,
    /// Enemies that died this tick
    pub kills: u32,
    /// Set when a new wave spawned this tick
    pub wave_started: Option<u32>,
    /// Set when the player died this tick (the session restarts at wave 1)
    pub player_died: bool,
}

/// A frame-stepped arena session
pub struct Arena {
    grid: Grid,
    player: Player,
    enemies: Vec<Enemy>,
    wave: u32,
    config: GameConfig,
    rng: StdRng,
    audio: Box<dyn AudioSink>,
    depth: Option<DepthBuffer>,
    clock_ms: f64,
    next_enemy_id: u32,
    started: bool,
}

impl Arena {
    /// Create a session; the first wave spawns on the first tick
    #[must_use]
    pub fn new(grid: Grid, player: Player, config: GameConfig) -> Self {
        Self {
            grid,
            player,
            enemies: Vec::new(),
            wave: 1,
            config,
            rng: StdRng::from_entropy(),
            audio: Box::new(NullAudio),
            depth: None,
            clock_ms: 0.0,
            next_enemy_id: 0,
            started: false,
        }
    }

    /// Use a fixed RNG seed (reproducible spawns and combat rolls)
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Route sound cues to the given sink
    #[must_use]
    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = audio;
        self
    }

    /// The wall grid
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The player
    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The player, mutably (movement and input live outside this core)
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Live enemies
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Current wave number
    #[must_use]
    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Session clock in milliseconds
    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Hand over the depth buffer the renderer produced this frame
    pub fn submit_depth(&mut self, depth: DepthBuffer) {
        self.depth = Some(depth);
    }

    /// Advance the session by one frame.
    ///
    /// `fired` is the externally-gated player trigger: at most one shot is
    /// resolved per tick.
    pub fn tick(&mut self, delta_ms: f64, fired: bool) -> TickOutcome {
        self.clock_ms += delta_ms;
        let mut outcome = TickOutcome::default();

        if !self.started {
            self.started = true;
            self.spawn_current_wave();
            outcome.wave_started = Some(self.wave);
        }

        if self.player.is_dead() {
            log::info!("player died on wave {}, restarting", self.wave);
            outcome.player_died = true;
            self.wave = 1;
            self.spawn_current_wave();
            outcome.wave_started = Some(self.wave);
            return outcome;
        }

        self.update_enemies(delta_ms);

        if fired {
            outcome.shot_hit = combat::resolve_player_shot(
                &self.player,
                &mut self.enemies,
                self.depth.as_ref(),
                &self.config.weapon,
                self.audio.as_mut(),
            );
        }

        outcome.kills = self.reap_dead();

        // A boxed-in player leaves nowhere to spawn; hold the wave counter
        // until the arena has room again instead of racing it upward
        if self.enemies.is_empty() && self.has_spawn_room() {
            self.wave += 1;
            self.spawn_current_wave();
            outcome.wave_started = Some(self.wave);
        }

        outcome
    }

    fn update_enemies(&mut self, delta_ms: f64) {
        let now_ms = self.clock_ms;
        let Self {
            grid,
            player,
            enemies,
            rng,
            audio,
            ..
        } = self;
        let mut ctx = TickContext {
            grid,
            player,
            audio: audio.as_mut(),
            rng,
            now_ms,
            delta_ms,
        };
        for enemy in enemies.iter_mut() {
            enemy.update(&mut ctx);
        }
    }

    fn reap_dead(&mut self) -> u32 {
        let before = self.enemies.len();
        self.enemies.retain(|enemy| !enemy.is_dead());
        let kills = (before - self.enemies.len()) as u32;
        for _ in 0..kills {
            self.audio.play(Cue::EnemyDeath);
        }
        kills
    }

    fn has_spawn_room(&self) -> bool {
        wave::reachable_cells(&self.grid, self.player.cell()).len() > 1
    }

    fn spawn_current_wave(&mut self) {
        self.enemies = wave::spawn_wave(
            &self.grid,
            &mut self.player,
            self.wave,
            &self.config,
            &mut self.rng,
            &mut self.next_enemy_id,
        );
        log::info!(
            "wave {}: spawned {} enemies",
            self.wave,
            self.enemies.len()
        );
    }
}
