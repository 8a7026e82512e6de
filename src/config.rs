//! Game configuration
//!
//! Every tunable the combat core consumes, injected rather than hardcoded.
//! Configs load from RON files or build programmatically; missing fields
//! fall back to the defaults of the original arena balance.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Fixed per-enemy parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Health at spawn
    pub max_health: i32,
    /// Movement speed in world units per millisecond
    pub speed: f32,
    /// Damage dealt to the player per landed hit
    pub damage: i32,
    /// Probability that an eligible shot actually lands
    pub gun_accuracy: f32,
    /// Maximum distance at which the enemy will fire
    pub attack_range: f32,
    /// Half-angle of the firing cone in radians
    pub attack_cone: f32,
    /// Symmetric aim jitter range in radians
    pub aim_jitter: f32,
    /// Minimum time between attack attempts
    pub shoot_cooldown_ms: f64,
    /// How long the attack pose is held after firing
    pub flash_ms: f64,
    /// Frames in the walk cycle (from the asset manifest)
    pub walk_frame_count: usize,
    /// Interval between walk-cycle frames
    pub walk_frame_ms: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 50,
            speed: 0.002,
            damage: 5,
            gun_accuracy: 0.5,
            attack_range: 10.0,
            attack_cone: 0.2,
            aim_jitter: 0.3,
            shoot_cooldown_ms: 1000.0,
            flash_ms: 150.0,
            walk_frame_count: 4,
            walk_frame_ms: 120.0,
        }
    }
}

/// Player weapon parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Damage per landed shot
    pub damage: i32,
    /// Angular window around the facing direction that can be hit
    pub aim_window: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            damage: 25,
            aim_window: 0.2,
        }
    }
}

/// Player parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Health at wave start
    pub max_health: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { max_health: 100 }
    }
}

/// Wave sizing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Spawn count multiplier: wave N spawns `N * enemies_per_wave`
    pub enemies_per_wave: u32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self { enemies_per_wave: 2 }
    }
}

/// Top-level configuration for an arena session
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player parameters
    pub player: PlayerConfig,
    /// Per-enemy parameters
    pub enemy: EnemyConfig,
    /// Player weapon parameters
    pub weapon: WeaponConfig,
    /// Wave sizing parameters
    pub wave: WaveConfig,
}

impl GameConfig {
    /// Replace the enemy parameters
    #[must_use]
    pub fn with_enemy(mut self, enemy: EnemyConfig) -> Self {
        self.enemy = enemy;
        self
    }

    /// Replace the weapon parameters
    #[must_use]
    pub fn with_weapon(mut self, weapon: WeaponConfig) -> Self {
        self.weapon = weapon;
        self
    }

    /// Replace the player parameters
    #[must_use]
    pub fn with_player(mut self, player: PlayerConfig) -> Self {
        self.player = player;
        self
    }

    /// Replace the wave parameters
    #[must_use]
    pub fn with_wave(mut self, wave: WaveConfig) -> Self {
        self.wave = wave;
        self
    }

    /// Parse a configuration from RON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid RON for this schema
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.warn_on_degenerate_values();
        Ok(config)
    }

    /// Load a configuration from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_ron_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron(&text)
    }

    /// Log suspicious values that degrade behaviour without crashing.
    ///
    /// A zero speed freezes enemies in place; a zero cooldown lets them
    /// attempt an attack every tick. Both are tolerated.
    fn warn_on_degenerate_values(&self) {
        if self.enemy.speed <= 0.0 {
            log::warn!("enemy speed {} <= 0: enemies will not move", self.enemy.speed);
        }
        if self.enemy.shoot_cooldown_ms <= 0.0 {
            log::warn!(
                "enemy cooldown {}ms <= 0: enemies will attack every tick",
                self.enemy.shoot_cooldown_ms
            );
        }
        if !(0.0..=1.0).contains(&self.enemy.gun_accuracy) {
            log::warn!(
                "gun accuracy {} outside [0, 1], effective value is clamped by the roll",
                self.enemy.gun_accuracy
            );
        }
    }
}

/// Errors that can occur loading configuration
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading the file
    Io(String),
    /// Error parsing RON text
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_arena_balance() {
        let config = GameConfig::default();
        assert_eq!(config.enemy.max_health, 50);
        assert_eq!(config.enemy.damage, 5);
        assert_eq!(config.weapon.damage, 25);
        assert_eq!(config.player.max_health, 100);
        assert_eq!(config.wave.enemies_per_wave, 2);
    }

    #[test]
    fn test_partial_ron_falls_back_to_defaults() {
        let config = GameConfig::from_ron("(enemy: (attack_range: 6.0))").unwrap();
        assert_eq!(config.enemy.attack_range, 6.0);
        assert_eq!(config.enemy.max_health, 50);
        assert_eq!(config.weapon.damage, 25);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = GameConfig::default().with_weapon(WeaponConfig {
            damage: 40,
            aim_window: 0.15,
        });
        let text = ron::to_string(&config).unwrap();
        let parsed = GameConfig::from_ron(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_ron_is_an_error() {
        assert!(GameConfig::from_ron("(enemy: (speed: \"fast\"))").is_err());
    }
}
