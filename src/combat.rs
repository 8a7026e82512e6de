//! Player shot resolution
//!
//! A player shot is a hitscan: among live enemies inside a small angular
//! window around the facing direction, the nearest one that is not hidden
//! behind a wall takes the damage. Occlusion reuses the renderer's depth
//! buffer so a shot can never hit an enemy the player cannot see.

use crate::ai::{Enemy, EnemyId};
use crate::audio::AudioSink;
use crate::config::WeaponConfig;
use crate::player::Player;
use crate::view::{DepthBuffer, wrap_angle};

/// Resolve one player shot against the live enemies.
///
/// `depth` is the buffer the renderer produced this frame; `None` (no frame
/// rendered yet) treats every angle-eligible enemy as visible. Returns the
/// id of the enemy hit, if any; a miss has no effect.
pub fn resolve_player_shot(
    player: &Player,
    enemies: &mut [Enemy],
    depth: Option<&DepthBuffer>,
    weapon: &WeaponConfig,
    audio: &mut dyn AudioSink,
) -> Option<EnemyId> {
    let mut best: Option<(usize, f32)> = None;

    for (index, enemy) in enemies.iter().enumerate() {
        if enemy.is_dead() {
            continue;
        }
        let delta = enemy.pos() - player.pos;
        let distance = delta.length();
        let rel_bearing = wrap_angle(delta.y.atan2(delta.x) - player.angle);

        if rel_bearing.abs() >= weapon.aim_window {
            continue;
        }
        if let Some(depth) = depth {
            if depth.occludes(rel_bearing, distance) {
                continue;
            }
        }
        if best.is_none_or(|(_, best_dist)| distance < best_dist) {
            best = Some((index, distance));
        }
    }

    let (index, _) = best?;
    enemies[index].take_damage(weapon.damage, audio);
    Some(enemies[index].id())
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::audio::{Cue, RecordingAudio};
    use crate::config::EnemyConfig;
    use crate::view::Projection;

    use super::*;

    fn enemy_at(id: u32, pos: Vec2) -> Enemy {
        Enemy::new(EnemyId(id), pos, EnemyConfig::default())
    }

    fn player_facing_east() -> Player {
        Player::new(Vec2::new(0.5, 0.5), 0.0, 100)
    }

    fn uniform_depth(distance: f32) -> DepthBuffer {
        let proj = Projection::default();
        DepthBuffer::new(proj, vec![distance; proj.ray_count])
    }

    #[test]
    fn test_nearest_in_window_is_hit() {
        let player = player_facing_east();
        let mut enemies = vec![
            enemy_at(0, Vec2::new(6.5, 0.5)),
            enemy_at(1, Vec2::new(3.5, 0.5)),
            enemy_at(2, Vec2::new(9.5, 0.5)),
        ];
        let mut audio = RecordingAudio::default();
        let depth = uniform_depth(100.0);

        let hit = resolve_player_shot(
            &player,
            &mut enemies,
            Some(&depth),
            &WeaponConfig::default(),
            &mut audio,
        );
        assert_eq!(hit, Some(EnemyId(1)));
        assert_eq!(enemies[1].health(), 50 - 25);
        assert_eq!(enemies[0].health(), 50);
        assert_eq!(audio.count(Cue::EnemyHurt), 1);
    }

    #[test]
    fn test_outside_window_is_spared() {
        let player = player_facing_east();
        // Due north of the player: pi/2 off the facing direction
        let mut enemies = vec![enemy_at(0, Vec2::new(0.5, 5.5))];
        let mut audio = RecordingAudio::default();

        let hit = resolve_player_shot(
            &player,
            &mut enemies,
            None,
            &WeaponConfig::default(),
            &mut audio,
        );
        assert_eq!(hit, None);
        assert_eq!(enemies[0].health(), 50);
    }

    #[test]
    fn test_occluded_enemy_is_never_selected() {
        let player = player_facing_east();
        // Nearest candidate sits behind a wall 2 units out; the farther one
        // stands in an unobstructed direction
        let near = enemy_at(0, Vec2::new(4.5, 0.5));
        let far = enemy_at(1, Vec2::new(8.5, 1.2));
        let mut enemies = vec![near, far];
        let mut audio = RecordingAudio::default();

        let proj = Projection::default();
        let mut distances = vec![100.0; proj.ray_count];
        // Wall only on the straight-ahead ray
        let blocked_ray = proj.ray_index(0.0);
        distances[blocked_ray] = 2.0;
        let depth = DepthBuffer::new(proj, distances);

        let hit = resolve_player_shot(
            &player,
            &mut enemies,
            Some(&depth),
            &WeaponConfig::default(),
            &mut audio,
        );
        assert_eq!(hit, Some(EnemyId(1)), "occluded enemy must be skipped");
        assert_eq!(enemies[0].health(), 50);
    }

    #[test]
    fn test_everything_occluded_is_a_miss() {
        let player = player_facing_east();
        let mut enemies = vec![enemy_at(0, Vec2::new(5.5, 0.5))];
        let mut audio = RecordingAudio::default();
        let depth = uniform_depth(1.0);

        let hit = resolve_player_shot(
            &player,
            &mut enemies,
            Some(&depth),
            &WeaponConfig::default(),
            &mut audio,
        );
        assert_eq!(hit, None);
        assert_eq!(audio.count(Cue::EnemyHurt), 0);
    }

    #[test]
    fn test_missing_depth_buffer_trusts_the_angle() {
        // First frame: no buffer yet, angle-eligible candidates are visible
        let player = player_facing_east();
        let mut enemies = vec![enemy_at(0, Vec2::new(5.5, 0.5))];
        let mut audio = RecordingAudio::default();

        let hit = resolve_player_shot(
            &player,
            &mut enemies,
            None,
            &WeaponConfig::default(),
            &mut audio,
        );
        assert_eq!(hit, Some(EnemyId(0)));
    }

    #[test]
    fn test_dead_enemies_are_ignored() {
        let player = player_facing_east();
        let mut dead = enemy_at(0, Vec2::new(2.5, 0.5));
        let mut audio = RecordingAudio::default();
        dead.take_damage(1000, &mut audio);
        let mut enemies = vec![dead, enemy_at(1, Vec2::new(6.5, 0.5))];

        let hit = resolve_player_shot(
            &player,
            &mut enemies,
            None,
            &WeaponConfig::default(),
            &mut audio,
        );
        assert_eq!(hit, Some(EnemyId(1)));
    }

    #[test]
    fn test_facing_wraps_across_pi() {
        // Facing just below +pi, enemy just above -pi: angular gap is small
        let mut player = player_facing_east();
        player.angle = std::f32::consts::PI - 0.05;
        let mut enemies = vec![enemy_at(0, Vec2::new(-5.0, 0.5 - 0.1))];
        let mut audio = RecordingAudio::default();

        let hit = resolve_player_shot(
            &player,
            &mut enemies,
            None,
            &WeaponConfig::default(),
            &mut audio,
        );
        assert_eq!(hit, Some(EnemyId(0)));
    }
}
