//! Headless arena demo
//!
//! Runs the combat core without a renderer: a scripted player spins in
//! place and fires on an interval while waves of enemies close in. The
//! depth buffer the real renderer would produce is stood in for by a
//! simple per-ray march against the wall grid.

use arena::prelude::*;

const FRAME_MS: f64 = 16.0;
const FRAMES: u32 = 3600; // roughly a minute of simulated play

fn main() {
    env_logger::init();

    let grid = Grid::from_layout(&[
        "################",
        "#..............#",
        "#..##......##..#",
        "#..##......##..#",
        "#......##......#",
        "#......##......#",
        "#..##......##..#",
        "#..##......##..#",
        "#..............#",
        "################",
    ]);
    let config = GameConfig::default();
    let player = Player::new(Vec2::new(1.5, 1.5), 0.0, config.player.max_health);

    let audio: Box<dyn AudioSink> = match RodioAudio::new() {
        Ok(sink) => Box::new(sink),
        Err(e) => {
            log::warn!("audio disabled: {e}");
            Box::new(NullAudio)
        }
    };

    let mut session = Arena::new(grid, player, config).with_seed(7).with_audio(audio);
    let projection = Projection::default();

    let mut shots = 0u32;
    let mut hits = 0u32;
    let mut deaths = 0u32;
    let mut kills = 0u32;

    for frame in 0..FRAMES {
        session.submit_depth(march_depth(session.grid(), session.player(), projection));

        // Scripted player: spin slowly, squeeze the trigger twice a second
        let player = session.player_mut();
        player.angle = wrap_angle(player.angle + 0.03);
        let fired = frame % 30 == 0;

        let outcome = session.tick(FRAME_MS, fired);

        if fired {
            shots += 1;
        }
        if let Some(id) = outcome.shot_hit {
            hits += 1;
            log::debug!("frame {frame}: hit enemy {id:?}");
        }
        kills += outcome.kills;
        if outcome.player_died {
            deaths += 1;
        }
        if let Some(wave) = outcome.wave_started {
            log::info!(
                "frame {frame}: wave {wave} underway, {} enemies, player at {} hp",
                session.enemies().len(),
                session.player().health()
            );
        }
    }

    log::info!(
        "finished on wave {}: {shots} shots, {hits} hits, {kills} kills, {deaths} deaths",
        session.wave()
    );
}

/// Stand-in for the renderer's raycaster: march each ray in small steps
/// until it enters a wall cell, recording the distance travelled.
fn march_depth(grid: &Grid, player: &Player, projection: Projection) -> DepthBuffer {
    const STEP: f32 = 0.02;
    const MAX_DISTANCE: f32 = 24.0;

    let mut distances = Vec::with_capacity(projection.ray_count);
    for ray in 0..projection.ray_count {
        let offset = (ray as f32 + 0.5) / projection.ray_count as f32 - 0.5;
        let angle = player.angle + offset * projection.fov;
        let dir = Vec2::new(angle.cos(), angle.sin());

        let mut distance = MAX_DISTANCE;
        let mut travelled = STEP;
        while travelled < MAX_DISTANCE {
            let probe = player.pos + dir * travelled;
            if grid.is_wall(cell_of(probe)) {
                distance = travelled;
                break;
            }
            travelled += STEP;
        }
        distances.push(distance);
    }
    DepthBuffer::new(projection, distances)
}
