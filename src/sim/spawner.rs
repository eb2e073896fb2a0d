//! Enemy spawning
//!
//! Enemies appear uniformly inside the arena, `spawn_margin` in from each
//! edge. Spawn points may overlap each other or the player.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::state::Enemy;
use crate::settings::Tuning;

/// Uniform random XY point inside the spawn area
pub fn random_spawn_point<R: Rng>(rng: &mut R, tuning: &Tuning) -> Vec2 {
    let (lo, hi) = tuning.spawn_bounds();
    Vec2::new(rng.random_range(lo..=hi), rng.random_range(lo..=hi))
}

/// Build a fresh enemy on the ground at a random spawn point
pub fn spawn_enemy<R: Rng>(rng: &mut R, tuning: &Tuning, id: u32) -> Enemy {
    let pos = random_spawn_point(rng, tuning).extend(0.0);
    Enemy {
        id,
        pos,
        size: tuning.enemy_base_size,
        angle: rng.random_range(0.0..360.0),
    }
}

/// Move an existing enemy to a new random spawn point. Size and ID are kept.
pub fn relocate_enemy<R: Rng>(rng: &mut R, tuning: &Tuning, enemy: &mut Enemy) {
    let point = random_spawn_point(rng, tuning);
    enemy.pos = Vec3::new(point.x, point.y, enemy.pos.z);
}
