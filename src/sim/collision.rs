//! Collision checks
//!
//! Everything is a circle in the XY plane. Height is ignored, so a projectile
//! flying at z = 30 still hits an enemy sitting on the ground.

use glam::Vec3;

use super::state::{Enemy, Projectile};
use crate::planar_distance;

/// True if two circles at `a` and `b` overlap (strictly closer than `reach`)
#[inline]
pub fn within_reach(a: Vec3, b: Vec3, reach: f32) -> bool {
    planar_distance(a, b) < reach
}

/// Projectile vs enemy: the enemy's base size plus half the projectile size
pub fn projectile_hits_enemy(projectile: &Projectile, enemy: &Enemy, bullet_size: f32) -> bool {
    within_reach(projectile.pos, enemy.pos, enemy.size + bullet_size / 2.0)
}

/// Index of the first enemy (in spawn order) the projectile overlaps
pub fn first_enemy_hit(projectile: &Projectile, enemies: &[Enemy], bullet_size: f32) -> Option<usize> {
    enemies
        .iter()
        .position(|enemy| projectile_hits_enemy(projectile, enemy, bullet_size))
}
