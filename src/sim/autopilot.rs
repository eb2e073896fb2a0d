//! Auto-aim assist
//!
//! Turns the turret toward the nearest enemy a few degrees per tick and
//! takes the occasional shot once roughly on target.

use glam::Vec3;
use rand::Rng;

use super::state::{Enemy, GameState};
use crate::{angle_delta_degrees, dir_to_heading, planar_distance};

/// Nearest enemy in the XY plane. Ties go to the earliest spawned.
pub fn nearest_enemy(enemies: &[Enemy], from: Vec3) -> Option<&Enemy> {
    let mut nearest = None;
    let mut min_dist = f32::INFINITY;
    for enemy in enemies {
        let dist = planar_distance(enemy.pos, from);
        if dist < min_dist {
            min_dist = dist;
            nearest = Some(enemy);
        }
    }
    nearest
}

/// Run one autopilot tick. Returns the ID of the projectile fired, if any.
pub fn update(state: &mut GameState) -> Option<u32> {
    if !state.autopilot || state.game_over {
        return None;
    }

    let player_pos = state.player.pos;
    let target = nearest_enemy(&state.enemies, player_pos)?;
    let bearing = dir_to_heading(target.pos.truncate() - player_pos.truncate());

    // Aim error is measured before this tick's turn
    let aim_error = angle_delta_degrees(state.player.turret_angle, bearing);
    let max_turn = state.tuning.autopilot_turn_step;
    state.player.rotate_turret(aim_error.clamp(-max_turn, max_turn));

    if aim_error.abs() >= state.tuning.autopilot_aim_tolerance {
        return None;
    }
    if !state.rng.random_bool(state.tuning.autopilot_fire_chance) {
        return None;
    }

    let id = state.fire_projectile(state.tuning.auto_fire_height, true);
    log::debug!("Autopilot fired projectile {} at {:.1}°", id, state.player.turret_angle);
    Some(id)
}
