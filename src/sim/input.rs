//! Input handling
//!
//! Frontends translate raw key and mouse events into [`InputEvent`]s and
//! apply them between ticks. Each event is a small state transition with no
//! result.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Drive along the turret direction (W)
    MoveForward,
    /// Reverse along the turret direction (S)
    MoveBackward,
    /// Turn the turret counter-clockwise (A)
    RotateLeft,
    /// Turn the turret clockwise (D)
    RotateRight,
    /// Toggle auto-aim (C)
    ToggleAutopilot,
    /// Start a new run, only after game over (R)
    Restart,
    /// Shoot (left click)
    Fire,
    /// Switch first/third person (right click)
    ToggleView,
    /// Orbit camera controls (arrow keys)
    CameraUp,
    CameraDown,
    CameraLeft,
    CameraRight,
}

impl InputEvent {
    /// Map a keyboard character (case-insensitive) to an event
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(InputEvent::MoveForward),
            's' => Some(InputEvent::MoveBackward),
            'a' => Some(InputEvent::RotateLeft),
            'd' => Some(InputEvent::RotateRight),
            'c' => Some(InputEvent::ToggleAutopilot),
            'r' => Some(InputEvent::Restart),
            _ => None,
        }
    }
}

/// Apply one input event to the game
pub fn apply_input(state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::MoveForward => drive(state, 1.0),
        InputEvent::MoveBackward => drive(state, -1.0),
        InputEvent::RotateLeft => turn(state, 1.0),
        InputEvent::RotateRight => turn(state, -1.0),
        InputEvent::ToggleAutopilot => {
            state.autopilot = !state.autopilot;
            log::info!("Autopilot {}", if state.autopilot { "on" } else { "off" });
        }
        InputEvent::Restart => {
            if state.game_over {
                state.reset();
                state.events.push(GameEvent::Restarted);
            }
        }
        InputEvent::Fire => {
            if !state.game_over {
                let z = state.player.pos.z + state.tuning.manual_fire_height;
                let id = state.fire_projectile(z, false);
                log::debug!("Projectile {} fired at {:.0}°", id, state.player.turret_angle);
            }
        }
        InputEvent::ToggleView => {
            state.camera.mode = state.camera.mode.toggled();
        }
        InputEvent::CameraUp => {
            let cam = &state.tuning.camera;
            state.camera.height = (state.camera.height + cam.height_step).min(cam.max_height);
        }
        InputEvent::CameraDown => {
            let cam = &state.tuning.camera;
            state.camera.height = (state.camera.height - cam.height_step).max(cam.min_height);
        }
        InputEvent::CameraLeft => {
            state.camera.orbit_angle =
                crate::normalize_degrees(state.camera.orbit_angle + state.tuning.camera.angle_step);
        }
        InputEvent::CameraRight => {
            state.camera.orbit_angle =
                crate::normalize_degrees(state.camera.orbit_angle - state.tuning.camera.angle_step);
        }
    }
}

/// Move along the turret heading, then clamp into the arena.
/// Ignored after game over: the player is frozen along with the rest of the run.
fn drive(state: &mut GameState, direction: f32) {
    if state.game_over {
        return;
    }
    let (lo, hi) = state.tuning.player_bounds();
    let step = state.player.aim_dir() * state.tuning.move_speed * direction;
    let pos = &mut state.player.pos;
    pos.x = (pos.x + step.x).clamp(lo, hi);
    pos.y = (pos.y + step.y).clamp(lo, hi);
}

/// Positive direction is counter-clockwise. Ignored after game over, like [`drive`].
fn turn(state: &mut GameState, direction: f32) {
    if state.game_over {
        return;
    }
    state.player.rotate_turret(state.tuning.rot_speed * direction);
}
