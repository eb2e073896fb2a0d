//! Read-only view of the game for renderers
//!
//! Built after each tick. Owns its data so the renderer never touches
//! [`GameState`] while the simulation runs.

use glam::Vec3;
use serde::Serialize;

use super::state::{GameState, ViewMode, pulse_factor};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec3,
    pub body_angle: f32,
    pub turret_angle: f32,
    pub lives: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec3,
    /// Collision size
    pub size: f32,
    /// Size to draw this frame, including the pulse
    pub display_size: f32,
    pub angle: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub pos: Vec3,
    pub angle: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CameraView {
    pub mode: ViewMode,
    pub orbit_angle: f32,
    pub height: f32,
    pub eye: Vec3,
    pub look_at: Vec3,
}

/// Everything a frontend needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub score: u64,
    pub missed: u32,
    pub max_missed: u32,
    pub game_over: bool,
    pub autopilot: bool,
    pub camera: CameraView,
    pub grid_half_extent: f32,
    pub bullet_size: f32,
}

impl RenderSnapshot {
    /// HUD overlay text, top line first
    pub fn hud_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Lives: {}  Score: {}  Missed: {}/{}",
                self.player.lives, self.score, self.missed, self.max_missed
            ),
            format!("Cheat Mode: {}", if self.autopilot { "ON" } else { "OFF" }),
            "Left Click: Shoot  |  Right Click: Toggle Camera  |  WASD: Move/Rotate".to_string(),
        ];
        if self.game_over {
            lines.push("GAME OVER - Press R to restart".to_string());
        }
        lines
    }
}

impl GameState {
    /// Capture the current frame for rendering
    pub fn snapshot(&self) -> RenderSnapshot {
        let pulse = pulse_factor(self.enemy_pulse);
        RenderSnapshot {
            tick: self.time_ticks,
            player: PlayerView {
                pos: self.player.pos,
                body_angle: self.player.body_angle,
                turret_angle: self.player.turret_angle,
                lives: self.player.lives,
            },
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.pos,
                    size: e.size,
                    display_size: e.size * pulse,
                    angle: e.angle,
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    pos: p.pos,
                    angle: p.angle(),
                })
                .collect(),
            score: self.score,
            missed: self.missed,
            max_missed: self.tuning.max_missed,
            game_over: self.game_over,
            autopilot: self.autopilot,
            camera: CameraView {
                mode: self.camera.mode,
                orbit_angle: self.camera.orbit_angle,
                height: self.camera.height,
                eye: self.camera.eye(&self.player),
                look_at: self.camera.look_at(&self.player),
            },
            grid_half_extent: self.tuning.grid_half_extent,
            bullet_size: self.tuning.bullet_size,
        }
    }
}
