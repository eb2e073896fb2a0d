//! Game tuning
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults match the classic
//! arcade feel; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Camera tunables (presentation only, never read by the simulation step)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    pub initial_angle: f32,
    pub initial_height: f32,
    pub distance: f32,
    pub angle_step: f32,
    pub height_step: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub eye_height: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            initial_angle: CAMERA_ANGLE,
            initial_height: CAMERA_HEIGHT,
            distance: CAMERA_DISTANCE,
            angle_step: CAMERA_ANGLE_STEP,
            height_step: CAMERA_HEIGHT_STEP,
            min_height: CAMERA_MIN_HEIGHT,
            max_height: CAMERA_MAX_HEIGHT,
            eye_height: EYE_HEIGHT,
        }
    }
}

/// Gameplay tuning. Speeds are in units per tick, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub grid_half_extent: f32,
    pub spawn_margin: f32,
    pub player_margin: f32,

    // === Player ===
    pub starting_lives: u32,
    pub move_speed: f32,
    pub rot_speed: f32,
    pub player_hit_radius: f32,

    // === Turret & projectiles ===
    pub gun_length: f32,
    pub manual_fire_height: f32,
    pub auto_fire_height: f32,
    pub bullet_speed: f32,
    pub bullet_size: f32,
    pub max_missed: u32,

    // === Enemies ===
    pub num_enemies: usize,
    pub enemy_speed: f32,
    pub enemy_base_size: f32,
    pub score_per_kill: u64,

    // === Autopilot ===
    pub autopilot_turn_step: f32,
    pub autopilot_aim_tolerance: f32,
    pub autopilot_fire_chance: f64,

    pub camera: CameraTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            grid_half_extent: GRID_HALF_EXTENT,
            spawn_margin: SPAWN_MARGIN,
            player_margin: PLAYER_MARGIN,

            starting_lives: PLAYER_LIVES,
            move_speed: MOVE_SPEED,
            rot_speed: ROT_SPEED,
            player_hit_radius: PLAYER_HIT_RADIUS,

            gun_length: GUN_LENGTH,
            manual_fire_height: MANUAL_FIRE_HEIGHT,
            auto_fire_height: AUTO_FIRE_HEIGHT,
            bullet_speed: BULLET_SPEED,
            bullet_size: BULLET_SIZE,
            max_missed: MAX_MISSED,

            num_enemies: NUM_ENEMIES,
            enemy_speed: ENEMY_SPEED,
            enemy_base_size: ENEMY_BASE_SIZE,
            score_per_kill: SCORE_PER_KILL,

            autopilot_turn_step: AUTOPILOT_TURN_STEP,
            autopilot_aim_tolerance: AUTOPILOT_AIM_TOLERANCE,
            autopilot_fire_chance: AUTOPILOT_FIRE_CHANCE,

            camera: CameraTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
            SettingsError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.grid_half_extent > 0.0) {
            return Err(invalid("grid_half_extent", "must be positive"));
        }
        if !(self.spawn_margin >= 0.0 && self.spawn_margin < self.grid_half_extent) {
            return Err(invalid(
                "spawn_margin",
                format!("must be in [0, {})", self.grid_half_extent),
            ));
        }
        if !(self.player_margin >= 0.0 && self.player_margin < self.grid_half_extent) {
            return Err(invalid(
                "player_margin",
                format!("must be in [0, {})", self.grid_half_extent),
            ));
        }
        if self.num_enemies == 0 {
            return Err(invalid("num_enemies", "at least one enemy is required"));
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "must be at least 1"));
        }
        if self.max_missed == 0 {
            return Err(invalid("max_missed", "must be at least 1"));
        }
        for (field, value) in [
            ("bullet_speed", self.bullet_speed),
            ("bullet_size", self.bullet_size),
            ("enemy_base_size", self.enemy_base_size),
            ("move_speed", self.move_speed),
            ("rot_speed", self.rot_speed),
            ("autopilot_turn_step", self.autopilot_turn_step),
        ] {
            if !(value > 0.0) {
                return Err(invalid(field, "must be positive"));
            }
        }
        if !(self.enemy_speed >= 0.0) {
            return Err(invalid("enemy_speed", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.autopilot_fire_chance) {
            return Err(invalid("autopilot_fire_chance", "must be in [0, 1]"));
        }
        if !(self.camera.min_height <= self.camera.max_height) {
            return Err(invalid("camera.min_height", "must not exceed camera.max_height"));
        }
        Ok(())
    }

    /// Lowest/highest coordinate an enemy may spawn at
    pub fn spawn_bounds(&self) -> (f32, f32) {
        let limit = self.grid_half_extent - self.spawn_margin;
        (-limit, limit)
    }

    /// Lowest/highest coordinate the player may stand at
    pub fn player_bounds(&self) -> (f32, f32) {
        let limit = self.grid_half_extent - self.player_margin;
        (-limit, limit)
    }
}
