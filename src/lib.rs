//! Bullet Frenzy - A top-down arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, autopilot)
//! - `settings`: Data-driven game tuning
//!
//! Rendering is not part of this crate. A frontend feeds input events into
//! [`sim::apply_input`], calls [`sim::tick`] once per frame and draws the
//! [`sim::RenderSnapshot`] it gets back from [`sim::GameState::snapshot`].

pub mod settings;
pub mod sim;

pub use settings::{SettingsError, Tuning};

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Half-extent of the square arena (grid runs from -L to L)
    pub const GRID_HALF_EXTENT: f32 = 600.0;
    /// Enemies spawn this far inside the arena edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Player is kept this far inside the arena edge
    pub const PLAYER_MARGIN: f32 = 30.0;

    /// Player defaults
    pub const PLAYER_LIVES: u32 = 5;
    pub const MOVE_SPEED: f32 = 10.0;
    pub const ROT_SPEED: f32 = 5.0;
    /// Enemies closer than this hit the player
    pub const PLAYER_HIT_RADIUS: f32 = 40.0;

    /// Turret
    pub const GUN_LENGTH: f32 = 60.0;
    /// Manual shots leave the barrel at player z + this
    pub const MANUAL_FIRE_HEIGHT: f32 = 30.0;
    /// Autopilot shots always leave at this absolute height
    pub const AUTO_FIRE_HEIGHT: f32 = 20.0;

    /// Projectiles (units per tick)
    pub const BULLET_SPEED: f32 = 12.0;
    pub const BULLET_SIZE: f32 = 10.0;
    /// Missed shots allowed before the run ends
    pub const MAX_MISSED: u32 = 10;

    /// Enemies (units per tick)
    pub const NUM_ENEMIES: usize = 5;
    pub const ENEMY_SPEED: f32 = 0.15;
    pub const ENEMY_BASE_SIZE: f32 = 30.0;
    /// Degrees the display pulse advances per tick
    pub const ENEMY_PULSE_STEP: f32 = 2.0;

    pub const SCORE_PER_KILL: u64 = 5;

    /// Autopilot
    pub const AUTOPILOT_TURN_STEP: f32 = 6.0;
    pub const AUTOPILOT_AIM_TOLERANCE: f32 = 10.0;
    pub const AUTOPILOT_FIRE_CHANCE: f64 = 0.1;

    /// Camera (presentation only)
    pub const CAMERA_ANGLE: f32 = 45.0;
    pub const CAMERA_HEIGHT: f32 = 400.0;
    pub const CAMERA_DISTANCE: f32 = 600.0;
    pub const CAMERA_ANGLE_STEP: f32 = 5.0;
    pub const CAMERA_HEIGHT_STEP: f32 = 20.0;
    pub const CAMERA_MIN_HEIGHT: f32 = 100.0;
    pub const CAMERA_MAX_HEIGHT: f32 = 800.0;
    /// First-person eye height above the player
    pub const EYE_HEIGHT: f32 = 40.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Signed shortest rotation from `from` to `to`, in (-180, 180]
#[inline]
pub fn angle_delta_degrees(from: f32, to: f32) -> f32 {
    let delta = normalize_degrees(to - from);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Unit vector in the XY plane for a heading in degrees
#[inline]
pub fn heading_to_dir(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Heading in degrees [0, 360) of a direction in the XY plane
#[inline]
pub fn dir_to_heading(dir: Vec2) -> f32 {
    normalize_degrees(dir.y.atan2(dir.x).to_degrees())
}

/// Distance between two points ignoring height
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    a.truncate().distance(b.truncate())
}
