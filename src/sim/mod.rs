//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, no delta time
//! - Seeded RNG only
//! - Stable iteration order (spawn/fire order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::nearest_enemy;
pub use collision::{first_enemy_hit, projectile_hits_enemy};
pub use input::{InputEvent, apply_input};
pub use snapshot::{CameraView, EnemyView, PlayerView, ProjectileView, RenderSnapshot};
pub use state::{Camera, Enemy, GameEvent, GameState, Player, Projectile, ViewMode};
pub use tick::{step, tick};
