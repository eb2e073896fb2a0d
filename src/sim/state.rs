//! Game state and core simulation types
//!
//! Everything the simulation owns lives in [`GameState`]. Input handling,
//! the autopilot and the tick all take it by `&mut`; the renderer only ever
//! sees a [`RenderSnapshot`](super::RenderSnapshot).

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawner;
use crate::settings::Tuning;
use crate::{heading_to_dir, normalize_degrees};

/// The player's tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    /// Body facing (degrees). Tracked for rendering, movement follows the turret.
    pub body_angle: f32,
    /// Turret aim (degrees, [0, 360))
    pub turret_angle: f32,
    pub lives: u32,
}

impl Player {
    pub fn new(lives: u32) -> Self {
        Self {
            pos: Vec3::ZERO,
            body_angle: 0.0,
            turret_angle: 0.0,
            lives,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// Unit aim direction in the XY plane
    pub fn aim_dir(&self) -> Vec2 {
        heading_to_dir(self.turret_angle)
    }

    /// Rotate the turret by `delta` degrees, keeping it in [0, 360)
    pub fn rotate_turret(&mut self, delta: f32) {
        self.turret_angle = normalize_degrees(self.turret_angle + delta);
    }

    /// XY point at the end of the barrel
    pub fn muzzle(&self, gun_length: f32) -> Vec2 {
        self.pos.truncate() + self.aim_dir() * gun_length
    }
}

/// A projectile in flight. Its angle never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
    angle: f32,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec3, angle: f32) -> Self {
        Self {
            id,
            pos,
            angle: normalize_degrees(angle),
        }
    }

    /// Travel heading in degrees
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Move `speed` units along the travel heading (z is unchanged)
    pub fn advance(&mut self, speed: f32) {
        let step = heading_to_dir(self.angle) * speed;
        self.pos.x += step.x;
        self.pos.y += step.y;
    }

    /// True while x and y are strictly inside (-half_extent, half_extent)
    pub fn in_bounds(&self, half_extent: f32) -> bool {
        self.pos.x > -half_extent
            && self.pos.x < half_extent
            && self.pos.y > -half_extent
            && self.pos.y < half_extent
    }
}

/// A homing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec3,
    /// Collision radius, fixed at spawn
    pub size: f32,
    /// Facing (degrees, cosmetic)
    pub angle: f32,
}

impl Enemy {
    /// Step `speed` units toward `target` in the XY plane.
    /// Returns the XY distance to the target before moving.
    pub fn home_toward(&mut self, target: Vec3, speed: f32) -> f32 {
        let to_target = target.truncate() - self.pos.truncate();
        let dist = to_target.length();
        if dist > 0.0 {
            let step = to_target / dist * speed;
            self.pos.x += step.x;
            self.pos.y += step.y;
        }
        dist
    }

    /// Radius to draw at the given pulse phase (degrees). Collision ignores this.
    pub fn display_radius(&self, pulse: f32) -> f32 {
        self.size * pulse_factor(pulse)
    }
}

/// Display scale for the enemy pulse animation
pub fn pulse_factor(pulse: f32) -> f32 {
    0.25 * pulse.to_radians().sin() + 1.0
}

/// Camera view mode (presentation only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    FirstPerson,
    #[default]
    ThirdPerson,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::FirstPerson => ViewMode::ThirdPerson,
            ViewMode::ThirdPerson => ViewMode::FirstPerson,
        }
    }
}

/// Orbit camera settings (presentation only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub mode: ViewMode,
    /// Orbit angle around the player (degrees)
    pub orbit_angle: f32,
    pub height: f32,
    pub distance: f32,
    pub eye_height: f32,
}

impl Camera {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            mode: ViewMode::default(),
            orbit_angle: tuning.camera.initial_angle,
            height: tuning.camera.initial_height,
            distance: tuning.camera.distance,
            eye_height: tuning.camera.eye_height,
        }
    }

    /// Eye position for the given player.
    ///
    /// Third person orbits at `distance` using sin for x and cos for y, so an
    /// orbit angle of 0 puts the camera on the +Y side of the player.
    pub fn eye(&self, player: &Player) -> Vec3 {
        match self.mode {
            ViewMode::FirstPerson => player.pos + Vec3::Z * self.eye_height,
            ViewMode::ThirdPerson => {
                let rad = self.orbit_angle.to_radians();
                Vec3::new(
                    player.pos.x + self.distance * rad.sin(),
                    player.pos.y + self.distance * rad.cos(),
                    self.height,
                )
            }
        }
    }

    /// Point the camera looks at
    pub fn look_at(&self, player: &Player) -> Vec3 {
        match self.mode {
            ViewMode::FirstPerson => {
                let dir = player.aim_dir();
                Vec3::new(
                    player.pos.x + dir.x,
                    player.pos.y + dir.y,
                    player.pos.z + self.eye_height,
                )
            }
            ViewMode::ThirdPerson => Vec3::new(player.pos.x, player.pos.y, self.eye_height),
        }
    }
}

/// Notable things that happened during input handling or a tick.
/// Frontends drain these for sound and effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired { id: u32, auto: bool },
    ProjectileMissed { id: u32, missed: u32 },
    EnemyDestroyed { enemy_id: u32, projectile_id: u32, pos: Vec3 },
    PlayerHit { enemy_id: u32, lives: u32 },
    GameOver { score: u64 },
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub player: Player,
    /// Projectiles in firing order
    pub projectiles: Vec<Projectile>,
    /// Enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub score: u64,
    pub missed: u32,
    pub game_over: bool,
    pub autopilot: bool,
    pub camera: Camera,
    /// Enemy pulse phase in degrees (display only)
    pub enemy_pulse: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with the given tuning and RNG seed.
    ///
    /// `tuning` must pass [`Tuning::validate`]; [`Tuning::load`] and
    /// [`Tuning::from_json_str`] already check it. Spawning panics on an empty
    /// spawn area.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        debug_assert!(
            tuning.validate().is_ok(),
            "invalid tuning: {:?}",
            tuning.validate()
        );
        let camera = Camera::new(&tuning);
        let mut state = Self {
            player: Player::new(tuning.starting_lives),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            missed: 0,
            game_over: false,
            autopilot: false,
            camera,
            enemy_pulse: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.populate_enemies();
        state
    }

    /// Reinitialize the run: player, counters, projectiles and enemies.
    ///
    /// The autopilot toggle, camera and RNG stream carry over.
    pub fn reset(&mut self) {
        self.player = Player::new(self.tuning.starting_lives);
        self.score = 0;
        self.missed = 0;
        self.game_over = false;
        self.projectiles.clear();
        self.enemies.clear();
        self.populate_enemies();
        log::info!(
            "Run reset: {} enemies, {} lives",
            self.enemies.len(),
            self.player.lives
        );
    }

    fn populate_enemies(&mut self) {
        for _ in 0..self.tuning.num_enemies {
            self.spawn_enemy();
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn one enemy at a random position and return its ID
    pub fn spawn_enemy(&mut self) -> u32 {
        let id = self.next_entity_id();
        let enemy = spawner::spawn_enemy(&mut self.rng, &self.tuning, id);
        log::debug!("Enemy {} spawned at ({:.1}, {:.1})", id, enemy.pos.x, enemy.pos.y);
        self.enemies.push(enemy);
        id
    }

    /// Fire a projectile from the muzzle at height `z` along the turret angle
    pub fn fire_projectile(&mut self, z: f32, auto: bool) -> u32 {
        let id = self.next_entity_id();
        let muzzle = self.player.muzzle(self.tuning.gun_length);
        self.projectiles.push(Projectile::new(
            id,
            muzzle.extend(z),
            self.player.turret_angle,
        ));
        self.events.push(GameEvent::ProjectileFired { id, auto });
        id
    }

    /// Set the game-over flag. Returns true only on the transition.
    pub fn end_run(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.game_over = true;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!(
            "Game over: score {}, lives {}, missed {}",
            self.score,
            self.player.lives,
            self.missed
        );
        true
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
