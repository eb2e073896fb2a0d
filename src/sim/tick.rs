//! Per-tick simulation
//!
//! No delta time: every speed is in units per tick, so the game runs at
//! whatever rate the frontend calls [`tick`].

use super::autopilot;
use super::collision::first_enemy_hit;
use super::spawner;
use super::state::{GameEvent, GameState};
use crate::consts::ENEMY_PULSE_STEP;

/// Advance the game by one frame: autopilot, then the simulation step.
///
/// Input events should already have been applied with
/// [`apply_input`](super::apply_input).
pub fn tick(state: &mut GameState) {
    state.time_ticks += 1;
    state.enemy_pulse = (state.enemy_pulse + ENEMY_PULSE_STEP) % 360.0;

    // Frozen until restart
    if state.game_over {
        return;
    }

    autopilot::update(state);
    step(state);

    log::trace!(
        "tick {}: {} enemies, {} projectiles, score {}",
        state.time_ticks,
        state.enemies.len(),
        state.projectiles.len(),
        state.score
    );
}

/// The simulation step proper. Order matters:
/// projectiles, enemies (with player contact), then projectile hits.
pub fn step(state: &mut GameState) {
    if state.game_over {
        return;
    }
    advance_projectiles(state);
    advance_enemies(state);
    resolve_projectile_hits(state);
}

/// Move every projectile; anything that leaves the arena counts as a miss
fn advance_projectiles(state: &mut GameState) {
    let speed = state.tuning.bullet_speed;
    let half_extent = state.tuning.grid_half_extent;

    let projectiles = std::mem::take(&mut state.projectiles);
    let mut survivors = Vec::with_capacity(projectiles.len());

    for mut projectile in projectiles {
        projectile.advance(speed);
        if projectile.in_bounds(half_extent) {
            survivors.push(projectile);
            continue;
        }

        state.missed += 1;
        log::debug!("Projectile {} missed ({} total)", projectile.id, state.missed);
        state.events.push(GameEvent::ProjectileMissed {
            id: projectile.id,
            missed: state.missed,
        });
        if state.missed >= state.tuning.max_missed {
            state.end_run();
        }
    }

    state.projectiles = survivors;
}

/// Home every enemy on the player and bounce away any that made contact.
///
/// Contact is judged on the distance before this tick's move. A bounce costs
/// a life but never touches score or the missed counter.
fn advance_enemies(state: &mut GameState) {
    let speed = state.tuning.enemy_speed;
    let hit_radius = state.tuning.player_hit_radius;

    for i in 0..state.enemies.len() {
        let player_pos = state.player.pos;
        let dist = state.enemies[i].home_toward(player_pos, speed);

        if state.game_over || dist >= hit_radius {
            continue;
        }

        state.player.lives = state.player.lives.saturating_sub(1);
        let enemy_id = state.enemies[i].id;
        log::debug!("Player hit by enemy {} ({} lives left)", enemy_id, state.player.lives);
        state.events.push(GameEvent::PlayerHit {
            enemy_id,
            lives: state.player.lives,
        });
        if !state.player.is_alive() {
            state.end_run();
        }

        spawner::relocate_enemy(&mut state.rng, &state.tuning, &mut state.enemies[i]);
    }
}

/// Each projectile destroys at most one enemy, which is replaced at once.
///
/// Runs even in the tick that ended the run; only later ticks are frozen.
fn resolve_projectile_hits(state: &mut GameState) {
    let bullet_size = state.tuning.bullet_size;
    let projectiles = std::mem::take(&mut state.projectiles);
    let mut survivors = Vec::with_capacity(projectiles.len());

    for projectile in projectiles {
        let Some(idx) = first_enemy_hit(&projectile, &state.enemies, bullet_size) else {
            survivors.push(projectile);
            continue;
        };

        let enemy = state.enemies.remove(idx);
        state.spawn_enemy();
        state.score += state.tuning.score_per_kill;
        log::debug!(
            "Projectile {} destroyed enemy {} (score {})",
            projectile.id,
            enemy.id,
            state.score
        );
        state.events.push(GameEvent::EnemyDestroyed {
            enemy_id: enemy.id,
            projectile_id: projectile.id,
            pos: enemy.pos,
        });
    }

    state.projectiles = survivors;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Tuning;
    use crate::sim::state::Projectile;
    use crate::sim::{InputEvent, apply_input};
    use glam::Vec3;
    use proptest::prelude::*;

    fn state_with_far_enemies() -> GameState {
        let mut state = GameState::new(Tuning::default(), 12345);
        park_enemies(&mut state);
        state
    }

    /// Put all enemies in the far corner, away from the player and any shots along +X
    fn park_enemies(state: &mut GameState) {
        for enemy in &mut state.enemies {
            enemy.pos = Vec3::new(-500.0, -500.0, 0.0);
        }
    }

    #[test]
    fn test_manual_fire_then_step() {
        let mut state = state_with_far_enemies();
        apply_input(&mut state, InputEvent::Fire);
        assert_eq!(state.projectiles.len(), 1);
        let p = &state.projectiles[0];
        assert!((p.pos - Vec3::new(60.0, 0.0, 30.0)).length() < 1e-4);
        assert_eq!(p.angle(), 0.0);

        step(&mut state);
        let p = &state.projectiles[0];
        assert!((p.pos - Vec3::new(72.0, 0.0, 30.0)).length() < 1e-4);
        assert_eq!(p.angle(), 0.0);
    }

    #[test]
    fn test_enemy_homes_on_player() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.enemies.truncate(1);
        state.enemies[0].pos = Vec3::new(100.0, 0.0, 0.0);
        step(&mut state);
        let pos = state.enemies[0].pos;
        assert!((pos.x - 99.85).abs() < 1e-4);
        assert_eq!(pos.y, 0.0);
        assert_eq!(pos.z, 0.0);
    }

    #[test]
    fn test_projectile_leaving_arena_is_missed() {
        let mut state = state_with_far_enemies();
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(id, Vec3::new(599.0, 0.0, 30.0), 0.0));
        step(&mut state);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.missed, 1);
        assert!(!state.game_over);
        assert!(state.drain_events().contains(&GameEvent::ProjectileMissed { id, missed: 1 }));
    }

    #[test]
    fn test_tenth_miss_ends_game() {
        let mut state = state_with_far_enemies();
        for n in 1..=10 {
            let id = state.next_entity_id();
            state
                .projectiles
                .push(Projectile::new(id, Vec3::new(595.0, 0.0, 30.0), 0.0));
            step(&mut state);
            assert_eq!(state.missed, n);
            assert_eq!(state.game_over, n == 10, "game over flag after miss {n}");
        }
    }

    #[test]
    fn test_projectile_kills_enemy() {
        let mut state = state_with_far_enemies();
        let target_id = state.enemies[2].id;
        state.enemies[2].pos = Vec3::new(300.0, 0.0, 0.0);
        let id = state.next_entity_id();
        // Lands at x = 282, 18 units short of the enemy: inside 30 + 5
        state
            .projectiles
            .push(Projectile::new(id, Vec3::new(270.0, 0.0, 30.0), 0.0));

        step(&mut state);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 5);
        assert_eq!(state.missed, 0);
        assert_eq!(state.enemies.len(), 5);
        assert!(state.enemies.iter().all(|e| e.id != target_id));
    }

    #[test]
    fn test_projectile_consumes_only_one_enemy() {
        let mut state = state_with_far_enemies();
        let first = state.enemies[0].id;
        let second = state.enemies[1].id;
        state.enemies[0].pos = Vec3::new(300.0, 0.0, 0.0);
        state.enemies[1].pos = Vec3::new(300.0, 5.0, 0.0);
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(id, Vec3::new(288.0, 0.0, 30.0), 0.0));

        step(&mut state);
        assert_eq!(state.score, 5);
        assert_eq!(state.enemies.len(), 5);
        assert!(state.enemies.iter().all(|e| e.id != first));
        assert!(state.enemies.iter().any(|e| e.id == second));
    }

    #[test]
    fn test_enemy_contact_costs_life_and_bounces() {
        let mut state = state_with_far_enemies();
        let id = state.enemies[0].id;
        state.enemies[0].pos = Vec3::new(20.0, 0.0, 0.0);
        step(&mut state);
        assert_eq!(state.player.lives, 4);
        assert_eq!(state.score, 0);
        assert_eq!(state.missed, 0);
        assert_eq!(state.enemies.len(), 5);
        let bounced = state.enemies.iter().find(|e| e.id == id).expect("enemy kept");
        assert_eq!(bounced.size, 30.0);
        assert!(bounced.pos.x.abs() <= 550.0 && bounced.pos.y.abs() <= 550.0);
    }

    #[test]
    fn test_several_contacts_each_cost_a_life() {
        let mut state = state_with_far_enemies();
        state.enemies[0].pos = Vec3::new(10.0, 0.0, 0.0);
        state.enemies[1].pos = Vec3::new(0.0, -15.0, 0.0);
        state.enemies[2].pos = Vec3::new(-25.0, 0.0, 0.0);
        step(&mut state);
        assert_eq!(state.player.lives, 2);
        assert!(!state.game_over);
    }

    #[test]
    fn test_last_life_ends_game_and_stops_contacts() {
        let mut state = state_with_far_enemies();
        state.player.lives = 1;
        state.enemies[0].pos = Vec3::new(10.0, 0.0, 0.0);
        state.enemies[1].pos = Vec3::new(-10.0, 0.0, 0.0);
        step(&mut state);
        assert_eq!(state.player.lives, 0);
        assert!(state.game_over);
        // Second enemy was not counted once the run ended, so it was not bounced
        assert!(state.enemies[1].pos.x > -10.0 && state.enemies[1].pos.x < 0.0);
    }

    #[test]
    fn test_hits_still_score_in_the_tick_that_ends_the_run() {
        let mut state = state_with_far_enemies();
        state.missed = 9;
        state.enemies[0].pos = Vec3::new(300.0, 0.0, 0.0);
        let stray = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(stray, Vec3::new(595.0, 0.0, 30.0), 0.0));
        let shot = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(shot, Vec3::new(270.0, 0.0, 30.0), 0.0));

        step(&mut state);
        assert!(state.game_over);
        assert_eq!(state.missed, 10);
        assert_eq!(state.score, 5);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), 5);

        // Later ticks are frozen
        step(&mut state);
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_contact_uses_distance_before_moving() {
        let mut state = state_with_far_enemies();
        // Ends this tick at 39.95, but started outside the hit radius
        state.enemies[0].pos = Vec3::new(40.1, 0.0, 0.0);
        step(&mut state);
        assert_eq!(state.player.lives, 5);
        assert!((state.enemies[0].pos.x - 39.95).abs() < 1e-4);

        // Starts inside now, so it bounces
        let id = state.enemies[0].id;
        step(&mut state);
        assert_eq!(state.player.lives, 4);
        let bounced = state.enemies.iter().find(|e| e.id == id).expect("enemy kept");
        assert!(bounced.pos.truncate().length() > 0.0);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = state_with_far_enemies();
        state.enemies[0].pos = Vec3::new(20.0, 0.0, 0.0);
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(id, Vec3::new(-500.0, -470.0, 30.0), 0.0));
        state.end_run();
        let lives = state.player.lives;
        let positions: Vec<Vec3> = state.enemies.iter().map(|e| e.pos).collect();

        for _ in 0..50 {
            tick(&mut state);
        }
        assert_eq!(state.player.lives, lives);
        assert_eq!(state.score, 0);
        assert_eq!(state.missed, 0);
        assert_eq!(state.projectiles.len(), 1);
        let after: Vec<Vec3> = state.enemies.iter().map(|e| e.pos).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = state_with_far_enemies();
        state.score = 25;
        state.missed = 10;
        state.end_run();

        apply_input(&mut state, InputEvent::Restart);
        assert_eq!(state.player.lives, 5);
        assert_eq!(state.score, 0);
        assert_eq!(state.missed, 0);
        assert!(!state.game_over);
        assert_eq!(state.enemies.len(), 5);
        for enemy in &state.enemies {
            assert!(enemy.pos.x.abs() <= 550.0 && enemy.pos.y.abs() <= 550.0);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(Tuning::default(), 99999);
        let mut b = GameState::new(Tuning::default(), 99999);
        a.autopilot = true;
        b.autopilot = true;

        for _ in 0..2000 {
            tick(&mut a);
            tick(&mut b);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.missed, b.missed);
        assert_eq!(a.player.lives, b.player.lives);
        assert_eq!(a.projectiles.len(), b.projectiles.len());
        let pa: Vec<Vec3> = a.enemies.iter().map(|e| e.pos).collect();
        let pb: Vec<Vec3> = b.enemies.iter().map(|e| e.pos).collect();
        assert_eq!(pa, pb);
    }

    fn input_strategy() -> impl Strategy<Value = Option<InputEvent>> {
        prop_oneof![
            Just(None),
            Just(Some(InputEvent::MoveForward)),
            Just(Some(InputEvent::MoveBackward)),
            Just(Some(InputEvent::RotateLeft)),
            Just(Some(InputEvent::RotateRight)),
            Just(Some(InputEvent::Fire)),
            Just(Some(InputEvent::ToggleAutopilot)),
            Just(Some(InputEvent::Restart)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn invariants_hold_under_random_play(
            seed in any::<u64>(),
            inputs in prop::collection::vec(input_strategy(), 1..300),
        ) {
            let mut state = GameState::new(Tuning::default(), seed);
            let mut angles = std::collections::HashMap::new();
            let mut last_missed = 0;

            for input in inputs {
                let was_over = state.game_over;
                if let Some(event) = input {
                    apply_input(&mut state, event);
                }
                let restarted = was_over && !state.game_over;
                if restarted {
                    angles.clear();
                    last_missed = 0;
                }
                for p in &state.projectiles {
                    angles.entry(p.id).or_insert(p.angle());
                }

                let frozen = state.game_over.then(|| (state.player.lives, state.score));
                tick(&mut state);

                prop_assert_eq!(state.enemies.len(), state.tuning.num_enemies);
                prop_assert!((0.0..360.0).contains(&state.player.turret_angle));
                prop_assert!(state.missed >= last_missed);
                last_missed = state.missed;
                if state.missed >= state.tuning.max_missed {
                    prop_assert!(state.game_over);
                }
                if let Some(frozen) = frozen {
                    prop_assert_eq!(frozen, (state.player.lives, state.score));
                }
                for p in &state.projectiles {
                    let first = *angles.entry(p.id).or_insert(p.angle());
                    prop_assert_eq!(first, p.angle());
                }
            }
        }
    }
}
