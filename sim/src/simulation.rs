//! The simulation context and its per-tick update.
//!
//! `Simulation` owns every piece of mutable game state. The host creates it
//! once, stages input into `Simulation::input` as events arrive, calls `tick`
//! once per fixed step, and calls `fire` the moment the trigger is pulled.

use bevy::prelude::*;
use rand::Rng;

use crate::arena::Arena;
use crate::collision::resolve_player_collisions;
use crate::config::SimConfig;
use crate::enemy::{spawn_enemies, Enemy};
use crate::input::InputState;
use crate::player::Player;
use crate::weapon::{Ray, ShotOutcome, Weapon};

#[derive(Resource, Clone, Debug)]
pub struct Simulation {
    pub config: SimConfig,
    pub input: InputState,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub weapon: Weapon,
    pub arena: Arena,
    ticks: u64,
}

impl Simulation {
    /// Standard arena with randomly placed enemies.
    pub fn new(config: SimConfig, rng: &mut impl Rng) -> Self {
        let enemies = spawn_enemies(&config.enemy, rng);
        Self::with_enemies(config, enemies)
    }

    /// Standard arena with a caller-chosen enemy set.
    pub fn with_enemies(config: SimConfig, enemies: Vec<Enemy>) -> Self {
        let player = Player::new(Vec3::from(config.player.start_position));
        let weapon = Weapon::new(&config.weapon);
        info!(
            "Simulation ready: {} enemies, player at {:?}",
            enemies.len(),
            player.position
        );
        Self {
            config,
            input: InputState::default(),
            player,
            enemies,
            weapon,
            arena: Arena::standard(),
            ticks: 0,
        }
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one fixed step: look, move, collide, then every enemy chases.
    pub fn tick(&mut self) {
        let look = self.input.take_look_delta();
        if self.input.look_locked() {
            self.player
                .apply_look(look, self.config.player.mouse_sensitivity);
        }

        self.player.step(&self.input, &self.config.player);
        resolve_player_collisions(
            &mut self.player.position,
            &self.arena.walls,
            &self.config.collision,
        );

        let target = self.player.position;
        for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
            enemy.update(target);
        }

        self.ticks += 1;
    }

    /// The hitscan ray: from the eye through the screen center.
    pub fn camera_ray(&self) -> Ray {
        Ray::new(self.player.position, self.player.look_direction())
    }

    /// Pull the trigger at `now` seconds. Takes effect immediately, between ticks.
    pub fn fire(&mut self, now: f64) -> ShotOutcome {
        let ray = self.camera_ray();
        let outcome = self.weapon.shoot(now, ray, &mut self.enemies);
        if let ShotOutcome::Hit { enemy, killed: true, .. } = outcome {
            info!(
                "Enemy {:?} down, {} remaining",
                enemy,
                self.living_enemies().count()
            );
        }
        outcome
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_alive())
    }
}
