//! Enemies: direct pursuit of the player, health, and death.
//!
//! An enemy is either `Alive` or `Dead`. Death is terminal: a dead enemy
//! stops moving, ignores damage, and is skipped by hit detection.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

// =============================================================================
// CONSTANTS
// =============================================================================

pub const ENEMY_MAX_HEALTH: u32 = 100;

/// Distance covered per tick while chasing.
pub const ENEMY_SPEED: f32 = 0.03;

/// Hit box size (width, height, depth).
pub const ENEMY_SIZE: [f32; 3] = [1.0, 2.0, 1.0];

/// Y of the enemy box center; enemies never leave this height.
pub const ENEMY_SPAWN_HEIGHT: f32 = 1.0;

pub const ENEMY_COUNT: usize = 5;

/// Enemies spawn with X and Z in `[-ENEMY_SPAWN_HALF_EXTENT, ENEMY_SPAWN_HALF_EXTENT)`.
pub const ENEMY_SPAWN_HALF_EXTENT: f32 = 15.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub count: usize,
    pub max_health: u32,
    pub speed: f32,
    pub spawn_half_extent: f32,
    pub spawn_height: f32,
    pub size: [f32; 3],
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            count: ENEMY_COUNT,
            max_health: ENEMY_MAX_HEALTH,
            speed: ENEMY_SPEED,
            spawn_half_extent: ENEMY_SPAWN_HALF_EXTENT,
            spawn_height: ENEMY_SPAWN_HEIGHT,
            size: ENEMY_SIZE,
        }
    }
}

// =============================================================================
// ENEMY
// =============================================================================

/// Stable handle the renderer uses to pair visuals with enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Component)]
pub struct EnemyId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Alive,
    Dead,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    /// Center of the hit box.
    pub position: Vec3,
    /// Facing around Y; yaw 0 faces -Z.
    pub yaw: f32,
    pub speed: f32,
    pub size: Vec3,
    health: u32,
    state: EnemyState,
}

impl Enemy {
    pub fn new(id: EnemyId, position: Vec3, tuning: &EnemyTuning) -> Self {
        Self {
            id,
            position,
            yaw: 0.0,
            speed: tuning.speed,
            size: Vec3::from(tuning.size),
            health: tuning.max_health,
            state: if tuning.max_health > 0 {
                EnemyState::Alive
            } else {
                EnemyState::Dead
            },
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == EnemyState::Alive
    }

    /// Step toward the player and turn to face them. No-op once dead.
    ///
    /// The direction is normalized in 3D, so height difference eats into the
    /// horizontal step; Y itself never changes.
    pub fn update(&mut self, player_position: Vec3) {
        if !self.is_alive() {
            return;
        }

        let direction = (player_position - self.position).normalize_or_zero();
        self.position.x += direction.x * self.speed;
        self.position.z += direction.z * self.speed;

        self.face(player_position);
    }

    /// Apply damage. Returns `true` only on the hit that kills.
    pub fn damage(&mut self, amount: u32) -> bool {
        if !self.is_alive() {
            return false;
        }

        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.state = EnemyState::Dead;
            debug!("Enemy {:?} died at {:?}", self.id, self.position);
            return true;
        }
        false
    }

    /// Hit box orientation (yaw only).
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    fn face(&mut self, target: Vec3) {
        let to_target = target - self.position;
        if to_target.x.abs() > f32::EPSILON || to_target.z.abs() > f32::EPSILON {
            // forward(yaw) = (-sin yaw, 0, -cos yaw)
            self.yaw = (-to_target.x).atan2(-to_target.z);
        }
    }
}

/// Spawn `tuning.count` enemies at random X/Z inside the spawn square.
pub fn spawn_enemies(tuning: &EnemyTuning, rng: &mut impl Rng) -> Vec<Enemy> {
    let extent = tuning.spawn_half_extent;
    (0..tuning.count)
        .map(|i| {
            let (x, z) = if extent > 0.0 {
                (rng.gen_range(-extent..extent), rng.gen_range(-extent..extent))
            } else {
                (0.0, 0.0)
            };
            let position = Vec3::new(x, tuning.spawn_height, z);
            trace!("Spawned enemy {} at {:?}", i, position);
            Enemy::new(EnemyId(i as u32), position, tuning)
        })
        .collect()
}
