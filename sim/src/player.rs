//! Player kinematics: mouse look, walking, jumping and gravity.
//!
//! All speeds are per-tick increments. The tick runs at `FIXED_TIMESTEP_HZ`,
//! so nothing here is scaled by a delta time.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use crate::input::{InputState, Key};

/// Horizontal distance covered per tick for each held direction key.
pub const PLAYER_SPEED: f32 = 0.15;

/// Upward velocity applied on jump (units per tick).
pub const JUMP_FORCE: f32 = 0.3;

/// Downward acceleration (units per tick, per tick).
pub const GRAVITY: f32 = 0.01;

/// Camera height above the floor plane; the player never sinks below it.
pub const EYE_HEIGHT: f32 = 1.6;

/// Radians of look per pixel of mouse movement.
pub const MOUSE_SENSITIVITY: f32 = 0.002;

/// Where the session starts.
pub const START_POSITION: [f32; 3] = [0.0, EYE_HEIGHT, 5.0];

/// Tunable player constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub move_speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    pub eye_height: f32,
    pub mouse_sensitivity: f32,
    /// Scale diagonal movement down to `move_speed`. Off by default, which
    /// makes two held keys move ~1.41x faster than one.
    pub normalize_diagonal: bool,
    pub start_position: [f32; 3],
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: PLAYER_SPEED,
            jump_force: JUMP_FORCE,
            gravity: GRAVITY,
            eye_height: EYE_HEIGHT,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            normalize_diagonal: false,
            start_position: START_POSITION,
        }
    }
}

/// The player is the camera: position is eye position, orientation is look.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub velocity_y: f32,
    pub grounded: bool,
}

impl Player {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            velocity_y: 0.0,
            grounded: true,
        }
    }

    /// Look orientation (roll is always zero).
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Unit vector the camera looks along, pitch included.
    pub fn look_direction(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Apply a mouse delta (pixels) to yaw/pitch. Pitch stops at straight up/down.
    pub fn apply_look(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw -= delta.x * sensitivity;
        self.pitch -= delta.y * sensitivity;
        self.pitch = self.pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Advance one tick: walk, jump, fall, land.
    pub fn step(&mut self, input: &InputState, tuning: &PlayerTuning) {
        // --- Walk ---
        // Camera axes, pitch included. Gravity and the floor snap own y.
        let rotation = self.rotation();
        let forward = rotation * Vec3::NEG_Z;
        let right = rotation * Vec3::X;

        let mut step = Vec3::ZERO;
        if input.is_held(Key::Forward) {
            step += forward;
        }
        if input.is_held(Key::Backward) {
            step -= forward;
        }
        if input.is_held(Key::Right) {
            step += right;
        }
        if input.is_held(Key::Left) {
            step -= right;
        }
        if tuning.normalize_diagonal {
            step = step.normalize_or_zero();
        }
        self.position += step * tuning.move_speed;

        // --- Jump ---
        if input.is_held(Key::Jump) && self.grounded {
            self.velocity_y = tuning.jump_force;
            self.grounded = false;
        }

        // --- Gravity ---
        self.velocity_y -= tuning.gravity;
        self.position.y += self.velocity_y;

        // --- Floor ---
        if self.position.y <= tuning.eye_height {
            self.position.y = tuning.eye_height;
            self.velocity_y = 0.0;
            self.grounded = true;
        }
    }
}
