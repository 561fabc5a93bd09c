//! Static arena geometry.
//!
//! Walls are plain records (size + transform). Rendering builds its own meshes
//! from them; collision only ever reads their bounds.

use bevy::prelude::*;

use crate::collision::Aabb;

/// Default wall dimensions (width, height, depth).
pub const WALL_SIZE: [f32; 3] = [20.0, 5.0, 0.5];

/// Side length of the square floor.
pub const FLOOR_SIZE: f32 = 100.0;

/// An immovable box obstacle rotated about Y.
#[derive(Clone, Debug, PartialEq)]
pub struct Wall {
    /// Width (local X), height (Y), depth (local Z).
    pub size: Vec3,
    /// Center of the box.
    pub position: Vec3,
    pub yaw: f32,
}

impl Wall {
    pub fn new(size: Vec3, position: Vec3, yaw: f32) -> Self {
        Self { size, position, yaw }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// World-space bounds of the rotated box.
    pub fn bounds(&self) -> Aabb {
        let half = self.size * 0.5;
        let (sin, cos) = self.yaw.sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let extent = Vec3::new(
            cos * half.x + sin * half.z,
            half.y,
            sin * half.x + cos * half.z,
        );
        Aabb {
            min: self.position - extent,
            max: self.position + extent,
        }
    }
}

/// Everything static the player can bump into.
#[derive(Clone, Debug, PartialEq)]
pub struct Arena {
    pub walls: Vec<Wall>,
    pub floor_size: f32,
}

impl Arena {
    /// The stock layout: four walls boxing in a 20x20 yard around the origin.
    pub fn standard() -> Self {
        let size = Vec3::from(WALL_SIZE);
        let y = size.y * 0.5;
        let quarter = std::f32::consts::FRAC_PI_2;

        Self {
            walls: vec![
                Wall::new(size, Vec3::new(0.0, y, -10.0), 0.0),
                Wall::new(size, Vec3::new(-10.0, y, 0.0), quarter),
                Wall::new(size, Vec3::new(10.0, y, 0.0), quarter),
                Wall::new(size, Vec3::new(0.0, y, 10.0), 0.0),
            ],
            floor_size: FLOOR_SIZE,
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::standard()
    }
}
