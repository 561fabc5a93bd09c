//! Player vs wall collision and arena bounds.
//!
//! Resolution is deliberately soft: an overlapping wall nudges the player a
//! fixed step away from its center each tick instead of separating them
//! exactly. Deep overlaps clear over several ticks.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::arena::Wall;

/// Horizontal half-width of the player's collision box.
pub const PLAYER_RADIUS: f32 = 0.5;

/// Full height of the player's collision box (centered on the eye).
pub const PLAYER_BOX_HEIGHT: f32 = 3.2;

/// Distance the player is nudged per overlapping wall per tick.
pub const PUSH_STEP: f32 = 0.1;

/// Player X/Z are clamped to `[-MAP_HALF_SIZE, MAP_HALF_SIZE]`.
pub const MAP_HALF_SIZE: f32 = 50.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTuning {
    pub player_radius: f32,
    pub player_height: f32,
    pub push_step: f32,
    pub map_half_size: f32,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            player_radius: PLAYER_RADIUS,
            player_height: PLAYER_BOX_HEIGHT,
            push_step: PUSH_STEP,
            map_half_size: MAP_HALF_SIZE,
        }
    }
}

/// World-space axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Touching faces count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}

/// Collision box around a player eye position.
pub fn player_bounds(position: Vec3, tuning: &CollisionTuning) -> Aabb {
    let size = Vec3::new(
        tuning.player_radius * 2.0,
        tuning.player_height,
        tuning.player_radius * 2.0,
    );
    Aabb::from_center_size(position, size)
}

/// Nudge `position` away from every wall it overlaps. Returns how many walls
/// pushed.
///
/// The push runs on the floor plane (away from the wall center's X/Z) so wall
/// contact never drives the eye below the floor clamp applied by the player
/// controller.
pub fn push_out_of_walls(
    position: &mut Vec3,
    walls: &[Wall],
    tuning: &CollisionTuning,
) -> usize {
    let mut pushes = 0;

    for wall in walls {
        let wall_box = wall.bounds();
        if !player_bounds(*position, tuning).intersects(&wall_box) {
            continue;
        }

        let away = *position - wall_box.center();
        let push = Vec3::new(away.x, 0.0, away.z).normalize_or_zero();
        *position += push * tuning.push_step;
        pushes += 1;
    }

    pushes
}

/// Keep X/Z inside the arena square.
pub fn clamp_to_arena(position: &mut Vec3, half_size: f32) {
    position.x = position.x.clamp(-half_size, half_size);
    position.z = position.z.clamp(-half_size, half_size);
}

/// Full collision pass for one tick: walls first, then the arena clamp.
pub fn resolve_player_collisions(position: &mut Vec3, walls: &[Wall], tuning: &CollisionTuning) {
    let pushes = push_out_of_walls(position, walls, tuning);
    if pushes > 0 {
        trace!("Player pushed by {} wall(s), now at {:?}", pushes, position);
    }
    clamp_to_arena(position, tuning.map_half_size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn aabb_intersection_is_inclusive() {
        let a = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let touching = Aabb::from_center_size(Vec3::new(2.0, 0.0, 0.0), Vec3::splat(2.0));
        let apart = Aabb::from_center_size(Vec3::new(2.5, 0.0, 0.0), Vec3::splat(2.0));
        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn player_far_from_walls_is_untouched() {
        let arena = Arena::standard();
        let tuning = CollisionTuning::default();
        let mut pos = Vec3::new(0.0, 1.6, 0.0);
        assert_eq!(push_out_of_walls(&mut pos, &arena.walls, &tuning), 0);
        assert_eq!(pos, Vec3::new(0.0, 1.6, 0.0));
    }

    #[test]
    fn overlapping_wall_pushes_away_from_its_center() {
        // North wall spans x in [-10, 10] at z = -10.
        let wall = Wall::new(Vec3::new(20.0, 5.0, 0.5), Vec3::new(0.0, 2.5, -10.0), 0.0);
        let tuning = CollisionTuning::default();
        let mut pos = Vec3::new(0.0, 1.6, -9.6);

        let pushes = push_out_of_walls(&mut pos, std::slice::from_ref(&wall), &tuning);
        assert_eq!(pushes, 1);
        assert!((pos.z - (-9.5)).abs() < 1e-5);
        assert_eq!(pos.y, 1.6);
    }

    #[test]
    fn deep_overlap_clears_over_several_ticks() {
        let wall = Wall::new(Vec3::new(20.0, 5.0, 0.5), Vec3::new(0.0, 2.5, -10.0), 0.0);
        let tuning = CollisionTuning::default();
        let mut pos = Vec3::new(0.0, 1.6, -9.9);
        let walls = std::slice::from_ref(&wall);

        let mut ticks = 0;
        while push_out_of_walls(&mut pos, walls, &tuning) > 0 {
            ticks += 1;
            assert!(ticks < 20);
        }
        assert!(ticks > 1);
        assert!(!player_bounds(pos, &tuning).intersects(&wall.bounds()));
    }

    #[test]
    fn rotated_wall_blocks_along_its_rotated_extent() {
        // East wall: 20 long, rotated a quarter turn, so it spans z in [-10, 10].
        let wall = Wall::new(Vec3::new(20.0, 5.0, 0.5), Vec3::new(10.0, 2.5, 0.0), FRAC_PI_2);
        let tuning = CollisionTuning::default();

        let mut near_end = Vec3::new(9.6, 1.6, 8.0);
        assert_eq!(push_out_of_walls(&mut near_end, std::slice::from_ref(&wall), &tuning), 1);
        assert!(near_end.x < 9.6);

        let mut beside = Vec3::new(5.0, 1.6, 8.0);
        assert_eq!(push_out_of_walls(&mut beside, std::slice::from_ref(&wall), &tuning), 0);
    }

    #[test]
    fn arena_clamp_bounds_x_and_z_only() {
        let mut pos = Vec3::new(75.0, 9.0, -120.0);
        clamp_to_arena(&mut pos, MAP_HALF_SIZE);
        assert_eq!(pos, Vec3::new(50.0, 9.0, -50.0));
    }

    #[test]
    fn resolved_position_is_always_inside_the_map() {
        let arena = Arena::standard();
        let tuning = CollisionTuning::default();
        for (x, z) in [(60.0, 0.0), (-51.0, 49.0), (10.0, 10.2), (0.0, -300.0)] {
            let mut pos = Vec3::new(x, 1.6, z);
            resolve_player_collisions(&mut pos, &arena.walls, &tuning);
            assert!(pos.x.abs() <= MAP_HALF_SIZE);
            assert!(pos.z.abs() <= MAP_HALF_SIZE);
        }
    }
}
