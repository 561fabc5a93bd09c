//! First-person camera
//!
//! The player is the camera: it sits at the simulated eye position and looks
//! along the simulated yaw/pitch. No smoothing, so the crosshair always sits
//! exactly on the hitscan ray.

use arena_sim::{Player, Simulation};
use bevy::prelude::*;

/// Vertical field of view.
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Marker for the first-person camera
#[derive(Component)]
pub struct PlayerCamera;

/// Camera transform for a player pose.
pub fn camera_pose(player: &Player) -> Transform {
    Transform::from_translation(player.position).with_rotation(player.rotation())
}

/// Projection used by the player camera.
pub fn camera_projection() -> Projection {
    Projection::from(PerspectiveProjection {
        fov: CAMERA_FOV_DEGREES.to_radians(),
        near: CAMERA_NEAR,
        far: CAMERA_FAR,
        ..default()
    })
}

/// Snap the camera onto the player
pub fn update_camera(
    sim: Res<Simulation>,
    mut camera_query: Query<&mut Transform, With<PlayerCamera>>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    *camera_transform = camera_pose(&sim.player);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_forward_matches_the_hitscan_direction() {
        let mut player = Player::new(Vec3::new(1.0, 1.6, 2.0));
        player.yaw = 0.7;
        player.pitch = -0.3;

        let pose = camera_pose(&player);
        assert_eq!(pose.translation, player.position);
        assert!((pose.forward().as_vec3() - player.look_direction()).length() < 1e-5);
    }

    #[test]
    fn projection_uses_a_75_degree_fov() {
        let Projection::Perspective(persp) = camera_projection() else {
            panic!("expected a perspective projection");
        };
        assert!((persp.fov - 75.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(persp.near, 0.1);
        assert_eq!(persp.far, 1000.0);
    }
}
