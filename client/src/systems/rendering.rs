//! Rendering systems
//!
//! Camera setup plus the first-person gun model hanging off it.

use arena_sim::Simulation;
use bevy::prelude::*;

use crate::camera::{camera_pose, camera_projection, PlayerCamera};
use crate::weapons::{WeaponRecoil, WeaponVisualAssets, GUN_REST_OFFSET};

/// Sky-blue background.
const SKY_COLOR: Color = Color::srgb(0.53, 0.81, 0.92);

// =============================================================================
// SETUP
// =============================================================================

/// One-time rendering setup.
pub fn setup_rendering(
    mut commands: Commands,
    sim: Res<Simulation>,
    weapon_visuals: Option<Res<WeaponVisualAssets>>,
) {
    commands.insert_resource(ClearColor(SKY_COLOR));

    let camera = commands
        .spawn((
            PlayerCamera,
            Camera3d::default(),
            camera_projection(),
            camera_pose(&sim.player),
            // Explicit spatial + visibility components (camera is parent of the gun model).
            GlobalTransform::default(),
            Visibility::default(),
            InheritedVisibility::default(),
        ))
        .id();

    let Some(visuals) = weapon_visuals else {
        warn!("Weapon visuals missing; gun model not spawned");
        return;
    };

    let gun = commands
        .spawn((
            WeaponRecoil::new(GUN_REST_OFFSET),
            Mesh3d(visuals.gun_mesh.clone()),
            MeshMaterial3d(visuals.gun_material.clone()),
            Transform::from_translation(GUN_REST_OFFSET),
        ))
        .id();
    commands.entity(camera).add_child(gun);

    info!("Client rendering initialized");
}
