//! World systems
//!
//! Spawning world visuals: lights, floor, walls and one box per enemy.

use arena_sim::{Simulation, Wall};
use bevy::light::CascadeShadowConfigBuilder;
use bevy::prelude::*;

// =============================================================================
// COMPONENTS
// =============================================================================

/// Root entity for all client-side world visuals
#[derive(Component)]
pub struct ClientWorldRoot;

/// Render adapter for an enemy; paired with the simulation through `EnemyId`.
#[derive(Component)]
pub struct EnemyVisual;

/// Transform for a wall's mesh. The mesh is built at the wall's full size.
pub fn wall_transform(wall: &Wall) -> Transform {
    Transform::from_translation(wall.position).with_rotation(wall.rotation())
}

// =============================================================================
// SPAWNING
// =============================================================================

/// Spawn the visual world
pub fn spawn_world(
    mut commands: Commands,
    world_roots: Query<Entity, With<ClientWorldRoot>>,
    sim: Res<Simulation>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !world_roots.is_empty() {
        return;
    }

    let root = commands
        // Parent of lights, floor, walls and enemies; needs spatial components for its children.
        .spawn((
            ClientWorldRoot,
            Transform::default(),
            GlobalTransform::default(),
            Visibility::default(),
            InheritedVisibility::default(),
        ))
        .id();

    // --- Lights ---
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        affects_lightmapped_meshes: true,
    });

    let sun = commands
        .spawn((
            DirectionalLight {
                illuminance: 8_000.0,
                shadows_enabled: true,
                ..default()
            },
            CascadeShadowConfigBuilder {
                num_cascades: 2,
                maximum_distance: 60.0,
                first_cascade_far_bound: 15.0,
                ..default()
            }
            .build(),
            Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        ))
        .id();
    commands.entity(root).add_child(sun);

    // --- Floor ---
    let floor_size = sim.arena.floor_size;
    let floor = commands
        .spawn((
            Mesh3d(meshes.add(Plane3d::default().mesh().size(floor_size, floor_size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.33, 0.42, 0.25),
                perceptual_roughness: 0.95,
                ..default()
            })),
            Transform::default(),
        ))
        .id();
    commands.entity(root).add_child(floor);

    // --- Walls ---
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.25, 0.18),
        perceptual_roughness: 0.9,
        ..default()
    });
    for wall in &sim.arena.walls {
        let wall_entity = commands
            .spawn((
                Mesh3d(meshes.add(Cuboid::from_size(wall.size))),
                MeshMaterial3d(wall_material.clone()),
                wall_transform(wall),
            ))
            .id();
        commands.entity(root).add_child(wall_entity);
    }

    // --- Enemies ---
    let enemy_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.85, 0.1, 0.1),
        perceptual_roughness: 0.7,
        ..default()
    });
    for enemy in sim.living_enemies() {
        let enemy_entity = commands
            .spawn((
                EnemyVisual,
                enemy.id,
                Mesh3d(meshes.add(Cuboid::from_size(enemy.size))),
                MeshMaterial3d(enemy_material.clone()),
                Transform::from_translation(enemy.position).with_rotation(enemy.rotation()),
            ))
            .id();
        commands.entity(root).add_child(enemy_entity);
    }

    info!(
        "Spawned world visuals: {} walls, {} enemies",
        sim.arena.walls.len(),
        sim.living_enemies().count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_sim::Arena;

    #[test]
    fn side_walls_render_turned_a_quarter() {
        let arena = Arena::standard();
        let east = &arena.walls[2];
        let transform = wall_transform(east);
        assert_eq!(transform.translation, east.position);
        // Local X (the wall's length) now runs along world Z.
        let length_axis = transform.rotation * Vec3::X;
        assert!(length_axis.x.abs() < 1e-5);
        assert!((length_axis.z.abs() - 1.0).abs() < 1e-5);
    }
}
