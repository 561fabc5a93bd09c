//! Client-side weapon systems
//!
//! Turns clicks into shots against the simulation and plays the cosmetic
//! feedback: the gun model's recoil kick and a short-lived marker at the hit
//! point. None of this feeds back into simulation state.

use arena_sim::{ShotOutcome, Simulation};
use bevy::prelude::*;

/// Gun model box dimensions (width, height, length).
pub const GUN_SIZE: Vec3 = Vec3::new(0.1, 0.1, 0.3);

/// Local offset of the gun model from the camera.
pub const GUN_REST_OFFSET: Vec3 = Vec3::new(0.3, -0.2, -0.5);

/// How far the gun slides back toward the camera on a shot.
pub const RECOIL_KICK: f32 = 0.1;

/// Seconds before the gun returns to rest.
pub const RECOIL_DURATION: f32 = 0.05;

/// Seconds a hit marker stays visible.
pub const HIT_MARKER_LIFETIME: f32 = 0.1;

const HIT_MARKER_RADIUS: f32 = 0.1;

/// Cached weapon-related render assets (avoid per-shot allocations).
#[derive(Resource)]
pub struct WeaponVisualAssets {
    pub gun_mesh: Handle<Mesh>,
    pub gun_material: Handle<StandardMaterial>,
    pub hit_marker_mesh: Handle<Mesh>,
    pub hit_marker_material: Handle<StandardMaterial>,
}

/// Gun model recoil state. Lives on the gun entity parented to the camera.
#[derive(Component)]
pub struct WeaponRecoil {
    pub rest: Vec3,
    pub kicked_at: Option<f32>,
}

impl WeaponRecoil {
    pub fn new(rest: Vec3) -> Self {
        Self {
            rest,
            kicked_at: None,
        }
    }

    pub fn kick(&mut self, now: f32) {
        self.kicked_at = Some(now);
    }

    /// Local translation at `now`. Clears the kick once it has run its course.
    pub fn settle(&mut self, now: f32) -> Vec3 {
        match self.kicked_at {
            Some(at) if now - at < RECOIL_DURATION => self.rest + Vec3::Z * RECOIL_KICK,
            Some(_) => {
                self.kicked_at = None;
                self.rest
            }
            None => self.rest,
        }
    }
}

/// Component for hit markers
#[derive(Component)]
pub struct HitMarker {
    pub spawn_time: f32,
    pub lifetime: f32,
}

impl HitMarker {
    pub fn expired(&self, now: f32) -> bool {
        now - self.spawn_time >= self.lifetime
    }
}

/// Fire on left click. The shot resolves right away rather than waiting
/// for the next tick.
pub fn handle_shoot_input(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    mut sim: ResMut<Simulation>,
    visuals: Option<Res<WeaponVisualAssets>>,
    mut gun: Query<&mut WeaponRecoil>,
    time: Res<Time>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    let outcome = sim.fire(time.elapsed_secs_f64());
    let now = time.elapsed_secs();
    if !outcome.fired() {
        return;
    }

    for mut recoil in gun.iter_mut() {
        recoil.kick(now);
    }

    let ShotOutcome::Hit { point, .. } = outcome else {
        return;
    };

    let Some(visuals) = visuals else {
        return;
    };

    commands.spawn((
        HitMarker {
            spawn_time: now,
            lifetime: HIT_MARKER_LIFETIME,
        },
        Mesh3d(visuals.hit_marker_mesh.clone()),
        MeshMaterial3d(visuals.hit_marker_material.clone()),
        Transform::from_translation(point),
    ));
}

/// Slide the gun back to rest after a kick
pub fn update_recoil(mut gun: Query<(&mut WeaponRecoil, &mut Transform)>, time: Res<Time>) {
    let now = time.elapsed_secs();
    for (mut recoil, mut transform) in gun.iter_mut() {
        let target = recoil.settle(now);
        if transform.translation != target {
            transform.translation = target;
        }
    }
}

/// Update and cleanup hit markers
pub fn update_hit_markers(
    mut commands: Commands,
    markers: Query<(Entity, &HitMarker)>,
    time: Res<Time>,
) {
    let now = time.elapsed_secs();
    for (entity, marker) in markers.iter() {
        if marker.expired(now) {
            commands.entity(entity).despawn();
        }
    }
}

// =============================================================================
// WEAPON VISUAL ASSET SETUP
// =============================================================================

/// Create shared meshes/materials for weapon visuals.
pub fn setup_weapon_visual_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Stubby box gun
    let gun_mesh = meshes.add(Cuboid::from_size(GUN_SIZE));
    let gun_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.2, 0.22),
        metallic: 0.6,
        perceptual_roughness: 0.4,
        ..default()
    });

    let hit_marker_mesh = meshes.add(Sphere::new(HIT_MARKER_RADIUS));
    let hit_marker_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.0, 0.0),
        emissive: LinearRgba::new(2.0, 0.0, 0.0, 1.0),
        unlit: true,
        ..default()
    });

    commands.insert_resource(WeaponVisualAssets {
        gun_mesh,
        gun_material,
        hit_marker_mesh,
        hit_marker_material,
    });
}
