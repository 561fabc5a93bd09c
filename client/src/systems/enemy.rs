//! Enemy visuals
//!
//! Simulation owns the enemies; these systems mirror their poses onto the
//! spawned boxes and remove the boxes of the dead.

use arena_sim::{EnemyId, Simulation};
use bevy::prelude::*;

use super::world::EnemyVisual;

/// Copy enemy poses from the simulation. Snaps rather than smooths so the
/// box on screen is exactly the box the ray is tested against.
pub fn sync_enemy_transforms(
    sim: Res<Simulation>,
    mut visuals: Query<(&EnemyId, &mut Transform), With<EnemyVisual>>,
) {
    for (id, mut transform) in visuals.iter_mut() {
        let Some(enemy) = sim.enemies.iter().find(|e| e.id == *id) else {
            continue;
        };
        transform.translation = enemy.position;
        transform.rotation = enemy.rotation();
    }
}

/// Remove visuals whose enemy is dead or gone
pub fn despawn_dead_enemies(
    mut commands: Commands,
    sim: Res<Simulation>,
    visuals: Query<(Entity, &EnemyId), With<EnemyVisual>>,
) {
    for (entity, id) in visuals.iter() {
        let alive = sim.enemies.iter().any(|e| e.id == *id && e.is_alive());
        if !alive {
            debug!("Removing visual for enemy {:?}", id);
            commands.entity(entity).despawn();
        }
    }
}
