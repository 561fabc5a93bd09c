//! Arena simulation: the player, enemies, walls and the hitscan weapon.
//!
//! Everything here is renderer-agnostic game state stepped at a fixed rate.
//! The client crate owns windows, meshes and the cursor, and talks to the
//! simulation through the `Simulation` resource.

pub mod arena;
pub mod collision;
pub mod config;
pub mod enemy;
pub mod input;
pub mod player;
pub mod simulation;
pub mod weapon;

pub use arena::*;
pub use collision::*;
pub use config::*;
pub use enemy::*;
pub use input::*;
pub use player::*;
pub use simulation::*;
pub use weapon::*;

use bevy::prelude::*;

/// Simulation tick rate. Every per-tick speed is tuned for this rate.
pub const FIXED_TIMESTEP_HZ: f64 = 60.0;

/// Inserts the `Simulation` resource and steps it on `FixedUpdate`.
pub struct SimulationPlugin {
    pub config: SimConfig,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let simulation = Simulation::new(self.config.clone(), &mut rand::thread_rng());
        app.insert_resource(simulation)
            .insert_resource(Time::<Fixed>::from_hz(FIXED_TIMESTEP_HZ))
            .add_systems(FixedUpdate, tick_simulation);
    }
}

/// One simulation step per fixed tick.
pub fn tick_simulation(mut sim: ResMut<Simulation>) {
    sim.tick();
}
