//! Arena client - renders the simulation and feeds it player input
//!
//! Builds natively and for the browser (wasm32, WebGL2).

mod camera;
mod crosshair;
mod input;
mod systems;
mod weapons;

use arena_sim::{SimConfig, SimulationPlugin};
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::window::WindowResolution;

/// Config baked into the binary; the only source on wasm.
const BUNDLED_CONFIG: &str = include_str!("../../assets/arena.ron");

/// Environment variable naming a RON config file (native only).
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_ENV: &str = "ARENA_CONFIG";

/// Resolve the simulation config: `ARENA_CONFIG` file, then the bundled
/// file, then built-in defaults.
fn load_config() -> SimConfig {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            match SimConfig::load_from_file(&path) {
                Ok(config) => {
                    info!("Loaded config from {}", path);
                    return config;
                }
                Err(err) => warn!("{}; falling back to bundled config", err),
            }
        }
    }

    SimConfig::from_ron_str(BUNDLED_CONFIG).unwrap_or_else(|err| {
        warn!("Bundled config rejected ({}); using defaults", err);
        SimConfig::default()
    })
}

fn main() {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Arena".to_string(),
                    resolution: WindowResolution::new(1280, 720),
                    // Browser: fill the page's canvas container
                    fit_canvas_to_parent: true,
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: "info,wgpu=error,naga=warn".to_string(),
                level: Level::INFO,
                ..default()
            }),
    );

    // Runs after LogPlugin so config warnings are visible.
    let config = load_config();
    debug!("Effective config: {:?}", config);

    // Simulation resource + fixed 60Hz tick
    app.add_plugins(SimulationPlugin { config });

    // Setup systems (run once at startup). Chained so the weapon assets exist
    // before the camera spawns the gun model.
    app.add_systems(
        Startup,
        (
            weapons::setup_weapon_visual_assets,
            systems::setup_rendering,
            systems::spawn_world,
            crosshair::spawn_crosshair,
        )
            .chain(),
    );

    // Input first, then shots, then mirror simulation state to the scene.
    app.add_systems(
        Update,
        (
            input::handle_keyboard_input,
            input::handle_mouse_input,
            input::sync_look_lock,
            input::grab_cursor,
            input::release_cursor,
            weapons::handle_shoot_input,
            (
                systems::sync_enemy_transforms,
                systems::despawn_dead_enemies,
                camera::update_camera,
            )
                .chain(),
            weapons::update_recoil,
            weapons::update_hit_markers,
            crosshair::update_crosshair,
        )
            .chain(),
    );

    info!("Starting arena client");
    app.run();
}
