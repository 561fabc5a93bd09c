//! Player input handling
//!
//! Keyboard and mouse events are staged into the simulation's input state and
//! consumed by the next fixed tick. The cursor grab doubles as the look lock.

use arena_sim::{Key, Simulation};
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

/// Physical key for each logical key.
pub fn key_binding(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::Forward),
        KeyCode::KeyS => Some(Key::Backward),
        KeyCode::KeyA => Some(Key::Left),
        KeyCode::KeyD => Some(Key::Right),
        KeyCode::Space => Some(Key::Jump),
        _ => None,
    }
}

/// Handle keyboard input for movement
pub fn handle_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim: ResMut<Simulation>,
) {
    for code in keyboard.get_just_pressed() {
        if let Some(key) = key_binding(*code) {
            sim.input.set_key(key, true);
        }
    }
    for code in keyboard.get_just_released() {
        if let Some(key) = key_binding(*code) {
            sim.input.set_key(key, false);
        }
    }
}

/// Accumulate mouse motion for the next tick. Dropped unless the look is locked.
pub fn handle_mouse_input(
    mut mouse_motion: MessageReader<MouseMotion>,
    mut sim: ResMut<Simulation>,
) {
    let mut delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        delta += motion.delta;
    }

    if delta != Vec2::ZERO {
        sim.input.add_look_delta(delta);
    }
}

/// Left click locks the cursor and enables mouse look. Every click re-applies
/// the grab, since the platform can drop it without telling us.
pub fn grab_cursor(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut sim: ResMut<Simulation>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window_entity) = windows.single() else {
        return;
    };

    if let Ok(mut cursor) = cursor_opts.get_mut(window_entity) {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
        if !sim.input.look_locked() {
            sim.input.set_look_locked(true);
            debug!("Cursor locked");
        }
    }
}

/// Whether a held look lock is no longer backed by the window.
pub fn lock_lost(focused: bool, grab_mode: CursorGrabMode) -> bool {
    !focused || grab_mode == CursorGrabMode::None
}

/// Drop the look lock when the window loses focus or the grab goes away.
/// Held keys go with it, since their key-up events went elsewhere.
pub fn sync_look_lock(
    mut windows: Query<(&Window, &mut CursorOptions), With<PrimaryWindow>>,
    mut sim: ResMut<Simulation>,
) {
    if !sim.input.look_locked() {
        return;
    }

    let Ok((window, mut cursor)) = windows.single_mut() else {
        return;
    };

    if lock_lost(window.focused, cursor.grab_mode) {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
        sim.input.set_look_locked(false);
        sim.input.clear_keys();
        debug!("Cursor lock lost");
    }
}

/// Escape gives the cursor back. Held keys are dropped so the player doesn't
/// keep walking with no key-up coming.
pub fn release_cursor(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim: ResMut<Simulation>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) || !sim.input.look_locked() {
        return;
    }

    if let Ok(window_entity) = windows.single() {
        if let Ok(mut cursor) = cursor_opts.get_mut(window_entity) {
            cursor.grab_mode = CursorGrabMode::None;
            cursor.visible = true;
        }
    }

    sim.input.set_look_locked(false);
    sim.input.clear_keys();
    debug!("Cursor released");
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_sim::SimConfig;

    fn locked_app(window: Window, grab_mode: CursorGrabMode) -> App {
        let mut app = App::new();
        let mut sim = Simulation::with_enemies(SimConfig::default(), Vec::new());
        sim.input.set_look_locked(true);
        sim.input.set_key(Key::Forward, true);
        app.insert_resource(sim);
        app.world_mut().spawn((
            window,
            CursorOptions {
                grab_mode,
                visible: false,
                ..default()
            },
            PrimaryWindow,
        ));
        app
    }

    fn primary_cursor(app: &mut App) -> CursorOptions {
        let world = app.world_mut();
        let mut query = world.query_filtered::<&CursorOptions, With<PrimaryWindow>>();
        query.single(world).cloned().unwrap()
    }

    #[test]
    fn wasd_and_space_are_bound() {
        assert_eq!(key_binding(KeyCode::KeyW), Some(Key::Forward));
        assert_eq!(key_binding(KeyCode::KeyS), Some(Key::Backward));
        assert_eq!(key_binding(KeyCode::KeyA), Some(Key::Left));
        assert_eq!(key_binding(KeyCode::KeyD), Some(Key::Right));
        assert_eq!(key_binding(KeyCode::Space), Some(Key::Jump));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(key_binding(KeyCode::KeyQ), None);
        assert_eq!(key_binding(KeyCode::Escape), None);
        assert_eq!(key_binding(KeyCode::ArrowUp), None);
    }

    #[test]
    fn lock_is_lost_without_focus_or_grab() {
        assert!(!lock_lost(true, CursorGrabMode::Locked));
        assert!(!lock_lost(true, CursorGrabMode::Confined));
        assert!(lock_lost(false, CursorGrabMode::Locked));
        assert!(lock_lost(true, CursorGrabMode::None));
    }

    #[test]
    fn losing_focus_clears_the_look_lock() {
        let window = Window {
            focused: false,
            ..default()
        };
        let mut app = locked_app(window, CursorGrabMode::Locked);
        app.add_systems(Update, sync_look_lock);
        app.update();

        let sim = app.world().resource::<Simulation>();
        assert!(!sim.input.look_locked());
        assert!(!sim.input.is_held(Key::Forward));
        let cursor = primary_cursor(&mut app);
        assert_eq!(cursor.grab_mode, CursorGrabMode::None);
        assert!(cursor.visible);
    }

    #[test]
    fn focused_grabbed_window_keeps_the_lock() {
        let mut app = locked_app(Window::default(), CursorGrabMode::Locked);
        app.add_systems(Update, sync_look_lock);
        app.update();

        let sim = app.world().resource::<Simulation>();
        assert!(sim.input.look_locked());
        assert!(sim.input.is_held(Key::Forward));
    }

    #[test]
    fn click_regrabs_even_with_a_stale_lock() {
        let mut app = locked_app(Window::default(), CursorGrabMode::None);
        let mut buttons = ButtonInput::<MouseButton>::default();
        buttons.press(MouseButton::Left);
        app.insert_resource(buttons);
        app.add_systems(Update, grab_cursor);
        app.update();

        let cursor = primary_cursor(&mut app);
        assert_eq!(cursor.grab_mode, CursorGrabMode::Locked);
        assert!(!cursor.visible);
        assert!(app.world().resource::<Simulation>().input.look_locked());
    }
}
