//! Crosshair UI
//!
//! Centered dot with four short lines. It marks the screen center, which is
//! where the hitscan ray goes. Dimmed while the cursor is free.

use arena_sim::Simulation;
use bevy::prelude::*;

const LOCKED_ALPHA: f32 = 0.85;
const UNLOCKED_ALPHA: f32 = 0.3;

/// Marker component for the crosshair UI
#[derive(Component)]
pub struct Crosshair;

/// Any crosshair piece whose color follows the look lock.
#[derive(Component)]
pub struct CrosshairPart;

/// Spawn the crosshair UI
pub fn spawn_crosshair(mut commands: Commands) {
    // Root container (full screen, centered)
    commands
        .spawn((
            Crosshair,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            // Ensure it doesn't block mouse input
            Pickable::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                CrosshairPart,
                Node {
                    width: Val::Px(4.0),
                    height: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(crosshair_color(false)),
                BorderRadius::all(Val::Px(2.0)),
            ));

            let vertical = Vec2::new(2.0, 8.0);
            let horizontal = Vec2::new(8.0, 2.0);
            let lines = [
                (vertical, UiRect { top: Val::Px(-14.0), ..UiRect::all(Val::Auto) }),
                (vertical, UiRect { bottom: Val::Px(-14.0), ..UiRect::all(Val::Auto) }),
                (horizontal, UiRect { left: Val::Px(-14.0), ..UiRect::all(Val::Auto) }),
                (horizontal, UiRect { right: Val::Px(-14.0), ..UiRect::all(Val::Auto) }),
            ];
            for (size, offset) in lines {
                parent.spawn((
                    CrosshairPart,
                    Node {
                        width: Val::Px(size.x),
                        height: Val::Px(size.y),
                        position_type: PositionType::Absolute,
                        top: offset.top,
                        bottom: offset.bottom,
                        left: offset.left,
                        right: offset.right,
                        ..default()
                    },
                    BackgroundColor(crosshair_color(false)),
                ));
            }
        });
}

fn crosshair_color(locked: bool) -> Color {
    let alpha = if locked { LOCKED_ALPHA } else { UNLOCKED_ALPHA };
    Color::srgba(1.0, 1.0, 1.0, alpha)
}

/// Brighten the crosshair while mouse look is engaged
pub fn update_crosshair(
    sim: Res<Simulation>,
    mut parts: Query<&mut BackgroundColor, With<CrosshairPart>>,
) {
    let color = crosshair_color(sim.input.look_locked());
    for mut bg in parts.iter_mut() {
        if bg.0 != color {
            bg.0 = color;
        }
    }
}
