//! Camera input and frame-advance systems

use bevy::input::mouse::{AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::camera::state::{
    CameraBasis, CameraMotion, ControlState, INITIAL_ZOOM, MainCamera, PIXELS_PER_LINE,
    orbit_position,
};

/// Spawn the main 3D camera at its initial orbit position
pub fn setup_camera(mut commands: Commands) {
    let start = orbit_position(Vec2::ZERO, INITIAL_ZOOM);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 10_000.0,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        MainCamera,
        Transform::from_translation(start).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Main Camera"),
    ));
}

/// Mirror the currently pressed keys into the control state.
///
/// Rebuilt from the full pressed set every frame so releases missed while the scene was not
/// `Ready` cannot leave a key stuck.
pub fn track_keys(keys: Res<ButtonInput<KeyCode>>, mut state: ResMut<ControlState>) {
    state.sync_keys(keys.get_pressed().copied());
}

/// Left-button drag rotates the orbit target
pub fn mouse_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut state: ResMut<ControlState>,
) {
    if !buttons.pressed(MouseButton::Left) {
        if state.mouse_down {
            state.end_drag();
        }
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    if buttons.just_pressed(MouseButton::Left) {
        state.begin_drag(cursor);
    } else if state.mouse_down {
        state.drag_to(cursor);
    }
}

/// The scene is going away; nothing held before the reload survives it.
pub fn reset_input(mut state: ResMut<ControlState>) {
    state.release_all();
}

/// Wheel zoom; bevy reports scroll-up as positive, which zooms in.
pub fn mouse_wheel(scroll: Res<AccumulatedMouseScroll>, mut state: ResMut<ControlState>) {
    if scroll.delta.y == 0.0 {
        return;
    }
    let delta_px = match scroll.unit {
        MouseScrollUnit::Line => -scroll.delta.y * PIXELS_PER_LINE,
        MouseScrollUnit::Pixel => -scroll.delta.y,
    };
    state.zoom_by(delta_px);
}

/// Advance the camera one frame in orbit or flight
pub fn advance_camera(
    mut state: ResMut<ControlState>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };
    match state.step(CameraBasis::from_transform(&transform)) {
        CameraMotion::Fly(velocity) => transform.translation += velocity,
        CameraMotion::Orbit(position) => {
            *transform = Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y);
        }
        CameraMotion::Hold => {}
    }
}

/// Bevy updates the projection aspect itself; just note the new size.
pub fn log_window_resize(mut resized: MessageReader<WindowResized>) {
    for event in resized.read() {
        debug!("[CAMERA] window resized to {}x{}", event.width, event.height);
    }
}
