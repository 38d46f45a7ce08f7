//! Camera control module
//!
//! A dual-mode camera: mouse drag and wheel steer a smoothed orbit around the origin, and the
//! movement keys fly the camera freely with eased velocity.

use bevy::prelude::*;

use crate::catalog::CatalogState;

pub mod state;
pub mod systems;

pub use state::{CameraMode, ControlState, MainCamera};

/// Plugin for camera setup, input accumulation and per-frame camera motion
pub struct CameraControlPlugin;

impl Plugin for CameraControlPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlState>()
            .add_systems(Startup, systems::setup_camera)
            .add_systems(OnExit(CatalogState::Ready), systems::reset_input)
            // Held input is tracked in every state so releases during a reload are seen
            .add_systems(
                Update,
                (
                    (systems::track_keys, systems::mouse_drag),
                    (
                        systems::mouse_wheel.run_if(in_state(CatalogState::Ready)),
                        systems::advance_camera.run_if(in_state(CatalogState::Ready)),
                    )
                        .chain(),
                )
                    .chain(),
            )
            .add_systems(Update, systems::log_window_resize);
    }
}
