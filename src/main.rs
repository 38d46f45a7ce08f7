use bevy::picking::prelude::*;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod camera;
mod catalog;
mod core;
mod ui;
mod visualization;

use camera::CameraControlPlugin;
use catalog::CatalogPlugin;
use ui::UiPlugin;
use visualization::VisualizationPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Star Catalog Explorer".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    // Hover uses mesh picking against the star spheres
    app.add_plugins(MeshPickingPlugin);

    app.add_plugins(CatalogPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_plugins(CameraControlPlugin);
    app.add_plugins(UiPlugin);

    app.run();
}
