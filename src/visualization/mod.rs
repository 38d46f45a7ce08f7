//! Visualization module
//!
//! Star appearance mapping, the star field scene and the background nebula.

use bevy::prelude::*;

use crate::catalog::CatalogState;

pub mod appearance;
pub mod config;
pub mod nebula;
pub mod stars;

pub use config::StarfieldConfig;
pub use stars::Star;

/// Plugin for building and animating the star field
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StarfieldConfig>()
            .add_systems(OnEnter(CatalogState::Ready), stars::spawn_starfield)
            .add_systems(OnExit(CatalogState::Ready), stars::despawn_starfield)
            .add_systems(
                Update,
                nebula::rotate_nebula.run_if(in_state(CatalogState::Ready)),
            );
    }
}
