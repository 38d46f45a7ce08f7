//! Star catalog module
//!
//! Loads the star catalog from a JSON file on a background worker thread and falls back to a
//! generated catalog when the file is missing or unusable.

use bevy::prelude::*;

pub mod fallback;
pub mod loader;
pub mod parser;
pub mod provider;
pub mod systems;
pub mod types;

pub use provider::CatalogSettings;
pub use types::{CatalogState, CatalogStatus, StarCatalog, StarRecord};

/// Plugin for catalog loading and the loading state machine
pub struct CatalogPlugin;

impl Plugin for CatalogPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<CatalogState>()
            .init_resource::<CatalogSettings>()
            .init_resource::<CatalogStatus>()
            .add_systems(Startup, systems::setup_catalog_worker)
            .add_systems(
                Update,
                (
                    systems::process_catalog_results_system
                        .run_if(in_state(CatalogState::Loading)),
                    systems::reload_catalog_on_key.run_if(in_state(CatalogState::Ready)),
                ),
            );
    }
}
