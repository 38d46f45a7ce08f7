//! User interface module
//!
//! Screen-space overlay built from `bevy_ui` nodes plus hover tracking of stars.

use bevy::prelude::*;

use crate::catalog::CatalogState;

pub mod hover;
pub mod overlay;
pub mod state;

pub use state::HoveredStar;

/// Plugin for the overlay and hover detail card
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoveredStar>()
            .add_systems(Startup, overlay::setup_overlay)
            .add_systems(OnExit(CatalogState::Ready), hover::reset_hover)
            .add_systems(
                Update,
                (
                    hover::update_hovered_star.run_if(in_state(CatalogState::Ready)),
                    overlay::update_status_overlay,
                    overlay::update_telemetry_overlay,
                    overlay::update_hover_card.after(hover::update_hovered_star),
                ),
            );
    }
}
