//! UI state and overlay markers

use bevy::prelude::*;

/// Catalog index of the star under the cursor
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HoveredStar(pub Option<usize>);

/// "Loading star catalog..." banner
#[derive(Component)]
pub struct LoadingBanner;

/// Star count, source, notice and error lines
#[derive(Component)]
pub struct StatusText;

/// Camera mode and speed
#[derive(Component)]
pub struct TelemetryText;

/// Container of the hovered-star card
#[derive(Component)]
pub struct HoverCard;

#[derive(Component)]
pub struct HoverCardText;

#[derive(Component)]
pub struct ErrorText;
