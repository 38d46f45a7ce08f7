//! Screen-space overlay: loading banner, catalog status, flight telemetry, hovered-star card,
//! spectral legend and a controls hint.

use bevy::prelude::*;
use bevy_feathers::palette;

use crate::camera::{CameraMode, ControlState};
use crate::catalog::types::SPECTRAL_CLASSES;
use crate::catalog::{CatalogStatus, StarCatalog, StarRecord};
use crate::ui::state::{
    ErrorText, HoverCard, HoverCardText, HoveredStar, LoadingBanner, StatusText, TelemetryText,
};
use crate::visualization::appearance::tint_from_spectral;

const PANEL_BG: Color = Color::srgba(0.04, 0.08, 0.12, 0.75);
const ERROR_COLOR: Color = Color::srgb(1.0, 0.45, 0.45);
const MARGIN: Val = Val::Px(12.0);

pub const CONTROLS_HELP: &str =
    "Drag: orbit | Wheel: zoom | WASD/Arrows: fly | E/Q: up/down | Shift: boost | F5: reload";

fn panel(position: Node) -> (Node, BackgroundColor) {
    (
        Node {
            position_type: PositionType::Absolute,
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..position
        },
        BackgroundColor(PANEL_BG),
    )
}

fn label(text: impl Into<String>, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont::from_font_size(size),
        TextColor(color),
    )
}

pub fn setup_overlay(mut commands: Commands) {
    // Loading banner, centered
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Percent(45.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            LoadingBanner,
        ))
        .with_children(|parent| {
            parent.spawn(label("Loading star catalog...", 24.0, palette::LIGHT_GRAY_1));
        });

    // Status and telemetry, top left
    commands
        .spawn(panel(Node {
            top: MARGIN,
            left: MARGIN,
            ..default()
        }))
        .with_children(|parent| {
            parent.spawn((label("", 14.0, palette::LIGHT_GRAY_1), StatusText));
            parent.spawn((label("", 14.0, ERROR_COLOR), ErrorText));
            parent.spawn((label("", 14.0, palette::ACCENT), TelemetryText));
        });

    // Hovered star, top right
    commands
        .spawn((
            panel(Node {
                top: MARGIN,
                right: MARGIN,
                min_width: Val::Px(180.0),
                ..default()
            }),
            Visibility::Hidden,
            HoverCard,
        ))
        .with_children(|parent| {
            parent.spawn((label("", 14.0, palette::LIGHT_GRAY_1), HoverCardText));
        });

    // Spectral legend, bottom left
    commands
        .spawn(panel(Node {
            bottom: MARGIN,
            left: MARGIN,
            ..default()
        }))
        .with_children(|parent| {
            parent.spawn(label("Spectral class", 13.0, palette::LIGHT_GRAY_1));
            for class in SPECTRAL_CLASSES {
                let tint = tint_from_spectral(&class.to_string());
                let [r, g, b] = tint.rgb();
                parent
                    .spawn(Node {
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(6.0),
                        ..default()
                    })
                    .with_children(|row| {
                        row.spawn((
                            Node {
                                width: Val::Px(10.0),
                                height: Val::Px(10.0),
                                ..default()
                            },
                            BackgroundColor(Color::srgb(r, g, b)),
                        ));
                        row.spawn(label(
                            format!("{}  {}", class, tint.label()),
                            12.0,
                            palette::LIGHT_GRAY_2,
                        ));
                    });
            }
        });

    // Controls hint, bottom right
    commands
        .spawn(panel(Node {
            bottom: MARGIN,
            right: MARGIN,
            ..default()
        }))
        .with_children(|parent| {
            parent.spawn(label(CONTROLS_HELP, 12.0, palette::LIGHT_GRAY_2));
        });
}

/// Status lines for the top-left panel
pub fn status_text(status: &CatalogStatus) -> String {
    if status.loading {
        return "Loading...".to_string();
    }
    let mut lines = vec![format!("Stars: {}", status.star_count)];
    if let Some(source) = &status.source {
        lines.push(format!("Source: {}", source));
    }
    if let Some(notice) = &status.notice {
        lines.push(notice.clone());
    }
    lines.join("\n")
}

pub fn telemetry_text(mode: CameraMode, speed: f32) -> String {
    format!("Mode: {} | Speed: {:.2}", mode.label(), speed)
}

/// Detail lines for a hovered star; unknown fields are omitted.
pub fn star_details(record: &StarRecord) -> String {
    let mut lines = vec![record.display_name()];
    if let Some(ra) = record.ra {
        lines.push(format!("RA: {:.2}h", ra));
    }
    if let Some(dec) = record.dec {
        lines.push(format!("Dec: {:.2}°", dec));
    }
    if let Some(mag) = record.mag {
        lines.push(format!("Magnitude: {:.2}", mag));
    }
    if let Some(bv) = record.bv {
        lines.push(format!("B-V: {:.2}", bv));
    }
    if let Some(spectral) = record.spectral.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Spectral: {}", spectral));
    }
    if let Some(dist) = record.dist {
        lines.push(format!("Distance: {:.1} pc", dist));
    }
    lines.join("\n")
}

fn set_text(text: &mut Mut<Text>, value: String) {
    if text.0 != value {
        text.0 = value;
    }
}

pub fn update_status_overlay(
    status: Res<CatalogStatus>,
    mut banners: Query<&mut Visibility, With<LoadingBanner>>,
    mut status_texts: Query<&mut Text, (With<StatusText>, Without<ErrorText>)>,
    mut error_texts: Query<&mut Text, (With<ErrorText>, Without<StatusText>)>,
) {
    if !status.is_changed() {
        return;
    }
    for mut visibility in &mut banners {
        *visibility = if status.loading {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    for mut text in &mut status_texts {
        set_text(&mut text, status_text(&status));
    }
    for mut text in &mut error_texts {
        set_text(&mut text, status.error.clone().unwrap_or_default());
    }
}

pub fn update_telemetry_overlay(
    state: Res<ControlState>,
    mut texts: Query<&mut Text, With<TelemetryText>>,
) {
    let line = telemetry_text(state.mode(), state.velocity.length());
    for mut text in &mut texts {
        set_text(&mut text, line.clone());
    }
}

pub fn update_hover_card(
    hovered: Res<HoveredStar>,
    catalog: Option<Res<StarCatalog>>,
    mut cards: Query<&mut Visibility, With<HoverCard>>,
    mut texts: Query<&mut Text, With<HoverCardText>>,
) {
    if !hovered.is_changed() {
        return;
    }
    let record = catalog
        .as_ref()
        .zip(hovered.0)
        .and_then(|(catalog, index)| catalog.get(index));

    for mut visibility in &mut cards {
        *visibility = if record.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    if let Some(record) = record {
        for mut text in &mut texts {
            set_text(&mut text, star_details(record));
        }
    }
}
