//! Background particle field ("nebula") for ambient depth cues.
//!
//! The particles live in a single point-list mesh that is ignored by picking.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;
use bevy::picking::Pickable;
use bevy::prelude::*;
use rand::Rng;

use crate::core::coordinates::random_in_cube;
use crate::visualization::config::StarfieldConfig;

/// Marker for the nebula point cloud entity
#[derive(Component)]
pub struct Nebula;

#[derive(Debug, Clone, Copy)]
pub struct NebulaParticle {
    pub position: Vec3,
    /// Linear RGBA
    pub color: [f32; 4],
}

/// Random particles in a cube, hues restricted to the configured blue-violet window.
pub fn generate_nebula<R: Rng + ?Sized>(
    config: &StarfieldConfig,
    rng: &mut R,
) -> Vec<NebulaParticle> {
    (0..config.nebula_particle_count)
        .map(|_| {
            let hue = rng.gen_range(config.nebula_hue_min..config.nebula_hue_max) * 360.0;
            let color = Color::hsla(
                hue,
                config.nebula_saturation,
                config.nebula_lightness,
                config.nebula_alpha,
            )
            .to_linear();
            NebulaParticle {
                position: random_in_cube(rng, config.nebula_extent),
                color: [color.red, color.green, color.blue, color.alpha],
            }
        })
        .collect()
}

pub fn build_nebula_mesh(particles: &[NebulaParticle]) -> Mesh {
    let positions: Vec<[f32; 3]> = particles.iter().map(|p| p.position.to_array()).collect();
    let colors: Vec<[f32; 4]> = particles.iter().map(|p| p.color).collect();
    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
}

/// Spawn the nebula under `parent`.
pub fn spawn_nebula(
    commands: &mut Commands,
    parent: Entity,
    config: &StarfieldConfig,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let particles = generate_nebula(config, &mut rand::thread_rng());
    let mesh = meshes.add(build_nebula_mesh(&particles));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        alpha_mode: AlphaMode::Add,
        ..default()
    });

    commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::default(),
            Nebula,
            Pickable::IGNORE,
            Name::new("Nebula"),
            ChildOf(parent),
        ))
        .id()
}

/// Slow ambient rotation of the nebula, once per frame
pub fn rotate_nebula(
    config: Res<StarfieldConfig>,
    mut query: Query<&mut Transform, With<Nebula>>,
) {
    for mut transform in &mut query {
        transform.rotate_x(config.nebula_spin_x);
        transform.rotate_y(config.nebula_spin_y);
    }
}
