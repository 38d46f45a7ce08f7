//! Star field scene construction
//!
//! Every catalog record becomes one unlit sphere under a single `StarfieldRoot`. Spheres share
//! one mesh and a small set of materials keyed by quantized color and opacity. The root is
//! despawned (recursively) whenever the catalog leaves `Ready`, so a reload always starts from an
//! empty scene.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::catalog::StarCatalog;
use crate::core::coordinates::resolve_position;
use crate::visualization::appearance::star_appearance;
use crate::visualization::config::StarfieldConfig;
use crate::visualization::nebula::spawn_nebula;

/// Parent of all star and nebula entities for the current catalog
#[derive(Component)]
pub struct StarfieldRoot;

/// A rendered star. `index` points into `StarCatalog::records`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub index: usize,
    /// Drawn sphere radius in world units
    pub radius: f32,
}

/// Color steps per channel used to share star materials
const MATERIAL_COLOR_STEPS: f32 = 50.0;
/// Opacity steps used to share star materials
const MATERIAL_OPACITY_STEPS: f32 = 20.0;

/// Quantized sRGBA used as the material cache key
pub fn material_key(color: [f32; 3], opacity: f32) -> [u8; 4] {
    let quantize = |v: f32, steps: f32| (v.clamp(0.0, 1.0) * steps).round() as u8;
    [
        quantize(color[0], MATERIAL_COLOR_STEPS),
        quantize(color[1], MATERIAL_COLOR_STEPS),
        quantize(color[2], MATERIAL_COLOR_STEPS),
        quantize(opacity, MATERIAL_OPACITY_STEPS),
    ]
}

fn star_material(key: [u8; 4]) -> StandardMaterial {
    let channel = |i: usize| key[i] as f32 / MATERIAL_COLOR_STEPS;
    StandardMaterial {
        base_color: Color::srgba(
            channel(0),
            channel(1),
            channel(2),
            key[3] as f32 / MATERIAL_OPACITY_STEPS,
        ),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

/// Build the star field for the loaded catalog
pub fn spawn_starfield(
    mut commands: Commands,
    catalog: Res<StarCatalog>,
    config: Res<StarfieldConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = rand::thread_rng();
    let sphere = meshes.add(Sphere::new(1.0).mesh().uv(12, 8));
    let mut material_cache: HashMap<[u8; 4], Handle<StandardMaterial>> = HashMap::new();

    let root = commands
        .spawn((
            StarfieldRoot,
            Transform::default(),
            Visibility::Visible,
            Name::new("Starfield"),
        ))
        .id();

    for (index, record) in catalog.records.iter().enumerate() {
        let position = resolve_position(record, &mut rng);
        let appearance = star_appearance(record, &mut rng);
        let radius = appearance.size * config.star_radius_scale;

        let key = material_key(appearance.color, appearance.opacity);
        let material = material_cache
            .entry(key)
            .or_insert_with(|| materials.add(star_material(key)))
            .clone();

        commands.spawn((
            Mesh3d(sphere.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(position).with_scale(Vec3::splat(radius)),
            Star { index, radius },
            ChildOf(root),
        ));
    }

    spawn_nebula(&mut commands, root, &config, &mut meshes, &mut materials);

    info!(
        "[SCENE] built star field with {} stars ({} materials)",
        catalog.len(),
        material_cache.len()
    );
}

/// Remove the star field (and nebula) before the catalog is replaced
pub fn despawn_starfield(mut commands: Commands, roots: Query<Entity, With<StarfieldRoot>>) {
    for entity in &roots {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StarRecord;
    use crate::catalog::fallback::fallback_catalog;
    use crate::visualization::nebula::Nebula;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::picking::Pickable;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scene_app(records: Vec<StarRecord>) -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<StarfieldConfig>()
            .insert_resource(StarCatalog::new(records));
        app
    }

    #[test]
    fn test_one_star_per_record() {
        let records = vec![
            StarRecord {
                ra: Some(6.0),
                dec: Some(0.0),
                dist: Some(10.0),
                mag: Some(-2.0),
                ..Default::default()
            },
            StarRecord::default(),
            StarRecord {
                x: Some(1.0),
                y: Some(2.0),
                z: Some(3.0),
                ..Default::default()
            },
        ];
        let mut app = scene_app(records);
        app.add_systems(Update, spawn_starfield);
        app.update();

        let world = app.world_mut();
        let mut stars: Vec<(Star, Vec3)> = world
            .query::<(&Star, &Transform)>()
            .iter(world)
            .map(|(star, transform)| (*star, transform.translation))
            .collect();
        stars.sort_by_key(|(star, _)| star.index);

        assert_eq!(stars.len(), 3);
        assert_eq!(
            stars.iter().map(|(s, _)| s.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(stars[0].1.distance(Vec3::new(0.0, 0.0, 10.0)) < 1e-3);
        assert!((stars[0].0.radius - 1.5).abs() < 1e-6);
        assert_eq!(stars[2].1, Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(world.query::<&StarfieldRoot>().iter(world).count(), 1);
        assert_eq!(world.query::<&Nebula>().iter(world).count(), 1);
    }

    #[test]
    fn test_nebula_is_not_pickable() {
        let mut app = scene_app(vec![StarRecord::default()]);
        app.add_systems(Update, spawn_starfield);
        app.update();

        let world = app.world_mut();
        let pickables: Vec<Pickable> = world
            .query_filtered::<&Pickable, With<Nebula>>()
            .iter(world)
            .cloned()
            .collect();
        assert_eq!(pickables.len(), 1);
        assert!(!pickables[0].is_hoverable);
        assert!(!pickables[0].should_block_lower);
    }

    #[test]
    fn test_material_key_quantizes() {
        assert_eq!(material_key([1.0, 0.8, 0.6], 1.0), [50, 40, 30, 20]);
        assert_eq!(
            material_key([0.941, 0.939, 0.94], 0.71),
            material_key([0.94, 0.94, 0.94], 0.7)
        );
        // Out-of-range opacity from very bright magnitudes is clamped
        assert_eq!(material_key([1.0, 1.0, 1.0], 1.2)[3], 20);
    }

    #[test]
    fn test_identical_stars_share_material() {
        let record = StarRecord {
            bv: Some(0.3),
            mag: Some(2.0),
            ..Default::default()
        };
        let mut app = scene_app(vec![record; 4]);
        app.add_systems(Update, spawn_starfield);
        app.update();

        let world = app.world_mut();
        let handles: Vec<AssetId<StandardMaterial>> = world
            .query_filtered::<&MeshMaterial3d<StandardMaterial>, With<Star>>()
            .iter(world)
            .map(|material| material.0.id())
            .collect();
        assert_eq!(handles.len(), 4);
        assert!(handles.iter().all(|id| *id == handles[0]));
        // One star material plus the nebula's
        assert_eq!(world.resource::<Assets<StandardMaterial>>().len(), 2);
    }

    #[test]
    fn test_fallback_catalog_uses_few_materials() {
        let records = fallback_catalog(&mut StdRng::seed_from_u64(9));
        let count = records.len();
        let mut app = scene_app(records);
        app.add_systems(Update, spawn_starfield);
        app.update();

        let world = app.world_mut();
        assert_eq!(world.query::<&Star>().iter(world).count(), count);
        let materials = world.resource::<Assets<StandardMaterial>>().len();
        assert!(materials < 200, "{} materials for {} stars", materials, count);
    }

    #[test]
    fn test_despawn_clears_scene() {
        let mut app = scene_app(vec![StarRecord::default(); 5]);
        app.add_systems(Update, spawn_starfield);
        app.update();

        let world = app.world_mut();
        assert_eq!(world.query::<&Star>().iter(world).count(), 5);

        world
            .run_system_once(despawn_starfield)
            .expect("despawn system runs");
        assert_eq!(world.query::<&Star>().iter(world).count(), 0);
        assert_eq!(world.query::<&Nebula>().iter(world).count(), 0);
        assert_eq!(world.query::<&StarfieldRoot>().iter(world).count(), 0);
    }
}
