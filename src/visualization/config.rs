//! Visualization configuration

use bevy::prelude::*;

/// Star field rendering configuration resource
#[derive(Resource, Debug, Clone)]
pub struct StarfieldConfig {
    /// World radius of a star sphere per unit of mapped size
    pub star_radius_scale: f32,
    pub nebula_particle_count: usize,
    pub nebula_extent: f32,
    /// Hue window of the nebula as fractions of the color circle
    pub nebula_hue_min: f32,
    pub nebula_hue_max: f32,
    pub nebula_saturation: f32,
    pub nebula_lightness: f32,
    pub nebula_alpha: f32,
    /// Nebula rotation per frame (radians)
    pub nebula_spin_x: f32,
    pub nebula_spin_y: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_radius_scale: 0.5,
            nebula_particle_count: 1000,
            nebula_extent: 2000.0,
            nebula_hue_min: 0.6,
            nebula_hue_max: 0.8,
            nebula_saturation: 0.7,
            nebula_lightness: 0.5,
            nebula_alpha: 0.3,
            nebula_spin_x: 0.0001,
            nebula_spin_y: 0.0002,
        }
    }
}
