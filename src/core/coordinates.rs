//! Core coordinate utilities
//!
//! Converts catalog positions into scene space:
//! - Equatorial coordinates (right ascension in hours, declination in degrees, distance in parsecs)
//! - Direct Cartesian coordinates supplied by the catalog
//! - A random placement for records that carry neither
//!
//! Scene units are parsecs. The equatorial plane is the XZ plane with +Y towards the north
//! celestial pole, RA = 0h along +X and RA = 6h along +Z.

use bevy::math::Vec3;
use rand::Rng;

use crate::catalog::StarRecord;

/// Degrees of right ascension per hour.
pub const DEGREES_PER_HOUR: f32 = 15.0;

/// Distance assigned to equatorial records without one: `BASE + U[0, SPREAD)`.
pub const DEFAULT_DISTANCE_BASE_PC: f32 = 50.0;
pub const DEFAULT_DISTANCE_SPREAD_PC: f32 = 200.0;

/// Edge length of the cube used for records without any coordinates.
pub const RANDOM_PLACEMENT_EXTENT: f32 = 1000.0;

/// Spherical to Cartesian conversion for equatorial coordinates.
///
/// x = d·cos(dec)·cos(ra), y = d·sin(dec), z = d·cos(dec)·sin(ra)
pub fn equatorial_to_cartesian(ra_hours: f32, dec_deg: f32, distance: f32) -> Vec3 {
    let ra = (ra_hours * DEGREES_PER_HOUR).to_radians();
    let dec = dec_deg.to_radians();
    let (sin_ra, cos_ra) = ra.sin_cos();
    let (sin_dec, cos_dec) = dec.sin_cos();
    Vec3::new(
        distance * cos_dec * cos_ra,
        distance * sin_dec,
        distance * cos_dec * sin_ra,
    )
}

/// Resolve the scene position for a catalog record.
///
/// Direct Cartesian coordinates win over equatorial ones; a record with neither lands at a
/// random point inside a cube centred on the origin. Never fails.
pub fn resolve_position<R: Rng + ?Sized>(record: &StarRecord, rng: &mut R) -> Vec3 {
    if let (Some(x), Some(y), Some(z)) = (record.x, record.y, record.z) {
        return Vec3::new(x, y, z);
    }

    if let (Some(ra), Some(dec)) = (record.ra, record.dec) {
        let distance = record.dist.unwrap_or_else(|| {
            DEFAULT_DISTANCE_BASE_PC + rng.gen_range(0.0..DEFAULT_DISTANCE_SPREAD_PC)
        });
        return equatorial_to_cartesian(ra, dec, distance);
    }

    random_in_cube(rng, RANDOM_PLACEMENT_EXTENT)
}

/// Uniform random point in an axis-aligned cube of edge `extent` centred on the origin.
pub fn random_in_cube<R: Rng + ?Sized>(rng: &mut R, extent: f32) -> Vec3 {
    let half = extent * 0.5;
    Vec3::new(
        rng.gen_range(-half..half),
        rng.gen_range(-half..half),
        rng.gen_range(-half..half),
    )
}

// =================================== Tests ===================================
