//! Built-in catalog used whenever no usable catalog file is available.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::types::{SPECTRAL_CLASSES, StarId, StarRecord};

/// Number of randomly generated stars added after the named ones.
pub const FALLBACK_GENERATED_COUNT: usize = 2000;

/// (name, RA hours, Dec degrees, magnitude, B-V, distance pc, spectral class)
type NamedStar = (&'static str, f32, f32, f32, f32, f32, &'static str);

const NAMED_STARS: [NamedStar; 10] = [
    ("Sirius", 6.7525, -16.7161, -1.46, 0.00, 2.64, "A1V"),
    ("Canopus", 6.3992, -52.6957, -0.74, 0.15, 95.0, "A9II"),
    ("Arcturus", 14.2610, 19.1825, -0.05, 1.23, 11.26, "K1.5III"),
    ("Vega", 18.6156, 38.7837, 0.03, 0.00, 7.68, "A0V"),
    ("Capella", 5.2782, 45.9980, 0.08, 0.80, 13.12, "G3III"),
    ("Rigel", 5.2423, -8.2016, 0.13, -0.03, 264.6, "B8Ia"),
    ("Procyon", 7.6550, 5.2250, 0.34, 0.42, 3.51, "F5IV"),
    ("Betelgeuse", 5.9195, 7.4071, 0.50, 1.85, 168.1, "M1Ia"),
    ("Altair", 19.8464, 8.8683, 0.77, 0.22, 5.13, "A7V"),
    ("Aldebaran", 4.5987, 16.5093, 0.85, 1.54, 20.0, "K5III"),
];

/// The fixed set of bright, well-known stars.
pub fn named_stars() -> Vec<StarRecord> {
    NAMED_STARS
        .iter()
        .enumerate()
        .map(|(i, &(name, ra, dec, mag, bv, dist, spectral))| StarRecord {
            id: Some(StarId::Number(i as i64 + 1)),
            name: Some(name.to_string()),
            ra: Some(ra),
            dec: Some(dec),
            mag: Some(mag),
            bv: Some(bv),
            dist: Some(dist),
            spectral: Some(spectral.to_string()),
            ..Default::default()
        })
        .collect()
}

/// Random stars with ids starting at `first_id`.
///
/// Distance is left unset so the coordinate mapper spreads the stars over its default shell.
pub fn generate_stars<R: Rng + ?Sized>(rng: &mut R, count: usize, first_id: i64) -> Vec<StarRecord> {
    (0..count)
        .map(|i| {
            let id = first_id + i as i64;
            let spectral = SPECTRAL_CLASSES.choose(rng).copied().unwrap_or('G');
            StarRecord {
                id: Some(StarId::Number(id)),
                name: Some(format!("Star {}", id)),
                ra: Some(rng.gen_range(0.0..24.0)),
                dec: Some((rng.gen_range(0.0..1.0) - 0.5) * 180.0),
                mag: Some(rng.gen_range(-1.0..7.0)),
                bv: Some(rng.gen_range(-0.3..1.7)),
                spectral: Some(spectral.to_string()),
                ..Default::default()
            }
        })
        .collect()
}

/// Named stars followed by `FALLBACK_GENERATED_COUNT` generated ones.
pub fn fallback_catalog<R: Rng + ?Sized>(rng: &mut R) -> Vec<StarRecord> {
    let mut records = named_stars();
    let first_id = records.len() as i64 + 1;
    records.extend(generate_stars(rng, FALLBACK_GENERATED_COUNT, first_id));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fallback_size() {
        let mut rng = StdRng::seed_from_u64(7);
        let records = fallback_catalog(&mut rng);
        assert_eq!(records.len(), NAMED_STARS.len() + FALLBACK_GENERATED_COUNT);
        assert_eq!(records.len(), 2010);
    }

    #[test]
    fn test_named_stars_come_first() {
        let mut rng = StdRng::seed_from_u64(8);
        let records = fallback_catalog(&mut rng);
        assert_eq!(records[0].name.as_deref(), Some("Sirius"));
        assert_eq!(records[9].name.as_deref(), Some("Aldebaran"));
        assert_eq!(records[10].id, Some(StarId::Number(11)));
        assert_eq!(records[2009].id, Some(StarId::Number(2010)));
    }

    #[test]
    fn test_generated_ranges() {
        let mut rng = StdRng::seed_from_u64(9);
        for star in generate_stars(&mut rng, 500, 1) {
            let ra = star.ra.unwrap();
            let dec = star.dec.unwrap();
            let mag = star.mag.unwrap();
            let bv = star.bv.unwrap();
            assert!((0.0..24.0).contains(&ra));
            assert!((-90.0..=90.0).contains(&dec));
            assert!((-1.0..7.0).contains(&mag));
            assert!((-0.3..1.7).contains(&bv));
            assert!(star.dist.is_none());

            let spectral = star.spectral.unwrap();
            let letter = spectral.chars().next().unwrap();
            assert!(SPECTRAL_CLASSES.contains(&letter));
        }
    }

    #[test]
    fn test_generation_is_seed_deterministic() {
        let a = fallback_catalog(&mut StdRng::seed_from_u64(11));
        let b = fallback_catalog(&mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
