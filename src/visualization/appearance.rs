//! Star appearance mapping
//!
//! Maps catalog photometry to render properties:
//! - color from the B-V index, else from the spectral class, else a jittered near-white
//! - point size and opacity from apparent magnitude

use rand::Rng;

use crate::catalog::StarRecord;

/// Smallest rendered star size.
pub const MIN_STAR_SIZE: f32 = 0.5;
/// Size used when the magnitude is unknown.
pub const DEFAULT_STAR_SIZE: f32 = 1.0;
/// Faintest opacity a star is drawn with.
pub const MIN_STAR_OPACITY: f32 = 0.3;

/// Temperature bands, hottest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarTint {
    Blue,
    BlueWhite,
    White,
    YellowWhite,
    Orange,
    Red,
}

impl StarTint {
    /// Linear RGB triple in [0, 1].
    pub fn rgb(self) -> [f32; 3] {
        match self {
            StarTint::Blue => [0.6, 0.7, 1.0],
            StarTint::BlueWhite => [0.8, 0.8, 1.0],
            StarTint::White => [1.0, 1.0, 1.0],
            StarTint::YellowWhite => [1.0, 1.0, 0.8],
            StarTint::Orange => [1.0, 0.8, 0.6],
            StarTint::Red => [1.0, 0.6, 0.6],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StarTint::Blue => "Blue",
            StarTint::BlueWhite => "Blue-white",
            StarTint::White => "White",
            StarTint::YellowWhite => "Yellow-white",
            StarTint::Orange => "Orange",
            StarTint::Red => "Red",
        }
    }
}

/// Band for a B-V color index. Thresholds: -0.4, 0, 0.5, 1.0, 1.5.
pub fn tint_from_bv(bv: f32) -> StarTint {
    if bv < -0.4 {
        StarTint::Blue
    } else if bv < 0.0 {
        StarTint::BlueWhite
    } else if bv < 0.5 {
        StarTint::White
    } else if bv < 1.0 {
        StarTint::YellowWhite
    } else if bv < 1.5 {
        StarTint::Orange
    } else {
        StarTint::Red
    }
}

/// Band for a spectral class, keyed on its first letter. Unknown classes are white.
pub fn tint_from_spectral(class: &str) -> StarTint {
    let letter = class
        .trim_start()
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase());
    match letter {
        Some('O') => StarTint::Blue,
        Some('B') => StarTint::BlueWhite,
        Some('A') | Some('F') => StarTint::White,
        Some('G') => StarTint::YellowWhite,
        Some('K') => StarTint::Orange,
        Some('M') => StarTint::Red,
        _ => StarTint::White,
    }
}

/// RGB color for a record.
pub fn star_color<R: Rng + ?Sized>(record: &StarRecord, rng: &mut R) -> [f32; 3] {
    if let Some(bv) = record.bv {
        return tint_from_bv(bv).rgb();
    }
    if let Some(class) = record.spectral.as_deref() {
        return tint_from_spectral(class).rgb();
    }
    [
        rng.gen_range(0.9..1.0),
        rng.gen_range(0.9..1.0),
        rng.gen_range(0.9..1.0),
    ]
}

/// `max(0.5, 3.0 - (mag + 2) * 0.5)`; unknown magnitude gives 1.0.
pub fn star_size(mag: Option<f32>) -> f32 {
    match mag {
        Some(mag) => (3.0 - (mag + 2.0) * 0.5).max(MIN_STAR_SIZE),
        None => DEFAULT_STAR_SIZE,
    }
}

/// `max(0.3, 1.0 - mag * 0.1)` with unknown magnitude treated as 0.
pub fn star_opacity(mag: Option<f32>) -> f32 {
    (1.0 - mag.unwrap_or(0.0) * 0.1).max(MIN_STAR_OPACITY)
}

/// Everything the scene builder needs to draw one star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarAppearance {
    pub color: [f32; 3],
    pub size: f32,
    pub opacity: f32,
}

pub fn star_appearance<R: Rng + ?Sized>(record: &StarRecord, rng: &mut R) -> StarAppearance {
    StarAppearance {
        color: star_color(record, rng),
        size: star_size(record.mag),
        opacity: star_opacity(record.mag),
    }
}
