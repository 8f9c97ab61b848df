//! Display Grid Module
//!
//! Maps horizon coordinates onto the 53x11 LED-matrix style grid: a
//! piecewise-linear azimuth transform with configurable east/west extents,
//! altitude scaled onto the rows, a brightness floor so a new moon stays
//! visible, and the sky-phase background colors.

use crate::solar::DayPhase;

// ===================== CONSTANTS =====================

/// Grid width in pixels
pub const GRID_WIDTH: usize = 53;

/// Grid height in pixels
pub const GRID_HEIGHT: usize = 11;

/// Column of the observer marker (grid center, bottom row)
pub const OBSERVER_X: usize = 26;

// ===================== TYPES =====================

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Caller-side mapping configuration.
///
/// The azimuth extents bound the two sky sectors drawn on the grid: azimuths
/// in [0, east_extent] fill the left half toward center, azimuths in
/// [west_extent, 359] fill the right half. Anything between the extents is
/// behind the observer and is not drawn. Defaults suit a southern-hemisphere
/// observer facing north.
#[derive(Debug, Clone, Copy)]
pub struct GridConfig {
    /// Azimuth in degrees mapped to the left edge
    pub east_extent_deg: f64,
    /// Azimuth in degrees mapped to the right edge
    pub west_extent_deg: f64,
    /// Minimum pixel intensity so the moon never disappears entirely
    pub min_intensity: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig { east_extent_deg: 125.0, west_extent_deg: 235.0, min_intensity: 20 }
    }
}

// ===================== MAPPING =====================

/// Map altitude/azimuth onto grid coordinates.
///
/// Returns None when the moon is below the horizon, at or past the zenith,
/// or in the azimuth dead band between the two extents.
pub fn map_position(cfg: &GridConfig, altitude_deg: f64, azimuth_deg: f64) -> Option<(usize, usize)> {
    if !(altitude_deg > 0.0 && altitude_deg < 90.0) {
        return None;
    }
    // Altitude 0..90 scales onto rows 10..0
    let y = (10.0 - altitude_deg / 90.0 * 10.0) as usize;

    let x = if (0.0..=cfg.east_extent_deg).contains(&azimuth_deg) {
        // East sector: the extent lands on the left edge, north on center
        ((cfg.east_extent_deg - azimuth_deg) / cfg.east_extent_deg * 26.0) as usize
    } else if (cfg.west_extent_deg..=359.0).contains(&azimuth_deg) {
        // West sector: the extent lands just right of center
        ((azimuth_deg - cfg.west_extent_deg) / (359.0 - cfg.west_extent_deg) * 26.0) as usize + 26
    } else {
        return None;
    };

    Some((x, y))
}

/// Pixel intensity for an illuminated fraction, floored at the configured
/// minimum.
pub fn intensity(cfg: &GridConfig, illuminated: f64) -> u8 {
    let scaled = (illuminated * 255.0) as i32;
    scaled.max(i32::from(cfg.min_intensity)).clamp(0, 255) as u8
}

/// Fixed background color for each sky band.
pub fn background(phase: DayPhase) -> Rgb {
    match phase {
        DayPhase::Day => Rgb(18, 48, 92),
        DayPhase::Twilight => Rgb(36, 18, 58),
        DayPhase::Night => Rgb(0, 0, 0),
    }
}

// ===================== TESTS =====================
