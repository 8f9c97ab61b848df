//! Lunar Position Module
//!
//! Low-precision lunar ephemeris: perturbed ecliptic longitude, latitude and
//! distance from the Moon's mean elements, converted through equatorial to
//! horizon coordinates for a given observer, plus the illuminated fraction
//! from the Sun-Moon phase angle.
//!
//! The model carries a single perturbation term per element (after
//! Agafonkin's suncalc), good to roughly a degree on the sky and a few
//! hundred km in distance.

use crate::solar::{Equatorial, OBLIQUITY_DEG, sun_equatorial};
use crate::time::{days_since_j2000, sidereal_time};

// ===================== TYPES =====================

/// Where the Moon sits in the observer's sky, and how lit it is.
#[derive(Debug, Clone, Copy)]
pub struct MoonPosition {
    /// Compass bearing in degrees, [0, 360), 180 degree display offset applied
    pub azimuth_deg: f64,
    /// Angle above the horizon in degrees, [-90, 90]
    pub altitude_deg: f64,
    /// Earth-Moon distance in kilometers
    pub distance_km: f64,
    /// Illuminated fraction, 0.0 = dark to 1.0 = full
    pub illuminated: f64,
}

// ===================== LUNAR EPHEMERIS =====================

/// Equatorial coordinates and distance of the Moon for a J2000 day count.
///
/// Returns the coordinate pair and the perturbed distance in km.
pub fn moon_equatorial(days: f64) -> (Equatorial, f64) {
    let e = OBLIQUITY_DEG.to_radians();

    // Mean elements, degrees per day since J2000
    let l = (218.316 + 13.176_396 * days).to_radians(); // mean longitude
    let m = (134.963 + 13.064_993 * days).to_radians(); // mean anomaly
    let f = (93.272 + 13.229_350 * days).to_radians(); // distance from ascending node

    // One perturbation term per element
    let lambda = l + (6.289 * m.sin()).to_radians();
    let beta = (5.128 * f.sin()).to_radians();
    let distance_km = 385_001.0 - 20_905.0 * m.cos();

    let ra = (lambda.sin() * e.cos() - beta.tan() * e.sin()).atan2(lambda.cos());
    let dec = (beta.sin() * e.cos() + beta.cos() * e.sin() * lambda.sin())
        .clamp(-1.0, 1.0)
        .asin();

    (Equatorial { ra, dec }, distance_km)
}

/// Apparent position and illumination of the Moon for an observer.
///
/// # Arguments
/// * `unix_seconds` - Instant as seconds since the Unix epoch
/// * `lat` - Observer latitude in degrees (-90 to 90)
/// * `lng` - Observer longitude in degrees (-180 to 180)
///
/// Always returns a value; the renderer decides what to do with a moon
/// below the horizon.
pub fn moon_position(unix_seconds: f64, lat: f64, lng: f64) -> MoonPosition {
    // Hour-angle math runs west-positive, hence the sign flip
    let lw = (-lng).to_radians();
    let phi = lat.to_radians();

    let days = days_since_j2000(unix_seconds);
    let (moon, distance_km) = moon_equatorial(days);

    let h = sidereal_time(days, lw) - moon.ra;

    let altitude_deg = (phi.sin() * moon.dec.sin() + phi.cos() * moon.dec.cos() * h.cos())
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees();

    let mut azimuth_deg = h
        .sin()
        .atan2(h.cos() * phi.sin() - moon.dec.tan() * phi.cos())
        .to_degrees()
        + 180.0;
    // Single correction step, not a wrap loop; atan2 keeps the raw value
    // within one turn of range so one step suffices
    if azimuth_deg < 0.0 {
        azimuth_deg += 360.0;
    }
    if azimuth_deg > 360.0 {
        azimuth_deg -= 360.0;
    }

    let sun = sun_equatorial(days);
    let illuminated = illuminated_fraction(moon.ra, moon.dec, sun.ra, sun.dec);

    MoonPosition { azimuth_deg, altitude_deg, distance_km, illuminated }
}

// ===================== ILLUMINATION =====================

/// Illuminated fraction of the lunar disc from the Sun-Moon angular
/// separation, all arguments in radians.
///
/// Simplified phase model: only the angular separation enters, not the
/// Earth-Moon-Sun distance ratio. Zero separation yields 1.0 under this
/// formula.
pub fn illuminated_fraction(moon_ra: f64, moon_dec: f64, sun_ra: f64, sun_dec: f64) -> f64 {
    let phase_angle = (sun_dec.sin() * moon_dec.sin()
        + sun_dec.cos() * moon_dec.cos() * (sun_ra - moon_ra).cos())
    .clamp(-1.0, 1.0)
    .acos();

    (1.0 + phase_angle.cos()) / 2.0
}

// ===================== TESTS =====================
