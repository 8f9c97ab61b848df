//! Solar Position Module
//!
//! Low-precision solar ephemeris: equatorial coordinates from a first-order
//! equation-of-center model, sun altitude for an observer, and the
//! Day/Twilight/Night sky classification driven by sun elevation.
//!
//! Accuracy is on the order of arc minutes, which is all the illumination
//! and sky-phase consumers need.

use std::f64::consts::{PI, TAU};

use crate::time::{days_since_j2000, sidereal_time};

// ===================== CONSTANTS =====================

/// Obliquity of the ecliptic in degrees, treated as fixed (not time-varying)
pub const OBLIQUITY_DEG: f64 = 23.4397;

/// Sun elevation below which astronomical twilight ends, in degrees
pub const NIGHT_THRESHOLD_DEG: f64 = -18.0;

// ===================== TYPES =====================

/// Position on the celestial sphere, independent of observer location.
/// Both angles are in radians.
#[derive(Debug, Clone, Copy)]
pub struct Equatorial {
    /// Right ascension
    pub ra: f64,
    /// Declination
    pub dec: f64,
}

/// Sky band derived from the sun's elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    /// Sun above the horizon
    Day,
    /// Sun between the horizon and astronomical twilight
    Twilight,
    /// Sun more than 18 degrees below the horizon
    Night,
}

impl DayPhase {
    pub fn label(self) -> &'static str {
        match self {
            DayPhase::Day => "Day",
            DayPhase::Twilight => "Twilight",
            DayPhase::Night => "Night",
        }
    }
}

// ===================== SOLAR EPHEMERIS =====================

/// Equatorial coordinates of the Sun for a given J2000 day count.
///
/// Mean longitude and mean anomaly advance linearly; the ecliptic longitude
/// carries the first-order equation-of-center perturbation only.
pub fn sun_equatorial(days: f64) -> Equatorial {
    let e = OBLIQUITY_DEG.to_radians();

    let l = (280.460 + 0.985_647_4 * days).to_radians();
    let g = (357.528 + 0.985_600_3 * days).to_radians();
    let lambda = l + (1.915 * g.sin() + 0.020 * (2.0 * g).sin()).to_radians();

    Equatorial {
        ra: (e.cos() * lambda.sin()).atan2(lambda.cos()),
        dec: (e.sin() * lambda.sin()).clamp(-1.0, 1.0).asin(),
    }
}

/// Sun altitude in degrees for an observer at (lat, lng) degrees.
///
/// The hour angle is wrapped into (-π, π] before the altitude formula.
pub fn sun_altitude_deg(unix_seconds: f64, lat: f64, lng: f64) -> f64 {
    let lw = (-lng).to_radians();
    let phi = lat.to_radians();

    let days = days_since_j2000(unix_seconds);
    let sun = sun_equatorial(days);

    let mut h = sidereal_time(days, lw) - sun.ra;
    while h > PI {
        h -= TAU;
    }
    while h <= -PI {
        h += TAU;
    }

    (phi.sin() * sun.dec.sin() + phi.cos() * sun.dec.cos() * h.cos())
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees()
}

// ===================== SKY CLASSIFICATION =====================

/// Map a sun altitude to a sky band.
///
/// The horizon itself (exactly 0) and the astronomical twilight boundary
/// (exactly -18) both classify as Twilight: the Day and Night comparisons
/// are strict.
pub fn classify_altitude(altitude_deg: f64) -> DayPhase {
    if altitude_deg > 0.0 {
        DayPhase::Day
    } else if altitude_deg < NIGHT_THRESHOLD_DEG {
        DayPhase::Night
    } else {
        DayPhase::Twilight
    }
}

/// Sky band at a given instant and observer location.
pub fn day_phase(unix_seconds: f64, lat: f64, lng: f64) -> DayPhase {
    classify_altitude(sun_altitude_deg(unix_seconds, lat, lng))
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;

    /// Unix timestamp of the J2000.0 epoch, 2000-01-01T12:00:00Z.
    const J2000_UNIX: f64 = 946_728_000.0;

    #[test]
    fn test_sun_equatorial_at_j2000() {
        // Hand-computed from the model: L = 280.460, G = 357.528,
        // lambda = 280.3757 degrees -> ra = -78.72 deg, dec = -23.03 deg
        let sun = sun_equatorial(0.0);
        assert!((sun.ra - (-1.3739)).abs() < 2e-3, "ra = {}", sun.ra);
        assert!((sun.dec - (-0.4019)).abs() < 2e-3, "dec = {}", sun.dec);
    }

    #[test]
    fn test_sun_declination_stays_within_obliquity() {
        for i in 0..=400 {
            let sun = sun_equatorial(i as f64);
            assert!(sun.dec.abs() <= OBLIQUITY_DEG.to_radians() + 1e-9);
            assert!(sun.ra >= -std::f64::consts::PI && sun.ra <= std::f64::consts::PI);
        }
    }

    #[test]
    fn test_classify_partitions_all_altitudes() {
        assert_eq!(classify_altitude(45.0), DayPhase::Day);
        assert_eq!(classify_altitude(1e-9), DayPhase::Day);
        assert_eq!(classify_altitude(-6.0), DayPhase::Twilight);
        assert_eq!(classify_altitude(-30.0), DayPhase::Night);
        assert_eq!(classify_altitude(-90.0), DayPhase::Night);
    }

    #[test]
    fn test_classify_boundaries_are_twilight() {
        // Day is strict > 0, Night is strict < -18
        assert_eq!(classify_altitude(0.0), DayPhase::Twilight);
        assert_eq!(classify_altitude(-18.0), DayPhase::Twilight);
    }

    #[test]
    fn test_noon_at_greenwich_is_day() {
        // 2024-06-21 12:00 UTC, London-ish observer: sun well above horizon
        let midsummer_noon = 1_718_971_200.0;
        assert_eq!(day_phase(midsummer_noon, 51.5, 0.0), DayPhase::Day);
        assert!(sun_altitude_deg(midsummer_noon, 51.5, 0.0) > 55.0);
    }

    #[test]
    fn test_midnight_at_greenwich_is_night() {
        // 2024-06-21 00:00 UTC at the equator: sun far below the horizon
        let midnight = 1_718_928_000.0;
        assert_eq!(day_phase(midnight, 0.0, 0.0), DayPhase::Night);
    }

    #[test]
    fn test_altitude_bounded_over_sweep() {
        for hour in 0..48 {
            let t = J2000_UNIX + hour as f64 * 3600.0;
            for &(lat, lng) in &[(0.0, 0.0), (51.5, -0.1), (-33.9, 151.2), (69.6, 18.9)] {
                let alt = sun_altitude_deg(t, lat, lng);
                assert!((-90.0..=90.0).contains(&alt), "alt = {alt} at {lat},{lng}");
            }
        }
    }

    #[test]
    fn test_hour_angle_wrap_is_longitude_invariant() {
        // The wrap loop must make altitude continuous in longitude: the same
        // instant shifted a full turn east gives the same altitude.
        let t = J2000_UNIX + 1234.0 * 3600.0;
        let a = sun_altitude_deg(t, 40.0, 20.0);
        let b = sun_altitude_deg(t, 40.0, 20.0 - 360.0);
        assert!((a - b).abs() < 1e-9);
    }
}
