//! Time Conversion and Timezone Utilities Module
//!
//! Converts wall-clock instants into the J2000-based day count used by the
//! ephemeris formulas, and resolves the observer's timezone for input parsing.

use chrono::{DateTime, NaiveTime, Timelike};
use chrono_tz::Tz;
use iana_time_zone::get_timezone;
use std::sync::OnceLock;
use tzf_rs::DefaultFinder;

// tzf-rs DefaultFinder is pre-compiled and very fast
static TZF_FINDER: OnceLock<DefaultFinder> = OnceLock::new();

// ===================== CONSTANTS =====================

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Date of the Unix epoch, rounded up; the -0.5 day correction is
/// applied in `days_since_j2000`
const JD_UNIX_EPOCH: f64 = 2_440_588.0;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 UTC)
const JD_J2000: f64 = 2_451_545.0;

// ===================== EPHEMERIS TIME BASE =====================

/// Convert Unix-epoch seconds to days elapsed since J2000.0.
///
/// Accepts any finite value, fractional or integer; exactly linear in its
/// input (adding 86400 seconds adds exactly one day).
pub fn days_since_j2000(unix_seconds: f64) -> f64 {
    unix_seconds / SECONDS_PER_DAY - 0.5 + JD_UNIX_EPOCH - JD_J2000
}

/// Approximate Greenwich-plus-longitude sidereal angle in radians.
///
/// `lw` is the observer longitude in radians, west-positive (the geographic
/// longitude negated). The result is NOT normalized to [0, 2π); callers that
/// need a bounded hour angle wrap it themselves.
pub fn sidereal_time(days: f64, lw: f64) -> f64 {
    (280.16 + 360.985_623_5 * days).to_radians() - lw
}

/// Fractional Unix seconds for a zoned instant, the `f64` time base every
/// ephemeris routine takes.
pub fn unix_seconds(dt: DateTime<Tz>) -> f64 {
    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9
}

// ===================== TIME PARSING =====================

/// Parse a time string in HH:MM[:SS[.fffffffff]] format.
///
/// # Returns
/// Tuple of (hours, minutes, seconds, nanoseconds)
///
/// # Errors
/// Returns an error if the time format is invalid
pub fn parse_time_hms(s: &str) -> Result<(u32, u32, u32, u32), Box<dyn std::error::Error>> {
    // Try the most specific format first so fractional seconds survive
    let formats = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

    for fmt in formats {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return Ok((t.hour(), t.minute(), t.second(), t.nanosecond()));
        }
    }
    Err("Invalid time format. Use HH:MM, HH:MM:SS, or HH:MM:SS.ns".into())
}

// ===================== TIMEZONE UTILITIES =====================

/// Get the system's configured timezone, falling back to UTC.
pub fn system_timezone() -> Tz {
    get_timezone().ok().and_then(|s| s.parse().ok()).unwrap_or(Tz::UTC)
}

/// Resolve the timezone covering the given geographic coordinates.
///
/// # Arguments
/// * `lon` - Longitude in degrees
/// * `lat` - Latitude in degrees
///
/// # Returns
/// The resolved timezone, or UTC if resolution fails
pub fn resolve_timezone(lon: f64, lat: f64) -> Tz {
    let finder = TZF_FINDER.get_or_init(DefaultFinder::new);
    finder.get_tz_name(lon, lat).parse::<Tz>().unwrap_or(Tz::UTC)
}

// ===================== TESTS =====================
