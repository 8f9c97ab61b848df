//! Command-Line Interface Module
//!
//! Handles argument parsing and validation for the moontimes-rs application.

use clap::Parser;
use serde::Deserialize;

// ===================== CLI =====================

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Observer latitude in decimal degrees (-90 to 90)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_latitude, env = "MOONTIMES_LATITUDE", required_unless_present = "show_build_info")]
    pub latitude: Option<f64>,
    /// Observer longitude in decimal degrees (-180 to 180)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_longitude, env = "MOONTIMES_LONGITUDE", required_unless_present = "show_build_info")]
    pub longitude: Option<f64>,
    /// Time zone to use ("system", "location", or IANA time zone name)
    #[arg(long, default_value = "system", env = "MOONTIMES_TIMEZONE")]
    pub timezone: String,

    /// Date for calculations (e.g., "2024-12-25" or "today"); defaults to today
    #[arg(long)]
    pub date: Option<String>,
    /// Compute for a specific time of day (HH:MM[:SS[.fffffffff]])
    #[arg(long)]
    pub at: Option<String>,
    /// Use UTC time zone
    #[arg(long)]
    pub utc: bool,

    // ===================== GRID OPTIONS =====================
    /// Render the 53x11 pixel grid instead of the plain report
    #[arg(long, env = "MOONTIMES_GRID")]
    pub grid: bool,

    /// Azimuth in degrees mapped to the left grid edge (eastern extent)
    #[arg(long, default_value_t = 125.0, value_parser = parse_extent, env = "MOONTIMES_EAST_EXTENT")]
    pub east_extent: f64,

    /// Azimuth in degrees mapped to the right grid edge (western extent)
    #[arg(long, default_value_t = 235.0, value_parser = parse_extent, env = "MOONTIMES_WEST_EXTENT")]
    pub west_extent: f64,

    /// Minimum moon pixel intensity (0-255) so a new moon stays visible
    #[arg(long, default_value_t = 20, env = "MOONTIMES_MIN_INTENSITY")]
    pub min_intensity: u8,

    // ===================== WATCH OPTIONS =====================
    /// Keep running and refresh the output at a fixed interval
    #[arg(long, conflicts_with_all = ["date", "at"])]
    pub watch: bool,

    /// Refresh interval in seconds for --watch
    #[arg(long, default_value_t = 600, value_parser = parse_interval, env = "MOONTIMES_INTERVAL")]
    pub interval: u64,

    /// Show build info from Cargo.lock at time of building
    #[arg(long)]
    pub show_build_info: bool,
}

// Matches the structure serialized by build.rs
#[derive(Debug, Deserialize)]
pub struct DepInfo {
    pub name: String,
    pub version: String,
    pub checksum: Option<String>,
    pub source: Option<String>,
}

// ===================== CLI VALUE PARSERS =====================

fn parse_latitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(-90.0..=90.0).contains(&v) {
        return Err(format!("Latitude must be between -90 and 90, got {}", v));
    }
    Ok(v)
}

fn parse_longitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(-180.0..=180.0).contains(&v) {
        return Err(format!("Longitude must be between -180 and 180, got {}", v));
    }
    Ok(v)
}

fn parse_extent(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(0.0..360.0).contains(&v) {
        return Err(format!("Azimuth extent must be between 0 and 360 degrees, got {}", v));
    }
    Ok(v)
}

fn parse_interval(s: &str) -> Result<u64, String> {
    let v: u64 = s.parse().map_err(|_| format!("Invalid integer: {}", s))?;
    if v == 0 {
        return Err("Interval must be at least 1 second".to_string());
    }
    Ok(v)
}
