use chrono::{DateTime, Timelike, Utc};
use chrono_english::{Dialect, parse_date_string};
use chrono_tz::Tz;
use clap::Parser;

mod cli;
mod grid;
mod lunar;
mod output;
mod solar;
mod time;

use cli::{Args, DepInfo};
use grid::GridConfig;
use time::{parse_time_hms, resolve_timezone, system_timezone, unix_seconds};

// ===================== MAIN =====================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.show_build_info {
        println!("Built from Git commit: {}\n", env!("APP_GIT_HASH"));
        const DEP_INFO_RAW: &str = include_str!(env!("DEPS_INFO_PATH"));
        let deps: Vec<DepInfo> = serde_json::from_str(DEP_INFO_RAW)?;

        println!("Found {} dependencies.", deps.len());
        for dep in deps {
            println!("- {} v{}", dep.name, dep.version);
            if let Some(sum) = dep.checksum {
                println!("    Checksum: {}", sum);
            }
            if let Some(src) = dep.source {
                println!("    Source:   {}", src);
            }
        }
        return Ok(());
    }

    // required_unless_present guarantees these once build-info is handled
    let latitude = args.latitude.ok_or("latitude is required")?;
    let longitude = args.longitude.ok_or("longitude is required")?;

    let tz = if args.utc {
        Tz::UTC
    } else {
        match args.timezone.as_str() {
            "system" => system_timezone(),
            "location" => resolve_timezone(longitude, latitude),
            other => other.parse().unwrap_or(Tz::UTC),
        }
    };

    let cfg = GridConfig {
        east_extent_deg: args.east_extent,
        west_extent_deg: args.west_extent,
        min_intensity: args.min_intensity,
    };

    if args.watch {
        // The original device loop: recompute from the live clock forever
        loop {
            let now = Utc::now().with_timezone(&tz);
            render_once(&args, &cfg, latitude, longitude, now);
            std::thread::sleep(std::time::Duration::from_secs(args.interval));
        }
    }

    let when = resolve_instant(&args, tz)?;
    render_once(&args, &cfg, latitude, longitude, when);
    Ok(())
}

// ===================== ORCHESTRATION =====================

/// Work out the instant to compute for from --date/--at, anchored in the
/// target timezone.
fn resolve_instant(args: &Args, tz: Tz) -> Result<DateTime<Tz>, Box<dyn std::error::Error>> {
    let anchor = Utc::now().with_timezone(&tz);
    let mut when = match &args.date {
        Some(s) => parse_date_string(s, anchor, Dialect::Us)?.with_timezone(&tz),
        None => anchor,
    };

    if let Some(at) = &args.at {
        let (h, m, s, ns) = parse_time_hms(at)?;
        when = when
            .with_hour(h)
            .and_then(|t| t.with_minute(m))
            .and_then(|t| t.with_second(s))
            .and_then(|t| t.with_nanosecond(ns))
            .ok_or("Requested time does not exist in this timezone")?;
    }
    Ok(when)
}

/// Compute the moon position and sky phase for one instant and print it.
fn render_once(args: &Args, cfg: &GridConfig, latitude: f64, longitude: f64, when: DateTime<Tz>) {
    let instant = unix_seconds(when);
    let moon = lunar::moon_position(instant, latitude, longitude);
    let phase = solar::day_phase(instant, latitude, longitude);

    if args.grid {
        output::print_grid(cfg, &moon, phase, when);
    } else {
        output::print_report(&moon, phase, when);
    }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::UTC;

    fn base_args() -> Args {
        Args::parse_from(["moontimes", "--latitude", "-33.87", "--longitude", "151.21"])
    }

    #[test]
    fn test_resolve_instant_date_and_time() {
        let mut args = base_args();
        args.date = Some("2024-06-21".into());
        args.at = Some("22:30".into());

        let when = resolve_instant(&args, UTC).unwrap();
        assert_eq!(when, UTC.with_ymd_and_hms(2024, 6, 21, 22, 30, 0).unwrap());
    }

    #[test]
    fn test_resolve_instant_defaults_to_now() {
        let args = base_args();
        let before = Utc::now().timestamp();
        let when = resolve_instant(&args, UTC).unwrap();
        let after = Utc::now().timestamp();
        assert!(when.timestamp() >= before && when.timestamp() <= after);
    }

    #[test]
    fn test_cli_rejects_out_of_range_coordinates() {
        assert!(Args::try_parse_from(["moontimes", "--latitude", "91", "--longitude", "0"]).is_err());
        assert!(
            Args::try_parse_from(["moontimes", "--latitude", "0", "--longitude", "-181"]).is_err()
        );
    }

    #[test]
    fn test_cli_accepts_negative_coordinates() {
        let args =
            Args::try_parse_from(["moontimes", "--latitude", "-33.87", "--longitude", "-70.66"])
                .unwrap();
        assert_eq!(args.latitude, Some(-33.87));
        assert_eq!(args.longitude, Some(-70.66));
    }
}
