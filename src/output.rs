//! Output Formatting Module
//!
//! Terminal report for the computed moon position and the 53x11 grid view
//! mimicking the original LED matrix layout.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::grid::{self, GRID_HEIGHT, GRID_WIDTH, GridConfig, OBSERVER_X};
use crate::lunar::MoonPosition;
use crate::solar::DayPhase;

// ===================== FRAME CELLS =====================

/// Character used for an empty sky cell
const SKY: char = '\u{b7}'; // '·'

/// Character used for a moon cell
const MOON: char = '#';

/// Character used for the observer marker
const OBSERVER: char = '^';

// ===================== PHASE GLYPH =====================

/// Pick a moon glyph from the illuminated fraction.
///
/// The model has no waxing/waning direction, so the glyph only tracks how
/// much of the disc is lit.
pub fn phase_glyph(illuminated: f64) -> &'static str {
    if illuminated > 0.9 {
        "\u{1f315}" // full
    } else if illuminated > 0.6 {
        "\u{1f314}" // gibbous
    } else if illuminated > 0.35 {
        "\u{1f313}" // quarter
    } else if illuminated > 0.1 {
        "\u{1f312}" // crescent
    } else {
        "\u{1f311}" // new
    }
}

// ===================== REPORT OUTPUT =====================

/// Print the plain terminal report.
pub fn print_report(moon: &MoonPosition, phase: DayPhase, when: DateTime<Tz>) {
    println!(
        "{} Alt: {:.2}\u{b0} Az: {:.2}\u{b0}",
        phase_glyph(moon.illuminated),
        moon.altitude_deg,
        moon.azimuth_deg
    );
    println!("---");
    println!("Time: {}", when.format("%Y-%m-%d %H:%M:%S %Z"));
    println!("Distance: {:.0} km", moon.distance_km);
    println!("Illuminated: {:.1}%", moon.illuminated * 100.0);
    println!("Sky: {}", phase.label());
    if moon.altitude_deg <= 0.0 {
        println!("The moon is below the horizon.");
    }
}

// ===================== GRID OUTPUT =====================

/// Build the character frame: sky background, a 2x2 moon block when the moon
/// maps onto the grid, and the observer marker at the bottom center.
pub fn render_frame(cfg: &GridConfig, moon: &MoonPosition) -> Vec<String> {
    let mut cells = vec![vec![SKY; GRID_WIDTH]; GRID_HEIGHT];
    cells[GRID_HEIGHT - 1][OBSERVER_X] = OBSERVER;

    if let Some((x, y)) = grid::map_position(cfg, moon.altitude_deg, moon.azimuth_deg) {
        for (px, py) in [(x, y as isize), (x + 1, y as isize), (x, y as isize - 1), (x + 1, y as isize - 1)] {
            if px < GRID_WIDTH && py >= 0 {
                cells[py as usize][px] = MOON;
            }
        }
    }

    cells.into_iter().map(|row| row.into_iter().collect()).collect()
}

/// Print the grid frame with ANSI colors: the sky-phase background color
/// behind every cell and a grayscale moon block scaled by illumination.
pub fn print_grid(cfg: &GridConfig, moon: &MoonPosition, phase: DayPhase, when: DateTime<Tz>) {
    let bg = grid::background(phase);
    let level = grid::intensity(cfg, moon.illuminated);

    println!(
        "{} {} | Alt: {:.1}\u{b0} Az: {:.1}\u{b0} | {:.0}% lit | {}",
        phase_glyph(moon.illuminated),
        when.format("%H:%M"),
        moon.altitude_deg,
        moon.azimuth_deg,
        moon.illuminated * 100.0,
        phase.label()
    );

    for row in render_frame(cfg, moon) {
        print!("\u{1b}[48;2;{};{};{}m", bg.0, bg.1, bg.2);
        for c in row.chars() {
            match c {
                MOON => print!("\u{1b}[38;2;{level};{level};{level}m{MOON}\u{1b}[39m"),
                OBSERVER => print!("\u{1b}[38;2;0;255;0m{OBSERVER}\u{1b}[39m"),
                _ => print!("{c}"),
            }
        }
        println!("\u{1b}[0m");
    }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;

    fn moon_at(altitude_deg: f64, azimuth_deg: f64) -> MoonPosition {
        MoonPosition { azimuth_deg, altitude_deg, distance_km: 385_001.0, illuminated: 0.5 }
    }

    #[test]
    fn test_phase_glyph_buckets() {
        assert_eq!(phase_glyph(0.0), "\u{1f311}");
        assert_eq!(phase_glyph(0.2), "\u{1f312}");
        assert_eq!(phase_glyph(0.5), "\u{1f313}");
        assert_eq!(phase_glyph(0.8), "\u{1f314}");
        assert_eq!(phase_glyph(1.0), "\u{1f315}");
    }

    #[test]
    fn test_frame_dimensions() {
        let frame = render_frame(&GridConfig::default(), &moon_at(45.0, 0.0));
        assert_eq!(frame.len(), GRID_HEIGHT);
        for row in &frame {
            assert_eq!(row.chars().count(), GRID_WIDTH);
        }
    }

    #[test]
    fn test_frame_draws_moon_block() {
        // North at 45 degrees: 2x2 block at columns 26-27, rows 4-5
        let frame = render_frame(&GridConfig::default(), &moon_at(45.0, 0.0));
        for y in [4, 5] {
            let row: Vec<char> = frame[y].chars().collect();
            assert_eq!(row[26], '#');
            assert_eq!(row[27], '#');
        }
        assert!(!frame[3].contains('#'));
        assert!(!frame[6].contains('#'));
    }

    #[test]
    fn test_frame_clips_right_edge_block() {
        // Far west maps to column 52; the second block column would be 53
        // and must be clipped, not panic
        let frame = render_frame(&GridConfig::default(), &moon_at(45.0, 359.0));
        let row: Vec<char> = frame[5].chars().collect();
        assert_eq!(row[52], '#');
    }

    #[test]
    fn test_frame_below_horizon_shows_only_observer() {
        let frame = render_frame(&GridConfig::default(), &moon_at(-5.0, 0.0));
        let joined = frame.join("");
        assert!(!joined.contains('#'));
        assert_eq!(joined.matches('^').count(), 1);
        let bottom: Vec<char> = frame[GRID_HEIGHT - 1].chars().collect();
        assert_eq!(bottom[OBSERVER_X], '^');
    }
}
