//! Date-time expressions for the `--after` / `--before` bounds
//!
//! Accepted forms, tried from coarsest to finest:
//!
//! ```text
//! 2024
//! 2024-03
//! 2024-03-15
//! 2024-03-15 10
//! 2024-03-15 10:30
//! 2024-03-15 10:30:45
//! 2024-03-15 10:30:45 UTC      (or +0200, -07:00, any zone abbreviation)
//! ```
//!
//! Times without a zone are UTC. Zone abbreviations other than a numeric
//! offset are recorded with a zero offset.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::ConfigError;

const FULL_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Each layout is completed to `FULL_LAYOUT` by appending the fields it lacks.
const PARTIAL_LAYOUTS: [&str; 6] = [
    "-01-01 00:00:00", // YYYY
    "-01 00:00:00",    // YYYY-MM
    " 00:00:00",       // YYYY-MM-DD
    ":00:00",          // YYYY-MM-DD HH
    ":00",             // YYYY-MM-DD HH:MM
    "",                // YYYY-MM-DD HH:MM:SS
];

/// Digit positions and separators of the longest zoneless layout. Every
/// shorter layout is a prefix of it.
const SHAPE: &[u8] = b"0000-00-00 00:00:00";

/// Lengths of the zoneless layouts, `YYYY` through `YYYY-MM-DD HH:MM:SS`
const LAYOUT_LENGTHS: [usize; 6] = [4, 7, 10, 13, 16, 19];

/// Parse a date-time bound; the first layout that accepts the text wins.
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, ConfigError> {
    let parsed = if LAYOUT_LENGTHS.contains(&value.len()) && has_shape(value) {
        PARTIAL_LAYOUTS
            .iter()
            .find_map(|completion| {
                NaiveDateTime::parse_from_str(&format!("{value}{completion}"), FULL_LAYOUT).ok()
            })
            .map(|naive| naive.and_utc())
    } else {
        parse_zoned(value)
    };

    parsed.ok_or_else(|| ConfigError::InvalidDate(value.to_string()))
}

/// Fixed-width fields only: chrono alone would take `2024-3` or `+2024`
fn has_shape(value: &str) -> bool {
    value.len() <= SHAPE.len()
        && value.bytes().zip(SHAPE).all(|(byte, &expected)| {
            if expected == b'0' {
                byte.is_ascii_digit()
            } else {
                byte == expected
            }
        })
}

fn parse_zoned(value: &str) -> Option<DateTime<Utc>> {
    let (local, rest) = value.split_at_checked(SHAPE.len())?;
    let zone = rest.strip_prefix(' ')?;
    if !has_shape(local) || zone.is_empty() || zone.contains(char::is_whitespace) {
        return None;
    }

    if is_zone_abbreviation(zone) {
        let naive = NaiveDateTime::parse_from_str(local, FULL_LAYOUT).ok()?;
        return Some(naive.and_utc());
    }

    DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S %z")
        .ok()
        .map(|fixed| fixed.with_timezone(&Utc))
}

fn is_zone_abbreviation(zone: &str) -> bool {
    zone == "Z" || ((3..=5).contains(&zone.len()) && zone.bytes().all(|b| b.is_ascii_uppercase()))
}
