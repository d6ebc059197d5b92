//! Derived descriptive text
//!
//! Short labels computed from raw readings: a temperature ladder, 16-point compass
//! directions, UTC offsets, UV index levels and local clock times.

use chrono::DateTime;

use crate::preferences::{Region, TimeFormat};

/// Temperature ladder, checked top-down with strict greater-than
const TEMPERATURE_LADDER: &[(f64, &str)] = &[
    (40.0, "Extremely Hot 🔥"),
    (35.0, "Very Hot ☀️"),
    (30.0, "Hot 🌞"),
    (25.0, "Warm 😎"),
    (20.0, "Pleasant 🌤️"),
    (15.0, "Mild 🌥️"),
    (10.0, "Cool 🌦️"),
    (5.0, "Cold 🥶"),
    (0.0, "Very Cold ❄️"),
];

const FREEZING: &str = "Freezing 🧊";

/// Returns a short label for a Celsius temperature, e.g. `"Very Hot ☀️"` for 36.
pub fn temperature_description(celsius: f64) -> &'static str {
    TEMPERATURE_LADDER
        .iter()
        .find(|(threshold, _)| celsius > *threshold)
        .map(|(_, label)| *label)
        .unwrap_or(FREEZING)
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Returns the 16-point compass label for a wind bearing in degrees.
///
/// Each label covers a 22.5° sector centred on its bearing, so 359° is still "N".
pub fn wind_direction(degrees: f64) -> &'static str {
    let sector = (degrees / 22.5).round() as i64;
    COMPASS_POINTS[sector.rem_euclid(16) as usize]
}

/// Formats a UTC offset in seconds as `+HH:MM` or `-HH:MM`.
pub fn utc_offset_label(offset_seconds: i32) -> String {
    let sign = if offset_seconds >= 0 { '+' } else { '-' };
    let abs = offset_seconds.unsigned_abs();
    let hours = abs / 3600;
    let minutes = (abs % 3600) / 60;
    format!("{}{:02}:{:02}", sign, hours, minutes)
}

/// UV exposure level with its display color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UvLevel {
    pub level: &'static str,
    pub color: &'static str,
}

/// Classifies a UV index reading
pub fn uv_index_description(uv_index: f64) -> UvLevel {
    let (level, color) = if uv_index <= 2.0 {
        ("Low", "#4CAF50")
    } else if uv_index <= 5.0 {
        ("Moderate", "#FF9800")
    } else if uv_index <= 7.0 {
        ("High", "#FF5722")
    } else if uv_index <= 10.0 {
        ("Very High", "#E91E63")
    } else {
        ("Extreme", "#9C27B0")
    };
    UvLevel { level, color }
}

/// Formats an epoch timestamp as the wall-clock time at a location.
///
/// `offset_seconds` is the location's UTC offset as reported by the provider.
/// 12-hour output uses an upper-case meridiem for the US and auto regions and
/// lower-case for EU and Asia; the region has no effect on 24-hour output.
pub fn format_local_time(
    timestamp: i64,
    offset_seconds: i32,
    time_format: TimeFormat,
    region: Region,
) -> String {
    let Some(local) = timestamp
        .checked_add(i64::from(offset_seconds))
        .and_then(|shifted| DateTime::from_timestamp(shifted, 0))
    else {
        return "--:--".to_string();
    };

    match time_format {
        TimeFormat::TwentyFourHour => local.format("%H:%M").to_string(),
        TimeFormat::TwelveHour => {
            let formatted = local.format("%I:%M %p").to_string();
            match region {
                Region::Eu | Region::Asia => formatted.to_lowercase(),
                Region::Us | Region::Auto => formatted,
            }
        }
    }
}
