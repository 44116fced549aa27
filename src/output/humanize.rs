//! Human-readable byte sizes and durations

use std::time::Duration;

const BYTE_UNITS: [&str; 5] = ["kB", "MB", "GB", "TB", "PB"];

/// Format a byte count with SI units, e.g. `532 B`, `1.2 kB`, `48 MB`
///
/// The value is rounded to its display precision before the unit is chosen,
/// so 999 960 bytes reads `1.0 MB` rather than `1000 kB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1000 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut shown = value;
    let mut unit = BYTE_UNITS[0];
    for candidate in BYTE_UNITS {
        value /= 1000.0;
        shown = round_for_display(value);
        unit = candidate;
        if shown < 1000.0 {
            break;
        }
    }

    if shown < 10.0 {
        format!("{:.1} {}", shown, unit)
    } else {
        format!("{:.0} {}", shown, unit)
    }
}

/// One decimal below 10, whole numbers above
fn round_for_display(value: f64) -> f64 {
    if value < 10.0 {
        (value * 10.0).round() / 10.0
    } else {
        value.round()
    }
}

/// Format a duration compactly, e.g. `850ms`, `4.2s`, `1m 3.5s`, `1h 2m 3.0s`
///
/// Seconds are rounded to tenths before being split into minutes and hours.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        return format!("{}ms", millis);
    }

    let tenths = (millis + 50) / 100;
    if tenths < 600 {
        return format!("{}.{}s", tenths / 10, tenths % 10);
    }

    let hours = tenths / 36_000;
    let minutes = (tenths % 36_000) / 600;
    let seconds = tenths % 600;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    parts.push(format!("{}m", minutes));
    parts.push(format!("{}.{}s", seconds / 10, seconds % 10));
    parts.join(" ")
}
