//! Display conversions for agent-reported numbers.

use chrono::{DateTime, Utc};

const BYTE_UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Render a byte count in decimal units with three decimals,
/// e.g. `1048576` → `"1.049 MB"`.
pub fn human_bytes(bytes: i64) -> String {
    if bytes <= 0 {
        return "0 B".to_string();
    }
    let k = 1000f64;
    let exponent = ((bytes as f64).ln() / k.ln()).floor() as usize;
    let exponent = exponent.min(BYTE_UNITS.len() - 1);
    format!(
        "{:.3} {}",
        bytes as f64 / k.powi(exponent as i32),
        BYTE_UNITS[exponent]
    )
}

/// Render an epoch-millisecond timestamp as UTC, e.g.
/// `"2026-08-06 12:00:00 UTC"`. Out-of-range values fall back to the raw
/// number.
pub fn from_millis(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(when) => when.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => millis.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_negative_bytes() {
        assert_eq!(human_bytes(0), "0 B");
        assert_eq!(human_bytes(-5), "0 B");
    }

    #[test]
    fn byte_scaling_is_decimal() {
        assert_eq!(human_bytes(512), "512.000 B");
        assert_eq!(human_bytes(1000), "1.000 KB");
        assert_eq!(human_bytes(1_048_576), "1.049 MB");
        assert_eq!(human_bytes(3_000_000_000), "3.000 GB");
    }

    #[test]
    fn millis_render_as_utc() {
        assert_eq!(from_millis(0), "1970-01-01 00:00:00 UTC");
        assert_eq!(from_millis(1_700_000_000_000), "2023-11-14 22:13:20 UTC");
    }
}
