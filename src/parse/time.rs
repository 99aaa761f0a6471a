//! Screen-time parsing
//!
//! Listings record screen time in three shapes, tried in this order:
//!
//! 1. `mm:ss` → `mm + ss / 60`
//! 2. `:ss` → `ss / 60`
//! 3. `mm` → `mm`
//!
//! Anything else, including `"nan"` and the empty string, is absent.
//! Parsing never fails.

use once_cell::sync::Lazy;
use regex::Regex;

static MINUTES_SECONDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d+)$").expect("valid mm:ss pattern"));
static SECONDS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:(\d+)$").expect("valid :ss pattern"));
static MINUTES_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)$").expect("valid mm pattern"));

/// Parse a raw screen-time string into minutes.
///
/// Surrounding whitespace is ignored. Returns `None` for absent or
/// unrecognized values, and for digit runs too long to stay finite.
pub fn parse_minutes(raw: &str) -> Option<f64> {
    parse_shape(raw.trim()).filter(|minutes| minutes.is_finite())
}

fn parse_shape(value: &str) -> Option<f64> {
    if let Some(caps) = MINUTES_SECONDS.captures(value) {
        let minutes: f64 = caps[1].parse().ok()?;
        let seconds: f64 = caps[2].parse().ok()?;
        return Some(minutes + seconds / 60.0);
    }

    if let Some(caps) = SECONDS_ONLY.captures(value) {
        let seconds: f64 = caps[1].parse().ok()?;
        return Some(seconds / 60.0);
    }

    if let Some(caps) = MINUTES_ONLY.captures(value) {
        return caps[1].parse().ok();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_seconds() {
        assert_eq!(parse_minutes("5:30"), Some(5.5));
        assert_eq!(parse_minutes("0:15"), Some(0.25));
        assert_eq!(parse_minutes("77:45"), Some(77.75));
    }

    #[test]
    fn test_seconds_only() {
        assert_eq!(parse_minutes(":45"), Some(0.75));
        assert_eq!(parse_minutes(":30"), Some(0.5));
    }

    #[test]
    fn test_minutes_only() {
        assert_eq!(parse_minutes("90"), Some(90.0));
        assert_eq!(parse_minutes("5"), Some(5.0));
    }

    #[test]
    fn test_absent_values() {
        assert_eq!(parse_minutes("abc"), None);
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("nan"), None);
        assert_eq!(parse_minutes("x"), None);
    }

    #[test]
    fn test_malformed_values_are_absent() {
        // Trailing colon, stray suffixes and negatives never match a shape
        assert_eq!(parse_minutes("5:"), None);
        assert_eq!(parse_minutes("55:"), None);
        assert_eq!(parse_minutes("5:30abc"), None);
        assert_eq!(parse_minutes("-5"), None);
        assert_eq!(parse_minutes("1:2:3"), None);
    }

    #[test]
    fn test_overflowing_digits_are_absent() {
        let huge = "9".repeat(400);
        assert_eq!(parse_minutes(&huge), None);
        assert_eq!(parse_minutes(&format!("{huge}:30")), None);
        assert_eq!(parse_minutes(&format!(":{huge}")), None);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(parse_minutes(" 5:30 "), Some(5.5));
        assert_eq!(parse_minutes("\t:45\n"), Some(0.75));
    }
}
