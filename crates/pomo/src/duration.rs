//! Human-readable durations
//!
//! Parses strings such as "25m", "1h30m" or "90s" and formats durations
//! back into the same compact notation.

use std::time::Duration;

use crate::config::{ConfigError, MAX_DURATION};

/// Parse a duration string like "25m", "1h30m", "90s".
///
/// A bare number, or a trailing number without unit, counts as minutes.
/// Anything longer than [`MAX_DURATION`] is rejected.
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let input = s.trim().to_lowercase();
    if input.is_empty() {
        return Err(ConfigError::EmptyDuration);
    }

    let invalid = || ConfigError::InvalidDuration(s.to_string());

    let mut total_seconds: u64 = 0;
    let mut current_num = String::new();

    for c in input.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
            continue;
        }

        if current_num.is_empty() {
            return Err(invalid());
        }
        let num: u64 = current_num.parse().map_err(|_| invalid())?;
        current_num.clear();

        let unit = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(invalid()),
        };
        total_seconds = num
            .checked_mul(unit)
            .and_then(|secs| total_seconds.checked_add(secs))
            .ok_or_else(invalid)?;
    }

    if !current_num.is_empty() {
        let num: u64 = current_num.parse().map_err(|_| invalid())?;
        total_seconds = num
            .checked_mul(60)
            .and_then(|secs| total_seconds.checked_add(secs))
            .ok_or_else(invalid)?;
    }

    if total_seconds == 0 {
        return Err(ConfigError::ZeroDuration(s.to_string()));
    }

    let duration = Duration::from_secs(total_seconds);
    if duration > MAX_DURATION {
        return Err(ConfigError::DurationTooLong(s.to_string()));
    }

    Ok(duration)
}

/// Format a duration as "1h30m", "25m", "1m30s" or "45s".
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if seconds > 0 || out.is_empty() {
        out.push_str(&format!("{seconds}s"));
    }
    out
}

/// Format a duration as MM:SS, hours folded into minutes.
pub fn format_mmss(d: Duration) -> String {
    let total = d.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mins(m: u64) -> Duration {
        Duration::from_secs(m * 60)
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_duration("25m").unwrap(), mins(25));
        assert_eq!(parse_duration("25").unwrap(), mins(25));
        assert_eq!(parse_duration(" 5M ").unwrap(), mins(5));
    }

    #[test]
    fn test_parse_compound() {
        assert_eq!(parse_duration("1h30m").unwrap(), mins(90));
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("1h30").unwrap(), mins(90));
        assert_eq!(parse_duration("90s").unwrap(), Duration::from_secs(90));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_duration(""), Err(ConfigError::EmptyDuration));
        assert!(matches!(parse_duration("abc"), Err(ConfigError::InvalidDuration(_))));
        assert!(matches!(parse_duration("10x"), Err(ConfigError::InvalidDuration(_))));
        assert!(matches!(parse_duration("-5m"), Err(ConfigError::InvalidDuration(_))));
        assert!(matches!(parse_duration("m"), Err(ConfigError::InvalidDuration(_))));
        assert!(matches!(
            parse_duration("99999999999999999999h"),
            Err(ConfigError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_parse_zero_rejected() {
        assert_eq!(parse_duration("0m"), Err(ConfigError::ZeroDuration("0m".to_string())));
        assert!(matches!(parse_duration("0h0s"), Err(ConfigError::ZeroDuration(_))));
    }

    #[test]
    fn test_parse_too_long_rejected() {
        assert_eq!(parse_duration("24h").unwrap(), MAX_DURATION);
        assert_eq!(
            parse_duration("24h1s"),
            Err(ConfigError::DurationTooLong("24h1s".to_string()))
        );
        assert!(matches!(
            parse_duration("18446744073709551615s"),
            Err(ConfigError::DurationTooLong(_))
        ));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(mins(25)), "25m");
        assert_eq!(format_duration(mins(90)), "1h30m");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h");
        assert_eq!(format_duration(Duration::ZERO), "0s");
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(mins(25)), "25:00");
        assert_eq!(format_mmss(Duration::from_secs(90)), "01:30");
        assert_eq!(format_mmss(Duration::ZERO), "00:00");
    }
}
