// src/utilities/formatters.rs
//
// Text helpers for the dashboard panels.

use regex::Regex;
use std::sync::OnceLock;

static TRAIN_NUMBER: OnceLock<Option<Regex>> = OnceLock::new();

pub fn format_delay(delay_minutes: u32) -> String {
    match delay_minutes {
        0 => "On Time".to_string(),
        m if m < 60 => format!("{} min late", m),
        m => {
            let (hours, minutes) = (m / 60, m % 60);
            if minutes == 0 {
                format!("{}h late", hours)
            } else {
                format!("{}h {}m late", hours, minutes)
            }
        }
    }
}

pub fn format_time_until(minutes: i64) -> String {
    if minutes <= 0 {
        return "Now".to_string();
    }
    if minutes == 1 {
        return "1 minute".to_string();
    }
    if minutes < 60 {
        return format!("{} minutes", minutes);
    }

    let (hours, remaining) = (minutes / 60, minutes % 60);
    if remaining == 0 {
        format!("{} hour{}", hours, if hours > 1 { "s" } else { "" })
    } else {
        format!("{}h {}m", hours, remaining)
    }
}

pub fn priority_text(priority: u8) -> &'static str {
    match priority {
        1 => "Low",
        2 => "Medium",
        3 => "High",
        4 => "Very High",
        5 => "Critical",
        _ => "Unknown",
    }
}

pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// Formats a change with an explicit sign for gains, e.g. "+12%".
pub fn format_signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{}%", trim_number(value))
    } else {
        format!("{}%", trim_number(value))
    }
}

/// Prints whole numbers without a trailing ".0".
pub fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// "track_conflict" -> "TRACK CONFLICT". Only the first underscore is replaced.
pub fn conflict_title(kind: &str) -> String {
    kind.replacen('_', " ", 1).to_uppercase()
}

/// Pulls a 4 or 5 digit train number out of a display name.
pub fn parse_train_number(train_name: &str) -> Option<String> {
    let re = TRAIN_NUMBER
        .get_or_init(|| Regex::new(r"\b(\d{4,5})\b").ok())
        .as_ref()?;
    re.captures(train_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_delay() {
        assert_eq!(format_delay(0), "On Time");
        assert_eq!(format_delay(12), "12 min late");
        assert_eq!(format_delay(120), "2h late");
        assert_eq!(format_delay(75), "1h 15m late");
    }

    #[test]
    fn test_format_time_until() {
        assert_eq!(format_time_until(-3), "Now");
        assert_eq!(format_time_until(1), "1 minute");
        assert_eq!(format_time_until(45), "45 minutes");
        assert_eq!(format_time_until(60), "1 hour");
        assert_eq!(format_time_until(180), "3 hours");
        assert_eq!(format_time_until(95), "1h 35m");
    }

    #[test]
    fn test_priority_text() {
        assert_eq!(priority_text(1), "Low");
        assert_eq!(priority_text(5), "Critical");
        assert_eq!(priority_text(9), "Unknown");
    }

    #[test]
    fn test_percentages() {
        assert_eq!(format_percentage(87.456, 1), "87.5%");
        assert_eq!(format_signed_percent(12.0), "+12%");
        assert_eq!(format_signed_percent(-4.0), "-4%");
        assert_eq!(format_signed_percent(0.0), "0%");
        assert_eq!(format_signed_percent(2.5), "+2.5%");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("Rajdhani Express to Mumbai", 12), "Rajdhani ...");
    }

    #[test]
    fn test_conflict_title() {
        assert_eq!(conflict_title("track_conflict"), "TRACK CONFLICT");
        assert_eq!(conflict_title("platform_double_booking"), "PLATFORM DOUBLE_BOOKING");
    }

    #[test]
    fn test_parse_train_number() {
        assert_eq!(parse_train_number("12951 Rajdhani Express"), Some("12951".to_string()));
        assert_eq!(parse_train_number("Vande Bharat 2201"), Some("2201".to_string()));
        assert_eq!(parse_train_number("Shatabdi Express"), None);
        assert_eq!(parse_train_number("Route 123456"), None);
    }
}
