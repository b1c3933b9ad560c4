//! Utility functions and helpers.

pub mod log;

use std::time::Duration;

/// Render a duration as a short human string (`45s`, `3m 20s`, `2h 5m`).
pub fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3599 => format!("{}m {}s", secs / 60, secs % 60),
        _ => format!("{}h {}m", secs / 3600, (secs % 3600) / 60),
    }
}

/// Truncate text to at most `max` characters, appending an ellipsis if cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::from_secs(45)), "45s");
        assert_eq!(format_age(Duration::from_secs(200)), "3m 20s");
        assert_eq!(format_age(Duration::from_secs(7500)), "2h 5m");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Two Sum", 20), "Two Sum");
        assert_eq!(truncate("Longest Substring", 8), "Longest…");
        assert_eq!(truncate("", 3), "");
    }
}
