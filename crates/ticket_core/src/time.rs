use chrono::{DateTime, Utc};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Human-readable UTC timestamp; anything unparseable is passed through untouched.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => format_datetime(&dt),
        None => raw.to_string(),
    }
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_normalized_to_utc() {
        assert_eq!(
            format_timestamp("2023-01-01T19:05:00+09:00"),
            "2023-01-01 10:05:00 UTC"
        );
    }

    #[test]
    fn malformed_values_fall_back_to_raw() {
        assert_eq!(format_timestamp("yesterday-ish"), "yesterday-ish");
        assert_eq!(format_timestamp(""), "");
    }
}
