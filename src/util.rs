use chrono::{DateTime, SecondsFormat, Utc};

/// RFC 3339 at second precision with a `Z` suffix, e.g. `2024-05-01T09:30:00Z`.
pub fn format_iso(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn current_iso_time() -> String {
    format_iso(Utc::now())
}

/// Any environment name containing "dev" (dev, development, dev-eu, ...).
pub fn is_dev_mode(environment: &str) -> bool {
    environment.contains("dev")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_utc_with_z_suffix() {
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(format_iso(time), "2024-05-01T09:30:00Z");
    }

    #[test]
    fn current_time_parses_back() {
        let now = current_iso_time();
        assert!(DateTime::parse_from_rfc3339(&now).is_ok());
        assert!(now.ends_with('Z'));
    }

    #[test]
    fn dev_mode_detection() {
        assert!(is_dev_mode("dev"));
        assert!(is_dev_mode("development"));
        assert!(!is_dev_mode("prod"));
        assert!(!is_dev_mode(""));
    }
}
