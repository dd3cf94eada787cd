//! Date helper functions
//!
//! Every date in the site is normalised to UTC. Day keys, year grouping and
//! calendar cells all derive from the UTC calendar date, never local time.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Canonical `YYYY-MM-DD` key for the UTC calendar day of `date`
pub fn date_key(date: &DateTime<Utc>) -> String {
    day_key(&date.date_naive())
}

/// `YYYY-MM-DD` for a calendar date
pub fn day_key(date: &NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parse a `YYYY-MM-DD` key back into a date
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d").ok()
}

/// Format as ISO 8601 with millisecond precision and a `Z` suffix
///
/// This is the shape written into the `date` field of synced posts.
pub fn iso_string(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a front-matter date string in various formats
///
/// Values with an offset are converted to UTC; naive values are taken as UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Try RFC 3339 / ISO 8601 first, it is what the sync commands write
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let offset_formats = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%z"];
    for fmt in offset_formats {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in naive_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    // RSS-style dates sometimes end up in hand-written posts too
    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a feed publish date (`pubDate` is RFC 2822, Atom and JSON APIs use RFC 3339)
pub fn parse_feed_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    parse_date_string(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_key_uses_utc_day() {
        // 23:30 at -05:00 is already the next day in UTC
        let dt = DateTime::parse_from_rfc3339("2024-03-09T23:30:00-05:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(date_key(&dt), "2024-03-10");
    }

    #[test]
    fn test_day_key_pads() {
        let d = NaiveDate::from_ymd_opt(987, 1, 5).unwrap();
        assert_eq!(day_key(&d), "0987-01-05");
        assert_eq!(parse_day_key("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_day_key("2023-02-29"), None);
    }

    #[test]
    fn test_iso_string() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(iso_string(&dt), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(parse_date_string("2024-01-15T10:30:00.000Z"), Some(expected));
        assert_eq!(parse_date_string("2024-01-15 10:30:00"), Some(expected));
        assert_eq!(parse_date_string("2024/01/15 10:30"), Some(expected));
        assert_eq!(
            parse_date_string("2024-01-15"),
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_date_string("not a date"), None);
        assert_eq!(parse_date_string("  "), None);
    }

    #[test]
    fn test_parse_feed_date() {
        let dt = parse_feed_date("Tue, 05 Mar 2024 18:00:00 +0000").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 5, 18, 0, 0).unwrap());

        let dt = parse_feed_date("2024-03-05T18:00:00Z").unwrap();
        assert_eq!(date_key(&dt), "2024-03-05");
    }
}
