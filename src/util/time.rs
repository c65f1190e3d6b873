use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

// Parse an API timestamp: RFC3339, "YYYY-MM-DDTHH:MM:SS[.fff]" (read as UTC),
// or "YYYY-MM-DD". Returns None if unparseable.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc));
    }
    if let Ok(nd) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = nd.and_hms_opt(0, 0, 0) {
            return Some(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc));
        }
    }
    None
}

// "N units ago" between `then` and `now`. Instants in the future read as "just now".
pub fn relative_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 60 { return "just now".to_string(); }
    let (n, unit) = match secs {
        s if s < 3_600 => (s / 60, "minute"),
        s if s < 86_400 => (s / 3_600, "hour"),
        s if s < 30 * 86_400 => (s / 86_400, "day"),
        s if s < 365 * 86_400 => (s / (30 * 86_400), "month"),
        s => (s / (365 * 86_400), "year"),
    };
    if n == 1 { format!("1 {} ago", unit) } else { format!("{} {}s ago", n, unit) }
}

// Calendar date for display, e.g. "3/14/2025".
pub fn display_date(dt: DateTime<Utc>) -> String {
    dt.format("%-m/%-d/%Y").to_string()
}
