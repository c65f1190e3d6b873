//! Activity feed: maps each event to an icon, a color, a message and a
//! relative time. Unknown types and bad timestamps fall back to fixed values.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::snapshot::{ActivityData, ActivityEvent};
use crate::util::time;

pub const UNKNOWN_ACTIVITY: &str = "Unknown activity";
pub const UNKNOWN_TIME: &str = "Unknown time";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType { ItemReported, ClaimSubmitted, ItemReturned, ClaimVerified, ItemExpired, Unknown }

impl ActivityType {
    pub fn parse(s: &str) -> Self {
        match s {
            "item_reported" => ActivityType::ItemReported,
            "claim_submitted" => ActivityType::ClaimSubmitted,
            "item_returned" => ActivityType::ItemReturned,
            "claim_verified" => ActivityType::ClaimVerified,
            "item_expired" => ActivityType::ItemExpired,
            _ => ActivityType::Unknown,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ActivityType::ItemReported => "plus-circle",
            ActivityType::ClaimSubmitted => "hand-paper",
            ActivityType::ItemReturned => "check-circle",
            ActivityType::ClaimVerified => "user-check",
            ActivityType::ItemExpired => "clock",
            ActivityType::Unknown => "info-circle",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ActivityType::ItemReported => "primary",
            ActivityType::ClaimSubmitted => "warning",
            ActivityType::ItemReturned => "success",
            ActivityType::ClaimVerified => "info",
            ActivityType::ItemExpired => "danger",
            ActivityType::Unknown => "secondary",
        }
    }

    // Item fields are interpolated verbatim; escaping belongs to the renderer.
    pub fn message(&self, data: &ActivityData) -> String {
        match self {
            ActivityType::ItemReported => format!("New {} item reported: {}", data.item_type, data.item_title),
            ActivityType::ClaimSubmitted => format!("Claim submitted for {}", data.item_title),
            ActivityType::ItemReturned => format!("{} returned to its owner", data.item_title),
            ActivityType::ClaimVerified => format!("Claim verified for {}", data.item_title),
            ActivityType::ItemExpired => format!("{} item expired: {}", data.item_type, data.item_title),
            ActivityType::Unknown => UNKNOWN_ACTIVITY.to_string(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FormattedActivity {
    pub icon: &'static str,
    pub color: &'static str,
    pub message: String,
    pub relative_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

pub fn relative_time(timestamp: Option<&str>, now: DateTime<Utc>) -> String {
    match timestamp.and_then(time::parse_instant) {
        Some(then) => time::relative_ago(then, now),
        None => UNKNOWN_TIME.to_string(),
    }
}

pub fn attribution(data: &ActivityData) -> Option<String> {
    data.reported_by.clone().or_else(|| data.claimed_by.clone())
}

pub fn format_activity(event: &ActivityEvent, now: DateTime<Utc>) -> FormattedActivity {
    let kind = ActivityType::parse(&event.kind);
    FormattedActivity {
        icon: kind.icon(),
        color: kind.color(),
        message: kind.message(&event.data),
        relative_time: relative_time(event.timestamp.as_deref(), now),
        attribution: attribution(&event.data),
        location: event.data.location.clone(),
    }
}

/// Formats events in input order, keeping at most `limit`.
pub fn format_feed(events: &[ActivityEvent], now: DateTime<Utc>, limit: usize) -> Vec<FormattedActivity> {
    events.iter().take(limit).map(|e| format_activity(e, now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> { Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap() }

    fn event(kind: &str, ts: Option<&str>) -> ActivityEvent {
        ActivityEvent {
            kind: kind.to_string(),
            timestamp: ts.map(str::to_string),
            data: ActivityData {
                item_type: "lost".into(),
                item_title: "Blue backpack".into(),
                location: Some("Library".into()),
                reported_by: None,
                claimed_by: None,
            },
        }
    }

    #[test]
    fn every_type_maps_to_its_row() {
        let table = [
            ("item_reported", "plus-circle", "primary", "New lost item reported: Blue backpack"),
            ("claim_submitted", "hand-paper", "warning", "Claim submitted for Blue backpack"),
            ("item_returned", "check-circle", "success", "Blue backpack returned to its owner"),
            ("claim_verified", "user-check", "info", "Claim verified for Blue backpack"),
            ("item_expired", "clock", "danger", "lost item expired: Blue backpack"),
            ("something_else", "info-circle", "secondary", UNKNOWN_ACTIVITY),
        ];
        for (kind, icon, color, message) in table {
            let f = format_activity(&event(kind, None), now());
            assert_eq!((f.icon, f.color, f.message.as_str()), (icon, color, message), "type {}", kind);
        }
    }

    #[test]
    fn unknown_type_falls_back() {
        let ev = ActivityEvent { kind: "bogus".into(), ..Default::default() };
        let f = format_activity(&ev, now());
        assert_eq!(f.icon, ActivityType::Unknown.icon());
        assert_eq!(f.color, ActivityType::Unknown.color());
        assert_eq!(f.message, UNKNOWN_ACTIVITY);
        assert_eq!(f.relative_time, UNKNOWN_TIME);
        assert_eq!(f.attribution, None);
    }

    #[test]
    fn invalid_timestamp_reads_unknown_time() {
        let f = format_activity(&event("item_returned", Some("not-a-date")), now());
        assert_eq!(f.relative_time, UNKNOWN_TIME);
    }

    #[test]
    fn valid_timestamp_is_relative_to_now() {
        let ts = (now() - Duration::hours(2)).to_rfc3339();
        let f = format_activity(&event("item_returned", Some(&ts)), now());
        assert_eq!(f.relative_time, "2 hours ago");
    }

    #[test]
    fn message_keeps_markup_verbatim() {
        let mut ev = event("claim_submitted", None);
        ev.data.item_title = "<b>Keys</b>".into();
        assert_eq!(format_activity(&ev, now()).message, "Claim submitted for <b>Keys</b>");
    }

    #[test]
    fn attribution_prefers_reporter() {
        let mut ev = event("claim_submitted", None);
        ev.data.claimed_by = Some("Sam".into());
        assert_eq!(format_activity(&ev, now()).attribution.as_deref(), Some("Sam"));
        ev.data.reported_by = Some("Alex".into());
        assert_eq!(format_activity(&ev, now()).attribution.as_deref(), Some("Alex"));
    }

    #[test]
    fn feed_keeps_order_and_limit() {
        let events = vec![event("item_reported", None), event("x", None), event("item_returned", None)];
        let feed = format_feed(&events, now(), 2);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[1].message, UNKNOWN_ACTIVITY);
        assert_eq!(format_feed(&events, now(), 2), feed);
    }
}
