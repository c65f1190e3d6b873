use serde::Serialize;
use serde_json::Value;

use super::types::*;

// Filled records. Produced once per snapshot by the `From<Raw*>` conversions below, read by every rule.

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot { pub overview: Overview, pub performance: Performance, pub breakdown: Breakdown }

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Overview {
    pub total_items: u64,
    pub active_items: u64,
    pub claimed_items: u64,
    pub returned_items: u64,
    /// `None` means the count is unknown, which is not the same as zero.
    pub pending_claims: Option<u64>,
    pub success_rate: f64,
    pub recent_items: u64,
}

/// Response times in days.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Performance { pub avg_response_time: f64, pub min_response_time: f64, pub max_response_time: f64 }

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Breakdown { pub lost_items: u64, pub found_items: u64, pub categories: Vec<CategoryCount> }

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct CategoryCount { pub id: String, pub count: u64, pub active: u64, pub returned: u64 }

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct LocationAnalytics { pub top_categories: Vec<TopCategory>, pub peak_hours: Vec<PeakHour>, pub weekly_trends: Vec<WeeklyTrend> }

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct TopCategory { pub id: String, pub count: u64, pub recent: u64 }

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct PeakHour { pub hour: i64, pub count: u64 }

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WeeklyTrend { pub week: i64, pub kind: ItemType, pub count: u64 }

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemType { Lost, Found, Other(String) }

impl ItemType {
    pub fn parse(s: &str) -> Self {
        match s {
            "lost" => ItemType::Lost,
            "found" => ItemType::Found,
            other => ItemType::Other(other.to_string()),
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct AttentionSnapshot {
    pub counts: AttentionCounts,
    pub pending_claims: Vec<AttentionItem>,
    pub expired_items: Vec<AttentionItem>,
    pub expiring_soon: Vec<AttentionItem>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct AttentionCounts { pub pending_claims: u64, pub expired: u64, pub expiring_soon: u64 }

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct AttentionItem { pub title: String, pub location: String, pub expiry_date: Option<String> }

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ActivityEvent { pub kind: String, pub timestamp: Option<String>, pub data: ActivityData }

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ActivityData {
    pub item_type: String,
    pub item_title: String,
    pub location: Option<String>,
    pub reported_by: Option<String>,
    pub claimed_by: Option<String>,
}

// ---- normalization -------------------------------------------------------

fn count(v: Option<i64>) -> u64 { v.unwrap_or(0).max(0) as u64 }

fn value_text(v: Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn person_name(p: Option<RawPerson>) -> Option<String> {
    p.and_then(|p| p.name).filter(|n| !n.is_empty())
}

impl From<RawMetricsSnapshot> for MetricsSnapshot {
    fn from(raw: RawMetricsSnapshot) -> Self {
        let o = raw.overview.unwrap_or_default();
        let p = raw.performance.unwrap_or_default();
        let b = raw.breakdown.unwrap_or_default();
        MetricsSnapshot {
            overview: Overview {
                total_items: count(o.total_items),
                active_items: count(o.active_items),
                claimed_items: count(o.claimed_items),
                returned_items: count(o.returned_items),
                pending_claims: o.pending_claims.map(|n| n.max(0) as u64),
                success_rate: o.success_rate.unwrap_or(0.0),
                recent_items: count(o.recent_items),
            },
            performance: Performance {
                avg_response_time: p.avg_response_time.unwrap_or(0.0),
                min_response_time: p.min_response_time.unwrap_or(0.0),
                max_response_time: p.max_response_time.unwrap_or(0.0),
            },
            breakdown: Breakdown {
                lost_items: count(b.lost_items),
                found_items: count(b.found_items),
                categories: b
                    .categories
                    .unwrap_or_default()
                    .into_iter()
                    .map(|c| CategoryCount {
                        id: c.id.unwrap_or_default(),
                        count: count(c.count),
                        active: count(c.active),
                        returned: count(c.returned),
                    })
                    .collect(),
            },
        }
    }
}

impl From<RawLocationAnalytics> for LocationAnalytics {
    fn from(raw: RawLocationAnalytics) -> Self {
        let top_categories = raw
            .top_categories
            .unwrap_or_default()
            .into_iter()
            .map(|c| TopCategory { id: c.id.unwrap_or_default(), count: count(c.count), recent: count(c.recent) })
            .collect();
        let peak_hours = raw
            .peak_hours
            .unwrap_or_default()
            .into_iter()
            .map(|h| PeakHour { hour: h.hour.unwrap_or(0), count: count(h.count) })
            .collect();
        let weekly_trends = raw
            .weekly_trends
            .unwrap_or_default()
            .into_iter()
            .map(|t| {
                let id = t.week_id.unwrap_or_default();
                WeeklyTrend {
                    week: id.week.unwrap_or(0),
                    kind: ItemType::parse(id.kind.as_deref().unwrap_or("")),
                    count: count(t.count),
                }
            })
            .collect();
        LocationAnalytics { top_categories, peak_hours, weekly_trends }
    }
}

impl From<RawAttentionItem> for AttentionItem {
    fn from(raw: RawAttentionItem) -> Self {
        AttentionItem {
            title: raw.title.unwrap_or_default(),
            location: raw.location.unwrap_or_default(),
            expiry_date: raw.expiry_date.and_then(value_text),
        }
    }
}

impl From<RawAttentionSnapshot> for AttentionSnapshot {
    fn from(raw: RawAttentionSnapshot) -> Self {
        let c = raw.counts.unwrap_or_default();
        let items = |v: Option<Vec<RawAttentionItem>>| -> Vec<AttentionItem> {
            v.unwrap_or_default().into_iter().map(AttentionItem::from).collect()
        };
        AttentionSnapshot {
            counts: AttentionCounts {
                pending_claims: count(c.pending_claims),
                expired: count(c.expired),
                expiring_soon: count(c.expiring_soon),
            },
            pending_claims: items(raw.pending_claims),
            expired_items: items(raw.expired_items),
            expiring_soon: items(raw.expiring_soon),
        }
    }
}

impl From<RawActivityEvent> for ActivityEvent {
    fn from(raw: RawActivityEvent) -> Self {
        let d = raw.data.unwrap_or_default();
        ActivityEvent {
            kind: raw.kind.unwrap_or_default(),
            timestamp: raw.timestamp.and_then(value_text),
            data: ActivityData {
                item_type: d.item_type.unwrap_or_default(),
                item_title: d.item_title.unwrap_or_default(),
                location: d.location,
                reported_by: person_name(d.reported_by),
                claimed_by: person_name(d.claimed_by),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(json: &str) -> MetricsSnapshot {
        let raw: RawMetricsSnapshot = serde_json::from_str(json).unwrap();
        raw.into()
    }

    #[test]
    fn pending_claims_keeps_three_states() {
        assert_eq!(metrics(r#"{"overview":{"pendingClaims":0}}"#).overview.pending_claims, Some(0));
        assert_eq!(metrics(r#"{"overview":{"pendingClaims":5}}"#).overview.pending_claims, Some(5));
        assert_eq!(metrics(r#"{"overview":{"pendingClaims":null}}"#).overview.pending_claims, None);
        assert_eq!(metrics(r#"{"overview":{}}"#).overview.pending_claims, None);
        assert_eq!(metrics("{}").overview.pending_claims, None);
    }

    #[test]
    fn missing_sections_default_to_zero() {
        let m = metrics("{}");
        assert_eq!(m.overview.total_items, 0);
        assert_eq!(m.overview.success_rate, 0.0);
        assert_eq!(m.performance.avg_response_time, 0.0);
        assert!(m.breakdown.categories.is_empty());
    }

    #[test]
    fn negative_counts_clamp_to_zero() {
        let m = metrics(r#"{"overview":{"totalItems":-4,"pendingClaims":-1}}"#);
        assert_eq!(m.overview.total_items, 0);
        assert_eq!(m.overview.pending_claims, Some(0));
    }

    #[test]
    fn attention_lists_default_empty_and_keep_odd_dates() {
        let raw: RawAttentionSnapshot = serde_json::from_str(
            r#"{"counts":{"expired":2},"expiredItems":[{"title":"Umbrella","expiryDate":12345},{"title":"Scarf"}]}"#,
        )
        .unwrap();
        let a = AttentionSnapshot::from(raw);
        assert_eq!(a.counts.expired, 2);
        assert_eq!(a.counts.pending_claims, 0);
        assert!(a.pending_claims.is_empty());
        assert_eq!(a.expired_items[0].expiry_date.as_deref(), Some("12345"));
        assert_eq!(a.expired_items[1].expiry_date, None);
        assert_eq!(a.expired_items[1].location, "");
    }

    #[test]
    fn activity_names_skip_empty_values() {
        let raw: RawActivityEvent = serde_json::from_str(
            r#"{"type":"claim_submitted","data":{"reportedBy":{"name":""},"claimedBy":{"name":"Dana"}}}"#,
        )
        .unwrap();
        let ev = ActivityEvent::from(raw);
        assert_eq!(ev.kind, "claim_submitted");
        assert_eq!(ev.data.reported_by, None);
        assert_eq!(ev.data.claimed_by.as_deref(), Some("Dana"));
        assert_eq!(ev.timestamp, None);
    }

    #[test]
    fn weekly_trend_types_parse() {
        let raw: RawLocationAnalytics = serde_json::from_str(
            r#"{"weeklyTrends":[{"weekId":{"week":3,"type":"lost"},"count":4},{"weekId":{"week":3,"type":"misc"},"count":1}]}"#,
        )
        .unwrap();
        let a = LocationAnalytics::from(raw);
        assert_eq!(a.weekly_trends[0].kind, ItemType::Lost);
        assert_eq!(a.weekly_trends[1].kind, ItemType::Other("misc".into()));
        assert!(a.peak_hours.is_empty());
    }
}
