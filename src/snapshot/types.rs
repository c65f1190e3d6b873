use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

// Wire shapes as delivered by the API layer. Every field may be absent or null;
// the `From<Raw*>` conversions in `model` turn these into filled records.
// Timestamps stay as raw JSON values so a non-string date degrades instead of
// failing the load. Counts and list elements are read leniently for the same reason.

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMetricsSnapshot { pub overview: Option<RawOverview>, pub performance: Option<RawPerformance>, pub breakdown: Option<RawBreakdown> }

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOverview {
    #[serde(deserialize_with = "count_field")]
    pub total_items: Option<i64>,
    #[serde(deserialize_with = "count_field")]
    pub active_items: Option<i64>,
    #[serde(deserialize_with = "count_field")]
    pub claimed_items: Option<i64>,
    #[serde(deserialize_with = "count_field")]
    pub returned_items: Option<i64>,
    #[serde(deserialize_with = "count_field")]
    pub pending_claims: Option<i64>,
    pub success_rate: Option<f64>,
    #[serde(deserialize_with = "count_field")]
    pub recent_items: Option<i64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPerformance { pub avg_response_time: Option<f64>, pub min_response_time: Option<f64>, pub max_response_time: Option<f64> }

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBreakdown {
    #[serde(deserialize_with = "count_field")]
    pub lost_items: Option<i64>,
    #[serde(deserialize_with = "count_field")]
    pub found_items: Option<i64>,
    #[serde(deserialize_with = "list_field")]
    pub categories: Option<Vec<RawCategoryCount>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCategoryCount {
    pub id: Option<String>,
    #[serde(deserialize_with = "count_field")]
    pub count: Option<i64>,
    #[serde(deserialize_with = "count_field")]
    pub active: Option<i64>,
    #[serde(deserialize_with = "count_field")]
    pub returned: Option<i64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLocationAnalytics {
    #[serde(deserialize_with = "list_field")]
    pub top_categories: Option<Vec<RawTopCategory>>,
    #[serde(deserialize_with = "list_field")]
    pub peak_hours: Option<Vec<RawPeakHour>>,
    #[serde(deserialize_with = "list_field")]
    pub weekly_trends: Option<Vec<RawWeeklyTrend>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTopCategory {
    pub id: Option<String>,
    #[serde(deserialize_with = "count_field")]
    pub count: Option<i64>,
    #[serde(deserialize_with = "count_field")]
    pub recent: Option<i64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPeakHour {
    #[serde(deserialize_with = "count_field")]
    pub hour: Option<i64>,
    #[serde(deserialize_with = "count_field")]
    pub count: Option<i64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawWeeklyTrend {
    pub week_id: Option<RawWeekId>,
    #[serde(deserialize_with = "count_field")]
    pub count: Option<i64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RawWeekId {
    #[serde(deserialize_with = "count_field")]
    pub week: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAttentionSnapshot {
    pub counts: Option<RawAttentionCounts>,
    #[serde(deserialize_with = "list_field")]
    pub pending_claims: Option<Vec<RawAttentionItem>>,
    #[serde(deserialize_with = "list_field")]
    pub expired_items: Option<Vec<RawAttentionItem>>,
    #[serde(deserialize_with = "list_field")]
    pub expiring_soon: Option<Vec<RawAttentionItem>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAttentionCounts {
    #[serde(deserialize_with = "count_field")]
    pub pending_claims: Option<i64>,
    #[serde(deserialize_with = "count_field")]
    pub expired: Option<i64>,
    #[serde(deserialize_with = "count_field")]
    pub expiring_soon: Option<i64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAttentionItem { pub title: Option<String>, pub location: Option<String>, pub expiry_date: Option<Value> }

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawActivityEvent {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub timestamp: Option<Value>,
    pub data: Option<RawActivityData>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RawActivityData {
    pub item_type: Option<String>,
    pub item_title: Option<String>,
    pub location: Option<String>,
    pub reported_by: Option<RawPerson>,
    pub claimed_by: Option<RawPerson>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct RawPerson { pub name: Option<String> }

/// Whole numbers, including integer-valued floats (`5.0`) and numeric strings.
/// Anything else reads as absent.
pub fn count_value(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(|f| count_value(&Value::from(f))),
        _ => None,
    }
}

fn count_field<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(count_value))
}

/// Keeps the elements that parse and drops the rest (nulls, scalars, wrong shapes).
pub fn keep_parseable<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items.into_iter().filter_map(|v| serde_json::from_value(v).ok()).collect()
}

fn list_field<'de, D: Deserializer<'de>, T: DeserializeOwned>(d: D) -> Result<Option<Vec<T>>, D::Error> {
    Ok(Option::<Vec<Value>>::deserialize(d)?.map(keep_parseable))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_accept_whole_floats_and_numeric_strings() {
        assert_eq!(count_value(&json!(5)), Some(5));
        assert_eq!(count_value(&json!(5.0)), Some(5));
        assert_eq!(count_value(&json!("12")), Some(12));
        assert_eq!(count_value(&json!(-2.0)), Some(-2));
        assert_eq!(count_value(&json!(2.5)), None);
        assert_eq!(count_value(&json!("many")), None);
        assert_eq!(count_value(&json!(true)), None);
    }

    #[test]
    fn odd_count_reads_as_absent_instead_of_failing() {
        let raw: RawOverview = serde_json::from_value(json!({
            "totalItems": 10.0, "pendingClaims": 2.5, "activeItems": null
        })).unwrap();
        assert_eq!(raw.total_items, Some(10));
        assert_eq!(raw.pending_claims, None);
        assert_eq!(raw.active_items, None);
    }

    #[test]
    fn list_drops_bad_elements() {
        let raw: RawAttentionSnapshot = serde_json::from_value(json!({
            "pendingClaims": [{"title": "Umbrella"}, null, 7, {"title": 3}],
            "expiredItems": null
        })).unwrap();
        let titles: Vec<_> = raw.pending_claims.unwrap().into_iter().map(|i| i.title).collect();
        assert_eq!(titles, vec![Some("Umbrella".to_string())]);
        assert!(raw.expired_items.is_none());
    }
}
