use serde::Serialize;
use std::collections::BTreeMap;

use crate::snapshot::{ItemType, LocationAnalytics, MetricsSnapshot};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OverviewCards {
    pub total_items: u64,
    pub active_items: u64,
    pub claimed_items: u64,
    pub returned_items: u64,
    pub recent_items: u64,
    pub success_rate: f64,
    pub pending_claims: Option<u64>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResponseBand { pub avg_days: f64, pub min_days: f64, pub max_days: f64 }

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CategoryRow { pub id: String, pub count: u64, pub active: u64, pub returned: u64, pub share_pct: f64, pub return_pct: f64 }

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub overview: OverviewCards,
    pub response: ResponseBand,
    pub lost_items: u64,
    pub found_items: u64,
    pub categories: Vec<CategoryRow>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct WeekTrend { pub week: i64, pub lost: u64, pub found: u64 }

fn pct(part: u64, whole: u64) -> f64 {
    if whole == 0 { return 0.0; }
    part as f64 / whole as f64 * 100.0
}

pub fn summarize_metrics(snapshot: &MetricsSnapshot) -> MetricsSummary {
    let o = &snapshot.overview;
    let p = &snapshot.performance;
    let b = &snapshot.breakdown;
    let total: u64 = b.categories.iter().map(|c| c.count).fold(0, u64::saturating_add);
    let categories = b
        .categories
        .iter()
        .map(|c| CategoryRow {
            id: c.id.clone(),
            count: c.count,
            active: c.active,
            returned: c.returned,
            share_pct: pct(c.count, total),
            return_pct: pct(c.returned, c.count),
        })
        .collect();
    MetricsSummary {
        overview: OverviewCards {
            total_items: o.total_items,
            active_items: o.active_items,
            claimed_items: o.claimed_items,
            returned_items: o.returned_items,
            recent_items: o.recent_items,
            success_rate: o.success_rate,
            pending_claims: o.pending_claims,
        },
        response: ResponseBand { avg_days: p.avg_response_time, min_days: p.min_response_time, max_days: p.max_response_time },
        lost_items: b.lost_items,
        found_items: b.found_items,
        categories,
    }
}

/// Pivot weekly trend entries into one lost/found row per week, ascending.
pub fn weekly_series(analytics: &LocationAnalytics) -> Vec<WeekTrend> {
    let mut by_week: BTreeMap<i64, WeekTrend> = BTreeMap::new();
    for t in &analytics.weekly_trends {
        if let ItemType::Other(_) = t.kind { continue; }
        let row = by_week.entry(t.week).or_insert_with(|| WeekTrend { week: t.week, ..Default::default() });
        if t.kind == ItemType::Lost { row.lost = row.lost.saturating_add(t.count); } else { row.found = row.found.saturating_add(t.count); }
    }
    by_week.into_values().collect()
}
