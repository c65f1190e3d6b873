use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::activity::{self, FormattedActivity};
use crate::insights::{self, InsightSet};
use crate::metrics::{self, MetricsSummary, WeekTrend};
use crate::recommend::{self, Recommendation};
use crate::snapshot::load;
use crate::snapshot::{ActivityEvent, AttentionSnapshot, LocationAnalytics, MetricsSnapshot};
use crate::triage::{self, TriageView};

use super::SourceArgs;

/// Whatever snapshots are currently on hand. Each one refreshes on its own
/// schedule, so any subset may be present and they need not be from the same moment.
#[derive(Debug, Clone, Default)]
pub struct DashboardInputs {
    pub stats: Option<MetricsSnapshot>,
    pub analytics: Option<LocationAnalytics>,
    pub attention: Option<AttentionSnapshot>,
    pub activity: Option<Vec<ActivityEvent>>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DashboardView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<MetricsSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<InsightSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Recommendation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly: Option<Vec<WeekTrend>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triage: Option<TriageView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<Vec<FormattedActivity>>,
}

pub fn load_inputs(sources: &SourceArgs) -> Result<DashboardInputs> {
    Ok(DashboardInputs {
        stats: sources.stats.as_deref().map(load::load_metrics).transpose()?,
        analytics: sources.analytics.as_deref().map(load::load_analytics).transpose()?,
        attention: sources.attention.as_deref().map(load::load_attention).transpose()?,
        activity: sources.activity.as_deref().map(load::load_activity).transpose()?,
    })
}

pub fn build_dashboard(inputs: &DashboardInputs, now: DateTime<Utc>, activity_limit: usize) -> DashboardView {
    // Recommendations only need analytics; without stats the response time reads as 0.
    let fallback = MetricsSnapshot::default();
    let stats_or_default = inputs.stats.as_ref().unwrap_or(&fallback);
    DashboardView {
        summary: inputs.stats.as_ref().map(metrics::summarize_metrics),
        insights: inputs.stats.as_ref().map(insights::derive_insights),
        recommendations: inputs.analytics.as_ref().map(|a| recommend::derive_recommendations(a, stats_or_default)),
        weekly: inputs.analytics.as_ref().map(metrics::weekly_series),
        triage: inputs.attention.as_ref().map(triage::derive_triage_view),
        activity: inputs.activity.as_ref().map(|events| activity::format_feed(events, now, activity_limit)),
    }
}
