use crate::activity::FormattedActivity;
use crate::insights::InsightSet;
use crate::metrics::{MetricsSummary, WeekTrend};
use crate::recommend::Recommendation;
use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::dashboard::Dashboard;
use crate::triage::TriageView;

use super::view::DashboardView;

pub fn summary(log: &LogCtx<Dashboard>, s: &MetricsSummary) {
    let o = &s.overview;
    log.info("📊 Overview:");
    log.info(format!(
        "  total={} active={} claimed={} returned={} recent={}",
        o.total_items, o.active_items, o.claimed_items, o.returned_items, o.recent_items
    ));
    let pending = o.pending_claims.map(|n| n.to_string()).unwrap_or_else(|| "n/a".to_string());
    log.info(format!("  success_rate={}% pending_claims={}", o.success_rate, pending));
    log.info(format!(
        "  response days: avg={:.1} min={:.1} max={:.1}",
        s.response.avg_days, s.response.min_days, s.response.max_days
    ));
    log.info(format!("  lost={} found={}", s.lost_items, s.found_items));
    for c in &s.categories {
        log.info(format!("  {:14} {:>5} ({:.1}%)  returned {:.1}%", c.id, c.count, c.share_pct, c.return_pct));
    }
}

pub fn insights(log: &LogCtx<Dashboard>, set: &InsightSet) {
    log.info("💡 Insights:");
    for i in set.ordered() {
        log.info(format!("  [{}] {}", i.kind.label(), i.message));
    }
}

pub fn recommendations(log: &LogCtx<Dashboard>, recs: &[Recommendation]) {
    log.info("🧭 Recommendations:");
    for (n, r) in recs.iter().enumerate() {
        log.info(format!("  {}. {}", n + 1, r.message));
    }
}

pub fn weekly(log: &LogCtx<Dashboard>, series: &[WeekTrend]) {
    if series.is_empty() { return; }
    log.info("📈 Weekly trends:");
    for w in series {
        log.info(format!("  week {:>2}  lost={} found={}", w.week, w.lost, w.found));
    }
}

pub fn triage(log: &LogCtx<Dashboard>, view: &TriageView) {
    if view.is_clear() {
        log.info("✅ Nothing needs attention");
        return;
    }
    log.info(format!("🚩 Needs attention: {}", view.total_count));
    log.info(format!("  Pending claims ({}):", view.pending_claims.count));
    for c in &view.pending_claims.items {
        log.info(format!("    - {} @ {}", c.title, c.location));
    }
    if view.pending_claims.has_overflow { log.info("    ..."); }
    for (label, p) in [("Expired", &view.expired), ("Expiring soon", &view.expiring_soon)] {
        log.info(format!("  {} ({}):", label, p.count));
        for e in &p.items {
            match &e.expiry_display {
                Some(d) => log.info(format!("    - {} @ {} ({})", e.title, e.location, d)),
                None => log.info(format!("    - {} @ {}", e.title, e.location)),
            }
        }
        if p.has_overflow { log.info("    ..."); }
    }
}

pub fn activity(log: &LogCtx<Dashboard>, feed: &[FormattedActivity]) {
    log.info("🕒 Recent activity:");
    if feed.is_empty() {
        log.info("  (none)");
        return;
    }
    for a in feed {
        let by = a.attribution.as_deref().map(|n| format!(" by {}", n)).unwrap_or_default();
        log.info(format!("  [{}:{}] {}{} — {}", a.icon, a.color, a.message, by, a.relative_time));
    }
}

pub fn dashboard(log: &LogCtx<Dashboard>, view: &DashboardView) {
    if let Some(s) = &view.summary { summary(log, s); }
    if let Some(i) = &view.insights { insights(log, i); }
    if let Some(r) = &view.recommendations { recommendations(log, r); }
    if let Some(w) = &view.weekly { weekly(log, w); }
    if let Some(t) = &view.triage { triage(log, t); }
    if let Some(a) = &view.activity { activity(log, a); }
}
