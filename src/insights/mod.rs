//! Threshold rules over a metrics snapshot.
//!
//! Three rules run on every call, always in the same order: success rate,
//! response time, pending claims. Each result is stored in its own field so
//! consumers never depend on a position in a list.

use serde::Serialize;

use crate::snapshot::MetricsSnapshot;

pub mod thresholds;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind { Success, Warning, Danger, Info }

impl InsightKind {
    pub fn label(&self) -> &'static str {
        match self {
            InsightKind::Success => "success",
            InsightKind::Warning => "warning",
            InsightKind::Danger => "danger",
            InsightKind::Info => "info",
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InsightRule { SuccessRate, ResponseTime, PendingClaims }

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Insight {
    pub rule: InsightRule,
    pub kind: InsightKind,
    pub message: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct InsightSet {
    pub success_rate: Insight,
    pub response_time: Insight,
    pub pending_claims: Insight,
}

impl InsightSet {
    /// Rule order: success rate, response time, pending claims.
    pub fn ordered(&self) -> [&Insight; 3] {
        [&self.success_rate, &self.response_time, &self.pending_claims]
    }
}

pub const PENDING_UNKNOWN_MESSAGE: &str = "Pending claims data not available.";

pub fn derive_insights(snapshot: &MetricsSnapshot) -> InsightSet {
    InsightSet {
        success_rate: success_rate_insight(snapshot.overview.success_rate),
        response_time: response_time_insight(snapshot.performance.avg_response_time),
        pending_claims: pending_claims_insight(snapshot.overview.pending_claims),
    }
}

fn success_rate_insight(rate: f64) -> Insight {
    let (kind, message) = if rate > thresholds::SUCCESS_RATE_GOOD {
        (InsightKind::Success, format!("Excellent success rate of {}%! Items are reliably reaching their owners.", rate))
    } else if rate > thresholds::SUCCESS_RATE_FAIR {
        (InsightKind::Warning, format!("Success rate of {}% has room to improve. Review how found items are matched to reports.", rate))
    } else {
        (InsightKind::Danger, format!("Low success rate of {}%. Item matching needs immediate attention.", rate))
    };
    Insight { rule: InsightRule::SuccessRate, kind, message }
}

fn response_time_insight(days: f64) -> Insight {
    let (kind, message) = if days < thresholds::RESPONSE_FAST_DAYS {
        (InsightKind::Success, format!("Fast average response time of {:.1} days.", days))
    } else if days < thresholds::RESPONSE_SLOW_DAYS {
        (InsightKind::Warning, format!("Average response time of {:.1} days is moderate. Aim for under {} days.", days, thresholds::RESPONSE_FAST_DAYS))
    } else {
        (InsightKind::Danger, format!("Slow average response time of {:.1} days. Claims are waiting too long.", days))
    };
    Insight { rule: InsightRule::ResponseTime, kind, message }
}

// Unknown (None) must not collapse into the zero case.
fn pending_claims_insight(pending: Option<u64>) -> Insight {
    let (kind, message) = match pending {
        Some(0) => (InsightKind::Success, "All claims have been processed.".to_string()),
        Some(n) => (InsightKind::Info, format!("{} pending claims awaiting review.", n)),
        None => (InsightKind::Info, PENDING_UNKNOWN_MESSAGE.to_string()),
    };
    Insight { rule: InsightRule::PendingClaims, kind, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(rate: f64, avg: f64, pending: Option<u64>) -> MetricsSnapshot {
        let mut s = MetricsSnapshot::default();
        s.overview.success_rate = rate;
        s.performance.avg_response_time = avg;
        s.overview.pending_claims = pending;
        s
    }

    #[test]
    fn success_rate_boundaries() {
        let kind = |r: f64| derive_insights(&snapshot(r, 0.0, Some(0))).success_rate.kind;
        assert_eq!(kind(100.0), InsightKind::Success);
        assert_eq!(kind(70.01), InsightKind::Success);
        assert_eq!(kind(70.0), InsightKind::Warning);
        assert_eq!(kind(40.01), InsightKind::Warning);
        assert_eq!(kind(40.0), InsightKind::Danger);
        assert_eq!(kind(0.0), InsightKind::Danger);
    }

    #[test]
    fn success_message_carries_literal_rate() {
        let set = derive_insights(&snapshot(85.5, 0.0, Some(0)));
        assert!(set.success_rate.message.contains("85.5%"));
        let set = derive_insights(&snapshot(90.0, 0.0, Some(0)));
        assert!(set.success_rate.message.contains("90%"));
    }

    #[test]
    fn response_time_boundaries() {
        let kind = |d: f64| derive_insights(&snapshot(0.0, d, Some(0))).response_time.kind;
        assert_eq!(kind(0.0), InsightKind::Success);
        assert_eq!(kind(2.99), InsightKind::Success);
        assert_eq!(kind(3.0), InsightKind::Warning);
        assert_eq!(kind(6.9), InsightKind::Warning);
        assert_eq!(kind(7.0), InsightKind::Danger);
        assert_eq!(kind(12.0), InsightKind::Danger);
    }

    #[test]
    fn pending_claims_three_way() {
        let zero = derive_insights(&snapshot(0.0, 0.0, Some(0))).pending_claims;
        assert_eq!(zero.kind, InsightKind::Success);

        let five = derive_insights(&snapshot(0.0, 0.0, Some(5))).pending_claims;
        assert_eq!(five.kind, InsightKind::Info);
        assert!(five.message.contains('5'));

        let unknown = derive_insights(&snapshot(0.0, 0.0, None)).pending_claims;
        assert_eq!(unknown.kind, InsightKind::Info);
        assert_eq!(unknown.message, PENDING_UNKNOWN_MESSAGE);
    }

    #[test]
    fn ordered_follows_rule_order() {
        let set = derive_insights(&snapshot(50.0, 4.0, None));
        let rules: Vec<InsightRule> = set.ordered().iter().map(|i| i.rule).collect();
        assert_eq!(rules, vec![InsightRule::SuccessRate, InsightRule::ResponseTime, InsightRule::PendingClaims]);
    }

    #[test]
    fn derivation_is_idempotent() {
        let s = snapshot(65.0, 8.0, Some(2));
        assert_eq!(derive_insights(&s), derive_insights(&s));
    }
}
