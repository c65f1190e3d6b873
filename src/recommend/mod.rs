use serde::Serialize;

use crate::insights::thresholds;
use crate::snapshot::{LocationAnalytics, MetricsSnapshot};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource { PeakHour, TopCategory, Baseline, SlowResponse }

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub source: RecommendationSource,
    pub message: String,
}

pub const BASELINE: [&str; 3] = [
    "Process pending claims within 24 hours to keep owners informed.",
    "Keep detailed records of how each claim was verified.",
    "Ask owners for feedback after every return.",
];

pub const STREAMLINE_MESSAGE: &str = "Consider streamlining the verification process to shorten response times.";

pub fn derive_recommendations(analytics: &LocationAnalytics, snapshot: &MetricsSnapshot) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = Vec::new();

    if let Some(peak) = analytics.peak_hours.first() {
        out.push(Recommendation {
            source: RecommendationSource::PeakHour,
            message: format!("Peak activity at {}:00. Schedule extra staff around this hour.", peak.hour),
        });
    }
    if let Some(top) = analytics.top_categories.first() {
        out.push(Recommendation {
            source: RecommendationSource::TopCategory,
            message: format!("Most common category is \"{}\". Make sure there is enough storage space for it.", top.id),
        });
    }
    for line in BASELINE {
        out.push(Recommendation { source: RecommendationSource::Baseline, message: line.to_string() });
    }
    if snapshot.performance.avg_response_time > thresholds::STREAMLINE_AFTER_DAYS {
        out.push(Recommendation { source: RecommendationSource::SlowResponse, message: STREAMLINE_MESSAGE.to_string() });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{PeakHour, TopCategory};

    fn messages(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.message.as_str()).collect()
    }

    #[test]
    fn empty_analytics_gives_baseline_only() {
        let recs = derive_recommendations(&LocationAnalytics::default(), &MetricsSnapshot::default());
        assert_eq!(messages(&recs), BASELINE.to_vec());
        assert!(recs.iter().all(|r| r.source == RecommendationSource::Baseline));
    }

    #[test]
    fn peak_hour_prepends_one_line() {
        let mut analytics = LocationAnalytics::default();
        analytics.peak_hours = vec![PeakHour { hour: 14, count: 9 }, PeakHour { hour: 9, count: 3 }];
        let recs = derive_recommendations(&analytics, &MetricsSnapshot::default());
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0].source, RecommendationSource::PeakHour);
        assert!(recs[0].message.contains("14:00"));
        assert_eq!(messages(&recs[1..]), BASELINE.to_vec());
    }

    #[test]
    fn top_category_follows_peak_hour() {
        let mut analytics = LocationAnalytics::default();
        analytics.peak_hours = vec![PeakHour { hour: 8, count: 1 }];
        analytics.top_categories = vec![TopCategory { id: "electronics".into(), count: 12, recent: 2 }];
        let recs = derive_recommendations(&analytics, &MetricsSnapshot::default());
        assert_eq!(recs.len(), 5);
        assert_eq!(recs[1].source, RecommendationSource::TopCategory);
        assert!(recs[1].message.contains("electronics"));
    }

    #[test]
    fn slow_response_appends_after_baseline() {
        let mut snap = MetricsSnapshot::default();
        snap.performance.avg_response_time = 5.0;
        let at_limit = derive_recommendations(&LocationAnalytics::default(), &snap);
        assert_eq!(at_limit.len(), 3);

        snap.performance.avg_response_time = 5.1;
        let recs = derive_recommendations(&LocationAnalytics::default(), &snap);
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[3].message, STREAMLINE_MESSAGE);
    }
}
