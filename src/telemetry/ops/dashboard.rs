use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Dashboard;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Gate, Load, Insights, Recommendations, Triage, Activity, Summary }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Gate => "gate",
        Phase::Load => "load",
        Phase::Insights => "insights",
        Phase::Recommendations => "recommendations",
        Phase::Triage => "triage",
        Phase::Activity => "activity",
        Phase::Summary => "summary",
    }}
    fn span(&self) -> Span { match self {
        Phase::Gate => info_span!("gate"),
        Phase::Load => info_span!("load"),
        Phase::Insights => info_span!("insights"),
        Phase::Recommendations => info_span!("recommendations"),
        Phase::Triage => info_span!("triage"),
        Phase::Activity => info_span!("activity"),
        Phase::Summary => info_span!("summary"),
    }}
}

impl OpMarker for Dashboard {
    const NAME: &'static str = "dashboard";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("dashboard") }
}
