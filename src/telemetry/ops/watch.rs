use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Watch;

#[derive(Copy, Clone, Debug)]
pub enum Phase { RefreshStats, RefreshActivity, RefreshAttention, Render }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::RefreshStats => "refresh_stats",
        Phase::RefreshActivity => "refresh_activity",
        Phase::RefreshAttention => "refresh_attention",
        Phase::Render => "render",
    }}
    fn span(&self) -> Span { match self {
        Phase::RefreshStats => info_span!("refresh_stats"),
        Phase::RefreshActivity => info_span!("refresh_activity"),
        Phase::RefreshAttention => info_span!("refresh_attention"),
        Phase::Render => info_span!("render"),
    }}
}

impl OpMarker for Watch {
    const NAME: &'static str = "watch";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("watch") }
}
