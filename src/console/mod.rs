use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::access::{self, ACCESS_DENIED};
use crate::activity;
use crate::config::ConsoleConfig;
use crate::insights;
use crate::metrics;
use crate::recommend;
use crate::snapshot::{load, MetricsSnapshot};
use crate::telemetry::{self};
use crate::telemetry::ops::dashboard::Phase as DashPhase;
use crate::triage;

pub mod render;
pub mod view;
pub mod watch;

/// Snapshot files; "-" reads stdin.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(long, global = true, env = "CONSOLE_STATS_PATH")]
    pub stats: Option<PathBuf>,
    #[arg(long, global = true, env = "CONSOLE_ANALYTICS_PATH")]
    pub analytics: Option<PathBuf>,
    #[arg(long, global = true, env = "CONSOLE_ATTENTION_PATH")]
    pub attention: Option<PathBuf>,
    #[arg(long, global = true, env = "CONSOLE_ACTIVITY_PATH")]
    pub activity: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Every section the given snapshots allow
    Dashboard,
    /// Success-rate, response-time and pending-claims insights (needs --stats)
    Insights,
    /// Recommendations (needs --analytics; --stats optional)
    Recommend,
    /// Needs-attention queue (needs --attention)
    Triage,
    /// Recent activity feed (needs --activity)
    Activity {
        /// Number of events to show (default: CONSOLE_ACTIVITY_LIMIT or 10)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Re-read snapshots on their refresh cadence and re-derive the dashboard
    Watch(watch::WatchCmd),
}

fn need<'a>(path: &'a Option<PathBuf>, flag: &str) -> Result<&'a std::path::Path> {
    path.as_deref().ok_or_else(|| anyhow!("this command needs --{}", flag))
}

pub async fn run(cmd: Commands, role: Option<&str>, sources: SourceArgs, cfg: ConsoleConfig) -> Result<()> {
    let log = telemetry::dashboard();
    let _g = log.root_span_kv([("role", format!("{:?}", role))]).entered();

    {
        let _s = log.span(&DashPhase::Gate).entered();
        if !access::is_staff_authorized(role) {
            log.denied(role);
            bail!(ACCESS_DENIED);
        }
    }

    let now = Utc::now();
    let json = telemetry::config::json_mode();

    match cmd {
        Commands::Dashboard => {
            let inputs = {
                let _s = log.span(&DashPhase::Load).entered();
                let inputs = view::load_inputs(&sources)?;
                log.sources(inputs.stats.is_some(), inputs.analytics.is_some(), inputs.attention.is_some(), inputs.activity.is_some());
                inputs
            };
            let dash = view::build_dashboard(&inputs, now, cfg.activity_limit);
            let _s = log.span(&DashPhase::Summary).entered();
            render::dashboard(&log, &dash);
            if json { log.result(&dash)?; }
        }
        Commands::Insights => {
            let stats = load::load_metrics(need(&sources.stats, "stats")?)?;
            let _s = log.span(&DashPhase::Insights).entered();
            let set = insights::derive_insights(&stats);
            render::insights(&log, &set);
            if json { log.result(&set)?; }
        }
        Commands::Recommend => {
            let analytics = load::load_analytics(need(&sources.analytics, "analytics")?)?;
            let stats = match sources.stats.as_deref() {
                Some(p) => load::load_metrics(p)?,
                None => MetricsSnapshot::default(),
            };
            let _s = log.span(&DashPhase::Recommendations).entered();
            let recs = recommend::derive_recommendations(&analytics, &stats);
            render::recommendations(&log, &recs);
            render::weekly(&log, &metrics::weekly_series(&analytics));
            if json { log.result(&recs)?; }
        }
        Commands::Triage => {
            let attention = load::load_attention(need(&sources.attention, "attention")?)?;
            let _s = log.span(&DashPhase::Triage).entered();
            let view = triage::derive_triage_view(&attention);
            render::triage(&log, &view);
            if json { log.result(&view)?; }
        }
        Commands::Activity { limit } => {
            let events = load::load_activity(need(&sources.activity, "activity")?)?;
            let _s = log.span_kv(&DashPhase::Activity, [("events", events.len().to_string())]).entered();
            let feed = activity::format_feed(&events, now, limit.unwrap_or(cfg.activity_limit));
            render::activity(&log, &feed);
            if json { log.result(&feed)?; }
        }
        Commands::Watch(args) => watch::run(&sources, cfg, args).await?,
    }
    Ok(())
}
