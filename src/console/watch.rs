use anyhow::Result;
use chrono::Utc;
use clap::Args;
use std::path::Path;
use std::time::Instant;
use tokio::time::{interval, MissedTickBehavior};

use crate::config::ConsoleConfig;
use crate::output::types::Meta;
use crate::snapshot::load;
use crate::telemetry::{self};
use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::watch::{Phase as WatchPhase, Watch};

use super::render;
use super::view::{self, DashboardInputs};
use super::SourceArgs;

#[derive(Args, Debug)]
pub struct WatchCmd {
    /// Stop after this many refreshes (default: run until Ctrl-C)
    #[arg(long)]
    pub ticks: Option<u64>,
}

// Paths that can be read again later. Stdin was consumed by the initial load.
fn refreshable(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !load::is_stdin(p))
}

// Reload one source into its slot. A failed reload keeps the previous snapshot.
// Returns whether a reload was attempted.
fn refresh<T>(log: &LogCtx<Watch>, name: &str, slot: &mut Option<T>, path: Option<&Path>, loader: fn(&Path) -> Result<T>) -> bool {
    let Some(path) = refreshable(path) else { return false };
    match loader(path) {
        Ok(v) => {
            *slot = Some(v);
            log.refreshed(name);
        }
        Err(e) => log.warn_kv(
            &format!("⚠️  Refresh of {} failed, keeping previous snapshot: {:#}", name, e),
            [("source", name.to_string())],
        ),
    }
    true
}

fn render_tick(log: &LogCtx<Watch>, inputs: &DashboardInputs, cfg: &ConsoleConfig, tick: u64, started: Instant) -> Result<()> {
    let _s = log.span(&WatchPhase::Render).entered();
    let dash = view::build_dashboard(inputs, Utc::now(), cfg.activity_limit);
    render::dashboard(&telemetry::dashboard(), &dash);
    if telemetry::config::json_mode() {
        let meta = Meta { duration_ms: Some(started.elapsed().as_millis()), tick: Some(tick) };
        log.result_with_meta(&dash, meta)?;
    }
    Ok(())
}

pub async fn run(sources: &SourceArgs, cfg: ConsoleConfig, args: WatchCmd) -> Result<()> {
    let log = telemetry::watch();
    let _g = log.root_span_kv([
        ("stats_every", format!("{:?}", cfg.stats_refresh)),
        ("activity_every", format!("{:?}", cfg.activity_refresh)),
        ("attention_every", format!("{:?}", cfg.attention_refresh)),
        ("ticks", format!("{:?}", args.ticks)),
    ]).entered();
    let started = Instant::now();

    let mut inputs = view::load_inputs(sources)?;
    render_tick(&log, &inputs, &cfg, 0, started)?;

    let stats_live = refreshable(sources.stats.as_deref()).is_some() || refreshable(sources.analytics.as_deref()).is_some();
    let activity_live = refreshable(sources.activity.as_deref()).is_some();
    let attention_live = refreshable(sources.attention.as_deref()).is_some();
    if !(stats_live || activity_live || attention_live) {
        log.info("ℹ️  No re-readable sources, nothing to watch");
        return Ok(());
    }

    let mut stats_every = interval(cfg.stats_refresh);
    let mut activity_every = interval(cfg.activity_refresh);
    let mut attention_every = interval(cfg.attention_refresh);
    for t in [&mut stats_every, &mut activity_every, &mut attention_every] {
        t.set_missed_tick_behavior(MissedTickBehavior::Delay);
    }
    // The first tick of an interval fires immediately; the initial load covered it.
    stats_every.tick().await;
    activity_every.tick().await;
    attention_every.tick().await;

    let mut tick: u64 = 0;
    loop {
        if args.ticks.is_some_and(|max| tick >= max) { break; }
        let ran = tokio::select! {
            _ = stats_every.tick(), if stats_live => {
                let _s = log.span(&WatchPhase::RefreshStats).entered();
                let stats = refresh(&log, "stats", &mut inputs.stats, sources.stats.as_deref(), load::load_metrics);
                let analytics = refresh(&log, "analytics", &mut inputs.analytics, sources.analytics.as_deref(), load::load_analytics);
                stats || analytics
            }
            _ = activity_every.tick(), if activity_live => {
                let _s = log.span(&WatchPhase::RefreshActivity).entered();
                refresh(&log, "activity", &mut inputs.activity, sources.activity.as_deref(), load::load_activity)
            }
            _ = attention_every.tick(), if attention_live => {
                let _s = log.span(&WatchPhase::RefreshAttention).entered();
                refresh(&log, "attention", &mut inputs.attention, sources.attention.as_deref(), load::load_attention)
            }
            _ = tokio::signal::ctrl_c() => {
                log.info("👋 Stopping watch");
                break;
            }
        };
        if !ran { continue; }
        tick += 1;
        render_tick(&log, &inputs, &cfg, tick, started)?;
    }
    log.info_kv("✅ Watch finished", [("ticks", tick.to_string())]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::MetricsSnapshot;
    use std::io::Write;

    fn log() -> LogCtx<Watch> { telemetry::watch() }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let mut slot = Some(MetricsSnapshot::default());
        assert!(refresh(&log(), "stats", &mut slot, Some(Path::new("/nonexistent/stats.json")), load::load_metrics));
        assert_eq!(slot, Some(MetricsSnapshot::default()));
    }

    #[test]
    fn refresh_replaces_snapshot() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"overview":{{"totalItems":7}}}}"#).unwrap();
        let mut slot: Option<MetricsSnapshot> = None;
        assert!(refresh(&log(), "stats", &mut slot, Some(f.path()), load::load_metrics));
        assert_eq!(slot.map(|s| s.overview.total_items), Some(7));
    }

    #[test]
    fn missing_path_leaves_slot_alone() {
        let mut slot: Option<MetricsSnapshot> = None;
        assert!(!refresh(&log(), "stats", &mut slot, None, load::load_metrics));
        assert!(slot.is_none());
    }

    #[test]
    fn stdin_source_is_not_reread() {
        let mut kept = MetricsSnapshot::default();
        kept.overview.total_items = 7;
        let mut slot = Some(kept.clone());
        assert!(!refresh(&log(), "stats", &mut slot, Some(Path::new("-")), load::load_metrics));
        assert_eq!(slot, Some(kept));
    }

    #[test]
    fn only_file_paths_are_refreshable() {
        assert!(refreshable(None).is_none());
        assert!(refreshable(Some(Path::new("-"))).is_none());
        assert_eq!(refreshable(Some(Path::new("stats.json"))), Some(Path::new("stats.json")));
    }

    #[tokio::test]
    async fn watch_without_refreshable_sources_returns() {
        let cfg = ConsoleConfig {
            stats_refresh: std::time::Duration::from_millis(5),
            activity_refresh: std::time::Duration::from_millis(5),
            attention_refresh: std::time::Duration::from_millis(5),
            activity_limit: 10,
        };
        let done = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            run(&SourceArgs::default(), cfg, WatchCmd { ticks: None }),
        ).await;
        assert!(matches!(done, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn bounded_watch_stops_after_ticks() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"counts":{{"expired":1}}}}"#).unwrap();
        let sources = SourceArgs { attention: Some(f.path().to_path_buf()), ..Default::default() };
        let cfg = ConsoleConfig {
            stats_refresh: std::time::Duration::from_millis(5),
            activity_refresh: std::time::Duration::from_millis(5),
            attention_refresh: std::time::Duration::from_millis(5),
            activity_limit: 10,
        };
        run(&sources, cfg, WatchCmd { ticks: Some(2) }).await.unwrap();
    }
}
