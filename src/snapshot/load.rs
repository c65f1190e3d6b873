use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

use super::model::*;
use super::types::*;

pub const STDIN: &str = "-";

/// True for the stdin marker. Stdin can be read once per process, so such a
/// source is loaded at startup and never re-read.
pub fn is_stdin(path: &Path) -> bool {
    path == Path::new(STDIN)
}

fn read_text(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("read snapshot from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("read snapshot {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_text(path)?;
    serde_json::from_str(&text).with_context(|| format!("parse snapshot {}", path.display()))
}

pub fn load_metrics(path: &Path) -> Result<MetricsSnapshot> {
    Ok(read_json::<RawMetricsSnapshot>(path)?.into())
}

pub fn load_analytics(path: &Path) -> Result<LocationAnalytics> {
    Ok(read_json::<RawLocationAnalytics>(path)?.into())
}

pub fn load_attention(path: &Path) -> Result<AttentionSnapshot> {
    Ok(read_json::<RawAttentionSnapshot>(path)?.into())
}

// The activity endpoint has shipped both a bare array and an `{ activities: [...] }` wrapper.
// Elements stay untyped here so one malformed event is dropped rather than failing the feed.
#[derive(Deserialize)]
#[serde(untagged)]
enum ActivityDoc {
    List(Vec<Value>),
    Wrapped { #[serde(default)] activities: Option<Vec<Value>> },
}

pub fn parse_activity(text: &str) -> Result<Vec<ActivityEvent>> {
    let doc: ActivityDoc = serde_json::from_str(text).context("parse activity feed")?;
    let raw = match doc {
        ActivityDoc::List(v) => v,
        ActivityDoc::Wrapped { activities } => activities.unwrap_or_default(),
    };
    Ok(keep_parseable::<RawActivityEvent>(raw).into_iter().map(ActivityEvent::from).collect())
}

pub fn load_activity(path: &Path) -> Result<Vec<ActivityEvent>> {
    let text = read_text(path)?;
    parse_activity(&text).with_context(|| format!("activity snapshot {}", path.display()))
}
