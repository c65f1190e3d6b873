//! Needs-attention queue: pending claims, expired items and items expiring soon.
//!
//! Counts and lists come from independent sources and are never reconciled.
//! Lists are trusted as delivered: no sorting, filtering or dedup.

use serde::Serialize;

use crate::snapshot::{AttentionItem, AttentionSnapshot};
use crate::util::time;

pub const PENDING_PREVIEW_CAP: usize = 3;
pub const EXPIRED_PREVIEW_CAP: usize = 2;
pub const EXPIRING_PREVIEW_CAP: usize = 2;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Preview<T> {
    pub items: Vec<T>,
    pub has_overflow: bool,
    /// Reported count for the category, independent of `items`.
    pub count: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ClaimPreview { pub title: String, pub location: String }

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ExpiryPreview {
    pub title: String,
    pub location: String,
    /// Formatted date; the raw value when it does not parse; None when absent.
    pub expiry_display: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TriageView {
    pub total_count: u64,
    pub pending_claims: Preview<ClaimPreview>,
    pub expired: Preview<ExpiryPreview>,
    pub expiring_soon: Preview<ExpiryPreview>,
}

impl TriageView {
    pub fn is_clear(&self) -> bool { self.total_count == 0 }
}

fn preview<T>(list: &[AttentionItem], cap: usize, count: u64, map: impl Fn(&AttentionItem) -> T) -> Preview<T> {
    Preview {
        items: list.iter().take(cap).map(map).collect(),
        has_overflow: list.len() > cap,
        count,
    }
}

pub fn expiry_display(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    Some(match time::parse_instant(raw) {
        Some(dt) => time::display_date(dt),
        None => raw.to_string(),
    })
}

fn claim(item: &AttentionItem) -> ClaimPreview {
    ClaimPreview { title: item.title.clone(), location: item.location.clone() }
}

fn expiry(item: &AttentionItem) -> ExpiryPreview {
    ExpiryPreview {
        title: item.title.clone(),
        location: item.location.clone(),
        expiry_display: expiry_display(item.expiry_date.as_deref()),
    }
}

pub fn derive_triage_view(attention: &AttentionSnapshot) -> TriageView {
    let c = &attention.counts;
    TriageView {
        total_count: c.pending_claims.saturating_add(c.expired).saturating_add(c.expiring_soon),
        pending_claims: preview(&attention.pending_claims, PENDING_PREVIEW_CAP, c.pending_claims, claim),
        expired: preview(&attention.expired_items, EXPIRED_PREVIEW_CAP, c.expired, expiry),
        expiring_soon: preview(&attention.expiring_soon, EXPIRING_PREVIEW_CAP, c.expiring_soon, expiry),
    }
}
