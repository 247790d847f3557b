//! Query cache listing

use chrono::{DateTime, Utc};
use tabled::Tabled;

use super::render_table;
use crate::cache::CacheEntry;

#[derive(Tabled)]
struct CacheRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Fetched")]
    fetched: String,
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "State")]
    state: &'static str,
}

fn format_age(seconds: i64) -> String {
    match seconds {
        s if s < 60 => format!("{}s", s.max(0)),
        s if s < 3600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3600),
        s => format!("{}d", s / 86_400),
    }
}

pub fn format_cache_entries(entries: &[CacheEntry], now: DateTime<Utc>) -> String {
    let mut sorted: Vec<&CacheEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.key.storage_key());

    let rows = sorted
        .into_iter()
        .map(|entry| CacheRow {
            key: entry.key.storage_key(),
            fetched: entry.fetched_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            age: format_age((now - entry.fetched_at).num_seconds()),
            state: if entry.is_fresh(now) { "fresh" } else { "stale" },
        })
        .collect();
    render_table(rows, "Cache is empty.")
}
