//! Local query cache CLI commands

use chrono::Utc;
use clap::Subcommand;

use crate::cache::CacheScope;
use crate::display::format_cache_entries;
use crate::error::{TrackerError, TrackerResult};
use crate::session::Session;

/// Cache subcommands
#[derive(Subcommand)]
pub enum CacheCommands {
    /// List cached queries and their freshness
    List,

    /// Remove every cached query
    Clear,

    /// Mark one group of queries stale
    Invalidate {
        /// e.g. "envelopes", "savings-goals", "reports"
        scope: String,
    },
}

/// Match a scope by its display name, ignoring case, spaces, dashes and underscores
fn parse_scope(value: &str) -> TrackerResult<CacheScope> {
    let normalize = |s: &str| -> String {
        s.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect()
    };
    let key = normalize(value);

    CacheScope::ALL
        .into_iter()
        .find(|scope| normalize(&scope.to_string()) == key)
        .ok_or_else(|| {
            let known: Vec<String> = CacheScope::ALL.iter().map(|s| s.to_string()).collect();
            TrackerError::Validation(format!(
                "Unknown cache scope '{}'. Expected one of: {}",
                value,
                known.join(", ")
            ))
        })
}

/// Handle a cache command
pub fn handle_cache_command(session: &Session, cmd: CacheCommands) -> TrackerResult<()> {
    let cache = &session.cache;

    match cmd {
        CacheCommands::List => {
            let entries = cache.entries()?;
            print!("{}", format_cache_entries(&entries, Utc::now()));
        }

        CacheCommands::Clear => {
            let count = cache.len();
            cache.clear()?;
            println!("Cleared {} cached queries.", count);
        }

        CacheCommands::Invalidate { scope } => {
            let scope = parse_scope(&scope)?;
            let count = cache.invalidate(scope)?;
            println!("Invalidated {} {} entries.", count, scope);
        }
    }

    Ok(())
}
