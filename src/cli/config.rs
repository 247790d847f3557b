//! Configuration CLI commands
//!
//! These work offline: they read and write the settings file only, except
//! `set-url`, which also deletes the query cache of the previous server.

use clap::Subcommand;

use crate::cache::QueryCache;
use crate::config::paths::TrackerPaths;
use crate::config::settings::{normalize_base_url, Settings, API_URL_ENV};
use crate::error::TrackerResult;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,

    /// Create the data directory and a default settings file
    Init,

    /// Set the REST backend base URL
    #[command(name = "set-url")]
    SetUrl {
        /// e.g. https://budget.example.vu/api
        url: String,
    },

    /// Set the percentage at which an envelope counts as near its limit
    #[command(name = "set-threshold")]
    SetThreshold {
        /// Percentage between 0 and 100
        percent: f64,
    },

    /// Set the category whose envelope funds savings goals
    #[command(name = "set-savings-category")]
    SetSavingsCategory {
        /// Category name
        name: String,
    },

    /// Turn the local query cache on or off
    #[command(name = "set-cache")]
    SetCache {
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &TrackerPaths,
    mut settings: Settings,
    cmd: ConfigCommands,
) -> TrackerResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("vatu-tracker configuration");
            println!("==========================");
            println!("Data directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Cache file:       {}", paths.cache_file().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  API base URL:        {}", settings.api_base_url);
            if std::env::var(API_URL_ENV).is_ok_and(|v| !v.trim().is_empty()) {
                println!("                       (from {})", API_URL_ENV);
            }
            println!("  Currency symbol:     {}", settings.currency_symbol);
            println!("  Near-limit at:       {}%", settings.near_limit_threshold);
            println!("  Savings category:    {}", settings.savings_category);
            println!("  Date format:         {}", settings.date_format);
            println!("  Cache enabled:       {}", settings.cache_enabled);
            return Ok(());
        }

        ConfigCommands::Init => {
            paths.ensure_directories()?;
            settings.save(paths)?;
            println!("Initialized vatu-tracker at: {}", paths.base_dir().display());
            println!();
            println!("Next steps:");
            println!("  vatu config set-url <URL>   point at your backend");
            println!("  vatu auth login <USERNAME>  obtain an access token");
            return Ok(());
        }

        ConfigCommands::SetUrl { url } => {
            settings.api_base_url = normalize_base_url(&url);
            settings.validate()?;
            QueryCache::discard_file(&paths.cache_file())?;
        }

        ConfigCommands::SetThreshold { percent } => {
            settings.near_limit_threshold = percent;
        }

        ConfigCommands::SetSavingsCategory { name } => {
            settings.savings_category = name.trim().to_string();
        }

        ConfigCommands::SetCache { enabled } => {
            settings.cache_enabled = enabled;
        }
    }

    settings.save(paths)?;
    tracing::info!(path = %paths.settings_file().display(), "settings saved");
    println!("Settings saved.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use tempfile::TempDir;

    #[test]
    fn test_set_threshold_persists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        handle_config_command(&paths, Settings::default(), ConfigCommands::SetThreshold { percent: 65.0 })
            .unwrap();

        let contents = std::fs::read_to_string(paths.settings_file()).unwrap();
        let saved: Settings = serde_json::from_str(&contents).unwrap();
        assert_eq!(saved.near_limit_threshold, 65.0);
    }

    #[test]
    fn test_invalid_values_are_not_saved() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let result = handle_config_command(
            &paths,
            Settings::default(),
            ConfigCommands::SetUrl {
                url: "budget.example.vu".into(),
            },
        );
        assert!(matches!(result, Err(TrackerError::Config(_))));
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_set_url_drops_cached_queries() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        QueryCache::open(paths.cache_file(), true, "old server").save().unwrap();
        assert!(paths.cache_file().exists());

        handle_config_command(
            &paths,
            Settings::default(),
            ConfigCommands::SetUrl {
                url: "https://budget.example.vu/api/".into(),
            },
        )
        .unwrap();

        assert!(!paths.cache_file().exists());
        let saved: Settings =
            serde_json::from_str(&std::fs::read_to_string(paths.settings_file()).unwrap()).unwrap();
        assert_eq!(saved.api_base_url, "https://budget.example.vu/api");
    }
}
