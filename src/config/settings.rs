//! User settings for vatu-tracker
//!
//! Manages the backend location and the display/budgeting preferences the
//! client applies on top of server data.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;
use crate::file_io::write_json_atomic;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "VATU_API_URL";

/// User settings for vatu-tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the REST backend, without a trailing slash
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Currency prefix used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Percentage of budget used at which an envelope counts as near its limit
    #[serde(default = "default_near_limit_threshold")]
    pub near_limit_threshold: f64,

    /// Category name of the envelope that funds savings goals
    #[serde(default = "default_savings_category")]
    pub savings_category: String,

    /// Date format preference (strftime format) for display
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether GET responses are served from the local query cache
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_currency() -> String {
    "VT".to_string()
}

fn default_near_limit_threshold() -> f64 {
    80.0
}

fn default_savings_category() -> String {
    "Savings".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_cache_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            currency_symbol: default_currency(),
            near_limit_threshold: default_near_limit_threshold(),
            savings_category: default_savings_category(),
            date_format: default_date_format(),
            cache_enabled: default_cache_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// `VATU_API_URL` takes precedence over the stored base URL.
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        let mut settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

            serde_json::from_str(&contents).map_err(|e| {
                TrackerError::Config(format!("Failed to parse settings file: {}", e))
            })?
        } else {
            Settings::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                settings.api_base_url = url;
            }
        }
        settings.api_base_url = normalize_base_url(&settings.api_base_url);

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        self.validate()?;
        paths.ensure_directories()?;

        write_json_atomic(paths.settings_file(), self)
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<(), TrackerError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(TrackerError::Config(format!(
                "API base URL must start with http:// or https://: {}",
                self.api_base_url
            )));
        }

        if !(0.0..=100.0).contains(&self.near_limit_threshold) {
            return Err(TrackerError::Config(format!(
                "Near-limit threshold must be between 0 and 100, got {}",
                self.near_limit_threshold
            )));
        }

        if self.savings_category.trim().is_empty() {
            return Err(TrackerError::Config(
                "Savings category name cannot be empty".into(),
            ));
        }

        Ok(())
    }
}

/// Strip trailing slashes so endpoint paths can be appended verbatim
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "VT");
        assert_eq!(settings.near_limit_threshold, 80.0);
        assert_eq!(settings.savings_category, "Savings");
        assert!(settings.cache_enabled);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.api_base_url = "https://budget.example.vu/api".into();
        settings.near_limit_threshold = 90.0;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.near_limit_threshold, 90.0);
        assert!(loaded.api_base_url.ends_with("/api"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"api_base_url": "http://10.0.0.2:8000/api"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "VT");
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let mut settings = Settings::default();
        settings.near_limit_threshold = 120.0;
        assert!(matches!(settings.validate(), Err(TrackerError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_url() {
        let mut settings = Settings::default();
        settings.api_base_url = "localhost:8000".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url(" http://localhost:8000/api// "),
            "http://localhost:8000/api"
        );
    }
}
