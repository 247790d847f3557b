//! Export module for vatu-tracker
//!
//! Two kinds of export:
//! - Server exports: the `/export/` download, saved to disk as-is
//! - Envelope snapshots: the locally recomputed envelope figures as CSV,
//!   JSON or YAML

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::write_envelopes_csv;
pub use self::json::{write_snapshot_json, EnvelopeSnapshot, SNAPSHOT_SCHEMA_VERSION};
pub use self::yaml::write_snapshot_yaml;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::api::Download;
use crate::error::{TrackerError, TrackerResult};
use crate::file_io::write_bytes_atomic;
use crate::models::Envelope;

/// Local snapshot formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

impl SnapshotFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for SnapshotFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("Unsupported snapshot format: {}", other)),
        }
    }
}

/// Default snapshot name, e.g. `envelopes_2025-03-01.yaml`
pub fn snapshot_filename(format: SnapshotFormat, today: NaiveDate) -> String {
    format!("envelopes_{}.{}", today.format("%Y-%m-%d"), format.extension())
}

/// Write a server download to `output`, or into `export_dir` under its filename
pub fn save_download(download: &Download, export_dir: &Path, output: Option<&Path>) -> TrackerResult<PathBuf> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let name = download
                .filename
                .as_deref()
                .ok_or_else(|| TrackerError::Export("Download has no filename".into()))?;
            export_dir.join(name)
        }
    };

    write_bytes_atomic(&path, &download.bytes)?;
    tracing::info!(path = %path.display(), bytes = download.bytes.len(), "saved export");
    Ok(path)
}

/// Write an envelope snapshot in the given format to `path`
pub fn write_snapshot(
    envelopes: &[Envelope],
    near_limit_threshold: f64,
    format: SnapshotFormat,
    path: &Path,
) -> TrackerResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| TrackerError::Export(format!("Failed to create {}: {}", parent.display(), e)))?;
    }

    let file = File::create(path)
        .map_err(|e| TrackerError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);

    match format {
        SnapshotFormat::Csv => write_envelopes_csv(envelopes, near_limit_threshold, &mut writer)?,
        SnapshotFormat::Json => {
            let snapshot = EnvelopeSnapshot::new(envelopes, near_limit_threshold);
            write_snapshot_json(&snapshot, &mut writer)?
        }
        SnapshotFormat::Yaml => {
            let snapshot = EnvelopeSnapshot::new(envelopes, near_limit_threshold);
            write_snapshot_yaml(&snapshot, &mut writer)?
        }
    }

    writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    tracing::info!(path = %path.display(), %format, count = envelopes.len(), "wrote envelope snapshot");
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::envelope;
    use super::*;
    use crate::budget::DEFAULT_NEAR_LIMIT_THRESHOLD;
    use tempfile::TempDir;

    #[test]
    fn test_save_download_uses_filename() {
        let dir = TempDir::new().unwrap();
        let download = Download {
            bytes: b"date,amount\n".to_vec(),
            filename: Some("transactions_2025-03-01.csv".into()),
        };
        let path = save_download(&download, dir.path(), None).unwrap();
        assert_eq!(path, dir.path().join("transactions_2025-03-01.csv"));
        assert_eq!(std::fs::read(&path).unwrap(), b"date,amount\n");
    }

    #[test]
    fn test_save_download_explicit_path() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("out.json");
        let download = Download {
            bytes: b"[]".to_vec(),
            filename: None,
        };
        let path = save_download(&download, dir.path(), Some(&target)).unwrap();
        assert_eq!(path, target);
        assert!(target.exists());
    }

    #[test]
    fn test_write_snapshot_each_format() {
        let dir = TempDir::new().unwrap();
        let envelopes = vec![envelope(1, "Rent", 80_000, 80_000)];
        for format in [SnapshotFormat::Csv, SnapshotFormat::Json, SnapshotFormat::Yaml] {
            let path = dir.path().join(format!("snap.{}", format.extension()));
            write_snapshot(&envelopes, DEFAULT_NEAR_LIMIT_THRESHOLD, format, &path).unwrap();
            let content = std::fs::read_to_string(&path).unwrap();
            assert!(content.contains("Rent"), "{} snapshot missing data", format);
        }
    }

    #[test]
    fn test_snapshot_format_parse() {
        assert_eq!("YML".parse::<SnapshotFormat>().unwrap(), SnapshotFormat::Yaml);
        assert!("xml".parse::<SnapshotFormat>().is_err());
    }
}
