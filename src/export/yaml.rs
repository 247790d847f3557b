//! YAML envelope snapshot for human-readable copies

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::export::json::EnvelopeSnapshot;

/// Write a snapshot to YAML with a short header comment
pub fn write_snapshot_yaml<W: Write>(snapshot: &EnvelopeSnapshot, writer: &mut W) -> TrackerResult<()> {
    let header = format!(
        "# vatu-tracker envelope snapshot\n# Generated: {}\n# App Version: {}\n\n",
        snapshot.exported_at, snapshot.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, snapshot).map_err(|e| TrackerError::Export(e.to_string()))?;
    Ok(())
}
