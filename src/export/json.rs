//! JSON envelope snapshot with schema versioning

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::budget::{EnvelopeHealth, EnvelopeStatus, EnvelopeTotals};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Envelope, EnvelopeId};

/// Current snapshot schema version
pub const SNAPSHOT_SCHEMA_VERSION: &str = "1.0.0";

/// One envelope with its recomputed status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeSnapshotRow {
    pub id: EnvelopeId,
    pub category_name: String,
    pub health: EnvelopeHealth,
    #[serde(flatten)]
    pub status: EnvelopeStatus,
}

/// Point-in-time copy of every envelope and their totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeSnapshot {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub near_limit_threshold: f64,
    pub totals: EnvelopeTotals,
    pub envelopes: Vec<EnvelopeSnapshotRow>,
}

impl EnvelopeSnapshot {
    pub fn new(envelopes: &[Envelope], near_limit_threshold: f64) -> Self {
        let rows = envelopes
            .iter()
            .map(|envelope| {
                let status = envelope.status(near_limit_threshold);
                EnvelopeSnapshotRow {
                    id: envelope.id,
                    category_name: envelope.category_name.clone(),
                    health: status.health(),
                    status,
                }
            })
            .collect();

        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            near_limit_threshold,
            totals: EnvelopeTotals::from_envelopes(envelopes, near_limit_threshold),
            envelopes: rows,
        }
    }
}

/// Write a snapshot as pretty-printed JSON
pub fn write_snapshot_json<W: Write>(snapshot: &EnvelopeSnapshot, writer: &mut W) -> TrackerResult<()> {
    serde_json::to_writer_pretty(&mut *writer, snapshot)
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TrackerError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::DEFAULT_NEAR_LIMIT_THRESHOLD;
    use crate::export::test_support::envelope;
    use crate::models::Money;

    #[test]
    fn test_snapshot_totals() {
        let envelopes = vec![
            envelope(1, "Groceries", 10_000, 8_500),
            envelope(2, "Fuel", 5_000, 6_000),
        ];
        let snapshot = EnvelopeSnapshot::new(&envelopes, DEFAULT_NEAR_LIMIT_THRESHOLD);
        assert_eq!(snapshot.totals.count, 2);
        assert_eq!(snapshot.totals.remaining, Money::from_cents(500));
        assert_eq!(snapshot.envelopes[0].health, EnvelopeHealth::NearLimit);
        assert_eq!(snapshot.envelopes[1].health, EnvelopeHealth::OverBudget);
    }

    #[test]
    fn test_json_reads_back() {
        let snapshot = EnvelopeSnapshot::new(
            &[envelope(1, "Groceries", 10_000, 8_500)],
            DEFAULT_NEAR_LIMIT_THRESHOLD,
        );
        let mut output = Vec::new();
        write_snapshot_json(&snapshot, &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["schema_version"], SNAPSHOT_SCHEMA_VERSION);
        assert_eq!(value["envelopes"][0]["remaining"], "15.00");
        assert_eq!(value["envelopes"][0]["is_near_limit"], true);
    }
}
