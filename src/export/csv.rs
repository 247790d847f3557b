//! CSV export of envelope figures
//!
//! One row per envelope with the locally recomputed status. Amounts are
//! plain decimal strings so spreadsheets treat them as numbers.

use serde::Serialize;
use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::Envelope;

#[derive(Serialize)]
struct EnvelopeCsvRow<'a> {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Budgeted")]
    budgeted: String,
    #[serde(rename = "Spent")]
    spent: String,
    #[serde(rename = "Remaining")]
    remaining: String,
    #[serde(rename = "Percentage Used")]
    percentage_used: String,
    #[serde(rename = "Over Budget")]
    over_budget: bool,
    #[serde(rename = "Near Limit")]
    near_limit: bool,
}

/// Write envelopes to CSV
pub fn write_envelopes_csv<W: Write>(
    envelopes: &[Envelope],
    near_limit_threshold: f64,
    writer: W,
) -> TrackerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for envelope in envelopes {
        let status = envelope.status(near_limit_threshold);
        csv_writer
            .serialize(EnvelopeCsvRow {
                id: envelope.id.get(),
                category: &envelope.category_name,
                budgeted: status.budgeted.to_decimal_string(),
                spent: status.spent.to_decimal_string(),
                remaining: status.remaining.to_decimal_string(),
                percentage_used: format!("{:.1}", status.percentage_used),
                over_budget: status.is_over_budget,
                near_limit: status.is_near_limit,
            })
            .map_err(|e| TrackerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::DEFAULT_NEAR_LIMIT_THRESHOLD;
    use crate::export::test_support::envelope;

    #[test]
    fn test_csv_rows() {
        let envelopes = vec![
            envelope(1, "Groceries", 10_000, 8_500),
            envelope(2, "Dining, Out", 10_000, 12_000),
        ];
        let mut output = Vec::new();
        write_envelopes_csv(&envelopes, DEFAULT_NEAR_LIMIT_THRESHOLD, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "ID,Category,Budgeted,Spent,Remaining,Percentage Used,Over Budget,Near Limit"
        );
        assert_eq!(lines[1], "1,Groceries,100.00,85.00,15.00,85.0,false,true");
        assert_eq!(lines[2], "2,\"Dining, Out\",100.00,120.00,-20.00,120.0,true,false");
    }

    #[test]
    fn test_csv_empty_writes_nothing() {
        let mut output = Vec::new();
        write_envelopes_csv(&[], DEFAULT_NEAR_LIMIT_THRESHOLD, &mut output).unwrap();
        assert!(output.is_empty());
    }
}
