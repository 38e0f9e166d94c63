//! JSON export of a processed ledger.
//!
//! The export is the hand-off artifact for the persistence collaborator:
//! events are keyed by (company_id, effective_date) for conflict-free upsert.
//! Skip-on-duplicate inserts and review-state transitions happen on that
//! side, not here.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::domain::{DividendEvent, RunCounters};
use crate::engine::CompanyLedger;
use crate::error::AppError;

/// Serialized export document.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerExport<'a> {
    pub company_id: &'a str,
    pub entity_name: Option<&'a str>,
    pub counters: &'a RunCounters,
    pub events: &'a [DividendEvent],
}

/// Write one company's ledger as pretty-printed JSON.
pub fn write_ledger_json(
    path: &Path,
    ledger: &CompanyLedger,
    entity_name: Option<&str>,
) -> Result<(), AppError> {
    let export = LedgerExport {
        company_id: &ledger.company_id,
        entity_name,
        counters: &ledger.counters,
        events: &ledger.events,
    };

    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &export)
        .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PeriodType;
    use chrono::NaiveDate;

    #[test]
    fn export_shape_is_stable() {
        let ledger = CompanyLedger {
            company_id: "0000320193".to_string(),
            events: vec![DividendEvent {
                effective_date: NaiveDate::from_ymd_opt(2024, 3, 30).unwrap(),
                amount: 0.24,
                fiscal_year: Some(2024),
                fiscal_quarter: Some(2),
                period_type: PeriodType::Quarterly,
                confidence: 1.0,
                needs_review: false,
                confidence_reasons: vec![],
            }],
            counters: RunCounters {
                facts_seen: 1,
                events_emitted: 1,
                ..RunCounters::default()
            },
        };
        let export = LedgerExport {
            company_id: &ledger.company_id,
            entity_name: Some("Apple Inc."),
            counters: &ledger.counters,
            events: &ledger.events,
        };
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["company_id"], "0000320193");
        assert_eq!(json["events"][0]["effective_date"], "2024-03-30");
        assert_eq!(json["events"][0]["period_type"], "quarterly");
        assert_eq!(json["counters"]["events_emitted"], 1);
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let ledger = CompanyLedger {
            company_id: "c".to_string(),
            events: vec![],
            counters: RunCounters::default(),
        };
        let err =
            write_ledger_json(Path::new("/nonexistent/dir/out.json"), &ledger, None).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
