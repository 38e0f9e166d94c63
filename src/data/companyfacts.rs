//! Company-facts document model and raw-fact extraction.
//!
//! The fetch collaborator hands over one JSON document per company with the
//! shape `facts.<taxonomy>.<tag>.units.<unit>[]`, each entry carrying value,
//! period dates, fiscal tags, and filing provenance. This module is
//! responsible for turning that heterogeneous document into a flat
//! `Vec<RawFact>` that is safe to feed to the engine.
//!
//! Design goals:
//! - **Lenient entry parsing**: every field the engine validates is optional
//!   here; the Normalizer owns rejection and counting, not the ingest layer.
//! - **Deterministic extraction order**: tags are walked in a fixed order and
//!   units in lexicographic order, so re-reading the same document always
//!   yields the same fact sequence.
//! - **No filtering**: the document is passed through as-is; dedup and
//!   annual-total logic live in the engine.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::{FiscalPeriod, RawFact};
use crate::error::AppError;

/// Disclosure tags that carry per-share dividend data, walked in this order.
pub const DIVIDEND_TAGS: [&str; 4] = [
    "CommonStockDividendsPerShareDeclared",
    "CommonStockDividendsPerShareCashPaid",
    "DividendsCommonStock",
    "DividendsCommonStockCash",
];

const GAAP_TAXONOMY: &str = "us-gaap";

/// Top-level company-facts document.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyFactsDoc {
    pub cik: Option<u64>,
    #[serde(rename = "entityName")]
    pub entity_name: Option<String>,
    #[serde(default)]
    pub facts: BTreeMap<String, BTreeMap<String, TagFacts>>,
}

/// All reported facts under one disclosure tag.
#[derive(Debug, Clone, Deserialize)]
pub struct TagFacts {
    pub label: Option<String>,
    #[serde(default)]
    pub units: BTreeMap<String, Vec<FactEntry>>,
}

/// One reported fact. Everything is optional; validation happens downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct FactEntry {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub val: Option<f64>,
    pub fy: Option<i32>,
    pub fp: Option<String>,
    pub form: Option<String>,
    pub filed: Option<NaiveDate>,
    pub accn: Option<String>,
}

impl CompanyFactsDoc {
    /// Canonical company identifier: the zero-padded 10-digit CIK.
    pub fn company_id(&self) -> String {
        match self.cik {
            Some(cik) => format!("{cik:010}"),
            None => "unknown".to_string(),
        }
    }
}

/// Read and parse a company-facts JSON document from disk.
pub fn load_company_facts(path: &Path) -> Result<CompanyFactsDoc, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::input(format!("Failed to parse '{}': {e}", path.display())))
}

/// Flatten the dividend tags of a document into raw facts.
///
/// Walks `us-gaap` only; other taxonomies do not carry the dividend tags.
pub fn extract_raw_facts(doc: &CompanyFactsDoc) -> Vec<RawFact> {
    let mut facts = Vec::new();

    let Some(gaap) = doc.facts.get(GAAP_TAXONOMY) else {
        return facts;
    };

    for tag in DIVIDEND_TAGS {
        let Some(tag_facts) = gaap.get(tag) else {
            continue;
        };
        for (unit, entries) in &tag_facts.units {
            for entry in entries {
                facts.push(RawFact {
                    amount: entry.val,
                    period_start: entry.start,
                    period_end: entry.end,
                    fiscal_year: entry.fy,
                    fiscal_period: FiscalPeriod::parse(entry.fp.as_deref()),
                    form_type: entry.form.clone().unwrap_or_default(),
                    unit: unit.clone(),
                    filed: entry.filed,
                    source_tag: tag.to_string(),
                    accession: entry.accn.clone(),
                });
            }
        }
    }

    facts
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DOC: &str = r#"{
        "cik": 320193,
        "entityName": "Apple Inc.",
        "facts": {
            "us-gaap": {
                "CommonStockDividendsPerShareDeclared": {
                    "label": "Common Stock, Dividends, Per Share, Declared",
                    "units": {
                        "USD/shares": [
                            {
                                "start": "2023-12-31",
                                "end": "2024-03-30",
                                "val": 0.24,
                                "accn": "0000320193-24-000055",
                                "fy": 2024,
                                "fp": "Q2",
                                "form": "10-Q",
                                "filed": "2024-05-02"
                            },
                            {
                                "end": "2023-12-30",
                                "val": 0.96,
                                "fy": 2023,
                                "fp": "FY",
                                "form": "10-K",
                                "filed": "2024-02-01"
                            }
                        ]
                    }
                },
                "DividendsCommonStockCash": {
                    "units": {
                        "USD": [
                            { "end": "2024-03-30", "val": 3700000000.0, "form": "10-Q" }
                        ]
                    }
                }
            }
        }
    }"#;

    #[test]
    fn parses_and_extracts_in_fixed_order() {
        let doc: CompanyFactsDoc = serde_json::from_str(SAMPLE_DOC).unwrap();
        assert_eq!(doc.company_id(), "0000320193");
        assert_eq!(doc.entity_name.as_deref(), Some("Apple Inc."));

        let facts = extract_raw_facts(&doc);
        assert_eq!(facts.len(), 3);

        let first = &facts[0];
        assert_eq!(first.amount, Some(0.24));
        assert_eq!(first.unit, "USD/shares");
        assert_eq!(first.fiscal_period, FiscalPeriod::Q2);
        assert_eq!(first.form_type, "10-Q");
        assert_eq!(
            first.filed,
            Some(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap())
        );
        assert_eq!(first.source_tag, "CommonStockDividendsPerShareDeclared");

        let fy = &facts[1];
        assert_eq!(fy.fiscal_period, FiscalPeriod::Fy);
        assert_eq!(fy.period_start, None);

        // Aggregate-dollar tag comes last and keeps its USD unit, which the
        // Normalizer will reject.
        assert_eq!(facts[2].unit, "USD");
    }

    #[test]
    fn missing_taxonomy_yields_no_facts() {
        let doc: CompanyFactsDoc = serde_json::from_str(r#"{"cik": 1, "facts": {}}"#).unwrap();
        assert!(extract_raw_facts(&doc).is_empty());
        let doc: CompanyFactsDoc = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(doc.company_id(), "unknown");
        assert!(extract_raw_facts(&doc).is_empty());
    }

    #[test]
    fn load_reports_missing_file_as_input_error() {
        let err = load_company_facts(Path::new("/nonexistent/companyfacts.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
