//! Shared processing pipeline used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! document load -> fact extraction -> engine -> summary
//!
//! The CLI then focuses on presentation and exports. Companies are
//! independent, so a multi-document run fans out across a rayon pool.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::data::{extract_raw_facts, load_company_facts};
use crate::domain::EngineConfig;
use crate::engine::{CompanyLedger, process_company};
use crate::error::AppError;
use crate::report::{SummaryStats, summarize};

/// All computed outputs for one company's document.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub entity_name: Option<String>,
    pub ledger: CompanyLedger,
    pub summary: Option<SummaryStats>,
}

/// Process a single company-facts document.
pub fn process_file(path: &Path, config: &EngineConfig) -> Result<RunOutput, AppError> {
    let doc = load_company_facts(path)?;
    let facts = extract_raw_facts(&doc);
    let ledger = process_company(&doc.company_id(), &facts, config);
    let summary = summarize(&ledger.events);
    Ok(RunOutput {
        entity_name: doc.entity_name.clone(),
        ledger,
        summary,
    })
}

/// Process many documents in parallel, preserving input order.
///
/// Any unreadable document fails the whole run; a readable document with
/// unusable facts just yields an empty ledger (the engine never fails on
/// data).
pub fn process_files(paths: &[PathBuf], config: &EngineConfig) -> Result<Vec<RunOutput>, AppError> {
    paths
        .par_iter()
        .map(|path| process_file(path, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_document_fails_the_run() {
        let config = EngineConfig::default();
        let paths = vec![PathBuf::from("/nonexistent/companyfacts.json")];
        let err = process_files(&paths, &config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
