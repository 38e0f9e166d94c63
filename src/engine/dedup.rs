//! Duplicate resolution: one candidate per effective date.
//!
//! The same economic event commonly appears several times in a fact set:
//! declared vs paid tags, original filings vs amended restatements, a 10-Q
//! and the year's 10-K both covering the quarter. Candidates are grouped on
//! the effective date and exactly one representative survives per group.
//!
//! Preference order within a group (deterministic):
//!
//! 1. most recently filed source form (restatements supersede originals)
//! 2. complete fiscal metadata (year + quarter) over incomplete
//! 3. quarterly classification, nearest to a nominal quarter length
//! 4. first in input order (stable fallback)

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{DividendCandidate, PeriodType};

/// Nominal quarter length in days, for the proximity tiebreak.
const NOMINAL_QUARTER_DAYS: i64 = 91;

/// Output of the deduplication pass.
#[derive(Debug, Clone)]
pub struct DedupedCandidates {
    pub candidates: Vec<DividendCandidate>,
    /// Candidates discarded because another fact for the same date won.
    pub duplicates_resolved: usize,
}

/// Collapse candidates onto unique effective dates, date-ordered.
pub fn dedup_by_date(candidates: Vec<DividendCandidate>) -> DedupedCandidates {
    let mut by_date: BTreeMap<NaiveDate, Vec<DividendCandidate>> = BTreeMap::new();
    for c in candidates {
        by_date.entry(c.effective_date).or_default().push(c);
    }

    let mut out = Vec::with_capacity(by_date.len());
    let mut duplicates_resolved = 0usize;

    for (_, group) in by_date {
        duplicates_resolved += group.len() - 1;
        out.push(resolve_group(group));
    }

    DedupedCandidates {
        candidates: out,
        duplicates_resolved,
    }
}

/// Pick the winning candidate from a same-date group.
fn resolve_group(mut group: Vec<DividendCandidate>) -> DividendCandidate {
    let mut best_idx = 0usize;
    for idx in 1..group.len() {
        if beats(&group[idx], &group[best_idx]) {
            best_idx = idx;
        }
    }
    group.swap_remove(best_idx)
}

/// Whether `a` strictly beats the current winner `b`.
fn beats(a: &DividendCandidate, b: &DividendCandidate) -> bool {
    // 1. Most recently filed wins; a known filing date beats an unknown one.
    match (a.filed, b.filed) {
        (Some(fa), Some(fb)) if fa != fb => return fa > fb,
        (Some(_), None) => return true,
        (None, Some(_)) => return false,
        _ => {}
    }

    // 2. Complete fiscal metadata wins.
    if a.has_fiscal_metadata() != b.has_fiscal_metadata() {
        return a.has_fiscal_metadata();
    }

    // 3. Quarterly classification wins; among quarterly, closest to a
    //    nominal quarter.
    let a_quarterly = a.period_type == PeriodType::Quarterly;
    let b_quarterly = b.period_type == PeriodType::Quarterly;
    if a_quarterly != b_quarterly {
        return a_quarterly;
    }
    if a_quarterly && b_quarterly {
        if let (Some(da), Some(db)) = (a.period_days, b.period_days) {
            let dist_a = (da - NOMINAL_QUARTER_DAYS).abs();
            let dist_b = (db - NOMINAL_QUARTER_DAYS).abs();
            if dist_a != dist_b {
                return dist_a < dist_b;
            }
        }
    }

    // 4. Keep the incumbent (input order).
    false
}
