//! Fact normalization & quality-scoring engine.
//!
//! Responsibilities, in pipeline order:
//!
//! - normalize raw tagged facts into candidates (skip malformed, count them)
//! - classify reporting-period durations
//! - compute per-(company, year) population statistics and filter annual totals
//! - collapse duplicates onto unique effective dates
//! - apply the ordered confidence penalty table
//! - emit the date-ordered event sequence plus run counters
//!
//! The engine performs no I/O, holds no state between runs, and never fails
//! for a company's data: it always terminates with a (possibly empty) event
//! sequence. Batches for distinct companies share nothing and may run in
//! parallel.

pub mod annual;
pub mod classify;
pub mod dedup;
pub mod normalize;
pub mod score;

use rayon::prelude::*;

use crate::domain::{DividendEvent, EngineConfig, RawFact, RunCounters};

pub use annual::{StatsTable, YearStats, build_year_stats, mark_annual_totals};
pub use classify::{classify_days, classify_periods};
pub use dedup::dedup_by_date;
pub use normalize::normalize_facts;
pub use score::{ConfidenceScore, score_candidate};

/// One company's raw fact set, as handed over by the fetch collaborator.
#[derive(Debug, Clone)]
pub struct CompanyBatch {
    pub company_id: String,
    pub facts: Vec<RawFact>,
}

/// One company's vetted dividend ledger plus run counters.
#[derive(Debug, Clone)]
pub struct CompanyLedger {
    pub company_id: String,
    pub events: Vec<DividendEvent>,
    pub counters: RunCounters,
}

/// Run the full pipeline over one company's fact set.
///
/// Idempotent and side-effect-free: re-running over the same input yields a
/// bit-identical ledger, reason lists included.
pub fn process_company(company_id: &str, facts: &[RawFact], config: &EngineConfig) -> CompanyLedger {
    let mut counters = RunCounters {
        facts_seen: facts.len(),
        ..RunCounters::default()
    };

    // 1-2) Normalize and classify.
    let normalized = normalize_facts(facts, config);
    counters.malformed_skipped = normalized.skipped;
    let mut candidates = normalized.candidates;
    classify_periods(&mut candidates);

    // 3) Population statistics, then annual-total filtering. The statistics
    //    table is computed once here and reused by the scorer below.
    let stats = build_year_stats(&candidates, config);
    counters.annual_totals_filtered = mark_annual_totals(&mut candidates, &stats);
    candidates.retain(|c| !c.is_annual_total);

    // 4) One candidate per effective date.
    let deduped = dedup_by_date(candidates);
    counters.duplicates_resolved = deduped.duplicates_resolved;

    // 5-6) Score and assemble. `dedup_by_date` already yields date order.
    let company_override = config.override_for(company_id);
    let mut events = Vec::with_capacity(deduped.candidates.len());
    for candidate in &deduped.candidates {
        let year_stats = stats.get(&candidate.stats_year());
        let score = score_candidate(candidate, year_stats, company_override, config);
        if score.needs_review {
            counters.flagged_for_review += 1;
        }
        events.push(DividendEvent {
            effective_date: candidate.effective_date,
            amount: candidate.amount,
            fiscal_year: candidate.fiscal_year,
            fiscal_quarter: candidate.fiscal_quarter,
            period_type: candidate.period_type,
            confidence: score.confidence,
            needs_review: score.needs_review,
            confidence_reasons: score.reasons,
        });
    }
    counters.events_emitted = events.len();

    CompanyLedger {
        company_id: company_id.to_string(),
        events,
        counters,
    }
}

/// Process many companies in parallel. Output order follows input order.
pub fn process_batches(batches: &[CompanyBatch], config: &EngineConfig) -> Vec<CompanyLedger> {
    batches
        .par_iter()
        .map(|batch| process_company(&batch.company_id, &batch.facts, config))
        .collect()
}
