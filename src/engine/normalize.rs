//! Fact normalization: raw tagged facts to working candidates.
//!
//! This stage is a pure transform with skip-don't-raise semantics:
//!
//! - **Strict requirements** (`period_end`, `amount`, a recognized per-share
//!   unit, a positive amount) — facts failing any of these are dropped and
//!   counted, never turned into an error. A batch always continues.
//! - **No classification here**: period/duration bucketing is the next
//!   stage's job; this one only carries fields across and derives
//!   `period_days` and the effective date.

use crate::domain::{DividendCandidate, EngineConfig, PeriodType, RawFact};

/// Output of the normalization pass.
#[derive(Debug, Clone)]
pub struct NormalizedFacts {
    pub candidates: Vec<DividendCandidate>,
    /// Facts dropped for missing fields, bad units, or non-positive amounts.
    pub skipped: usize,
}

/// Convert raw facts into candidates, dropping malformed entries.
pub fn normalize_facts(facts: &[RawFact], config: &EngineConfig) -> NormalizedFacts {
    let mut candidates = Vec::with_capacity(facts.len());
    let mut skipped = 0usize;

    for fact in facts {
        match normalize_fact(fact, config) {
            Some(candidate) => candidates.push(candidate),
            None => skipped += 1,
        }
    }

    NormalizedFacts { candidates, skipped }
}

/// Normalize a single fact. `None` means the fact is malformed and skipped.
fn normalize_fact(fact: &RawFact, config: &EngineConfig) -> Option<DividendCandidate> {
    let amount = fact.amount?;
    let effective_date = fact.period_end?;

    // Non-positive amounts are rejected outright, never scored.
    if amount <= 0.0 || !amount.is_finite() {
        return None;
    }

    if !config.is_recognized_unit(&fact.unit) {
        return None;
    }

    let period_days = fact
        .period_start
        .map(|start| (effective_date - start).num_days());

    Some(DividendCandidate {
        amount,
        effective_date,
        period_start: fact.period_start,
        period_days,
        // Placeholder until the Period Classifier runs.
        period_type: PeriodType::Unknown,
        fiscal_year: fact.fiscal_year,
        fiscal_period: fact.fiscal_period,
        fiscal_quarter: fact.fiscal_period.quarter(),
        form_type: fact.form_type.clone(),
        filed: fact.filed,
        source_tag: fact.source_tag.clone(),
        is_annual_total: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FiscalPeriod;
    use chrono::NaiveDate;

    fn fact(amount: Option<f64>, end: Option<NaiveDate>, unit: &str) -> RawFact {
        RawFact {
            amount,
            period_start: None,
            period_end: end,
            fiscal_year: Some(2024),
            fiscal_period: FiscalPeriod::Q1,
            form_type: "10-Q".to_string(),
            unit: unit.to_string(),
            filed: None,
            source_tag: "CommonStockDividendsPerShareDeclared".to_string(),
            accession: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn drops_facts_missing_amount_or_end_date() {
        let config = EngineConfig::default();
        let facts = vec![
            fact(Some(0.25), Some(date(2024, 3, 30)), "USD/shares"),
            fact(None, Some(date(2024, 3, 30)), "USD/shares"),
            fact(Some(0.25), None, "USD/shares"),
        ];
        let out = normalize_facts(&facts, &config);
        assert_eq!(out.candidates.len(), 1);
        assert_eq!(out.skipped, 2);
    }

    #[test]
    fn drops_non_positive_amounts_and_bad_units() {
        let config = EngineConfig::default();
        let facts = vec![
            fact(Some(0.0), Some(date(2024, 3, 30)), "USD/shares"),
            fact(Some(-0.25), Some(date(2024, 3, 30)), "USD/shares"),
            fact(Some(1_000_000.0), Some(date(2024, 3, 30)), "USD"),
            fact(Some(0.25), Some(date(2024, 3, 30)), "pure"),
        ];
        let out = normalize_facts(&facts, &config);
        assert!(out.candidates.is_empty());
        assert_eq!(out.skipped, 4);
    }

    #[test]
    fn derives_period_days_and_effective_date() {
        let config = EngineConfig::default();
        let mut raw = fact(Some(0.25), Some(date(2024, 3, 30)), "USD/shares");
        raw.period_start = Some(date(2023, 12, 31));

        let out = normalize_facts(&[raw], &config);
        let c = &out.candidates[0];
        assert_eq!(c.effective_date, date(2024, 3, 30));
        assert_eq!(c.period_days, Some(90));
        assert_eq!(c.fiscal_quarter, Some(1));
        assert!(!c.is_annual_total);
    }

    #[test]
    fn instant_facts_have_no_period_days() {
        let config = EngineConfig::default();
        let out = normalize_facts(
            &[fact(Some(0.25), Some(date(2024, 3, 30)), "USD/shares")],
            &config,
        );
        assert_eq!(out.candidates[0].period_days, None);
    }
}
