//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during a company's batch run
//! - exported to JSON for the persistence collaborator
//! - reloaded later for reporting or comparisons

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The fiscal reporting sub-period tag attached to a fact by its source filing.
///
/// `Fy` marks a full-fiscal-year aggregate and is strong evidence that the fact
/// is a cumulative annual total rather than a discrete payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FiscalPeriod {
    Q1,
    Q2,
    Q3,
    Q4,
    Fy,
    Hy,
    Unknown,
}

impl FiscalPeriod {
    /// Parse the upstream tag string (`"Q1"`, `"FY"`, ...). Anything
    /// unrecognized (including an absent tag) maps to `Unknown`.
    pub fn parse(tag: Option<&str>) -> Self {
        match tag {
            Some("Q1") => FiscalPeriod::Q1,
            Some("Q2") => FiscalPeriod::Q2,
            Some("Q3") => FiscalPeriod::Q3,
            Some("Q4") => FiscalPeriod::Q4,
            Some("FY") => FiscalPeriod::Fy,
            Some("H1") | Some("H2") | Some("HY") => FiscalPeriod::Hy,
            _ => FiscalPeriod::Unknown,
        }
    }

    /// Fiscal quarter number (1-4) when the tag is a quarter tag.
    pub fn quarter(self) -> Option<u8> {
        match self {
            FiscalPeriod::Q1 => Some(1),
            FiscalPeriod::Q2 => Some(2),
            FiscalPeriod::Q3 => Some(3),
            FiscalPeriod::Q4 => Some(4),
            _ => None,
        }
    }
}

/// Reporting-period duration bucket derived from a fact's start/end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    /// Only `period_end` present; the fact is a point-in-time declaration.
    Instant,
    Quarterly,
    SemiAnnual,
    Annual,
    /// Duration falls outside every classification window. Not necessarily
    /// wrong (boundary variance is common), so penalized rather than rejected.
    Unknown,
}

impl PeriodType {
    pub fn display_name(self) -> &'static str {
        match self {
            PeriodType::Instant => "instant",
            PeriodType::Quarterly => "quarterly",
            PeriodType::SemiAnnual => "semi_annual",
            PeriodType::Annual => "annual",
            PeriodType::Unknown => "unknown",
        }
    }
}

/// A single tagged per-share fact, exactly as the fetch collaborator hands it
/// over. Immutable input; the fetch layer applies no filtering or dedup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFact {
    /// Per-share amount. Optional here so the Normalizer can reject facts
    /// missing it rather than the ingest layer failing the batch.
    pub amount: Option<f64>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub fiscal_year: Option<i32>,
    pub fiscal_period: FiscalPeriod,
    /// Source form type, e.g. "10-Q", "10-K", "10-Q/A".
    pub form_type: String,
    /// Unit tag from the source document; must be a recognized per-share
    /// currency unit or the fact is dropped.
    pub unit: String,
    /// Date the source form was filed. Used by the Deduplicator to prefer
    /// the most recent restatement of the same economic event.
    pub filed: Option<NaiveDate>,
    /// Disclosure tag the fact came from (e.g.
    /// "CommonStockDividendsPerShareDeclared").
    pub source_tag: String,
    /// Filing accession number, when the source document carries one.
    pub accession: Option<String>,
}

/// The engine's working representation of one fact: all `RawFact` content
/// plus derived classification fields. Exists only for the duration of one
/// company's batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct DividendCandidate {
    pub amount: f64,
    /// Canonical ex-dividend proxy; equals the fact's `period_end`.
    pub effective_date: NaiveDate,
    pub period_start: Option<NaiveDate>,
    /// `period_end - period_start` in days, when both dates exist.
    pub period_days: Option<i64>,
    pub period_type: PeriodType,
    pub fiscal_year: Option<i32>,
    pub fiscal_period: FiscalPeriod,
    pub fiscal_quarter: Option<u8>,
    pub form_type: String,
    pub filed: Option<NaiveDate>,
    pub source_tag: String,
    /// Set by the Annual-Total Detector; annual totals feed population
    /// statistics but are never emitted as events.
    pub is_annual_total: bool,
}

impl DividendCandidate {
    /// Year bucket used for population statistics: the tagged fiscal year
    /// when present, else the calendar year of the effective date.
    pub fn stats_year(&self) -> i32 {
        self.fiscal_year.unwrap_or_else(|| self.effective_date.year())
    }

    /// Whether the fact carries complete fiscal metadata (year + quarter).
    pub fn has_fiscal_metadata(&self) -> bool {
        self.fiscal_year.is_some() && self.fiscal_quarter.is_some()
    }
}

/// A vetted discrete dividend event, the engine's terminal artifact.
///
/// At most one event exists per (company, effective_date). The persistence
/// collaborator owns all further mutation (review-state transitions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendEvent {
    pub effective_date: NaiveDate,
    pub amount: f64,
    pub fiscal_year: Option<i32>,
    pub fiscal_quarter: Option<u8>,
    pub period_type: PeriodType,
    /// Heuristic trust measure in [0.0, 1.0].
    pub confidence: f64,
    /// True iff `confidence < review_threshold` (0.8 by default).
    pub needs_review: bool,
    /// One entry per triggered penalty, in rule-table order.
    pub confidence_reasons: Vec<String>,
}

/// Per-run counters reported alongside the event sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    /// Raw facts handed to the Normalizer.
    pub facts_seen: usize,
    /// Facts dropped for missing fields, non-positive amounts, or bad units.
    pub malformed_skipped: usize,
    /// Candidates marked as cumulative annual totals and filtered.
    pub annual_totals_filtered: usize,
    /// Candidates discarded because another fact for the same date won.
    pub duplicates_resolved: usize,
    /// Events emitted.
    pub events_emitted: usize,
    /// Events with `needs_review == true`.
    pub flagged_for_review: usize,
}

/// Per-company scoring override, injected via `EngineConfig::overrides`.
///
/// Some issuers are known to have unusual payout levels (the upstream docs
/// carry a short hardcoded list); modeling this as injected configuration
/// keeps the engine unit-testable without embedded reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompanyOverride {
    /// Company-specific ceiling on a plausible per-share amount.
    pub max_reasonable_amount: f64,
}

/// Engine thresholds. `Default` reproduces the documented production values;
/// every scenario in the acceptance tests assumes these defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Amounts above this are penalized as implausibly high ($/share).
    pub max_reasonable_amount: f64,
    /// Amounts below this are penalized as implausibly low ($/share).
    pub min_reasonable_amount: f64,
    /// Ratio to the fiscal-year quarterly median above which a fact is an
    /// outlier (annual-total candidate and heavy scoring penalty).
    pub outlier_ratio: f64,
    /// Ratio above which a fact is merely elevated (lighter penalty).
    pub elevated_ratio: f64,
    /// Events scoring below this are flagged for human review.
    pub review_threshold: f64,
    /// Minimum quarterly-classified facts per year for the ratio checks;
    /// below this the population statistics are undefined.
    pub min_quarterly_population: usize,
    /// Unit tags accepted as per-share currency amounts.
    pub recognized_units: Vec<String>,
    /// Injected per-company overrides, keyed by company id.
    pub overrides: HashMap<String, CompanyOverride>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_reasonable_amount: 50.0,
            min_reasonable_amount: 0.01,
            outlier_ratio: 3.0,
            elevated_ratio: 2.0,
            review_threshold: 0.8,
            min_quarterly_population: 2,
            recognized_units: vec!["USD/shares".to_string()],
            overrides: HashMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn is_recognized_unit(&self, unit: &str) -> bool {
        self.recognized_units.iter().any(|u| u == unit)
    }

    pub fn override_for(&self, company_id: &str) -> Option<&CompanyOverride> {
        self.overrides.get(company_id)
    }
}
