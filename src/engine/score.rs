//! Confidence scoring: ordered multiplicative penalty rules.
//!
//! Every surviving candidate starts at 1.0 and each triggered rule multiplies
//! the score and appends a human-readable reason. Multiplication commutes, so
//! rule order only affects the reason list — but that list is part of the
//! output contract (deterministic, testable), so the order below is fixed.
//!
//! The table is data-driven: a rule is a (label, multiplier, triggered)
//! triple, evaluated in sequence. Adding a rule means adding a row, not
//! touching control flow.
//!
//! The median-ratio rules are mutually exclusive: a fact more than 3x the
//! fiscal-year median takes the 3x penalty only, never both. They fire only
//! when the year has a defined quarterly population.

use crate::domain::{CompanyOverride, DividendCandidate, EngineConfig, PeriodType};
use crate::engine::annual::YearStats;

/// Score and reason list for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceScore {
    /// Final score, clamped to [0.0, 1.0].
    pub confidence: f64,
    /// True iff the score fell below the review threshold.
    pub needs_review: bool,
    /// One entry per triggered rule, in table order.
    pub reasons: Vec<String>,
}

/// Score one candidate against its fiscal year's population statistics.
///
/// Pure and deterministic: identical candidate + identical statistics always
/// yield the identical score and reason order.
pub fn score_candidate(
    candidate: &DividendCandidate,
    stats: Option<&YearStats>,
    company_override: Option<&CompanyOverride>,
    config: &EngineConfig,
) -> ConfidenceScore {
    let median_ratio = stats
        .filter(|s| s.median > 0.0)
        .map(|s| candidate.amount / s.median);

    let rules: Vec<(String, f64, bool)> = vec![
        (
            format!("amount > ${:.2}", config.max_reasonable_amount),
            0.5,
            candidate.amount > config.max_reasonable_amount,
        ),
        (
            format!("amount < ${:.2}", config.min_reasonable_amount),
            0.7,
            candidate.amount < config.min_reasonable_amount,
        ),
        (
            format!("amount > {:.0}x fiscal-year median", config.outlier_ratio),
            0.6,
            median_ratio.is_some_and(|r| r > config.outlier_ratio),
        ),
        (
            format!("amount > {:.0}x fiscal-year median", config.elevated_ratio),
            0.8,
            median_ratio.is_some_and(|r| r > config.elevated_ratio && r <= config.outlier_ratio),
        ),
        (
            "annual period duration".to_string(),
            0.3,
            candidate.period_type == PeriodType::Annual,
        ),
        (
            "semi-annual period".to_string(),
            0.5,
            candidate.period_type == PeriodType::SemiAnnual,
        ),
        (
            "missing fiscal year or quarter".to_string(),
            0.9,
            candidate.fiscal_year.is_none() || candidate.fiscal_quarter.is_none(),
        ),
        (
            "10-K filing without fiscal quarter".to_string(),
            0.8,
            candidate.form_type == "10-K" && candidate.fiscal_quarter.is_none(),
        ),
        (
            "exceeds company-specific ceiling".to_string(),
            0.7,
            company_override.is_some_and(|o| candidate.amount > o.max_reasonable_amount),
        ),
    ];

    let mut confidence = 1.0f64;
    let mut reasons = Vec::new();
    for (label, multiplier, triggered) in rules {
        if triggered {
            confidence *= multiplier;
            reasons.push(label);
        }
    }

    let confidence = confidence.clamp(0.0, 1.0);
    ConfidenceScore {
        confidence,
        needs_review: confidence < config.review_threshold,
        reasons,
    }
}
