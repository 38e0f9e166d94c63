//! Reporting utilities: summary statistics and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the engine stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::DividendEvent;
use crate::math::{coefficient_of_variation, mean, median, stdev};

/// How regular a company's payout amounts look, from the coefficient of
/// variation of the emitted amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    VeryStable,
    Stable,
    Variable,
    HighlyVariable,
}

impl Stability {
    pub fn from_cv(cv: f64) -> Self {
        if cv < 0.1 {
            Stability::VeryStable
        } else if cv < 0.3 {
            Stability::Stable
        } else if cv < 0.5 {
            Stability::Variable
        } else {
            Stability::HighlyVariable
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Stability::VeryStable => "very stable",
            Stability::Stable => "stable",
            Stability::Variable => "variable",
            Stability::HighlyVariable => "highly variable",
        }
    }
}

/// Summary statistics over one company's emitted events.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub amount_min: f64,
    pub amount_max: f64,
    pub amount_mean: f64,
    pub amount_median: f64,
    pub confidence_mean: f64,
    pub needs_review_count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Sample stdev of amounts; absent below 2 events.
    pub amount_stdev: Option<f64>,
    pub coefficient_of_variation: Option<f64>,
    pub pattern: Option<Stability>,
}

/// Summarize an event sequence. `None` for an empty ledger.
pub fn summarize(events: &[DividendEvent]) -> Option<SummaryStats> {
    if events.is_empty() {
        return None;
    }

    let amounts: Vec<f64> = events.iter().map(|e| e.amount).collect();
    let confidences: Vec<f64> = events.iter().map(|e| e.confidence).collect();

    let amount_stdev = stdev(&amounts);
    let cv = coefficient_of_variation(&amounts);

    Some(SummaryStats {
        count: events.len(),
        amount_min: amounts.iter().cloned().fold(f64::INFINITY, f64::min),
        amount_max: amounts.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        // Non-empty slice, both are Some.
        amount_mean: mean(&amounts).unwrap_or(0.0),
        amount_median: median(&amounts).unwrap_or(0.0),
        confidence_mean: mean(&confidences).unwrap_or(0.0),
        needs_review_count: events.iter().filter(|e| e.needs_review).count(),
        first_date: events.iter().map(|e| e.effective_date).min()?,
        last_date: events.iter().map(|e| e.effective_date).max()?,
        amount_stdev,
        coefficient_of_variation: cv,
        pattern: cv.map(Stability::from_cv),
    })
}
