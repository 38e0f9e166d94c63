//! Synthetic company fact-set generation.
//!
//! Produces a realistic dividend fact stream without touching the network:
//! a quarterly cadence with mild noise and slow growth, one cumulative FY
//! fact per year (the disclosure artifact the engine exists to filter), and
//! occasional restated duplicates. Useful for demos and for exercising the
//! full pipeline in tests.
//!
//! Generation is fully deterministic for a given `SampleConfig` (seeded
//! `StdRng`); the engine must then reproduce the same ledger on every run.

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{FiscalPeriod, RawFact};
use crate::error::AppError;

/// Settings for the synthetic fact stream.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub seed: u64,
    /// First fiscal year generated.
    pub start_year: i32,
    /// Number of consecutive fiscal years.
    pub years: usize,
    /// Per-share quarterly amount in the first year.
    pub base_amount: f64,
    /// Annual growth applied to the quarterly amount.
    pub growth: f64,
    /// Std dev of the per-quarter noise, as a fraction of the amount.
    pub noise: f64,
    /// Probability that a quarter also gets a restated duplicate filing.
    pub restatement_prob: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_year: 2020,
            years: 4,
            base_amount: 0.22,
            growth: 0.05,
            noise: 0.02,
            restatement_prob: 0.1,
        }
    }
}

/// Nominal quarter-end dates (month, day) for a calendar-aligned fiscal year.
const QUARTER_ENDS: [(u32, u32); 4] = [(3, 30), (6, 29), (9, 28), (12, 30)];

const QUARTER_TAGS: [FiscalPeriod; 4] = [
    FiscalPeriod::Q1,
    FiscalPeriod::Q2,
    FiscalPeriod::Q3,
    FiscalPeriod::Q4,
];

/// Generate a deterministic synthetic fact set.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<RawFact>, AppError> {
    if config.years == 0 {
        return Err(AppError::input("Sample years must be > 0."));
    }
    if !(config.base_amount.is_finite() && config.base_amount > 0.0) {
        return Err(AppError::input("Sample base amount must be > 0."));
    }
    if !(0.0..=1.0).contains(&config.restatement_prob) {
        return Err(AppError::input("Restatement probability must be in [0, 1]."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::input(format!("Noise distribution error: {e}")))?;

    let mut facts = Vec::new();

    for year_idx in 0..config.years {
        let year = config.start_year + year_idx as i32;
        let level = config.base_amount * (1.0 + config.growth).powi(year_idx as i32);
        let mut year_total = 0.0;

        for (q, (&(month, day), &tag)) in
            QUARTER_ENDS.iter().zip(QUARTER_TAGS.iter()).enumerate()
        {
            let end = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| AppError::input("Invalid quarter-end date in sample config."))?;
            let noise: f64 = normal.sample(&mut rng);
            let amount = round_cents(level * (1.0 + config.noise * noise)).max(0.01);
            year_total += amount;

            let fact = RawFact {
                amount: Some(amount),
                period_start: Some(end - Duration::days(91)),
                period_end: Some(end),
                fiscal_year: Some(year),
                fiscal_period: tag,
                form_type: "10-Q".to_string(),
                unit: "USD/shares".to_string(),
                filed: Some(end + Duration::days(32)),
                source_tag: "CommonStockDividendsPerShareDeclared".to_string(),
                accession: Some(format!("sample-{year}-q{}", q + 1)),
            };

            // Occasional restatement of the same quarter, filed later.
            if rng.gen_bool(config.restatement_prob) {
                let mut restated = fact.clone();
                restated.form_type = "10-Q/A".to_string();
                restated.filed = Some(end + Duration::days(95));
                restated.accession = Some(format!("sample-{year}-q{}-a", q + 1));
                facts.push(fact);
                facts.push(restated);
            } else {
                facts.push(fact);
            }
        }

        // The cumulative FY fact the disclosure format tacks on.
        let fy_end = NaiveDate::from_ymd_opt(year, 12, 30)
            .ok_or_else(|| AppError::input("Invalid year-end date in sample config."))?;
        facts.push(RawFact {
            amount: Some(round_cents(year_total)),
            period_start: Some(fy_end - Duration::days(364)),
            period_end: Some(fy_end),
            fiscal_year: Some(year),
            fiscal_period: FiscalPeriod::Fy,
            form_type: "10-K".to_string(),
            unit: "USD/shares".to_string(),
            filed: Some(fy_end + Duration::days(60)),
            source_tag: "CommonStockDividendsPerShareDeclared".to_string(),
            accession: Some(format!("sample-{year}-fy")),
        });
    }

    Ok(facts)
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
