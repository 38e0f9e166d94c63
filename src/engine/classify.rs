//! Period classification from reporting-period duration.
//!
//! The duration windows are a compatibility contract — downstream scoring and
//! annual-total detection assume exactly these buckets:
//!
//! - [80, 100]   days -> quarterly
//! - [170, 190]  days -> semi_annual
//! - [355, 375]  days -> annual
//! - anything else    -> unknown (penalized, not rejected)
//!
//! Facts with only an end date are `instant`. Many legitimate quarterly
//! periods land just outside the strict window (52/53-week calendars, fiscal
//! shifts); those become `unknown` and lose a little confidence downstream.

use crate::domain::{DividendCandidate, PeriodType};

const QUARTERLY_DAYS: (i64, i64) = (80, 100);
const SEMI_ANNUAL_DAYS: (i64, i64) = (170, 190);
const ANNUAL_DAYS: (i64, i64) = (355, 375);

/// Bucket a period duration in days.
pub fn classify_days(days: i64) -> PeriodType {
    if days >= QUARTERLY_DAYS.0 && days <= QUARTERLY_DAYS.1 {
        PeriodType::Quarterly
    } else if days >= SEMI_ANNUAL_DAYS.0 && days <= SEMI_ANNUAL_DAYS.1 {
        PeriodType::SemiAnnual
    } else if days >= ANNUAL_DAYS.0 && days <= ANNUAL_DAYS.1 {
        PeriodType::Annual
    } else {
        PeriodType::Unknown
    }
}

/// Assign `period_type` to every candidate in place.
pub fn classify_periods(candidates: &mut [DividendCandidate]) {
    for candidate in candidates.iter_mut() {
        candidate.period_type = match candidate.period_days {
            Some(days) => classify_days(days),
            None => PeriodType::Instant,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FiscalPeriod;
    use chrono::NaiveDate;

    fn candidate(days: Option<i64>) -> DividendCandidate {
        DividendCandidate {
            amount: 0.25,
            effective_date: NaiveDate::from_ymd_opt(2024, 3, 30).unwrap(),
            period_start: None,
            period_days: days,
            period_type: PeriodType::Unknown,
            fiscal_year: Some(2024),
            fiscal_period: FiscalPeriod::Q1,
            fiscal_quarter: Some(1),
            form_type: "10-Q".to_string(),
            filed: None,
            source_tag: String::new(),
            is_annual_total: false,
        }
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        assert_eq!(classify_days(80), PeriodType::Quarterly);
        assert_eq!(classify_days(100), PeriodType::Quarterly);
        assert_eq!(classify_days(170), PeriodType::SemiAnnual);
        assert_eq!(classify_days(190), PeriodType::SemiAnnual);
        assert_eq!(classify_days(355), PeriodType::Annual);
        assert_eq!(classify_days(375), PeriodType::Annual);
    }

    #[test]
    fn outside_windows_is_unknown_not_rejected() {
        assert_eq!(classify_days(79), PeriodType::Unknown);
        assert_eq!(classify_days(101), PeriodType::Unknown);
        assert_eq!(classify_days(150), PeriodType::Unknown);
        assert_eq!(classify_days(400), PeriodType::Unknown);
        assert_eq!(classify_days(0), PeriodType::Unknown);
    }

    #[test]
    fn semi_annual_example_duration() {
        // 182 days is a typical half-year period.
        assert_eq!(classify_days(182), PeriodType::SemiAnnual);
    }

    #[test]
    fn end_only_facts_are_instant() {
        let mut cands = vec![candidate(None), candidate(Some(91))];
        classify_periods(&mut cands);
        assert_eq!(cands[0].period_type, PeriodType::Instant);
        assert_eq!(cands[1].period_type, PeriodType::Quarterly);
    }
}
