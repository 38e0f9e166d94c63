//! Terminal report formatting for a company's processed ledger.

use crate::domain::{DividendEvent, RunCounters};
use crate::report::SummaryStats;

/// Format the run header: company, counters, summary statistics.
pub fn format_run_summary(
    company_id: &str,
    entity_name: Option<&str>,
    counters: &RunCounters,
    summary: Option<&SummaryStats>,
) -> String {
    let mut out = String::new();

    out.push_str("=== divfacts - dividend fact ledger ===\n");
    match entity_name {
        Some(name) => out.push_str(&format!("Company: {name} ({company_id})\n")),
        None => out.push_str(&format!("Company: {company_id}\n")),
    }
    out.push_str(&format!(
        "Facts: seen={} | malformed={} | annual totals={} | duplicates={}\n",
        counters.facts_seen,
        counters.malformed_skipped,
        counters.annual_totals_filtered,
        counters.duplicates_resolved,
    ));
    out.push_str(&format!(
        "Events: emitted={} | flagged for review={}\n",
        counters.events_emitted, counters.flagged_for_review,
    ));

    if let Some(s) = summary {
        out.push_str(&format!(
            "Amounts: [{:.4}, {:.4}] | median={:.4} | mean={:.4}\n",
            s.amount_min, s.amount_max, s.amount_median, s.amount_mean,
        ));
        out.push_str(&format!(
            "Dates: {} .. {} | mean confidence={:.3}\n",
            s.first_date, s.last_date, s.confidence_mean,
        ));
        if let (Some(stdev), Some(cv), Some(pattern)) =
            (s.amount_stdev, s.coefficient_of_variation, s.pattern)
        {
            out.push_str(&format!(
                "Pattern: {} (stdev={stdev:.4}, cv={cv:.3})\n",
                pattern.display_name(),
            ));
        }
    } else {
        out.push_str("No dividend events found.\n");
    }

    out
}

/// Format the event table, one row per emitted event.
pub fn format_events(events: &[DividendEvent]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:>10} {:>6} {:>4} {:<12} {:>6} {:>7}\n",
        "date", "amount", "fy", "fq", "period", "conf", "review"
    ));
    for e in events {
        out.push_str(&format_event_row(e));
        for reason in &e.confidence_reasons {
            out.push_str(&format!("{:<12} - {reason}\n", ""));
        }
    }
    out
}

/// Format only the events flagged for review.
pub fn format_flagged(events: &[DividendEvent]) -> String {
    let flagged: Vec<&DividendEvent> = events.iter().filter(|e| e.needs_review).collect();
    if flagged.is_empty() {
        return "No events flagged for review.\n".to_string();
    }
    let mut out = String::new();
    out.push_str(&format!("Flagged for review ({}):\n", flagged.len()));
    for e in flagged {
        out.push_str(&format_event_row(e));
        for reason in &e.confidence_reasons {
            out.push_str(&format!("{:<12} - {reason}\n", ""));
        }
    }
    out
}

fn format_event_row(e: &DividendEvent) -> String {
    format!(
        "{:<12} {:>10.4} {:>6} {:>4} {:<12} {:>6.3} {:>7}\n",
        e.effective_date.to_string(),
        e.amount,
        e.fiscal_year.map_or("-".to_string(), |y| y.to_string()),
        e.fiscal_quarter.map_or("-".to_string(), |q| format!("Q{q}")),
        e.period_type.display_name(),
        e.confidence,
        if e.needs_review { "yes" } else { "" },
    )
}
