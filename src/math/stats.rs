//! Order statistics over small samples of per-share amounts.
//!
//! The populations involved are tiny (a company pays at most a handful of
//! dividends per fiscal year), so everything here sorts a copied slice and
//! reads off positions. No attempt at streaming or single-pass algorithms.
//!
//! Conventions (must stay stable, downstream scoring depends on them):
//! - `median` averages the two middle elements for even-length samples
//! - `quartiles` uses the simple index method: Q1 at `n/4`, Q3 at `3n/4`
//! - `stdev` is the sample standard deviation (n - 1 denominator)

/// Median of a sample. `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// First and third quartiles by the index method. `None` below 2 elements.
pub fn quartiles(values: &[f64]) -> Option<(f64, f64)> {
    if values.len() < 2 {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    Some((sorted[n / 4], sorted[(3 * n / 4).min(n - 1)]))
}

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1). `None` below 2 elements.
pub fn stdev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Coefficient of variation (stdev / mean). `None` when undefined or the
/// mean is non-positive.
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    if m <= 0.0 {
        return None;
    }
    Some(stdev(values)? / m)
}
