//! Outlier-robust statistics primitives.
//!
//! Peer-group statistics are computed over interquartile-range trimmed
//! samples: values outside `[Q1 - k*IQR, Q3 + k*IQR]` are discarded before
//! the mean and standard deviation are taken. This keeps a handful of
//! extreme ratios (distressed names, fresh listings) from dominating a
//! peer group's center.

/// Default fence multiplier for IQR trimming.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Mean and standard deviation of an IQR-trimmed sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimmedStats {
    /// Arithmetic mean of the retained values.
    pub mean: f64,
    /// Population standard deviation (N divisor) of the retained values.
    pub std: f64,
    /// Number of values that survived the trim.
    pub retained: usize,
}

/// Computes the `q`-quantile of a sorted slice by linear interpolation
/// between order statistics (the inclusive method).
///
/// Returns `None` for an empty slice. The slice must be sorted ascending;
/// `q` is clamped to `[0, 1]`.
#[must_use]
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let weight = pos - lo as f64;
    Some(sorted[lo] * (1.0 - weight) + sorted[hi] * weight)
}

/// Computes the IQR-trimmed mean and population standard deviation of a
/// sample.
///
/// Non-finite values are excluded up front. Values inside the closed fence
/// interval `[Q1 - multiplier*IQR, Q3 + multiplier*IQR]` are retained;
/// returns `None` when nothing survives (in particular for an empty
/// sample). A single-value sample has `IQR = 0`, survives its own fences,
/// and yields `std = 0`.
#[must_use]
pub fn iqr_trimmed_stats(values: &[f64], multiplier: f64) -> Option<TrimmedStats> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let q1 = quantile(&sorted, 0.25)?;
    let q3 = quantile(&sorted, 0.75)?;
    let iqr = q3 - q1;
    let lower = q1 - multiplier * iqr;
    let upper = q3 + multiplier * iqr;

    let retained: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|v| *v >= lower && *v <= upper)
        .collect();
    if retained.is_empty() {
        return None;
    }

    let n = retained.len();
    let mean = retained.iter().sum::<f64>() / n as f64;
    let variance = retained.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

    Some(TrimmedStats {
        mean,
        std: variance.sqrt(),
        retained: n,
    })
}
