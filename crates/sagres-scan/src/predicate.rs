//! Null-aware comparison helpers.
//!
//! Scan criteria follow one rule for missing data: a predicate with an
//! undefined operand is false. A record lacking a ratio, or joined to a
//! group without stats for it, can neither qualify for entry nor trigger an
//! exit signal through that ratio.

/// `value > threshold`, false when undefined.
pub(crate) fn above(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v > threshold)
}

/// `value < threshold`, false when undefined.
pub(crate) fn below(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v < threshold)
}

/// `value <= threshold`, false when undefined.
pub(crate) fn at_most(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v <= threshold)
}

/// `value < mean`, false when either side is undefined.
pub(crate) fn under_mean(value: Option<f64>, mean: Option<f64>) -> bool {
    matches!((value, mean), (Some(v), Some(m)) if v < m)
}

/// `value > mean`, false when either side is undefined.
pub(crate) fn over_mean(value: Option<f64>, mean: Option<f64>) -> bool {
    matches!((value, mean), (Some(v), Some(m)) if v > m)
}

/// `value >= mean`, false when either side is undefined.
pub(crate) fn at_least_mean(value: Option<f64>, mean: Option<f64>) -> bool {
    matches!((value, mean), (Some(v), Some(m)) if v >= m)
}

/// Standardized deviation of `value` from its group mean.
///
/// Undefined when any operand is missing or the standard deviation is zero;
/// the result is never an infinity.
pub(crate) fn zscore(value: Option<f64>, mean: Option<f64>, std: Option<f64>) -> Option<f64> {
    let (v, m, s) = (value?, mean?, std?);
    if s == 0.0 {
        return None;
    }
    Some((v - m) / s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_undefined_operands_are_false() {
        assert!(!above(None, 0.0));
        assert!(!below(None, 10.0));
        assert!(!at_most(None, 0.0));
        assert!(!under_mean(None, Some(1.0)));
        assert!(!under_mean(Some(1.0), None));
        assert!(!over_mean(None, None));
        assert!(!at_least_mean(Some(1.0), None));
    }

    #[test]
    fn test_comparisons() {
        assert!(above(Some(5.0), 0.0));
        assert!(!above(Some(0.0), 0.0));
        assert!(at_most(Some(0.0), 0.0));
        assert!(under_mean(Some(1.0), Some(2.0)));
        assert!(at_least_mean(Some(2.0), Some(2.0)));
        assert!(!over_mean(Some(2.0), Some(2.0)));
    }

    #[test]
    fn test_zscore() {
        assert_relative_eq!(zscore(Some(12.0), Some(10.0), Some(4.0)).unwrap(), 0.5);
        assert!(zscore(Some(12.0), Some(10.0), Some(0.0)).is_none());
        assert!(zscore(None, Some(10.0), Some(4.0)).is_none());
        assert!(zscore(Some(12.0), None, Some(4.0)).is_none());
        assert!(zscore(Some(12.0), Some(10.0), None).is_none());
    }
}
