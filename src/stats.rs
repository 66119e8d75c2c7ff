// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mesh Self-Healing Benchmark Engine - Sample Statistics

/// Nearest-rank percentile over an ascending slice.
///
/// The rank is `(n - 1) * p / 100` rounded to the nearest integer with ties
/// going to the even index, then clamped into `[0, n - 1]`.
///
/// - empty input returns `0.0`
/// - `p <= 0` returns the first element
/// - `p >= 100` returns the last element
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if p <= 0.0 {
        return sorted[0];
    }
    if p >= 100.0 {
        return sorted[n - 1];
    }
    let rank = ((n - 1) as f64 * (p / 100.0)).round_ties_even();
    let idx = (rank.max(0.0) as usize).min(n - 1);
    sorted[idx]
}

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sort ascending in place. Samples are floored and never NaN.
pub(crate) fn sort_samples(samples: &mut [f64]) {
    samples.sort_by(|a, b| a.total_cmp(b));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_empty_is_zero() {
        assert_eq!(percentile(&[], 0.0), 0.0);
        assert_eq!(percentile(&[], 50.0), 0.0);
        assert_eq!(percentile(&[], 100.0), 0.0);
    }

    #[test]
    fn test_percentile_bounds() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&xs, 0.0), 1.0);
        assert_eq!(percentile(&xs, -5.0), 1.0);
        assert_eq!(percentile(&xs, 100.0), 5.0);
        assert_eq!(percentile(&xs, 250.0), 5.0);
    }

    #[test]
    fn test_percentile_nearest_rank() {
        let xs: Vec<f64> = (0..100).map(|i| i as f64).collect();
        // (99 * 0.95) = 94.05 -> 94
        assert_eq!(percentile(&xs, 95.0), 94.0);
        // (99 * 0.99) = 98.01 -> 98
        assert_eq!(percentile(&xs, 99.0), 98.0);
        assert_eq!(percentile(&xs, 50.0), 50.0);
    }

    #[test]
    fn test_percentile_ties_round_to_even() {
        let xs = [10.0, 20.0, 30.0, 40.0];
        // (3 * 0.5) = 1.5 -> 2
        assert_eq!(percentile(&xs, 50.0), 30.0);
        let ys = [10.0, 20.0];
        // (1 * 0.5) = 0.5 -> 0
        assert_eq!(percentile(&ys, 50.0), 10.0);
    }

    #[test]
    fn test_percentile_single_element() {
        assert_eq!(percentile(&[7.5], 95.0), 7.5);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), 3.0);
    }

    #[test]
    fn test_sort_samples_ascending() {
        let mut xs = vec![3.0, 0.1, 2.5, 0.1];
        sort_samples(&mut xs);
        assert_eq!(xs, vec![0.1, 0.1, 2.5, 3.0]);
    }
}
