//! Descriptive statistics over `f64` samples.
//!
//! Functions return `None` where the statistic is undefined for the sample
//! size instead of producing `NaN`, leaving the caller to decide which error
//! applies.

/// Arithmetic mean.
///
/// # Returns
/// `None` for an empty sample.
///
/// # Examples
/// ```
/// use forecast_core::math::statistics::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[inline]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Bessel-corrected sample variance (divisor `n - 1`).
///
/// Uses the two-pass algorithm: the mean is computed first and the squared
/// deviations are accumulated around it.
///
/// # Returns
/// `None` when fewer than two values are supplied.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq = values.iter().map(|x| (x - m) * (x - m)).sum::<f64>();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Bessel-corrected sample standard deviation.
///
/// # Examples
/// ```
/// use forecast_core::math::statistics::sample_std_dev;
///
/// let sd = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
/// assert!((sd - 2.138089935299395).abs() < 1e-12);
/// assert_eq!(sample_std_dev(&[1.0]), None);
/// ```
#[inline]
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Percentile of an already sorted sample using linear interpolation
/// between order statistics.
///
/// The rank is `h = (n - 1) * q`; the result is
/// `x[⌊h⌋] + (h - ⌊h⌋) * (x[⌈h⌉] - x[⌊h⌋])`.
///
/// # Arguments
/// * `sorted` - Sample in ascending order
/// * `q` - Quantile in `[0, 1]`
///
/// # Returns
/// `None` for an empty sample or a quantile outside `[0, 1]`.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let rank = (sorted.len() - 1) as f64 * q;
    let lo = rank.floor() as usize;
    let hi = (rank.ceil() as usize).min(sorted.len() - 1);
    let weight = rank - lo as f64;

    Some(sorted[lo] + weight * (sorted[hi] - sorted[lo]))
}

/// Percentile of an unsorted sample.
///
/// Copies and sorts the sample; use [`percentile_sorted`] when several
/// quantiles of the same sample are needed.
///
/// # Examples
/// ```
/// use forecast_core::math::statistics::percentile;
///
/// let sample = [15.0, 20.0, 35.0, 40.0, 50.0];
/// assert_eq!(percentile(&sample, 0.5), Some(35.0));
/// assert_eq!(percentile(&sample, 0.75), Some(40.0));
/// assert_eq!(percentile(&sample, 0.125), Some(17.5));
/// ```
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[5.0]), Some(5.0));
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_sample_variance_small_samples() {
        assert_eq!(sample_variance(&[]), None);
        assert_eq!(sample_variance(&[3.0]), None);
        assert_eq!(sample_variance(&[3.0, 3.0]), Some(0.0));
    }

    #[test]
    fn test_sample_variance_bessel_correction() {
        // Population variance is 1.25, sample variance 5/3.
        let v = sample_variance(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_relative_eq!(v, 5.0 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_percentile_bounds() {
        let sorted = [1.0, 2.0, 3.0];
        assert_eq!(percentile_sorted(&sorted, 0.0), Some(1.0));
        assert_eq!(percentile_sorted(&sorted, 1.0), Some(3.0));
        assert_eq!(percentile_sorted(&sorted, 1.5), None);
        assert_eq!(percentile_sorted(&sorted, -0.1), None);
        assert_eq!(percentile_sorted(&[], 0.5), None);
    }

    #[test]
    fn test_percentile_interpolation() {
        // rank = 9 * 0.025 = 0.225
        let sorted: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        assert_relative_eq!(percentile_sorted(&sorted, 0.025).unwrap(), 1.225, epsilon = 1e-12);
        assert_relative_eq!(percentile_sorted(&sorted, 0.975).unwrap(), 9.775, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[42.0], 0.025), Some(42.0));
        assert_eq!(percentile(&[42.0], 0.975), Some(42.0));
    }

    #[test]
    fn test_percentile_unsorted_input() {
        assert_eq!(percentile(&[3.0, 1.0, 2.0], 0.5), Some(2.0));
    }
}
