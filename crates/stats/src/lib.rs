//! Statistical helper functions for the flowcast workspace.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Standard error of the mean, `sd / sqrt(n)`.
/// Returns 0.0 if fewer than 2 elements.
pub fn standard_error(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    sd(data) / (data.len() as f64).sqrt()
}

/// Mean absolute error between two parallel slices.
///
/// `(1/n) * sum(|a[i] - b[i]|)`. Returns 0.0 if both are empty.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn mean_absolute_error(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(
        a.len(),
        b.len(),
        "mean_absolute_error: slices must have equal length"
    );
    if a.is_empty() {
        return 0.0;
    }
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum::<f64>() / a.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_sd() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sd(&data), 2.138090, epsilon = 1e-6);
    }

    #[test]
    fn test_sd_single() {
        assert_eq!(sd(&[5.0]), 0.0);
    }

    #[test]
    fn test_standard_error() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(
            standard_error(&data),
            2.138090 / 8.0_f64.sqrt(),
            epsilon = 1e-6
        );
        assert_eq!(standard_error(&[1.0]), 0.0);
    }

    #[test]
    fn test_mae() {
        let a = [3.0, 0.0, 2.0, 1.0];
        let b = [1.0, 0.0, 3.0, 1.0];
        assert_relative_eq!(mean_absolute_error(&a, &b), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_mae_identical() {
        let a = [1.5, 2.5];
        assert_eq!(mean_absolute_error(&a, &a), 0.0);
        assert_eq!(mean_absolute_error(&[], &[]), 0.0);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_mae_length_mismatch() {
        mean_absolute_error(&[1.0], &[1.0, 2.0]);
    }
}
