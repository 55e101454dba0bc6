//! One-pass accumulation of mean and central moments up to order four.

/// Streaming accumulator for count, mean and the sums of the 2nd, 3rd and
/// 4th powers of deviations from the mean.
///
/// Each [`push`](Self::push) updates all moments from the previous state
/// only (Welford's update extended to higher orders by Terriberry), so no
/// second pass over the data is needed and large samples do not suffer the
/// cancellation of raw power sums.
///
/// # Example
///
/// ```
/// use clearsky_stats::Moments;
///
/// let mut m = Moments::new();
/// for gap in [5.0, 15.0, 10.0] {
///     m.push(gap);
/// }
/// assert_eq!(m.count(), 3);
/// assert!((m.mean() - 10.0).abs() < 1e-12);
/// assert!((m.variance() - 25.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    n: usize,
    mean: f64,
    m2: f64,
    m3: f64,
    m4: f64,
}

impl Moments {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one sample into the accumulator.
    #[inline]
    pub fn push(&mut self, x: f64) {
        let n1 = self.n as f64;
        self.n += 1;
        let n = self.n as f64;

        let delta = x - self.mean;
        let delta_n = delta / n;
        let delta_n2 = delta_n * delta_n;
        let term1 = delta * delta_n * n1;

        self.mean += delta_n;
        // m4 and m3 read the previous m2/m3, so order matters
        self.m4 += term1 * delta_n2 * (n * n - 3.0 * n + 3.0) + 6.0 * delta_n2 * self.m2
            - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;
    }

    /// Number of samples pushed so far.
    pub fn count(&self) -> usize {
        self.n
    }

    /// Running mean. 0.0 when empty.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance with N-1 denominator.
    /// Returns 0.0 if fewer than 2 samples.
    pub fn variance(&self) -> f64 {
        if self.n < 2 {
            return 0.0;
        }
        self.m2 / (self.n as f64 - 1.0)
    }

    /// Sample standard deviation with N-1 denominator.
    /// Returns 0.0 if fewer than 2 samples.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Moment coefficient of skewness, `sqrt(n) * M3 / M2^1.5`.
    ///
    /// Returns `None` when empty or when all samples are equal.
    pub fn skewness(&self) -> Option<f64> {
        if self.n == 0 || self.m2 <= 0.0 {
            return None;
        }
        Some((self.n as f64).sqrt() * self.m3 / self.m2.powf(1.5))
    }

    /// Moment coefficient of kurtosis (Pearson), `n * M4 / M2^2`.
    ///
    /// Returns `None` when empty or when all samples are equal.
    pub fn kurtosis(&self) -> Option<f64> {
        if self.n == 0 || self.m2 <= 0.0 {
            return None;
        }
        Some(self.n as f64 * self.m4 / (self.m2 * self.m2))
    }

    /// Excess kurtosis, [`kurtosis`](Self::kurtosis) minus 3.
    pub fn excess_kurtosis(&self) -> Option<f64> {
        self.kurtosis().map(|k| k - 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mean, variance};
    use approx::assert_relative_eq;

    fn fold(data: &[f64]) -> Moments {
        let mut m = Moments::new();
        data.iter().for_each(|&x| m.push(x));
        m
    }

    #[test]
    fn empty() {
        let m = Moments::new();
        assert_eq!(m.count(), 0);
        assert_eq!(m.mean(), 0.0);
        assert_eq!(m.variance(), 0.0);
        assert!(m.skewness().is_none());
        assert!(m.kurtosis().is_none());
    }

    #[test]
    fn single_sample() {
        let m = fold(&[30.0]);
        assert_eq!(m.count(), 1);
        assert_eq!(m.mean(), 30.0);
        assert_eq!(m.std_dev(), 0.0);
        assert!(m.skewness().is_none());
    }

    #[test]
    fn known_moments() {
        // deviations -3,-1,-1,-1,0,0,2,4: M2=32, M3=42, M4=356
        let m = fold(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_relative_eq!(m.mean(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(m.variance(), 32.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(m.skewness().unwrap(), 0.65625, epsilon = 1e-12);
        assert_relative_eq!(m.kurtosis().unwrap(), 2.78125, epsilon = 1e-12);
        assert_relative_eq!(m.excess_kurtosis().unwrap(), -0.21875, epsilon = 1e-12);
    }

    #[test]
    fn symmetric_sample_has_zero_skew() {
        let m = fold(&[1.0, 2.0, 3.0]);
        assert_relative_eq!(m.skewness().unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_sample_has_no_shape() {
        let m = fold(&[7.0; 10]);
        assert_eq!(m.variance(), 0.0);
        assert!(m.skewness().is_none());
        assert!(m.excess_kurtosis().is_none());
    }

    #[test]
    fn matches_two_pass_for_every_prefix() {
        let data: Vec<f64> = (0..200).map(|i| ((i * 37) % 61) as f64 + 0.5).collect();
        let mut m = Moments::new();
        for k in 1..=data.len() {
            m.push(data[k - 1]);
            assert_relative_eq!(m.mean(), mean(&data[..k]), epsilon = 1e-9);
            assert_relative_eq!(m.variance(), variance(&data[..k]), epsilon = 1e-8);
        }
    }

    #[test]
    fn large_offset_is_stable() {
        let data: Vec<f64> = (0..1000).map(|i| 1.0e9 + (i % 4) as f64).collect();
        let m = fold(&data);
        assert_relative_eq!(m.mean(), mean(&data), epsilon = 1e-3);
        assert_relative_eq!(m.variance(), variance(&data), max_relative = 1e-6);
    }
}
