use std::fmt;

/// Summary statistics of a sample of observations.
///
/// Holds the measures plotted as bar height (mean) and error whisker (SEM),
/// together with the sample size and the sample standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsSummary {
    /// The arithmetic mean of the sample.
    pub mean: f64,
    /// The standard error of the mean (`std_dev / sqrt(n)`).
    pub sem: f64,
    /// The number of observations.
    pub n: usize,
    /// The sample standard deviation (Bessel-corrected).
    pub std_dev: f64,
}

impl StatsSummary {
    /// The summary of an empty sample: every field is zero.
    pub const EMPTY: Self = Self {
        mean: 0.0,
        sem: 0.0,
        n: 0,
        std_dev: 0.0,
    };

    /// Computes summary statistics from a sequence of observations.
    ///
    /// The variance uses Bessel's correction (divides by `n - 1`). A single
    /// observation divides by `1` instead, so its standard deviation is zero.
    /// An empty sample yields [`StatsSummary::EMPTY`].
    ///
    /// No rounding is applied; formatting for display is left to the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// # use openfield_stats::descriptive::StatsSummary;
    /// let stats = StatsSummary::calculate([10.0, 20.0, 30.0]);
    /// assert_eq!(stats.n, 3);
    /// assert_eq!(stats.mean, 20.0);
    /// assert_eq!(stats.std_dev, 10.0);
    /// assert!((stats.sem - 5.773_502_691_896_258).abs() < 1e-12);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn calculate<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = observations.into_iter().collect::<Vec<_>>();
        let n = values.len();
        if n == 0 {
            return Self::EMPTY;
        }

        let count = n as f64;
        let mean = values.iter().sum::<f64>() / count;
        let divisor = if n > 1 { count - 1.0 } else { 1.0 };
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / divisor;
        let std_dev = variance.sqrt();
        let sem = std_dev / count.sqrt();

        Self {
            mean,
            sem,
            n,
            std_dev,
        }
    }

    /// Returns `true` if the summary was computed from no observations.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.n == 0
    }
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3);
        write!(
            f,
            "{:.precision$} ± {:.precision$} (n={})",
            self.mean, self.sem, self.n
        )
    }
}

/// Computes summary statistics from a sequence of observations.
///
/// Shorthand for [`StatsSummary::calculate`].
#[must_use]
pub fn calculate_stats<I>(observations: I) -> StatsSummary
where
    I: IntoIterator<Item = f64>,
{
    StatsSummary::calculate(observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty_sample_is_all_zero() {
        let stats = StatsSummary::calculate(Vec::new());
        assert_eq!(stats, StatsSummary::EMPTY);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_single_observation_has_no_spread() {
        for v in [0.0, -3.5, 42.0, 1e9] {
            let stats = StatsSummary::calculate([v]);
            assert_eq!(stats.n, 1);
            assert_eq!(stats.mean, v);
            assert_eq!(stats.std_dev, 0.0);
            assert_eq!(stats.sem, 0.0);
        }
    }

    #[test]
    fn test_bessel_corrected_variance() {
        let stats = StatsSummary::calculate([10.0, 20.0, 30.0]);
        assert_eq!(stats.n, 3);
        assert_close(stats.mean, 20.0);
        assert_close(stats.std_dev, 10.0);
        assert_close(stats.sem, 10.0 / 3.0_f64.sqrt());
    }

    #[test]
    fn test_count_matches_input_length() {
        for len in 1_u32..20 {
            let values = (0..len).map(f64::from).collect::<Vec<_>>();
            assert_eq!(values.len(), usize::try_from(len).unwrap());
            assert_eq!(StatsSummary::calculate(values.clone()).n, values.len());
        }
    }

    #[test]
    fn test_identical_values() {
        let stats = StatsSummary::calculate([5.0; 8]);
        assert_close(stats.mean, 5.0);
        assert_close(stats.std_dev, 0.0);
        assert_close(stats.sem, 0.0);
    }

    #[test]
    fn test_control_group_distance() {
        // 2500, 2450, 2600, 2550: mean 2525, SS = 12500, var = 12500 / 3
        let stats = StatsSummary::calculate([2500.0, 2450.0, 2600.0, 2550.0]);
        assert_close(stats.mean, 2525.0);
        assert_close(stats.std_dev, (12500.0_f64 / 3.0).sqrt());
        assert_close(stats.sem, stats.std_dev / 2.0);
    }

    #[test]
    fn test_display_uses_three_decimals_by_default() {
        let stats = StatsSummary::calculate([1.0, 2.0, 3.0]);
        assert_eq!(stats.to_string(), "2.000 ± 0.577 (n=3)");
        assert_eq!(format!("{stats:.1}"), "2.0 ± 0.6 (n=3)");
    }
}
