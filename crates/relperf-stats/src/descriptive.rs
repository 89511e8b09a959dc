/// Population mean and standard deviation of one row of trial samples.
///
/// Non-finite inputs are not filtered: an infinite or `NaN` sample makes the
/// mean and standard deviation non-finite as well, so the condition stays
/// visible to whoever renders the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStat {
    /// The arithmetic mean of the samples.
    pub mean: f64,
    /// The population standard deviation of the samples.
    pub std_dev: f64,
}

impl SummaryStat {
    /// Computes the population mean and standard deviation.
    ///
    /// # Returns
    ///
    /// * `Some(SummaryStat)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use relperf_stats::descriptive::SummaryStat;
    /// let stat = SummaryStat::new([42.0]).unwrap();
    /// assert_eq!(stat.mean, 42.0);
    /// assert_eq!(stat.std_dev, 0.0);
    ///
    /// assert!(SummaryStat::new(std::iter::empty()).is_none());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// Summarizes integer trial samples (time units as recorded by the harness).
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_samples(samples: &[i64]) -> Option<Self> {
        Self::new(samples.iter().map(|&s| s as f64))
    }

    /// Whether both the mean and the standard deviation are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.mean.is_finite() && self.std_dev.is_finite()
    }
}
