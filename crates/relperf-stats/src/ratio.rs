use crate::descriptive::SummaryStat;

/// Summary of per-trial performance ratios at one parameter point.
///
/// Each ratio is `baseline / candidate` for the latencies of one trial run,
/// which equals the candidate's throughput relative to the baseline's.
/// A value above 1.0 means the candidate is faster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioStat {
    /// Mean of the per-trial ratios.
    pub mean: f64,
    /// Population standard deviation of the per-trial ratios.
    pub std_dev: f64,
    /// Number of trials with a zero-latency sample on either side.
    pub undefined: usize,
}

impl RatioStat {
    /// Computes ratio statistics from `(baseline, candidate)` latency pairs.
    ///
    /// A zero latency on either side has an infinite throughput, so the
    /// trial's ratio is undefined. A zero candidate yields `inf`, a zero
    /// baseline yields `0.0` and both together yield `NaN`. These values are
    /// kept in the reduction and the trial is counted in
    /// [`RatioStat::undefined`].
    ///
    /// Returns `None` if there are no pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// # use relperf_stats::ratio::RatioStat;
    /// let stat = RatioStat::from_pairs([(100.0, 50.0), (100.0, 0.0)]).unwrap();
    /// assert!(stat.mean.is_infinite());
    /// assert_eq!(stat.undefined, 1);
    /// assert!(stat.is_undefined());
    /// ```
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut undefined = 0;
        let ratios = pairs
            .into_iter()
            .map(|(baseline, candidate)| {
                let ratio = baseline / candidate;
                if baseline == 0.0 || candidate == 0.0 || !ratio.is_finite() {
                    undefined += 1;
                }
                ratio
            })
            .collect::<Vec<_>>();
        let SummaryStat { mean, std_dev } = SummaryStat::new(ratios)?;
        Some(Self {
            mean,
            std_dev,
            undefined,
        })
    }

    /// Whether any per-trial ratio was undefined, or the reduction itself is
    /// not finite.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        self.undefined > 0 || !self.mean.is_finite() || !self.std_dev.is_finite()
    }
}
