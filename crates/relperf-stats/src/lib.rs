//! Summary statistics for repeated benchmark trials.
//!
//! This crate reduces the trial-run axis of a benchmark measurement to the
//! two numbers every report works with:
//!
//! - **Summary statistics** ([`descriptive::SummaryStat`]): population mean and
//!   standard deviation of raw trial samples
//! - **Ratio statistics** ([`ratio::RatioStat`]): population mean and standard
//!   deviation of per-trial performance ratios, with a count of undefined
//!   ratios (division by a zero-latency sample)
//!
//! Both use population statistics (divide by `n`, not `n - 1`), so a single
//! sample has a standard deviation of zero.
//!
//! # Examples
//!
//! ## Summarizing trial samples
//!
//! ```
//! use relperf_stats::descriptive::SummaryStat;
//!
//! let stat = SummaryStat::new([10.0, 20.0, 30.0]).unwrap();
//! assert_eq!(stat.mean, 20.0);
//! assert!((stat.std_dev - 8.164_965_8).abs() < 1e-6);
//! ```
//!
//! ## Summarizing performance ratios
//!
//! ```
//! use relperf_stats::ratio::RatioStat;
//!
//! let stat = RatioStat::from_pairs([(100.0, 50.0), (100.0, 50.0)]).unwrap();
//! assert_eq!(stat.mean, 2.0);
//! assert_eq!(stat.std_dev, 0.0);
//! assert!(!stat.is_undefined());
//! ```

pub mod descriptive;
pub mod ratio;
