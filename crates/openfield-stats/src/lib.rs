//! Descriptive statistics for behavioral-assay measurements.
//!
//! This crate provides the summary used for every group/metric pair in the
//! OpenField workspace: the mean, the standard error of the mean (SEM), the
//! sample size and the sample standard deviation.
//!
//! # Modules
//!
//! - [`descriptive`]: [`StatsSummary`](descriptive::StatsSummary) computation
//!
//! # Examples
//!
//! ```
//! use openfield_stats::descriptive::StatsSummary;
//!
//! let stats = StatsSummary::calculate([45.0, 50.0, 40.0, 48.0]);
//! assert_eq!(stats.n, 4);
//! assert_eq!(stats.mean, 45.75);
//! ```
//!
//! An empty sample is not an error; it summarizes to zeros:
//!
//! ```
//! use openfield_stats::{calculate_stats, descriptive::StatsSummary};
//!
//! assert_eq!(calculate_stats(Vec::new()), StatsSummary::EMPTY);
//! ```

pub use self::descriptive::{StatsSummary, calculate_stats};

pub mod descriptive;
