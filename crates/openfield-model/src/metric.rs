use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Kind of measurement recorded for every subject of an open field test.
///
/// The set is closed: every [`MetricValues`] record holds exactly one slot per
/// variant, in the order of [`Metric::ALL`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    TotalDistance,
    CenterTime,
    CenterEntries,
    Velocity,
    Rearing,
}

impl Metric {
    pub const COUNT: usize = 5;

    pub const ALL: [Self; Self::COUNT] = [
        Self::TotalDistance,
        Self::CenterTime,
        Self::CenterEntries,
        Self::Velocity,
        Self::Rearing,
    ];

    /// Position of this metric within [`Metric::ALL`] and [`MetricValues`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human readable name used in chart titles and report summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TotalDistance => "Total Distance",
            Self::CenterTime => "Center Time",
            Self::CenterEntries => "Center Entries",
            Self::Velocity => "Velocity",
            Self::Rearing => "Rearing",
        }
    }

    /// Compact name used as a table column header.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::TotalDistance => "Distance",
            Self::CenterTime => "Ctr Time",
            Self::CenterEntries => "Entries",
            Self::Velocity => "Velocity",
            Self::Rearing => "Rearing",
        }
    }

    /// Identifier accepted on the command line (`total-distance`, ...).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TotalDistance => "total-distance",
            Self::CenterTime => "center-time",
            Self::CenterEntries => "center-entries",
            Self::Velocity => "velocity",
            Self::Rearing => "rearing",
        }
    }

    /// The metric after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    /// The metric before this one, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::COUNT - 1) % Self::COUNT]
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown metric `{input}` (expected one of: total-distance, center-time, center-entries, velocity, rearing)")]
pub struct ParseMetricError {
    #[error(not(source))]
    input: String,
}

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(s) || m.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseMetricError {
                input: s.to_owned(),
            })
    }
}

/// One numeric value per [`Metric`].
///
/// The record is always fully populated; there is no way to build one with a
/// missing slot. Index it with a [`Metric`]:
///
/// ```
/// use openfield_model::metric::{Metric, MetricValues};
///
/// let mut values = MetricValues::zeroed();
/// values[Metric::Velocity] = 5.2;
/// assert_eq!(values[Metric::Velocity], 5.2);
/// assert_eq!(values[Metric::Rearing], 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricValues([f64; Metric::COUNT]);

impl MetricValues {
    /// Builds a record from values listed in [`Metric::ALL`] order.
    #[must_use]
    pub const fn new(values: [f64; Metric::COUNT]) -> Self {
        Self(values)
    }

    #[must_use]
    pub const fn zeroed() -> Self {
        Self([0.0; Metric::COUNT])
    }

    /// Returns a copy with `metric` set to `value`.
    #[must_use]
    pub const fn with(mut self, metric: Metric, value: f64) -> Self {
        self.0[metric.index()] = value;
        self
    }

    #[must_use]
    pub const fn get(&self, metric: Metric) -> f64 {
        self.0[metric.index()]
    }

    pub const fn set(&mut self, metric: Metric, value: f64) {
        self.0[metric.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl Index<Metric> for MetricValues {
    type Output = f64;

    fn index(&self, metric: Metric) -> &Self::Output {
        &self.0[metric.index()]
    }
}

impl IndexMut<Metric> for MetricValues {
    fn index_mut(&mut self, metric: Metric) -> &mut Self::Output {
        &mut self.0[metric.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, metric) in Metric::ALL.into_iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
    }

    #[test]
    fn test_next_prev_wrap() {
        assert_eq!(Metric::Rearing.next(), Metric::TotalDistance);
        assert_eq!(Metric::TotalDistance.prev(), Metric::Rearing);
        for metric in Metric::ALL {
            assert_eq!(metric.next().prev(), metric);
        }
    }

    #[test]
    fn test_parse_by_key_or_label() {
        assert_eq!("center-time".parse::<Metric>().unwrap(), Metric::CenterTime);
        assert_eq!("Total Distance".parse::<Metric>().unwrap(), Metric::TotalDistance);
        assert_eq!(" VELOCITY ".parse::<Metric>().unwrap(), Metric::Velocity);

        let err = "speed".parse::<Metric>().unwrap_err();
        assert!(err.to_string().contains("`speed`"));
    }

    #[test]
    fn test_values_are_fully_populated() {
        let values = MetricValues::zeroed().with(Metric::CenterEntries, 12.0);
        let collected = values.iter().collect::<Vec<_>>();
        assert_eq!(collected.len(), Metric::COUNT);
        assert_eq!(collected[2], (Metric::CenterEntries, 12.0));
        assert!(
            collected
                .iter()
                .filter(|(m, _)| *m != Metric::CenterEntries)
                .all(|(_, v)| *v == 0.0)
        );
    }

    #[test]
    fn test_serde_names_are_kebab_case() {
        let json = serde_json::to_string(&Metric::CenterEntries).unwrap();
        assert_eq!(json, "\"center-entries\"");
    }
}
