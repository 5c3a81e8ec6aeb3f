use openfield_stats::StatsSummary;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{metric::Metric, subject::Subject};

/// Opaque identifier of a [`Group`].
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("g-{}", Uuid::new_v4()))
    }

    #[must_use]
    pub fn from_static(id: &'static str) -> Self {
        Self(id.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Display color of a group, taken from a fixed rotating palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupColor {
    Blue,
    Red,
    Emerald,
    Amber,
    Violet,
    Pink,
}

impl GroupColor {
    pub const PALETTE: [Self; 6] = [
        Self::Blue,
        Self::Red,
        Self::Emerald,
        Self::Amber,
        Self::Violet,
        Self::Pink,
    ];

    /// Palette slot for the group created when `group_count` groups exist.
    #[must_use]
    pub const fn for_creation_order(group_count: usize) -> Self {
        Self::PALETTE[group_count % Self::PALETTE.len()]
    }

    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Blue => "#3b82f6",
            Self::Red => "#ef4444",
            Self::Emerald => "#10b981",
            Self::Amber => "#f59e0b",
            Self::Violet => "#8b5cf6",
            Self::Pink => "#ec4899",
        }
    }

    /// The color as an `(r, g, b)` triple.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Blue => (0x3b, 0x82, 0xf6),
            Self::Red => (0xef, 0x44, 0x44),
            Self::Emerald => (0x10, 0xb9, 0x81),
            Self::Amber => (0xf5, 0x9e, 0x0b),
            Self::Violet => (0x8b, 0x5c, 0xf6),
            Self::Pink => (0xec, 0x48, 0x99),
        }
    }
}

/// A named cohort of subjects sharing an experimental condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    pub name: String,
    color: GroupColor,
    /// Subjects in insertion order. Batch paste addresses them by position.
    pub subjects: Vec<Subject>,
}

impl Group {
    /// Creates an empty group with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, color: GroupColor) -> Self {
        Self::with_subjects(GroupId::generate(), name, color, Vec::new())
    }

    #[must_use]
    pub fn with_subjects(
        id: GroupId,
        name: impl Into<String>,
        color: GroupColor,
        subjects: Vec<Subject>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            subjects,
        }
    }

    #[must_use]
    pub fn id(&self) -> &GroupId {
        &self.id
    }

    #[must_use]
    pub fn color(&self) -> GroupColor {
        self.color
    }

    /// Number of subjects (the sample size `n`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Values of `metric` for every subject, in subject order.
    #[must_use]
    pub fn metric_values(&self, metric: Metric) -> Vec<f64> {
        self.subjects.iter().map(|s| s.value(metric)).collect()
    }

    /// Summary statistics of `metric` over this group.
    #[must_use]
    pub fn stats(&self, metric: Metric) -> StatsSummary {
        StatsSummary::calculate(self.subjects.iter().map(|s| s.value(metric)))
    }
}

/// Projects one metric out of every subject of `group`, preserving order.
#[must_use]
pub fn metric_data_for_group(group: &Group, metric: Metric) -> Vec<f64> {
    group.metric_values(metric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::MetricValues;

    #[test]
    fn test_palette_rotates_with_creation_order() {
        assert_eq!(GroupColor::for_creation_order(0), GroupColor::Blue);
        assert_eq!(GroupColor::for_creation_order(1), GroupColor::Red);
        assert_eq!(GroupColor::for_creation_order(5), GroupColor::Pink);
        assert_eq!(GroupColor::for_creation_order(6), GroupColor::Blue);
        assert_eq!(GroupColor::for_creation_order(13), GroupColor::Red);
    }

    #[test]
    fn test_metric_values_preserve_order() {
        let mut group = Group::new("G", GroupColor::Blue);
        for v in [3.0, 1.0, 2.0] {
            group.subjects.push(Subject::with_values(
                crate::subject::SubjectId::generate(),
                MetricValues::zeroed().with(Metric::Rearing, v),
            ));
        }
        assert_eq!(group.metric_values(Metric::Rearing), vec![3.0, 1.0, 2.0]);
        assert_eq!(metric_data_for_group(&group, Metric::Velocity), vec![0.0; 3]);
        assert_eq!(group.stats(Metric::Rearing).mean, 2.0);
    }

    #[test]
    fn test_empty_group_stats() {
        let group = Group::new("Empty", GroupColor::Amber);
        assert!(group.metric_values(Metric::TotalDistance).is_empty());
        assert_eq!(group.stats(Metric::TotalDistance), StatsSummary::EMPTY);
    }
}
