//! Built-in dataset loaded at startup.

use crate::{
    dataset::Dataset,
    group::{Group, GroupColor, GroupId},
    metric::MetricValues,
    subject::{Subject, SubjectId},
};

/// `(id, [distance, center time, center entries, velocity, rearing])`
type SubjectRow = (&'static str, [f64; 5]);

const CONTROL: [SubjectRow; 4] = [
    ("c1", [2500.0, 45.0, 12.0, 5.2, 15.0]),
    ("c2", [2450.0, 50.0, 14.0, 5.1, 18.0]),
    ("c3", [2600.0, 40.0, 10.0, 5.5, 12.0]),
    ("c4", [2550.0, 48.0, 13.0, 5.3, 16.0]),
];

const MODEL: [SubjectRow; 4] = [
    ("m1", [1500.0, 15.0, 4.0, 3.1, 5.0]),
    ("m2", [1600.0, 20.0, 5.0, 3.3, 6.0]),
    ("m3", [1450.0, 10.0, 3.0, 3.0, 4.0]),
    ("m4", [1550.0, 18.0, 6.0, 3.2, 7.0]),
];

fn fixture_group(id: &'static str, name: &str, color: GroupColor, rows: &[SubjectRow]) -> Group {
    let subjects = rows
        .iter()
        .map(|&(id, values)| {
            Subject::with_values(SubjectId::from_static(id), MetricValues::new(values))
        })
        .collect();
    Group::with_subjects(GroupId::from_static(id), name, color, subjects)
}

/// Two groups of four subjects each, every metric populated.
#[must_use]
pub fn default_dataset() -> Dataset {
    Dataset::new(vec![
        fixture_group("g1", "Control", GroupColor::Blue, &CONTROL),
        fixture_group("g2", "Model", GroupColor::Red, &MODEL),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Metric;

    #[test]
    fn test_shape() {
        let dataset = default_dataset();
        assert_eq!(dataset.len(), 2);
        for group in dataset.groups() {
            assert_eq!(group.len(), 4);
        }
        assert_eq!(dataset.groups()[0].id().as_str(), "g1");
        assert_eq!(dataset.groups()[1].subjects[3].id().as_str(), "m4");
    }

    #[test]
    fn test_values_follow_metric_order() {
        let dataset = default_dataset();
        let c1 = &dataset.groups()[0].subjects[0];
        assert_eq!(c1.value(Metric::TotalDistance), 2500.0);
        assert_eq!(c1.value(Metric::CenterTime), 45.0);
        assert_eq!(c1.value(Metric::CenterEntries), 12.0);
        assert_eq!(c1.value(Metric::Velocity), 5.2);
        assert_eq!(c1.value(Metric::Rearing), 15.0);
    }
}
