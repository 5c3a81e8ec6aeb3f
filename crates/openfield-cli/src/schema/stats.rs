use openfield_model::{Group, Metric};
use openfield_stats::StatsSummary;
use serde::Serialize;

/// JSON form of a [`StatsSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsRecord {
    pub mean: f64,
    pub sem: f64,
    pub n: usize,
    pub std_dev: f64,
}

impl From<StatsSummary> for StatsRecord {
    fn from(stats: StatsSummary) -> Self {
        let StatsSummary {
            mean,
            sem,
            n,
            std_dev,
        } = stats;
        Self {
            mean,
            sem,
            n,
            std_dev,
        }
    }
}

/// Statistics of one metric within one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStatsRecord {
    pub group: String,
    pub color: &'static str,
    pub metric: Metric,
    #[serde(flatten)]
    pub stats: StatsRecord,
}

impl GroupStatsRecord {
    pub fn new(group: &Group, metric: Metric) -> Self {
        Self {
            group: group.name.clone(),
            color: group.color().hex(),
            metric,
            stats: group.stats(metric).into(),
        }
    }
}
