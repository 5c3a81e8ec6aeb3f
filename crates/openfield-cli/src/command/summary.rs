use std::path::PathBuf;

use openfield_model::{Dataset, Metric};
use openfield_report::summary::render_data_summary;

use crate::{schema::stats::GroupStatsRecord, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    /// Metrics to include, comma separated (all when omitted)
    #[arg(long = "metric", value_delimiter = ',')]
    metrics: Vec<Metric>,
    /// Print per-group statistics as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Output file path (stdout when omitted)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn records(dataset: &Dataset, metrics: &[Metric]) -> Vec<GroupStatsRecord> {
    dataset
        .groups()
        .iter()
        .flat_map(|group| {
            metrics
                .iter()
                .map(move |&metric| GroupStatsRecord::new(group, metric))
        })
        .collect()
}

/// Fixed-width table of mean, SEM and SD per group and metric.
fn render_table(records: &[GroupStatsRecord]) -> String {
    let name_width = records
        .iter()
        .map(|record| record.group.chars().count())
        .max()
        .unwrap_or(0)
        .max("Group".len());

    let header = format!(
        "{:<name_width$}  {:>3}  {:<14}  {:>10}  {:>10}  {:>10}\n",
        "Group", "n", "Metric", "Mean", "SEM", "SD"
    );
    records.iter().fold(header, |mut text, record| {
        let stats = &record.stats;
        text.push_str(&format!(
            "{:<name_width$}  {:>3}  {:<14}  {:>10.3}  {:>10.3}  {:>10.3}\n",
            record.group,
            stats.n,
            record.metric.label(),
            stats.mean,
            stats.sem,
            stats.std_dev
        ));
        text
    })
}

pub fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let SummaryArg {
        metrics,
        json,
        output,
    } = arg;
    let metrics = if metrics.is_empty() {
        Metric::ALL.to_vec()
    } else {
        metrics.clone()
    };

    let dataset = Dataset::default();
    let records = records(&dataset, &metrics);

    let mut output = Output::from_output_path(output.as_deref())?;
    if *json {
        output.write_json(&records)
    } else {
        let text = format!(
            "{}\n{}",
            render_table(&records),
            render_data_summary(&dataset, &metrics)
        );
        output.write_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_cover_every_group_and_metric() {
        let dataset = Dataset::default();
        let records = records(&dataset, &[Metric::Velocity, Metric::Rearing]);
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].group, "Control");
        assert_eq!(records[0].metric, Metric::Velocity);
        assert_eq!(records[3].group, "Model");
        assert_eq!(records[3].metric, Metric::Rearing);
        assert_eq!(records[3].stats.mean, 5.5);
    }

    #[test]
    fn test_table_layout() {
        let dataset = Dataset::default();
        let table = render_table(&records(&dataset, &[Metric::TotalDistance]));
        let lines = table.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Group      n  Metric"));
        assert!(lines[1].starts_with("Control    4  Total Distance    2525.000"));
    }
}
