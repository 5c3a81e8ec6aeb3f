use openfield_model::{Dataset, Metric};

/// Maximum number of raw values listed per group and metric.
pub const RAW_PREVIEW_LIMIT: usize = 20;

/// Renders the plain-text data summary sent to the language model.
///
/// For each group: name and sample size, then for each metric the mean, SEM
/// and standard deviation (three decimals) and a preview of the raw values.
#[must_use]
pub fn render_data_summary(dataset: &Dataset, metrics: &[Metric]) -> String {
    let mut out = String::from("Experimental data summary:\n");
    for group in dataset.groups() {
        out.push_str(&format!(
            "\nGroup: {} (sample size n={})\n",
            group.name,
            group.len()
        ));
        for &metric in metrics {
            let values = group.metric_values(metric);
            let stats = group.stats(metric);
            out.push_str(&format!(
                "  - {metric}: Mean={:.3}, SEM={:.3}, SD={:.3}\n",
                stats.mean, stats.sem, stats.std_dev
            ));
            out.push_str(&format!("    (raw data preview: [{}])\n", raw_preview(&values)));
        }
    }
    out
}

fn raw_preview(values: &[f64]) -> String {
    let shown = values
        .iter()
        .take(RAW_PREVIEW_LIMIT)
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if values.len() > RAW_PREVIEW_LIMIT {
        format!("{shown}...")
    } else {
        shown
    }
}
