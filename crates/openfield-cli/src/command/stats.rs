use std::path::PathBuf;

use openfield_model::batch;
use openfield_stats::StatsSummary;
use tracing::debug;

use crate::{schema::stats::StatsRecord, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct StatsArg {
    /// File to read numbers from (stdin when omitted)
    input: Option<PathBuf>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
    /// Decimal places in text output
    #[arg(long, default_value_t = 3)]
    precision: usize,
}

/// Formats the text form printed by `stats`.
fn render_text(stats: &StatsSummary, precision: usize) -> String {
    format!(
        "n       {}\nmean    {:.precision$}\nsd      {:.precision$}\nsem     {:.precision$}\nsummary {stats:.precision$}\n",
        stats.n, stats.mean, stats.std_dev, stats.sem
    )
}

pub fn run(arg: &StatsArg) -> anyhow::Result<()> {
    let StatsArg {
        input,
        json,
        precision,
    } = arg;

    let raw = util::read_input(input.as_deref())?;
    let values = batch::parse_numbers(&raw);
    debug!(count = values.len(), "parsed observations");
    let stats = StatsSummary::calculate(values);

    let mut output = util::Output::from_output_path(None)?;
    if *json {
        output.write_json(&StatsRecord::from(stats))
    } else {
        output.write_text(&render_text(&stats, *precision))
    }
}
