use std::path::PathBuf;

use anyhow::Context as _;
use openfield_model::{Dataset, Metric};
use openfield_report::{
    DEFAULT_METRICS, GeminiClient, ReportGenerator as _, prompt::build_prompt,
    summary::render_data_summary,
};
use tracing::{info, warn};

use crate::{config::ReportArgs, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Metrics to analyse, comma separated (distance, center time and velocity when omitted)
    #[arg(long = "metric", value_delimiter = ',')]
    metrics: Vec<Metric>,
    /// Output file path (stdout when omitted)
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Print the prompt instead of sending it
    #[arg(long)]
    dry_run: bool,
}

pub fn run(arg: &ReportArg, report: &ReportArgs) -> anyhow::Result<()> {
    let ReportArg {
        metrics,
        output,
        dry_run,
    } = arg;
    let metrics = if metrics.is_empty() {
        DEFAULT_METRICS.to_vec()
    } else {
        metrics.clone()
    };
    let dataset = Dataset::default();

    let text = if *dry_run {
        build_prompt(&render_data_summary(&dataset, &metrics))
    } else {
        let client = GeminiClient::new(report.to_config()).context("Failed to create report client")?;
        info!(model = %client.config().model, "requesting report");
        match client.generate(&dataset, &metrics) {
            Ok(markdown) => markdown,
            Err(err) => {
                warn!(%err, "report generation failed");
                let message = err.user_message();
                return Err(anyhow::Error::new(err).context(message));
            }
        }
    };

    let mut output = Output::from_output_path(output.as_deref())?;
    output.write_text(&text)?;
    if !text.ends_with('\n') {
        output.write_text("\n")?;
    }
    Ok(())
}
