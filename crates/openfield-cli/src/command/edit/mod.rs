use std::sync::Arc;

use anyhow::Context as _;
use openfield_model::{Editor, Metric};
use openfield_report::GeminiClient;
use tracing::info;

use crate::{config::ReportArgs, tui::Runtime};

use self::{app::EditApp, screens::EditorScreen};

mod app;
mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EditArg {
    /// Metric selected for batch input at startup (e.g. `velocity`)
    #[arg(long)]
    pub(super) metric: Option<Metric>,
}

pub fn run(arg: &EditArg, report: &ReportArgs) -> anyhow::Result<()> {
    let config = report.to_config();
    if config.api_key.is_none() {
        info!("no API key configured; report generation will show a notice");
    }
    let client = GeminiClient::new(config).context("Failed to create report client")?;

    let mut editor = Editor::default();
    if let Some(metric) = arg.metric {
        editor.set_target_metric(metric);
    }

    let screen = EditorScreen::new(editor, Arc::new(client));
    let mut app = EditApp::new(screen);
    Runtime::new()
        .run(&mut app)
        .context("Terminal session failed")?;
    info!("editor closed");
    Ok(())
}
