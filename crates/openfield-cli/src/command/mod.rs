use clap::{Parser, Subcommand};

use crate::{
    config::{LogArgs, ReportArgs},
    logging::{self, LogTarget},
};

use self::{edit::EditArg, report::ReportArg, stats::StatsArg, summary::SummaryArg};

mod edit;
mod report;
mod stats;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(flatten)]
    report: ReportArgs,
    #[command(flatten)]
    log: LogArgs,
    /// What mode to run the program in (defaults to `edit`)
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Edit the dataset interactively and generate reports
    Edit(#[clap(flatten)] EditArg),
    /// Summarize numbers read from stdin or a file
    Stats(#[clap(flatten)] StatsArg),
    /// Print statistics of the built-in dataset
    Summary(#[clap(flatten)] SummaryArg),
    /// Generate an analysis report for the built-in dataset
    Report(#[clap(flatten)] ReportArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or(Mode::Edit(EditArg::default()));

    let target = LogTarget::select(&args.log, matches!(mode, Mode::Edit(_)));
    logging::init(&args.log, target)?;

    match mode {
        Mode::Edit(arg) => edit::run(&arg, &args.report)?,
        Mode::Stats(arg) => stats::run(&arg)?,
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::Report(arg) => report::run(&arg, &args.report)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;
    use openfield_model::Metric;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_default_mode_is_editor() {
        let args = CommandArgs::try_parse_from(["openfield"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = CommandArgs::try_parse_from([
            "openfield",
            "report",
            "--api-key",
            "secret",
            "--model",
            "gemini-test",
            "--timeout-secs",
            "5",
            "--metric",
            "velocity,rearing",
        ])
        .unwrap();
        let config = args.report.to_config();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "gemini-test");
        assert_eq!(config.timeout.as_secs(), 5);
        let Some(Mode::Report(_)) = args.mode else {
            panic!("expected report mode");
        };
    }

    #[test]
    fn test_edit_metric_parses() {
        let args = CommandArgs::try_parse_from(["openfield", "edit", "--metric", "center-time"])
            .unwrap();
        let Some(Mode::Edit(arg)) = args.mode else {
            panic!("expected edit mode");
        };
        assert_eq!(arg.metric, Some(Metric::CenterTime));

        assert!(CommandArgs::try_parse_from(["openfield", "edit", "--metric", "speed"]).is_err());
    }

    #[test]
    fn test_log_options() {
        let args = CommandArgs::try_parse_from([
            "openfield",
            "--log-level",
            "debug",
            "stats",
            "--json",
            "--log-file",
            "out.log",
        ])
        .unwrap();
        assert_eq!(args.log.log_level.as_deref(), Some("debug"));
        assert!(args.log.log_file.is_some());
    }
}
