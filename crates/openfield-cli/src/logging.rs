use std::{fs::File, io, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

use crate::config::LogArgs;

const DEFAULT_FILTER: &str = "warn";

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

impl<'a> LogTarget<'a> {
    /// The log file when given; otherwise stderr, or nothing while the
    /// terminal is owned by the editor.
    pub(crate) fn select(args: &'a LogArgs, interactive: bool) -> Self {
        match (&args.log_file, interactive) {
            (Some(path), _) => Self::File(path),
            (None, true) => Self::Off,
            (None, false) => Self::Stderr,
        }
    }
}

fn filter(level: Option<&str>) -> anyhow::Result<EnvFilter> {
    match level {
        Some(level) => {
            EnvFilter::try_new(level).with_context(|| format!("Invalid log filter: {level}"))
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

pub(crate) fn init(args: &LogArgs, target: LogTarget<'_>) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(args.log_level.as_deref())?);
    let result = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    result.map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))
}
