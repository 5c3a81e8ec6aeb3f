use std::{env, path::PathBuf, time::Duration};

use openfield_report::{
    ReportConfig,
    gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT},
};

/// Fallback variable consulted when `GEMINI_API_KEY` is unset.
const FALLBACK_KEY_VAR: &str = "API_KEY";

/// Report service options, accepted before or after the subcommand.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArgs {
    /// Gemini API key (falls back to the API_KEY variable)
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Model used for report generation
    #[arg(long, global = true, default_value = DEFAULT_MODEL)]
    model: String,
    /// Base URL of the Generative Language API
    #[arg(long, global = true, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

impl ReportArgs {
    pub(crate) fn to_config(&self) -> ReportConfig {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| env::var(FALLBACK_KEY_VAR).ok());
        ReportConfig {
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..ReportConfig::default()
        }
        .with_api_key(api_key)
    }
}

/// Logging options.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct LogArgs {
    /// Log filter such as `info` or `openfield_report=debug` (defaults to RUST_LOG, then `warn`)
    #[arg(long, global = true)]
    pub(crate) log_level: Option<String>,
    /// Write logs to this file (required for logging from the interactive editor)
    #[arg(long, global = true)]
    pub(crate) log_file: Option<PathBuf>,
}
