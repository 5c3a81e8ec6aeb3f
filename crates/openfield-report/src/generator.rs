use openfield_model::{Dataset, Metric};

/// Metrics summarized when a report is requested from the editor.
pub const DEFAULT_METRICS: [Metric; 3] = [Metric::TotalDistance, Metric::CenterTime, Metric::Velocity];

pub const MISSING_KEY_MESSAGE: &str = "Error: no API key configured. Set GEMINI_API_KEY (or pass --api-key) to enable report generation.";
pub const EMPTY_REPORT_MESSAGE: &str = "The model did not return a report.";
pub const REQUEST_FAILED_MESSAGE: &str = "An error occurred while generating the report. Check your network connection or API key.";
pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed, please try again later.";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ReportError {
    #[display("API key not configured")]
    MissingApiKey,
    #[display("network error: {_0}")]
    Network(#[error(not(source))] String),
    #[display("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[display("failed to parse response: {_0}")]
    Parse(#[error(not(source))] String),
    #[display("response contained no text")]
    EmptyResponse,
}

impl ReportError {
    /// Fixed user-facing text shown in place of the report.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingApiKey => MISSING_KEY_MESSAGE,
            Self::EmptyResponse => EMPTY_REPORT_MESSAGE,
            Self::Network(_) | Self::Api { .. } | Self::Parse(_) => REQUEST_FAILED_MESSAGE,
        }
    }
}

/// Produces a narrative report for a dataset.
///
/// Implementations block until the report is available; [`ReportState`]
/// runs them off the editing thread.
///
/// [`ReportState`]: crate::task::ReportState
pub trait ReportGenerator: Send + Sync {
    fn generate(&self, dataset: &Dataset, metrics: &[Metric]) -> Result<String, ReportError>;
}

/// Maps a generation result to the text shown to the user.
#[must_use]
pub fn report_text(result: Result<String, ReportError>) -> String {
    match result {
        Ok(text) => text,
        Err(err) => err.user_message().to_owned(),
    }
}
