//! Narrative report generation for open field test data.
//!
//! The data is rendered as a plain-text summary ([`summary`]), wrapped in an
//! instruction prompt ([`prompt`]) and sent to a language model through a
//! [`ReportGenerator`]. [`GeminiClient`] is the production implementation.
//! [`ReportState`] runs one generation at a time on a worker thread so the
//! data can still be edited while the request is in flight.
//!
//! Significance statements in a generated report are the model's estimates;
//! nothing here computes an inferential test.

pub use self::{
    gemini::{GeminiClient, ReportConfig},
    generator::{DEFAULT_METRICS, ReportError, ReportGenerator, report_text},
    task::{AnalysisReport, ReportState},
};

pub mod gemini;
pub mod generator;
pub mod prompt;
pub mod summary;
pub mod task;
