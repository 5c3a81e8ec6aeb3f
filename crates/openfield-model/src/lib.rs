//! Groups, subjects and the editing operations of an open field test dataset.
//!
//! - [`metric`]: the closed set of measured quantities and the per-subject record
//! - [`subject`], [`group`]: the cohort model
//! - [`dataset`]: pure edit operations over the ordered group list
//! - [`batch`]: tokenizing and parsing of pasted columns
//! - [`editor`]: the session state container used by the presentation layer
//! - [`defaults`]: the built-in dataset loaded at startup

pub use self::{
    batch::BatchMode,
    dataset::{BatchApplied, Dataset, EditError},
    editor::{Acknowledgement, DestructiveEdit, Editor, PendingConfirmation},
    group::{Group, GroupColor, GroupId, metric_data_for_group},
    metric::{Metric, MetricValues},
    subject::{Subject, SubjectId},
};

pub mod batch;
pub mod dataset;
pub mod defaults;
pub mod editor;
pub mod group;
pub mod metric;
pub mod subject;
