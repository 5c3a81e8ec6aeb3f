//! Editing session state.
//!
//! [`Editor`] owns the current [`Dataset`] version together with the selection
//! the edits apply to (active group, target metric and the paste buffer). Each
//! successful edit replaces the dataset wholesale and bumps the revision, so
//! readers (table, charts, report snapshot) always see a consistent version.

use tracing::debug;

use crate::{
    batch::BatchMode,
    dataset::{BatchApplied, Dataset, EditError},
    group::Group,
    metric::Metric,
};

/// Bulk clear that must be acknowledged before it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestructiveEdit {
    ClearColumn { group: usize, metric: Metric },
    ClearGroupSubjects { group: usize },
}

impl DestructiveEdit {
    #[must_use]
    pub const fn group_index(self) -> usize {
        match self {
            Self::ClearColumn { group, .. } | Self::ClearGroupSubjects { group } => group,
        }
    }
}

/// A destructive edit waiting for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    edit: DestructiveEdit,
    revision: u64,
    prompt: String,
}

impl PendingConfirmation {
    #[must_use]
    pub fn edit(&self) -> DestructiveEdit {
        self.edit
    }

    /// Question to show the user.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Acknowledgement {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone)]
pub struct Editor {
    dataset: Dataset,
    revision: u64,
    active_group: usize,
    target_metric: Metric,
    input_buffer: String,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Dataset::default())
    }
}

impl Editor {
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            revision: 0,
            active_group: 0,
            target_metric: Metric::TotalDistance,
            input_buffer: String::new(),
        }
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Copy of the current dataset, for consumers that outlive this version.
    #[must_use]
    pub fn snapshot(&self) -> Dataset {
        self.dataset.clone()
    }

    /// Number of dataset versions replaced since creation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn active_group_index(&self) -> usize {
        self.active_group
    }

    /// The group edits apply to, `None` only when the dataset has no groups.
    #[must_use]
    pub fn active_group(&self) -> Option<&Group> {
        self.dataset.groups().get(self.active_group)
    }

    #[must_use]
    pub fn target_metric(&self) -> Metric {
        self.target_metric
    }

    #[must_use]
    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn input_buffer_mut(&mut self) -> &mut String {
        &mut self.input_buffer
    }

    pub fn set_input_buffer(&mut self, text: impl Into<String>) {
        self.input_buffer = text.into();
    }

    pub fn set_target_metric(&mut self, metric: Metric) {
        self.target_metric = metric;
    }

    pub fn select_group(&mut self, index: usize) -> Result<(), EditError> {
        self.dataset.group(index)?;
        self.active_group = index;
        Ok(())
    }

    /// Whether a group may be removed, i.e. more than one exists.
    #[must_use]
    pub fn can_remove_group(&self) -> bool {
        self.dataset.len() > 1
    }

    /// Appends a new group and makes it active. Returns its index.
    pub fn add_group(&mut self) -> usize {
        let dataset = self.dataset.add_group();
        self.commit(dataset, "add group");
        self.active_group = self.dataset.len() - 1;
        self.active_group
    }

    pub fn remove_group(&mut self, index: usize) -> Result<(), EditError> {
        let dataset = self.dataset.remove_group(index)?;
        self.commit(dataset, "remove group");
        if self.active_group >= self.dataset.len() {
            self.active_group = self.dataset.len().saturating_sub(1);
        }
        Ok(())
    }

    pub fn rename_group(&mut self, index: usize, name: impl Into<String>) -> Result<(), EditError> {
        let dataset = self.dataset.rename_group(index, name)?;
        self.commit(dataset, "rename group");
        Ok(())
    }

    /// Pastes the input buffer into the target metric of the active group.
    ///
    /// The buffer is cleared when at least one number was applied; otherwise
    /// nothing changes and `Ok(None)` is returned.
    pub fn batch_input(&mut self, mode: BatchMode) -> Result<Option<BatchApplied>, EditError> {
        let Some((dataset, applied)) = self.dataset.batch_input(
            mode,
            &self.input_buffer,
            self.active_group,
            self.target_metric,
        )?
        else {
            return Ok(None);
        };
        self.commit(dataset, "batch input");
        self.input_buffer.clear();
        debug!(
            ?mode,
            metric = self.target_metric.key(),
            updated = applied.updated,
            created = applied.created,
            "batch applied"
        );
        Ok(Some(applied))
    }

    /// Sets one cell of the active group from user text.
    ///
    /// Returns `Ok(false)` when the text is not a number and the edit was
    /// discarded.
    pub fn set_single_value(
        &mut self,
        subject_index: usize,
        metric: Metric,
        raw: &str,
    ) -> Result<bool, EditError> {
        let Some(dataset) =
            self.dataset
                .set_single_value(self.active_group, subject_index, metric, raw)?
        else {
            debug!(raw, "discarded non-numeric cell edit");
            return Ok(false);
        };
        self.commit(dataset, "set value");
        Ok(true)
    }

    pub fn delete_subject(&mut self, subject_index: usize) -> Result<(), EditError> {
        let dataset = self
            .dataset
            .delete_subject(self.active_group, subject_index)?;
        self.commit(dataset, "delete subject");
        Ok(())
    }

    pub fn add_single_subject(&mut self) -> Result<(), EditError> {
        let dataset = self.dataset.add_single_subject(self.active_group)?;
        self.commit(dataset, "add subject");
        Ok(())
    }

    /// Asks to zero the target metric column of the active group.
    pub fn request_clear_column(&self) -> Result<PendingConfirmation, EditError> {
        self.request(DestructiveEdit::ClearColumn {
            group: self.active_group,
            metric: self.target_metric,
        })
    }

    /// Asks to remove every subject of the active group.
    pub fn request_clear_group_subjects(&self) -> Result<PendingConfirmation, EditError> {
        self.request(DestructiveEdit::ClearGroupSubjects {
            group: self.active_group,
        })
    }

    pub fn request(&self, edit: DestructiveEdit) -> Result<PendingConfirmation, EditError> {
        let group = self.dataset.group(edit.group_index())?;
        let prompt = match edit {
            DestructiveEdit::ClearColumn { metric, .. } => {
                format!("Clear the \"{metric}\" column of {}?", group.name)
            }
            DestructiveEdit::ClearGroupSubjects { .. } => format!(
                "Remove all subjects of {}? This cannot be undone.",
                group.name
            ),
        };
        Ok(PendingConfirmation {
            edit,
            revision: self.revision,
            prompt,
        })
    }

    /// Applies `pending` if the user confirmed it.
    ///
    /// Returns `Ok(false)` when the edit was declined. A confirmation requested
    /// against an older dataset version is rejected.
    pub fn confirm(
        &mut self,
        pending: PendingConfirmation,
        answer: Acknowledgement,
    ) -> Result<bool, EditError> {
        if answer.is_declined() {
            debug!(edit = ?pending.edit, "destructive edit declined");
            return Ok(false);
        }
        if pending.revision != self.revision {
            return Err(EditError::StaleConfirmation);
        }
        let dataset = match pending.edit {
            DestructiveEdit::ClearColumn { group, metric } => {
                self.dataset.clear_column(group, metric)?
            }
            DestructiveEdit::ClearGroupSubjects { group } => {
                self.dataset.clear_group_subjects(group)?
            }
        };
        self.commit(dataset, "confirmed clear");
        Ok(true)
    }

    fn commit(&mut self, dataset: Dataset, action: &str) {
        self.dataset = dataset;
        self.revision += 1;
        debug!(action, revision = self.revision, "dataset replaced");
    }
}
