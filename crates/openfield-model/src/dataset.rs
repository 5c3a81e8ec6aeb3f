use serde::{Deserialize, Serialize};

use crate::{
    batch::{self, BatchMode},
    defaults,
    group::{Group, GroupColor},
    metric::Metric,
    subject::Subject,
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EditError {
    #[display("group index {index} out of range ({len} groups)")]
    GroupOutOfRange { index: usize, len: usize },
    #[display("subject index {index} out of range ({len} subjects)")]
    SubjectOutOfRange { index: usize, len: usize },
    #[display("cannot remove the last remaining group")]
    LastGroup,
    #[display("dataset changed since the confirmation was requested")]
    StaleConfirmation,
}

/// Counts of what a batch paste changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchApplied {
    /// Existing subjects whose target metric was overwritten.
    pub updated: usize,
    /// Subjects created to hold values beyond the end of the list.
    pub created: usize,
}

/// Ordered collection of experimental groups.
///
/// Every edit takes `&self` and returns a new `Dataset`; the receiver is never
/// modified. Callers replace their copy with the returned value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    groups: Vec<Group>,
}

impl Default for Dataset {
    fn default() -> Self {
        defaults::default_dataset()
    }
}

impl Dataset {
    #[must_use]
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, index: usize) -> Result<&Group, EditError> {
        self.groups.get(index).ok_or(EditError::GroupOutOfRange {
            index,
            len: self.groups.len(),
        })
    }

    /// Appends an empty group named after the new group count, colored by the
    /// next palette slot.
    #[must_use]
    pub fn add_group(&self) -> Self {
        let count = self.groups.len();
        let group = Group::new(
            format!("Group {}", count + 1),
            GroupColor::for_creation_order(count),
        );
        let mut groups = self.groups.clone();
        groups.push(group);
        Self { groups }
    }

    /// Removes the group at `index`. The last remaining group cannot be removed.
    pub fn remove_group(&self, index: usize) -> Result<Self, EditError> {
        self.group(index)?;
        if self.groups.len() <= 1 {
            return Err(EditError::LastGroup);
        }
        let mut groups = self.groups.clone();
        groups.remove(index);
        Ok(Self { groups })
    }

    pub fn rename_group(&self, index: usize, name: impl Into<String>) -> Result<Self, EditError> {
        let name = name.into();
        self.map_group(index, |group| group.name = name)
    }

    /// Writes a pasted column of numbers into one metric of a group.
    ///
    /// Values are placed positionally starting at [`BatchMode::start_offset`]:
    /// a row that already exists gets only `metric` overwritten, a missing row
    /// is created with every other metric zeroed.
    ///
    /// Returns `Ok(None)` when `raw` contains no parsable number.
    pub fn batch_input(
        &self,
        mode: BatchMode,
        raw: &str,
        group_index: usize,
        metric: Metric,
    ) -> Result<Option<(Self, BatchApplied)>, EditError> {
        let existing = self.group(group_index)?.len();
        let values = batch::parse_numbers(raw);
        if values.is_empty() {
            return Ok(None);
        }

        let offset = mode.start_offset(existing);
        let mut applied = BatchApplied::default();
        let dataset = self.map_group(group_index, |group| {
            for (i, value) in values.into_iter().enumerate() {
                let target = offset + i;
                if let Some(subject) = group.subjects.get_mut(target) {
                    subject.values[metric] = value;
                    applied.updated += 1;
                } else {
                    // Offsets are 0 or the current length, so `target` is
                    // always the next free position here.
                    let mut subject = Subject::zeroed();
                    subject.values[metric] = value;
                    group.subjects.push(subject);
                    applied.created += 1;
                }
            }
        })?;
        Ok(Some((dataset, applied)))
    }

    /// Sets `metric` to zero for every subject of the group.
    pub fn clear_column(&self, group_index: usize, metric: Metric) -> Result<Self, EditError> {
        self.map_group(group_index, |group| {
            for subject in &mut group.subjects {
                subject.values[metric] = 0.0;
            }
        })
    }

    /// Overwrites one cell from user text.
    ///
    /// Returns `Ok(None)` when `raw` is not a number; the edit is discarded.
    pub fn set_single_value(
        &self,
        group_index: usize,
        subject_index: usize,
        metric: Metric,
        raw: &str,
    ) -> Result<Option<Self>, EditError> {
        self.check_subject(group_index, subject_index)?;
        let Some(value) = batch::parse_number(raw) else {
            return Ok(None);
        };
        let dataset = self.map_group(group_index, |group| {
            group.subjects[subject_index].values[metric] = value;
        })?;
        Ok(Some(dataset))
    }

    /// Removes one subject; the subjects after it move up by one position.
    pub fn delete_subject(
        &self,
        group_index: usize,
        subject_index: usize,
    ) -> Result<Self, EditError> {
        self.check_subject(group_index, subject_index)?;
        self.map_group(group_index, |group| {
            group.subjects.remove(subject_index);
        })
    }

    /// Appends one subject with every metric zeroed.
    pub fn add_single_subject(&self, group_index: usize) -> Result<Self, EditError> {
        self.map_group(group_index, |group| group.subjects.push(Subject::zeroed()))
    }

    /// Removes every subject of the group.
    pub fn clear_group_subjects(&self, group_index: usize) -> Result<Self, EditError> {
        self.map_group(group_index, |group| group.subjects.clear())
    }

    fn check_subject(&self, group_index: usize, subject_index: usize) -> Result<(), EditError> {
        let len = self.group(group_index)?.len();
        if subject_index >= len {
            return Err(EditError::SubjectOutOfRange {
                index: subject_index,
                len,
            });
        }
        Ok(())
    }

    fn map_group<F>(&self, index: usize, f: F) -> Result<Self, EditError>
    where
        F: FnOnce(&mut Group),
    {
        self.group(index)?;
        let mut groups = self.groups.clone();
        f(&mut groups[index]);
        Ok(Self { groups })
    }
}
