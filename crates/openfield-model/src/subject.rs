use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metric::{Metric, MetricValues};

/// Opaque identifier of a [`Subject`].
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Generates a fresh identifier that is unique within the process.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("s-{}", Uuid::new_v4()))
    }

    /// Wraps a fixed identifier (used by the built-in dataset).
    #[must_use]
    pub fn from_static(id: &'static str) -> Self {
        Self(id.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One measured test animal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    id: SubjectId,
    pub values: MetricValues,
}

impl Subject {
    /// Creates a subject with a fresh id and every metric set to zero.
    #[must_use]
    pub fn zeroed() -> Self {
        Self::with_values(SubjectId::generate(), MetricValues::zeroed())
    }

    #[must_use]
    pub fn with_values(id: SubjectId, values: MetricValues) -> Self {
        Self { id, values }
    }

    #[must_use]
    pub fn id(&self) -> &SubjectId {
        &self.id
    }

    #[must_use]
    pub fn value(&self, metric: Metric) -> f64 {
        self.values[metric]
    }
}
