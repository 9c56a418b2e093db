//! The in-memory feature board.
//!
//! One board per planner run. Buckets partition the features into `new`,
//! `continuing` and `ending` work; insertion order is display order. The
//! partition is shared across every displayed week (selecting another week
//! shows the same records), and nothing is ever written to disk.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Bucket, Feature, FeatureDraft, Priority, INITIAL_STATUS};

/// A rejected draft. Callers treat this as a no-op rather than a
/// user-facing failure; the bucket is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("feature name is empty")]
    EmptyName,
}

/// Bucketed collection of [`Feature`] records.
///
/// A given id lives in at most one bucket; the only mutations are [`add`]
/// and [`delete`].
///
/// [`add`]: Board::add
/// [`delete`]: Board::delete
#[derive(Debug, Clone, Default)]
pub struct Board {
    new: Vec<Feature>,
    continuing: Vec<Feature>,
    ending: Vec<Feature>,
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Board pre-populated with the demo planning data.
    pub fn seeded() -> Self {
        Self {
            new: vec![
                seed(
                    "User Authentication",
                    "Login/signup system",
                    Priority::High,
                    "In Progress",
                ),
                seed(
                    "Dashboard Analytics",
                    "User engagement metrics",
                    Priority::Medium,
                    "Planning",
                ),
            ],
            continuing: vec![seed(
                "Mobile Optimization",
                "Responsive design improvements",
                Priority::High,
                "Testing",
            )],
            ending: vec![seed(
                "Legacy API Migration",
                "Move to new API endpoints",
                Priority::Low,
                "Complete",
            )],
        }
    }

    /// Validate `draft`, assign a fresh id and the initial status, and
    /// append the record to `bucket`. Returns the new record's id.
    ///
    /// Names are required; whitespace-only input is rejected. Duplicate
    /// names are allowed.
    pub fn add(&mut self, bucket: Bucket, draft: FeatureDraft) -> Result<Uuid, ValidationError> {
        if draft.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let id = Uuid::new_v4();
        self.bucket_mut(bucket).push(Feature {
            id,
            name: draft.name,
            description: draft.description,
            priority: draft.priority,
            status: INITIAL_STATUS.to_string(),
        });
        tracing::debug!(%id, bucket = bucket.as_str(), "feature added");
        Ok(id)
    }

    /// Remove the record with `id` from `bucket`.
    ///
    /// Returns whether anything was removed; an absent id is a no-op, not
    /// an error.
    pub fn delete(&mut self, bucket: Bucket, id: Uuid) -> bool {
        let entries = self.bucket_mut(bucket);
        let before = entries.len();
        entries.retain(|feature| feature.id != id);
        let removed = entries.len() != before;
        if removed {
            tracing::debug!(%id, bucket = bucket.as_str(), "feature deleted");
        }
        removed
    }

    /// The records in `bucket`, in insertion order. Empty is a valid state.
    pub fn list(&self, bucket: Bucket) -> &[Feature] {
        match bucket {
            Bucket::New => &self.new,
            Bucket::Continuing => &self.continuing,
            Bucket::Ending => &self.ending,
        }
    }

    /// Number of records in `bucket`.
    pub fn len(&self, bucket: Bucket) -> usize {
        self.list(bucket).len()
    }

    /// Total records across all buckets.
    pub fn total(&self) -> usize {
        Bucket::ALL.iter().map(|bucket| self.len(*bucket)).sum()
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<Feature> {
        match bucket {
            Bucket::New => &mut self.new,
            Bucket::Continuing => &mut self.continuing,
            Bucket::Ending => &mut self.ending,
        }
    }
}

fn seed(name: &str, description: &str, priority: Priority, status: &str) -> Feature {
    Feature {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: Some(description.to_string()),
        priority,
        status: status.to_string(),
    }
}
