use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status every newly added feature starts with.
pub const INITIAL_STATUS: &str = "Planning";

/// A planned work item on the board.
///
/// Features are volatile: they exist for one planning session and are never
/// persisted. A record belongs to exactly one bucket at a time; there is no
/// move operation between buckets, only add and delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub priority: Priority,
    /// Free-form stage label ("Planning", "Testing", ...). New records
    /// always start as [`INITIAL_STATUS`].
    pub status: String,
}

/// Relative importance of a feature.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for adding a feature to a bucket.
///
/// A fixed record: the three fields the add form collects, nothing else.
/// The board validates the name; id and status are assigned on insert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureDraft {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
}
