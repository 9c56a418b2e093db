use serde::{Deserialize, Serialize};

/// One of the three named partitions of the feature board.
///
/// Buckets describe how a feature relates to the selected week: newly
/// started, carried over, or wrapping up. The partition is shared by every
/// displayed week rather than scoped to one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    New,
    Continuing,
    Ending,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::New, Bucket::Continuing, Bucket::Ending];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Continuing => "continuing",
            Self::Ending => "ending",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "continuing" => Some(Self::Continuing),
            "ending" => Some(Self::Ending),
            _ => None,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
