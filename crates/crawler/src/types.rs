use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Opaque vertex name. Compared by exact string equality.
pub type NodeId = String;

/// Result of one traversal: `levels[d]` holds the nodes first reached at depth `d`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Traversal {
    /// Nodes per depth, `levels[0] == [start]`
    pub levels: Vec<Vec<NodeId>>,

    /// Nodes of each level whose lookup failed (treated as neighborless)
    pub failures: Vec<Vec<NodeId>>,

    /// Wall-clock time spent in `traverse`
    #[serde(with = "duration_secs")]
    pub elapsed: Duration,
}

impl Traversal {
    pub(crate) fn start(start: NodeId) -> Self {
        Self {
            levels: vec![vec![start]],
            failures: vec![Vec::new()],
            elapsed: Duration::ZERO,
        }
    }

    /// Number of expansion steps performed (`levels.len() - 1`).
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    pub fn total_nodes(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.failures.iter().map(Vec::len).sum()
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Ok(Duration::try_from_secs_f64(secs).unwrap_or_default())
    }
}
