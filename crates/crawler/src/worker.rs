use crate::decoder::decode_neighbors;
use crate::error::CrawlError;
use crate::fetcher::NeighborSource;
use crate::types::NodeId;
use log::{debug, warn};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Visited set plus the level being assembled, behind a single lock.
///
/// The membership check, the insert and the append happen in one critical section,
/// so a node is admitted at most once per traversal no matter how many workers see it.
#[derive(Debug)]
pub struct LevelState {
    inner: Mutex<LevelInner>,
}

#[derive(Debug, Default)]
struct LevelInner {
    visited: HashSet<NodeId>,
    next_level: Vec<NodeId>,
    failed: Vec<NodeId>,
    settled: HashSet<NodeId>,
}

impl LevelState {
    /// Fresh state with `start` already marked visited.
    pub fn new(start: &str) -> Self {
        let mut visited = HashSet::new();
        visited.insert(start.to_string());
        Self {
            inner: Mutex::new(LevelInner {
                visited,
                ..LevelInner::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LevelInner> {
        // Nothing inside the critical section can leave the data half-updated.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks `node` visited and appends it to the next level. Returns `false` if it was seen before.
    pub fn admit(&self, node: &str) -> bool {
        let mut guard = self.lock();
        if guard.visited.contains(node) {
            return false;
        }
        guard.visited.insert(node.to_string());
        guard.next_level.push(node.to_string());
        true
    }

    /// Marks a node of the current level as fully expanded.
    pub fn settle(&self, node: &str) {
        self.lock().settled.insert(node.to_string());
    }

    /// Records a node of the current level whose lookup failed. A failed node counts as settled.
    pub fn record_failure(&self, node: &str) {
        let mut guard = self.lock();
        if guard.settled.insert(node.to_string()) {
            guard.failed.push(node.to_string());
        }
    }

    /// Records every node of `level` that no worker settled, e.g. after a worker task died.
    /// Returns how many were recorded.
    pub fn fail_unsettled(&self, level: &[NodeId]) -> usize {
        let mut guard = self.lock();
        let mut recorded = 0;
        for node in level {
            if guard.settled.insert(node.clone()) {
                guard.failed.push(node.clone());
                recorded += 1;
            }
        }
        recorded
    }

    /// Drains the assembled level and its failures, leaving the visited set intact.
    pub fn take_level(&self) -> (Vec<NodeId>, Vec<NodeId>) {
        let mut guard = self.lock();
        guard.settled.clear();
        (
            std::mem::take(&mut guard.next_level),
            std::mem::take(&mut guard.failed),
        )
    }
}

/// Counters for one worker's partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionOutcome {
    pub expanded: usize,
    pub failed: usize,
    pub admitted: usize,
}

/// Expands every node of one partition in order.
///
/// A failed lookup is logged, recorded and treated as zero neighbors; the rest of the
/// partition still runs.
pub async fn process_partition(
    source: &dyn NeighborSource,
    nodes: &[NodeId],
    state: &LevelState,
) -> PartitionOutcome {
    let mut outcome = PartitionOutcome::default();

    for node in nodes {
        debug!("Trying to expand {node}");
        let raw = match source.fetch(node).await {
            Ok(raw) => raw,
            Err(err) => {
                let err = CrawlError::Fetch {
                    node: node.clone(),
                    source: err,
                };
                warn!("{err}");
                state.record_failure(node);
                outcome.failed += 1;
                continue;
            }
        };

        outcome.expanded += 1;
        for neighbor in decode_neighbors(&raw) {
            debug!("neighbor {neighbor}");
            if state.admit(&neighbor) {
                outcome.admitted += 1;
            }
        }
        state.settle(node);
    }

    outcome
}
