use crate::config::CrawlConfig;
use crate::error::Result;
use crate::fetcher::{HttpNeighborFetcher, NeighborSource};
use crate::types::{NodeId, Traversal};
use crate::worker::{process_partition, LevelState, PartitionOutcome};
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Drives the level-by-level traversal.
pub struct Crawler {
    source: Arc<dyn NeighborSource>,
    config: CrawlConfig,
}

impl Crawler {
    pub fn new(source: Arc<dyn NeighborSource>, config: CrawlConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    /// Crawler backed by the HTTP lookup service named in `config`.
    pub fn from_config(config: CrawlConfig) -> Result<Self> {
        let fetcher = HttpNeighborFetcher::new(&config)?;
        Self::new(Arc::new(fetcher), config)
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Runs `depth` expansion steps from `start`.
    ///
    /// Always returns `depth + 1` levels; once the frontier is empty the remaining
    /// levels are empty too. Lookup failures only shrink the result.
    pub async fn traverse(&self, start: &str, depth: usize) -> Traversal {
        let started = Instant::now();
        let state = Arc::new(LevelState::new(start));
        let mut traversal = Traversal::start(start.to_string());

        for d in 0..depth {
            let current = &traversal.levels[d];
            let (next_level, failed) = if current.is_empty() {
                debug!("Level {d} is empty, nothing to expand");
                (Vec::new(), Vec::new())
            } else {
                self.expand_level(d, current, &state).await
            };

            info!(
                "Level {} complete: {} new nodes, {} failed lookups",
                d + 1,
                next_level.len(),
                failed.len()
            );
            traversal.levels.push(next_level);
            traversal.failures[d] = failed;
            traversal.failures.push(Vec::new());
        }

        traversal.elapsed = started.elapsed();
        traversal
    }

    /// Expands one level across at most `max_workers` tasks and waits for all of them.
    ///
    /// Nodes of a worker that died before reaching them are recorded as failures.
    async fn expand_level(
        &self,
        d: usize,
        current: &[NodeId],
        state: &Arc<LevelState>,
    ) -> (Vec<NodeId>, Vec<NodeId>) {
        let partitions = partition_round_robin(current, self.config.max_workers);
        debug!(
            "Starting level: {d} with {} nodes on {} workers",
            current.len(),
            partitions.len()
        );

        let mut workers = JoinSet::new();
        for (worker_id, partition) in partitions.into_iter().enumerate() {
            let source = Arc::clone(&self.source);
            let state = Arc::clone(state);
            workers.spawn(async move {
                let outcome = process_partition(source.as_ref(), &partition, &state).await;
                (worker_id, outcome)
            });
        }

        let mut totals = PartitionOutcome::default();
        let mut aborted = 0;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((worker_id, outcome)) => {
                    debug!(
                        "Level {d} worker {worker_id}: expanded={} failed={} admitted={}",
                        outcome.expanded, outcome.failed, outcome.admitted
                    );
                    totals.expanded += outcome.expanded;
                    totals.failed += outcome.failed;
                    totals.admitted += outcome.admitted;
                }
                Err(err) => {
                    error!("Level {d} worker task aborted: {err}");
                    aborted += 1;
                }
            }
        }
        if aborted > 0 {
            let lost = state.fail_unsettled(current);
            totals.failed += lost;
            error!("Level {d}: {lost} nodes left unexpanded by {aborted} aborted workers");
        }
        debug!(
            "Level {d} done: expanded={} failed={} admitted={}",
            totals.expanded, totals.failed, totals.admitted
        );

        state.take_level()
    }
}

/// Splits `nodes` across `min(max_workers, nodes.len())` partitions, node `i` going to
/// partition `i % n`. Returns no partitions for an empty level.
pub fn partition_round_robin(nodes: &[NodeId], max_workers: usize) -> Vec<Vec<NodeId>> {
    let workers = max_workers.max(1).min(nodes.len());
    let mut partitions = vec![Vec::new(); workers];
    for (i, node) in nodes.iter().enumerate() {
        partitions[i % workers].push(node.clone());
    }
    partitions
}
