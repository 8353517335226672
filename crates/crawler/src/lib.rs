//! # Levelcrawl Crawler
//!
//! Level-synchronized breadth-first traversal of a graph whose edges live behind a
//! remote neighbor-lookup service.
//!
//! ## Features
//!
//! - **Bounded fan-out** - each level is split round-robin across at most `max_workers` tasks
//! - **Exactly-once admission** - a node enters the traversal at the first depth it is reached
//! - **Node-scoped failures** - a failed lookup degrades that node to "no neighbors"
//! - **Strict layering** - depth `d + 1` starts only after every worker of depth `d` finishes
//!
//! ## Architecture
//!
//! ```text
//! Crawler::traverse(start, depth)
//!     │
//!     ├──> Level d ──partition──> worker 0 ... worker N-1   (JoinSet, one wave per level)
//!     │                              │
//!     │                              ├─ NeighborSource::fetch (HTTP)
//!     │                              ├─ decode_neighbors (fail open)
//!     │                              └─ LevelState::admit (one lock: visited + next level)
//!     │
//!     └──> barrier ──> Level d + 1
//! ```

mod config;
mod decoder;
mod error;
mod fetcher;
mod orchestrator;
mod types;
mod worker;

pub use config::{
    parse_max_workers, CrawlConfig, DEFAULT_MAX_WORKERS, DEFAULT_SERVICE_URL, MAX_WORKERS_CAP,
};
pub use decoder::decode_neighbors;
pub use error::{CrawlError, FetchError, Result};
pub use fetcher::{HttpNeighborFetcher, NeighborSource};
pub use orchestrator::{partition_round_robin, Crawler};
pub use types::{NodeId, Traversal};
pub use worker::{process_partition, LevelState, PartitionOutcome};
