//! In-memory memo of route graphs.
//!
//! Building a graph from a price list is cheap but repeated on every
//! search. Price lists never change once fetched, so the graph is memoized
//! per price-list id. Entries are never persisted and are invalidated when
//! the price-list cache is rewritten.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::feed::PriceList;
use crate::planner::RouteGraph;

/// Configuration for the graph cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached graphs.
    pub ttl: Duration,

    /// Maximum number of cached graphs.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15 * 60),
            max_capacity: 15,
        }
    }
}

/// Graphs keyed by price-list id.
pub struct GraphCache {
    graphs: MokaCache<String, Arc<RouteGraph>>,
}

impl GraphCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let graphs = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { graphs }
    }

    /// Get the graph for `list`, building it on a miss.
    pub async fn get_or_build(&self, list: &PriceList) -> Arc<RouteGraph> {
        self.graphs
            .get_with_by_ref(list.id.as_str(), async {
                trace!(price_list = %list.id, "Building route graph");
                Arc::new(RouteGraph::build(list))
            })
            .await
    }

    /// Drop every cached graph.
    pub fn invalidate_all(&self) {
        self.graphs.invalidate_all();
    }
}

impl Default for GraphCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
