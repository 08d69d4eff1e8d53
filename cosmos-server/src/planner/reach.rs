//! Reachable destinations by breadth-first search.
//!
//! Used to narrow the destination choices once an origin is picked. The
//! search expands one hop per round, up to the hop limit, and never counts
//! the origin as its own destination.

use std::collections::BTreeSet;

use tracing::trace;

use crate::domain::Planet;
use crate::feed::PriceList;

use super::build::list_planets;
use super::graph::RouteGraph;

impl RouteGraph {
    /// Planets reachable from `origin` within `hop_limit` hops.
    ///
    /// Returns names sorted and de-duplicated; `origin` is never included.
    pub fn reachable_from(&self, origin: &Planet, hop_limit: usize) -> Vec<Planet> {
        let mut reachable: BTreeSet<&Planet> = BTreeSet::new();
        let mut frontier: Vec<&Planet> = vec![origin];

        for depth in 0..hop_limit {
            let mut next_frontier: Vec<&Planet> = Vec::new();

            for node in &frontier {
                for edge in self.outgoing(node) {
                    if &edge.to == origin {
                        continue;
                    }
                    if reachable.insert(&edge.to) {
                        next_frontier.push(&edge.to);
                    }
                }
            }

            trace!(
                depth,
                discovered = next_frontier.len(),
                "Reachability round complete"
            );

            frontier = next_frontier;
            if frontier.is_empty() {
                break;
            }
        }

        reachable.into_iter().cloned().collect()
    }
}

/// Planets reachable from `origin` in `list` within `hop_limit` hops.
///
/// Returns an empty list when `origin` is blank.
pub fn reachable_from(list: &PriceList, origin: &str, hop_limit: usize) -> Vec<Planet> {
    let Ok(origin) = Planet::parse(origin) else {
        return Vec::new();
    };

    RouteGraph::build(list).reachable_from(&origin, hop_limit)
}

/// Destinations to offer for an origin.
///
/// With no origin selected, every planet is offered. With an origin, the
/// planets reachable within `hop_limit` are offered, falling back to every
/// planet when nothing is reachable so the choice list is never empty.
pub fn destination_options(list: &PriceList, origin: Option<&str>, hop_limit: usize) -> Vec<Planet> {
    let planets = list_planets(list);

    let Some(origin) = origin.filter(|o| !o.trim().is_empty()) else {
        return planets;
    };

    let reachable = reachable_from(list, origin, hop_limit);
    if reachable.is_empty() {
        planets
    } else {
        reachable
    }
}
