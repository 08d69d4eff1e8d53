//! Route enumeration by depth-first search.
//!
//! Finds simple paths from an origin to a destination. A path never visits
//! the same planet twice, even through a different leg or provider, and
//! never has more legs than the hop limit. Parallel edges between the same
//! planets are explored as separate branches.
//!
//! The search runs on an explicit stack of frames, each holding the path
//! taken so far. Children are pushed in reverse so they pop in input order,
//! which makes the result order exactly the pre-order of a recursive search
//! over edges in leg order, then provider order.

use tracing::debug;

use crate::domain::{Edge, Planet, Route};
use crate::feed::PriceList;

use super::config::SearchConfig;
use super::graph::RouteGraph;

/// Request for route search against a price list.
#[derive(Debug, Clone)]
pub struct RouteQuery<'a> {
    /// Price list to search; `None` yields no routes.
    pub price_list: Option<&'a PriceList>,

    /// Origin planet name. Blank means not selected.
    pub origin: &'a str,

    /// Destination planet name. Blank means not selected.
    pub destination: &'a str,

    /// Maximum number of legs per route.
    pub hop_limit: usize,

    /// Maximum number of routes to return.
    pub result_cap: usize,
}

impl<'a> RouteQuery<'a> {
    /// Create a query with default limits.
    pub fn new(price_list: Option<&'a PriceList>, origin: &'a str, destination: &'a str) -> Self {
        Self::with_config(price_list, origin, destination, &SearchConfig::default())
    }

    /// Create a query using the limits from `config`.
    pub fn with_config(
        price_list: Option<&'a PriceList>,
        origin: &'a str,
        destination: &'a str,
        config: &SearchConfig,
    ) -> Self {
        Self {
            price_list,
            origin,
            destination,
            hop_limit: config.hop_limit,
            result_cap: config.result_cap,
        }
    }

    /// Resolve origin and destination, `None` if either is blank or they
    /// are the same planet.
    fn endpoints(&self) -> Option<(Planet, Planet)> {
        let origin = Planet::parse(self.origin).ok()?;
        let destination = Planet::parse(self.destination).ok()?;
        (origin != destination).then_some((origin, destination))
    }
}

/// Result of route search.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// Found routes in search order.
    pub routes: Vec<Route>,

    /// Number of frames popped during search.
    pub frames_explored: usize,

    /// True if the result cap was reached.
    pub capped: bool,
}

impl SearchResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// DFS frame: where we are and how we got here.
struct Frame<'g> {
    at: &'g Planet,
    path: Vec<&'g Edge>,
}

impl Frame<'_> {
    /// Returns true if `planet` is the origin or already on the path.
    fn has_visited(&self, origin: &Planet, planet: &Planet) -> bool {
        planet == origin || self.path.iter().any(|e| &e.to == planet)
    }
}

impl RouteGraph {
    /// Enumerate simple routes from `origin` to `destination`.
    ///
    /// Stops as soon as `result_cap` routes are found. Routes are returned
    /// in search order, before any ranking.
    pub fn search(
        &self,
        origin: &Planet,
        destination: &Planet,
        hop_limit: usize,
        result_cap: usize,
    ) -> SearchResult {
        if origin == destination || result_cap == 0 {
            return SearchResult::empty();
        }

        let mut result = SearchResult::empty();
        let mut stack = vec![Frame {
            at: origin,
            path: Vec::new(),
        }];

        while let Some(frame) = stack.pop() {
            if result.routes.len() >= result_cap {
                result.capped = true;
                break;
            }
            result.frames_explored += 1;

            if frame.at == destination {
                let legs = frame.path.iter().map(|&e| e.clone()).collect();
                if let Ok(route) = Route::new(legs) {
                    result.routes.push(route);
                }
                continue;
            }

            if frame.path.len() >= hop_limit {
                continue;
            }

            let children: Vec<Frame<'_>> = self
                .outgoing(frame.at)
                .filter(|e| !frame.has_visited(origin, &e.to))
                .map(|e| {
                    let mut path = frame.path.clone();
                    path.push(e);
                    Frame { at: &e.to, path }
                })
                .collect();

            stack.extend(children.into_iter().rev());
        }

        if result.routes.len() >= result_cap {
            result.capped = true;
        }

        debug!(
            origin = %origin,
            destination = %destination,
            routes = result.routes.len(),
            frames = result.frames_explored,
            capped = result.capped,
            "Route search complete"
        );

        result
    }
}

/// Find routes for a query.
///
/// Returns an empty list if there is no price list, either endpoint is
/// blank, or origin equals destination.
pub fn find_routes(query: &RouteQuery<'_>) -> Vec<Route> {
    let Some(list) = query.price_list else {
        return Vec::new();
    };
    let Some((origin, destination)) = query.endpoints() else {
        return Vec::new();
    };

    RouteGraph::build(list)
        .search(&origin, &destination, query.hop_limit, query.result_cap)
        .routes
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
