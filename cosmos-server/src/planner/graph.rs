//! Directed multigraph of priced edges.
//!
//! Edges are indexed by origin planet. Outgoing edges keep their input
//! order, which fixes the order in which search visits them.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Edge, Planet};
use crate::feed::PriceList;

use super::build::{BuildReport, build_edges};

/// Edges of one price list, indexed for search.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    edges: Vec<Edge>,

    /// Map from planet to indices into `edges`, in input order.
    outgoing: HashMap<Planet, Vec<usize>>,

    skipped_legs: usize,
    skipped_providers: usize,
}

impl RouteGraph {
    /// Build the graph for a price list.
    pub fn build(list: &PriceList) -> Self {
        let report = build_edges(list);

        if !report.is_clean() {
            debug!(
                price_list = %list.id,
                skipped_legs = report.skipped_legs,
                skipped_providers = report.skipped_providers,
                "Price list had invalid entries"
            );
        }

        Self::from_report(report)
    }

    fn from_report(report: BuildReport) -> Self {
        let mut graph = Self::from_edges(report.edges);
        graph.skipped_legs = report.skipped_legs;
        graph.skipped_providers = report.skipped_providers;
        graph
    }

    /// Index a list of edges.
    pub fn from_edges(edges: Vec<Edge>) -> Self {
        let mut outgoing: HashMap<Planet, Vec<usize>> = HashMap::new();
        for (idx, edge) in edges.iter().enumerate() {
            outgoing.entry(edge.from.clone()).or_default().push(idx);
        }

        Self {
            edges,
            outgoing,
            skipped_legs: 0,
            skipped_providers: 0,
        }
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges leaving `from`, in input order.
    pub fn outgoing<'a>(&'a self, from: &Planet) -> impl Iterator<Item = &'a Edge> + use<'a> {
        self.outgoing
            .get(from)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&idx| &self.edges[idx])
    }

    /// Legs skipped while building.
    pub fn skipped_legs(&self) -> usize {
        self.skipped_legs
    }

    /// Offers skipped while building.
    pub fn skipped_providers(&self) -> usize {
        self.skipped_providers
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{edge, planet};
    use super::*;

    #[test]
    fn outgoing_keeps_input_order() {
        let graph = RouteGraph::from_edges(vec![
            edge("Earth", "Mars", "b", 1.0, 1.0),
            edge("Mars", "Venus", "x", 1.0, 1.0),
            edge("Earth", "Venus", "a", 1.0, 1.0),
            edge("Earth", "Mars", "c", 1.0, 1.0),
        ]);

        let providers: Vec<&str> = graph
            .outgoing(&planet("Earth"))
            .map(|e| e.provider_id.as_str())
            .collect();
        assert_eq!(providers, vec!["b", "a", "c"]);
    }

    #[test]
    fn outgoing_of_unknown_planet_is_empty() {
        let graph = RouteGraph::from_edges(vec![edge("Earth", "Mars", "a", 1.0, 1.0)]);
        assert_eq!(graph.outgoing(&planet("Pluto")).count(), 0);
        assert_eq!(graph.outgoing(&planet("Mars")).count(), 0);
    }

    #[test]
    fn build_keeps_skip_counts() {
        let list: PriceList = serde_json::from_value(serde_json::json!({
            "id": "pl",
            "validUntil": "2030-01-01T00:00:00Z",
            "legs": [
                { "id": "1", "routeInfo": { "from": "Earth", "to": "Mars" },
                  "providers": [{ "id": "a", "price": 1 }, { "id": "b", "price": "x" }] },
                { "id": "2", "routeInfo": { "from": "Earth" } }
            ]
        }))
        .unwrap();

        let graph = RouteGraph::build(&list);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.skipped_legs(), 1);
        assert_eq!(graph.skipped_providers(), 1);
    }
}
