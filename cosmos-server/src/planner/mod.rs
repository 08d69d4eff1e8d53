//! Route planner over a price list.
//!
//! This module answers two questions for the booking screen: where can I
//! get to from this planet, and which routes take me to that destination?
//!
//! A price list is flattened into a directed multigraph with one edge per
//! (leg, provider) offer. Reachability uses breadth-first search bounded by
//! a hop limit; route enumeration uses depth-first search that never
//! revisits a planet. Found routes are then filtered by company and sorted.

mod build;
mod config;
mod graph;
mod rank;
mod reach;
mod search;

pub use build::{BuildReport, build_edges, list_companies, list_planets};
pub use config::SearchConfig;
pub use graph::RouteGraph;
pub use rank::{SortKey, UnknownSortKey, filter_by_company, rank_routes, sort_routes};
pub use reach::{destination_options, reachable_from};
pub use search::{RouteQuery, SearchResult, find_routes};
