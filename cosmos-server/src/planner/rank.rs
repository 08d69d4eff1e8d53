//! Filtering and ordering of found routes.
//!
//! Routes come out of search in DFS order. Before display they are
//! filtered by company and sorted by one key, ascending. The sort is
//! stable, so routes that tie keep their search order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Route;

/// Key to sort routes by. All keys sort ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Total quoted price.
    #[default]
    Price,
    /// Total distance.
    Distance,
    /// Total travel time.
    Time,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Distance => "distance",
            SortKey::Time => "time",
        }
    }

    fn compare(self, a: &Route, b: &Route) -> Ordering {
        match self {
            SortKey::Price => a.total_price().total_cmp(&b.total_price()),
            SortKey::Distance => a.total_distance().total_cmp(&b.total_distance()),
            SortKey::Time => a.total_duration_ms().cmp(&b.total_duration_ms()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0:?} (expected price, distance or time)")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "distance" => Ok(SortKey::Distance),
            "time" => Ok(SortKey::Time),
            _ => Err(UnknownSortKey(s.to_string())),
        }
    }
}

/// Keep only routes where some leg is operated by `company`.
///
/// A missing or empty filter keeps every route. Matching is exact.
pub fn filter_by_company(routes: Vec<Route>, company: Option<&str>) -> Vec<Route> {
    match company.filter(|c| !c.is_empty()) {
        Some(company) => routes
            .into_iter()
            .filter(|r| r.has_company(company))
            .collect(),
        None => routes,
    }
}

/// Sort routes ascending by `key`. Ties keep their input order.
pub fn sort_routes(mut routes: Vec<Route>, key: SortKey) -> Vec<Route> {
    routes.sort_by(|a, b| key.compare(a, b));
    routes
}

/// Filter by company, then sort.
pub fn rank_routes(routes: Vec<Route>, company: Option<&str>, key: SortKey) -> Vec<Route> {
    sort_routes(filter_by_company(routes, company), key)
}
