//! Routes: ordered sequences of edges with summary metrics.

use chrono::Duration;
use serde::Serialize;

use super::{DomainError, Edge, Planet};

/// Separator between hops in a route's display path.
pub const PATH_SEPARATOR: &str = " | ";

/// Separator between edge ids in a route id.
const ID_SEPARATOR: char = '/';

/// A multi-leg trip from an origin to a destination.
///
/// A route is always non-empty and its legs always connect: each leg starts
/// where the previous one ended. Summary metrics are computed once at
/// construction.
///
/// # Example
///
/// ```
/// use cosmos_server::domain::{Edge, Planet, Route};
///
/// let leg = |from: &str, to: &str, price: f64| Edge {
///     id: Edge::make_id(from, to),
///     leg_id: from.into(),
///     route_id: to.into(),
///     from: Planet::parse(from).unwrap(),
///     to: Planet::parse(to).unwrap(),
///     distance: 100.0,
///     provider_id: to.into(),
///     company_name: "Spacelines".into(),
///     price,
///     duration_ms: 0,
///     flight_start: None,
///     flight_end: None,
/// };
///
/// let route = Route::new(vec![leg("Earth", "Mars", 10.0), leg("Mars", "Venus", 5.0)]).unwrap();
///
/// assert_eq!(route.total_price(), 15.0);
/// assert_eq!(route.path(), "Earth→Mars | Mars→Venus");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    id: String,
    legs: Vec<Edge>,
    path: String,
    companies: Vec<String>,
    total_price: f64,
    total_distance: f64,
    total_duration_ms: i64,
}

impl Route {
    /// Construct a route from its legs, computing summary metrics.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `legs` is empty or consecutive legs don't connect.
    pub fn new(legs: Vec<Edge>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyRoute);
        }

        for window in legs.windows(2) {
            if window[0].to != window[1].from {
                return Err(DomainError::LegsNotConnected(
                    window[0].to.clone(),
                    window[1].from.clone(),
                ));
            }
        }

        let total_price = legs.iter().map(|l| l.price).sum();
        let total_distance = legs.iter().map(|l| l.distance).sum();
        let total_duration_ms = legs.iter().map(|l| l.duration_ms).sum();

        let mut companies: Vec<String> = Vec::new();
        for leg in &legs {
            if !companies.contains(&leg.company_name) {
                companies.push(leg.company_name.clone());
            }
        }

        let path = legs
            .iter()
            .map(|l| format!("{}→{}", l.from, l.to))
            .collect::<Vec<_>>()
            .join(PATH_SEPARATOR);

        let id = legs
            .iter()
            .map(|l| l.id.as_str())
            .collect::<Vec<_>>()
            .join(&ID_SEPARATOR.to_string());

        Ok(Route {
            id,
            legs,
            path,
            companies,
            total_price,
            total_distance,
            total_duration_ms,
        })
    }

    /// Content-derived identifier: the edge ids joined in order.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[Edge] {
        &self.legs
    }

    /// Returns the number of legs (hops).
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Human-readable path, e.g. `Earth→Mars | Mars→Venus`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Companies flown, de-duplicated in first-seen order.
    pub fn companies(&self) -> &[String] {
        &self.companies
    }

    /// Returns true if any leg is flown by `company`.
    pub fn has_company(&self, company: &str) -> bool {
        self.companies.iter().any(|c| c == company)
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn total_duration_ms(&self) -> i64 {
        self.total_duration_ms
    }

    /// Returns the total flight time.
    pub fn total_duration(&self) -> Duration {
        Duration::milliseconds(self.total_duration_ms)
    }

    /// Returns the origin planet.
    pub fn origin(&self) -> &Planet {
        // Safe: validated non-empty at construction
        &self.legs.first().unwrap().from
    }

    /// Returns the destination planet.
    pub fn destination(&self) -> &Planet {
        // Safe: validated non-empty at construction
        &self.legs.last().unwrap().to
    }

    /// Returns true if the route has a single leg.
    pub fn is_direct(&self) -> bool {
        self.legs.len() == 1
    }
}
