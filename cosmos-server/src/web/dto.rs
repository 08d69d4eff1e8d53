//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Edge, Planet, Reservation, ReservedLeg, Route};
use crate::feed::PriceList;
use crate::service::RefreshOutcome;

/// Query for destination options.
#[derive(Debug, Deserialize)]
pub struct DestinationsQuery {
    /// Selected origin; all planets are offered when absent
    pub origin: Option<String>,
}

/// Query for route search.
///
/// Missing endpoints read as blank, which finds no routes.
#[derive(Debug, Deserialize)]
pub struct RoutesQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,

    /// Only routes flown at least partly by this company
    pub company: Option<String>,

    /// `price` (default), `distance` or `time`
    pub sort: Option<String>,
}

/// Request to book a route.
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub origin: String,
    pub destination: String,

    /// Route id as returned by route search
    pub route_id: String,

    pub first_name: String,
    pub last_name: String,
}

/// List of planet names.
#[derive(Debug, Serialize)]
pub struct PlanetsResponse {
    pub planets: Vec<String>,
}

impl PlanetsResponse {
    pub fn from_planets(planets: Vec<Planet>) -> Self {
        Self {
            planets: planets.into_iter().map(String::from).collect(),
        }
    }
}

/// List of company names.
#[derive(Debug, Serialize)]
pub struct CompaniesResponse {
    pub companies: Vec<String>,
}

/// A cached price list.
#[derive(Debug, Serialize)]
pub struct PriceListSummary {
    pub id: String,
    pub valid_until: DateTime<Utc>,
    pub expired: bool,
    pub leg_count: usize,
}

impl PriceListSummary {
    pub fn from_price_list(list: &PriceList, now: DateTime<Utc>) -> Self {
        Self {
            id: list.id.clone(),
            valid_until: list.valid_until,
            expired: list.is_expired(now),
            leg_count: list.legs.len(),
        }
    }
}

/// Cached price lists, most recent first.
#[derive(Debug, Serialize)]
pub struct PriceListsResponse {
    pub price_lists: Vec<PriceListSummary>,
}

/// Result of a manual refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub price_list_id: String,
    pub valid_until: DateTime<Utc>,
    pub cached: usize,
    pub pruned_reservations: usize,
    pub edges: usize,
    pub skipped_legs: usize,
    pub skipped_offers: usize,
}

impl From<RefreshOutcome> for RefreshResponse {
    fn from(outcome: RefreshOutcome) -> Self {
        Self {
            price_list_id: outcome.price_list_id,
            valid_until: outcome.valid_until,
            cached: outcome.cached,
            pruned_reservations: outcome.pruned,
            edges: outcome.edges,
            skipped_legs: outcome.skipped_legs,
            skipped_offers: outcome.skipped_providers,
        }
    }
}

/// One leg of a route or reservation.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub from: String,
    pub to: String,
    pub company: String,
    pub provider_id: String,
    pub price: f64,
    pub distance: f64,
    pub flight_start: Option<String>,
    pub flight_end: Option<String>,
}

impl LegResult {
    pub fn from_edge(edge: &Edge) -> Self {
        Self {
            from: edge.from.to_string(),
            to: edge.to.to_string(),
            company: edge.company_name.clone(),
            provider_id: edge.provider_id.clone(),
            price: edge.price,
            distance: edge.distance,
            flight_start: edge.flight_start.clone(),
            flight_end: edge.flight_end.clone(),
        }
    }

    pub fn from_reserved(leg: &ReservedLeg) -> Self {
        Self {
            from: leg.from.to_string(),
            to: leg.to.to_string(),
            company: leg.company_name.clone(),
            provider_id: leg.provider_id.clone(),
            price: leg.price,
            distance: leg.distance,
            flight_start: leg.flight_start.clone(),
            flight_end: leg.flight_end.clone(),
        }
    }
}

/// A route option.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Stable id, used to book the route
    pub id: String,

    /// Display path, e.g. "Earth→Mars | Mars→Venus"
    pub path: String,

    pub legs: Vec<LegResult>,
    pub companies: Vec<String>,
    pub total_price: f64,
    pub total_distance: f64,
    pub total_duration_ms: i64,

    /// Price with two decimals
    pub price_display: String,

    /// Travel time in hours, e.g. "12.5h"
    pub duration_display: String,
}

impl RouteResult {
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id().to_string(),
            path: route.path().to_string(),
            legs: route.legs().iter().map(LegResult::from_edge).collect(),
            companies: route.companies().to_vec(),
            total_price: route.total_price(),
            total_distance: route.total_distance(),
            total_duration_ms: route.total_duration_ms(),
            price_display: format_money(route.total_price()),
            duration_display: format_hours(route.total_duration_ms()),
        }
    }
}

/// Routes found for a query.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteResult>,
    pub sort: String,
}

/// A stored reservation.
#[derive(Debug, Serialize)]
pub struct ReservationResult {
    pub id: String,
    pub price_list_id: String,
    pub price_list_valid_until: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub legs: Vec<LegResult>,
    pub companies: Vec<String>,
    pub total_price: f64,
    pub total_travel_time_ms: i64,
    pub price_display: String,
    pub duration_display: String,
}

impl ReservationResult {
    pub fn from_reservation(reservation: &Reservation) -> Self {
        Self {
            id: reservation.id.to_string(),
            price_list_id: reservation.price_list_id.clone(),
            price_list_valid_until: reservation.price_list_valid_until,
            created_at: reservation.created_at,
            first_name: reservation.first_name.clone(),
            last_name: reservation.last_name.clone(),
            legs: reservation.routes.iter().map(LegResult::from_reserved).collect(),
            companies: reservation.transportation_company_names.clone(),
            total_price: reservation.total_quoted_price,
            total_travel_time_ms: reservation.total_quoted_travel_time_ms,
            price_display: format_money(reservation.total_quoted_price),
            duration_display: format_hours(reservation.total_quoted_travel_time_ms),
        }
    }
}

/// Stored reservations, newest first.
#[derive(Debug, Serialize)]
pub struct ReservationsResponse {
    pub reservations: Vec<ReservationResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Format an amount with two decimals.
pub fn format_money(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Format milliseconds as hours with one decimal, e.g. "12.5h".
pub fn format_hours(ms: i64) -> String {
    format!("{:.1}h", ms as f64 / 3_600_000.0)
}
