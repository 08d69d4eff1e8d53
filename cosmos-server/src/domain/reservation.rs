//! Reservations of a chosen route.
//!
//! A reservation captures everything the passenger was quoted at booking
//! time. It keeps a reference to its price list by id; once that price list
//! leaves the cache the reservation is pruned (see
//! [`ReservationBook::prune`](crate::store::ReservationBook::prune)).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time::is_expired;
use super::{DomainError, Edge, Planet, Route};

/// Passenger names, trimmed and non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passenger {
    first_name: String,
    last_name: String,
}

impl Passenger {
    /// Validate passenger names.
    pub fn new(first_name: &str, last_name: &str) -> Result<Self, DomainError> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(DomainError::BlankName("first name"));
        }

        let last_name = last_name.trim();
        if last_name.is_empty() {
            return Err(DomainError::BlankName("last name"));
        }

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

/// Snapshot of one booked leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservedLeg {
    pub from: Planet,
    pub to: Planet,
    pub distance: f64,
    pub provider_id: String,
    pub company_name: String,
    pub price: f64,
    pub flight_start: Option<String>,
    pub flight_end: Option<String>,
}

impl From<&Edge> for ReservedLeg {
    fn from(edge: &Edge) -> Self {
        Self {
            from: edge.from.clone(),
            to: edge.to.clone(),
            distance: edge.distance,
            provider_id: edge.provider_id.clone(),
            company_name: edge.company_name.clone(),
            price: edge.price,
            flight_start: edge.flight_start.clone(),
            flight_end: edge.flight_end.clone(),
        }
    }
}

/// A stored booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub price_list_id: String,

    /// `valid_until` of the price list at booking time.
    pub price_list_valid_until: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,

    /// The booked legs, in travel order.
    pub routes: Vec<ReservedLeg>,

    pub total_quoted_price: f64,
    pub total_quoted_travel_time_ms: i64,
    pub transportation_company_names: Vec<String>,
}

impl Reservation {
    /// Book `route` for `passenger` against a price list.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PriceListExpired`] if `now` is at or past
    /// `valid_until`. No reservation is produced in that case.
    pub fn book(
        price_list_id: &str,
        valid_until: DateTime<Utc>,
        route: &Route,
        passenger: Passenger,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if is_expired(valid_until, now) {
            return Err(DomainError::PriceListExpired {
                id: price_list_id.to_string(),
                valid_until,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            price_list_id: price_list_id.to_string(),
            price_list_valid_until: valid_until,
            created_at: now,
            first_name: passenger.first_name,
            last_name: passenger.last_name,
            routes: route.legs().iter().map(ReservedLeg::from).collect(),
            total_quoted_price: route.total_price(),
            total_quoted_travel_time_ms: route.total_duration_ms(),
            transportation_company_names: route.companies().to_vec(),
        })
    }
}
