//! Domain error types.
//!
//! These errors represent validation failures and rejected preconditions
//! in the domain layer. They are distinct from feed and storage errors.

use chrono::{DateTime, Utc};

use super::Planet;

/// Domain-level errors for validation and business rules.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Route has no legs
    #[error("route must have at least one leg")]
    EmptyRoute,

    /// Consecutive legs don't share a planet
    #[error("legs ending at {0} and starting at {1} are not connected")]
    LegsNotConnected(Planet, Planet),

    /// Passenger name field is blank after trimming
    #[error("passenger {0} must not be blank")]
    BlankName(&'static str),

    /// The price list backing a reservation is no longer valid
    #[error("price list {id} expired at {valid_until}")]
    PriceListExpired {
        id: String,
        valid_until: DateTime<Utc>,
    },
}
