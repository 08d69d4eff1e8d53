//! Domain types for the route planner.
//!
//! This module contains the validated types the planner works with.
//! All types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod edge;
mod error;
mod planet;
mod reservation;
mod route;
mod time;

pub use edge::Edge;
pub use error::DomainError;
pub use planet::{InvalidPlanet, Planet};
pub use reservation::{Passenger, Reservation, ReservedLeg};
pub use route::{PATH_SEPARATOR, Route};
pub use time::{duration_ms, is_expired, parse_instant};
