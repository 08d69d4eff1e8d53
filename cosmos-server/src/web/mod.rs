//! Web layer for the route planner.
//!
//! Provides a JSON API for browsing planets, searching routes, and
//! booking them.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
