//! Application state for the web layer.

use std::sync::Arc;

use crate::feed::FeedSource;
use crate::service::TravelService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Price lists, routes, and reservations
    pub service: Arc<TravelService<FeedSource>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(service: TravelService<FeedSource>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Create app state sharing an existing service handle.
    pub fn from_shared(service: Arc<TravelService<FeedSource>>) -> Self {
        Self { service }
    }
}
