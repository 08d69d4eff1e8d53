//! Canned price source for running without the live API.
//!
//! Serves price lists loaded from JSON files or handed in directly. Each
//! fetch returns the next list in order, then keeps returning the last one.

use std::path::Path;
use std::sync::Mutex;

use super::client::PriceSource;
use super::error::FeedError;
use super::types::PriceList;

/// Price source that replays a fixed sequence of price lists.
pub struct MockFeed {
    lists: Vec<PriceList>,
    next: Mutex<usize>,
}

impl MockFeed {
    /// Create a mock feed from price lists, served in order.
    pub fn new(lists: Vec<PriceList>) -> Self {
        Self {
            lists,
            next: Mutex::new(0),
        }
    }

    /// Create a mock feed from a JSON file holding one price list or an
    /// array of them.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            FeedError::NotConfigured(format!("failed to read {}: {}", path.display(), e))
        })?;

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| FeedError::Json {
                message: e.to_string(),
            })?;

        let lists = if value.is_array() {
            serde_json::from_value::<Vec<PriceList>>(value)
        } else {
            serde_json::from_value::<PriceList>(value).map(|list| vec![list])
        }
        .map_err(|e| FeedError::Json {
            message: e.to_string(),
        })?;

        Ok(Self::new(lists))
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> usize {
        *self.next.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PriceSource for MockFeed {
    async fn fetch(&self) -> Result<PriceList, FeedError> {
        let index = {
            let mut next = self.next.lock().unwrap_or_else(|e| e.into_inner());
            let index = *next;
            *next += 1;
            index
        };

        self.lists
            .get(index)
            .or_else(|| self.lists.last())
            .cloned()
            .ok_or_else(|| FeedError::api(503, "mock feed has no price lists"))
    }
}
