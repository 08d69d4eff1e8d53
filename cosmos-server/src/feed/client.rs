//! TravelPrices HTTP client.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use super::error::FeedError;
use super::mock::MockFeed;
use super::types::PriceList;

/// Default URL of the TravelPrices endpoint.
pub const DEFAULT_FEED_URL: &str = "https://cosmosodyssey.azurewebsites.net/api/v1.0/TravelPrices";

/// Source of price lists.
///
/// This abstraction allows the refresh loop to be tested with canned data.
pub trait PriceSource: Send + Sync {
    /// Fetch the current price list.
    fn fetch(&self) -> impl Future<Output = Result<PriceList, FeedError>> + Send;
}

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Full URL of the TravelPrices endpoint
    pub url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl FeedConfig {
    /// Create a new config for the given URL with a 30 second timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

/// Client for the TravelPrices API.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    url: String,
}

impl FeedClient {
    /// Create a new feed client.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        if !config.url.starts_with("http://") && !config.url.starts_with("https://") {
            return Err(FeedError::NotConfigured(format!(
                "feed URL must be http(s): {}",
                config.url
            )));
        }

        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// The endpoint this client fetches from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PriceSource for FeedClient {
    async fn fetch(&self) -> Result<PriceList, FeedError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::api(status.as_u16(), &body));
        }

        let body = response.text().await?;

        let list: PriceList = serde_json::from_str(&body).map_err(|e| FeedError::Json {
            message: e.to_string(),
        })?;

        debug!(
            price_list = %list.id,
            legs = list.legs.len(),
            "Fetched price list"
        );

        Ok(list)
    }
}

/// Price source picked at startup: the live API or canned data.
pub enum FeedSource {
    Live(FeedClient),
    Mock(MockFeed),
}

impl FeedSource {
    /// Human-readable description for startup logs.
    pub fn describe(&self) -> String {
        match self {
            FeedSource::Live(client) => client.url().to_string(),
            FeedSource::Mock(_) => "mock feed".to_string(),
        }
    }
}

impl PriceSource for FeedSource {
    async fn fetch(&self) -> Result<PriceList, FeedError> {
        match self {
            FeedSource::Live(client) => client.fetch().await,
            FeedSource::Mock(mock) => mock.fetch().await,
        }
    }
}
