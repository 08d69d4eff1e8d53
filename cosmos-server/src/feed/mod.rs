//! TravelPrices feed client.
//!
//! The feed publishes one price list at a time. Each list has an `id` and a
//! `validUntil` instant, and lists every leg between planets with the
//! companies offering it. The client fetches the whole list; nothing is
//! streamed or paged.

mod client;
mod error;
mod mock;
mod types;

pub use client::{DEFAULT_FEED_URL, FeedClient, FeedConfig, FeedSource, PriceSource};
pub use error::{FeedError, MAX_BODY_CHARS};
pub use mock::MockFeed;
pub use types::{
    FeedEntry, Leg, NameRef, NamedEntity, PriceList, Provider, RawNumber, RouteInfo,
    UNKNOWN_COMPANY,
};
