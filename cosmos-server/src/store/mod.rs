//! Persistence of price lists and reservations.
//!
//! Both collections live in a [`KeyValueStore`] as JSON arrays under fixed
//! keys. The store is an explicit handle shared by the price-list cache and
//! the reservation book. Stored data that fails to decode is reported in a
//! [`Loaded`] result instead of failing the read.

mod entries;
mod error;
mod kv;
mod price_lists;
mod reservations;

pub use entries::Loaded;
pub use error::StoreError;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use price_lists::{PRICE_LISTS_KEY, PriceListCache, PriceListCacheConfig};
pub use reservations::{Pruned, RESERVATIONS_KEY, ReservationBook};
