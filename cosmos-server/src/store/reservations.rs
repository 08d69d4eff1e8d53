//! Persisted reservations, kept consistent with the price-list cache.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::Reservation;
use crate::feed::PriceList;

use super::entries::{Loaded, load_entries, save_entries};
use super::error::StoreError;
use super::kv::KeyValueStore;

/// Store key for reservations.
pub const RESERVATIONS_KEY: &str = "cosmos.reservations";

/// Result of pruning reservations.
#[derive(Debug, Clone, PartialEq)]
pub struct Pruned {
    /// Reservations that still reference a cached price list, in stored order.
    pub kept: Vec<Reservation>,

    /// Number of reservations deleted.
    pub removed: usize,
}

/// Reservations, newest first.
pub struct ReservationBook<S: ?Sized> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> ReservationBook<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Load stored reservations, newest first.
    pub fn load(&self) -> Result<Loaded<Reservation>, StoreError> {
        load_entries(&*self.store, RESERVATIONS_KEY)
    }

    /// Store a new reservation ahead of existing ones.
    pub fn add(&self, reservation: Reservation) -> Result<Vec<Reservation>, StoreError> {
        let mut reservations = self.load()?.items;
        let id = reservation.id;
        reservations.insert(0, reservation);

        save_entries(&*self.store, RESERVATIONS_KEY, &reservations)?;
        debug!(reservation = %id, total = reservations.len(), "Stored reservation");

        Ok(reservations)
    }

    /// Delete every reservation whose price list is not in `cached`.
    ///
    /// This is destructive: reservations on a price list that has been
    /// evicted from the cache are removed from the store for good. Run it
    /// after every cache upsert. Undecodable stored entries are dropped too.
    pub fn prune(&self, cached: &[PriceList]) -> Result<Pruned, StoreError> {
        let ids: HashSet<&str> = cached.iter().map(|l| l.id.as_str()).collect();
        let loaded = self.load()?;
        let clean = loaded.is_clean();
        let before = loaded.items.len();

        let kept: Vec<Reservation> = loaded
            .items
            .into_iter()
            .filter(|r| ids.contains(r.price_list_id.as_str()))
            .collect();
        let removed = before - kept.len();

        if removed > 0 || !clean {
            save_entries(&*self.store, RESERVATIONS_KEY, &kept)?;
        }
        if removed > 0 {
            info!(removed, kept = kept.len(), "Pruned reservations on evicted price lists");
        }

        Ok(Pruned { kept, removed })
    }
}
