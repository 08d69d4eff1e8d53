//! Refresh and booking orchestration.
//!
//! [`TravelService`] ties the feed, the price-list cache, the reservation
//! book, and the planner together. Writes to the store (refresh and
//! booking) are serialized by one async mutex so no read-modify-write of a
//! stored collection is lost.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::{CacheConfig, GraphCache};
use crate::domain::{DomainError, Passenger, Planet, Reservation, Route};
use crate::feed::{FeedError, PriceList, PriceSource};
use crate::planner::{
    SearchConfig, SortKey, destination_options, list_companies, list_planets, rank_routes,
};
use crate::store::{
    KeyValueStore, PriceListCache, PriceListCacheConfig, ReservationBook, StoreError,
};

/// Errors from refreshing the price-list cache.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// Fetching the price list failed; the cache is unchanged
    #[error("refresh failed: {0}")]
    Feed(#[from] FeedError),

    /// Persisting the fetched list failed
    #[error("refresh failed: {0}")]
    Store(#[from] StoreError),
}

/// Errors from creating a reservation.
#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    /// Nothing has been fetched yet
    #[error("no price list available")]
    NoActivePriceList,

    /// The route is not offered by the active price list
    #[error("route {route_id} not found from {origin} to {destination}")]
    RouteNotFound {
        route_id: String,
        origin: String,
        destination: String,
    },

    /// Passenger or price-list validation failed
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Summary of one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    /// Id of the fetched price list, now the active one.
    pub price_list_id: String,
    pub valid_until: DateTime<Utc>,

    /// Number of price lists cached after the upsert.
    pub cached: usize,

    /// Reservations deleted because their price list was evicted.
    pub pruned: usize,

    /// Priced edges built from the fetched list.
    pub edges: usize,

    /// Legs of the fetched list that produced no edges.
    pub skipped_legs: usize,

    /// Offers of the fetched list that produced no edge.
    pub skipped_providers: usize,
}

/// Booking request for a route found by search.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub origin: String,
    pub destination: String,
    pub route_id: String,
    pub first_name: String,
    pub last_name: String,
}

/// Price lists, routes, and reservations behind one handle.
pub struct TravelService<F> {
    feed: F,
    price_lists: PriceListCache<dyn KeyValueStore>,
    reservations: ReservationBook<dyn KeyValueStore>,
    graphs: GraphCache,
    search: SearchConfig,

    /// Serializes every write to the store.
    write_lock: Mutex<()>,
}

impl<F: PriceSource> TravelService<F> {
    /// Create a service with default cache and search settings.
    pub fn new(feed: F, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(
            feed,
            store,
            &PriceListCacheConfig::default(),
            SearchConfig::default(),
        )
    }

    pub fn with_config(
        feed: F,
        store: Arc<dyn KeyValueStore>,
        cache: &PriceListCacheConfig,
        search: SearchConfig,
    ) -> Self {
        Self {
            feed,
            price_lists: PriceListCache::new(store.clone(), cache),
            reservations: ReservationBook::new(store),
            graphs: GraphCache::new(&CacheConfig {
                max_capacity: cache.capacity as u64,
                ..CacheConfig::default()
            }),
            search,
            write_lock: Mutex::new(()),
        }
    }

    /// Search limits in use.
    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// Fetch the current price list, cache it, and prune reservations.
    ///
    /// The fetch happens outside the write lock. On a fetch failure the
    /// cache and reservations are left untouched.
    pub async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        let list = self.feed.fetch().await?;
        let price_list_id = list.id.clone();
        let valid_until = list.valid_until;

        let _guard = self.write_lock.lock().await;
        let cached = self.price_lists.upsert(list)?;
        let pruned = self.reservations.prune(&cached)?;
        self.graphs.invalidate_all();

        let (edges, skipped_legs, skipped_providers) = match cached.first() {
            Some(active) => {
                let graph = self.graphs.get_or_build(active).await;
                (graph.edge_count(), graph.skipped_legs(), graph.skipped_providers())
            }
            None => (0, 0, 0),
        };

        info!(
            price_list = %price_list_id,
            %valid_until,
            cached = cached.len(),
            pruned = pruned.removed,
            edges,
            skipped_legs,
            skipped_providers,
            "Price lists refreshed"
        );

        Ok(RefreshOutcome {
            price_list_id,
            valid_until,
            cached: cached.len(),
            pruned: pruned.removed,
            edges,
            skipped_legs,
            skipped_providers,
        })
    }

    /// Cached price lists, most recent first.
    pub fn price_lists(&self) -> Result<Vec<PriceList>, StoreError> {
        Ok(self.price_lists.load()?.items)
    }

    /// The most recently fetched price list.
    pub fn active_price_list(&self) -> Result<Option<PriceList>, StoreError> {
        self.price_lists.active()
    }

    /// Planets in the active price list.
    pub fn planets(&self) -> Result<Vec<Planet>, StoreError> {
        Ok(self
            .active_price_list()?
            .map(|list| list_planets(&list))
            .unwrap_or_default())
    }

    /// Companies in the active price list.
    pub fn companies(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .active_price_list()?
            .map(|list| list_companies(&list))
            .unwrap_or_default())
    }

    /// Destinations to offer for `origin` in the active price list.
    pub fn destinations(&self, origin: Option<&str>) -> Result<Vec<Planet>, StoreError> {
        Ok(self
            .active_price_list()?
            .map(|list| destination_options(&list, origin, self.search.reach_hop_limit))
            .unwrap_or_default())
    }

    /// Routes in the active price list, filtered and sorted.
    ///
    /// Returns an empty list when nothing is cached, either endpoint is
    /// blank, or origin equals destination.
    pub async fn routes(
        &self,
        origin: &str,
        destination: &str,
        company: Option<&str>,
        sort: SortKey,
    ) -> Result<Vec<Route>, StoreError> {
        let Some(list) = self.active_price_list()? else {
            return Ok(Vec::new());
        };
        let routes = self.search_list(&list, origin, destination).await;
        Ok(rank_routes(routes, company, sort))
    }

    async fn search_list(&self, list: &PriceList, origin: &str, destination: &str) -> Vec<Route> {
        let (Ok(origin), Ok(destination)) = (Planet::parse(origin), Planet::parse(destination))
        else {
            return Vec::new();
        };

        self.graphs
            .get_or_build(list)
            .await
            .search(
                &origin,
                &destination,
                self.search.hop_limit,
                self.search.result_cap,
            )
            .routes
    }

    /// Stored reservations, newest first.
    pub fn reservations(&self) -> Result<Vec<Reservation>, StoreError> {
        Ok(self.reservations.load()?.items)
    }

    /// Book a route from the active price list.
    ///
    /// The route is looked up again by id, so the stored snapshot always
    /// matches the price list it references.
    pub async fn reserve(
        &self,
        request: BookingRequest,
        now: DateTime<Utc>,
    ) -> Result<Reservation, ReservationError> {
        let passenger = Passenger::new(&request.first_name, &request.last_name)?;

        let _guard = self.write_lock.lock().await;

        let list = self
            .active_price_list()?
            .ok_or(ReservationError::NoActivePriceList)?;

        let route = self
            .search_list(&list, &request.origin, &request.destination)
            .await
            .into_iter()
            .find(|r| r.id() == request.route_id)
            .ok_or_else(|| ReservationError::RouteNotFound {
                route_id: request.route_id.clone(),
                origin: request.origin.clone(),
                destination: request.destination.clone(),
            })?;

        let reservation = Reservation::book(&list.id, list.valid_until, &route, passenger, now)?;
        self.reservations.add(reservation.clone())?;

        debug!(
            reservation = %reservation.id,
            price_list = %list.id,
            route = %route.id(),
            "Reservation created"
        );

        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::MockFeed;
    use crate::store::MemoryStore;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    }

    fn price_list(id: &str, valid_until: &str) -> PriceList {
        serde_json::from_value(json!({
            "id": id,
            "validUntil": valid_until,
            "legs": [
                { "id": "em", "routeInfo": { "id": "r1", "from": { "name": "Earth" }, "to": { "name": "Mars" }, "distance": 100 },
                  "providers": [
                      { "id": "a", "company": { "name": "SpaceX" }, "price": 10,
                        "flightStart": "2030-01-02T00:00:00Z", "flightEnd": "2030-01-02T10:00:00Z" }
                  ] },
                { "id": "ev", "routeInfo": { "id": "r2", "from": { "name": "Earth" }, "to": { "name": "Venus" }, "distance": 40 },
                  "providers": [{ "id": "b", "company": { "name": "Travel Nova" }, "price": 2 }] },
                { "id": "vm", "routeInfo": { "id": "r3", "from": { "name": "Venus" }, "to": { "name": "Mars" }, "distance": 90 },
                  "providers": [{ "id": "c", "company": { "name": "Travel Nova" }, "price": 3 }] }
            ]
        }))
        .unwrap()
    }

    fn service(lists: Vec<PriceList>) -> TravelService<MockFeed> {
        TravelService::new(MockFeed::new(lists), Arc::new(MemoryStore::new()))
    }

    fn booking(route_id: &str) -> BookingRequest {
        BookingRequest {
            origin: "Earth".into(),
            destination: "Mars".into(),
            route_id: route_id.into(),
            first_name: " Ada ".into(),
            last_name: "Lovelace".into(),
        }
    }

    #[tokio::test]
    async fn empty_service_answers_empty() {
        let svc = service(vec![]);

        assert!(svc.active_price_list().unwrap().is_none());
        assert!(svc.planets().unwrap().is_empty());
        assert!(svc.companies().unwrap().is_empty());
        assert!(svc.destinations(Some("Earth")).unwrap().is_empty());
        assert!(
            svc.routes("Earth", "Mars", None, SortKey::Price)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn refresh_caches_price_list() {
        let svc = service(vec![price_list("pl-1", "2030-06-01T00:00:00Z")]);

        let outcome = svc.refresh().await.unwrap();

        assert_eq!(outcome.price_list_id, "pl-1");
        assert_eq!(outcome.cached, 1);
        assert_eq!(outcome.pruned, 0);
        assert_eq!(outcome.skipped_legs, 0);
        assert_eq!(outcome.skipped_providers, 0);
        assert_eq!(svc.active_price_list().unwrap().unwrap().id, "pl-1");
        assert_eq!(outcome.edges, 3);
    }

    #[tokio::test]
    async fn refresh_reports_skipped_entries() {
        let list: PriceList = serde_json::from_value(json!({
            "id": "dirty",
            "validUntil": "2030-06-01T00:00:00Z",
            "legs": [
                { "id": "ok", "routeInfo": { "from": "Earth", "to": "Mars" },
                  "providers": [{ "id": "a", "price": 1 }, { "id": "b", "price": "n/a" }, 42] },
                { "id": "empty", "routeInfo": { "from": "Earth", "to": "Venus" }, "providers": null },
                { "id": "lost", "routeInfo": { "from": "Earth" } },
                "garbage"
            ]
        }))
        .unwrap();
        let svc = service(vec![list]);

        let outcome = svc.refresh().await.unwrap();

        assert_eq!(outcome.skipped_legs, 2);
        assert_eq!(outcome.skipped_providers, 2);
        assert_eq!(outcome.edges, 1);
    }

    #[tokio::test]
    async fn reserve_picks_exact_offer_among_repeated_ids() {
        let list: PriceList = serde_json::from_value(json!({
            "id": "pl-1",
            "validUntil": "2030-06-01T00:00:00Z",
            "legs": [
                { "id": "em", "routeInfo": { "from": "Earth", "to": "Mars" },
                  "providers": [
                      { "company": "SpaceX", "price": 100 },
                      { "company": "Travel Nova", "price": 1 }
                  ] }
            ]
        }))
        .unwrap();
        let svc = service(vec![list]);
        svc.refresh().await.unwrap();

        let routes = svc.routes("Earth", "Mars", None, SortKey::Price).await.unwrap();
        let ids: Vec<&str> = routes.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["em:#1", "em:"]);

        let cheap = svc.reserve(booking("em:#1"), now()).await.unwrap();
        assert_eq!(cheap.total_quoted_price, 1.0);
        assert_eq!(cheap.transportation_company_names, vec!["Travel Nova"]);

        let dear = svc.reserve(booking("em:"), now()).await.unwrap();
        assert_eq!(dear.total_quoted_price, 100.0);
    }

    #[tokio::test]
    async fn refresh_failure_leaves_cache() {
        let svc = service(vec![]);
        let err = svc.refresh().await.unwrap_err();

        assert!(matches!(err, RefreshError::Feed(_)));
        assert!(svc.price_lists().unwrap().is_empty());
    }

    #[tokio::test]
    async fn catalog_from_active_list() {
        let svc = service(vec![price_list("pl-1", "2030-06-01T00:00:00Z")]);
        svc.refresh().await.unwrap();

        let planets: Vec<String> = svc.planets().unwrap().into_iter().map(String::from).collect();
        assert_eq!(planets, vec!["Earth", "Mars", "Venus"]);
        assert_eq!(svc.companies().unwrap(), vec!["SpaceX", "Travel Nova"]);

        let from_mars: Vec<String> = svc
            .destinations(Some("Mars"))
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(from_mars, vec!["Earth", "Mars", "Venus"]);
    }

    #[tokio::test]
    async fn routes_ranked() {
        let svc = service(vec![price_list("pl-1", "2030-06-01T00:00:00Z")]);
        svc.refresh().await.unwrap();

        let by_price = svc.routes("Earth", "Mars", None, SortKey::Price).await.unwrap();
        let ids: Vec<&str> = by_price.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["ev:b/vm:c", "em:a"]);

        let spacex = svc
            .routes("Earth", "Mars", Some("SpaceX"), SortKey::Price)
            .await
            .unwrap();
        assert_eq!(spacex.len(), 1);
        assert_eq!(spacex[0].id(), "em:a");

        assert!(svc.routes("Earth", "Earth", None, SortKey::Price).await.unwrap().is_empty());
        assert!(svc.routes("", "Mars", None, SortKey::Price).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reserve_stores_snapshot() {
        let svc = service(vec![price_list("pl-1", "2030-06-01T00:00:00Z")]);
        svc.refresh().await.unwrap();

        let reservation = svc.reserve(booking("ev:b/vm:c"), now()).await.unwrap();

        assert_eq!(reservation.price_list_id, "pl-1");
        assert_eq!(reservation.first_name, "Ada");
        assert_eq!(reservation.total_quoted_price, 5.0);
        assert_eq!(reservation.routes.len(), 2);
        assert_eq!(svc.reservations().unwrap(), vec![reservation]);
    }

    #[tokio::test]
    async fn reserve_rejects_expired_price_list() {
        let svc = service(vec![price_list("pl-1", "2029-12-31T23:59:59Z")]);
        svc.refresh().await.unwrap();

        let err = svc.reserve(booking("em:a"), now()).await.unwrap_err();

        assert!(matches!(
            err,
            ReservationError::Domain(DomainError::PriceListExpired { .. })
        ));
        assert!(svc.reservations().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reserve_validation_errors() {
        let svc = service(vec![price_list("pl-1", "2030-06-01T00:00:00Z")]);

        assert!(matches!(
            svc.reserve(booking("em:a"), now()).await,
            Err(ReservationError::NoActivePriceList)
        ));

        svc.refresh().await.unwrap();

        assert!(matches!(
            svc.reserve(booking("em:zzz"), now()).await,
            Err(ReservationError::RouteNotFound { .. })
        ));

        let mut blank = booking("em:a");
        blank.last_name = "  ".into();
        assert!(matches!(
            svc.reserve(blank, now()).await,
            Err(ReservationError::Domain(DomainError::BlankName("last name")))
        ));
    }

    #[tokio::test]
    async fn refresh_prunes_reservations_on_evicted_lists() {
        let mut lists = vec![price_list("pl-0", "2030-06-01T00:00:00Z")];
        for i in 1..16 {
            lists.push(price_list(&format!("pl-{i}"), "2030-06-01T00:00:00Z"));
        }
        let svc = service(lists);

        svc.refresh().await.unwrap();
        svc.reserve(booking("em:a"), now()).await.unwrap();
        svc.refresh().await.unwrap();
        let survivor = svc.reserve(booking("em:a"), now()).await.unwrap();

        let mut last = None;
        for _ in 2..16 {
            last = Some(svc.refresh().await.unwrap());
        }

        let last = last.unwrap();
        assert_eq!(last.cached, 15);
        assert_eq!(last.pruned, 1);
        assert_eq!(svc.reservations().unwrap(), vec![survivor]);
    }
}
